//! # glimt-iiif
//!
//! Projects search-backend OCR highlight snippets onto IIIF canvases:
//! per-hit bounding boxes are normalized to `[0,1]`-relative canvas
//! coordinates, hit text gets its before/after context, and every hit
//! is resolved to the canvas(es) displaying its source image.
//!
//! Output can be rendered as IIIF Content Search API v1 (`@id`/`on`) or
//! v2 (`id`/`target`) annotation records.
//!
//! Like the fragment builder, the mapper is a pure transformation over
//! request-scoped structures; a single unparsable row is skipped and
//! reported, never fatal.
//!
//! # Usage
//!
//! ```rust
//! use glimt_iiif::{
//!     map_snippets, BoundingBox, CanvasTable, Coords, HighlightHit, MapRequest, Snippet,
//! };
//!
//! let mut table = CanvasTable::new();
//! table.add_canvas("https://example.org/canvas/p1", 800, 600);
//! table.associate("https://example.org/files/page1.tiff", "https://example.org/canvas/p1");
//!
//! let request = MapRequest {
//!     snippets: vec![Snippet {
//!         region_id: None,
//!         image_uri: "https://example.org/files/page1.tiff".to_string(),
//!         sequence: None,
//!         text: "before <em>hit</em> after".to_string(),
//!         hits: vec![HighlightHit {
//!             text: "hit".to_string(),
//!             coords: Coords::Absolute {
//!                 bbox: BoundingBox::new(100.0, 50.0, 700.0, 550.0),
//!                 page_width: 800,
//!                 page_height: 600,
//!             },
//!         }],
//!     }],
//!     table,
//!     ..Default::default()
//! };
//!
//! let outcome = map_snippets(&request).unwrap();
//! assert_eq!(outcome.hits[0].bbox.left, 0.125);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod annotation;
pub mod canvas;
pub mod coords;
pub mod mapper;
pub mod snippet;

mod proptests;

pub use annotation::{render_v1, render_v2, AnnotationV1, AnnotationV2};
pub use canvas::{CanvasEntry, CanvasTable, ImageAssociation};
pub use coords::{BoundingBox, Coords};
pub use mapper::{map_snippets, MapOutcome, MapRequest, MappedHit};
pub use snippet::{ContextSplitter, HighlightHit, HitContext, Snippet};

pub use glimt_core::{Error, Result, SkipReport};
