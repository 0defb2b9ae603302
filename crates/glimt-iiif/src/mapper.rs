//! The snippet-to-canvas mapping pass.
//!
//! Single pass over the request's snippets: validate the image URI,
//! resolve the canvases painting that image, normalize each hit's box,
//! recover its text context, and emit one [`MappedHit`] per associated
//! canvas. Input order is preserved throughout; a snippet whose image
//! URI cannot be parsed is logged, recorded, and skipped.

use glimt_core::{Result, SkipReport};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasTable;
use crate::coords::BoundingBox;
use crate::snippet::{ContextSplitter, Snippet};

/// Whether the URI has a parseable `scheme://non-empty-rest` shape.
fn is_parseable_uri(uri: &str) -> bool {
    let uri_re = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").expect("Invalid image URI regex");
    uri_re.is_match(uri)
}

/// One mapping request: everything supplied per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRequest {
    /// Backend highlight snippets, in result order.
    pub snippets: Vec<Snippet>,

    /// Canvas dimensions, associations, and display order.
    pub table: CanvasTable,

    /// Cap on hits taken per snippet; the backend page-size analog.
    #[serde(default = "default_max_hits")]
    pub max_hits_per_snippet: usize,
}

fn default_max_hits() -> usize {
    100
}

impl Default for MapRequest {
    fn default() -> Self {
        Self {
            snippets: Vec::new(),
            table: CanvasTable::default(),
            max_hits_per_snippet: default_max_hits(),
        }
    }
}

/// One hit projected onto one canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedHit {
    /// Canvas the hit lands on.
    pub canvas_id: String,

    /// Page number from the display order; `0` when the canvas is not
    /// in the order table.
    pub page: u32,

    /// Normalized `[0,1]`-relative bounding box.
    pub bbox: BoundingBox,

    /// Text preceding the hit.
    pub before: String,

    /// The matched text.
    pub hit: String,

    /// Text following the hit.
    pub after: String,
}

/// Result of one mapping pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapOutcome {
    /// Mapped hits in snippet order, hit order, then canvas order.
    pub hits: Vec<MappedHit>,

    /// Snippets that were skipped (with reasons).
    pub skipped: SkipReport,
}

/// Projects highlight snippets onto canvas-relative coordinates.
///
/// An empty request (no snippets, or a table nothing resolves against)
/// produces an empty outcome; only structurally impossible input would
/// error, and there is none at this layer today, so the `Result` exists
/// for contract symmetry with the fragment builder.
pub fn map_snippets(request: &MapRequest) -> Result<MapOutcome> {
    let mut outcome = MapOutcome::default();

    for (idx, snippet) in request.snippets.iter().enumerate() {
        if !is_parseable_uri(&snippet.image_uri) {
            tracing::warn!(
                snippet = idx,
                uri = %snippet.image_uri,
                "unparsable image URI; skipping snippet"
            );
            outcome
                .skipped
                .skip(snippet.skip_key(), "unparsable image URI");
            continue;
        }

        let image_id = snippet.image_id();
        let canvases = request.table.canvases_for_image(&image_id);
        if canvases.is_empty() {
            // No canvas paints this image; tolerated, not an error.
            tracing::debug!(image = %image_id, "no associated canvas");
            continue;
        }

        let mut splitter = ContextSplitter::new(&snippet.text);
        for hit in snippet.hits.iter().take(request.max_hits_per_snippet) {
            let context = splitter.context(&hit.text);
            let bbox = hit.coords.normalize();

            // Deliberate denormalization: composite canvases each get
            // a full copy of the match.
            for canvas_id in &canvases {
                outcome.hits.push(MappedHit {
                    canvas_id: (*canvas_id).to_string(),
                    page: request.table.page_of(canvas_id),
                    bbox,
                    before: context.before.clone(),
                    hit: context.hit.clone(),
                    after: context.after.clone(),
                });
            }
        }
    }

    Ok(outcome)
}
