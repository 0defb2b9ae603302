//! Canvas tables: dimensions, image associations, display order.
//!
//! A [`CanvasTable`] is built per request from the caller's IIIF
//! manifest knowledge: which canvases exist (with pixel dimensions),
//! which image file(s) each canvas paints, and the presentation order.
//! One image may be painted by several canvases (choice/composite
//! recipes); lookups tolerate no match by returning empty results.

use serde::{Deserialize, Serialize};

/// One canvas with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasEntry {
    /// Canvas identifier (IIIF canvas URI).
    pub id: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Association from one image identifier to the canvases painting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAssociation {
    /// Image identifier, optionally suffixed `;<sequence>`.
    pub image: String,
    /// Canvas ids painting this image, in association order.
    pub canvases: Vec<String>,
}

/// Per-request table of canvases, image associations, and display order.
///
/// Entries are plain vectors so construction order is preserved; when
/// no explicit `order` is supplied, the canvas encounter order is the
/// display order (the serde representation keeps that property, unlike
/// a map).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasTable {
    /// Known canvases in encounter order.
    #[serde(default)]
    pub canvases: Vec<CanvasEntry>,

    /// Image-to-canvas associations.
    #[serde(default)]
    pub images: Vec<ImageAssociation>,

    /// Explicit presentation order of canvas ids. Empty means "use
    /// canvas encounter order".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
}

impl CanvasTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a canvas, preserving encounter order.
    pub fn add_canvas<S: Into<String>>(&mut self, id: S, width: u32, height: u32) {
        self.canvases.push(CanvasEntry {
            id: id.into(),
            width,
            height,
        });
    }

    /// Associates an image identifier with a canvas.
    pub fn associate<I, C>(&mut self, image: I, canvas: C)
    where
        I: Into<String>,
        C: Into<String>,
    {
        let image = image.into();
        let canvas = canvas.into();
        if let Some(assoc) = self.images.iter_mut().find(|a| a.image == image) {
            assoc.canvases.push(canvas);
        } else {
            self.images.push(ImageAssociation {
                image,
                canvases: vec![canvas],
            });
        }
    }

    /// Sets the explicit presentation order.
    pub fn set_order(&mut self, order: Vec<String>) {
        self.order = order;
    }

    /// Looks up a canvas by id.
    pub fn canvas(&self, id: &str) -> Option<&CanvasEntry> {
        self.canvases.iter().find(|c| c.id == id)
    }

    /// The effective display order: the explicit order when set,
    /// otherwise canvas encounter order.
    pub fn display_order(&self) -> Vec<&str> {
        if self.order.is_empty() {
            self.canvases.iter().map(|c| c.id.as_str()).collect()
        } else {
            self.order.iter().map(String::as_str).collect()
        }
    }

    /// Page number of a canvas in the display order; `0` when the
    /// canvas is absent from it.
    pub fn page_of(&self, canvas_id: &str) -> u32 {
        self.display_order()
            .iter()
            .position(|id| *id == canvas_id)
            .map(|pos| pos as u32 + 1)
            .unwrap_or(0)
    }

    /// Canvas ids painting the given image identifier, sorted by
    /// display order. Unknown images yield an empty vector.
    pub fn canvases_for_image(&self, image_id: &str) -> Vec<&str> {
        let Some(assoc) = self.images.iter().find(|a| a.image == image_id) else {
            return Vec::new();
        };
        let mut ids: Vec<&str> = assoc.canvases.iter().map(String::as_str).collect();
        ids.sort_by_key(|id| self.page_of(id));
        ids
    }
}
