//! Bounding boxes and coordinate systems.
//!
//! OCR backends deliver hit coordinates in one of two encodings:
//! absolute ALTO pixels (with the parent page's pixel dimensions) or
//! MiniOCR fractions already in `[0,1]`. The data model tags which one
//! applies instead of guessing; the historic guess survives only as
//! [`Coords::detect`] for untagged payloads.

use serde::{Deserialize, Serialize};

/// An axis-aligned box, `left/top/right/bottom`.
///
/// After [`Coords::normalize`] the invariant
/// `0 ≤ left ≤ right ≤ 1` and `0 ≤ top ≤ bottom ≤ 1` holds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl BoundingBox {
    /// Creates a box from its four edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Hit coordinates with their coordinate system made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum Coords {
    /// MiniOCR-style fractions, already in `[0,1]`.
    Relative {
        /// The fractional box.
        bbox: BoundingBox,
    },
    /// ALTO-style pixels plus the parent page's pixel dimensions.
    Absolute {
        /// The pixel box.
        bbox: BoundingBox,
        /// Parent page width in pixels.
        page_width: u32,
        /// Parent page height in pixels.
        page_height: u32,
    },
}

impl Coords {
    /// Classifies an untagged box using the legacy heuristic: a
    /// right-coordinate greater than 1 signals absolute pixels.
    ///
    /// This is an approximation, not a guaranteed discriminator (a
    /// one-pixel-wide page would fool it), kept only for backends that
    /// do not say which encoding they emit. The comparison is strict,
    /// so a relative box spanning the full width (`right == 1.0`)
    /// classifies as relative.
    pub fn detect(bbox: BoundingBox, page_width: u32, page_height: u32) -> Self {
        if bbox.right > 1.0 {
            Coords::Absolute {
                bbox,
                page_width,
                page_height,
            }
        } else {
            Coords::Relative { bbox }
        }
    }

    /// Normalizes to a `[0,1]`-relative box.
    ///
    /// Absolute boxes divide horizontal edges by the page width and
    /// vertical edges by the page height, each rounded to 3 decimal
    /// places. Relative boxes pass through unchanged except for the
    /// invariant repair: edges are clamped to `[0,1]` and reordered so
    /// `left ≤ right` and `top ≤ bottom`.
    pub fn normalize(&self) -> BoundingBox {
        let raw = match self {
            Coords::Relative { bbox } => *bbox,
            Coords::Absolute {
                bbox,
                page_width,
                page_height,
            } => {
                let w = f64::from((*page_width).max(1));
                let h = f64::from((*page_height).max(1));
                BoundingBox {
                    left: round3(bbox.left / w),
                    top: round3(bbox.top / h),
                    right: round3(bbox.right / w),
                    bottom: round3(bbox.bottom / h),
                }
            }
        };

        let left = clamp01(raw.left);
        let right = clamp01(raw.right);
        let top = clamp01(raw.top);
        let bottom = clamp01(raw.bottom);

        BoundingBox {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
