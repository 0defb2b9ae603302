//! IIIF Content Search API annotation shapes.
//!
//! [`MappedHit`]s render to either the v1 annotation shape
//! (`@id`/`@type`/`on`, `oa:` vocabulary) or the v2 shape
//! (`id`/`type`/`target`, Web Annotation vocabulary). Both carry the
//! before/after text context so clients can show the snippet.
//!
//! The target fragment uses the `#xywh=` media selector: pixel values
//! when the canvas dimensions are known, `pct:` percentages otherwise.

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasTable;
use crate::mapper::{MapOutcome, MappedHit};

/// Content Search v1 annotation (`oa:` vocabulary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationV1 {
    /// Annotation identifier.
    #[serde(rename = "@id")]
    pub id: String,

    /// Always `oa:Annotation`.
    #[serde(rename = "@type")]
    pub kind: String,

    /// Always `sc:painting` for text-on-canvas highlights.
    pub motivation: String,

    /// The matched text as an embedded content resource.
    pub resource: TextResourceV1,

    /// Canvas target with an `#xywh=` selector.
    pub on: String,

    /// Text preceding the hit.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub before: String,

    /// Text following the hit.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub after: String,
}

/// Embedded text resource for v1 annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResourceV1 {
    /// Always `cnt:ContentAsText`.
    #[serde(rename = "@type")]
    pub kind: String,

    /// The matched text.
    pub chars: String,
}

/// Content Search v2 annotation (Web Annotation vocabulary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationV2 {
    /// Annotation identifier.
    pub id: String,

    /// Always `Annotation`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Always `highlighting`.
    pub motivation: String,

    /// The matched text as a textual body.
    pub body: TextBodyV2,

    /// Canvas target with an `#xywh=` selector.
    pub target: String,

    /// Text preceding the hit.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub before: String,

    /// Text following the hit.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub after: String,
}

/// Textual body for v2 annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBodyV2 {
    /// Always `TextualBody`.
    #[serde(rename = "type")]
    pub kind: String,

    /// The matched text.
    pub value: String,
}

/// Builds the `{canvas}#xywh=...` target for a hit.
///
/// With known canvas dimensions the selector is in pixels; otherwise it
/// falls back to `pct:` percentages derived from the normalized box.
fn target(hit: &MappedHit, table: &CanvasTable) -> String {
    let bbox = &hit.bbox;
    match table.canvas(&hit.canvas_id) {
        Some(canvas) => {
            let w = f64::from(canvas.width);
            let h = f64::from(canvas.height);
            format!(
                "{}#xywh={},{},{},{}",
                hit.canvas_id,
                (bbox.left * w).round() as u32,
                (bbox.top * h).round() as u32,
                (bbox.width() * w).round() as u32,
                (bbox.height() * h).round() as u32,
            )
        }
        None => format!(
            "{}#xywh=pct:{},{},{},{}",
            hit.canvas_id,
            bbox.left * 100.0,
            bbox.top * 100.0,
            bbox.width() * 100.0,
            bbox.height() * 100.0,
        ),
    }
}

/// Renders a mapping outcome as v1 annotations.
///
/// `base_id` prefixes the generated annotation identifiers
/// (`{base_id}/annotation/{n}`).
pub fn render_v1(outcome: &MapOutcome, table: &CanvasTable, base_id: &str) -> Vec<AnnotationV1> {
    outcome
        .hits
        .iter()
        .enumerate()
        .map(|(n, hit)| AnnotationV1 {
            id: format!("{base_id}/annotation/{n}"),
            kind: "oa:Annotation".to_string(),
            motivation: "sc:painting".to_string(),
            resource: TextResourceV1 {
                kind: "cnt:ContentAsText".to_string(),
                chars: hit.hit.clone(),
            },
            on: target(hit, table),
            before: hit.before.clone(),
            after: hit.after.clone(),
        })
        .collect()
}

/// Renders a mapping outcome as v2 annotations.
pub fn render_v2(outcome: &MapOutcome, table: &CanvasTable, base_id: &str) -> Vec<AnnotationV2> {
    outcome
        .hits
        .iter()
        .enumerate()
        .map(|(n, hit)| AnnotationV2 {
            id: format!("{base_id}/annotation/{n}"),
            kind: "Annotation".to_string(),
            motivation: "highlighting".to_string(),
            body: TextBodyV2 {
                kind: "TextualBody".to_string(),
                value: hit.hit.clone(),
            },
            target: target(hit, table),
            before: hit.before.clone(),
            after: hit.after.clone(),
        })
        .collect()
}
