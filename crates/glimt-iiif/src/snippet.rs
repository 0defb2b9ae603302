//! Highlight snippets and hit text context.
//!
//! A [`Snippet`] is one highlighted region returned by the backend: the
//! region's full text (with `<em>` markers around hits) plus the
//! individual hits with their coordinates. [`ContextSplitter`] recovers
//! the text before and after each hit, advancing through the region so
//! repeated hits do not all grab the same context.

use serde::{Deserialize, Serialize};

use crate::coords::Coords;

/// One highlighted occurrence inside a snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightHit {
    /// The matched text, exactly as it appears between `<em>` markers.
    pub text: String,

    /// Where the hit sits on its source page.
    pub coords: Coords,
}

/// One highlight region tied to a source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// Caller-side identifier for this highlight region (e.g. the
    /// backend document id). Used as the key in skip reports; the
    /// image URI stands in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,

    /// URI of the source image file the OCR was derived from.
    pub image_uri: String,

    /// Sequence number when one physical file carries several
    /// sequential images; appended to the image identifier as
    /// `;<sequence>` during canvas resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    /// The region's full text with `<em>…</em>` hit markers.
    pub text: String,

    /// The hits, in backend order.
    pub hits: Vec<HighlightHit>,
}

impl Snippet {
    /// The image identifier used for canvas lookup:
    /// `image_uri` or `image_uri;sequence`.
    pub fn image_id(&self) -> String {
        match self.sequence {
            Some(seq) => format!("{};{}", self.image_uri, seq),
            None => self.image_uri.clone(),
        }
    }

    /// The identifier used in skip reports: `region_id` when present,
    /// otherwise the image URI.
    pub fn skip_key(&self) -> &str {
        self.region_id.as_deref().unwrap_or(&self.image_uri)
    }
}

/// Before/after context around one hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitContext {
    /// Text preceding the hit.
    pub before: String,
    /// The hit text itself.
    pub hit: String,
    /// Text following the hit.
    pub after: String,
}

/// Splits a shared parent region into per-hit context.
///
/// Occurrences of `<em>{hit}</em>` are consumed left to right: a byte
/// offset advances past each matched marker, so repeated hits receive
/// consecutive contexts and hits with different texts each find their
/// own next occurrence. Context is bounded by the neighboring
/// occurrences of the same marker. Overruns and absent markers clamp
/// to the text after the last occurrence, or the whole region when
/// there is none.
#[derive(Debug)]
pub struct ContextSplitter<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> ContextSplitter<'a> {
    /// Creates a splitter over a parent region's full text.
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    /// Returns the context for the next unconsumed occurrence of `hit`
    /// and advances past it.
    pub fn context(&mut self, hit: &str) -> HitContext {
        let marker = format!("<em>{hit}</em>");

        let Some(found) = self.text[self.offset..].find(marker.as_str()) else {
            let tail_start = self
                .text
                .rfind(marker.as_str())
                .map_or(0, |at| at + marker.len());
            let tail = self.text[tail_start..].to_string();
            return HitContext {
                before: tail.clone(),
                hit: hit.to_string(),
                after: tail,
            };
        };
        let start = self.offset + found;
        let end = start + marker.len();

        let before_start = self.text[..start]
            .rfind(marker.as_str())
            .map_or(0, |at| at + marker.len());
        let after_end = self.text[end..]
            .find(marker.as_str())
            .map_or(self.text.len(), |at| end + at);

        self.offset = end;

        HitContext {
            before: self.text[before_start..start].to_string(),
            hit: hit.to_string(),
            after: self.text[end..after_end].to_string(),
        }
    }
}
