//! Logical-to-physical field resolution.
//!
//! A [`FieldTable`] maps logical field identifiers (what the caller's
//! configuration speaks) to the physical backend field names Solr
//! indexes, each with an optional boost and an optional language code
//! for multilingual variants.
//!
//! Resolution is lossy by design: unmapped logical fields and
//! suggester/spellcheck-only physical names are skipped and recorded,
//! never fatal.

use std::collections::HashMap;

use glimt_core::SkipReport;
use serde::{Deserialize, Serialize};

/// One physical backend field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalField {
    /// Backend field name (e.g. `tm_fulltext_en`).
    pub name: String,

    /// Boost factor. `None` means "no boost configured" and renders
    /// without a `^` suffix; `Some(1.0)` still renders `^1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,

    /// Language code for multilingual variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PhysicalField {
    /// Creates a physical field with no boost and no language.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            boost: None,
            language: None,
        }
    }

    /// Builder: set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Builder: set the language code.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Renders the field for a `qf` clause: `name` or `name^boost`.
    pub fn render(&self) -> String {
        match self.boost {
            Some(boost) => format!("{}^{}", self.name, boost),
            None => self.name.clone(),
        }
    }

    /// Whether this physical name denotes a suggester or spellcheck
    /// index. Such fields are internal to the backend and are excluded
    /// from query fragments unconditionally.
    pub fn is_suggester(&self) -> bool {
        let lower = self.name.to_lowercase();
        lower.contains("suggest") || lower.contains("spellcheck")
    }
}

/// All physical variants of one logical field.
///
/// A mapping with several entries carries language-specific variants;
/// all of them participate in the fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// The physical variants, in configuration order.
    pub variants: Vec<PhysicalField>,
}

/// Resolution table from logical field identifiers to physical fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTable {
    mappings: HashMap<String, FieldMapping>,
}

/// A logical field together with its surviving physical variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// The logical identifier the caller asked for.
    pub logical: String,
    /// Physical fields after the suggester filter, non-empty.
    pub fields: Vec<PhysicalField>,
}

impl FieldTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a full mapping for a logical field.
    pub fn map<S: Into<String>>(&mut self, logical: S, mapping: FieldMapping) {
        self.mappings.insert(logical.into(), mapping);
    }

    /// Registers a single-variant mapping, the common case.
    pub fn map_simple<L, P>(&mut self, logical: L, physical: P, boost: Option<f32>)
    where
        L: Into<String>,
        P: Into<String>,
    {
        let field = PhysicalField {
            name: physical.into(),
            boost,
            language: None,
        };
        self.map(logical, FieldMapping {
            variants: vec![field],
        });
    }

    /// Returns `true` when no logical field is mapped at all.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Looks up the mapping for a logical field.
    pub fn mapping(&self, logical: &str) -> Option<&FieldMapping> {
        self.mappings.get(logical)
    }

    /// Resolves the requested logical fields in caller order.
    ///
    /// Unmapped fields and fields whose every variant is a
    /// suggester/spellcheck index are recorded in the [`SkipReport`]
    /// and dropped. An empty result is valid; the caller decides
    /// whether an empty fragment is worth emitting.
    pub fn resolve(&self, requested: &[String]) -> (Vec<ResolvedField>, SkipReport) {
        let mut resolved = Vec::with_capacity(requested.len());
        let mut skipped = SkipReport::new();

        for logical in requested {
            let Some(mapping) = self.mappings.get(logical) else {
                tracing::debug!(field = %logical, "no physical mapping; skipping");
                skipped.skip(logical.clone(), "no physical mapping");
                continue;
            };

            let fields: Vec<PhysicalField> = mapping
                .variants
                .iter()
                .filter(|f| !f.is_suggester())
                .cloned()
                .collect();

            if fields.is_empty() {
                skipped.skip(logical.clone(), "suggester/spellcheck index only");
                continue;
            }

            resolved.push(ResolvedField {
                logical: logical.clone(),
                fields,
            });
        }

        (resolved, skipped)
    }
}
