//! Fragment assembly.
//!
//! [`build_fragment`] is the crate's single entry point: it runs the
//! join rewrite pass, resolves the requested fields, and assembles one
//! Solr query string of the shape
//!
//! ```text
//! {!edismax qf='tm_fulltext^2.5 tm_title_en tm_title_es'}"term one" OR "term two"
//! ```
//!
//! which embeds cleanly into a parent query, most commonly via the
//! [`wrap_join`] helper.

use glimt_core::{Error, Result, SkipReport};
use serde::{Deserialize, Serialize};

use crate::escape::{escape_quoted, escape_term};
use crate::fields::FieldTable;
use crate::term::TermList;

/// How term text is embedded in the fragment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentMode {
    /// Single-word terms escaped bare, multi-word terms quoted, joined
    /// with the rewritten conjunctions. The default.
    #[default]
    Terms,
    /// Raw caller-supplied Solr syntax, passed through unescaped.
    Direct,
    /// All terms joined into a single quoted phrase.
    Phrase,
}

/// What to do with the fragment when a negated term was dropped.
///
/// Dropping a negated term changes the meaning of the join; some
/// callers prefer suppressing the join entirely over running a query
/// the user did not quite ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegationPolicy {
    /// Emit an empty fragment when any negation occurred.
    #[default]
    Omit,
    /// Build the fragment from the surviving terms.
    Include,
}

/// One fragment-building request: everything is supplied per call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentRequest {
    /// Logical field identifiers, in the order they should appear.
    pub fields: Vec<String>,

    /// Logical-to-physical resolution table.
    pub table: FieldTable,

    /// The annotated query terms.
    pub terms: TermList,

    /// Term embedding mode.
    #[serde(default)]
    pub mode: FragmentMode,

    /// Join policy when negated terms were dropped.
    #[serde(default)]
    pub negation_policy: NegationPolicy,
}

/// The built fragment plus its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// The Solr query string; empty when nothing resolved, no terms
    /// survived the rewrite, or the negation policy suppressed it.
    pub query: String,

    /// Whether any negated term was removed by the rewrite pass.
    pub negation_removed: bool,

    /// Logical fields that were skipped during resolution.
    pub skipped: SkipReport,
}

impl Fragment {
    /// Returns `true` when there is no query to embed.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Builds a Solr sub-query fragment from a [`FragmentRequest`].
///
/// # Errors
///
/// Returns [`Error::Config`] when the resolution table has no mappings
/// at all; that is malformed caller input. Zero *matching* fields is a
/// valid, common state and yields an empty fragment instead.
pub fn build_fragment(request: &FragmentRequest) -> Result<Fragment> {
    if request.table.is_empty() {
        return Err(Error::config("field resolution table is empty"));
    }

    let (rewritten, negation_removed) = request.terms.rewrite_for_join();
    let (resolved, skipped) = request.table.resolve(&request.fields);

    if negation_removed && request.negation_policy == NegationPolicy::Omit {
        tracing::debug!("negated term dropped; omitting fragment per policy");
        return Ok(Fragment {
            query: String::new(),
            negation_removed,
            skipped,
        });
    }

    if resolved.is_empty() || rewritten.is_empty() {
        return Ok(Fragment {
            query: String::new(),
            negation_removed,
            skipped,
        });
    }

    // edismax ORs across qf fields, which is exactly the rewritten
    // interfield operator; per-field expressions collapse into one qf.
    let qf: Vec<String> = resolved
        .iter()
        .flat_map(|r| r.fields.iter())
        .map(|f| f.render())
        .collect();

    let body = render_body(&rewritten, request.mode);

    Ok(Fragment {
        query: format!("{{!edismax qf='{}'}}{}", qf.join(" "), body),
        negation_removed,
        skipped,
    })
}

/// Wraps a fragment query in a Solr `{!join}` clause.
///
/// `from` and `to` are the join key fields on the child and parent
/// documents. An empty fragment wraps to an empty string so the caller
/// can skip emitting the clause.
pub fn wrap_join(fragment: &Fragment, from: &str, to: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    // Single quotes delimit the v= local param; escape them inside.
    let inner = fragment.query.replace('\'', "\\'");
    format!("{{!join from={from} to={to} v='{inner}'}}")
}

/// A bare token is escaped in place; anything containing whitespace
/// becomes a quoted phrase so the words stay adjacent.
fn render_term(value: &str) -> String {
    if value.contains(char::is_whitespace) {
        format!("\"{}\"", escape_quoted(value))
    } else {
        escape_term(value)
    }
}

fn render_body(terms: &TermList, mode: FragmentMode) -> String {
    match mode {
        FragmentMode::Terms => join_terms(terms, render_term),
        FragmentMode::Direct => join_terms(terms, |value| value.to_string()),
        FragmentMode::Phrase => {
            let phrase: Vec<&str> = terms.terms.iter().map(|t| t.value.as_str()).collect();
            format!("\"{}\"", escape_quoted(&phrase.join(" ")))
        }
    }
}

fn join_terms<F>(terms: &TermList, render: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();
    for (i, term) in terms.terms.iter().enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(term.conjunction.as_str());
            out.push(' ');
        }
        out.push_str(&render(&term.value));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fields::{FieldMapping, PhysicalField};
    use crate::term::{Conjunction, QueryTerm};

    fn request(terms: Vec<QueryTerm>) -> FragmentRequest {
        let mut table = FieldTable::new();
        table.map_simple("fulltext", "text_field", Some(2.5));
        table.map_simple("title", "tm_title", None);
        FragmentRequest {
            fields: vec!["fulltext".to_string(), "title".to_string()],
            table,
            terms: TermList::new(terms),
            ..Default::default()
        }
    }

    #[test]
    fn test_boost_suffix_in_qf() {
        let fragment = build_fragment(&request(vec![QueryTerm::new("hello")])).unwrap();
        assert!(fragment.query.contains("text_field^2.5"));
        assert!(fragment.query.contains("tm_title"));
        assert!(!fragment.query.contains("tm_title^"));
    }

    #[test]
    fn test_terms_mode_joins_with_or() {
        let fragment = build_fragment(&request(vec![
            QueryTerm::new("one"),
            QueryTerm::new("two").with_conjunction(Conjunction::And),
        ]))
        .unwrap();
        // AND is rewritten to OR before assembly.
        assert_eq!(
            fragment.query,
            "{!edismax qf='text_field^2.5 tm_title'}one OR two"
        );
    }

    #[test]
    fn test_terms_mode_escapes_bare_and_quotes_phrases() {
        let fragment = build_fragment(&request(vec![
            QueryTerm::new("a+b"),
            QueryTerm::new("coastal maps"),
        ]))
        .unwrap();
        assert_eq!(
            fragment.query,
            "{!edismax qf='text_field^2.5 tm_title'}a\\+b OR \"coastal maps\""
        );
    }

    #[test]
    fn test_negated_term_text_never_appears() {
        let mut req = request(vec![
            QueryTerm::new("keep"),
            QueryTerm::new("secret").negated(),
        ]);
        req.negation_policy = NegationPolicy::Include;
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.negation_removed);
        assert!(!fragment.query.contains("secret"));
        assert!(fragment.query.contains("keep"));
    }

    #[test]
    fn test_omit_policy_suppresses_whole_fragment() {
        let req = request(vec![
            QueryTerm::new("keep"),
            QueryTerm::new("drop").negated(),
        ]);
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.negation_removed);
        assert!(fragment.is_empty());
    }

    #[test]
    fn test_phrase_mode() {
        let mut req = request(vec![QueryTerm::new("digital"), QueryTerm::new("objects")]);
        req.mode = FragmentMode::Phrase;
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.query.ends_with("\"digital objects\""));
    }

    #[test]
    fn test_direct_mode_passes_syntax_through() {
        let mut req = request(vec![QueryTerm::new("title:(exact)")]);
        req.mode = FragmentMode::Direct;
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.query.ends_with("title:(exact)"));
    }

    #[test]
    fn test_empty_table_is_config_error() {
        let req = FragmentRequest {
            fields: vec!["fulltext".to_string()],
            terms: TermList::new(vec![QueryTerm::new("x")]),
            ..Default::default()
        };
        let err = build_fragment(&req).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unmatched_fields_yield_empty_fragment_not_error() {
        let mut req = request(vec![QueryTerm::new("x")]);
        req.fields = vec!["nonexistent".to_string()];
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.skipped.count(), 1);
    }

    #[test]
    fn test_all_terms_negated_yields_empty_fragment() {
        let mut req = request(vec![QueryTerm::new("no").negated()]);
        req.negation_policy = NegationPolicy::Include;
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.is_empty());
        assert!(fragment.negation_removed);
    }

    #[test]
    fn test_suggester_variant_excluded_from_qf() {
        let mut table = FieldTable::new();
        table.map("fulltext", FieldMapping {
            variants: vec![
                PhysicalField::new("tm_fulltext"),
                PhysicalField::new("suggest_fulltext"),
            ],
        });
        let req = FragmentRequest {
            fields: vec!["fulltext".to_string()],
            table,
            terms: TermList::new(vec![QueryTerm::new("x")]),
            ..Default::default()
        };
        let fragment = build_fragment(&req).unwrap();
        assert!(fragment.query.contains("tm_fulltext"));
        assert!(!fragment.query.contains("suggest_fulltext"));
    }

    #[test]
    fn test_wrap_join() {
        let fragment = build_fragment(&request(vec![QueryTerm::new("hello")])).unwrap();
        let join = wrap_join(&fragment, "its_parent_id", "its_nid");
        assert!(join.starts_with("{!join from=its_parent_id to=its_nid v='"));
        assert!(join.contains("qf=\\'"), "inner quotes are escaped: {join}");
        assert!(join.ends_with("'}"));
    }

    #[test]
    fn test_wrap_join_empty_fragment_is_empty() {
        let fragment = Fragment {
            query: String::new(),
            negation_removed: true,
            skipped: SkipReport::new(),
        };
        assert_eq!(wrap_join(&fragment, "a", "b"), "");
    }
}
