//! Query terms and the join rewrite pass.
//!
//! A [`TermList`] is an ordered sequence of [`QueryTerm`]s plus an
//! overall interfield operator. Term lists are never mutated in place:
//! the rewrite pass returns a new list, leaving the input untouched.

use serde::{Deserialize, Serialize};

/// How a term (or the overall field group) combines with its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conjunction {
    /// All operands must match.
    And,
    /// Any operand can match.
    #[default]
    Or,
}

impl Conjunction {
    /// Solr operator keyword for this conjunction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

/// One search term with its conjunction and negation annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTerm {
    /// The term text as entered by the caller.
    pub value: String,

    /// How this term combines with the preceding term.
    #[serde(default)]
    pub conjunction: Conjunction,

    /// Whether this term is negated (`NOT term`).
    #[serde(default)]
    pub negated: bool,
}

impl QueryTerm {
    /// Creates a plain (non-negated, OR-joined) term.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            conjunction: Conjunction::default(),
            negated: false,
        }
    }

    /// Builder: set the conjunction.
    pub fn with_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = conjunction;
        self
    }

    /// Builder: mark the term as negated.
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }
}

/// An ordered sequence of query terms plus the interfield operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermList {
    /// The terms in caller order.
    pub terms: Vec<QueryTerm>,

    /// Operator joining the per-field expressions.
    #[serde(default)]
    pub interfield: Conjunction,
}

impl TermList {
    /// Creates a term list with the default (OR) interfield operator.
    pub fn new(terms: Vec<QueryTerm>) -> Self {
        Self {
            terms,
            interfield: Conjunction::default(),
        }
    }

    /// Returns `true` when the list holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Rewrites this list for use inside a join sub-query, returning a
    /// new list plus whether any negation occurred.
    ///
    /// Two rules apply, both because the sub-query correlates *child*
    /// documents while the caller filters *parent* documents:
    ///
    /// - Negated terms are removed entirely. Negating inside the join
    ///   would exclude parents whose other children lack the term, which
    ///   is not what the user asked for. The returned flag lets the
    ///   caller suppress the whole join instead (see
    ///   [`NegationPolicy`](crate::NegationPolicy)).
    /// - Every `AND` (term-level and interfield) becomes `OR`: requiring
    ///   all terms to hit within a single joined sub-document would
    ///   silently drop cross-page matches.
    ///
    /// The pass is idempotent: rewriting an already-rewritten list is a
    /// no-op.
    pub fn rewrite_for_join(&self) -> (TermList, bool) {
        let negation_occurred = self.terms.iter().any(|t| t.negated);

        let terms = self
            .terms
            .iter()
            .filter(|t| !t.negated)
            .map(|t| QueryTerm {
                value: t.value.clone(),
                conjunction: Conjunction::Or,
                negated: false,
            })
            .collect();

        (
            TermList {
                terms,
                interfield: Conjunction::Or,
            },
            negation_occurred,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_drops_negated_terms() {
        let list = TermList::new(vec![
            QueryTerm::new("keep"),
            QueryTerm::new("drop").negated(),
        ]);
        let (rewritten, negated) = list.rewrite_for_join();
        assert!(negated);
        assert_eq!(rewritten.terms.len(), 1);
        assert_eq!(rewritten.terms[0].value, "keep");
    }

    #[test]
    fn test_rewrite_replaces_and_with_or() {
        let mut list = TermList::new(vec![
            QueryTerm::new("a"),
            QueryTerm::new("b").with_conjunction(Conjunction::And),
        ]);
        list.interfield = Conjunction::And;

        let (rewritten, negated) = list.rewrite_for_join();
        assert!(!negated);
        assert!(rewritten.terms.iter().all(|t| t.conjunction == Conjunction::Or));
        assert_eq!(rewritten.interfield, Conjunction::Or);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let list = TermList::new(vec![
            QueryTerm::new("a").with_conjunction(Conjunction::And),
            QueryTerm::new("b").negated(),
        ]);
        let (once, _) = list.rewrite_for_join();
        let (twice, negated_again) = once.rewrite_for_join();
        assert_eq!(once, twice);
        assert!(!negated_again, "second pass sees no negated terms");
    }

    #[test]
    fn test_rewrite_does_not_mutate_input() {
        let list = TermList::new(vec![QueryTerm::new("x").negated()]);
        let _ = list.rewrite_for_join();
        assert!(list.terms[0].negated, "input list is left untouched");
    }

    #[test]
    fn test_all_terms_negated_leaves_empty_list() {
        let list = TermList::new(vec![
            QueryTerm::new("a").negated(),
            QueryTerm::new("b").negated(),
        ]);
        let (rewritten, negated) = list.rewrite_for_join();
        assert!(negated);
        assert!(rewritten.is_empty());
    }

    #[test]
    fn test_serde_defaults() {
        let term: QueryTerm = serde_json::from_str(r#"{"value": "hello"}"#).unwrap();
        assert_eq!(term.conjunction, Conjunction::Or);
        assert!(!term.negated);
    }
}
