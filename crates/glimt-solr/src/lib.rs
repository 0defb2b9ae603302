//! # glimt-solr
//!
//! Builds Solr-flavored query fragments from a logical field list plus a
//! sequence of annotated query terms, suitable for embedding as a join
//! or filter sub-query.
//!
//! The builder is a pure transformation: structured records in, one
//! query string out. All configuration (field mappings, negation
//! policy, query mode) is supplied per call; there is no ambient state.
//!
//! # Usage
//!
//! ```rust
//! use glimt_solr::{
//!     build_fragment, Conjunction, FieldTable, FragmentRequest, QueryTerm, TermList,
//! };
//!
//! let mut table = FieldTable::new();
//! table.map_simple("fulltext", "tm_fulltext", Some(2.5));
//!
//! let request = FragmentRequest {
//!     fields: vec!["fulltext".to_string()],
//!     table,
//!     terms: TermList::new(vec![QueryTerm::new("lighthouse")]),
//!     ..Default::default()
//! };
//!
//! let fragment = build_fragment(&request).unwrap();
//! assert_eq!(fragment.query, "{!edismax qf='tm_fulltext^2.5'}lighthouse");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod escape;
pub mod fields;
pub mod fragment;
pub mod term;

mod proptests;

pub use escape::{escape_quoted, escape_term};
pub use fields::{FieldMapping, FieldTable, PhysicalField, ResolvedField};
pub use fragment::{
    build_fragment, wrap_join, Fragment, FragmentMode, FragmentRequest, NegationPolicy,
};
pub use term::{Conjunction, QueryTerm, TermList};

pub use glimt_core::{Error, Result, SkipReport};
