//! # glimt-core
//!
//! Shared foundation for the Glimt workspace:
//! - Error taxonomy for the fragment builder and the canvas mapper
//! - [`SkipReport`] for surfacing partially-skipped batch items
//!
//! Both Glimt transformations follow the same failure contract:
//! malformed caller input fails fast with [`Error::Config`], a single
//! bad row is skipped and recorded, and an empty result is an ordinary
//! `Ok` value rather than an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod report;

pub use error::{Error, Result};
pub use report::{SkipReport, SkippedItem};
