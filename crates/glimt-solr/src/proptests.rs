//! Property-based tests for the fragment builder.
