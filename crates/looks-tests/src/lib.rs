//! Integration tests for looks-rs crates.
//!
//! End-to-end scenarios across the image model, filters, tools and the
//! gallery session.
