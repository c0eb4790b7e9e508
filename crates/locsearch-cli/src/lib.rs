//! locsearch-cli
//! =============
//!
//! Command-line interface for the `locsearch-core` location search
//! engine.
//!
//! This crate primarily provides a binary (`locsearch`). We include a
//! small library target so that docs.rs renders a documentation page and
//! shows this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! locsearch --help
//! locsearch stats
//! locsearch search "buz"
//! locsearch suggest "buz"
//! ```
//!
//! For programmatic access to the search, suggestion, input and map
//! layers, use the [`locsearch-core`] crate directly.
//!
//! [`locsearch-core`]: https://docs.rs/locsearch-core

// This library target intentionally exposes no API; the binary is the
// primary deliverable.
