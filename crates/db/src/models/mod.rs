//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and the
//! conversion into its core domain record.

pub mod promotion;
