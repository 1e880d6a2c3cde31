//! Promotion domain core.
//!
//! Pure logic only: the record schema and its validator, the search filter
//! engine, the persistence interface and the operations the HTTP layer calls.
//! Nothing in this crate talks to a database or the network directly.

pub mod error;
pub mod filter;
pub mod promotion;
pub mod service;
pub mod store;
pub mod types;
