//! Genomic coordinate indexing.
//!
//! [`ChromIntervalMap`] keeps one `rust_lapper::Lapper` per numeric
//! chromosome and answers open-interval overlap queries.

mod interval_map;

pub use interval_map::ChromIntervalMap;
