//! Batch operations built on top of the annotation engine.
//!
//! - [`annotate`]: the parallel annotation driver. It shares one read-only
//!   [`annotate::AnnotationContext`] between Rayon workers, annotates every
//!   query row independently and pairs the results back to input order.
//! - [`filter`]: post-processing of an annotated table against a global
//!   gene exclusion list.
pub mod annotate;
pub mod filter;
