//! Core data structures of the annotation engine.
//!
//! - [`annotation`]: GTF records ([`AnnotationRecord`]), their attribute
//!   column ([`GtfAttributes`]) and the sorted, immutable
//!   [`AnnotationTable`] with its interval search.
//! - [`coords`]: the per-chromosome interval index [`ChromIntervalMap`].
//! - [`exclusion`]: per query gene sets of gene names to suppress.
//! - [`transcript`]: assembly of overlapping records into transcript region
//!   maps and the per-row [`AnnotationResult`].
//! - Common enumerations ([`Strand`], [`FeatureType`]) and [`typedef`]
//!   aliases for positions and chromosome numbers.
//!
//! [`AnnotationRecord`]: annotation::AnnotationRecord
//! [`GtfAttributes`]: annotation::GtfAttributes
//! [`AnnotationTable`]: annotation::AnnotationTable
//! [`ChromIntervalMap`]: coords::ChromIntervalMap
//! [`AnnotationResult`]: transcript::AnnotationResult

pub mod annotation;
pub mod coords;
mod enums;
pub mod exclusion;
pub mod transcript;
pub mod typedef;

pub use enums::{
    FeatureType,
    Strand,
};
