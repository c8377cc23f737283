//! File input and output.
//!
//! - [`gtf`]: the Annotation Loader, turning a GTF file into an
//!   [`AnnotationTable`](crate::data_structs::annotation::AnnotationTable).
//! - [`query`]: alignment-hit CSV tables and the annotated output table.
//! - [`exclusion`]: per-gene exclusion list files.
//! - [`params`]: the `params.txt` run configuration.
//! - [`compression`]: transparent decompression of gzipped inputs
//!   (feature-gated).

pub mod compression;
pub mod exclusion;
pub mod gtf;
pub mod params;
pub mod query;
