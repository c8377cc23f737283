//! # gtfannot
//!
//! `gtfannot` is a Rust library and command-line tool for annotating genomic
//! coordinate ranges, typically BLAST-style alignment hits against a
//! reference genome, with the genes and transcript structure that overlap
//! them in a GTF annotation.
//!
//! The annotation engine loads a GTF file once into an immutable, sorted
//! [`AnnotationTable`], resolves every overlapping record for a
//! `(chromosome, start, end)` interval through a per-chromosome interval
//! index, and assembles the hits into a per-transcript region map while
//! suppressing genes the caller has marked as uninteresting (e.g. known
//! protein-interaction partners of the query gene).
//!
//! If you do not want to use gtfannot as a crate, check out the `gtfannot`
//! CLI tool from the `console` workspace member.
//!
//! ## Key Features
//!
//! * **Typed GTF records**: attribute columns are tokenized into
//!   [`GtfAttributes`] with named optional fields, then converted into
//!   [`AnnotationRecord`]s.
//! * **Interval search**: records are indexed with `rust-lapper`, one index
//!   per chromosome ([`ChromIntervalMap`]).
//! * **Exclusion sets**: per query gene, built from partner lists and a
//!   self-exclude flag ([`ExclusionMap`]).
//! * **Parallel annotation**: rows are processed on a Rayon thread pool with
//!   a shared read-only [`AnnotationContext`]; per-row failures are isolated.
//!
//! Number of threads to be used can be configured with setting
//! `GTFANNOT_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: records, the annotation table, exclusion sets and
//!   transcript assembly.
//! * [`io`]: GTF loading, query/result CSV tables, exclusion list files and
//!   `params.txt` parsing.
//! * [`tools`]: the parallel annotation driver and the annotated-table
//!   filter.
//! * [`error`]: the error taxonomy.
//!
//! ## Usage
//!
//! ```no_run
//! use gtfannot::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = GtfReader::new(LoaderConfig::default()).load("annotation/genes.gtf")?;
//!     let exclusions = ExclusionMap::default();
//!     let context = AnnotationContext::new(table, exclusions);
//!
//!     let query = QueryTable::from_path("results/raw.csv")?;
//!     let (results, summary) = Annotator::new(context).run(&query)?;
//!     query.write_annotated("results/processed.csv", &results)?;
//!
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use crate::data_structs::annotation::{
    AnnotationRecord,
    AnnotationTable,
    GtfAttributes,
    RawGtfEntry,
};
pub use crate::data_structs::coords::ChromIntervalMap;
pub use crate::data_structs::exclusion::{
    ExclusionMap,
    ExclusionSet,
    ExclusionSpec,
};
pub use crate::data_structs::transcript::{
    AnnotationResult,
    RegionEntry,
    TranscriptInfo,
    TranscriptMap,
};
pub use crate::data_structs::{
    FeatureType,
    Strand,
};
pub use crate::error::{
    AnnotError,
    RowAnnotationError,
};
pub use crate::io::gtf::{
    GtfReader,
    LoaderConfig,
};
pub use crate::io::params::{
    Params,
    QueryParams,
};
pub use crate::io::query::{
    QueryInterval,
    QueryTable,
};
pub use crate::tools::annotate::{
    AnnotationContext,
    Annotator,
    RunSummary,
};
