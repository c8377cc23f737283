//! Error types for gtfannot.
//!
//! Fatal conditions ([`AnnotError::MalformedAnnotation`],
//! [`AnnotError::EmptyAnnotation`], [`AnnotError::MissingResource`]) abort a
//! run. [`RowAnnotationError`] is recoverable: the driver converts it into an
//! unresolved row and keeps going.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gtfannot operations
pub type Result<T> = std::result::Result<T, AnnotError>;

#[derive(Debug, Error)]
pub enum AnnotError {
    /// GTF line that cannot be interpreted at all.
    #[error("Malformed annotation {path} at line {line}: {reason}")]
    MalformedAnnotation {
        path:   PathBuf,
        line:   usize,
        reason: String,
    },

    /// GTF file that yields no usable record after filtering.
    #[error("Annotation {path} contains no usable records after filtering")]
    EmptyAnnotation { path: PathBuf },

    /// Required input file or directory is absent.
    #[error("Required resource not found: {path}")]
    MissingResource { path: PathBuf },

    /// Required column absent from a CSV header.
    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid parameters file at line {line}: {reason}")]
    Params { line: usize, reason: String },

    #[error(transparent)]
    RowAnnotation(#[from] RowAnnotationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl AnnotError {
    pub fn missing<P: Into<PathBuf>>(path: P) -> Self {
        AnnotError::MissingResource { path: path.into() }
    }

    /// Whether the error belongs to the annotation-file category.
    pub fn is_malformed_annotation(&self) -> bool {
        matches!(
            self,
            AnnotError::MalformedAnnotation { .. }
                | AnnotError::EmptyAnnotation { .. }
        )
    }
}

/// Failure local to a single query row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowAnnotationError {
    #[error("row {row}: field '{field}' is missing")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: subject accession '{value}' has no chromosome token")]
    BadAccession { row: usize, value: String },

    #[error("row {row}: chromosome token '{value}' is not a positive integer")]
    BadChromosome { row: usize, value: String },

    #[error("row {row}: coordinate '{value}' is not an integer")]
    BadCoordinate { row: usize, value: String },
}
