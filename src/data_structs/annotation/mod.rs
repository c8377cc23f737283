mod annot_table;
mod gtf_entry;

pub use annot_table::AnnotationTable;
pub use gtf_entry::{
    AnnotationRecord,
    GtfAttributes,
    RawGtfEntry,
    DEFAULT_CANONICAL_TAG,
    GTF_N_FIELDS,
};
