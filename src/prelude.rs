pub use crate::data_structs::annotation::{
    AnnotationRecord,
    AnnotationTable,
    GtfAttributes,
};
pub use crate::data_structs::coords::ChromIntervalMap;
pub use crate::data_structs::exclusion::{
    ExclusionMap,
    ExclusionSet,
    ExclusionSpec,
};
pub use crate::data_structs::transcript::{
    assemble,
    AnnotationResult,
    TranscriptInfo,
    TranscriptMap,
};
pub use crate::data_structs::typedef::{
    ChromType,
    PosType,
};
pub use crate::data_structs::{
    FeatureType,
    Strand,
};
pub use crate::error::{
    AnnotError,
    RowAnnotationError,
};
#[cfg(feature = "compression")]
pub use crate::io::compression::Compression;
pub use crate::io::exclusion::{
    discover_exclusion_genes,
    read_exclusion_list,
    read_exclusion_map,
};
pub use crate::io::gtf::{
    find_gtf_in_dir,
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
pub use crate::tools::filter::{
    filter_annotated,
    FilterSummary,
};
