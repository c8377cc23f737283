use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use itertools::Itertools;
use log::{
    debug,
    info,
};

#[cfg(feature = "compression")]
use crate::io::compression::Compression;
use crate::data_structs::annotation::{
    AnnotationRecord,
    AnnotationTable,
    RawGtfEntry,
    DEFAULT_CANONICAL_TAG,
};
use crate::data_structs::FeatureType;
use crate::error::{
    AnnotError,
    Result,
};
use crate::{
    getter_fn,
    with_field_fn,
};

pub const PROTEIN_CODING: &str = "protein_coding";
const GTF_EXTENSIONS: [&str; 3] = [".gtf", ".gtf.gz", ".gtf.bgz"];

/// Which GTF lines survive loading.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Keep only records whose `gene_biotype` is `protein_coding`.
    pub protein_coding_only: bool,
    /// Tag value marking the canonical transcript.
    pub canonical_tag:       String,
    pub feature_types:       Vec<FeatureType>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            protein_coding_only: true,
            canonical_tag:       DEFAULT_CANONICAL_TAG.to_string(),
            feature_types:       FeatureType::ALL.to_vec(),
        }
    }
}

impl LoaderConfig {
    with_field_fn!(protein_coding_only, bool);

    with_field_fn!(canonical_tag, String);

    with_field_fn!(feature_types, Vec<FeatureType>);

    pub fn keeps(
        &self,
        record: &AnnotationRecord,
    ) -> bool {
        if !self.feature_types.contains(&record.feature_type) {
            return false;
        }
        !self.protein_coding_only
            || record.gene_type.as_deref() == Some(PROTEIN_CODING)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct LoadStats {
    lines:      usize,
    comments:   usize,
    unusable:   usize,
    filtered:   usize,
}

/// Annotation Loader: reads a GTF file into an [`AnnotationTable`].
#[derive(Debug, Clone, Default)]
pub struct GtfReader {
    config: LoaderConfig,
}

impl GtfReader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    getter_fn!(config, LoaderConfig);

    pub fn load<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<AnnotationTable> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AnnotError::missing(path));
        }
        let reader = open_annotation(path)?;
        info!("Reading annotation from {}", path.display());
        self.read(reader, path)
    }

    /// Parses GTF text from `reader`; `source` is only used in diagnostics.
    pub fn read<R: BufRead>(
        &self,
        mut reader: R,
        source: &Path,
    ) -> Result<AnnotationTable> {
        let mut stats = LoadStats::default();
        let mut records = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            stats.lines += 1;

            let trimmed = line.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() || trimmed.starts_with('#') {
                stats.comments += 1;
                continue;
            }

            let raw = RawGtfEntry::from_line(trimmed).map_err(|e| {
                AnnotError::MalformedAnnotation {
                    path:   source.to_path_buf(),
                    line:   stats.lines,
                    reason: e.to_string(),
                }
            })?;

            match AnnotationRecord::from_raw(&raw, &self.config.canonical_tag) {
                Ok(record) if self.config.keeps(&record) => records.push(record),
                Ok(_) => stats.filtered += 1,
                Err(e) => {
                    debug!("Skipping line {}: {}", stats.lines, e);
                    stats.unusable += 1;
                },
            }
        }

        if records.is_empty() {
            return Err(AnnotError::EmptyAnnotation {
                path: source.to_path_buf(),
            });
        }

        let table = AnnotationTable::new(records);
        info!(
            "Loaded {} records ({} genes, {} transcripts) on {} chromosomes; \
             skipped {} unusable and {} filtered lines out of {}",
            table.len(),
            table.n_genes(),
            table.n_transcripts(),
            table.chromosomes().len(),
            stats.unusable,
            stats.filtered,
            stats.lines - stats.comments,
        );
        Ok(table)
    }
}

fn open_annotation(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    #[cfg(feature = "compression")]
    {
        let compression = Compression::from_path(path);
        if compression != Compression::None {
            debug!("Decompressing {} as {}", path.display(), compression.name());
        }
        Ok(Box::new(BufReader::new(compression.get_decoder(file))))
    }
    #[cfg(not(feature = "compression"))]
    {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Resolves an annotation path: a file is returned as is, a directory yields
/// its first GTF file in name order.
pub fn find_gtf_in_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(AnnotError::missing(path));
    }

    std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| GTF_EXTENSIONS.iter().any(|ext| n.ends_with(ext)))
        })
        .sorted()
        .next()
        .ok_or_else(|| AnnotError::missing(path.join("*.gtf")))
}
