use std::fs::File;
use std::io::{
    Read,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use csv::{
    ReaderBuilder,
    StringRecord,
    WriterBuilder,
};
use log::info;

use crate::data_structs::transcript::AnnotationResult;
use crate::data_structs::typedef::{
    ChromType,
    PosType,
};
use crate::error::{
    AnnotError,
    Result,
    RowAnnotationError,
};

pub const SEQID_COL: &str = "seqid";
pub const SSEQID_COL: &str = "sseqid";
pub const SSTART_COL: &str = "sstart";
pub const SEND_COL: &str = "send";

pub const GENE_COL: &str = "gene";
pub const PRIMARY_T_NAME_COL: &str = "primary_t_name";
pub const PRIMARY_T_TYPE_COL: &str = "primary_t_type";
pub const TRANSCRIPT_INFO_COL: &str = "transcript_info";
pub const OUTPUT_COLUMNS: [&str; 4] = [
    GENE_COL,
    PRIMARY_T_NAME_COL,
    PRIMARY_T_TYPE_COL,
    TRANSCRIPT_INFO_COL,
];

const ACCESSION_FIELD: usize = 3;
const REFSEQ_CHROMOSOME_PREFIX: &str = "NC_";

/// Coordinates and originating gene of one alignment hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInterval {
    pub chromosome: ChromType,
    pub start:      PosType,
    pub end:        PosType,
    pub gene:       String,
}

impl QueryInterval {
    pub fn from_fields(
        row: usize,
        seqid: &str,
        sseqid: &str,
        sstart: &str,
        send: &str,
    ) -> std::result::Result<Self, RowAnnotationError> {
        let chromosome = parse_accession_chromosome(row, sseqid)?;
        let sstart = parse_coordinate(row, sstart)?;
        let send = parse_coordinate(row, send)?;

        Ok(Self {
            chromosome,
            start: sstart.min(send),
            end: sstart.max(send),
            gene: query_gene(seqid).to_string(),
        })
    }
}

/// Gene a query sequence was derived from: `KLF6_3` -> `KLF6`.
pub fn query_gene(seqid: &str) -> &str {
    seqid.split('_').next().unwrap_or(seqid)
}

/// Chromosome number from a pipe-delimited subject id such as
/// `gi|568815588|ref|NC_000010.11|`.
pub fn parse_accession_chromosome(
    row: usize,
    sseqid: &str,
) -> std::result::Result<ChromType, RowAnnotationError> {
    let accession = sseqid
        .split('|')
        .nth(ACCESSION_FIELD)
        .map(str::trim)
        .and_then(|acc| acc.strip_prefix(REFSEQ_CHROMOSOME_PREFIX))
        .ok_or_else(|| {
            RowAnnotationError::BadAccession {
                row,
                value: sseqid.to_string(),
            }
        })?;

    let number = accession
        .split('.')
        .next()
        .unwrap_or_default()
        .trim_start_matches('0');
    number
        .parse::<ChromType>()
        .ok()
        .filter(|chr| *chr > 0)
        .ok_or_else(|| {
            RowAnnotationError::BadChromosome {
                row,
                value: accession.to_string(),
            }
        })
}

fn parse_coordinate(
    row: usize,
    value: &str,
) -> std::result::Result<PosType, RowAnnotationError> {
    value.trim().parse::<PosType>().map_err(|_| {
        RowAnnotationError::BadCoordinate {
            row,
            value: value.to_string(),
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryColumns {
    seqid:  usize,
    sseqid: usize,
    sstart: usize,
    send:   usize,
}

impl QueryColumns {
    fn from_headers(
        headers: &StringRecord,
        source: &Path,
    ) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| {
                    AnnotError::MissingColumn {
                        path:   source.to_path_buf(),
                        column: column.to_string(),
                    }
                })
        };
        Ok(Self {
            seqid:  find(SEQID_COL)?,
            sseqid: find(SSEQID_COL)?,
            sstart: find(SSTART_COL)?,
            send:   find(SEND_COL)?,
        })
    }
}

/// Alignment-hit table, kept as raw CSV records so every input column is
/// carried through to the output unchanged.
#[derive(Debug, Clone)]
pub struct QueryTable {
    source:  PathBuf,
    headers: StringRecord,
    rows:    Vec<StringRecord>,
    columns: QueryColumns,
}

impl QueryTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AnnotError::missing(path));
        }
        let table = Self::from_reader(File::open(path)?, path)?;
        info!("Read {} query rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        source: &Path,
    ) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let columns = QueryColumns::from_headers(&headers, source)?;
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_path_buf(),
            headers,
            rows,
            columns,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Query interval of row `idx` (0-based, header excluded).
    pub fn interval(
        &self,
        idx: usize,
    ) -> std::result::Result<QueryInterval, RowAnnotationError> {
        let row = self.rows.get(idx).ok_or(RowAnnotationError::MissingField {
            row:   idx,
            field: SEQID_COL,
        })?;
        let field = |col: usize, name: &'static str| {
            row.get(col)
                .ok_or(RowAnnotationError::MissingField { row: idx, field: name })
        };

        QueryInterval::from_fields(
            idx,
            field(self.columns.seqid, SEQID_COL)?,
            field(self.columns.sseqid, SSEQID_COL)?,
            field(self.columns.sstart, SSTART_COL)?,
            field(self.columns.send, SEND_COL)?,
        )
    }

    /// Writes the input rows extended with the annotation columns. Rows
    /// without a resolved gene are omitted. Returns the number of rows
    /// written.
    pub fn write_annotated<P: AsRef<Path>>(
        &self,
        path: P,
        results: &[AnnotationResult],
    ) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let written = self.write_annotated_to(File::create(path)?, results)?;
        info!("Wrote {} annotated rows to {}", written, path.display());
        Ok(written)
    }

    pub fn write_annotated_to<W: Write>(
        &self,
        sink: W,
        results: &[AnnotationResult],
    ) -> Result<usize> {
        debug_assert_eq!(
            self.rows.len(),
            results.len(),
            "one annotation result per query row"
        );
        let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);

        let mut header = self.headers.clone();
        header.extend(OUTPUT_COLUMNS);
        writer.write_record(&header)?;

        let mut written = 0;
        for (row, result) in self.rows.iter().zip(results.iter()) {
            let Some(genes) = result.genes.as_deref() else {
                continue;
            };
            let transcript_info = result.transcript_info_json()?;

            let mut record = row.clone();
            record.push_field(genes);
            record.push_field(result.primary_t_name.as_deref().unwrap_or_default());
            record.push_field(result.primary_t_type.as_deref().unwrap_or_default());
            record.push_field(transcript_info.as_deref().unwrap_or_default());
            writer.write_record(&record)?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}
