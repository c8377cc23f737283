use std::fs::File;
use std::io::{
    Read,
    Write,
};
use std::path::Path;

use csv::{
    ReaderBuilder,
    WriterBuilder,
};
use hashbrown::HashSet;
use itertools::Itertools;
use log::info;

use crate::error::{
    AnnotError,
    Result,
};
use crate::io::exclusion::read_exclusion_list;
use crate::io::query::GENE_COL;

/// Placeholder written by failed lookups in older annotated tables.
const ERROR_GENE: &str = "error";
const OUTPUT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub rows_in:  usize,
    pub rows_out: usize,
}

/// Surviving genes of one `gene` cell, `None` if nothing is left.
pub fn filter_gene_list(
    genes: &str,
    excluded: &HashSet<String>,
) -> Option<String> {
    let kept = genes
        .split(',')
        .map(str::trim)
        .filter(|gene| !gene.is_empty())
        .filter(|gene| !gene.eq_ignore_ascii_case(ERROR_GENE))
        .filter(|gene| !excluded.contains(*gene))
        .collect_vec();

    if kept.is_empty() {
        None
    }
    else {
        Some(kept.join(OUTPUT_SEPARATOR))
    }
}

/// Removes globally excluded genes from the `gene` column of an annotated
/// table. Rows left without genes are dropped.
pub fn filter_annotated<P1, P2, P3>(
    input: P1,
    gene_list: P2,
    output: P3,
) -> Result<FilterSummary>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>, {
    let (input, gene_list, output) =
        (input.as_ref(), gene_list.as_ref(), output.as_ref());
    for path in [input, gene_list] {
        if !path.is_file() {
            return Err(AnnotError::missing(path));
        }
    }

    let excluded = read_exclusion_list(gene_list)?
        .into_iter()
        .collect::<HashSet<_>>();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let summary = filter_annotated_with(
        File::open(input)?,
        File::create(output)?,
        &excluded,
        input,
    )?;
    info!(
        "Kept {} of {} rows after removing {} excluded genes, written to {}",
        summary.rows_out,
        summary.rows_in,
        excluded.len(),
        output.display()
    );
    Ok(summary)
}

pub fn filter_annotated_with<R: Read, W: Write>(
    source: R,
    sink: W,
    excluded: &HashSet<String>,
    source_path: &Path,
) -> Result<FilterSummary> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    let gene_idx = headers
        .iter()
        .position(|h| h.trim() == GENE_COL)
        .ok_or_else(|| {
            AnnotError::MissingColumn {
                path:   source_path.to_path_buf(),
                column: GENE_COL.to_string(),
            }
        })?;

    let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);
    writer.write_record(&headers)?;

    let mut summary = FilterSummary::default();
    for record in reader.records() {
        let record = record?;
        summary.rows_in += 1;

        let Some(genes) = record
            .get(gene_idx)
            .and_then(|genes| filter_gene_list(genes, excluded))
        else {
            continue;
        };

        let row = record
            .iter()
            .enumerate()
            .map(|(idx, field)| if idx == gene_idx { genes.as_str() } else { field })
            .collect_vec();
        writer.write_record(&row)?;
        summary.rows_out += 1;
    }
    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn excluded() -> HashSet<String> {
        ["SP1", "EP300"].into_iter().map(String::from).collect()
    }

    #[rstest]
    #[case::untouched("KLF6", Some("KLF6"))]
    #[case::rejoined("KLF6,TP53", Some("KLF6, TP53"))]
    #[case::partial("SP1, KLF6 ,EP300", Some("KLF6"))]
    #[case::error_marker("Error,KLF6", Some("KLF6"))]
    #[case::all_excluded("SP1,error", None)]
    #[case::blank("", None)]
    fn test_filter_gene_list(
        #[case] genes: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(filter_gene_list(genes, &excluded()).as_deref(), expected);
    }

    #[test]
    fn test_filter_table() {
        let input = "\
seqid,gene,evalue
KLF6_1,\"KLF6,SP1\",1e-5
KLF6_2,SP1,1e-5
KLF6_3,,1e-5
KLF6_4,\"TP53,KLF6\",1e-3
";
        let mut out = Vec::new();
        let summary =
            filter_annotated_with(input.as_bytes(), &mut out, &excluded(), Path::new("in.csv"))
                .unwrap();

        assert_eq!(summary, FilterSummary { rows_in: 4, rows_out: 2 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "seqid,gene,evalue\nKLF6_1,KLF6,1e-5\nKLF6_4,\"TP53, KLF6\",1e-3\n"
        );
    }

    #[test]
    fn test_missing_gene_column() {
        let err = filter_annotated_with(
            "seqid,evalue\nA_1,1\n".as_bytes(),
            Vec::new(),
            &excluded(),
            Path::new("in.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, AnnotError::MissingColumn { .. }));
    }

    #[test]
    fn test_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("processed.csv");
        std::fs::write(&input, "gene\nKLF6\n").unwrap();

        let err = filter_annotated(&input, dir.path().join("none.txt"), dir.path().join("out.csv"))
            .unwrap_err();
        assert!(matches!(err, AnnotError::MissingResource { .. }));

        let list = dir.path().join("exclusion_list.txt");
        std::fs::write(&list, "SP1\n").unwrap();
        let summary =
            filter_annotated(&input, &list, dir.path().join("out/filtered.csv")).unwrap();
        assert_eq!(summary.rows_out, 1);
        assert!(dir.path().join("out/filtered.csv").is_file());
    }
}
