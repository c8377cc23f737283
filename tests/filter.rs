mod common;

use common::{
    DemoWorkspace,
    CHR3_ACCESSION,
    KLF6_ACCESSION,
};
use gtfannot::prelude::*;

#[test]
fn annotate_then_filter() -> anyhow::Result<()> {
    let workspace = DemoWorkspace::new()?;
    workspace.write_query(&[
        ("SP1_1", KLF6_ACCESSION, 22000, 22100),
        ("SP1_2", CHR3_ACCESSION, 550, 650),
        ("SP1_3", KLF6_ACCESSION, 1100, 1150),
    ])?;

    let table = GtfReader::default().load(find_gtf_in_dir(workspace.annotation_dir())?)?;
    let context = AnnotationContext::new(table, ExclusionMap::default());
    let query = QueryTable::from_path(workspace.raw_csv())?;
    let (results, _) = Annotator::new(context).run(&query)?;
    query.write_annotated(workspace.processed_csv(), &results)?;

    let gene_list = workspace.path().join("exclusion_list.txt");
    std::fs::write(&gene_list, "ANT2\nGENE3\n")?;
    let filtered = workspace.path().join("results").join("filtered.csv");
    let summary = filter_annotated(workspace.processed_csv(), &gene_list, &filtered)?;

    assert_eq!(summary, FilterSummary {
        rows_in:  3,
        rows_out: 2,
    });

    let mut reader = csv::Reader::from_path(&filtered)?;
    let gene_idx = reader
        .headers()?
        .iter()
        .position(|h| h == "gene")
        .unwrap();
    let genes = reader
        .records()
        .map(|r| r.map(|r| r[gene_idx].to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(genes, vec!["ANT1", "KLF6"]);
    Ok(())
}

#[test]
fn filter_requires_inputs() -> anyhow::Result<()> {
    let workspace = DemoWorkspace::new()?;
    let err = filter_annotated(
        workspace.processed_csv(),
        workspace.path().join("exclusion_list.txt"),
        workspace.path().join("filtered.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, AnnotError::MissingResource { .. }));
    Ok(())
}
