//! Assembly of overlapping annotation records into an annotation result.
//!
//! [`assemble`] receives the records overlapping one query interval (in
//! table order) and that query's [`ExclusionSet`], and produces an
//! [`AnnotationResult`]:
//!
//! - only `gene` records overlap: the hit is intronic / non-transcribed,
//!   gene names are reported and transcript fields stay absent;
//! - otherwise gene records are ignored and every transcript, exon, CDS and
//!   UTR record of a non-excluded gene contributes its gene name, its
//!   canonical transcript (if tagged) and its region entries.

use arcstr::ArcStr;
use indexmap::{
    IndexMap,
    IndexSet,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::annotation::AnnotationRecord;
use crate::data_structs::enums::{
    FeatureType,
    Strand,
};
use crate::data_structs::exclusion::ExclusionSet;

pub const GENE_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub exon_number: u32,
    pub exon_id:     Option<ArcStr>,
}

/// Structure of one matched transcript within the query interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptInfo {
    pub transcript_id:   Option<ArcStr>,
    pub transcript_type: Option<ArcStr>,
    pub strand:          Strand,
    pub regions:         IndexMap<FeatureType, Vec<RegionEntry>>,
}

impl TranscriptInfo {
    fn from_record(record: &AnnotationRecord) -> Self {
        Self {
            transcript_id:   record.transcript_id.clone(),
            transcript_type: record.transcript_type.clone(),
            strand:          record.strand,
            regions:         IndexMap::new(),
        }
    }

    pub fn region(
        &self,
        feature_type: FeatureType,
    ) -> &[RegionEntry] {
        self.regions
            .get(&feature_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Matched transcripts keyed by transcript name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptMap {
    inner: IndexMap<ArcStr, TranscriptInfo>,
}

impl TranscriptMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        transcript_name: &str,
    ) -> Option<&TranscriptInfo> {
        self.inner.get(transcript_name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.inner.keys().map(ArcStr::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(
        &self
    ) -> indexmap::map::Iter<'_, ArcStr, TranscriptInfo> {
        self.inner.iter()
    }

    /// Nested JSON text used for the `transcript_info` output column.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    fn add_record(
        &mut self,
        key: &ArcStr,
        record: &AnnotationRecord,
    ) {
        let info = self
            .inner
            .entry(key.clone())
            .or_insert_with(|| TranscriptInfo::from_record(record));

        if let Some(exon_number) = record.exon_number {
            info.regions
                .entry(record.feature_type)
                .or_default()
                .push(RegionEntry {
                    exon_number,
                    exon_id: record.exon_id.clone(),
                });
        }
    }
}

/// Annotation of a single query row. All fields absent means the row
/// resolved to no gene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub genes:           Option<String>,
    pub primary_t_name:  Option<ArcStr>,
    pub primary_t_type:  Option<ArcStr>,
    pub transcript_info: Option<TranscriptMap>,
}

impl AnnotationResult {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_annotated(&self) -> bool {
        self.genes.is_some()
    }

    pub fn gene_names(&self) -> Vec<&str> {
        self.genes
            .as_deref()
            .map(|g| g.split(GENE_SEPARATOR).collect())
            .unwrap_or_default()
    }

    pub fn transcript_info_json(&self) -> serde_json::Result<Option<String>> {
        self.transcript_info
            .as_ref()
            .map(TranscriptMap::to_json)
            .transpose()
    }
}

fn is_excluded(
    record: &AnnotationRecord,
    exclusion: &ExclusionSet,
) -> bool {
    record
        .gene_name
        .as_ref()
        .is_some_and(|name| exclusion.contains(name))
}

fn join_genes(genes: IndexSet<&str>) -> Option<String> {
    if genes.is_empty() {
        None
    }
    else {
        Some(genes.into_iter().join(GENE_SEPARATOR))
    }
}

/// Builds the annotation result for the records overlapping one query.
pub fn assemble(
    hits: &[&AnnotationRecord],
    exclusion: &ExclusionSet,
) -> AnnotationResult {
    if hits.is_empty() {
        return AnnotationResult::absent();
    }

    let mut genes: IndexSet<&str> = IndexSet::new();

    if hits.iter().all(|r| r.feature_type.is_gene()) {
        for record in hits.iter().filter(|r| !is_excluded(r, exclusion)) {
            if let Some(name) = record.gene_name.as_deref() {
                genes.insert(name);
            }
        }
        return AnnotationResult {
            genes: join_genes(genes),
            ..Default::default()
        };
    }

    let mut primary: Option<&AnnotationRecord> = None;
    let mut transcripts = TranscriptMap::new();

    for record in hits
        .iter()
        .filter(|r| !r.feature_type.is_gene())
        .filter(|r| !is_excluded(r, exclusion))
    {
        if let Some(name) = record.gene_name.as_deref() {
            genes.insert(name);
        }
        if record.is_canonical {
            primary = Some(*record);
        }
        if let Some(key) = record.transcript_key() {
            transcripts.add_record(key, record);
        }
    }

    AnnotationResult {
        genes:           join_genes(genes),
        primary_t_name:  primary.and_then(|r| r.transcript_name.clone()),
        primary_t_type:  primary.and_then(|r| r.transcript_type.clone()),
        transcript_info: Some(transcripts).filter(|t| !t.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::data_structs::annotation::{
        AnnotationTable,
        GtfAttributes,
        DEFAULT_CANONICAL_TAG,
    };

    struct Feature {
        feature_type: FeatureType,
        start:        u32,
        end:          u32,
        gene:         &'static str,
        transcript:   Option<(&'static str, &'static str)>,
        exon:         Option<(u32, &'static str)>,
        canonical:    bool,
    }

    fn make_record(f: Feature) -> AnnotationRecord {
        let mut attributes = GtfAttributes {
            gene_id: Some(format!("ID_{}", f.gene).into()),
            gene_name: Some(f.gene.into()),
            gene_biotype: Some("protein_coding".into()),
            ..Default::default()
        };
        if let Some((name, ttype)) = f.transcript {
            attributes.transcript_id = Some(format!("ID_{}", name).into());
            attributes.transcript_name = Some(name.into());
            attributes.transcript_biotype = Some(ttype.into());
        }
        if let Some((number, id)) = f.exon {
            attributes.exon_number = Some(number);
            attributes.exon_id = Some(id.into());
        }
        if f.canonical {
            attributes.tags.push(DEFAULT_CANONICAL_TAG.to_string());
        }
        AnnotationRecord::new(
            10,
            f.feature_type,
            f.start,
            f.end,
            Strand::Forward,
            attributes,
            DEFAULT_CANONICAL_TAG,
        )
    }

    fn gene(
        name: &'static str,
        start: u32,
        end: u32,
    ) -> AnnotationRecord {
        make_record(Feature {
            feature_type: FeatureType::Gene,
            start,
            end,
            gene: name,
            transcript: None,
            exon: None,
            canonical: false,
        })
    }

    fn transcript_feature(
        feature_type: FeatureType,
        gene: &'static str,
        transcript: &'static str,
        span: (u32, u32),
        exon: Option<(u32, &'static str)>,
        canonical: bool,
    ) -> AnnotationRecord {
        make_record(Feature {
            feature_type,
            start: span.0,
            end: span.1,
            gene,
            transcript: Some((transcript, "protein_coding")),
            exon,
            canonical,
        })
    }

    /// Two overlapping genes; G1 has a canonical and a secondary transcript,
    /// G2 has a single canonical transcript.
    #[fixture]
    fn table() -> AnnotationTable {
        use FeatureType::*;
        AnnotationTable::from_iter(vec![
            gene("G1", 1000, 5000),
            transcript_feature(Transcript, "G1", "G1-201", (1000, 5000), None, true),
            transcript_feature(Exon, "G1", "G1-201", (1000, 1200), Some((1, "E1")), true),
            transcript_feature(Cds, "G1", "G1-201", (1100, 1200), Some((1, "E1")), true),
            transcript_feature(Exon, "G1", "G1-201", (3000, 3200), Some((2, "E2")), true),
            transcript_feature(Transcript, "G1", "G1-202", (1000, 1500), None, false),
            transcript_feature(Exon, "G1", "G1-202", (1000, 1500), Some((1, "E3")), false),
            gene("G2", 1100, 1400),
            transcript_feature(Transcript, "G2", "G2-201", (1100, 1400), None, true),
            transcript_feature(Exon, "G2", "G2-201", (1100, 1400), Some((1, "E4")), true),
        ])
    }

    fn run(
        table: &AnnotationTable,
        start: u32,
        end: u32,
        exclusion: &ExclusionSet,
    ) -> AnnotationResult {
        assemble(&table.search(10, start, end), exclusion)
    }

    #[rstest]
    fn test_exonic_hit(table: AnnotationTable) {
        let result = run(&table, 1150, 1180, &ExclusionSet::new());

        assert_eq!(result.genes.as_deref(), Some("G1,G2"));
        let info = result.transcript_info.unwrap();
        assert_eq!(info.names(), vec!["G1-201", "G1-202", "G2-201"]);

        let g1 = info.get("G1-201").unwrap();
        assert_eq!(g1.transcript_id.as_deref(), Some("ID_G1-201"));
        assert_eq!(g1.region(FeatureType::Exon), &[RegionEntry {
            exon_number: 1,
            exon_id:     Some("E1".into()),
        }]);
        assert_eq!(g1.region(FeatureType::Cds).len(), 1);
        assert!(g1.region(FeatureType::Utr).is_empty());
    }

    #[rstest]
    fn test_exclusion_removes_gene_and_primary(table: AnnotationTable) {
        let exclusion = ExclusionSet::from_iter(["G2"]);
        let result = run(&table, 1150, 1180, &exclusion);

        assert_eq!(result.gene_names(), vec!["G1"]);
        assert_eq!(result.primary_t_name.as_deref(), Some("G1-201"));
        let info = result.transcript_info.unwrap();
        assert!(info.get("G2-201").is_none());
    }

    #[rstest]
    fn test_exclusion_of_canonical_source(table: AnnotationTable) {
        // G2-201 sorts after G1-201 and would be the last canonical row
        let without = run(&table, 1150, 1180, &ExclusionSet::new());
        assert_eq!(without.primary_t_name.as_deref(), Some("G2-201"));

        let exclusion = ExclusionSet::from_iter(["G1"]);
        let result = run(&table, 1150, 1180, &exclusion);
        assert_eq!(result.genes.as_deref(), Some("G2"));
        assert_eq!(result.primary_t_name.as_deref(), Some("G2-201"));
    }

    #[rstest]
    fn test_all_excluded(table: AnnotationTable) {
        let exclusion = ExclusionSet::from_iter(["G1", "G2"]);
        let result = run(&table, 1150, 1180, &exclusion);
        assert_eq!(result, AnnotationResult::absent());
        assert!(!result.is_annotated());
    }

    #[test]
    fn test_intronic_hit() {
        let table = AnnotationTable::from_iter(vec![
            gene("G1", 1000, 5000),
            gene("G3", 2000, 2600),
            gene("G1", 1000, 5000),
        ]);
        let result = assemble(&table.search(10, 2100, 2200), &ExclusionSet::new());

        assert_eq!(result.genes.as_deref(), Some("G1,G3"));
        assert_eq!(result.primary_t_name, None);
        assert_eq!(result.primary_t_type, None);
        assert_eq!(result.transcript_info, None);

        let excluded = assemble(
            &table.search(10, 2100, 2200),
            &ExclusionSet::from_iter(["G3"]),
        );
        assert_eq!(excluded.genes.as_deref(), Some("G1"));
    }

    #[rstest]
    fn test_gene_rows_only_inside_transcript_gap(table: AnnotationTable) {
        // 2000..2100 is inside G1 but between G1-201 exons; the transcript
        // record still spans it, so the hit is transcribed.
        let result = run(&table, 2000, 2100, &ExclusionSet::new());
        assert_eq!(result.genes.as_deref(), Some("G1"));
        assert_eq!(result.primary_t_name.as_deref(), Some("G1-201"));
        let info = result.transcript_info.unwrap();
        assert_eq!(info.names(), vec!["G1-201"]);
        assert!(info.get("G1-201").unwrap().regions.is_empty());
    }

    #[test]
    fn test_canonical_selection_independent_of_input_order() {
        use FeatureType::*;
        let canonical =
            transcript_feature(Exon, "G1", "G1-201", (100, 200), Some((1, "E1")), true);
        let other =
            transcript_feature(Exon, "G1", "G1-202", (100, 200), Some((1, "E2")), false);

        for hits in [vec![&canonical, &other], vec![&other, &canonical]] {
            let result = assemble(&hits, &ExclusionSet::new());
            assert_eq!(result.primary_t_name.as_deref(), Some("G1-201"));
            assert_eq!(result.primary_t_type.as_deref(), Some("protein_coding"));
        }
    }

    #[test]
    fn test_no_canonical_declared() {
        let other = transcript_feature(
            FeatureType::Exon,
            "G1",
            "G1-202",
            (100, 200),
            Some((1, "E2")),
            false,
        );
        let result = assemble(&[&other], &ExclusionSet::new());
        assert_eq!(result.genes.as_deref(), Some("G1"));
        assert_eq!(result.primary_t_name, None);
        assert!(result.transcript_info.is_some());
    }

    #[test]
    fn test_empty_hits() {
        assert_eq!(
            assemble(&[], &ExclusionSet::new()),
            AnnotationResult::absent()
        );
    }

    #[rstest]
    fn test_transcript_info_json(table: AnnotationTable) {
        let result = run(&table, 1150, 1160, &ExclusionSet::from_iter(["G2"]));
        let json = result.transcript_info_json().unwrap().unwrap();

        assert!(json.starts_with(r#"{"G1-201":{"transcript_id":"ID_G1-201","transcript_type":"protein_coding","strand":"+","regions":{"exon":[{"exon_number":1,"exon_id":"E1"}],"CDS""#));
        let parsed = TranscriptMap::from_json(&json).unwrap();
        assert_eq!(Some(parsed), result.transcript_info);
    }
}
