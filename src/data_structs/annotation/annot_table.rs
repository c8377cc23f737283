use arcstr::ArcStr;
use hashbrown::HashSet;
use itertools::Itertools;

use crate::data_structs::annotation::AnnotationRecord;
use crate::data_structs::coords::ChromIntervalMap;
use crate::data_structs::enums::FeatureType;
use crate::data_structs::typedef::{
    ChromType,
    PosType,
};

/// Immutable, sorted collection of annotation records.
///
/// Records are ordered by `(chromosome, start, end)`; ties keep the order in
/// which they were supplied. Each record is indexed by its position in that
/// order, so [`AnnotationTable::search`] returns hits in table order.
#[derive(Debug, Clone)]
pub struct AnnotationTable {
    records: Vec<AnnotationRecord>,
    index:   ChromIntervalMap<usize>,
}

impl AnnotationTable {
    pub fn new(mut records: Vec<AnnotationRecord>) -> Self {
        records.sort_by_key(AnnotationRecord::sort_key);
        let index = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.chromosome, r.start, r.end, idx))
            .collect();
        Self { records, index }
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationRecord> {
        self.records.iter()
    }

    /// All records on `chromosome` with `record.start < end` and
    /// `record.end > start`.
    pub fn search(
        &self,
        chromosome: ChromType,
        start: PosType,
        end: PosType,
    ) -> Vec<&AnnotationRecord> {
        self.index
            .find(chromosome, start, end)
            .into_iter()
            .copied()
            .sorted_unstable()
            .map(|idx| &self.records[idx])
            .collect()
    }

    pub fn chromosomes(&self) -> Vec<ChromType> {
        self.index.chr_names()
    }

    pub fn n_genes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.feature_type == FeatureType::Gene)
            .filter_map(|r| r.gene_id.as_ref())
            .collect::<HashSet<&ArcStr>>()
            .len()
    }

    pub fn n_transcripts(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.feature_type == FeatureType::Transcript)
            .filter_map(|r| r.transcript_id.as_ref())
            .collect::<HashSet<&ArcStr>>()
            .len()
    }
}

impl PartialEq for AnnotationTable {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.records == other.records
    }
}

impl FromIterator<AnnotationRecord> for AnnotationTable {
    fn from_iter<T: IntoIterator<Item = AnnotationRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnnotationTable {
    type IntoIter = std::slice::Iter<'a, AnnotationRecord>;
    type Item = &'a AnnotationRecord;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
