use hashbrown::HashMap;
use itertools::Itertools;
use rust_lapper::{
    Interval,
    Lapper,
};
use serde::de::DeserializeOwned;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    ChromType,
    PosType,
};

/// Interval index partitioned by chromosome.
///
/// `find` reports every stored interval `[s, e]` with `s < end && e > start`,
/// so ranges touching the query at a single boundary point are not hits.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(bound = "V: Serialize + DeserializeOwned")]
pub struct ChromIntervalMap<V>
where
    V: Sync + Send + Eq + Clone, {
    inner: HashMap<ChromType, Lapper<PosType, V>>,
}

impl<V> Default for ChromIntervalMap<V>
where
    V: Sync + Send + Eq + Clone,
{
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<V> FromIterator<(ChromType, PosType, PosType, V)> for ChromIntervalMap<V>
where
    V: Sync + Send + Eq + Clone,
{
    fn from_iter<T: IntoIterator<Item = (ChromType, PosType, PosType, V)>>(
        iter: T
    ) -> Self {
        let multimap = iter
            .into_iter()
            .map(|(chr, start, end, v)| (chr, (start, end, v)))
            .into_group_map();

        let mut inner = HashMap::with_capacity(multimap.len());
        for (chr, entries) in multimap.into_iter() {
            let imap = Lapper::new(
                entries
                    .into_iter()
                    .map(|(start, end, v)| {
                        Interval {
                            start,
                            stop: end,
                            val: v,
                        }
                    })
                    .collect_vec(),
            );
            inner.insert(chr, imap);
        }

        Self { inner }
    }
}

impl<V> ChromIntervalMap<V>
where
    V: Sync + Send + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_intervals(&self) -> usize {
        self.inner.values().map(|v| v.len()).sum()
    }

    pub fn n_chr(&self) -> usize {
        self.inner.len()
    }

    pub fn chr_names(&self) -> Vec<ChromType> {
        self.inner.keys().copied().sorted().collect()
    }

    pub fn insert(
        &mut self,
        chr: ChromType,
        start: PosType,
        end: PosType,
        value: V,
    ) {
        let imap = self
            .inner
            .entry(chr)
            .or_insert_with(|| Lapper::new(vec![]));
        imap.insert(Interval {
            start,
            stop: end,
            val: value,
        });
    }

    /// Values of all intervals on `chr` overlapping `start..end`.
    pub fn find(
        &self,
        chr: ChromType,
        start: PosType,
        end: PosType,
    ) -> Vec<&V> {
        self.inner
            .get(&chr)
            .map(|imap| {
                imap.find(start, end)
                    .map(|e| &e.val)
                    .collect_vec()
            })
            .unwrap_or_default()
    }
}
