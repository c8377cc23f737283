//! Per query gene sets of gene names that must not be reported.
//!
//! An [`ExclusionSpec`] holds what is known about one query gene: whether it
//! suppresses itself and which interaction partners it suppresses.
//! [`ExclusionMap::resolve`] turns those into one [`ExclusionSet`] per gene.
//! The map is built once before annotation and only read afterwards.

use hashbrown::{
    HashMap,
    HashSet,
};
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{
    Deserialize,
    Serialize,
};

static EMPTY_SET: Lazy<ExclusionSet> = Lazy::new(ExclusionSet::default);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    genes: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(
        &self,
        gene_name: &str,
    ) -> bool {
        self.genes.contains(gene_name)
    }

    pub fn insert<S: Into<String>>(
        &mut self,
        gene_name: S,
    ) -> bool {
        self.genes.insert(gene_name.into())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gene names in sorted order.
    pub fn sorted(&self) -> Vec<&str> {
        self.genes
            .iter()
            .map(String::as_str)
            .sorted()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            genes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Exclusion input for one query gene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSpec {
    pub exclude_self: bool,
    pub partners:     Vec<String>,
}

impl ExclusionSpec {
    pub fn new(
        exclude_self: bool,
        partners: Vec<String>,
    ) -> Self {
        Self {
            exclude_self,
            partners,
        }
    }

    /// Partner list plus `gene` itself when self-exclusion is requested.
    pub fn resolve(
        &self,
        gene: &str,
    ) -> ExclusionSet {
        let mut set = self
            .partners
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<ExclusionSet>();
        if self.exclude_self {
            set.insert(gene);
        }
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionMap {
    inner: HashMap<String, ExclusionSet>,
}

impl ExclusionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = (S, ExclusionSpec)>,
        S: Into<String>, {
        let inner = specs
            .into_iter()
            .map(|(gene, spec)| {
                let gene = gene.into();
                let set = spec.resolve(&gene);
                (gene, set)
            })
            .collect();
        Self { inner }
    }

    pub fn insert<S: Into<String>>(
        &mut self,
        gene: S,
        set: ExclusionSet,
    ) -> Option<ExclusionSet> {
        self.inner.insert(gene.into(), set)
    }

    /// Exclusion set for `gene`; genes without an entry filter nothing.
    pub fn get(
        &self,
        gene: &str,
    ) -> &ExclusionSet {
        self.inner.get(gene).unwrap_or(&EMPTY_SET)
    }

    pub fn contains_gene(
        &self,
        gene: &str,
    ) -> bool {
        self.inner.contains_key(gene)
    }

    pub fn genes(&self) -> Vec<&str> {
        self.inner
            .keys()
            .map(String::as_str)
            .sorted()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
