use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand.
    None,
}

impl Strand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::None => ".",
        }
    }
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
        }
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Structural GTF feature types retained by the loader.
///
/// Anything else in the third GTF column (`start_codon`, `Selenocysteine`,
/// ...) fails to parse and the line is skipped.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum FeatureType {
    Gene,
    Transcript,
    Exon,
    Cds,
    Utr,
}

impl FeatureType {
    pub const ALL: [FeatureType; 5] = [
        FeatureType::Gene,
        FeatureType::Transcript,
        FeatureType::Exon,
        FeatureType::Cds,
        FeatureType::Utr,
    ];

    /// Name as written in the GTF feature column.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Gene => "gene",
            FeatureType::Transcript => "transcript",
            FeatureType::Exon => "exon",
            FeatureType::Cds => "CDS",
            FeatureType::Utr => "UTR",
        }
    }

    pub fn is_gene(&self) -> bool {
        matches!(self, FeatureType::Gene)
    }

    /// Exon, CDS and UTR features make up a transcript's region map.
    pub fn is_region(&self) -> bool {
        matches!(
            self,
            FeatureType::Exon | FeatureType::Cds | FeatureType::Utr
        )
    }
}

impl FromStr for FeatureType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(FeatureType::Gene),
            "transcript" => Ok(FeatureType::Transcript),
            "exon" => Ok(FeatureType::Exon),
            "CDS" => Ok(FeatureType::Cds),
            "UTR" => Ok(FeatureType::Utr),
            other => Err(anyhow!("Unsupported feature type '{}'", other)),
        }
    }
}

impl Display for FeatureType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FeatureType {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FeatureType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}
