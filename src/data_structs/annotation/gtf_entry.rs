use std::fmt::{
    self,
    Write,
};
use std::str::FromStr;

use anyhow::{
    anyhow,
    bail,
};
use arcstr::ArcStr;
use hashbrown::HashMap;

use crate::data_structs::enums::{
    FeatureType,
    Strand,
};
use crate::data_structs::typedef::{
    ChromType,
    PosType,
};

pub const GTF_N_FIELDS: usize = 9;
pub const DEFAULT_CANONICAL_TAG: &str = "Ensembl_canonical";

/// Parsed GTF attribute column.
///
/// Keys may appear in any order and any subset; keys that are not present
/// stay `None`. Repeated `tag` keys are collected in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GtfAttributes {
    pub gene_id:            Option<ArcStr>,
    pub transcript_id:      Option<ArcStr>,
    pub exon_number:        Option<u32>,
    pub gene_name:          Option<ArcStr>,
    pub gene_biotype:       Option<ArcStr>,
    pub transcript_name:    Option<ArcStr>,
    pub transcript_biotype: Option<ArcStr>,
    pub exon_id:            Option<ArcStr>,
    pub tags:               Vec<String>,
    pub other:              HashMap<String, String>,
}

impl GtfAttributes {
    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Splits the attribute column on `;` outside of double quotes.
fn split_pairs(s: &str) -> impl Iterator<Item = &str> {
    let mut in_quotes = false;
    s.split(move |c: char| {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        c == ';' && !in_quotes
    })
    .map(str::trim)
    .filter(|pair| !pair.is_empty())
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl FromStr for GtfAttributes {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attributes = GtfAttributes::default();
        for pair in split_pairs(s) {
            let (key, value) = pair
                .split_once(char::is_whitespace)
                .ok_or(anyhow!("Attribute '{}' has no value", pair))?;
            let value = unquote(value);

            match key {
                "gene_id" => attributes.gene_id = Some(value.into()),
                "transcript_id" => {
                    attributes.transcript_id = Some(value.into())
                },
                "exon_number" => attributes.exon_number = value.parse().ok(),
                "gene_name" => attributes.gene_name = Some(value.into()),
                "gene_biotype" | "gene_type" => {
                    attributes.gene_biotype = Some(value.into())
                },
                "transcript_name" => {
                    attributes.transcript_name = Some(value.into())
                },
                "transcript_biotype" | "transcript_type" => {
                    attributes.transcript_biotype = Some(value.into())
                },
                "exon_id" => attributes.exon_id = Some(value.into()),
                "tag" => attributes.tags.push(value.to_string()),
                _ => {
                    attributes
                        .other
                        .insert(key.to_string(), value.to_string());
                },
            }
        }

        Ok(attributes)
    }
}

impl fmt::Display for GtfAttributes {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut serialized = String::with_capacity(128);

        macro_rules! write_attr {
            ($field:expr, $key:literal) => {
                if let Some(val) = $field.as_ref() {
                    if !serialized.is_empty() {
                        serialized.push(' ');
                    }
                    write!(serialized, "{} \"{}\";", $key, val)?;
                }
            };
        }

        write_attr!(self.gene_id, "gene_id");
        write_attr!(self.transcript_id, "transcript_id");
        write_attr!(self.exon_number, "exon_number");
        write_attr!(self.gene_name, "gene_name");
        write_attr!(self.gene_biotype, "gene_biotype");
        write_attr!(self.transcript_name, "transcript_name");
        write_attr!(self.transcript_biotype, "transcript_biotype");
        write_attr!(self.exon_id, "exon_id");
        for tag in self.tags.iter() {
            write_attr!(Some(tag), "tag");
        }

        let mut sorted_other: Vec<_> = self.other.iter().collect();
        sorted_other.sort_unstable_by_key(|(k, _)| *k);
        for (k, v) in sorted_other {
            if !serialized.is_empty() {
                serialized.push(' ');
            }
            write!(serialized, "{} \"{}\";", k, v)?;
        }

        write!(f, "{}", serialized)
    }
}

/// One GTF line split into its nine columns, borrowed from the line buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGtfEntry<'a> {
    pub seqid:        &'a str,
    pub source:       &'a str,
    pub feature_type: &'a str,
    pub start:        &'a str,
    pub end:          &'a str,
    pub score:        &'a str,
    pub strand:       &'a str,
    pub phase:        &'a str,
    pub attributes:   &'a str,
}

impl<'a> RawGtfEntry<'a> {
    /// Fails only when the line has fewer than nine tab-separated fields.
    pub fn from_line(line: &'a str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line
            .trim_end_matches(['\n', '\r'])
            .splitn(GTF_N_FIELDS, '\t')
            .collect();
        if fields.len() < GTF_N_FIELDS {
            bail!(
                "expected {} tab-separated fields, found {}",
                GTF_N_FIELDS,
                fields.len()
            );
        }

        Ok(Self {
            seqid:        fields[0],
            source:       fields[1],
            feature_type: fields[2],
            start:        fields[3],
            end:          fields[4],
            score:        fields[5],
            strand:       fields[6],
            phase:        fields[7],
            attributes:   fields[8],
        })
    }

    /// Numeric chromosome; scaffolds, `X`, `MT` and friends yield `None`.
    pub fn chromosome(&self) -> Option<ChromType> {
        self.seqid
            .trim()
            .parse::<ChromType>()
            .ok()
            .filter(|chr| *chr > 0)
    }
}

/// A structural GTF feature after filtering and attribute extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub chromosome:      ChromType,
    pub feature_type:    FeatureType,
    pub start:           PosType,
    pub end:             PosType,
    pub strand:          Strand,
    pub gene_id:         Option<ArcStr>,
    pub gene_name:       Option<ArcStr>,
    pub gene_type:       Option<ArcStr>,
    pub transcript_id:   Option<ArcStr>,
    pub transcript_name: Option<ArcStr>,
    pub transcript_type: Option<ArcStr>,
    pub exon_number:     Option<u32>,
    pub exon_id:         Option<ArcStr>,
    pub is_canonical:    bool,
}

impl AnnotationRecord {
    /// Converts a raw line into a record. Errors describe why the line is
    /// not usable; callers treat them as "skip this line".
    pub fn from_raw(
        raw: &RawGtfEntry<'_>,
        canonical_tag: &str,
    ) -> anyhow::Result<Self> {
        let chromosome = raw
            .chromosome()
            .ok_or(anyhow!("non-numeric chromosome '{}'", raw.seqid))?;
        let feature_type = FeatureType::from_str(raw.feature_type)?;
        let start = raw
            .start
            .parse::<PosType>()
            .map_err(|_| anyhow!("invalid start '{}'", raw.start))?;
        let end = raw
            .end
            .parse::<PosType>()
            .map_err(|_| anyhow!("invalid end '{}'", raw.end))?;
        if start > end {
            bail!("start {} is greater than end {}", start, end);
        }
        let strand = Strand::from_str(raw.strand)?;
        let attributes = GtfAttributes::from_str(raw.attributes)?;

        Ok(Self::new(
            chromosome,
            feature_type,
            start,
            end,
            strand,
            attributes,
            canonical_tag,
        ))
    }

    pub fn new(
        chromosome: ChromType,
        feature_type: FeatureType,
        start: PosType,
        end: PosType,
        strand: Strand,
        attributes: GtfAttributes,
        canonical_tag: &str,
    ) -> Self {
        let is_canonical = attributes.has_tag(canonical_tag);
        Self {
            chromosome,
            feature_type,
            start,
            end,
            strand,
            is_canonical,
            gene_id: attributes.gene_id,
            gene_name: attributes.gene_name,
            gene_type: attributes.gene_biotype,
            transcript_id: attributes.transcript_id,
            transcript_name: attributes.transcript_name,
            transcript_type: attributes.transcript_biotype,
            exon_number: attributes.exon_number,
            exon_id: attributes.exon_id,
        }
    }

    /// Key used to group records of one transcript.
    pub fn transcript_key(&self) -> Option<&ArcStr> {
        self.transcript_name
            .as_ref()
            .or(self.transcript_id.as_ref())
    }

    pub fn sort_key(&self) -> (ChromType, PosType, PosType) {
        (self.chromosome, self.start, self.end)
    }
}
