//! `params.txt` run configuration.
//!
//! ```text
//! [KLF6, 11, 0.001, true, 10]
//! [TP53, 11, 0.001, false, 20]
//! ncores=8
//! organism=homo_sapiens
//! ```
//!
//! Bracketed lines are per query gene:
//! `[gene, word_size, evalue, exclude_self, ppi_size]`. Only the gene name
//! and the self-exclude flag matter for annotation, the remaining fields are
//! kept so the file can be round-tripped by the tools that build the
//! exclusion lists.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    AnnotError,
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub word_size:    usize,
    pub evalue:       f64,
    pub exclude_self: bool,
    pub ppi_size:     usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub queries:  IndexMap<String, QueryParams>,
    pub ncores:   Option<usize>,
    pub organism: Option<String>,
}

impl Params {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AnnotError::missing(path));
        }
        std::fs::read_to_string(path)?.parse()
    }

    /// `(gene, exclude_self)` pairs in file order.
    pub fn exclusion_flags(&self) -> Vec<(String, bool)> {
        self.queries
            .iter()
            .map(|(gene, query)| (gene.clone(), query.exclude_self))
            .collect()
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }
}

fn parse_query_line(
    line_no: usize,
    line: &str,
) -> Result<(String, QueryParams)> {
    let err = |reason: String| {
        AnnotError::Params {
            line: line_no,
            reason,
        }
    };

    let fields = line
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>();
    let [gene, word_size, evalue, exclude_self, ppi_size] = fields[..] else {
        return Err(err(format!(
            "expected 5 comma separated fields, got {}",
            fields.len()
        )));
    };
    if gene.is_empty() {
        return Err(err("empty gene name".to_string()));
    }

    let query = QueryParams {
        word_size:    word_size
            .parse()
            .map_err(|e| err(format!("word size '{word_size}': {e}")))?,
        evalue:       evalue
            .parse()
            .map_err(|e| err(format!("evalue '{evalue}': {e}")))?,
        exclude_self: exclude_self.eq_ignore_ascii_case("true"),
        ppi_size:     ppi_size
            .parse()
            .map_err(|e| err(format!("ppi size '{ppi_size}': {e}")))?,
    };
    Ok((gene.to_string(), query))
}

impl FromStr for Params {
    type Err = AnnotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut params = Params::default();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();

            if line.starts_with('[') {
                let (gene, query) = parse_query_line(line_no, line)?;
                params.queries.insert(gene, query);
            }
            else if let Some(value) = line.strip_prefix("ncores=") {
                let value = value.trim();
                params.ncores = Some(value.parse().map_err(|e| {
                    AnnotError::Params {
                        line:   line_no,
                        reason: format!("ncores '{value}': {e}"),
                    }
                })?);
            }
            else if line.starts_with("organism") {
                let organism = line
                    .split_once('=')
                    .map(|(_, v)| v.trim().to_lowercase())
                    .unwrap_or_default();
                if !organism.contains('_') {
                    return Err(AnnotError::Params {
                        line:   line_no,
                        reason: format!(
                            "organism name '{organism}' must separate genus and \
                             species with an underscore"
                        ),
                    });
                }
                params.organism = Some(organism);
            }
        }
        Ok(params)
    }
}
