use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use itertools::Itertools;
use log::{
    debug,
    warn,
};

use crate::data_structs::exclusion::{
    ExclusionMap,
    ExclusionSpec,
};
use crate::error::Result;

const FILE_PREFIX: &str = "exc";
const FILE_SUFFIX: &str = ".txt";

/// `<dir>/exc<gene>.txt`
pub fn exclusion_path<P: AsRef<Path>>(
    dir: P,
    gene: &str,
) -> PathBuf {
    dir.as_ref()
        .join(format!("{FILE_PREFIX}{gene}{FILE_SUFFIX}"))
}

/// Newline-delimited gene names. A missing file is an empty list.
pub fn read_exclusion_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        debug!("No exclusion list at {}", path.display());
        return Ok(Vec::new());
    }

    BufReader::new(File::open(path)?)
        .lines()
        .map_ok(|line| line.trim().to_string())
        .filter_ok(|line| !line.is_empty())
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(Into::into)
}

/// Genes that have an exclusion list file in `dir`, sorted by name.
pub fn discover_exclusion_genes<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        warn!(
            "Exclusion directory {} not found, no genes will be excluded",
            dir.display()
        );
        return Ok(Vec::new());
    }

    Ok(std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix(FILE_PREFIX))
                .and_then(|name| name.strip_suffix(FILE_SUFFIX))
                .filter(|gene| !gene.is_empty())
                .map(String::from)
        })
        .sorted()
        .collect())
}

/// Reads the exclusion list of every `(gene, exclude_self)` pair from `dir`
/// and resolves them into an [`ExclusionMap`].
pub fn read_exclusion_map<P, I, S>(
    dir: P,
    genes: I,
) -> Result<ExclusionMap>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (S, bool)>,
    S: Into<String>, {
    let specs = genes
        .into_iter()
        .map(|(gene, exclude_self)| {
            let gene = gene.into();
            let partners = read_exclusion_list(exclusion_path(&dir, &gene))?;
            Ok((gene, ExclusionSpec::new(exclude_self, partners)))
        })
        .collect::<Result<Vec<_>>>()?;

    let map = ExclusionMap::resolve(specs);
    for gene in map.genes() {
        debug!("Excluding {} genes for {}", map.get(gene).len(), gene);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_path() {
        assert_eq!(
            exclusion_path("exclusion", "KLF6"),
            PathBuf::from("exclusion/excKLF6.txt")
        );
    }

    #[test]
    fn test_read_list_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = exclusion_path(dir.path(), "KLF6");
        std::fs::write(&path, "KLF6\nSP1\n\n  EP300 \n").unwrap();

        assert_eq!(read_exclusion_list(&path).unwrap(), vec!["KLF6", "SP1", "EP300"]);
        assert!(read_exclusion_list(dir.path().join("excNONE.txt"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_discover_and_map() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(exclusion_path(dir.path(), "TP53"), "MDM2\n").unwrap();
        std::fs::write(exclusion_path(dir.path(), "KLF6"), "SP1\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("exc.txt"), "x").unwrap();

        let genes = discover_exclusion_genes(dir.path()).unwrap();
        assert_eq!(genes, vec!["KLF6", "TP53"]);

        let map = read_exclusion_map(
            dir.path(),
            vec![("KLF6", true), ("TP53", false), ("BRCA1", true)],
        )
        .unwrap();
        assert_eq!(map.get("KLF6").sorted(), vec!["KLF6", "SP1"]);
        assert_eq!(map.get("TP53").sorted(), vec!["MDM2"]);
        assert_eq!(map.get("BRCA1").sorted(), vec!["BRCA1"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover_exclusion_genes("no/such/dir")
            .unwrap()
            .is_empty());
    }
}
