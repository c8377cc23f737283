#![allow(dead_code)]
use std::path::{
    Path,
    PathBuf,
};

use gtfannot::io::exclusion::exclusion_path;
use tempfile::TempDir;

/// Two-transcript KLF6 locus on chromosome 10, an antisense pair further
/// downstream and a gene-only record on chromosome 3.
pub const DEMO_GTF: &str = "\
#!genome-build GRCh38.p14
10\thavana\tgene\t1000\t5000\t.\t-\t.\tgene_id \"ENSG01\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\";
10\thavana\ttranscript\t1000\t3200\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\"; transcript_name \"KLF6-201\"; transcript_biotype \"protein_coding\"; tag \"basic\"; tag \"Ensembl_canonical\";
10\thavana\texon\t1000\t1200\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\"; exon_number \"1\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\"; transcript_name \"KLF6-201\"; transcript_biotype \"protein_coding\"; exon_id \"ENSE01\"; tag \"basic\"; tag \"Ensembl_canonical\";
10\thavana\texon\t3000\t3200\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\"; exon_number \"2\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\"; transcript_name \"KLF6-201\"; transcript_biotype \"protein_coding\"; exon_id \"ENSE02\"; tag \"basic\"; tag \"Ensembl_canonical\";
10\thavana\ttranscript\t1000\t1500\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST02\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\"; transcript_name \"KLF6-202\"; transcript_biotype \"retained_intron\";
10\thavana\texon\t1000\t1500\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST02\"; exon_number \"1\"; gene_name \"KLF6\"; gene_biotype \"protein_coding\"; transcript_name \"KLF6-202\"; transcript_biotype \"retained_intron\"; exon_id \"ENSE03\";
10\tensembl\tgene\t20000\t30000\t.\t+\t.\tgene_id \"ENSG02\"; gene_name \"ANT1\"; gene_biotype \"protein_coding\";
10\tensembl\ttranscript\t20000\t30000\t.\t+\t.\tgene_id \"ENSG02\"; transcript_id \"ENST03\"; gene_name \"ANT1\"; gene_biotype \"protein_coding\"; transcript_name \"ANT1-201\"; transcript_biotype \"protein_coding\";
10\tensembl\texon\t20000\t30000\t.\t+\t.\tgene_id \"ENSG02\"; transcript_id \"ENST03\"; exon_number \"1\"; gene_name \"ANT1\"; gene_biotype \"protein_coding\"; transcript_name \"ANT1-201\"; transcript_biotype \"protein_coding\"; exon_id \"ENSE04\";
10\tensembl\tgene\t21000\t25000\t.\t-\t.\tgene_id \"ENSG03\"; gene_name \"ANT2\"; gene_biotype \"protein_coding\";
10\tensembl\ttranscript\t21000\t25000\t.\t-\t.\tgene_id \"ENSG03\"; transcript_id \"ENST04\"; gene_name \"ANT2\"; gene_biotype \"protein_coding\"; transcript_name \"ANT2-201\"; transcript_biotype \"protein_coding\"; tag \"Ensembl_canonical\";
10\tensembl\tCDS\t21000\t25000\t.\t-\t0\tgene_id \"ENSG03\"; transcript_id \"ENST04\"; exon_number \"1\"; gene_name \"ANT2\"; gene_biotype \"protein_coding\"; transcript_name \"ANT2-201\"; transcript_biotype \"protein_coding\"; tag \"Ensembl_canonical\";
3\thavana\tgene\t500\t900\t.\t+\t.\tgene_id \"ENSG04\"; gene_name \"GENE3\"; gene_biotype \"protein_coding\";
3\thavana\tgene\t600\t700\t.\t+\t.\tgene_id \"ENSG05\"; gene_name \"LINC3\"; gene_biotype \"lncRNA\";
";

pub const KLF6_ACCESSION: &str = "gi|568815588|ref|NC_000010.11|";
pub const CHR3_ACCESSION: &str = "gi|568815595|ref|NC_000003.12|";

pub struct DemoWorkspace {
    dir: TempDir,
}

impl DemoWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let workspace = Self {
            dir: tempfile::tempdir()?,
        };
        std::fs::create_dir_all(workspace.annotation_dir())?;
        std::fs::create_dir_all(workspace.exclusion_dir())?;
        std::fs::create_dir_all(workspace.path().join("results"))?;
        std::fs::write(workspace.annotation_dir().join("demo.gtf"), DEMO_GTF)?;
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn annotation_dir(&self) -> PathBuf {
        self.path().join("annotation")
    }

    pub fn exclusion_dir(&self) -> PathBuf {
        self.path().join("exclusion")
    }

    pub fn raw_csv(&self) -> PathBuf {
        self.path().join("results").join("raw.csv")
    }

    pub fn processed_csv(&self) -> PathBuf {
        self.path().join("results").join("processed.csv")
    }

    pub fn write_exclusion(
        &self,
        gene: &str,
        partners: &[&str],
    ) -> anyhow::Result<()> {
        std::fs::write(
            exclusion_path(self.exclusion_dir(), gene),
            partners.join("\n"),
        )?;
        Ok(())
    }

    /// Writes `(seqid, sseqid, sstart, send)` rows as the query table.
    pub fn write_query(
        &self,
        rows: &[(&str, &str, i64, i64)],
    ) -> anyhow::Result<PathBuf> {
        let mut writer = csv::Writer::from_path(self.raw_csv())?;
        writer.write_record(["qseqid_len", "seqid", "sseqid", "sstart", "send", "evalue"])?;
        for (seqid, sseqid, sstart, send) in rows {
            writer.write_record([
                "60".to_string(),
                seqid.to_string(),
                sseqid.to_string(),
                sstart.to_string(),
                send.to_string(),
                "1e-20".to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(self.raw_csv())
    }
}
