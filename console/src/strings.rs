macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod annotate {
    define_strings! {
        GTF =
            "GTF annotation file or a directory containing one. For a \
            directory the first *.gtf / *.gtf.gz file in name order is used.";
        EXCLUSION_DIR =
            "Directory with per-gene exclusion lists named exc<GENE>.txt. \
            Genes listed in the file of a query gene are never reported for \
            that gene's hits.";
        PARAMS =
            "Parameters file. Bracketed query lines decide which genes \
            exclude themselves, `ncores` sets the default thread count. \
            Without it every exclusion list in the exclusion directory is \
            used and no gene excludes itself.";
        INPUT =
            "Alignment hit table (CSV) with at least the seqid, sseqid, \
            sstart and send columns.";
        OUTPUT =
            "Annotated table. Rows without a resolved gene are omitted.";
        ALL_BIOTYPES =
            "Keep records of every gene biotype instead of protein coding \
            genes only.";
        CANONICAL_TAG =
            "Tag value marking the canonical transcript of a gene.";
    }
}

pub mod filter {
    define_strings! {
        INPUT = "Annotated table (CSV) with a `gene` column.";
        GENE_LIST =
            "Newline-delimited list of gene names to remove from every row.";
        OUTPUT =
            "Filtered table. Rows left without genes are omitted.";
    }
}
