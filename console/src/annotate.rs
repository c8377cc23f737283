use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use gtfannot::data_structs::annotation::DEFAULT_CANONICAL_TAG;
use gtfannot::prelude::*;
use log::info;

use crate::strings::annotate as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateArgs {
    #[arg(short, long, default_value = "annotation", help = strings::GTF)]
    gtf:           PathBuf,
    #[arg(short, long, default_value = "exclusion", help = strings::EXCLUSION_DIR)]
    exclusion_dir: PathBuf,
    #[arg(short, long, help = strings::PARAMS)]
    params:        Option<PathBuf>,
    #[arg(short, long, default_value = "results/raw.csv", help = strings::INPUT)]
    input:         PathBuf,
    #[arg(short, long, default_value = "results/processed.csv", help = strings::OUTPUT)]
    output:        PathBuf,

    #[arg(
        long,
        default_value_t = false,
        help_heading = "ANNOTATION",
        help = strings::ALL_BIOTYPES
    )]
    all_biotypes:  bool,
    #[arg(
        long,
        default_value = DEFAULT_CANONICAL_TAG,
        help_heading = "ANNOTATION",
        help = strings::CANONICAL_TAG
    )]
    canonical_tag: String,
}

impl AnnotateArgs {
    fn exclusions(
        &self,
        params: Option<&Params>,
    ) -> anyhow::Result<ExclusionMap> {
        let flags = match params {
            Some(params) => params.exclusion_flags(),
            None => {
                discover_exclusion_genes(&self.exclusion_dir)?
                    .into_iter()
                    .map(|gene| (gene, false))
                    .collect()
            },
        };
        Ok(read_exclusion_map(&self.exclusion_dir, flags)?)
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let params = self.params.as_ref().map(Params::from_path).transpose()?;
        let query = QueryTable::from_path(&self.input)?;

        let gtf_path = find_gtf_in_dir(&self.gtf)?;
        let config = LoaderConfig::default()
            .with_protein_coding_only(!self.all_biotypes)
            .with_canonical_tag(self.canonical_tag.clone());
        let table = GtfReader::new(config).load(&gtf_path)?;
        let exclusions = self.exclusions(params.as_ref())?;
        info!("Loaded exclusion sets for {} genes", exclusions.len());

        let threads = utils
            .threads
            .or(params.as_ref().and_then(|p| p.ncores));
        let progress_bar = utils.pbar(query.len())?;
        let ticker = progress_bar.clone();

        let annotator = Annotator::new(AnnotationContext::new(table, exclusions))
            .with_threads(threads)
            .with_progress(Arc::new(move || ticker.inc(1)));
        let (results, summary) = annotator.run(&query)?;
        progress_bar.finish_and_clear();

        let written = query.write_annotated(&self.output, &results)?;
        println!("{}", summary);
        println!("{} rows written to {}", written, self.output.display());
        Ok(())
    }
}
