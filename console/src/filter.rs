use std::path::PathBuf;

use clap::Args;
use gtfannot::prelude::*;

use crate::strings::filter as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct FilterArgs {
    #[arg(short, long, default_value = "results/processed.csv", help = strings::INPUT)]
    input:     PathBuf,
    #[arg(short, long, default_value = "exclusion_list.txt", help = strings::GENE_LIST)]
    gene_list: PathBuf,
    #[arg(short, long, default_value = "results/filtered.csv", help = strings::OUTPUT)]
    output:    PathBuf,
}

impl FilterArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let summary = filter_annotated(&self.input, &self.gene_list, &self.output)?;
        println!(
            "{} of {} rows kept, written to {}",
            summary.rows_out,
            summary.rows_in,
            self.output.display()
        );
        Ok(())
    }
}
