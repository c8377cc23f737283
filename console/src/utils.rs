use anyhow::bail;
use clap::Args;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short = 't',
        long,
        help_heading = "UTILS",
        help = "Number of worker threads. Overrides `ncores` from the \
                parameters file and the GTFANNOT_NUM_THREADS variable."
    )]
    pub threads:  Option<usize>,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Display progress bar."
    )]
    pub progress: bool,
    #[arg(
        short = 'v',
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Verbose logging."
    )]
    pub verbose:  bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        if self.threads == Some(0) {
            bail!("Number of threads must be positive");
        }
        init_logger(self.verbose)
    }

    pub fn pbar(
        &self,
        total: usize,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_pbar(total)
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !verbose => {
            builder.parse_filters(&filters);
        },
        _ => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            }
            else {
                LevelFilter::Info
            });
        },
    }
    builder.try_init()?;
    Ok(())
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] \
                 [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Annotating...");
    Ok(progress_bar)
}
