mod annotate;
mod filter;
mod strings;
mod utils;

use std::process::exit;

use annotate::AnnotateArgs;
use clap::{
    Parser,
    Subcommand,
};
use console::style;
use filter::FilterArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Annotate alignment hits with overlapping genes and transcripts.
    Annotate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AnnotateArgs,
    },

    /// Remove globally excluded genes from an annotated table.
    Filter {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  FilterArgs,
    },
}

fn run(command: MainMenu) -> anyhow::Result<()> {
    match command {
        MainMenu::Annotate { utils, args } => {
            utils.setup()?;
            args.run(&utils)
        },
        MainMenu::Filter { utils, args } => {
            utils.setup()?;
            args.run(&utils)
        },
    }
}

fn main() {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    if let Err(e) = run(cli.command) {
        eprintln!("{} {:#}", style("error:").red().bold(), e);
        exit(1);
    }
}
