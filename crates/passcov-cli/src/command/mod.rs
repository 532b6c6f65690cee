use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use self::{coverage_stats::CoverageStatsArg, find_receivers::FindReceiversArg};

mod coverage_stats;
mod find_receivers;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank likely receivers and their nearest defenders for every pass play
    FindReceivers(#[clap(flatten)] FindReceiversArg),
    /// Summarize how cornerbacks covered the field over every play
    CoverageStats(#[clap(flatten)] CoverageStatsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::FindReceivers(arg) => find_receivers::run(&arg)?,
        Mode::CoverageStats(arg) => coverage_stats::run(&arg)?,
    }
    Ok(())
}

/// Input and output directories, given positionally or by flag.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PathArgs {
    /// Directory holding games.csv, plays.csv and week*.csv
    #[arg(value_name = "DATA_PATH")]
    data_path: Option<PathBuf>,
    /// Directory the per-week outputs are written to
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,
    /// Same as DATA_PATH
    #[arg(long = "data-path", value_name = "DATA_PATH")]
    data_path_flag: Option<PathBuf>,
    /// Same as OUTPUT_PATH
    #[arg(long = "output-path", value_name = "OUTPUT_PATH")]
    output_path_flag: Option<PathBuf>,
}

impl PathArgs {
    /// Flags take precedence; remaining positionals fill the rest in order.
    pub(crate) fn resolve(&self) -> anyhow::Result<(PathBuf, PathBuf)> {
        let mut positional = [&self.data_path, &self.output_path]
            .into_iter()
            .flatten()
            .cloned();
        let data_path = self
            .data_path_flag
            .clone()
            .or_else(|| positional.next())
            .context("Missing required argument: DATA_PATH")?;
        let output_path = self
            .output_path_flag
            .clone()
            .or_else(|| positional.next())
            .context("Missing required argument: OUTPUT_PATH")?;
        Ok((data_path, output_path))
    }
}
