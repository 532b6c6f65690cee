use std::path::Path;

use passcov_analysis::coverage;
use passcov_tracking::metadata::PlayMetadata;

use crate::{command::PathArgs, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CoverageStatsArg {
    #[clap(flatten)]
    pub(crate) paths: PathArgs,
}

pub(crate) fn run(arg: &CoverageStatsArg) -> anyhow::Result<()> {
    let (data_path, output_path) = arg.paths.resolve()?;

    let metadata = util::read_metadata(&data_path)?;
    let track_files = util::list_track_files(&data_path)?;
    if track_files.is_empty() {
        tracing::warn!(data_path = %data_path.display(), "no week*.csv files found");
    }
    util::create_output_dir(&output_path)?;

    for track_path in &track_files {
        let rows = process_file(track_path, &output_path, &metadata)?;
        tracing::info!(path = %track_path.display(), rows, "finished tracking file");
    }
    Ok(())
}

/// Summarizes one tracking file into `<output_path>/<stem>.csv`.
fn process_file(
    track_path: &Path,
    output_path: &Path,
    metadata: &PlayMetadata,
) -> anyhow::Result<usize> {
    let file = util::read_tracking_file(track_path)?;
    let rows = coverage::analyze_file(&file, metadata);
    let output_file = util::output_file_path(output_path, track_path, "csv");
    util::Output::save_csv(&rows, output_file)?;
    Ok(rows.len())
}
