use std::path::{Path, PathBuf};

use passcov_analysis::{
    params::AnalysisParams,
    pipeline::{self, AnalysisSummary},
};
use passcov_tracking::metadata::PlayMetadata;

use crate::{command::PathArgs, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FindReceiversArg {
    #[clap(flatten)]
    pub(crate) paths: PathArgs,
    /// JSON file overriding the default analysis parameters
    #[arg(long)]
    params: Option<PathBuf>,
    /// Frames in the trajectory window, starting at the release frame
    #[arg(long)]
    frame_count: Option<u32>,
    /// Maximum distance (yards) from the trajectory line for a candidate
    #[arg(long)]
    yards_around: Option<f64>,
    /// Ranked receivers kept per play
    #[arg(long)]
    max_receivers: Option<usize>,
    /// Nearest defenders kept per receiver
    #[arg(long)]
    max_defenders: Option<usize>,
}

impl FindReceiversArg {
    /// Defaults, overlaid by the parameter file, overlaid by individual flags.
    fn analysis_params(&self) -> anyhow::Result<AnalysisParams> {
        let mut params = match &self.params {
            Some(path) => util::read_params_file(path)?,
            None => AnalysisParams::default(),
        };
        if let Some(frame_count) = self.frame_count {
            params.frame_count = frame_count;
        }
        if let Some(yards_around) = self.yards_around {
            params.yards_around = yards_around;
        }
        if let Some(max_receivers) = self.max_receivers {
            params.max_receivers = max_receivers;
        }
        if let Some(max_defenders) = self.max_defenders {
            params.max_defenders = max_defenders;
        }
        Ok(params)
    }
}

pub(crate) fn run(arg: &FindReceiversArg) -> anyhow::Result<()> {
    let (data_path, output_path) = arg.paths.resolve()?;
    let params = arg.analysis_params()?;
    tracing::debug!(?params, "analysis parameters");

    let metadata = util::read_metadata(&data_path)?;
    let track_files = util::list_track_files(&data_path)?;
    if track_files.is_empty() {
        tracing::warn!(data_path = %data_path.display(), "no week*.csv files found");
    }
    util::create_output_dir(&output_path)?;

    for track_path in &track_files {
        let summary = process_file(track_path, &output_path, &metadata, &params)?;
        tracing::info!(
            path = %track_path.display(),
            plays = summary.plays,
            plays_with_rows = summary.plays_with_rows,
            rows = summary.rows,
            skipped = ?summary.skipped,
            "finished tracking file"
        );
    }
    Ok(())
}

/// Analyses one tracking file and writes `<output_path>/<stem>.json`.
fn process_file(
    track_path: &Path,
    output_path: &Path,
    metadata: &PlayMetadata,
    params: &AnalysisParams,
) -> anyhow::Result<AnalysisSummary> {
    let file = util::read_tracking_file(track_path)?;
    let output = pipeline::analyze_file(&file, metadata, params);
    let output_file = util::output_file_path(output_path, track_path, "json");
    util::Output::save_json(&output.rows, output_file)?;
    Ok(output.summary)
}
