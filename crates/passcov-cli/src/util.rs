use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use passcov_analysis::params::AnalysisParams;
use passcov_tracking::{load, metadata::PlayMetadata, play::TrackingFile};

const GAMES_FILE: &str = "games.csv";
const PLAYS_FILE: &str = "plays.csv";
const TRACK_FILE_PREFIX: &str = "week";
const TRACK_FILE_EXTENSION: &str = "csv";

/// A buffered output file that remembers its path for error messages.
#[derive(Debug)]
pub struct Output {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: PathBuf) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::open(output_path)?;
        output.write_json(value)
    }

    pub fn save_csv<I, T>(records: I, output_path: PathBuf) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: serde::Serialize,
    {
        let mut output = Output::open(output_path)?;
        output.write_csv(records)
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_csv<I, T>(&mut self, records: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: serde::Serialize,
    {
        let path = self.display_path();
        let mut writer = csv::Writer::from_writer(&mut *self);
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("Failed to write CSV row to {path}"))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {path}"))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read analysis parameters from a JSON file
///
/// Fields missing from the file keep their default values.
pub fn read_params_file<P>(path: P) -> anyhow::Result<AnalysisParams>
where
    P: AsRef<Path>,
{
    read_json_file("parameters", path)
}

fn open_csv_file(file_kind: &str, path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
    Ok(BufReader::new(file))
}

/// Read `games.csv` and `plays.csv` from the data directory and join them
pub fn read_metadata(data_path: &Path) -> anyhow::Result<PlayMetadata> {
    let games_path = data_path.join(GAMES_FILE);
    let games = load::read_games(open_csv_file("games", &games_path)?)
        .with_context(|| format!("Failed to read games file: {}", games_path.display()))?;

    let plays_path = data_path.join(PLAYS_FILE);
    let plays = load::read_plays(open_csv_file("plays", &plays_path)?)
        .with_context(|| format!("Failed to read plays file: {}", plays_path.display()))?;

    tracing::info!(games = games.len(), plays = plays.len(), "loaded metadata");
    Ok(PlayMetadata::join(&games, &plays))
}

/// Read one `week*.csv` tracking file and group it by game and play
pub fn read_tracking_file(path: &Path) -> anyhow::Result<TrackingFile> {
    let frames = load::read_tracking(open_csv_file("tracking", path)?)
        .with_context(|| format!("Failed to read tracking file: {}", path.display()))?;
    let file = TrackingFile::from_frames(frames);
    tracing::info!(
        path = %path.display(),
        games = file.games.len(),
        plays = file.num_plays(),
        "loaded tracking file"
    );
    Ok(file)
}

fn is_track_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(TRACK_FILE_PREFIX));
    let extension_matches = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRACK_FILE_EXTENSION));
    name_matches && extension_matches && path.is_file()
}

/// `week*.csv` files of the data directory in ascending name order
pub fn list_track_files(data_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(data_path)
        .with_context(|| format!("Failed to read data directory: {}", data_path.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!("Failed to read data directory: {}", data_path.display())
        })?;
        let path = entry.path();
        if is_track_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn create_output_dir(output_path: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output_path).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })
}

/// `<output_path>/<stem of input>.<extension>`
pub fn output_file_path(output_path: &Path, input: &Path, extension: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(extension);
    output_path.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_track_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["week2.csv", "week10.csv", "week1.csv", "games.csv", "week3.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("week4.csv")).unwrap();

        let names = list_track_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["week1.csv", "week10.csv", "week2.csv"]);
    }

    #[test]
    fn test_output_file_path() {
        assert_eq!(
            output_file_path(Path::new("out"), Path::new("data/week1.csv"), "json"),
            Path::new("out").join("week1.json")
        );
        assert_eq!(
            output_file_path(Path::new("out"), Path::new("data/week1.csv"), "csv"),
            Path::new("out").join("week1.csv")
        );
    }

    #[test]
    fn test_missing_games_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_metadata(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("games.csv"));
    }

    #[test]
    fn test_params_file_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{ "yards_around": 7.5 }"#).unwrap();
        let params = read_params_file(&path).unwrap();
        assert_eq!(
            params,
            AnalysisParams {
                yards_around: 7.5,
                ..AnalysisParams::default()
            }
        );
    }
}
