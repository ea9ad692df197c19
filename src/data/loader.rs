//! Dataset file loading.
//!
//! Reads the delivery-level CSV (plain or zipped, the reference dataset ships
//! as `deliveries.csv.zip`) and the optional match-metadata CSV with Polars.
//! Any failure here is fatal to startup; there is no partial-load recovery
//! for a static reference dataset.

use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::dataset::Dataset;
use crate::config::Config;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("dataset file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open archive {path}: {source}")]
    Archive {
        path: PathBuf,
        source: ::zip::result::ZipError,
    },

    #[error("no .csv member found in archive {path}")]
    NoCsvMember { path: PathBuf },

    #[error("failed to load tabular data: {0}")]
    Csv(#[from] PolarsError),

    #[error("delivery dataset is missing required column `{name}`")]
    MissingColumn { name: String },

    #[error("delivery dataset contains no rows")]
    Empty,
}

/// Load the full dataset described by `config`.
///
/// The deliveries file is required; the matches file is optional metadata.
/// When it is absent a match summary is derived from the deliveries instead.
pub fn load_dataset(config: &Config) -> Result<Dataset, DataError> {
    let deliveries = read_table(&config.deliveries_path)?;
    info!(
        rows = deliveries.height(),
        path = %config.deliveries_path.display(),
        "deliveries loaded"
    );

    let matches = match &config.matches_path {
        Some(path) if path.exists() => {
            let df = read_table(path)?;
            info!(rows = df.height(), path = %path.display(), "match metadata loaded");
            Some(df)
        }
        Some(path) => {
            warn!(
                path = %path.display(),
                "matches file not found; deriving match summary from deliveries"
            );
            None
        }
        None => None,
    };

    Dataset::from_frames(deliveries, matches)
}

/// Read a CSV table from `path`, transparently unpacking a single-member zip
/// archive.
pub fn read_table(path: &Path) -> Result<DataFrame, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        let bytes = read_zip_member(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10_000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(df)
    } else {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10_000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }
}

/// Extract the first `.csv` member of a zip archive into memory.
fn read_zip_member(path: &Path) -> Result<Vec<u8>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ::zip::ZipArchive::new(file).map_err(|e| DataError::Archive {
        path: path.to_path_buf(),
        source: e,
    })?;

    let member_name = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|m| m.name().to_string()))
        .find(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .ok_or_else(|| DataError::NoCsvMember {
            path: path.to_path_buf(),
        })?;

    let mut member = archive.by_name(&member_name).map_err(|e| DataError::Archive {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut bytes = Vec::with_capacity(member.size() as usize);
    std::io::Read::read_to_end(&mut member, &mut bytes).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    const CSV: &str = "\
match_id,inning,batting_team,bowling_team,over,ball,batter,bowler,batsman_runs,extra_runs,total_runs,is_wicket
1,1,Mumbai Indians,Chennai Super Kings,1,1,Rohit Sharma,Deepak Chahar,4,0,4,0
1,1,Mumbai Indians,Chennai Super Kings,1,2,Rohit Sharma,Deepak Chahar,6,0,6,0
1,2,Chennai Super Kings,Mumbai Indians,1,1,MS Dhoni,Jasprit Bumrah,1,0,1,0
";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_plain_csv() {
        let dir = temp_dir("crickview_loader_plain");
        let path = dir.join("deliveries.csv");
        fs::write(&path, CSV).unwrap();

        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert!(df.get_column_names().iter().any(|c| c.as_str() == "batter"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reads_csv_from_zip_archive() {
        let dir = temp_dir("crickview_loader_zip");
        let path = dir.join("deliveries.csv.zip");

        let file = fs::File::create(&path).unwrap();
        let mut writer = ::zip::ZipWriter::new(file);
        writer
            .start_file("deliveries.csv", ::zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(CSV.as_bytes()).unwrap();
        writer.finish().unwrap();

        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 3);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_table(Path::new("/nonexistent/deliveries.csv")).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn archive_without_csv_member_is_rejected() {
        let dir = temp_dir("crickview_loader_no_member");
        let path = dir.join("deliveries.csv.zip");

        let file = fs::File::create(&path).unwrap();
        let mut writer = ::zip::ZipWriter::new(file);
        writer
            .start_file("readme.txt", ::zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"nothing here").unwrap();
        writer.finish().unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, DataError::NoCsvMember { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_dataset_is_fatal_on_missing_deliveries() {
        let config = Config {
            deliveries_path: PathBuf::from("/nonexistent/deliveries.csv"),
            matches_path: None,
            ..Config::default()
        };
        assert!(matches!(
            load_dataset(&config).unwrap_err(),
            DataError::NotFound { .. }
        ));
    }
}
