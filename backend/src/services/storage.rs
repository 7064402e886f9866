//! Filesystem storage for generated charts.
//!
//! Every chart is written once under a fresh random name, so concurrent
//! requests never share a path and no locking is needed.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{ChartError, ChartResult};

pub const CHART_PREFIX: &str = "schedule_";
pub const CHART_EXTENSION: &str = "svg";

/// Fresh names tried before giving up on a save.
const MAX_NAME_ATTEMPTS: u32 = 8;

/// Directory of generated chart files.
#[derive(Debug, Clone)]
pub struct ChartStore {
    dir: PathBuf,
}

impl ChartStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generate an opaque chart filename, e.g. `schedule_1a2b3c4d.svg`.
    pub fn generate_name() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("{}{}.{}", CHART_PREFIX, &id[..8], CHART_EXTENSION)
    }

    /// Write `contents` under a new name, creating the directory if needed.
    ///
    /// # Returns
    /// The generated filename (not the full path).
    pub fn save(&self, contents: &str) -> ChartResult<String> {
        self.save_with(contents, Self::generate_name)
    }

    /// Write `contents` under the first name from `next_name` that is not taken.
    /// Existing files are never overwritten.
    fn save_with<F>(&self, contents: &str, mut next_name: F) -> ChartResult<String>
    where
        F: FnMut() -> String,
    {
        fs::create_dir_all(&self.dir)?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = next_name();
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&filename));

            match file {
                Ok(mut file) => {
                    file.write_all(contents.as_bytes())?;
                    log::info!("Saved chart {} ({} bytes)", filename, contents.len());
                    return Ok(filename);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("Chart name {} already taken, retrying", filename);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free chart name after {} attempts", MAX_NAME_ATTEMPTS),
        )
        .into())
    }

    /// Resolve a chart name to its path, rejecting anything that could escape
    /// the chart directory.
    pub fn path_for(&self, filename: &str) -> ChartResult<PathBuf> {
        let valid = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && !filename.contains("..")
            && filename
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(ChartError::InvalidChartName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }

    /// Read a stored chart. `Ok(None)` when it does not exist.
    pub fn load(&self, filename: &str) -> ChartResult<Option<Vec<u8>>> {
        let path = self.path_for(filename)?;
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// MIME type for a chart filename.
pub fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_unique_and_shaped() {
        let a = ChartStore::generate_name();
        let b = ChartStore::generate_name();
        assert_ne!(a, b);
        assert!(a.starts_with("schedule_"));
        assert!(a.ends_with(".svg"));
        assert_eq!(a.len(), "schedule_".len() + 8 + ".svg".len());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChartStore::new(dir.path().join("charts"));

        let name = store.save("<svg></svg>").unwrap();
        let loaded = store.load(&name).unwrap().unwrap();
        assert_eq!(loaded, b"<svg></svg>");
    }

    #[test]
    fn test_taken_name_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChartStore::new(dir.path());
        fs::write(dir.path().join("schedule_aaaaaaaa.svg"), "first").unwrap();

        let mut names = vec!["schedule_bbbbbbbb.svg", "schedule_aaaaaaaa.svg"];
        let name = store
            .save_with("second", || names.pop().unwrap().to_string())
            .unwrap();

        assert_eq!(name, "schedule_bbbbbbbb.svg");
        assert_eq!(store.load("schedule_aaaaaaaa.svg").unwrap().unwrap(), b"first");
        assert_eq!(store.load(&name).unwrap().unwrap(), b"second");
    }

    #[test]
    fn test_gives_up_when_every_name_is_taken() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChartStore::new(dir.path());
        fs::write(dir.path().join("schedule_aaaaaaaa.svg"), "first").unwrap();

        let result = store.save_with("second", || "schedule_aaaaaaaa.svg".to_string());
        assert!(matches!(result, Err(ChartError::Io(_))));
        assert_eq!(store.load("schedule_aaaaaaaa.svg").unwrap().unwrap(), b"first");
    }

    #[test]
    fn test_missing_chart_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChartStore::new(dir.path());
        assert!(store.load("schedule_deadbeef.svg").unwrap().is_none());
    }

    #[test]
    fn test_rejects_traversal() {
        let store = ChartStore::new("generated_charts");
        for bad in ["../secret", "a/b.svg", "..", "", "x\\y", "name with space.svg"] {
            assert!(matches!(
                store.path_for(bad),
                Err(ChartError::InvalidChartName(_))
            ));
        }
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }
}
