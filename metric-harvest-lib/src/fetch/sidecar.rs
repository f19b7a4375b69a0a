use super::LOG_TARGET;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// What was fetched for a repository, stored next to its working tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnapshotMetadata {
    pub repo_url: String,
    pub commit: String,
    pub fetched_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
}

impl SnapshotMetadata {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).into_app_err_with(|| format!("unable to open snapshot metadata '{}'", path.display()))?;
        let metadata = serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("unable to parse snapshot metadata '{}'", path.display()))?;
        log::debug!(target: LOG_TARGET, "Loaded snapshot metadata '{}'", path.display());
        Ok(metadata)
    }

    /// Write the metadata to a temporary file and rename it over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .into_app_err_with(|| format!("invalid snapshot metadata path '{}'", path.display()))?;
        let temp_path = path.with_file_name(format!(".{}.tmp-{}", file_name.to_string_lossy(), std::process::id()));

        let write = || -> Result<()> {
            let file = File::create(&temp_path)
                .into_app_err_with(|| format!("unable to create snapshot metadata '{}'", temp_path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, self)
                .into_app_err_with(|| format!("unable to serialize snapshot metadata '{}'", temp_path.display()))?;
            writer
                .flush()
                .into_app_err_with(|| format!("unable to write snapshot metadata '{}'", temp_path.display()))?;
            fs::rename(&temp_path, path).into_app_err_with(|| format!("unable to move snapshot metadata into '{}'", path.display()))
        };

        let result = write();
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        result
    }
}
