use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};
use similar::TextDiff;

use super::{
    error::BackendError,
    models::{week_model::WeekData, WeekKey},
};

const APP_DIR_NAME: &str = "BerichtGen";

/// `BerichtGen` inside the platform data directory.
pub fn default_data_dir() -> Result<PathBuf, BackendError> {
    let data_dir = dirs::data_dir().ok_or(BackendError::NoDataDir)?;
    Ok(data_dir.join(APP_DIR_NAME))
}

pub fn week_file_name(key: &WeekKey) -> String {
    format!("week_{}.json", key)
}

pub fn log_week(week: &WeekData) {
    for (weekday, entry) in week.entries.iter() {
        debug!(
            "Week {} {}: {} in {} ({} chars of notes)",
            week.key(),
            weekday,
            entry.date,
            entry.area,
            entry.notes.chars().count()
        );
    }
}

/// Unified diff between two versions of the same week, `None` when equal.
pub fn diff_weeks(old: &WeekData, new: &WeekData) -> Result<Option<String>, BackendError> {
    if old == new {
        return Ok(None);
    }
    let old_json = serde_json::to_string_pretty(old)?;
    let new_json = serde_json::to_string_pretty(new)?;
    let diff = TextDiff::from_lines(&old_json, &new_json);
    Ok(Some(
        diff.unified_diff()
            .header("cached", "backend")
            .to_string(),
    ))
}

/// Reads JSON from `path`, `None` if the file does not exist.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, BackendError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            debug!("Read {}", path.display());
            Ok(Some(serde_json::from_str(&content)?))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), BackendError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    info!("Wrote {}", path.display());
    Ok(())
}
