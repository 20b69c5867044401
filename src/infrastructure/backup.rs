//! Timestamped backups taken before a session's first mutation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::error::Result;

/// Retention parameters for [`backup_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPolicy {
    /// Newest backups kept per file.
    pub number_of_backups: usize,
    /// Where backups go; `<parent>/backups` when unset.
    pub directory: Option<PathBuf>,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            number_of_backups: 8,
            directory: None,
        }
    }
}

/// Copy `path` into the backup directory and prune old copies.
///
/// Returns the new backup's path, or `None` when `path` does not exist.
pub fn backup_file(path: &Path, policy: &BackupPolicy) -> Result<Option<PathBuf>> {
    backup_file_at(path, policy, Local::now())
}

/// [`backup_file`] with an explicit timestamp.
pub fn backup_file_at(path: &Path, policy: &BackupPolicy, now: DateTime<Local>) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        debug!(path = %path.display(), "nothing to back up");
        return Ok(None);
    }

    let directory = match &policy.directory {
        Some(directory) => directory.clone(),
        None => path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("backups"),
    };
    fs::create_dir_all(&directory)?;

    let (stem, extension) = split_name(path);
    let name = format!("{stem}-{}{extension}", now.format("%Y%m%dT%H%M%S%3f"));
    let target = directory.join(name);
    fs::copy(path, &target)?;
    info!(source = %path.display(), backup = %target.display(), "backup created");

    prune(&directory, &stem, &extension, policy.number_of_backups)?;
    Ok(Some(target))
}

/// File stem and extension (with its dot) of `path`.
fn split_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, extension)
}

/// Backups of one file sort chronologically by name; keep the newest.
fn prune(directory: &Path, stem: &str, extension: &str, keep: usize) -> Result<()> {
    let prefix = format!("{stem}-");
    let mut backups: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|name| is_stamped(&name, &prefix, extension))
        })
        .collect();
    backups.sort();

    let excess = backups.len().saturating_sub(keep);
    for old in backups.into_iter().take(excess) {
        fs::remove_file(&old)?;
        debug!(path = %old.display(), "old backup removed");
    }
    Ok(())
}

/// `name` is `<prefix><YYYYmmddTHHMMSSmmm><extension>`.
fn is_stamped(name: &str, prefix: &str, extension: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(extension))
    else {
        return false;
    };
    stamp.len() == 18
        && stamp.char_indices().all(|(i, c)| if i == 8 { c == 'T' } else { c.is_ascii_digit() })
}
