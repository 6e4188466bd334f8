//! UUID-named `.docx` files that live between finalize and download.
//!
//! Each finalize writes its own file, so concurrent sessions never share a path.
//! A file is removed after it is downloaded, when a later finalize replaces it,
//! at logout or login, or by the periodic sweep once it is older than a session can live.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::AppError;

const ARTIFACT_PREFIX: &str = "resume-";
const DOCX_SUFFIX: &str = ".docx";

/// Writes `bytes` to a fresh artifact in `dir` and returns its path.
///
/// The file is created through `tempfile`, so a failed write leaves nothing behind.
pub fn write_docx_artifact(dir: &Path, bytes: &[u8]) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::ExportWrite(format!("create {}: {e}", dir.display())))?;

    let mut file = tempfile::Builder::new()
        .prefix(ARTIFACT_PREFIX)
        .suffix(DOCX_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| AppError::ExportWrite(format!("create artifact: {e}")))?;

    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::ExportWrite(format!("write artifact: {e}")))?;

    let (_, path) = file
        .keep()
        .map_err(|e| AppError::ExportWrite(format!("keep artifact: {e}")))?;
    Ok(path)
}

/// Reads an artifact and deletes it. A missing file is `DownloadNotFound`.
pub async fn take_artifact(path: &Path) -> Result<Vec<u8>, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::DownloadNotFound)
        }
        Err(e) => return Err(AppError::ExportWrite(format!("read artifact: {e}"))),
    };
    remove_artifact(path).await;
    Ok(bytes)
}

/// Best-effort delete; a file that is already gone is fine.
pub async fn remove_artifact(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove export artifact {}: {e}", path.display()),
    }
}

/// Deletes artifacts in `dir` last modified more than `max_age` ago.
/// Returns how many were removed.
pub fn sweep_stale_artifacts(dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with(ARTIFACT_PREFIX) && name.ends_with(DOCX_SUFFIX)) {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified())?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age > max_age {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    if removed > 0 {
        info!("Swept {removed} stale export artifact(s) from {}", dir.display());
    }
    Ok(removed)
}

/// Runs `sweep_stale_artifacts` now and then every `every`, for as long as the process lives.
/// Catches artifacts whose session expired before they were downloaded.
pub fn spawn_artifact_sweeper(dir: PathBuf, max_age: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let sweep_dir = dir.clone();
            match tokio::task::spawn_blocking(move || sweep_stale_artifacts(&sweep_dir, max_age)).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!("Artifact sweep of {} failed: {e}", dir.display()),
                Err(e) => warn!("Artifact sweep task failed: {e}"),
            }
        }
    })
}
