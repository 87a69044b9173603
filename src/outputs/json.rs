//! JSON snapshot writing.
//!
//! Serializes the merged record set, sorted by recency, to a single
//! pretty-printed JSON file for the display front end. The write goes
//! through a temp file and a rename so the previous snapshot is replaced
//! all-or-nothing, and an empty run leaves it untouched entirely.

use crate::models::GameRecord;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// Sort records newest-first by their recency key (`last_updated`, else
/// `initial_release`; undateable records sink to the bottom).
pub fn sort_by_recency(records: &mut [GameRecord]) {
    records.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

/// Sort and write the snapshot to `path`, replacing any prior content.
///
/// An empty record set is a recoverable no-op: the previous snapshot stays
/// in place and a warning is logged, on the theory that a run in which
/// every category failed should not wipe yesterday's good data.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_snapshot(
    records: &mut Vec<GameRecord>,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        warn!("Aggregation produced no records; leaving previous snapshot untouched");
        return Ok(());
    }

    sort_by_recency(records);
    let json = serde_json::to_string_pretty(&records)?;

    let tmp_path = format!("{path}.tmp");
    if let Err(e) = fs::write(&tmp_path, &json).await {
        error!(path = %tmp_path, error = %e, "Failed to write snapshot temp file");
        return Err(e.into());
    }
    fs::rename(&tmp_path, path).await?;
    info!(count = records.len(), "Wrote snapshot");
    Ok(())
}

/// Ensure the snapshot's parent directory exists and is writable.
///
/// Creates missing directories, then probes with a create-and-delete so a
/// permissions problem surfaces before any scraping starts.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_parent(path: &str) -> Result<(), Box<dyn Error>> {
    let parent = match Path::new(path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&parent).await?;
    let probe_path = parent.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Snapshot directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
