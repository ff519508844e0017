// Whole-store JSON snapshots so a single-process deployment survives
// restarts. Writes go through a temp file and rename, so a crash mid-write
// leaves the previous snapshot intact.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use super::memory::InMemoryTaskStore;
use super::{StoreError, TaskStore};
use crate::workflow::task::Task;

const SNAPSHOT_VERSION: &str = "1";

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: String,
    saved_at: DateTime<Utc>,
    tasks: Vec<Task>,
}

/// Serializes every task in the store to `path`.
pub async fn write_snapshot(store: &InMemoryTaskStore, path: &Path) -> Result<(), StoreError> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION.to_string(),
        saved_at: Utc::now(),
        tasks: store.all().await?,
    };
    let payload = serde_json::to_vec_pretty(&snapshot)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &payload).await?;
    fs::rename(&tmp, path).await?;

    info!(path = %path.display(), tasks = snapshot.tasks.len(), "task snapshot written");
    Ok(())
}

/// Loads a snapshot into a fresh in-memory store. A missing file yields an
/// empty store; a malformed one is reported as corruption rather than
/// silently dropped.
pub async fn load_snapshot(path: &Path) -> Result<InMemoryTaskStore, StoreError> {
    let store = InMemoryTaskStore::new();
    let payload = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(store),
        Err(err) => return Err(err.into()),
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&payload).map_err(|err| StoreError::Corrupt {
            reason: format!("{}: {err}", path.display()),
        })?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StoreError::Corrupt {
            reason: format!(
                "unsupported snapshot version {} in {}",
                snapshot.version,
                path.display()
            ),
        });
    }

    let count = snapshot.tasks.len();
    store.replace_all(snapshot.tasks).await;
    info!(path = %path.display(), tasks = count, "task snapshot loaded");
    Ok(store)
}
