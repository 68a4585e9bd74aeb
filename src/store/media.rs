/// Profile picture upload and deletion
///
/// These are the persistence callbacks handed to the slot. The access token
/// is always an explicit parameter; nothing here reads ambient state.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iced::futures::FutureExt;
use tokio::task;

use super::profile::ProfileStore;
use crate::error::{Result, SlotError};
use crate::slot::preview::PendingFile;
use crate::slot::{DeleteFn, SaveFn};

/// Bearer token for upload and delete requests
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn check(&self) -> Result<()> {
        if self.0.trim().is_empty() {
            return Err(SlotError::Unauthorized);
        }
        Ok(())
    }
}

// Never print the token itself
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Where a profile's pictures live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTarget {
    /// Catalog database; a fresh connection is opened per request
    pub db_path: PathBuf,
    /// Directory uploaded files are copied into
    pub media_dir: PathBuf,
    pub profile_id: i64,
}

/// Store `file` as the profile's picture and return its new path
pub async fn upload_avatar(target: MediaTarget, token: AuthToken, file: PendingFile) -> Result<String> {
    token.check()?;

    if file.is_empty() {
        return Err(SlotError::Decode(format!("{} is empty", file.name)));
    }

    let format = image::guess_format(&file.bytes)?;
    let extension = format
        .extensions_str()
        .first()
        .map(|ext| ext.to_string())
        .or_else(|| file.extension())
        .unwrap_or_else(|| "img".to_string());

    tokio::fs::create_dir_all(&target.media_dir)
        .await
        .map_err(|e| SlotError::Upload(format!("{}: {}", target.media_dir.display(), e)))?;

    let stored = target.media_dir.join(format!(
        "{}-{}.{}",
        target.profile_id,
        chrono::Utc::now().timestamp_millis(),
        extension
    ));
    tokio::fs::write(&stored, &file.bytes[..])
        .await
        .map_err(|e| SlotError::Upload(format!("{}: {}", stored.display(), e)))?;

    let stored_path = stored.to_string_lossy().to_string();
    let db_path = target.db_path.clone();
    let profile_id = target.profile_id;
    let recorded = stored_path.clone();

    // rusqlite::Connection is not Sync, so each request opens its own
    let previous = task::spawn_blocking(move || {
        ProfileStore::open(db_path)?.set_avatar(profile_id, Some(&recorded))
    })
    .await?;

    let previous = match previous {
        Ok(previous) => previous,
        Err(err) => {
            remove_quietly(&stored).await;
            return Err(err);
        }
    };

    if let Some(previous) = replaced(previous, &stored_path) {
        remove_if_owned(&target.media_dir, Path::new(&previous)).await;
    }

    log::info!(
        "📸 Uploaded {} ({} bytes) as {}",
        file.name,
        file.len(),
        stored_path
    );
    Ok(stored_path)
}

/// Clear the profile's picture and remove the stored file
pub async fn delete_avatar(target: MediaTarget, token: AuthToken) -> Result<()> {
    token.check()?;

    let db_path = target.db_path.clone();
    let profile_id = target.profile_id;
    let previous =
        task::spawn_blocking(move || ProfileStore::open(db_path)?.set_avatar(profile_id, None))
            .await??;

    if let Some(previous) = previous {
        remove_if_owned(&target.media_dir, Path::new(&previous)).await;
    }

    log::info!("🗑️  Deleted picture of profile {}", target.profile_id);
    Ok(())
}

/// Save callback for the slot
pub fn save_fn(target: MediaTarget, token: AuthToken) -> SaveFn {
    Arc::new(move |file| {
        upload_avatar(target.clone(), token.clone(), file)
            .map(|result| result.map(|_| ()))
            .boxed()
    })
}

/// Delete callback for the slot
pub fn delete_fn(target: MediaTarget, token: AuthToken) -> DeleteFn {
    Arc::new(move || delete_avatar(target.clone(), token.clone()).boxed())
}

/// The file an upload supersedes. Two uploads within one millisecond share
/// a name, and then the catalog already points at the file just written.
fn replaced(previous: Option<String>, stored: &str) -> Option<String> {
    previous.filter(|previous| previous != stored)
}

/// Remove a previously stored file, but only if we put it there
async fn remove_if_owned(media_dir: &Path, path: &Path) {
    if path.starts_with(media_dir) {
        remove_quietly(path).await;
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        log::warn!("⚠️  Could not remove {}: {}", path.display(), e);
    }
}
