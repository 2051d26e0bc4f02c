//! Local persistence of confirmed reports.
//!
//! Each report gets its own directory under the storage root:
//!
//! ```text
//! {root}/{YYYYmmdd_HHMMSS}_{category}_{sex}_{id}/
//!     {category}_{sex}_{id}_image_1.jpg
//!     {category}_{sex}_{id}_image_2.jpg
//!     {category}_{sex}_{id}_data.json
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::channels::Channel;
use crate::error::StorageError;
use crate::wizard::{Category, Draft, Location, Sex};

/// The JSON snapshot written next to the photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: String,
    pub subject_id: String,
    pub chat_id: String,
    pub display_name: Option<String>,
    pub category: Option<Category>,
    pub sex: Option<Sex>,
    pub location: Location,
    pub comment: Option<String>,
    /// `%Y-%m-%d %H:%M:%S`, UTC.
    pub created_at: String,
    /// Local file names of the downloaded photos, in upload order.
    pub photo_files: Vec<String>,
    pub category_label: String,
    pub sex_label: String,
}

/// A report that reached disk.
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub dir: PathBuf,
    pub report: StoredReport,
    /// Pretty-printed snapshot, as written.
    pub json: String,
}

/// Filesystem store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Download the draft's photos through `channel` and write the snapshot.
    pub async fn save(
        &self,
        draft: &Draft,
        channel: &dyn Channel,
    ) -> Result<SavedReport, StorageError> {
        let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        let category = slug(draft.category.as_ref().map(Category::key));
        let sex = slug(draft.sex.as_ref().map(Sex::key));
        let stem = format!("{category}_{sex}_{id}");

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let dir = self.root.join(format!("{stamp}_{stem}"));
        tokio::fs::create_dir_all(&dir).await?;

        match write_report(&dir, &stem, id, draft, channel).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_dir_all(&dir).await {
                    tracing::warn!(
                        dir = %dir.display(),
                        error = %cleanup,
                        "Failed to remove partial report directory"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Fill a fresh report directory with photos and the snapshot.
async fn write_report(
    dir: &Path,
    stem: &str,
    id: String,
    draft: &Draft,
    channel: &dyn Channel,
) -> Result<SavedReport, StorageError> {
    let mut photo_files = Vec::with_capacity(draft.photos.len());
    for (i, photo) in draft.photos.iter().enumerate() {
        let remote = channel.fetch_file(&photo.file_id).await?;
        let name = format!("{stem}_image_{}{}", i + 1, extension(&remote.path));
        tokio::fs::write(dir.join(&name), &remote.bytes).await?;
        photo_files.push(name);
    }

    let report = StoredReport {
        id,
        subject_id: draft.subject_id.clone(),
        chat_id: draft.chat_id.clone(),
        display_name: draft.display_name.clone(),
        category: draft.category.clone(),
        sex: draft.sex.clone(),
        location: draft.location.clone(),
        comment: draft.comment.clone(),
        created_at: draft.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        photo_files,
        category_label: draft
            .category
            .as_ref()
            .map(Category::plain_label)
            .unwrap_or("Unknown")
            .to_string(),
        sex_label: draft
            .sex
            .as_ref()
            .map(Sex::plain_label)
            .unwrap_or("Unknown")
            .to_string(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(dir.join(format!("{stem}_data.json")), json.as_bytes()).await?;

    tracing::info!(
        dir = %dir.display(),
        photos = report.photo_files.len(),
        "Report saved"
    );

    Ok(SavedReport {
        dir: dir.to_path_buf(),
        report,
        json,
    })
}

/// File extension (with dot) of a remote path, `.jpg` when it has none.
fn extension(remote_path: &str) -> String {
    Path::new(remote_path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| ".jpg".to_string())
}

/// Make a key safe for file names. Missing keys become `unknown`.
fn slug(key: Option<&str>) -> String {
    let cleaned: String = key
        .unwrap_or("")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
