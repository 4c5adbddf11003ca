//! Year and month folder provisioning.
//!
//! # Layout
//!
//! ```text
//! output_root/
//! └── 2020/
//!     ├── 1 - Jan/
//!     ├── 2 - Feb/
//!     ...
//!     └── 12 - Dec/
//! ```
//!
//! Provisioning is best-effort: an existing folder is expected on re-runs, and
//! any other failure is recorded while the remaining folders are still tried.

use crate::models::{FolderFailure, FolderReport};
use crate::utils::month_folder_name;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

/// Path of the folder holding every month of `year`.
pub fn year_dir(output_root: &Path, year: i32) -> PathBuf {
    output_root.join(year.to_string())
}

/// Path of the folder holding the documents of one month.
pub fn month_dir(output_root: &Path, year: i32, month: u32) -> PathBuf {
    year_dir(output_root, year).join(month_folder_name(month))
}

/// Create `<output_root>/<year>/` and its twelve month folders.
///
/// Never fails: the outcome of every directory is recorded in the returned
/// [`FolderReport`].
#[instrument(level = "info", skip_all, fields(output_root = %output_root.display(), year = year))]
pub async fn provision_folders(output_root: &Path, year: i32) -> FolderReport {
    let mut report = FolderReport::default();

    if let Err(e) = fs::create_dir_all(output_root).await {
        error!(path = %output_root.display(), error = %e, "Failed to create output root");
        report.failed.push(FolderFailure {
            path: output_root.to_path_buf(),
            error: e.to_string(),
        });
    }

    let targets = std::iter::once(year_dir(output_root, year))
        .chain((1..=12).map(|month| month_dir(output_root, year, month)));

    for path in targets {
        match fs::create_dir(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Created directory");
                report.created.push(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !is_dir(&path).await {
                    error!(path = %path.display(), "Path exists but is not a directory");
                    report.failed.push(FolderFailure {
                        path,
                        error: "exists but is not a directory".to_string(),
                    });
                    continue;
                }
                if report.existing.is_empty() {
                    warn!(path = %path.display(), "Folders already exist; reusing them");
                } else {
                    debug!(path = %path.display(), "Directory already exists");
                }
                report.existing.push(path);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to create directory");
                report.failed.push(FolderFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        created = report.created.len(),
        existing = report.existing.len(),
        failed = report.failed.len(),
        "Folder provisioning finished"
    );
    report
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir())
}
