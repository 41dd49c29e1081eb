// Recursive font scanner backed by walkdir
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use fontcut_core::domain::FontFile;
use fontcut_core::port::font_scanner::{FontScanner, ScanError};

/// Walks the whole tree under the root, no depth limit.
///
/// Symlinks are not followed, so a symlinked font is not a regular file and is
/// skipped. Entries are sorted by file name within each directory.
#[derive(Debug, Default, Clone)]
pub struct WalkDirScanner;

impl WalkDirScanner {
    pub fn new() -> Self {
        Self
    }

    /// Blocking walk (run on the blocking pool)
    fn walk(root: &Path) -> Vec<FontFile> {
        let mut fonts = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable subdirectory: skip it, keep walking
                    warn!(error = %e, path = ?e.path(), "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if FontFile::matches(entry.path()) {
                debug!(path = %entry.path().display(), "Found font");
                fonts.push(FontFile::new(entry.into_path()));
            }
        }

        fonts
    }
}

#[async_trait]
impl FontScanner for WalkDirScanner {
    async fn scan(&self, root: &Path) -> Result<Vec<FontFile>, ScanError> {
        let metadata = match tokio::fs::metadata(root).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::RootNotFound(root.to_path_buf()));
            }
            Err(e) => return Err(ScanError::IoError(e.to_string())),
        };
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let root: PathBuf = root.to_path_buf();
        tokio::task::spawn_blocking(move || Self::walk(&root))
            .await
            .map_err(|e| ScanError::TaskFailed(e.to_string()))
    }
}
