// Font Scanner Port
// Abstraction over the recursive directory walk

use crate::domain::FontFile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Scan task failed: {0}")]
    TaskFailed(String),
}

/// Font Scanner trait
///
/// Implementations:
/// - WalkDirScanner: walks the real filesystem (infra-system)
#[async_trait]
pub trait FontScanner: Send + Sync {
    /// Recursively list every regular file under `root` whose lowercase
    /// extension is `ttf`, in a stable order
    ///
    /// # Errors
    /// - ScanError::RootNotFound if `root` does not exist
    /// - ScanError::NotADirectory if `root` is a file
    async fn scan(&self, root: &Path) -> Result<Vec<FontFile>, ScanError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

#[cfg(any(test, feature = "mocks"))]
pub mod mocks {
    use super::*;

    /// Returns a fixed candidate list, applying the same name filter as a real scan
    pub struct MockFontScanner {
        candidates: Vec<PathBuf>,
    }

    impl MockFontScanner {
        pub fn new<I, P>(candidates: I) -> Self
        where
            I: IntoIterator<Item = P>,
            P: Into<PathBuf>,
        {
            Self {
                candidates: candidates.into_iter().map(Into::into).collect(),
            }
        }
    }

    #[async_trait]
    impl FontScanner for MockFontScanner {
        async fn scan(&self, root: &Path) -> Result<Vec<FontFile>, ScanError> {
            Ok(self
                .candidates
                .iter()
                .filter(|p| FontFile::matches(p))
                .map(|p| FontFile::new(root.join(p)))
                .collect())
        }
    }

    /// Always fails, for error propagation tests
    pub struct FailingFontScanner;

    #[async_trait]
    impl FontScanner for FailingFontScanner {
        async fn scan(&self, root: &Path) -> Result<Vec<FontFile>, ScanError> {
            Err(ScanError::RootNotFound(root.to_path_buf()))
        }
    }
}
