// Preflight checks run before any font is touched

use crate::domain::SubsetOptions;
use crate::error::{AppError, Result};
use std::fmt;
use std::path::PathBuf;

/// Problem found before the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightIssue {
    /// Character list does not exist (relative to the working directory)
    TextFileMissing(PathBuf),
    /// Character list path exists but is a directory
    TextFileNotAFile(PathBuf),
}

impl fmt::Display for PreflightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightIssue::TextFileMissing(path) => {
                write!(f, "character list {} does not exist", path.display())
            }
            PreflightIssue::TextFileNotAFile(path) => {
                write!(f, "character list {} is not a file", path.display())
            }
        }
    }
}

/// Outcome of all preflight checks
#[derive(Debug, Clone, Default)]
pub struct Preflight {
    issues: Vec<PreflightIssue>,
}

impl Preflight {
    pub fn check(options: &SubsetOptions) -> Self {
        let mut issues = Vec::new();
        let text_file = &options.text_file;
        if !text_file.exists() {
            issues.push(PreflightIssue::TextFileMissing(text_file.clone()));
        } else if !text_file.is_file() {
            issues.push(PreflightIssue::TextFileNotAFile(text_file.clone()));
        }
        Self { issues }
    }

    pub fn issues(&self) -> &[PreflightIssue] {
        &self.issues
    }

    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// First issue as a configuration error
    pub fn into_result(self) -> Result<()> {
        match self.issues.into_iter().next() {
            Some(issue) => Err(AppError::Config(issue.to_string())),
            None => Ok(()),
        }
    }
}
