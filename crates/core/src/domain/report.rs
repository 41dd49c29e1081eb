// Run Report Domain Model

use super::font::FontFile;
use serde::{Deserialize, Serialize};

/// What happened to one font file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvocationOutcome {
    /// Tool exited with status 0
    Succeeded { exit_code: Option<i32> },
    /// Tool ran but exited non-zero (or was killed by a signal)
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Tool could not be started (not installed, not executable, ...)
    SpawnFailed { reason: String },
    /// Tool exceeded the configured timeout and was killed
    TimedOut { timeout_ms: u64 },
    /// Dry run: tool not invoked
    Skipped,
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Succeeded { .. })
    }

    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            InvocationOutcome::Succeeded { .. } | InvocationOutcome::Skipped
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvocationOutcome::Succeeded { .. } => "OK",
            InvocationOutcome::Failed { .. } => "FAILED",
            InvocationOutcome::SpawnFailed { .. } => "SPAWN_FAILED",
            InvocationOutcome::TimedOut { .. } => "TIMED_OUT",
            InvocationOutcome::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvocationOutcome::Succeeded { .. } => write!(f, "OK"),
            InvocationOutcome::Failed { exit_code, .. } => match exit_code {
                Some(code) => write!(f, "FAILED (exit {})", code),
                None => write!(f, "FAILED (signal)"),
            },
            InvocationOutcome::SpawnFailed { reason } => write!(f, "SPAWN_FAILED ({})", reason),
            InvocationOutcome::TimedOut { timeout_ms } => {
                write!(f, "TIMED_OUT (after {}ms)", timeout_ms)
            }
            InvocationOutcome::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub font: FontFile,
    pub outcome: InvocationOutcome,
    pub duration_ms: i64,
}

/// Result of a whole run, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutReport {
    pub files: Vec<FileReport>,
    pub dry_run: bool,
}

impl CutReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            files: Vec::new(),
            dry_run,
        }
    }

    pub fn push(&mut self, font: FontFile, outcome: InvocationOutcome, duration_ms: i64) {
        self.files.push(FileReport {
            font,
            outcome,
            duration_ms,
        });
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == InvocationOutcome::Skipped)
            .count()
    }

    /// True when no invocation failed (an empty run counts as success)
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Keep at most the last `max_bytes` bytes of `text`, cut on a char boundary.
///
/// Tools such as pyftsubset print long tracebacks; the tail holds the error.
pub fn tail_lossy(text: &str, max_bytes: usize) -> String {
    let text = text.trim_end();
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
