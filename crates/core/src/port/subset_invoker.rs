// Subset Invoker Port
// Abstraction for running the external font-subsetting tool on one file

use crate::domain::{FontFile, SubsetOptions};
use async_trait::async_trait;
use thiserror::Error;

/// Result of one tool invocation that ran to completion
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub status: InvocationStatus,
    pub duration_ms: i64,
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Exit status of a completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStatus {
    Success,
    Failed,
}

/// Invocation errors (the tool did not run to completion)
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Process timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Subset Invoker trait
///
/// Implementations:
/// - SubprocessInvoker: spawns the configured executable (infra-system)
#[async_trait]
pub trait SubsetInvoker: Send + Sync {
    /// Run the tool once for `font` with the fixed flag set and wait for it
    ///
    /// A non-zero exit is NOT an error: it comes back as
    /// `InvocationStatus::Failed` so the caller can keep going.
    ///
    /// # Errors
    /// - InvokeError::SpawnFailed if the executable cannot be started
    /// - InvokeError::Timeout if a configured timeout elapses
    async fn invoke(
        &self,
        font: &FontFile,
        options: &SubsetOptions,
    ) -> Result<InvocationResult, InvokeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

#[cfg(any(test, feature = "mocks"))]
pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::ffi::OsString;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Mock invoker behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always exit 0
        Success,
        /// Exit with this code for the listed paths, 0 for the rest
        FailFor(HashSet<PathBuf>, i32),
        /// Never start
        SpawnFail(String),
        /// Always time out
        Timeout(u64),
    }

    /// Records every invocation (font + rendered argv) in call order
    pub struct RecordingInvoker {
        behavior: MockBehavior,
        calls: Arc<Mutex<Vec<(FontFile, Vec<OsString>)>>>,
    }

    impl RecordingInvoker {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        pub fn failing_for<I, P>(paths: I, exit_code: i32) -> Self
        where
            I: IntoIterator<Item = P>,
            P: Into<PathBuf>,
        {
            Self::new(MockBehavior::FailFor(
                paths.into_iter().map(Into::into).collect(),
                exit_code,
            ))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls(&self) -> Vec<(FontFile, Vec<OsString>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubsetInvoker for RecordingInvoker {
        async fn invoke(
            &self,
            font: &FontFile,
            options: &SubsetOptions,
        ) -> Result<InvocationResult, InvokeError> {
            self.calls
                .lock()
                .unwrap()
                .push((font.clone(), options.to_args(font)));

            let exit_code = match &self.behavior {
                MockBehavior::Success => 0,
                MockBehavior::FailFor(paths, code) if paths.contains(font.path()) => *code,
                MockBehavior::FailFor(..) => 0,
                MockBehavior::SpawnFail(msg) => return Err(InvokeError::SpawnFailed(msg.clone())),
                MockBehavior::Timeout(ms) => return Err(InvokeError::Timeout(*ms)),
            };

            Ok(InvocationResult {
                status: if exit_code == 0 {
                    InvocationStatus::Success
                } else {
                    InvocationStatus::Failed
                },
                duration_ms: 1,
                exit_code: Some(exit_code),
                stdout: None,
                stderr: (exit_code != 0).then(|| format!("mock failure for {}", font)),
            })
        }
    }
}
