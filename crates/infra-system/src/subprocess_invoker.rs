// Subprocess invoker implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use fontcut_core::domain::{FontFile, SubsetOptions, ToolCommand};
use fontcut_core::port::subset_invoker::{
    InvocationResult, InvocationStatus, InvokeError, SubsetInvoker,
};
use fontcut_core::port::TimeProvider;

/// Subprocess invoker
/// Runs the subsetting tool as a child process in the current directory.
/// The child inherits the whole environment unless an allowlist is set.
pub struct SubprocessInvoker {
    time_provider: Arc<dyn TimeProvider>,
    program: ToolCommand,
    env_allowlist: Option<Vec<String>>,
    timeout: Option<Duration>,
}

impl SubprocessInvoker {
    /// Create a new subprocess invoker
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    /// * `program` - Subsetting executable, e.g. `pyftsubset`
    ///
    /// # Example
    /// ```ignore
    /// let invoker = SubprocessInvoker::new(
    ///     Arc::new(SystemTimeProvider),
    ///     ToolCommand::new("pyftsubset")?,
    /// )
    /// .with_timeout(Some(Duration::from_secs(120)));
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>, program: ToolCommand) -> Self {
        Self {
            time_provider,
            program,
            env_allowlist: None,
            timeout: None,
        }
    }

    /// Pass only these environment variables to the tool (`None` inherits all)
    pub fn with_env_allowlist(mut self, env_allowlist: Option<Vec<String>>) -> Self {
        self.env_allowlist = env_allowlist;
        self
    }

    /// Kill the tool if it runs longer than this
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Filter environment variables to allowlist only
    fn filter_env<I>(allowlist: &[String], env: I) -> HashMap<OsString, OsString>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        env.into_iter()
            .filter(|(k, _)| {
                allowlist
                    .iter()
                    .any(|allowed| OsStr::new(allowed) == k.as_os_str())
            })
            .collect()
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(&self, args: &[OsString]) -> Result<std::process::Output, InvokeError> {
        let mut command = Command::new(self.program.as_str());
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(allowlist) = &self.env_allowlist {
            let filtered_env = Self::filter_env(allowlist, std::env::vars_os());
            command.env_clear().envs(&filtered_env);
        }

        let child = command
            .spawn()
            .map_err(|e| InvokeError::SpawnFailed(format!("{}: {}", self.program, e)))?;

        if let Some(limit) = self.timeout {
            // Dropping the timed-out future drops the child, which kills it
            match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(InvokeError::IoError(e.to_string())),
                Err(_) => Err(InvokeError::Timeout(limit.as_millis() as u64)),
            }
        } else {
            child
                .wait_with_output()
                .await
                .map_err(|e| InvokeError::IoError(e.to_string()))
        }
    }

    /// Build invocation result from process output
    fn build_result(&self, output: std::process::Output, duration_ms: i64) -> InvocationResult {
        let status = if output.status.success() {
            InvocationStatus::Success
        } else {
            InvocationStatus::Failed
        };

        InvocationResult {
            status,
            exit_code: output.status.code(),
            duration_ms,
            stdout: Some(String::from_utf8_lossy(&output.stdout).to_string()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        }
    }
}

#[async_trait]
impl SubsetInvoker for SubprocessInvoker {
    async fn invoke(
        &self,
        font: &FontFile,
        options: &SubsetOptions,
    ) -> Result<InvocationResult, InvokeError> {
        let args = options.to_args(font);
        let start_time = self.time_provider.now_millis();

        info!(
            program = %self.program,
            font = %font,
            args = ?args,
            timeout_ms = ?self.timeout.map(|t| t.as_millis()),
            "Starting subsetting tool"
        );

        let output = self.spawn_and_wait(&args).await?;

        let duration_ms = self.time_provider.now_millis() - start_time;
        let result = self.build_result(output, duration_ms);

        debug!(
            font = %font,
            duration_ms = %duration_ms,
            exit_code = ?result.exit_code,
            status = ?result.status,
            "Subsetting tool exited"
        );

        Ok(result)
    }
}
