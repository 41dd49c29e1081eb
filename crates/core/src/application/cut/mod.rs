// Cut Service - scan the tree, then run the subsetting tool on each font, one at a time

mod preflight;

pub use preflight::{Preflight, PreflightIssue};

use crate::application::constants::{DEFAULT_SCAN_ROOT, DEFAULT_TEXT_FILE, MAX_STDERR_BYTES};
use crate::domain::{tail_lossy, CutReport, FontFile, InvocationOutcome, SubsetOptions};
use crate::error::Result;
use crate::port::{FontScanner, InvocationStatus, InvokeError, SubsetInvoker, TimeProvider};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Run configuration
#[derive(Debug, Clone)]
pub struct CutConfig {
    pub root: PathBuf,
    pub options: SubsetOptions,
    /// List matches without invoking the tool
    pub dry_run: bool,
    /// Treat preflight issues as fatal
    pub strict: bool,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SCAN_ROOT),
            options: SubsetOptions::new(DEFAULT_TEXT_FILE),
            dry_run: false,
            strict: false,
        }
    }
}

/// Cut Service
pub struct CutService {
    scanner: Arc<dyn FontScanner>,
    invoker: Arc<dyn SubsetInvoker>,
    time_provider: Arc<dyn TimeProvider>,
    config: CutConfig,
}

impl CutService {
    pub fn new(
        scanner: Arc<dyn FontScanner>,
        invoker: Arc<dyn SubsetInvoker>,
        time_provider: Arc<dyn TimeProvider>,
        config: CutConfig,
    ) -> Self {
        Self {
            scanner,
            invoker,
            time_provider,
            config,
        }
    }

    /// Check the environment before touching any font
    ///
    /// Issues are logged. In strict mode the first issue is returned as an error.
    pub fn preflight(&self) -> Result<Preflight> {
        let preflight = Preflight::check(&self.config.options);
        for issue in preflight.issues() {
            warn!(issue = %issue, "Preflight check failed");
        }
        if self.config.strict {
            preflight.clone().into_result()?;
        }
        Ok(preflight)
    }

    /// Scan, then invoke the tool once per match, strictly in sequence.
    ///
    /// A failing invocation never stops the run; it is recorded in the report.
    pub async fn run(&self) -> Result<CutReport> {
        self.preflight()?;

        let root = &self.config.root;
        info!(root = %root.display(), "Scanning for fonts");
        let fonts = self.scanner.scan(root).await?;
        info!(root = %root.display(), count = fonts.len(), "Scan completed");

        let mut report = CutReport::new(self.config.dry_run);
        for font in fonts {
            if self.config.dry_run {
                info!(font = %font, "Dry run, skipping");
                report.push(font, InvocationOutcome::Skipped, 0);
                continue;
            }
            let (outcome, duration_ms) = self.cut_one(&font).await;
            report.push(font, outcome, duration_ms);
        }

        info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Run completed"
        );

        Ok(report)
    }

    async fn cut_one(&self, font: &FontFile) -> (InvocationOutcome, i64) {
        let start_time = self.time_provider.now_millis();
        debug!(font = %font, "Invoking subsetting tool");

        let (outcome, duration_ms) = match self.invoker.invoke(font, &self.config.options).await {
            Ok(result) => {
                let outcome = match result.status {
                    InvocationStatus::Success => InvocationOutcome::Succeeded {
                        exit_code: result.exit_code,
                    },
                    InvocationStatus::Failed => InvocationOutcome::Failed {
                        exit_code: result.exit_code,
                        stderr: tail_lossy(
                            result.stderr.as_deref().unwrap_or_default(),
                            MAX_STDERR_BYTES,
                        ),
                    },
                };
                (outcome, result.duration_ms)
            }
            Err(e) => {
                let outcome = match e {
                    InvokeError::SpawnFailed(reason) | InvokeError::IoError(reason) => {
                        InvocationOutcome::SpawnFailed { reason }
                    }
                    InvokeError::Timeout(timeout_ms) => InvocationOutcome::TimedOut { timeout_ms },
                };
                (outcome, self.time_provider.now_millis() - start_time)
            }
        };

        self.log_outcome(font, &outcome, duration_ms);
        (outcome, duration_ms)
    }

    fn log_outcome(&self, font: &FontFile, outcome: &InvocationOutcome, duration_ms: i64) {
        match outcome {
            InvocationOutcome::Succeeded { .. } => {
                info!(font = %font, duration_ms, "Font subset written");
            }
            InvocationOutcome::Failed { exit_code, stderr } => {
                warn!(font = %font, exit_code = ?exit_code, stderr = %stderr, "Subsetting tool failed");
            }
            other => {
                warn!(font = %font, outcome = %other, "Subsetting tool did not complete");
            }
        }
    }
}
