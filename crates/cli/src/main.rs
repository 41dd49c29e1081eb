//! fontcut - subset every `.ttf` under a directory with an external tool
//! (pyftsubset by default), producing web fonts limited to a character list.

mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use fontcut_core::application::constants::{DEFAULT_SCAN_ROOT, DEFAULT_TEXT_FILE, DEFAULT_TOOL};
use fontcut_core::application::{CutConfig, CutService};
use fontcut_core::domain::{CutReport, Flavor, SubsetOptions, ToolCommand};
use fontcut_core::port::time_provider::SystemTimeProvider;
use fontcut_infra_system::{SubprocessInvoker, WalkDirScanner};

use logging::LogFormat;
use report::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "fontcut")]
#[command(about = "Subset every .ttf under a directory into web fonts", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to scan recursively
    #[arg(env = "FONTCUT_ROOT", default_value = DEFAULT_SCAN_ROOT)]
    root: String,

    /// Subsetting executable (name on PATH or a path)
    #[arg(long, env = "FONTCUT_TOOL", default_value = DEFAULT_TOOL)]
    tool: String,

    /// File listing the characters to keep
    #[arg(long, env = "FONTCUT_TEXT_FILE", default_value = DEFAULT_TEXT_FILE)]
    text_file: String,

    /// Output flavor (woff2, woff)
    #[arg(long, env = "FONTCUT_FLAVOR", default_value = "woff2")]
    flavor: Flavor,

    /// Do not pass --with-zopfli
    #[arg(long)]
    no_zopfli: bool,

    /// Pass only these environment variables to the tool, comma-separated
    /// (default: inherit the whole environment)
    #[arg(long, env = "FONTCUT_ENV_ALLOWLIST", value_delimiter = ',')]
    env_allowlist: Option<Vec<String>>,

    /// Kill the tool if one font takes longer than this
    #[arg(long, env = "FONTCUT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// List matching fonts without invoking the tool
    #[arg(long)]
    dry_run: bool,

    /// Fail on a missing character list or on any failed invocation
    #[arg(long)]
    strict: bool,

    /// Log format
    #[arg(long, env = "FONTCUT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Summary format on stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    report: ReportFormat,
}

impl Cli {
    fn cut_config(&self) -> CutConfig {
        CutConfig {
            root: expand_path(&self.root),
            options: SubsetOptions::new(expand_path(&self.text_file))
                .with_flavor(self.flavor)
                .with_zopfli(!self.no_zopfli),
            dry_run: self.dry_run,
            strict: self.strict,
        }
    }

    fn tool_command(&self) -> Result<ToolCommand> {
        let program = shellexpand::tilde(&self.tool).into_owned();
        ToolCommand::new(program).context("Invalid --tool")
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Exit status of the process: any failed invocation is fatal in strict mode
fn exit_status(strict: bool, report: &CutReport) -> Result<()> {
    if strict && !report.is_success() {
        anyhow::bail!(
            "{} of {} invocations failed",
            report.failed(),
            report.total()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    logging::init(cli.log_format)?;
    info!("fontcut v{} starting...", fontcut_core::VERSION);

    // 2. Load configuration
    let config = cli.cut_config();
    let tool = cli.tool_command()?;
    info!(
        root = %config.root.display(),
        tool = %tool,
        flavor = %config.options.flavor,
        text_file = %config.options.text_file.display(),
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let invoker = SubprocessInvoker::new(time_provider.clone(), tool)
        .with_env_allowlist(cli.env_allowlist.clone())
        .with_timeout(cli.timeout());
    let service = CutService::new(
        Arc::new(WalkDirScanner::new()),
        Arc::new(invoker),
        time_provider,
        config,
    );

    // 4. Run
    let report = service.run().await.context("fontcut run failed")?;

    // 5. Summary
    match cli.report {
        ReportFormat::Table => report::print_table(&report),
        ReportFormat::Json => report::print_json(&report)?,
    }

    exit_status(cli.strict, &report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_flags() {
        let cli = Cli::try_parse_from(["fontcut"]).unwrap();
        let config = cli.cut_config();

        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.options.flavor, Flavor::Woff2);
        assert!(config.options.with_zopfli);
        assert_eq!(
            config.options.text_file,
            PathBuf::from("./zh-cn-characters.txt")
        );
        assert_eq!(cli.tool_command().unwrap().as_str(), "pyftsubset");
        assert!(cli.timeout().is_none());
        assert!(cli.env_allowlist.is_none());
        assert!(!config.dry_run);
        assert!(!config.strict);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "fontcut",
            "assets/fonts",
            "--tool",
            "/opt/fonttools/bin/pyftsubset",
            "--text-file",
            "chars.txt",
            "--flavor",
            "woff",
            "--no-zopfli",
            "--timeout-secs",
            "30",
            "--dry-run",
            "--strict",
            "--report",
            "json",
            "--env-allowlist",
            "PATH,CONDA_PREFIX",
        ])
        .unwrap();
        let config = cli.cut_config();

        assert_eq!(config.root, PathBuf::from("assets/fonts"));
        assert_eq!(config.options.flavor, Flavor::Woff);
        assert!(!config.options.with_zopfli);
        assert_eq!(config.options.text_file, PathBuf::from("chars.txt"));
        assert_eq!(cli.timeout(), Some(Duration::from_secs(30)));
        assert!(config.dry_run);
        assert!(config.strict);
        assert_eq!(cli.report, ReportFormat::Json);
        assert_eq!(
            cli.env_allowlist,
            Some(vec!["PATH".to_string(), "CONDA_PREFIX".to_string()])
        );
    }

    fn report_with_failure() -> CutReport {
        use fontcut_core::domain::{FontFile, InvocationOutcome};

        let mut report = CutReport::new(false);
        report.push(
            FontFile::new("a.ttf"),
            InvocationOutcome::Succeeded { exit_code: Some(0) },
            10,
        );
        report.push(
            FontFile::new("b.ttf"),
            InvocationOutcome::Failed {
                exit_code: Some(1),
                stderr: String::new(),
            },
            10,
        );
        report
    }

    #[test]
    fn test_strict_failure_exits_nonzero() {
        let err = exit_status(true, &report_with_failure()).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 invocations failed");
    }

    #[test]
    fn test_lenient_failure_exits_zero() {
        assert!(exit_status(false, &report_with_failure()).is_ok());
    }

    #[test]
    fn test_strict_clean_run_exits_zero() {
        assert!(exit_status(true, &CutReport::new(false)).is_ok());
    }

    #[test]
    fn test_unknown_flavor_rejected() {
        let result = Cli::try_parse_from(["fontcut", "--flavor", "brotli"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_tool_rejected() {
        let cli = Cli::try_parse_from(["fontcut", "--tool", ""]).unwrap();
        assert!(cli.tool_command().is_err());
    }
}
