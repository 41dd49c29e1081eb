//! End-to-end runs: real directory walk, real child processes.
//!
//! The tool is `sh`, so each `.ttf` in the tree is executed as a shell script
//! that appends "<font path> <flags>" to a log file. Non-font files carry the
//! same body; if one ever shows up in the log, it was wrongly invoked.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fontcut_core::application::{CutConfig, CutService};
use fontcut_core::domain::{Flavor, InvocationOutcome, SubsetOptions, ToolCommand};
use fontcut_core::port::time_provider::SystemTimeProvider;
use fontcut_core::AppError;
use fontcut_infra_system::{SubprocessInvoker, WalkDirScanner};

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    log: PathBuf,
    text_file: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fonts");
        fs::create_dir_all(&root).unwrap();
        let log = dir.path().join("invocations.log");
        let text_file = dir.path().join("zh-cn-characters.txt");
        fs::write(&text_file, "永和九年，岁在癸丑").unwrap();
        Self {
            _dir: dir,
            root,
            log,
            text_file,
        }
    }

    /// Write a file whose body records the invocation and then runs `tail`
    fn add(&self, rel: &str, tail: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let body = format!(
            "echo \"$0 $*\" >> '{}'\n{}\n",
            self.log.display(),
            tail
        );
        fs::write(&path, body).unwrap();
        path
    }

    fn logged(&self) -> Vec<String> {
        match fs::read_to_string(&self.log) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn config(&self) -> CutConfig {
        CutConfig {
            root: self.root.clone(),
            options: SubsetOptions::new(&self.text_file),
            dry_run: false,
            strict: false,
        }
    }

    fn service(&self, config: CutConfig, timeout: Option<Duration>) -> CutService {
        let time_provider = Arc::new(SystemTimeProvider);
        let invoker = SubprocessInvoker::new(time_provider.clone(), ToolCommand::new("sh").unwrap())
            .with_timeout(timeout);
        CutService::new(
            Arc::new(WalkDirScanner::new()),
            Arc::new(invoker),
            time_provider,
            config,
        )
    }

    fn expected_line(&self, font: &Path, flavor: &str, zopfli: bool) -> String {
        let mut line = format!("{} --flavor={}", font.display(), flavor);
        if zopfli {
            line.push_str(" --with-zopfli");
        }
        line.push_str(&format!(" --text-file={}", self.text_file.display()));
        line
    }
}

#[tokio::test]
async fn test_every_ttf_invoked_exactly_once() {
    let fx = Fixture::new();
    let a = fx.add("a.ttf", "exit 0");
    let b = fx.add("nested/deeper/B.TTF", "exit 0");
    let c = fx.add("nested/c.Ttf", "exit 0");
    fx.add("nested/readme.txt", "exit 0");
    fx.add("d.otf", "exit 0");
    fx.add("e.ttf.bak", "exit 0");
    fx.add("nested/f.woff2", "exit 0");

    let report = fx.service(fx.config(), None).run().await.unwrap();

    let mut logged = fx.logged();
    logged.sort();
    let mut expected = vec![
        fx.expected_line(&a, "woff2", true),
        fx.expected_line(&b, "woff2", true),
        fx.expected_line(&c, "woff2", true),
    ];
    expected.sort();
    assert_eq!(logged, expected);

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 3);
    assert!(report.is_success());
}

#[tokio::test]
async fn test_invocation_order_is_stable() {
    let fx = Fixture::new();
    fx.add("z.ttf", "exit 0");
    fx.add("m/a.ttf", "exit 0");
    fx.add("b.ttf", "exit 0");

    let report = fx.service(fx.config(), None).run().await.unwrap();

    let order: Vec<PathBuf> = report
        .files
        .iter()
        .map(|f| f.font.path().strip_prefix(&fx.root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        order,
        vec![
            PathBuf::from("b.ttf"),
            PathBuf::from("m/a.ttf"),
            PathBuf::from("z.ttf"),
        ]
    );
    // Log order matches report order: invocations are sequential
    let logged_fonts: Vec<String> = fx
        .logged()
        .iter()
        .map(|l| l.split(' ').next().unwrap().to_string())
        .collect();
    let report_fonts: Vec<String> = report.files.iter().map(|f| f.font.to_string()).collect();
    assert_eq!(logged_fonts, report_fonts);
}

#[tokio::test]
async fn test_woff_flavor_without_zopfli() {
    let fx = Fixture::new();
    let a = fx.add("a.ttf", "exit 0");
    let mut config = fx.config();
    config.options = config.options.with_flavor(Flavor::Woff).with_zopfli(false);

    fx.service(config, None).run().await.unwrap();

    assert_eq!(fx.logged(), vec![fx.expected_line(&a, "woff", false)]);
}

#[tokio::test]
async fn test_failing_font_does_not_stop_the_rest() {
    let fx = Fixture::new();
    fx.add("a.ttf", "exit 0");
    fx.add("b.ttf", "echo 'fontTools.ttLib.TTLibError: Not a TrueType font' >&2\nexit 1");
    fx.add("c.ttf", "exit 0");

    let report = fx.service(fx.config(), None).run().await.unwrap();

    assert_eq!(fx.logged().len(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    match &report.files[1].outcome {
        InvocationOutcome::Failed { exit_code, stderr } => {
            assert_eq!(*exit_code, Some(1));
            assert!(stderr.contains("Not a TrueType font"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_moves_on() {
    let fx = Fixture::new();
    fx.add("a.ttf", "sleep 10");
    fx.add("b.ttf", "exit 0");

    let report = fx
        .service(fx.config(), Some(Duration::from_millis(200)))
        .run()
        .await
        .unwrap();

    assert!(matches!(
        report.files[0].outcome,
        InvocationOutcome::TimedOut { timeout_ms: 200 }
    ));
    assert!(report.files[1].outcome.is_success());
}

#[tokio::test]
async fn test_dry_run_spawns_nothing() {
    let fx = Fixture::new();
    fx.add("a.ttf", "exit 0");
    fx.add("sub/b.ttf", "exit 0");
    let mut config = fx.config();
    config.dry_run = true;

    let report = fx.service(config, None).run().await.unwrap();

    assert!(fx.logged().is_empty());
    assert_eq!(report.skipped(), 2);
}

#[tokio::test]
async fn test_missing_tool_reported_per_font() {
    let fx = Fixture::new();
    fx.add("a.ttf", "exit 0");
    fx.add("b.ttf", "exit 0");
    let time_provider = Arc::new(SystemTimeProvider);
    let invoker = SubprocessInvoker::new(
        time_provider.clone(),
        ToolCommand::new("fontcut-definitely-missing-pyftsubset").unwrap(),
    );
    let service = CutService::new(
        Arc::new(WalkDirScanner::new()),
        Arc::new(invoker),
        time_provider,
        fx.config(),
    );

    let report = service.run().await.unwrap();

    assert_eq!(report.failed(), 2);
    assert!(report
        .files
        .iter()
        .all(|f| matches!(f.outcome, InvocationOutcome::SpawnFailed { .. })));
}

#[tokio::test]
async fn test_strict_requires_text_file() {
    let fx = Fixture::new();
    fx.add("a.ttf", "exit 0");
    let mut config = fx.config();
    config.options = SubsetOptions::new(fx.root.join("no-such-characters.txt"));
    config.strict = true;

    let err = fx.service(config, None).run().await.unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert!(fx.logged().is_empty());
}

#[tokio::test]
async fn test_missing_root_is_an_error() {
    let fx = Fixture::new();
    let mut config = fx.config();
    config.root = fx.root.join("gone");

    let err = fx.service(config, None).run().await.unwrap_err();

    assert!(matches!(err, AppError::Scan(_)));
}

#[tokio::test]
async fn test_report_serializes() {
    let fx = Fixture::new();
    fx.add("a.ttf", "exit 0");

    let report = fx.service(fx.config(), None).run().await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["files"][0]["outcome"]["status"], "SUCCEEDED");
    assert_eq!(json["files"][0]["outcome"]["exit_code"], 0);
}
