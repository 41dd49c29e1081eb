//! Run summary printed to stdout

use clap::ValueEnum;
use colored::Colorize;
use fontcut_core::domain::{CutReport, InvocationOutcome};
use tabled::{Table, Tabled};

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Font")]
    font: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Time (ms)")]
    duration_ms: i64,
}

/// Plain table, one row per font in scan order
pub fn render_table(report: &CutReport) -> String {
    let rows: Vec<ReportRow> = report
        .files
        .iter()
        .map(|f| ReportRow {
            font: f.font.to_string(),
            result: f.outcome.to_string(),
            duration_ms: f.duration_ms,
        })
        .collect();
    Table::new(rows).to_string()
}

pub fn print_table(report: &CutReport) {
    if report.total() == 0 {
        println!("{}", "No .ttf files found".yellow());
        return;
    }

    println!("{}", render_table(report));
    println!();

    for file in &report.files {
        if let InvocationOutcome::Failed { stderr, .. } = &file.outcome {
            if !stderr.is_empty() {
                println!("{} {}", "✗".red(), file.font.to_string().bold());
                println!("{}", stderr);
                println!();
            }
        }
    }

    if report.dry_run {
        println!(
            "  {} {} fonts would be subset (dry run)",
            "○".yellow(),
            report.skipped()
        );
        return;
    }

    println!("  {} {} subset", "✓".green(), report.succeeded());
    if report.failed() > 0 {
        println!("  {} {} failed", "✗".red(), report.failed());
    }
}

pub fn print_json(report: &CutReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
