//! Report output in JSON and text formats.

use std::io::{self, Write};
use std::time::Duration;

use ddstate_core::Report;

use crate::OutputFormat;
use crate::ui::{colors, format_duration, indicators};

/// Writes the report of a run to stdout in the requested format.
pub fn write_report(report: &Report, format: OutputFormat, elapsed: Duration) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    match format {
        OutputFormat::Json => write_json(&mut stdout, report)?,
        OutputFormat::Text => write_text(&mut stdout, report, elapsed)?,
    }

    stdout.flush()?;
    Ok(())
}

fn write_json(out: &mut impl Write, report: &Report) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut impl Write, report: &Report, elapsed: Duration) -> io::Result<()> {
    let (indicator, label) = match report {
        Report::Failure { .. } => (
            colors::error().apply_to(indicators::ERROR),
            colors::error().bold().apply_to("failed"),
        ),
        Report::Success { changed: true, .. } => (
            colors::success().apply_to(indicators::SUCCESS),
            colors::primary().apply_to("changed"),
        ),
        Report::Success { changed: false, .. } => (
            colors::muted().apply_to(indicators::UNCHANGED),
            colors::primary().apply_to("unchanged"),
        ),
    };

    writeln!(
        out,
        "{indicator} {label} {}",
        colors::muted().apply_to(format!("({})", format_duration(elapsed)))
    )?;

    for line in report.message().lines() {
        writeln!(out, "  {}", colors::secondary().apply_to(line))?;
    }

    Ok(())
}
