//! UI helpers for consistent output formatting.

use std::time::Duration;

/// Single-character Unicode glyphs used as status indicators.
pub mod indicators {
    /// Error indicator (✖).
    pub const ERROR: &str = "✖";
    /// Success indicator (✓).
    pub const SUCCESS: &str = "✓";
    /// Unchanged indicator (·).
    pub const UNCHANGED: &str = "·";
}

/// Semantic colour palette for terminal output.
pub mod colors {
    use console::Style;

    /// Red - errors and failed runs.
    pub const fn error() -> Style {
        Style::new().red()
    }

    /// Green - changed runs.
    pub const fn success() -> Style {
        Style::new().green()
    }

    /// White bold - primary/headline text.
    pub const fn primary() -> Style {
        Style::new().white().bold()
    }

    /// Light grey - secondary descriptive text.
    pub const fn secondary() -> Style {
        Style::new().color256(252)
    }

    /// Dark grey - muted/contextual text.
    pub const fn muted() -> Style {
        Style::new().color256(243)
    }

    /// Cyan - accent highlights (commands, file names).
    pub const fn accent() -> Style {
        Style::new().cyan()
    }
}

/// Process exit codes.
pub mod exit {
    /// The run completed.
    pub const SUCCESS: i32 = 0;
    /// The run ended with a failure report.
    pub const FAILED: i32 = 1;
    /// The run was rejected before any remote call.
    pub const ERROR: i32 = 2;
}

/// Prints a red error message to stderr.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        colors::error().apply_to(indicators::ERROR),
        colors::secondary().apply_to(message)
    );
}

const MILLISECOND_NS: u128 = 1_000_000;
const SECOND_NS: u128 = 1_000_000_000;

/// Formats a duration as a human-readable string in ms or s.
#[expect(
    clippy::cast_precision_loss,
    reason = "nanosecond-to-float conversion is display-only; precision loss is acceptable"
)]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();

    if nanos < SECOND_NS {
        format!("{:.1}ms", nanos as f64 / MILLISECOND_NS as f64)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Returns the shared clap colour theme used by all CLI subcommands.
#[must_use]
pub fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{AnsiColor, Effects, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Cyan.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::BrightBlack.into())))
        .valid(Style::new().fg_color(Some(AnsiColor::Green.into())))
        .invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
        .error(
            Style::new()
                .fg_color(Some(AnsiColor::Red.into()))
                .effects(Effects::BOLD),
        )
}
