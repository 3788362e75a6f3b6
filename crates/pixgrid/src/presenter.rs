use pixgrid_common::Colors;
use pixgrid_core::Grid;
use serde_json::{Value, json};

use crate::commands::{OutputFormat, ScriptOptions};
use crate::error::{CliError, InterpreterError};
use crate::interpreter::{Outcome, ScriptReport};
use crate::snapshot_dto::{GridSnapshotDto, RunSummaryDto};

/// Trait for presenting output to the user.
///
/// Keeps the run loops format-agnostic: the same calls produce
/// human-readable text or machine-readable JSON.
pub trait Presenter {
    /// Present the result of a single interactive command.
    fn present_outcome(&self, outcome: &Outcome, dry_run: bool);

    /// Present the summary of a script run.
    fn present_report(&self, report: &ScriptReport, grid: Option<&Grid>, options: ScriptOptions);

    /// Present the grid itself.
    fn present_grid(&self, grid: &Grid);

    /// Present a failure of one interactive command.
    fn present_interpreter_error(&self, error: &InterpreterError);

    /// Present a fatal CLI error.
    fn present_error(&self, error: &CliError);

    /// Present a dim/info message.
    fn present_info(&self, message: &str);
}

/// Text presenter for human-readable output.
pub struct TextPresenter;

impl TextPresenter {
    fn saved_message(destination: &str, dry_run: bool) -> String {
        if dry_run {
            format!("Would save grid to {} (dry run)", destination)
        } else {
            format!("Saved grid to {}", destination)
        }
    }

    fn print_error_with_suggestion(message: &str, suggestion: Option<&str>, retryable: bool) {
        eprintln!("{} {}", Colors::error("Error:"), message);
        if let Some(suggestion) = suggestion {
            eprintln!("{} {}", Colors::dim("Suggestion:"), suggestion);
        }
        if retryable {
            eprintln!(
                "{}",
                Colors::dim("(This error may be transient - retry may succeed)")
            );
        }
    }
}

impl Presenter for TextPresenter {
    fn present_outcome(&self, outcome: &Outcome, dry_run: bool) {
        match outcome {
            Outcome::Initialized { width, height } => {
                println!("{} Created {}x{} grid", Colors::success("✓"), width, height);
            }
            Outcome::Saved { destination } => {
                println!(
                    "{} {}",
                    Colors::success("✓"),
                    Self::saved_message(destination, dry_run)
                );
            }
            Outcome::Drawn(_) | Outcome::Ignored => {}
        }
    }

    fn present_report(&self, report: &ScriptReport, grid: Option<&Grid>, options: ScriptOptions) {
        for destination in &report.saved {
            println!(
                "{} {}",
                Colors::success("✓"),
                Self::saved_message(destination, options.dry_run)
            );
        }
        if options.print {
            match grid {
                Some(grid) => self.present_grid(grid),
                None => self.present_info("No grid to print"),
            }
        }
    }

    fn present_grid(&self, grid: &Grid) {
        println!("{}", grid.render());
    }

    fn present_interpreter_error(&self, error: &InterpreterError) {
        Self::print_error_with_suggestion(
            &error.to_string(),
            Some(&error.suggestion()),
            error.is_retryable(),
        );
    }

    fn present_error(&self, error: &CliError) {
        if let CliError::Failures { failures, .. } = error {
            for failure in failures {
                eprintln!("{} {}", Colors::error("Error:"), failure);
            }
            eprintln!("{}", Colors::bold(&error.to_string()));
            return;
        }
        Self::print_error_with_suggestion(
            &error.to_string(),
            error.suggestion().as_deref(),
            error.is_retryable(),
        );
    }

    fn present_info(&self, message: &str) {
        println!("{}", Colors::dim(message));
    }
}

/// JSON presenter for machine-readable output.
pub struct JsonPresenter;

impl JsonPresenter {
    fn print(value: &Value) {
        println!("{}", serde_json::to_string(value).unwrap_or_default());
    }
}

impl Presenter for JsonPresenter {
    fn present_outcome(&self, outcome: &Outcome, dry_run: bool) {
        let value = match outcome {
            Outcome::Ignored => json!({ "outcome": "ignored" }),
            Outcome::Initialized { width, height } => json!({
                "outcome": "initialized",
                "width": width,
                "height": height
            }),
            Outcome::Drawn(kind) => json!({
                "outcome": "drawn",
                "command": kind.letter().to_string()
            }),
            Outcome::Saved { destination } => json!({
                "outcome": "saved",
                "destination": destination,
                "dry_run": dry_run
            }),
        };
        Self::print(&value);
    }

    fn present_report(&self, report: &ScriptReport, grid: Option<&Grid>, options: ScriptOptions) {
        let summary = RunSummaryDto::new(report, grid, options.dry_run);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
    }

    fn present_grid(&self, grid: &Grid) {
        let value = serde_json::to_value(GridSnapshotDto::from(grid)).unwrap_or_default();
        Self::print(&value);
    }

    fn present_interpreter_error(&self, error: &InterpreterError) {
        eprintln!("{}", error.to_json());
    }

    fn present_error(&self, error: &CliError) {
        // Collected failures are already part of the run summary on stdout.
        if matches!(error, CliError::Failures { .. }) {
            return;
        }
        eprintln!("{}", error.to_json());
    }

    fn present_info(&self, message: &str) {
        Self::print(&json!({ "info": message }));
    }
}

/// Create a presenter based on the output format.
pub fn create_presenter(format: OutputFormat) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Json => Box::new(JsonPresenter),
        OutputFormat::Text => Box::new(TextPresenter),
    }
}
