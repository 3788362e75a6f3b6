//! Interpreter and CLI errors with structured context.
//!
//! Every error carries a numeric code, a category, and an actionable
//! suggestion so that scripted callers can react without parsing messages.
//! Exit codes follow UNIX sysexits.h.

use std::io;

use pixgrid_common::ErrorCategory;
use pixgrid_common::error_codes;
use pixgrid_core::GridError;
use serde_json::{Value, json};
use thiserror::Error;

use crate::storage::StorageError;

pub const NON_POSITIVE_DIMENSIONS: &str = "width and height must be positive integers";

pub const UNINITIALIZED_MESSAGE: &str =
    "No grid initialized. Start with the command I X Y.";

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("Invalid grid dimensions {width}x{height}: {reason}")]
    InvalidDimension {
        width: String,
        height: String,
        reason: String,
    },

    #[error("Pixel at column {x}, row {y} is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("No grid initialized. Start with the command I X Y.")]
    Uninitialized { command: char },

    #[error("Malformed {command} command: {reason} (usage: {usage})")]
    MalformedCommand {
        command: char,
        reason: String,
        usage: &'static str,
    },

    #[error("Failed to save grid to {destination}: {source}")]
    StorageWrite {
        destination: String,
        #[source]
        source: StorageError,
    },
}

/// Grid errors carry zero-based cells; callers see one-based coordinates.
impl From<GridError> for InterpreterError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidDimension { width, height } => InterpreterError::InvalidDimension {
                width,
                height,
                reason: NON_POSITIVE_DIMENSIONS.to_string(),
            },
            GridError::TooLarge {
                width,
                height,
                limit,
            } => InterpreterError::InvalidDimension {
                width: width.to_string(),
                height: height.to_string(),
                reason: format!("the grid may hold at most {} pixels", limit),
            },
            GridError::OutOfBounds {
                col,
                row,
                width,
                height,
            } => InterpreterError::OutOfBounds {
                x: col.saturating_add(1),
                y: row.saturating_add(1),
                width,
                height,
            },
        }
    }
}

impl InterpreterError {
    pub fn code(&self) -> i32 {
        match self {
            InterpreterError::InvalidDimension { .. } => error_codes::INVALID_DIMENSION,
            InterpreterError::OutOfBounds { .. } => error_codes::OUT_OF_BOUNDS,
            InterpreterError::Uninitialized { .. } => error_codes::UNINITIALIZED,
            InterpreterError::MalformedCommand { .. } => error_codes::MALFORMED_COMMAND,
            InterpreterError::StorageWrite { .. } => error_codes::STORAGE_WRITE,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        error_codes::category_for_code(self.code())
    }

    pub fn context(&self) -> Value {
        match self {
            InterpreterError::InvalidDimension {
                width,
                height,
                reason,
            } => json!({
                "width": width,
                "height": height,
                "reason": reason
            }),
            InterpreterError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => json!({
                "x": x,
                "y": y,
                "width": width,
                "height": height
            }),
            InterpreterError::Uninitialized { command } => json!({
                "command": command.to_string()
            }),
            InterpreterError::MalformedCommand {
                command,
                reason,
                usage,
            } => json!({
                "command": command.to_string(),
                "reason": reason,
                "usage": usage
            }),
            InterpreterError::StorageWrite {
                destination,
                source,
            } => json!({
                "destination": destination,
                "reason": source.to_string()
            }),
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            InterpreterError::InvalidDimension { .. } => {
                "Use positive whole numbers, e.g. 'I 5 6' for 5 columns and 6 rows.".to_string()
            }
            InterpreterError::OutOfBounds { width, height, .. } => format!(
                "Coordinates are 1-based: X must be 1..={} and Y must be 1..={}.",
                width, height
            ),
            InterpreterError::Uninitialized { .. } => {
                "Issue 'I X Y' to create a grid before drawing or saving.".to_string()
            }
            InterpreterError::MalformedCommand { usage, .. } => {
                format!("Write the command as '{}'.", usage)
            }
            InterpreterError::StorageWrite { .. } => {
                "Check that the directory exists and is writable.".to_string()
            }
        }
    }

    /// Returns whether retrying the same command could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InterpreterError::StorageWrite { .. })
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.to_string(),
            "category": self.category().as_str(),
            "retryable": self.is_retryable(),
            "context": self.context(),
            "suggestion": self.suggestion()
        })
    }
}

/// An interpreter failure tied to the script line that caused it.
#[derive(Error, Debug)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    /// One-based line number.
    pub line: usize,
    pub text: String,
    #[source]
    pub source: InterpreterError,
}

impl ScriptError {
    pub fn to_json(&self) -> Value {
        let mut value = self.source.to_json();
        value["line"] = json!(self.line);
        value["text"] = json!(self.text);
        value
    }
}

/// Errors surfaced by the `pixgrid` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("{} of {total} command(s) failed", .failures.len())]
    Failures {
        failures: Vec<ScriptError>,
        total: usize,
    },

    #[error("Failed to read commands from {source_name}: {source}")]
    ReadInput {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    pub fn code(&self) -> i32 {
        match self {
            CliError::Script(e) => e.source.code(),
            CliError::Failures { failures, .. } => failures
                .first()
                .map(|e| e.source.code())
                .unwrap_or(error_codes::GENERIC_ERROR),
            CliError::ReadInput { .. } => error_codes::SCRIPT_READ,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        error_codes::category_for_code(self.code())
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Script(e) => Some(e.source.suggestion()),
            CliError::Failures { .. } => None,
            CliError::ReadInput { .. } => {
                Some("Check the script path, or pipe commands on stdin.".to_string())
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            CliError::Script(e) => e.source.is_retryable(),
            CliError::Failures { failures, .. } => failures.iter().all(|e| e.source.is_retryable()),
            CliError::ReadInput { .. } => false,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn to_json(&self) -> Value {
        match self {
            CliError::Script(e) => e.to_json(),
            CliError::Failures { failures, total } => json!({
                "code": self.code(),
                "message": self.to_string(),
                "category": self.category().as_str(),
                "total": total,
                "failures": failures.iter().map(ScriptError::to_json).collect::<Vec<_>>()
            }),
            CliError::ReadInput {
                source_name,
                source,
            } => json!({
                "code": self.code(),
                "message": self.to_string(),
                "category": self.category().as_str(),
                "retryable": false,
                "context": {
                    "source": source_name,
                    "reason": source.to_string()
                },
                "suggestion": self.suggestion()
            }),
        }
    }
}
