//! Command grammar: one letter followed by whitespace-separated arguments.

use crate::error::{InterpreterError, NON_POSITIVE_DIMENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Init,
    Pixel,
    Vertical,
    Save,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Init,
        CommandKind::Pixel,
        CommandKind::Vertical,
        CommandKind::Save,
    ];

    /// Resolves a command letter. Matching is case-sensitive.
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "I" => Some(CommandKind::Init),
            "L" => Some(CommandKind::Pixel),
            "V" => Some(CommandKind::Vertical),
            "S" => Some(CommandKind::Save),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CommandKind::Init => 'I',
            CommandKind::Pixel => 'L',
            CommandKind::Vertical => 'V',
            CommandKind::Save => 'S',
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Init => "I X Y",
            CommandKind::Pixel => "L X Y C",
            CommandKind::Vertical => "V X Y1 Y2 C",
            CommandKind::Save => "S NAME",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Init => "Create an X-column, Y-row grid filled with O",
            CommandKind::Pixel => "Set the pixel at column X, row Y to C",
            CommandKind::Vertical => "Set column X to C from row Y1 up to, but not including, row Y2",
            CommandKind::Save => "Write the grid to the file NAME",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            CommandKind::Init => 2,
            CommandKind::Pixel => 3,
            CommandKind::Vertical => 4,
            CommandKind::Save => 1,
        }
    }

    fn malformed(self, reason: impl Into<String>) -> InterpreterError {
        InterpreterError::MalformedCommand {
            command: self.letter(),
            reason: reason.into(),
            usage: self.usage(),
        }
    }
}

/// A parsed command with typed arguments.
///
/// Coordinates are kept exactly as written (one-based); the interpreter
/// shifts them before touching the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { width: i64, height: i64 },
    Pixel { x: i64, y: i64, color: String },
    Vertical { x: i64, y1: i64, y2: i64, color: String },
    Save { destination: String },
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Init { .. } => CommandKind::Init,
            Command::Pixel { .. } => CommandKind::Pixel,
            Command::Vertical { .. } => CommandKind::Vertical,
            Command::Save { .. } => CommandKind::Save,
        }
    }

    /// Coerces raw arguments into a command of the given kind.
    pub fn parse(kind: CommandKind, args: &[&str]) -> Result<Self, InterpreterError> {
        if args.len() != kind.arity() {
            return Err(kind.malformed(format!(
                "expected {} argument(s), got {}",
                kind.arity(),
                args.len()
            )));
        }

        let command = match kind {
            CommandKind::Init => {
                let (Ok(width), Ok(height)) =
                    (args[0].parse::<i64>(), args[1].parse::<i64>())
                else {
                    return Err(InterpreterError::InvalidDimension {
                        width: args[0].to_string(),
                        height: args[1].to_string(),
                        reason: NON_POSITIVE_DIMENSIONS.to_string(),
                    });
                };
                Command::Init { width, height }
            }
            CommandKind::Pixel => Command::Pixel {
                x: coordinate(kind, args[0])?,
                y: coordinate(kind, args[1])?,
                color: args[2].to_string(),
            },
            CommandKind::Vertical => Command::Vertical {
                x: coordinate(kind, args[0])?,
                y1: coordinate(kind, args[1])?,
                y2: coordinate(kind, args[2])?,
                color: args[3].to_string(),
            },
            CommandKind::Save => Command::Save {
                destination: args[0].to_string(),
            },
        };
        Ok(command)
    }
}

fn coordinate(kind: CommandKind, token: &str) -> Result<i64, InterpreterError> {
    token
        .parse()
        .map_err(|_| kind.malformed(format!("'{}' is not an integer coordinate", token)))
}

/// Splits a line into its command letter and arguments.
///
/// Returns `None` for blank lines.
pub fn tokenize(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut tokens = line.split_whitespace();
    let letter = tokens.next()?;
    Some((letter, tokens.collect()))
}
