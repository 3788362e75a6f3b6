//! Line-at-a-time command interpreter.
//!
//! The interpreter owns at most one grid. Until an `I` command succeeds it
//! only accepts `I`; afterwards every command is accepted and `I` replaces
//! the grid. Blank lines and unknown command letters are ignored.

use pixgrid_core::Grid;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandKind, tokenize};
use crate::error::{InterpreterError, ScriptError};
use crate::storage::{FileStorage, Storage};

/// What a single line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Initialized { width: usize, height: usize },
    Drawn(CommandKind),
    Saved { destination: String },
}

/// How [`Interpreter::execute_script`] reacts to a failing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    #[default]
    StopOnError,
    KeepGoing,
}

/// Summary of a script run.
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Lines that ran a command successfully.
    pub executed: usize,
    /// Blank lines and unknown command letters.
    pub ignored: usize,
    /// Save destinations in the order they were written.
    pub saved: Vec<String>,
    /// Failed lines; only populated under [`ErrorPolicy::KeepGoing`].
    pub failures: Vec<ScriptError>,
}

impl ScriptReport {
    /// Lines that named a recognized command, whether or not they succeeded.
    pub fn attempted(&self) -> usize {
        self.executed + self.failures.len()
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Ignored => self.ignored += 1,
            Outcome::Saved { destination } => {
                self.executed += 1;
                self.saved.push(destination);
            }
            Outcome::Initialized { .. } | Outcome::Drawn(_) => self.executed += 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct Interpreter<S: Storage = FileStorage> {
    grid: Option<Grid>,
    storage: S,
}

impl Interpreter<FileStorage> {
    pub fn new() -> Self {
        Self::with_storage(FileStorage)
    }
}

impl<S: Storage> Interpreter<S> {
    pub fn with_storage(storage: S) -> Self {
        Self {
            grid: None,
            storage,
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Parses and runs one command line.
    #[tracing::instrument(skip(self), fields(initialized = self.grid.is_some()))]
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, InterpreterError> {
        let Some((letter, args)) = tokenize(line) else {
            return Ok(Outcome::Ignored);
        };

        let Some(kind) = CommandKind::from_letter(letter) else {
            debug!(letter, "Ignoring unrecognized command");
            return Ok(Outcome::Ignored);
        };

        if kind != CommandKind::Init && self.grid.is_none() {
            return Err(InterpreterError::Uninitialized {
                command: kind.letter(),
            });
        }

        let command = Command::parse(kind, &args)?;
        self.execute(command)
    }

    /// Runs an already-parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, InterpreterError> {
        if let Command::Init { width, height } = command {
            let grid = Grid::new(width, height)?;
            info!(width = grid.width(), height = grid.height(), "Grid initialized");
            let outcome = Outcome::Initialized {
                width: grid.width(),
                height: grid.height(),
            };
            self.grid = Some(grid);
            return Ok(outcome);
        }

        let kind = command.kind();
        let Some(grid) = self.grid.as_mut() else {
            return Err(InterpreterError::Uninitialized {
                command: kind.letter(),
            });
        };

        match command {
            Command::Init { .. } => unreachable!("handled above"),
            Command::Pixel { x, y, color } => {
                let (col, row) = match (to_index(x), to_index(y)) {
                    (Some(col), Some(row)) => (col, row),
                    _ => return Err(out_of_bounds(grid, x, y)),
                };
                grid.set_pixel(col, row, color)?;
            }
            Command::Vertical { x, y1, y2, color } => {
                let start = y1.saturating_sub(1);
                let end = y2.saturating_sub(1);
                if start >= end {
                    debug!(x, y1, y2, "Empty vertical segment");
                    return Ok(Outcome::Drawn(kind));
                }
                let (col, start_row, end_row) = match (to_index(x), to_index(y1), to_index(y2)) {
                    (Some(col), Some(start_row), Some(end_row)) => (col, start_row, end_row),
                    _ => return Err(out_of_bounds(grid, x, y1)),
                };
                grid.draw_vertical_segment(col, start_row, end_row, color)?;
            }
            Command::Save { destination } => {
                if let Err(source) = self.storage.save(&destination, grid) {
                    warn!(destination = %destination, error = %source, "Save failed");
                    return Err(InterpreterError::StorageWrite {
                        destination,
                        source,
                    });
                }
                info!(destination = %destination, "Grid saved");
                return Ok(Outcome::Saved { destination });
            }
        }

        Ok(Outcome::Drawn(kind))
    }

    /// Runs every line of a script in order.
    ///
    /// Under [`ErrorPolicy::StopOnError`] the first failure is returned with
    /// its one-based line number. Under [`ErrorPolicy::KeepGoing`] failures
    /// are collected in the report and execution continues.
    pub fn execute_script<I, L>(
        &mut self,
        lines: I,
        policy: ErrorPolicy,
    ) -> Result<ScriptReport, ScriptError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut report = ScriptReport::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match self.execute_line(line) {
                Ok(outcome) => report.record(outcome),
                Err(source) => {
                    let error = ScriptError {
                        line: index + 1,
                        text: line.trim().to_string(),
                        source,
                    };
                    match policy {
                        ErrorPolicy::StopOnError => return Err(error),
                        ErrorPolicy::KeepGoing => {
                            warn!(line = error.line, error = %error.source, "Command failed");
                            report.failures.push(error);
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Converts a one-based coordinate to a zero-based index.
fn to_index(value: i64) -> Option<usize> {
    value
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
}

fn out_of_bounds(grid: &Grid, x: i64, y: i64) -> InterpreterError {
    InterpreterError::OutOfBounds {
        x,
        y,
        width: grid.width(),
        height: grid.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNINITIALIZED_MESSAGE;
    use crate::storage::MemoryStorage;

    fn interpreter() -> Interpreter<MemoryStorage> {
        Interpreter::with_storage(MemoryStorage::new())
    }

    fn rendered(interp: &Interpreter<MemoryStorage>) -> String {
        interp.grid().unwrap().render()
    }

    #[test]
    fn test_commands_before_init_fail() {
        for line in ["L 1 1 A", "V 1 1 2 A", "S out.txt", "L", "S"] {
            let mut interp = interpreter();
            let err = interp.execute_line(line).unwrap_err();
            assert!(
                matches!(err, InterpreterError::Uninitialized { .. }),
                "{line}: {err:?}"
            );
            assert_eq!(err.to_string(), UNINITIALIZED_MESSAGE);
            assert!(!interp.is_initialized());
        }
    }

    #[test]
    fn test_execute_parsed_command_before_init_fails() {
        let mut interp = interpreter();
        let err = interp
            .execute(Command::Save {
                destination: "out.txt".into(),
            })
            .unwrap_err();
        assert!(matches!(err, InterpreterError::Uninitialized { command: 'S' }));
    }

    #[test]
    fn test_blank_and_unknown_lines_are_ignored() {
        let mut interp = interpreter();
        assert_eq!(interp.execute_line("").unwrap(), Outcome::Ignored);
        assert_eq!(interp.execute_line("Z 1 2").unwrap(), Outcome::Ignored);
        assert!(!interp.is_initialized());

        interp.execute_line("I 2 2").unwrap();
        interp.execute_line("L 1 1 X").unwrap();
        let before = rendered(&interp);
        assert_eq!(interp.execute_line("   ").unwrap(), Outcome::Ignored);
        assert_eq!(interp.execute_line("Z").unwrap(), Outcome::Ignored);
        assert_eq!(interp.execute_line("l 2 2 Y").unwrap(), Outcome::Ignored);
        assert_eq!(rendered(&interp), before);
    }

    #[test]
    fn test_init_replaces_grid() {
        let mut interp = interpreter();
        assert_eq!(
            interp.execute_line("I 3 2").unwrap(),
            Outcome::Initialized {
                width: 3,
                height: 2
            }
        );
        interp.execute_line("L 1 1 A").unwrap();
        interp.execute_line("I 2 1").unwrap();
        assert_eq!(rendered(&interp), "OO");
    }

    #[test]
    fn test_invalid_init_keeps_previous_grid() {
        let mut interp = interpreter();
        interp.execute_line("I 2 2").unwrap();
        for line in ["I 0 3", "I -1 2", "I five 6"] {
            let err = interp.execute_line(line).unwrap_err();
            assert!(
                matches!(err, InterpreterError::InvalidDimension { .. }),
                "{line}: {err:?}"
            );
        }
        assert_eq!(rendered(&interp), "OO\nOO");
    }

    #[test]
    fn test_oversized_init_fails_without_replacing_grid() {
        let mut interp = interpreter();
        interp.execute_line("I 2 1").unwrap();
        for line in ["I 9223372036854775807 1", "I 100000 100000", "I 1 2000000"] {
            let err = interp.execute_line(line).unwrap_err();
            assert!(
                matches!(err, InterpreterError::InvalidDimension { .. }),
                "{line}: {err:?}"
            );
        }
        assert_eq!(rendered(&interp), "OO");
    }

    #[test]
    fn test_pixel_uses_one_based_coordinates() {
        let mut interp = interpreter();
        interp.execute_line("I 3 2").unwrap();
        interp.execute_line("L 3 2 A").unwrap();
        assert_eq!(rendered(&interp), "OOO\nOOA");
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let mut interp = interpreter();
        interp.execute_line("I 3 2").unwrap();
        for (line, x, y) in [("L 4 1 A", 4, 1), ("L 1 3 A", 1, 3), ("L 0 1 A", 0, 1)] {
            match interp.execute_line(line).unwrap_err() {
                InterpreterError::OutOfBounds {
                    x: ex,
                    y: ey,
                    width,
                    height,
                } => {
                    assert_eq!((ex, ey, width, height), (x, y, 3, 2), "{line}");
                }
                other => panic!("{line}: unexpected error {other:?}"),
            }
        }
        assert_eq!(rendered(&interp), "OOO\nOOO");
    }

    #[test]
    fn test_vertical_segment_excludes_y2() {
        let mut interp = interpreter();
        interp.execute_line("I 3 6").unwrap();
        interp.execute_line("V 2 3 5 J").unwrap();
        assert_eq!(rendered(&interp), "OOO\nOOO\nOJO\nOJO\nOOO\nOOO");
    }

    #[test]
    fn test_vertical_segment_with_equal_bounds_is_noop() {
        let mut interp = interpreter();
        interp.execute_line("I 2 3").unwrap();
        assert_eq!(
            interp.execute_line("V 1 2 2 J").unwrap(),
            Outcome::Drawn(CommandKind::Vertical)
        );
        interp.execute_line("V 1 3 1 J").unwrap();
        assert_eq!(rendered(&interp), "OO\nOO\nOO");
    }

    #[test]
    fn test_vertical_segment_out_of_bounds_mutates_nothing() {
        let mut interp = interpreter();
        interp.execute_line("I 2 3").unwrap();

        let err = interp.execute_line("V 1 2 9 J").unwrap_err();
        assert!(matches!(err, InterpreterError::OutOfBounds { x: 1, y: 4, .. }));

        let err = interp.execute_line("V 3 1 3 J").unwrap_err();
        assert!(matches!(err, InterpreterError::OutOfBounds { x: 3, y: 1, .. }));

        let err = interp.execute_line("V 1 0 3 J").unwrap_err();
        assert!(matches!(err, InterpreterError::OutOfBounds { x: 1, y: 0, .. }));

        assert_eq!(rendered(&interp), "OO\nOO\nOO");
    }

    #[test]
    fn test_malformed_commands() {
        let mut interp = interpreter();
        interp.execute_line("I 2 2").unwrap();
        for line in ["L 1 1", "L a 1 X", "V 1 1 X J", "S", "S a b", "I 1"] {
            let err = interp.execute_line(line).unwrap_err();
            assert!(
                matches!(err, InterpreterError::MalformedCommand { .. }),
                "{line}: {err:?}"
            );
        }
    }

    #[test]
    fn test_save_writes_render_to_storage() {
        let mut interp = interpreter();
        interp.execute_line("I 2 2").unwrap();
        interp.execute_line("L 2 1 Q").unwrap();
        assert_eq!(
            interp.execute_line("S out.txt").unwrap(),
            Outcome::Saved {
                destination: "out.txt".into()
            }
        );
        assert_eq!(interp.storage().read("out.txt"), Some("OQ\nOO"));
    }

    #[test]
    fn test_save_failure_is_storage_write() {
        let mut interp = Interpreter::with_storage(MemoryStorage::rejecting("disk full"));
        interp.execute_line("I 1 1").unwrap();
        let err = interp.execute_line("S out.txt").unwrap_err();
        match err {
            InterpreterError::StorageWrite { destination, .. } => {
                assert_eq!(destination, "out.txt")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let mut interp = interpreter();
        let report = interp
            .execute_script(
                ["I 5 6", "L 3 2 A", "V 2 3 5 J", "S out.txt"],
                ErrorPolicy::StopOnError,
            )
            .unwrap();

        assert_eq!(report.executed, 4);
        assert_eq!(report.saved, vec!["out.txt".to_string()]);

        let saved = interp.storage().read("out.txt").unwrap();
        let rows: Vec<&str> = saved.split('\n').collect();
        assert_eq!(
            rows,
            vec!["OOOOO", "OOAOO", "OJOOO", "OJOOO", "OOOOO", "OOOOO"]
        );
    }

    #[test]
    fn test_script_stops_at_first_error_with_line_number() {
        let mut interp = interpreter();
        let err = interp
            .execute_script(
                "I 2 2\n\nL 9 9 X\nL 1 1 Y\n".lines(),
                ErrorPolicy::StopOnError,
            )
            .unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.text, "L 9 9 X");
        assert_eq!(rendered(&interp), "OO\nOO");
    }

    #[test]
    fn test_script_keep_going_collects_failures() {
        let mut interp = interpreter();
        let report = interp
            .execute_script(
                ["L 1 1 X", "I 2 2", "Z", "L 9 9 X", "L 1 1 Y", "S out.txt"],
                ErrorPolicy::KeepGoing,
            )
            .unwrap();

        assert_eq!(report.executed, 3);
        assert_eq!(report.ignored, 1);
        assert_eq!(report.attempted(), 5);
        let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 4]);
        assert_eq!(interp.storage().read("out.txt"), Some("YO\nOO"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pixel_lands_at_shifted_cell(
                width in 1i64..15,
                height in 1i64..15,
                x_seed in any::<u32>(),
                y_seed in any::<u32>(),
            ) {
                let x = i64::from(x_seed) % width + 1;
                let y = i64::from(y_seed) % height + 1;
                let mut interp = interpreter();
                interp.execute_line(&format!("I {} {}", width, height)).unwrap();
                interp.execute_line(&format!("L {} {} Q", x, y)).unwrap();

                let grid = interp.grid().unwrap();
                for (row, cells) in grid.rows().enumerate() {
                    for (col, pixel) in cells.iter().enumerate() {
                        let hit = col as i64 == x - 1 && row as i64 == y - 1;
                        prop_assert_eq!(pixel.as_str(), if hit { "Q" } else { "O" });
                    }
                }
            }

            #[test]
            fn vertical_segment_draws_y1_through_y2_minus_one(
                (height, y1, y2) in (1i64..15).prop_flat_map(|h| (Just(h), 1..=h, 1..=h + 1)),
            ) {
                let mut interp = interpreter();
                interp.execute_line(&format!("I 2 {}", height)).unwrap();
                interp.execute_line(&format!("V 1 {} {} J", y1, y2)).unwrap();

                let grid = interp.grid().unwrap();
                for row in 1..=height {
                    let expected = if row >= y1 && row < y2 { "J" } else { "O" };
                    prop_assert_eq!(grid.get(0, (row - 1) as usize).unwrap().as_str(), expected);
                    prop_assert_eq!(grid.get(1, (row - 1) as usize).unwrap().as_str(), "O");
                }
            }
        }
    }
}
