use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::Path;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use pixgrid_common::color_init;
use tracing::debug;

use crate::command::CommandKind;
use crate::commands::{Cli, Commands, ScriptOptions};
use crate::error::CliError;
use crate::interpreter::{ErrorPolicy, Interpreter};
use crate::presenter::{Presenter, create_presenter};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::telemetry;

const PROGRAM_NAME: &str = "pixgrid";
const PROMPT: &str = "pixgrid> ";
const STDIN_NAME: &str = "stdin";

mod exit_codes {
    pub const SUCCESS: i32 = 0;
}

pub struct Application;

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> i32 {
        let cli = Cli::parse();
        let _telemetry = telemetry::init_tracing(if cli.verbose { "debug" } else { "warn" });
        color_init(cli.no_color);
        let format = cli.effective_format();
        debug!(command = ?cli.command, format = ?format, "CLI command parsed");

        let presenter = create_presenter(format);
        match self.execute(cli.command, presenter.as_ref()) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                presenter.present_error(&e);
                e.exit_code()
            }
        }
    }

    fn execute(&self, command: Commands, presenter: &dyn Presenter) -> Result<(), CliError> {
        match command {
            Commands::Run { script, options } => {
                let text = read_script(script.as_deref())?;
                self.run_script(text.lines(), options, presenter)
            }
            Commands::Exec { lines, options } => self.run_script(lines, options, presenter),
            Commands::Repl => self.run_repl(presenter),
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                generate(shell, &mut cmd, PROGRAM_NAME, &mut io::stdout());
                Ok(())
            }
        }
    }

    fn run_script<I, L>(
        &self,
        lines: I,
        options: ScriptOptions,
        presenter: &dyn Presenter,
    ) -> Result<(), CliError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let policy = if options.keep_going {
            ErrorPolicy::KeepGoing
        } else {
            ErrorPolicy::StopOnError
        };

        let mut interpreter = Interpreter::with_storage(storage_for(options));
        let mut report = interpreter.execute_script(lines, policy)?;
        debug!(
            executed = report.executed,
            ignored = report.ignored,
            failed = report.failures.len(),
            "Script finished"
        );

        presenter.present_report(&report, interpreter.grid(), options);

        if report.failures.is_empty() {
            return Ok(());
        }
        let total = report.attempted();
        Err(CliError::Failures {
            failures: std::mem::take(&mut report.failures),
            total,
        })
    }

    fn run_repl(&self, presenter: &dyn Presenter) -> Result<(), CliError> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let mut input = stdin.lock();
        let mut interpreter = Interpreter::new();
        let mut line = String::new();

        loop {
            if interactive {
                print!("{}", PROMPT);
                let _ = io::stdout().flush();
            }

            line.clear();
            let read = input
                .read_line(&mut line)
                .map_err(|source| CliError::ReadInput {
                    source_name: STDIN_NAME.to_string(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            match line.trim() {
                "quit" | "exit" => break,
                "help" => {
                    for kind in CommandKind::ALL {
                        presenter.present_info(&format!(
                            "{:<12} {}",
                            kind.usage(),
                            kind.description()
                        ));
                    }
                    continue;
                }
                "show" => {
                    match interpreter.grid() {
                        Some(grid) => presenter.present_grid(grid),
                        None => presenter.present_info("No grid yet. Start with I X Y."),
                    }
                    continue;
                }
                _ => {}
            }

            match interpreter.execute_line(&line) {
                Ok(outcome) => presenter.present_outcome(&outcome, false),
                Err(e) => presenter.present_interpreter_error(&e),
            }
        }

        Ok(())
    }
}

fn storage_for(options: ScriptOptions) -> Box<dyn Storage> {
    if options.dry_run {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage)
    }
}

fn read_script(script: Option<&Path>) -> Result<String, CliError> {
    match script {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
                source_name: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::ReadInput {
                    source_name: STDIN_NAME.to_string(),
                    source,
                })?;
            Ok(text)
        }
    }
}
