use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

const LONG_ABOUT: &str = r#"pixgrid edits a grid of symbolic pixels with one-letter commands.

COMMANDS:
    I X Y          Create an X-column, Y-row grid filled with O
    L X Y C        Set the pixel at column X, row Y to C
    V X Y1 Y2 C    Set column X to C from row Y1 up to, but not including, row Y2
    S NAME         Write the grid to the file NAME

    Coordinates are 1-based. Blank lines and unknown letters are ignored.
    Every command other than I needs a grid, so scripts start with I.

EXAMPLES:
    # Run a script file
    pixgrid run drawing.pg

    # Pipe commands on stdin and print the result
    printf 'I 5 6\nL 3 2 A\nV 2 3 5 J\n' | pixgrid run --print

    # Commands as arguments
    pixgrid exec "I 5 6" "L 3 2 A" "S out.txt"

    # Interactive session
    pixgrid repl"#;

#[derive(Parser)]
#[command(name = "pixgrid")]
#[command(author, version)]
#[command(about = "Command-driven raster editor for symbolic pixel grids")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the effective output format, considering --json shorthand.
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run commands from a script file or stdin
    #[command(long_about = r#"Run commands from a script file or stdin.

Reads one command per line. Execution stops at the first failing line
unless --keep-going is given.

EXAMPLES:
    pixgrid run drawing.pg
    pixgrid run --print < drawing.pg
    pixgrid run --keep-going --dry-run drawing.pg"#)]
    Run {
        /// Script to execute ('-' or omitted reads stdin)
        script: Option<PathBuf>,

        #[command(flatten)]
        options: ScriptOptions,
    },

    /// Run commands given as arguments, one command per argument
    Exec {
        /// Command lines, e.g. "I 5 6" "L 3 2 A"
        #[arg(required = true)]
        lines: Vec<String>,

        #[command(flatten)]
        options: ScriptOptions,
    },

    /// Start an interactive session
    #[command(long_about = r#"Start an interactive session.

Each line is executed as it is entered. Failures are reported and the
session continues. 'show' prints the grid and 'help' lists the commands.
Type 'quit' or 'exit', or send EOF, to leave."#)]
    Repl,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ScriptOptions {
    /// Continue after a failing line and report every failure at the end
    #[arg(long)]
    pub keep_going: bool,

    /// Print the final grid to stdout
    #[arg(long)]
    pub print: bool,

    /// Keep saved grids in memory instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["pixgrid", "run"]).unwrap();
        match cli.command {
            Commands::Run { script, options } => {
                assert!(script.is_none());
                assert!(!options.keep_going);
                assert!(!options.print);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_json_shorthand_overrides_format() {
        let cli = Cli::try_parse_from(["pixgrid", "--json", "repl"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Json);

        let cli = Cli::try_parse_from(["pixgrid", "repl", "--format", "json"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Json);

        let cli = Cli::try_parse_from(["pixgrid", "repl"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Text);
    }

    #[test]
    fn test_exec_requires_lines() {
        assert!(Cli::try_parse_from(["pixgrid", "exec"]).is_err());

        let cli = Cli::try_parse_from([
            "pixgrid",
            "exec",
            "--keep-going",
            "I 5 6",
            "L 3 2 A",
        ])
        .unwrap();
        match cli.command {
            Commands::Exec { lines, options } => {
                assert_eq!(lines, vec!["I 5 6", "L 3 2 A"]);
                assert!(options.keep_going);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
