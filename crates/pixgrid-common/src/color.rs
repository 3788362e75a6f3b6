//! Terminal color helpers for CLI output.

use std::io::IsTerminal;
use std::sync::OnceLock;

static NO_COLOR: OnceLock<bool> = OnceLock::new();

/// Decides once per process whether output is colored.
///
/// Color is off when the flag is set, when `NO_COLOR` is present, or when
/// stdout is not a terminal.
pub fn init(no_color_flag: bool) {
    let _ = NO_COLOR.set(
        no_color_flag || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal(),
    );
}

pub fn is_disabled() -> bool {
    *NO_COLOR.get().unwrap_or(&false)
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Green,
    Red,
    Yellow,
    Dim,
    Bold,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Green => "\x1b[32m",
            Style::Red => "\x1b[31m",
            Style::Yellow => "\x1b[33m",
            Style::Dim => "\x1b[90m",
            Style::Bold => "\x1b[1m",
        }
    }
}

const RESET: &str = "\x1b[0m";

fn paint(text: &str, style: Style) -> String {
    if is_disabled() {
        return text.to_string();
    }
    let code = style.code();
    let mut out = String::with_capacity(code.len() + text.len() + RESET.len());
    out.push_str(code);
    out.push_str(text);
    out.push_str(RESET);
    out
}

pub struct Colors;

impl Colors {
    pub fn success(text: &str) -> String {
        paint(text, Style::Green)
    }

    pub fn error(text: &str) -> String {
        paint(text, Style::Red)
    }

    pub fn warning(text: &str) -> String {
        paint(text, Style::Yellow)
    }

    pub fn dim(text: &str) -> String {
        paint(text, Style::Dim)
    }

    pub fn bold(text: &str) -> String {
        paint(text, Style::Bold)
    }
}
