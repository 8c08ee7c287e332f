//! Terminal logging with colored `[module]` prefixes.
//!
//! ```ignore
//! log!("route"; "registered {} routes", count);
//! debug!("route"; "{} resolved to {}", path, locale);
//! ```
//!
//! Problems (`error`, `warning`, `cache`) go to stderr so that commands
//! printing data on stdout (`routes --json`) stay machine-readable.

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{self, IsTerminal, Write},
    sync::atomic::{AtomicBool, Ordering},
};

/// Set by `--verbose`.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log a message with a colored module prefix
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, only with `--verbose`
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// What a module prefix reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Progress,
    Redirect,
    Problem,
    Failure,
    Other,
}

impl Channel {
    fn of(module: &str) -> Self {
        match module.to_ascii_lowercase().as_str() {
            "build" | "route" | "messages" => Self::Progress,
            "redirect" => Self::Redirect,
            "warning" | "cache" => Self::Problem,
            "error" => Self::Failure,
            _ => Self::Other,
        }
    }

    fn is_stderr(self) -> bool {
        matches!(self, Self::Problem | Self::Failure)
    }

    fn paint(self, module: &str) -> String {
        let prefix = format!("[{module}]");
        match self {
            Self::Progress => prefix.bright_blue().bold().to_string(),
            Self::Redirect => prefix.bright_green().bold().to_string(),
            Self::Problem => prefix.bright_magenta().bold().to_string(),
            Self::Failure => prefix.bright_red().bold().to_string(),
            Self::Other => prefix.bright_yellow().bold().to_string(),
        }
    }
}

pub fn log(module: &str, message: &str) {
    let channel = Channel::of(module);
    let line = format!("{} {message}", channel.paint(module));
    if channel.is_stderr() {
        write_line(&mut io::stderr().lock(), &line);
    } else {
        write_line(&mut io::stdout().lock(), &line);
    }
}

fn write_line<W: Write + IsTerminal>(out: &mut W, line: &str) {
    if out.is_terminal() {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(out, "{line}").ok();
    out.flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_channels() {
        assert_eq!(Channel::of("Error"), Channel::Failure);
        assert!(Channel::of("warning").is_stderr());
        assert!(Channel::of("cache").is_stderr());
        assert!(!Channel::of("route").is_stderr());
        assert!(Channel::of("route").paint("route").contains("[route]"));
    }
}
