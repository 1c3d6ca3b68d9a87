//! User-interaction collaborators
//!
//! The sync engine collects input and reports failures through this seam:
//! a text prompt (returns `None` when cancelled), a yes/no confirmation, and
//! a brief failure notice. The engine never decides wording beyond the
//! notice strings it passes in.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// The input/notice capabilities the surrounding UI provides.
pub trait Shell: Send + Sync {
    /// Asks the user for a line of text. `None` means cancelled.
    fn prompt(&self, message: &str, initial: Option<&str>) -> Option<String>;

    /// Asks the user a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Shows a brief failure notice.
    fn notify(&self, message: &str);
}

/// Stdin/stdout implementation used by the binary.
#[derive(Debug, Default, Clone)]
pub struct TerminalShell;

impl TerminalShell {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        let stdin = io::stdin();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => None, // EOF counts as cancelled
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(_) => None,
        }
    }
}

impl Shell for TerminalShell {
    fn prompt(&self, message: &str, initial: Option<&str>) -> Option<String> {
        match initial {
            Some(current) => print!("{} [{}] ", message, current.dimmed()),
            None => print!("{} ", message),
        }
        let _ = io::stdout().flush();
        self.read_line()
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();
        matches!(
            self.read_line().as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}
