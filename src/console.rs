//! Leveled, colored console messages for the person running the patcher.
//!
//! Every message is also forwarded to `tracing` so it lands in the diagnostic log
//! regardless of console verbosity.

use colored::Colorize;

/// Severity of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Ok,
    Warning,
    Error,
}

impl Level {
    /// Prefix shown before the message text
    pub fn marker(self) -> &'static str {
        match self {
            Self::Info => "[i]",
            Self::Ok => "[✓]",
            Self::Warning => "[!]",
            Self::Error => "[X]",
        }
    }

    fn paint(self, line: &str) -> String {
        match self {
            Self::Info => line.bright_cyan().to_string(),
            Self::Ok => line.bright_green().to_string(),
            Self::Warning => line.bright_yellow().to_string(),
            Self::Error => line.bright_red().to_string(),
        }
    }
}

/// Console reporter with a fixed verbosity.
///
/// The level methods ([`info`](Self::info), [`ok`](Self::ok), [`warning`](Self::warning),
/// [`error`](Self::error)) are dropped when the console is quiet. [`report`](Self::report)
/// always prints and is meant for outcomes the user must see.
#[derive(Debug, Clone)]
pub struct Console {
    verbose: bool,
    color: bool,
}

impl Console {
    /// Colored console with the given verbosity
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            color: true,
        }
    }

    /// Console that never emits ANSI escape codes
    pub fn plain(verbose: bool) -> Self {
        Self {
            verbose,
            color: false,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Level::Info, message.as_ref(), false);
    }

    pub fn ok(&self, message: impl AsRef<str>) {
        self.emit(Level::Ok, message.as_ref(), false);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Level::Warning, message.as_ref(), false);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Level::Error, message.as_ref(), false);
    }

    /// Print `message` even when the console is quiet.
    pub fn report(&self, level: Level, message: impl AsRef<str>) {
        self.emit(level, message.as_ref(), true);
    }

    /// Format a message the way it would be printed.
    ///
    /// Returns `None` when the message is suppressed by the verbosity setting.
    pub fn render(&self, level: Level, message: &str, always: bool) -> Option<String> {
        if !(self.verbose || always) {
            return None;
        }

        let line = format!("{} {}", level.marker(), message);
        if self.color {
            Some(level.paint(&line))
        } else {
            Some(line)
        }
    }

    fn emit(&self, level: Level, message: &str, always: bool) {
        match level {
            Level::Info | Level::Ok => tracing::info!("{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }

        if let Some(line) = self.render(level, message, always) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        let console = Console::plain(true);
        assert_eq!(
            console.render(Level::Info, "checking", false).as_deref(),
            Some("[i] checking")
        );
        assert_eq!(
            console.render(Level::Ok, "done", false).as_deref(),
            Some("[✓] done")
        );
        assert_eq!(
            console.render(Level::Warning, "careful", false).as_deref(),
            Some("[!] careful")
        );
        assert_eq!(
            console.render(Level::Error, "broken", false).as_deref(),
            Some("[X] broken")
        );
    }

    #[test]
    fn test_quiet_console_suppresses_gated_messages() {
        let console = Console::plain(false);
        assert!(!console.is_verbose());
        assert_eq!(console.render(Level::Info, "noise", false), None);
        assert_eq!(console.render(Level::Error, "aborting...", false), None);
    }

    #[test]
    fn test_report_ignores_verbosity() {
        let console = Console::plain(false);
        assert_eq!(
            console.render(Level::Error, "CS:GO not detected", true).as_deref(),
            Some("[X] CS:GO not detected")
        );
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let console = Console::new(true);
        let line = console.render(Level::Ok, "patched", false).unwrap();
        assert!(line.contains("[✓] patched"));
    }
}
