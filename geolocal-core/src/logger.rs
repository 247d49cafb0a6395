//! Status output for the build pipeline.
//!
//! The table builder reports progress through a `Logger` handed to it by the
//! caller. Quiet runs pass a [`NullLogger`]; tests pass a [`MockLogger`].

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// How much status output a run wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Summary lines only.
    Normal,
    /// Per-bucket and per-file detail (-v).
    Verbose,
    /// Per-range detail (-vv).
    Debug,
}

impl Verbosity {
    /// Verbosity for a repeated `-v` flag.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Sink for pipeline status messages.
pub trait Logger: Send + Sync {
    /// Record `message` at `level`.
    fn log(&self, level: Verbosity, message: &str);

    /// Whether messages at `level` go anywhere.
    ///
    /// Callers check this before formatting per-range messages.
    fn enabled(&self, _level: Verbosity) -> bool {
        true
    }

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Writes status lines up to a verbosity ceiling.
#[derive(Debug)]
pub struct StatusLogger<W> {
    ceiling: Verbosity,
    out: Mutex<W>,
}

/// Status logger on stderr, as used by the CLI.
pub type StderrLogger = StatusLogger<io::Stderr>;

impl StatusLogger<io::Stderr> {
    pub fn stderr(ceiling: Verbosity) -> Self {
        Self::new(ceiling, io::stderr())
    }
}

impl<W: Write + Send> StatusLogger<W> {
    pub fn new(ceiling: Verbosity, out: W) -> Self {
        Self {
            ceiling,
            out: Mutex::new(out),
        }
    }

    pub fn ceiling(&self) -> Verbosity {
        self.ceiling
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Logger for StatusLogger<W> {
    fn log(&self, level: Verbosity, message: &str) {
        if !self.enabled(level) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            // Status output is best effort.
            let _ = writeln!(out, "{}", message);
        }
    }

    fn enabled(&self, level: Verbosity) -> bool {
        level <= self.ceiling
    }
}

/// One captured status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Captures every message at every level. Clones share the capture buffer.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages captured at exactly `level`, in order.
    pub fn lines(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    pub fn contains(&self, substring: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.message.contains(substring))
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        self.entries.lock().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

/// Discards everything; used for quiet runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}

    fn enabled(&self, _level: Verbosity) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_count() {
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(255), Verbosity::Debug);
    }

    #[test]
    fn test_status_logger_respects_ceiling() {
        let logger = StatusLogger::new(Verbosity::Verbose, Vec::new());
        logger.info("built 2 buckets");
        logger.verbose("  US/v4: 1 ranges, 0 merged");
        logger.debug("dropping ::1-::2 for US: v6 disabled");

        assert!(logger.enabled(Verbosity::Verbose));
        assert!(!logger.enabled(Verbosity::Debug));
        assert_eq!(logger.ceiling(), Verbosity::Verbose);

        let text = String::from_utf8(logger.into_inner()).unwrap();
        assert_eq!(text, "built 2 buckets\n  US/v4: 1 ranges, 0 merged\n");
    }

    #[test]
    fn test_mock_logger_captures_all_levels() {
        let logger = MockLogger::new();
        logger.info("normal");
        logger.verbose("verbose");
        logger.debug("debug");

        assert_eq!(logger.count(), 3);
        assert!(logger.enabled(Verbosity::Debug));
        assert_eq!(logger.lines(Verbosity::Verbose), vec!["verbose"]);
        assert_eq!(logger.entries()[2].level, Verbosity::Debug);
    }

    #[test]
    fn test_mock_logger_clone_shares_entries() {
        let logger = MockLogger::new();
        logger.clone().info("from clone");

        assert!(logger.contains("clone"));
        assert!(!logger.contains("missing"));
    }

    #[test]
    fn test_null_logger_is_disabled() {
        let logger: &dyn Logger = &NullLogger;
        logger.info("discarded");
        assert!(!logger.enabled(Verbosity::Normal));
    }
}
