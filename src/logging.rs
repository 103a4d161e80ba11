//! Event log for provisioning runs
//!
//! Every outcome is appended to a log file as a single timestamped line:
//!
//! ```text
//! 10/18/2026 09:14:02AM - INFO - create_workspace_for_app - Created workspace named Payments with 2 teams
//! ```
//!
//! The handle is built once by the command context and passed down by
//! reference. Values that come from the remote service (application names,
//! workspace names, error text) must be wrapped with [`clean`] where they are
//! interpolated, so a crafted name cannot forge extra log lines.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use env_logger::{Logger, Target, WriteStyle};
use log::{Level, LevelFilter, Log, Record};

use crate::error::Result;

/// Default log file name, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "vcworkspace.log";

/// Timestamp layout used at the start of every line
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S%p";

/// Escape line breaks so an interpolated value stays on one log line.
pub fn clean(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Explicit logging handle for a single run.
pub struct EventLog {
    logger: Logger,
    console: bool,
}

impl EventLog {
    /// Open (or create) the log file in append mode.
    pub fn open(path: &Path, debug: bool) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Box::new(file), debug, true))
    }

    /// Build a log that writes lines to an arbitrary sink.
    pub fn with_writer(sink: Box<dyn Write + Send>, debug: bool, console: bool) -> Self {
        let level = if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let logger = env_logger::Builder::new()
            .target(Target::Pipe(sink))
            .write_style(WriteStyle::Never)
            .filter_level(level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {} - {}",
                    chrono::Local::now().format(TIMESTAMP_FORMAT),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .build();

        Self { logger, console }
    }

    /// Append one event to the log file.
    ///
    /// `function` names the operation that produced the event.
    pub fn record(&self, level: Level, function: &str, message: &str) {
        self.logger.log(
            &Record::builder()
                .level(level)
                .target(function)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    pub fn debug(&self, function: &str, message: &str) {
        self.record(Level::Debug, function, message);
    }

    pub fn info(&self, function: &str, message: &str) {
        self.record(Level::Info, function, message);
    }

    /// Record an event and echo it to the console.
    pub fn announce(&self, level: Level, function: &str, message: &str) {
        self.record(level, function, message);

        if !self.console {
            return;
        }
        match level {
            Level::Error => eprintln!("{} {}", "error:".red().bold(), message),
            Level::Warn => eprintln!("{} {}", "warning:".yellow().bold(), message),
            _ => println!("{}", message),
        }
    }

    pub fn flush(&self) {
        self.logger.flush();
    }
}
