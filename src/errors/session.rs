//! Per-parse diagnostic state.
//!
//! A `Session` is threaded through the parser and owns the error counter
//! that drivers consult before running later phases. Diagnostics are
//! forwarded to an optional `Reporter` as soon as they are detected.

use log::debug;

use super::errors::{render_error, Error};

/// Receiver for user-visible diagnostics.
pub trait Reporter {
    fn report(&mut self, error: &Error);
}

/// Prints each diagnostic to stderr with the offending source line.
pub struct ConsoleReporter {
    file: String,
    source: String,
}

impl ConsoleReporter {
    pub fn new(file: String, source: String) -> Self {
        ConsoleReporter { file, source }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, error: &Error) {
        eprint!("{}", render_error(error, &self.file, &self.source));
    }
}

#[derive(Default)]
pub struct Session {
    reporter: Option<Box<dyn Reporter>>,
    diagnostics: Vec<Error>,
}

impl Session {
    pub fn new(reporter: Box<dyn Reporter>) -> Self {
        Session {
            reporter: Some(reporter),
            diagnostics: Vec::new(),
        }
    }

    /// A session that only records diagnostics.
    pub fn silent() -> Self {
        Session::default()
    }

    /// Counts the error and hands it to the reporter, if any.
    pub fn report(&mut self, error: Error) {
        debug!("diagnostic #{}: {} at {}", self.diagnostics.len() + 1, error, error.get_span().start);

        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&error);
        }
        self.diagnostics.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }
}
