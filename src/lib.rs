#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::{errors::Error, session::Session},
    lexer::lexer::Lexer,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a token or node. `end` points at the last character,
/// so a one-character token has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Covers everything from the start of `self` to the end of `other`.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

/// Scans and parses `source` with a session that reports nowhere.
///
/// Returns the session (for its error count and diagnostics) together with
/// the parse result. `Err` means error recovery was exhausted.
pub fn parse_source(source: &str, file: &str) -> (Session, Result<Program, Error>) {
    let mut session = Session::silent();
    let lexer = Lexer::new(source, Some(String::from(file)));
    let result = parser::parser::parse(lexer, &mut session);
    (session, result)
}

/// Returns the 1-based `line` of `source` without its trailing newline.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}
