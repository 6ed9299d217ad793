use std::fmt::Display;

use thiserror::Error;

use crate::{get_line, Span};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Lexical errors come from the token source rather than the grammar.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedString { .. }
                | ErrorImpl::UnterminatedComment
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::RecoveryExhausted => "RecoveryExhausted",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { token } => ErrorTip::Suggestion(format!(
                "Unterminated string constant: `{}`, strings cannot span lines",
                token
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Input ends inside a `/*` comment"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it out of range?",
                token
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "Input ended early, is a closing `}` missing?",
            )),
            ErrorImpl::InvalidAssignmentTarget { operator } => ErrorTip::Suggestion(format!(
                "Only variables, fields and array elements can be used with `{}`",
                operator
            )),
            ErrorImpl::RecoveryExhausted => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string constant: {token:?}")]
    UnterminatedString { token: String },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("syntax error, unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("syntax error, unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("syntax error, unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("syntax error, invalid target for {operator:?}")]
    InvalidAssignmentTarget { operator: String },
    #[error("unable to recover from previous syntax errors")]
    RecoveryExhausted,
}

/// Renders an error in the caret style used by the console reporter:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `;`)
/// -> test.decaf:2:13
///   |
/// 2 | x = 3 + ;
///   | --------^
/// ```
pub fn render_error(error: &Error, file: &str, source: &str) -> String {
    let span = error.get_span();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}:{}\n", file, span.start));

    let Some(line_text) = get_line(source, span.start.line) else {
        return out;
    };

    let line_str = span.start.line.to_string();
    let padding = line_str.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

    let arrows = (span.start.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
