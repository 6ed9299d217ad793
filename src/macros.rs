//! Utility macros for the scanner.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer's pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$literal` - Optional decoded payload (a `Literal`)
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntConstant, "42".to_string(), Literal::Int(42), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            literal: None,
            span: $span,
        }
    };
    ($kind:expr, $value:expr, $literal:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            literal: Some($literal),
            span: $span,
        }
    };
}

/// Creates a default lexer handler for operators and punctuation.
///
/// Generates a handler that produces a token of the given kind spanning
/// the literal text, then advances the lexer past it.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal string value (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span_of($value.len());
            lexer.advance_n($value.len());
            Ok(Some($crate::MK_TOKEN!($kind, String::from($value), span)))
        }
    };
}
