//! Lexical analysis module.
//!
//! This module contains the scanner that turns Decaf source text into the
//! token stream the parser pulls from. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, constants, and operators
//! - Line/column tracking for diagnostics
//! - Comments and whitespace handling
//!
//! The parser only depends on the `TokenSource` trait, so any other
//! producer of tokens can stand in for the `Lexer`.

pub mod lexer;
pub mod tokens;
