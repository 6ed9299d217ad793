//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into the AST of a whole translation unit. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Declaration parsing (globals, functions, classes, interfaces)
//! - Statement parsing (blocks, control flow, switch, print)
//! - Expression parsing (assignment, binary and unary operators, calls,
//!   field and array access, built-ins)
//! - Type parsing for type annotations
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod recovery;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
