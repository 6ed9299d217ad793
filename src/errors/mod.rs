//! Error types and error reporting for the parser.
//!
//! This module defines the error types used throughout syntax analysis.
//! It includes:
//!
//! - Error structures with source span information
//! - Specific error variants for lexical and syntax errors
//! - Caret-style error rendering
//! - The parse `Session` that counts and forwards diagnostics

pub mod errors;
pub mod session;
