//! Panic-mode error recovery.
//!
//! Every list the grammar accumulates is a recovery point: top-level
//! declarations, class members, interface prototypes, block contents, the
//! arms of a switch and the statements inside each arm. When an item fails to parse, the loop building the list
//! hands the error to `recover`, which reports it and then discards tokens
//! until the list can resume.

use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Where the abandoned item sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    /// The translation unit itself. No brace can close it, so a stray `}`
    /// is discarded.
    TopLevel,
    /// Anything between a `{` and its `}`.
    Nested,
    /// The arms of a switch. An abandoned arm ends at the next `case` or
    /// `default`, statement terminators inside it are skipped.
    SwitchArms,
}

/// Reports `error` (subject to the recovery window) and skips to the next
/// point where the enclosing list can continue.
///
/// Fails with `RecoveryExhausted` when the input ends first; that error is
/// passed through untouched by enclosing lists.
pub fn recover(parser: &mut Parser, error: Error, scope: SyncScope) -> Result<(), Error> {
    if let ErrorImpl::RecoveryExhausted = error.get_impl() {
        return Err(error);
    }

    parser.enter_recovery(error);
    synchronize(parser, scope)
}

/// Skips tokens up to and including the next `;` at brace depth zero, or up
/// to and including a `}` closing a brace opened while skipping. A `}` at
/// depth zero closes the enclosing list and is left for it to consume.
///
/// Switch arms resume only before the next `case` or `default` at depth
/// zero, or before the switch's own `}`.
pub fn synchronize(parser: &mut Parser, scope: SyncScope) -> Result<(), Error> {
    let start = parser.current_token().span.start;
    let mut depth = 0usize;
    let mut skipped = 0usize;

    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => {
                debug!("input ended while recovering from {}", start);
                return Err(Error::new(
                    ErrorImpl::RecoveryExhausted,
                    parser.current_token().span,
                ));
            }
            TokenKind::Case | TokenKind::Default if depth == 0 && scope == SyncScope::SwitchArms => break,
            TokenKind::Semicolon if depth == 0 && scope != SyncScope::SwitchArms => {
                parser.skip();
                skipped += 1;
                break;
            }
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly if depth > 0 => {
                depth -= 1;
                if depth == 0 && scope != SyncScope::SwitchArms {
                    parser.skip();
                    skipped += 1;
                    break;
                }
            }
            TokenKind::CloseCurly => {
                if scope == SyncScope::TopLevel {
                    parser.skip();
                    skipped += 1;
                }
                break;
            }
            _ => {}
        }

        parser.skip();
        skipped += 1;
    }

    debug!(
        "resynchronized at {} after skipping {} tokens from {}",
        parser.current_token().span.start,
        skipped,
        start
    );
    Ok(())
}
