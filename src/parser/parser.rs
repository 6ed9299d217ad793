//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statements and
//! declarations.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Tokens are pulled from the token source one at a time; the parser only
//! ever holds the current token as lookahead.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::{
        errors::{Error, ErrorImpl},
        session::Session,
    },
    lexer::tokens::{Token, TokenKind, TokenSource},
    Span,
};

use super::{
    decl::parse_program,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    types::{create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler, TypeNUDLookup},
};

/// Number of tokens that must be consumed after a syntax error before the
/// next one is reported again.
pub const RECOVERY_SHIFTS: u8 = 3;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token source, the single lookahead token and the
/// lookup tables for parsing statements, expressions and types. Diagnostics
/// go to the borrowed `Session`.
pub struct Parser<'a> {
    /// Where tokens are pulled from
    tokens: Box<dyn TokenSource + 'a>,
    /// The lookahead token
    current: Token,
    /// Span of the most recently consumed token
    previous_span: Span,
    /// Receives diagnostics and counts them
    session: &'a mut Session,
    /// Non-zero while recovering from a syntax error
    shifts_until_normal: u8,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser and pulls the first lookahead token.
    pub fn new(tokens: impl TokenSource + 'a, session: &'a mut Session) -> Self {
        let mut tokens: Box<dyn TokenSource + 'a> = Box::new(tokens);
        let current = pull(tokens.as_mut(), session);

        Parser {
            tokens,
            previous_span: Span::new(current.span.start, current.span.start),
            current,
            session,
            shifts_until_normal: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Span of the last token consumed, used to close node spans.
    pub fn previous_span(&self) -> Span {
        self.previous_span
    }

    /// Consumes the current token and returns it.
    ///
    /// A successful shift brings the parser one step closer to leaving
    /// error recovery.
    pub fn advance(&mut self) -> Token {
        let token = self.shift();
        if self.shifts_until_normal > 0 {
            self.shifts_until_normal -= 1;
            if self.shifts_until_normal == 0 {
                debug!("recovery finished at {}", token.span.start);
            }
        }
        trace!("consumed {} at {}", token, token.span.start);
        token
    }

    /// Discards the current token without counting it as a successful shift.
    pub fn skip(&mut self) -> Token {
        let token = self.shift();
        trace!("skipped {} at {}", token, token.span.start);
        token
    }

    fn shift(&mut self) -> Token {
        let next = pull(self.tokens.as_mut(), self.session);
        let token = std::mem::replace(&mut self.current, next);
        self.previous_span = token.span;
        token
    }

    /// Error for the current token not fitting the grammar here.
    pub fn unexpected(&self) -> Error {
        if self.current.kind == TokenKind::EOF {
            Error::new(ErrorImpl::UnexpectedEndOfInput, self.current.span)
        } else {
            Error::new(
                ErrorImpl::UnexpectedToken {
                    token: self.current.value.clone(),
                },
                self.current.span,
            )
        }
    }

    /// Like `unexpected`, with a note on what was expected instead.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        if self.current.kind == TokenKind::EOF {
            return self.unexpected();
        }

        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current.value.clone(),
                message: String::from(message),
            },
            self.current.span,
        )
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns
    /// the given error or a default one.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(error.unwrap_or_else(|| self.unexpected()));
        }

        Ok(self.advance())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    pub fn is_recovering(&self) -> bool {
        self.shifts_until_normal > 0
    }

    /// Reports `error` unless another one was reported within the last few
    /// tokens, then (re)starts the recovery window.
    pub fn enter_recovery(&mut self, error: Error) {
        if self.is_recovering() {
            debug!("suppressed while recovering: {} at {}", error, error.get_span().start);
        } else {
            debug!("entering recovery: {} at {}", error, error.get_span().start);
            self.session.report(error);
        }
        self.shifts_until_normal = RECOVERY_SHIFTS;
    }

    pub fn error_count(&self) -> usize {
        self.session.error_count()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` when it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Returns a reference to the type LED lookup table.
    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Returns a reference to the type binding power lookup table.
    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// The binding power table is left alone so a token can be both a
    /// prefix and an infix operator (`-`).
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: TypeLEDHandler) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Pulls the next token, reporting lexical errors until a token arrives.
fn pull(tokens: &mut (dyn TokenSource + '_), session: &mut Session) -> Token {
    loop {
        match tokens.next_token() {
            Ok(token) => return token,
            Err(error) => session.report(error),
        }
    }
}

/// Parses a whole translation unit pulled from `tokens`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses declarations until EOF.
/// Syntax and lexical errors are reported to `session`; the returned tree is
/// a best-effort one whenever `session.error_count()` is non-zero.
///
/// # Returns
///
/// `Err` only when error recovery ran out of input.
pub fn parse<'a>(tokens: impl TokenSource + 'a, session: &'a mut Session) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, session);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let program = parse_program(&mut parser)?;
    debug!(
        "parsed {} top-level declarations, {} errors",
        program.decls.len(),
        parser.error_count()
    );

    Ok(program)
}
