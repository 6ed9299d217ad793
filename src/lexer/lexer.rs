use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Literal, Token, TokenKind, TokenSource, RESERVED_LOOKUP};

/// Produces at most one token per call; `Ok(None)` means the matched text
/// was skipped (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // First match wins, so longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*?)\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?").unwrap(), handler: double_handler },
        RegexPattern { regex: Regex::new(r"^0[xX][0-9a-fA-F]+").unwrap(), handler: int_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]+").unwrap(), handler: int_handler },
        RegexPattern { regex: Regex::new("^\"[^\"\n]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\"[^\"\n]*").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^\[\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dims, "[]") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^\+\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: Regex::new("^--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

/// On-demand scanner over a source string.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: String::from(source),
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Moves past `n` bytes of source, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Span of the next `len` bytes, which must not contain a newline.
    pub fn span_of(&self, len: usize) -> Span {
        let end = (self.pos + len).min(self.source.len());
        let width = self.source[self.pos..end].chars().count() as u32;
        let start = self.position();

        Span::new(start, Position::new(self.line, self.column + width.max(1) - 1))
    }

    /// Text matched by `regex` at the current position.
    pub fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| String::from(found.as_str()))
            .unwrap_or_default()
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                let here = self.position();
                return Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::new(here, here)));
            }

            let remainder = self.remainder();
            let pattern = PATTERNS.iter().find(|pattern| pattern.regex.is_match(remainder));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex)? {
                        trace!("{}: scanned {} at {}", self.file, token, token.span.start);
                        return Ok(token);
                    }
                }
                None => {
                    let ch = self.at();
                    let span = self.span_of(ch.len_utf8());
                    self.advance_n(ch.len_utf8());
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken {
                            token: ch.to_string(),
                        },
                        span,
                    ));
                }
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(None)
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let span = lexer.span_of(2);
    let rest = lexer.remainder().len();
    lexer.advance_n(rest);

    Err(Error::new(ErrorImpl::UnterminatedComment, span))
}

fn int_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    let parsed = match matched.strip_prefix("0x").or_else(|| matched.strip_prefix("0X")) {
        Some(digits) => i32::from_str_radix(digits, 16),
        None => matched.parse::<i32>(),
    };

    match parsed {
        Ok(value) => Ok(Some(MK_TOKEN!(TokenKind::IntConstant, matched, Literal::Int(value), span))),
        Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: matched }, span)),
    }
}

fn double_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    // Overflow parses as infinity, which has no Decaf spelling
    match matched.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(MK_TOKEN!(
            TokenKind::DoubleConstant,
            matched,
            Literal::Double(value),
            span
        ))),
        _ => Err(Error::new(ErrorImpl::NumberParseError { token: matched }, span)),
    }
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    // No escape sequences: the literal is the text between the quotes.
    let contents = String::from(&matched[1..matched.len() - 1]);

    Ok(Some(MK_TOKEN!(TokenKind::StringConstant, matched, Literal::Str(contents), span)))
}

fn unterminated_string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    Err(Error::new(ErrorImpl::UnterminatedString { token: matched }, span))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    let token = match value.as_str() {
        "true" => MK_TOKEN!(TokenKind::BoolConstant, value, Literal::Bool(true), span),
        "false" => MK_TOKEN!(TokenKind::BoolConstant, value, Literal::Bool(false), span),
        word => match RESERVED_LOOKUP.get(word) {
            Some(kind) => MK_TOKEN!(*kind, value, span),
            None => {
                let identifier = Literal::Ident(value.clone());
                MK_TOKEN!(TokenKind::Identifier, value, identifier, span)
            }
        },
    };

    Ok(Some(token))
}

/// Scans the whole of `source`, stopping at the first lexical error.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
