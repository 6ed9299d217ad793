use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::Error, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("void", TokenKind::Void);
        map.insert("int", TokenKind::IntType);
        map.insert("double", TokenKind::DoubleType);
        map.insert("bool", TokenKind::BoolType);
        map.insert("string", TokenKind::StringType);
        map.insert("class", TokenKind::Class);
        map.insert("interface", TokenKind::Interface);
        map.insert("extends", TokenKind::Extends);
        map.insert("implements", TokenKind::Implements);
        map.insert("this", TokenKind::This);
        map.insert("null", TokenKind::Null);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("New", TokenKind::New);
        map.insert("NewArray", TokenKind::NewArray);
        map.insert("Print", TokenKind::Print);
        map.insert("ReadInteger", TokenKind::ReadInteger);
        map.insert("ReadLine", TokenKind::ReadLine);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    IntConstant,
    DoubleConstant,
    BoolConstant,
    StringConstant,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Dims, // []

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    Comma,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Void,
    IntType,
    DoubleType,
    BoolType,
    StringType,
    Class,
    Interface,
    Extends,
    Implements,
    This,
    Null,
    While,
    For,
    If,
    Else,
    Return,
    Break,
    Switch,
    Case,
    Default,
    New,
    NewArray,
    Print,
    ReadInteger,
    ReadLine,
}

impl TokenKind {
    /// Keywords that name a built-in type usable in declarations.
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType | TokenKind::DoubleType | TokenKind::BoolType | TokenKind::StringType
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Decoded value carried by literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Double(f64),
    Bool(bool),
    Str(String),
    Ident(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme as written in the source.
    pub value: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} ({:?})", self.kind, literal),
            None => write!(f, "{} `{}`", self.kind, self.value),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// Pull interface the parser reads tokens from.
///
/// Implementations return an `EOF` token once input is exhausted, and keep
/// returning it on every further call. Lexical errors are returned as `Err`;
/// the caller reports them and asks again.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, Error>;
}

/// A token source over tokens that were produced ahead of time.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|token| token.span).unwrap_or_default();
        TokenStream {
            tokens: tokens.into_iter(),
            eof: Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                literal: None,
                span: Span::new(end.end, end.end),
            },
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Result<Token, Error> {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                self.eof = token.clone();
                Ok(token)
            }
            Some(token) => Ok(token),
            None => Ok(self.eof.clone()),
        }
    }
}
