use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("mut", TokenKind::Mut);
        map.insert("const", TokenKind::Const);
        map.insert("fn", TokenKind::Fn);
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("impl", TokenKind::Impl);
        map.insert("trait", TokenKind::Trait);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("switch", TokenKind::Match);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("import", TokenKind::Import);
        map.insert("export", TokenKind::Export);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("type", TokenKind::Type);
        map.insert("Any", TokenKind::Any);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Ident,

    Colon,
    ColonColon,
    Semicolon,
    Comma,
    Dot,
    DotDot,
    DotDotEqual,
    Arrow,
    FatArrow,

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    Equal,      // =
    EqualEqual, // ==
    Bang,       // !
    BangEqual,  // !=

    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    LogicAnd,
    LogicOr,

    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,

    PlusEqual,
    MinusEqual,
    AsteriskEqual,
    SlashEqual,
    ModulusEqual,
    BitwiseAndEqual,
    BitwiseOrEqual,
    BitwiseXorEqual,

    Plus,
    Minus,
    Slash,
    Asterisk,
    Modulus,

    // Reserved
    Let,
    Mut,
    Const,
    Fn,
    Struct,
    Enum,
    Impl,
    Trait,
    If,
    Else,
    While,
    For,
    In,
    Match,
    Return,
    Break,
    Continue,
    Import,
    Export,
    True,
    False,
    Type,
    Any,
}

impl TokenKind {
    /// The operators legal between an assignment target and its value.
    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::AsteriskEqual
                | TokenKind::SlashEqual
                | TokenKind::ModulusEqual
                | TokenKind::BitwiseAndEqual
                | TokenKind::BitwiseOrEqual
                | TokenKind::BitwiseXorEqual
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        for token in tokens {
            if *token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Ident, TokenKind::Number]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
