use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorKind, ErrorOrigin},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            errors: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new(r"[\p{Alphabetic}_][\p{Alphabetic}\d_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new(r"[0-9]+(\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new(r"[ \t\r\n]+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r#""[^"]*"?"#).unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new(r"//[^\n]*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::") },
                RegexPattern { regex: Regex::new(r"\.\.=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDotEqual, "..=") },
                RegexPattern { regex: Regex::new(r"\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..") },
                RegexPattern { regex: Regex::new(r"\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
                RegexPattern { regex: Regex::new(r"=>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>") },
                RegexPattern { regex: Regex::new(r"==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::EqualEqual, "==") },
                RegexPattern { regex: Regex::new(r"=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equal, "=") },
                RegexPattern { regex: Regex::new(r"!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BangEqual, "!=") },
                RegexPattern { regex: Regex::new(r"!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bang, "!") },
                RegexPattern { regex: Regex::new(r">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEqual, ">=") },
                RegexPattern { regex: Regex::new(r">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new(r"<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEqual, "<=") },
                RegexPattern { regex: Regex::new(r"<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(r"&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LogicAnd, "&&") },
                RegexPattern { regex: Regex::new(r"&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseAndEqual, "&=") },
                RegexPattern { regex: Regex::new(r"&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseAnd, "&") },
                RegexPattern { regex: Regex::new(r"\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LogicOr, "||") },
                RegexPattern { regex: Regex::new(r"\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseOrEqual, "|=") },
                RegexPattern { regex: Regex::new(r"\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseOr, "|") },
                RegexPattern { regex: Regex::new(r"\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseXorEqual, "^=") },
                RegexPattern { regex: Regex::new(r"\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseXor, "^") },
                RegexPattern { regex: Regex::new(r"\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEqual, "+=") },
                RegexPattern { regex: Regex::new(r"\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new(r"->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
                RegexPattern { regex: Regex::new(r"-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEqual, "-=") },
                RegexPattern { regex: Regex::new(r"-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
                RegexPattern { regex: Regex::new(r"/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEqual, "/=") },
                RegexPattern { regex: Regex::new(r"/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new(r"\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AsteriskEqual, "*=") },
                RegexPattern { regex: Regex::new(r"\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Asterisk, "*") },
                RegexPattern { regex: Regex::new(r"%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ModulusEqual, "%=") },
                RegexPattern { regex: Regex::new(r"%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Modulus, "%") },
                RegexPattern { regex: Regex::new(r";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new(r":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new(r",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new(r"\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftParen, "(") },
                RegexPattern { regex: Regex::new(r"\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightParen, ")") },
                RegexPattern { regex: Regex::new(r"\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftBrace, "{") },
                RegexPattern { regex: Regex::new(r"\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightBrace, "}") },
                RegexPattern { regex: Regex::new(r"\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftBracket, "[") },
                RegexPattern { regex: Regex::new(r"\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightBracket, "]") },
            ],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn error(&mut self, kind: ErrorKind) {
        self.errors.push(Error::new(
            ErrorOrigin::Lexer,
            kind,
            Position(self.pos as u32, Rc::clone(&self.file)),
        ));
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

fn symbol_handler(lexer: &mut Lexer, regex: Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.pos;
    lexer.advance_n(value.len());

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Ident);

    lexer.push(MK_TOKEN!(
        kind,
        value,
        Span {
            start: Position(start as u32, Rc::clone(&lexer.file)),
            end: Position(lexer.pos as u32, Rc::clone(&lexer.file)),
        }
    ));
}

fn number_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.pos;
    let has_fraction = matched.contains('.');
    lexer.advance_n(matched.len());

    lexer.push(MK_TOKEN!(
        TokenKind::Number,
        matched,
        Span {
            start: Position(start as u32, Rc::clone(&lexer.file)),
            end: Position(lexer.pos as u32, Rc::clone(&lexer.file)),
        }
    ));

    // A trailing `1.` is malformed unless the dot begins a `..` range
    // operator or a field access like `1.foo`; record the diagnostic and
    // eat the dot so the digits still parse.
    if !has_fraction {
        let mut rest = lexer.remainder().chars();
        if rest.next() == Some('.') {
            let after = rest.next();
            let dot_starts_token = after == Some('.')
                || after.map_or(false, |c| c.is_alphabetic() || c == '_');
            if !dot_starts_token {
                lexer.error(ErrorKind::ExpectedDigit);
                lexer.advance_n(1);
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched);
}

fn string_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.pos;

    let terminated = matched.len() >= 2 && matched.ends_with('"');
    if !terminated {
        lexer.error(ErrorKind::UnterminatedString);
    }

    let raw = if terminated {
        &matched[1..matched.len() - 1]
    } else {
        &matched[1..]
    };
    let value = unescape(raw);

    lexer.advance_n(matched.len());

    lexer.push(MK_TOKEN!(
        TokenKind::String,
        value,
        Span {
            start: Position(start as u32, Rc::clone(&lexer.file)),
            end: Position(lexer.pos as u32, Rc::clone(&lexer.file)),
        }
    ));
}

fn unescape(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next_ch) = chars.peek() {
                match next_ch {
                    'n' => {
                        result.push('\n');
                        chars.next();
                    }
                    't' => {
                        result.push('\t');
                        chars.next();
                    }
                    '\\' => {
                        result.push('\\');
                        chars.next();
                    }
                    'r' => {
                        result.push('\r');
                        chars.next();
                    }
                    '"' => {
                        result.push('"');
                        chars.next();
                    }
                    '0' => {
                        result.push('\0');
                        chars.next();
                    }
                    'x' => {
                        let mut hex = String::new();
                        chars.next();

                        for _ in 0..2 {
                            if let Some(ch) = chars.peek() {
                                if ch.is_ascii_hexdigit() {
                                    hex.push(*ch);
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                        }

                        if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                            result.push(byte as char);
                        }
                    }
                    _ => {
                        result.push(ch); // Keep the backslash
                    }
                }
            } else {
                result.push(ch); // Keep the lone backslash
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Converts source text into a flat token sequence plus any lexical
/// diagnostics. Never fails the whole run: unrecognised characters and
/// unterminated strings are recorded and lexing continues. A synthetic
/// EOF token always terminates the stream.
pub fn tokenize(source: String, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    let mut lex = Lexer::new(source, file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone());
                matched = true;
                break;
            }
        }

        if !matched {
            let character = lex.at();
            lex.error(ErrorKind::UnrecognisedCharacter {
                character: character.to_string(),
            });
            lex.advance_n(character.len_utf8());
        }
    }

    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: Position(lex.pos as u32, Rc::clone(&lex.file)),
            end: Position(lex.pos as u32, Rc::clone(&lex.file)),
        }
    ));

    (lex.tokens, lex.errors)
}
