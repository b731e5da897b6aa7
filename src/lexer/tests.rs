use super::{
    lexer::tokenize,
    tokens::TokenKind,
};
use crate::errors::errors::ErrorKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = tokenize(source.to_string(), None);
    assert!(errors.is_empty(), "unexpected lexer errors: {:?}", errors);
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_yields_only_eof() {
    let (tokens, errors) = tokenize(String::new(), None);

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn keywords_are_looked_up_after_the_identifier_match() {
    assert_eq!(
        kinds("let mut fn return"),
        vec![
            TokenKind::Let,
            TokenKind::Mut,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::EOF
        ]
    );
}

#[test]
fn switch_is_the_match_keyword() {
    assert_eq!(kinds("switch"), vec![TokenKind::Match, TokenKind::EOF]);
}

#[test]
fn identifiers_allow_unicode_letters_and_underscores() {
    let (tokens, errors) = tokenize("café_1 _leading".to_string(), None);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].value, "café_1");
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].value, "_leading");
}

#[test]
fn keyword_prefixes_stay_identifiers() {
    let (tokens, _) = tokenize("letter iffy".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
}

#[test]
fn numbers_lex_integer_and_decimal_forms() {
    let (tokens, errors) = tokenize("42 3.14".to_string(), None);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[1].kind, TokenKind::Number);
}

#[test]
fn range_after_a_number_is_not_a_malformed_decimal() {
    assert_eq!(
        kinds("1..5"),
        vec![
            TokenKind::Number,
            TokenKind::DotDot,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn trailing_decimal_point_records_a_diagnostic() {
    let (tokens, errors) = tokenize("1. ".to_string(), None);

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].get_kind(), ErrorKind::ExpectedDigit));
    // The digits still become a token so parsing can continue, and the
    // token's span covers only the digits, not the eaten dot.
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[0].span.end.0, 1);
    assert_eq!(errors[0].get_position().0, 1);
}

#[test]
fn dot_before_an_identifier_is_a_field_access_not_an_error() {
    let (tokens, errors) = tokenize("1.foo".to_string(), None);

    assert!(errors.is_empty(), "unexpected lexer errors: {:?}", errors);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Number,
            TokenKind::Dot,
            TokenKind::Ident,
            TokenKind::EOF
        ]
    );
}

#[test]
fn strings_decode_escape_sequences() {
    let (tokens, errors) = tokenize(r#""a\nb\tc \x41 \\""#.to_string(), None);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\nb\tc A \\");
}

#[test]
fn unterminated_strings_are_recorded_and_lexing_continues() {
    let (tokens, errors) = tokenize("\"open".to_string(), None);

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].get_kind(),
        ErrorKind::UnterminatedString
    ));
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "open");
}

#[test]
fn line_comments_are_skipped() {
    assert_eq!(
        kinds("let x // trailing comment\n= 1"),
        vec![
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn multi_character_operators_win_over_their_prefixes() {
    assert_eq!(
        kinds("..= .. . == = != ! :: : => >="),
        vec![
            TokenKind::DotDotEqual,
            TokenKind::DotDot,
            TokenKind::Dot,
            TokenKind::EqualEqual,
            TokenKind::Equal,
            TokenKind::BangEqual,
            TokenKind::Bang,
            TokenKind::ColonColon,
            TokenKind::Colon,
            TokenKind::FatArrow,
            TokenKind::GreaterEqual,
            TokenKind::EOF
        ]
    );
}

#[test]
fn compound_assignment_operators_lex_as_single_tokens() {
    assert_eq!(
        kinds("+= -= *= /= %= &= |= ^="),
        vec![
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
            TokenKind::AsteriskEqual,
            TokenKind::SlashEqual,
            TokenKind::ModulusEqual,
            TokenKind::BitwiseAndEqual,
            TokenKind::BitwiseOrEqual,
            TokenKind::BitwiseXorEqual,
            TokenKind::EOF
        ]
    );
}

#[test]
fn unrecognised_characters_are_recorded_and_skipped() {
    let (tokens, errors) = tokenize("let # x".to_string(), None);

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].get_kind(),
        ErrorKind::UnrecognisedCharacter { .. }
    ));
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Let, TokenKind::Ident, TokenKind::EOF]
    );
}

#[test]
fn spans_track_byte_offsets() {
    let (tokens, _) = tokenize("let x = 1;".to_string(), None);

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[3].span.start.0, 8);

    // The EOF sentinel sits at the end of the source.
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span.start.0, 10);
}

#[test]
fn file_name_defaults_to_shell() {
    let (tokens, _) = tokenize("x".to_string(), None);
    assert_eq!(*tokens[0].span.start.1, "shell");

    let (tokens, _) = tokenize("x".to_string(), Some(String::from("main.lang")));
    assert_eq!(*tokens[0].span.start.1, "main.lang");
}
