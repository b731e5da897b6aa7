//! Unit tests for error handling.
//!
//! This module contains tests for diagnostic construction and rendering.

use crate::errors::errors::{Error, ErrorKind, ErrorOrigin, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorOrigin::Lexer,
        ErrorKind::UnrecognisedCharacter {
            character: "@".to_string(),
        },
        Position(10, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert_eq!(error.get_origin(), ErrorOrigin::Lexer);
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.lang".to_string()));
    let error = Error::new(
        ErrorOrigin::Parser,
        ErrorKind::UnexpectedToken {
            expected: "Semicolon".to_string(),
            found: "}".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorOrigin::Parser,
        ErrorKind::UnexpectedToken {
            expected: "Ident".to_string(),
            found: "=".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.message(), "unexpected token: expected Ident, found \"=\"");
}

#[test]
fn test_invalid_assignment_target_tip() {
    let error = Error::new(
        ErrorOrigin::Parser,
        ErrorKind::InvalidAssignmentTarget,
        Position(3, Rc::new("test.lang".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("assigned")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_unrecognised_character_has_no_tip() {
    let error = Error::new(
        ErrorOrigin::Lexer,
        ErrorKind::UnrecognisedCharacter {
            character: "#".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_errors_compare_equal() {
    let make = || {
        Error::new(
            ErrorOrigin::Lexer,
            ErrorKind::UnterminatedString,
            Position(7, Rc::new("test.lang".to_string())),
        )
    };

    assert_eq!(make(), make());
}
