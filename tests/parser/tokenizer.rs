//! Tokenization tests.

use quill_foundation::ErrorKind;
use quill_parser::Token;

use crate::fixtures::{fixture, words};

#[test]
fn take_cotton_candy() {
    let f = fixture();
    let normalized = f.parser.normalize(&f.world, "take cotton candy").unwrap();

    let tokens = f.parser.tokenize(&f.world, &normalized).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].command().map(|c| c.name()), Some("take"));
    assert_eq!(
        tokens[1],
        Token::Entity {
            id: f.candy,
            name: "cotton candy".into(),
        }
    );
}

#[test]
fn unknown_word_after_the_verb() {
    let f = fixture();
    let err = f
        .parser
        .tokenize(&f.world, &words(&["take", "broomstick", "wand"]))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownToken("broomstick".into()));
}

#[test]
fn unknown_first_word() {
    let f = fixture();
    let err = f
        .parser
        .tokenize(&f.world, &words(&["accio", "wand"]))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownVerb("accio".into()));
}

#[test]
fn directions_are_keywords() {
    let f = fixture();
    let tokens = f.parser.tokenize(&f.world, &words(&["go", "north"])).unwrap();
    assert_eq!(tokens[1], Token::Keyword("north".into()));
}

#[test]
fn every_word_is_resolved_in_order() {
    let f = fixture();
    let tokens = f
        .parser
        .tokenize(&f.world, &words(&["take", "wand", "cotton candy", "wand"]))
        .unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(
        tokens[1],
        Token::Entity {
            id: f.wand,
            name: "wand".into(),
        }
    );
    assert_eq!(tokens[1], tokens[3]);
}
