use crate::utils::lex_lexemes;
use chumsky::Parser;
use token_rules::{
    ast::{Color, Shape, Size, Token},
    parser::token_parser,
};

fn assert_parses_to(src: &str, want: Token) {
    let lexemes = lex_lexemes(src);
    let parsed = token_parser().parse(lexemes.as_slice());
    assert!(
        !parsed.has_errors(),
        "expected success on {:?}, got errors: {:#?}",
        src,
        parsed.errors().collect::<Vec<_>>()
    );
    assert_eq!(parsed.output().cloned(), Some(want));
}

fn assert_fails(src: &str) {
    let lexemes = lex_lexemes(src);
    let parsed = token_parser().parse(lexemes.as_slice());
    assert!(
        parsed.has_errors(),
        "expected parse to fail on {:?}, but it succeeded with value {:?}",
        src,
        parsed.output()
    );
}

#[test]
fn plain_token() {
    assert_parses_to("red square", Token::plain(Color::Red, Shape::Square));
}

#[test]
fn sized_token() {
    assert_parses_to(
        "large yellow circle",
        Token::sized(Size::Large, Color::Yellow, Shape::Circle),
    );
}

#[test]
fn missing_shape() {
    assert_fails("red");
}

#[test]
fn size_after_color() {
    assert_fails("red small square");
}

#[test]
fn unknown_color() {
    assert_fails("purple square");
}
