use crate::utils::lex_lexemes;
use chumsky::Parser;
use token_rules::{
    ast::{Action, Color, Interaction, Shape, Size, Token},
    parser::interaction_parser,
};

fn assert_parses_to(src: &str, want: Interaction) {
    let lexemes = lex_lexemes(src);
    let parsed = interaction_parser().parse(lexemes.as_slice());
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
    let parsed = interaction_parser().parse(lexemes.as_slice());
    assert!(
        parsed.has_errors(),
        "expected parse to fail on {:?}, but it succeeded with value {:?}",
        src,
        parsed.output()
    );
}

fn white_square() -> Token {
    Token::plain(Color::White, Shape::Square)
}

fn yellow_circle() -> Token {
    Token::plain(Color::Yellow, Shape::Circle)
}

#[test]
fn touch() {
    assert_parses_to(
        "touch red square",
        Interaction::Single {
            token: Token::plain(Color::Red, Shape::Square),
            action: Action::Touch,
        },
    );
}

#[test]
fn pick_up() {
    assert_parses_to(
        "pick up red square",
        Interaction::pick_up(Token::plain(Color::Red, Shape::Square)),
    );
}

#[test]
fn sized_touch() {
    assert_parses_to(
        "touch small red square",
        Interaction::touch(Token::sized(Size::Small, Color::Red, Shape::Square)),
    );
}

#[test]
fn use_to_touch() {
    assert_parses_to(
        "use white square to touch yellow circle",
        Interaction::Dual {
            first: white_square(),
            second: yellow_circle(),
            action: Action::UseToTouch,
        },
    );
}

#[test]
fn sized_use_to_touch() {
    assert_parses_to(
        "use small white square to touch large yellow circle",
        Interaction::use_to_touch(
            Token::sized(Size::Small, Color::White, Shape::Square),
            Token::sized(Size::Large, Color::Yellow, Shape::Circle),
        ),
    );
}

#[test]
fn move_away_from() {
    assert_parses_to(
        "move white square away from yellow circle",
        Interaction::move_away_from(white_square(), yellow_circle()),
    );
}

#[test]
fn put_left_of() {
    assert_parses_to(
        "put white square left of yellow circle",
        Interaction::put_left_of(white_square(), yellow_circle()),
    );
}

#[test]
fn put_between() {
    assert_parses_to(
        "put white square between yellow circle and red circle",
        Interaction::Triple {
            first: white_square(),
            second: yellow_circle(),
            third: Token::plain(Color::Red, Shape::Circle),
            action: Action::PutBetween,
        },
    );
}

#[test]
fn mixed_sizes_fail() {
    assert_fails("use small white square to touch yellow circle"); // second token has no size
}

#[test]
fn mixed_sizes_in_triple_fail() {
    assert_fails("put white square between small yellow circle and red circle");
}

#[test]
fn incomplete_template_fails() {
    assert_fails("move white square away yellow circle"); // missing `from`
}

#[test]
fn pick_without_up_fails() {
    assert_fails("pick red square");
}

#[test]
fn unknown_action_fails() {
    assert_fails("kick red square");
}
