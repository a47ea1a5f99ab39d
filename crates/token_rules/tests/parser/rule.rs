use token_rules::{
    ast::{Color, Interaction, Rule, Shape, Size, Token},
    error::RuleDiagnostic,
    parse,
};

fn assert_parses_to(src: &str, want: Rule) {
    match parse(src) {
        Ok(got) => assert_eq!(got, want),
        Err(err) => panic!("expected success on {:?}, got: {}", src, err.report(src)),
    }
}

fn assert_fails(src: &str) {
    let parsed = parse(src);
    assert!(
        parsed.is_err(),
        "expected parse to fail on {:?}, but it succeeded with value {:?}",
        src,
        parsed
    );
}

fn touch(color: Color, shape: Shape) -> Rule {
    Rule::Leaf(Interaction::touch(Token::plain(color, shape)))
}

fn pick_up(color: Color, shape: Shape) -> Rule {
    Rule::Leaf(Interaction::pick_up(Token::plain(color, shape)))
}

#[test]
fn do_nothing() {
    assert_parses_to("nothing", Rule::DoNothing);
}

#[test]
fn nothing_must_be_whole_input() {
    assert_fails("nothing\ntouch red square");
    assert_fails("touch red square, nothing");
}

#[test]
fn single_leaf() {
    assert_parses_to("touch red square", touch(Color::Red, Shape::Square));
}

#[test]
fn ordered_steps() {
    assert_parses_to(
        "touch red square\ntouch yellow circle\npick up green square",
        Rule::InOrder(vec![
            touch(Color::Red, Shape::Square),
            touch(Color::Yellow, Shape::Circle),
            pick_up(Color::Green, Shape::Square),
        ]),
    );
}

#[test]
fn unordered_clauses() {
    assert_parses_to(
        "touch red square, touch yellow circle",
        Rule::InAnyOrder(vec![
            touch(Color::Red, Shape::Square),
            touch(Color::Yellow, Shape::Circle),
        ]),
    );
}

#[test]
fn unordered_sized_clauses() {
    assert_parses_to(
        "touch large white circle, touch small orange square",
        Rule::InAnyOrder(vec![
            Rule::Leaf(Interaction::touch(Token::sized(
                Size::Large,
                Color::White,
                Shape::Circle,
            ))),
            Rule::Leaf(Interaction::touch(Token::sized(
                Size::Small,
                Color::Orange,
                Shape::Square,
            ))),
        ]),
    );
}

#[test]
fn partially_unordered_steps() {
    assert_parses_to(
        "touch red square, touch yellow circle\npick up white circle",
        Rule::InOrder(vec![
            Rule::InAnyOrder(vec![
                touch(Color::Red, Shape::Square),
                touch(Color::Yellow, Shape::Circle),
            ]),
            pick_up(Color::White, Shape::Circle),
        ]),
    );
}

#[test]
fn alternative() {
    assert_parses_to(
        "pick up blue circle or pick up red square",
        Rule::first_or_second(
            pick_up(Color::Blue, Shape::Circle),
            pick_up(Color::Red, Shape::Square),
        ),
    );
}

#[test]
fn alternative_inside_unordered_step() {
    assert_parses_to(
        "touch red square or touch blue circle, pick up green square",
        Rule::InAnyOrder(vec![
            Rule::first_or_second(
                touch(Color::Red, Shape::Square),
                touch(Color::Blue, Shape::Circle),
            ),
            pick_up(Color::Green, Shape::Square),
        ]),
    );
}

#[test]
fn blank_lines_are_ignored() {
    assert_parses_to(
        "\ntouch red square\n\n\npick up green square\n",
        Rule::InOrder(vec![
            touch(Color::Red, Shape::Square),
            pick_up(Color::Green, Shape::Square),
        ]),
    );
}

#[test]
fn display_round_trip() {
    let src = "touch red square or touch blue circle, pick up green square\nput white square between yellow circle and red circle";
    let rule = parse(src).unwrap();
    assert_eq!(rule.to_string(), src);
    assert_eq!(parse(&rule.to_string()).unwrap(), rule);
}

#[test]
fn chained_alternatives_fail() {
    assert_fails("touch red square or touch blue circle or touch green square");
}

#[test]
fn dangling_separators_fail() {
    assert_fails("touch red square,");
    assert_fails(", touch red square");
    assert_fails("touch red square or");
}

#[test]
fn empty_input_fails() {
    assert_fails("");
    assert_fails("\n\n");
}

#[test]
fn mixed_sizes_fail() {
    assert_fails("use small white square to touch yellow circle");
}

#[test]
fn mixed_sizes_report_why() {
    let src = "use small white square to touch yellow circle";
    let err = parse(src).unwrap_err();
    assert_eq!(
        err.diagnostics,
        vec![RuleDiagnostic {
            span: 0..src.len(),
            message: "either every token of an interaction has a size or none does".to_string(),
        }]
    );

    let src = "touch red square
put white square between small yellow circle and red circle";
    let err = parse(src).unwrap_err();
    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].span, 17..src.len());
    assert!(err.diagnostics[0].message.contains("has a size"));
}

#[test]
fn expected_lexemes_are_quoted_once() {
    let src = "put red square between yellow circle or white circle";
    let err = parse(src).unwrap_err();
    let message = &err.diagnostics[0].message;
    assert!(message.contains("`and`"), "{}", message);
    assert!(!message.contains("'"), "{}", message);
}

#[test]
fn diagnostics_point_at_offending_word() {
    let src = "touch purple square";
    let err = parse(src).unwrap_err();
    assert_eq!(err.diagnostics[0].span, 6..12);
    assert!(err.report(src).contains("malformed rule"));
}

#[test]
fn lexer_errors_are_reported() {
    let src = "touch red square!";
    let err = parse(src).unwrap_err();
    assert_eq!(err.diagnostics[0].span.start, 16);
}
