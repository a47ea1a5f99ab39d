use std::sync::{Arc, Mutex};

use token_rules::{
    ast::{Color, Interaction, Shape, Size, Token},
    parse,
};
use token_trial::{
    board::{BoardControl, BoardLayout, Gesture},
    controller::TokenController,
    matcher::{Matcher, Offer, Outcome, TrialResult},
    script::parse_script,
};

type Board = TokenController<BoardControl, Matcher>;

fn board(rule: &str, layout: BoardLayout) -> (Board, Arc<Mutex<Vec<TrialResult>>>) {
    let rule = match parse(rule) {
        Ok(rule) => rule,
        Err(err) => panic!("rule {:?} should parse: {}", rule, err.report(rule)),
    };
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = results.clone();
    let matcher = Matcher::new(rule, move |result| sink.lock().unwrap().push(result));
    (
        TokenController::new(BoardControl::new(layout), matcher),
        results,
    )
}

fn play(board: &mut Board, script: &str) -> Vec<Option<Offer>> {
    parse_script(script)
        .unwrap()
        .into_iter()
        .map(|gesture| board.perform(gesture))
        .collect()
}

fn red_circle() -> Token {
    Token::plain(Color::Red, Shape::Circle)
}

#[test]
fn click_touches_token() {
    let (mut board, results) = board("touch red square", BoardLayout::standard());
    let offers = play(&mut board, "click red square");
    assert_eq!(offers, vec![Some(Offer::Completed)]);

    play(&mut board, "click red square");
    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, Outcome::Satisfied);
    assert_eq!(
        results[0].accepted,
        vec![Interaction::touch(Token::plain(Color::Red, Shape::Square))]
    );
}

#[test]
fn drop_onto_token_uses_dragged_token() {
    let (mut board, results) = board(
        "use red circle to touch green square",
        BoardLayout::standard(),
    );
    let offers = play(&mut board, "drag red circle\ndrop on green square");
    assert_eq!(offers, vec![None, Some(Offer::Completed)]);
    assert_eq!(results.lock().unwrap().len(), 1);
}

#[test]
fn holding_area_picks_up_dragged_token() {
    let (mut board, results) = board("pick up red circle", BoardLayout::standard());
    play(&mut board, "drag red circle\ndrop on holding area");
    assert!(results.lock().unwrap().is_empty());

    let offers = play(&mut board, "release red circle");
    assert_eq!(offers, vec![Some(Offer::Completed)]);
    assert_eq!(
        results.lock().unwrap()[0].accepted,
        vec![Interaction::pick_up(red_circle())]
    );
}

#[test]
fn unordered_clauses_then_ordered_step() {
    let (mut board, results) = board(
        "touch red square, touch yellow circle\npick up white circle",
        BoardLayout::standard(),
    );

    // Out of order: nothing advances.
    let offers = play(&mut board, "drag white circle\ndrop on holding area\nrelease white circle");
    assert_eq!(offers, vec![None, None, Some(Offer::Ignored)]);

    let offers = play(
        &mut board,
        "click yellow circle\nclick red square\ndrag white circle\ndrop on holding area\nrelease white circle",
    );
    assert_eq!(
        offers,
        vec![
            Some(Offer::Advanced),
            Some(Offer::Advanced),
            None,
            None,
            Some(Offer::Completed),
        ]
    );

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].submissions, 4);
}

#[test]
fn moving_away_is_judged_from_centroids() {
    // Green square starts at (630, 210), yellow square at (840, 210).
    let (mut board, results) = board(
        "move green square away from yellow square",
        BoardLayout::standard(),
    );

    let offers = play(
        &mut board,
        "drag green square\nmove green square to 700 210\nrelease green square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Ignored)));

    let offers = play(
        &mut board,
        "drag green square\nmove green square to 300 210\nrelease green square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Completed)));
    assert_eq!(
        results.lock().unwrap()[0].accepted,
        vec![Interaction::move_away_from(
            Token::plain(Color::Green, Shape::Square),
            Token::plain(Color::Yellow, Shape::Square),
        )]
    );
}

#[test]
fn putting_left_of_and_between() {
    let (mut board, results) = board(
        "put yellow square left of red square\nput green square between red circle and black circle",
        BoardLayout::standard(),
    );

    let offers = play(
        &mut board,
        "drag yellow square\nmove yellow square to 0 400\nrelease yellow square\n\
         drag green square\nmove green square to 100 0\nrelease green square",
    );
    assert_eq!(offers[2], Some(Offer::Advanced));
    assert_eq!(offers[5], Some(Offer::Completed));
    assert_eq!(results.lock().unwrap().len(), 1);
}

#[test]
fn release_right_of_reference_is_not_left_of() {
    // Red square's centroid sits at x = 285.
    let (mut board, results) = board(
        "put yellow square left of red square",
        BoardLayout::standard(),
    );
    let offers = play(
        &mut board,
        "drag yellow square\nmove yellow square to 400 400\nrelease yellow square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Ignored)));
    assert!(results.lock().unwrap().is_empty());
}

#[test]
fn release_outside_references_is_not_between() {
    // Red circle's centroid sits at x = 75, black circle's at x = 285.
    let (mut board, results) = board(
        "put green square between red circle and black circle",
        BoardLayout::standard(),
    );
    let offers = play(
        &mut board,
        "drag green square\nmove green square to 400 0\nrelease green square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Ignored)));

    let offers = play(
        &mut board,
        "drag green square\nmove green square to 210 0\nrelease green square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Ignored)));
    assert!(results.lock().unwrap().is_empty());
}

#[test]
fn release_of_wrong_token_does_not_count_as_directional() {
    let (mut board, results) = board(
        "put yellow square left of red square",
        BoardLayout::standard(),
    );
    let offers = play(
        &mut board,
        "drag white square\nmove white square to 0 400\nrelease white square",
    );
    assert_eq!(offers.last(), Some(&Some(Offer::Ignored)));
    assert!(results.lock().unwrap().is_empty());
}

#[test]
fn sized_rules_need_sized_tokens() {
    let (mut board, results) = board(
        "touch small red square or touch large green circle",
        BoardLayout::two_sizes(),
    );

    // Plain tokens are not on this board at all.
    assert_eq!(board.perform(Gesture::Click(Token::plain(Color::Red, Shape::Square))), None);

    let offers = play(&mut board, "click large red square\nclick small red square");
    assert_eq!(offers, vec![Some(Offer::Ignored), Some(Offer::Completed)]);
    assert_eq!(
        results.lock().unwrap()[0].accepted,
        vec![Interaction::touch(Token::sized(
            Size::Small,
            Color::Red,
            Shape::Square
        ))]
    );
}
