use std::io::{self, Write};

use token_trial::{
    board::BoardLayout,
    logger::init_logging,
    matcher::Offer,
    script::parse_gesture,
    session::{TrialConfig, TrialHandle, TrialSession},
};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const RED: &str = "\x1b[31m";

fn print_banner() {
    println!("{}{}Welcome to the \"Token Board REPL\"!{}", BOLD, CYAN, RESET);
    println!();
    println!(
        "{}Enter a rule, one step per line, and finish it with an empty line.{}",
        BLUE, RESET
    );
    println!("{}Then play gestures on the board until the rule is satisfied.{}", BLUE, RESET);
    println!();
    println!("{}For example:{}", GREEN, RESET);
    println!("  {}touch red square, touch yellow circle{}", MAGENTA, RESET);
    println!("  {}pick up white circle{}", MAGENTA, RESET);
    println!();

    println!("{}{}Rule Syntax:{}\n", BOLD, CYAN, RESET);
    println!("  {}nothing{}                          Expect no interaction", YELLOW, RESET);
    println!("  {}touch A{}                          Touch a token", YELLOW, RESET);
    println!("  {}pick up A{}                        Drop a token in the holding area", YELLOW, RESET);
    println!("  {}use A to touch B{}                 Drop one token onto another", YELLOW, RESET);
    println!("  {}move A away from B{}               Move a token further from another", YELLOW, RESET);
    println!("  {}put A left of B{}                  Place a token left of another", YELLOW, RESET);
    println!("  {}put A between B and C{}            Place a token between two others", YELLOW, RESET);
    println!("  {}a, b{}                             Both, in any order", YELLOW, RESET);
    println!("  {}a or b{}                           Either one", YELLOW, RESET);
    println!("  {}one step per line{}                Steps happen in order", YELLOW, RESET);
    println!();
    println!("{}{}Gestures:{}\n", BOLD, CYAN, RESET);
    println!("  {}click A{}", GREEN, RESET);
    println!("  {}drag A{}", GREEN, RESET);
    println!("  {}drop on B{} / {}drop on holding area{}", GREEN, RESET, GREEN, RESET);
    println!("  {}move A to <left> <top>{}", GREEN, RESET);
    println!("  {}release A{}", GREEN, RESET);
    println!();
    println!(
        "{}Tokens are written as [size] color shape, e.g. {}small red circle{}.",
        BLUE, YELLOW, RESET
    );
    println!("{}Use 'board' to list starting positions, 'exit' to abandon a trial.{}\n", BLUE, RESET);
}

/// Reads rule lines until an empty line. `None` on end of input.
fn read_rule(stdin: &io::Stdin, stdout: &mut io::Stdout) -> io::Result<Option<String>> {
    let mut rule = String::new();
    loop {
        print!("{}{}> {}", BOLD, MAGENTA, RESET);
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok((!rule.is_empty()).then_some(rule));
        }
        if line.trim().is_empty() {
            if rule.is_empty() {
                continue;
            }
            return Ok(Some(rule));
        }
        rule.push_str(line.trim_end());
        rule.push('\n');
    }
}

fn print_board(layout: &BoardLayout) {
    println!("==========================");
    for (token, position) in layout.initial_positions() {
        println!(
            "{}    {}{}: starts at ({}, {})",
            BLUE, token, RESET, position.left, position.top
        );
    }
    println!("==========================");
}

async fn play(handle: &mut TrialHandle, layout: &BoardLayout, stdin: &io::Stdin) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut line_number = 0;
    loop {
        print!(">> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }
        line_number += 1;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(());
        }
        if trimmed.eq_ignore_ascii_case("board") {
            print_board(layout);
            continue;
        }

        let gesture = match parse_gesture(trimmed, line_number) {
            Ok(gesture) => gesture,
            Err(err) => {
                eprintln!("{}Could not read gesture: {}{}", RED, err, RESET);
                continue;
            }
        };

        match handle.call(gesture).await {
            Ok(ack) => {
                match ack.offer {
                    None => {}
                    Some(Offer::Ignored) => println!("{}Nothing pending matched.{}", YELLOW, RESET),
                    Some(Offer::Advanced) => println!("{}Progress made.{}", GREEN, RESET),
                    Some(Offer::Completed) => println!("{}Step completed.{}", GREEN, RESET),
                }
                if ack.concluded {
                    break;
                }
            }
            Err(e) => {
                eprintln!("{}Failed to send gesture: {}{}", MAGENTA, e, RESET);
                break;
            }
        }
    }

    match handle.finished().await {
        Ok(result) => {
            println!("{}{}Trial {}!{}", BOLD, GREEN, result.outcome, RESET);
            println!(
                "{}Accepted {} interaction(s) out of {} submitted in {} ms.{}",
                BLUE,
                result.accepted.len(),
                result.submissions,
                result.response_time().num_milliseconds(),
                RESET
            );
            for interaction in result.accepted {
                println!("{}    {}{}", YELLOW, interaction, RESET);
            }
        }
        Err(e) => eprintln!("{}Trial ended without a result: {}{}", MAGENTA, e, RESET),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    init_logging();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_banner();
    let layout = match std::env::args().nth(1).as_deref() {
        Some("two-sizes") => BoardLayout::two_sizes(),
        _ => BoardLayout::standard(),
    };

    loop {
        println!("{}{}Enter a rule:{}", BOLD, CYAN, RESET);
        let Some(rule) = read_rule(&stdin, &mut stdout)? else {
            return Ok(());
        };

        let config = TrialConfig::new("Follow the rule.", rule.as_str()).with_layout(layout.clone());
        let mut handle = match TrialSession::start(config) {
            Ok(handle) => handle,
            Err(token_trial::TrialError::MalformedRule(err)) => {
                eprint!("{}", err.report(&rule));
                println!("{}Rule invalid, try again.{}", YELLOW, RESET);
                continue;
            }
            Err(e) => {
                eprintln!("{}Could not start trial: {}{}", MAGENTA, e, RESET);
                continue;
            }
        };
        println!("{}Trial {} started, go ahead.{}", GREEN, handle.id(), RESET);

        play(&mut handle, &layout, &stdin).await?;
    }
}
