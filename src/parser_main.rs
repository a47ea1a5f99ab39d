use std::process::ExitCode;

use token_rules::parse_and_print;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let _bin = args.next();
    let Some(input) = args.next() else {
        eprintln!("Please provide rule text to parse as the first argument.");
        return ExitCode::FAILURE;
    };

    // Literal "\n" in shell arguments separates ordered steps.
    let input = input.replace("\\n", "\n");
    match parse_and_print(&input) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
