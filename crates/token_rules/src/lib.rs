pub mod ast;
pub mod error;
pub mod lexeme;
pub mod lexer;
pub mod parser;

use chumsky::Parser;
use tracing::debug;

use crate::ast::Rule;
use crate::error::MalformedRule;
use crate::lexeme::Lexeme;
use crate::lexer::lexer;
use crate::parser::rule_parser;

/// Compiles rule text into a [`Rule`] tree.
pub fn parse(src: &str) -> Result<Rule, MalformedRule> {
    // Lex
    let spanned = lexer()
        .parse(src)
        .into_result()
        .map_err(MalformedRule::from_lexer)?;
    let lexemes: Vec<Lexeme<'_>> = spanned.iter().map(|(l, _)| l.clone()).collect();

    // Parse
    let rule = rule_parser()
        .parse(lexemes.as_slice())
        .into_result()
        .map_err(|errs| MalformedRule::from_parser(errs, &spanned, src.len()))?;

    debug!(leaves = rule.leaf_count(), "parsed rule text");
    Ok(rule)
}

/// Parses `src` and prints the rule tree, or the rendered diagnostics.
pub fn parse_and_print(src: &str) -> Result<Rule, MalformedRule> {
    match parse(src) {
        Ok(rule) => {
            println!("{:#?}", rule);
            Ok(rule)
        }
        Err(err) => {
            eprint!("{}", err.report(src));
            Err(err)
        }
    }
}
