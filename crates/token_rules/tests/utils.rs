use chumsky::Parser;
use token_rules::{lexeme::Lexeme, lexer::lexer};

/// Lex `src` and return the raw `Vec<Lexeme>` (panicking on lexer‐errors).
pub fn lex_lexemes(src: &str) -> Vec<Lexeme<'_>> {
    let lex = lexer().parse(src);
    if lex.has_errors() {
        let errs: Vec<_> = lex.errors().collect();
        panic!("lexer errors for {:?}: {:#?}", src, errs);
    }
    // grab owned Vec<(Lexeme,Span)>
    let spanned = lex.output().cloned().expect("no lexemes");
    // strip spans
    spanned.into_iter().map(|(t, _)| t).collect()
}
