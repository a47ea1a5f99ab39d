use std::{fmt, ops::Range};

use ariadne::{Config, Label, Report, ReportKind, Source};
use chumsky::error::{Rich, RichPattern, RichReason};
use chumsky::span::{SimpleSpan, Span as _};
use thiserror::Error;

use crate::lexer::Spanned;

/// One problem found in rule text, located by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDiagnostic {
    pub span: Range<usize>,
    pub message: String,
}

/// The rule text does not conform to the rule grammar.
///
/// No partial rule is ever produced alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed rule: {}", summary(.diagnostics))]
pub struct MalformedRule {
    pub diagnostics: Vec<RuleDiagnostic>,
}

fn summary(diagnostics: &[RuleDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn pattern<T: fmt::Display>(pattern: &RichPattern<'_, T>) -> String {
    match pattern {
        RichPattern::Token(token) => format!("`{}`", &**token),
        RichPattern::Label(label) => label.to_string(),
        other => other.to_string(),
    }
}

fn describe<T: fmt::Display, S>(error: &Rich<'_, T, S>) -> String {
    if let RichReason::Custom(message) = error.reason() {
        return message.to_string();
    }
    let found = error
        .found()
        .map(|found| format!("`{}`", found))
        .unwrap_or_else(|| "end of input".to_string());
    let expected: Vec<String> = error.expected().map(pattern).collect();
    if expected.is_empty() {
        format!("unexpected {}", found)
    } else {
        format!("found {}, expected {}", found, expected.join(" or "))
    }
}

impl MalformedRule {
    /// Errors reported by the lexer carry byte spans already.
    pub(crate) fn from_lexer(errors: Vec<Rich<'_, char, SimpleSpan>>) -> Self {
        let diagnostics = errors
            .iter()
            .map(|error| RuleDiagnostic {
                span: error.span().start()..error.span().end(),
                message: describe(error),
            })
            .collect();
        MalformedRule { diagnostics }
    }

    /// Errors reported by the grammar are spanned in lexeme indices; map them
    /// back onto the rule text.
    pub(crate) fn from_parser<T: fmt::Display>(
        errors: Vec<Rich<'_, T, SimpleSpan>>,
        lexemes: &[Spanned<T>],
        source_len: usize,
    ) -> Self {
        let diagnostics = errors
            .iter()
            .map(|error| {
                let first = error.span().start();
                let last = error.span().end().max(first + 1) - 1;
                let span = match (lexemes.get(first), lexemes.get(last)) {
                    (Some((_, start)), Some((_, end))) => start.start()..end.end(),
                    (Some((_, start)), None) => start.start()..source_len,
                    _ => source_len..source_len,
                };
                RuleDiagnostic {
                    span,
                    message: describe(error),
                }
            })
            .collect();
        MalformedRule { diagnostics }
    }

    /// Renders every diagnostic against `src`, without terminal colors.
    pub fn report(&self, src: &str) -> String {
        let mut out = Vec::new();
        for diagnostic in &self.diagnostics {
            let written = Report::build(ReportKind::Error, diagnostic.span.clone())
                .with_config(Config::default().with_color(false))
                .with_message("malformed rule")
                .with_label(Label::new(diagnostic.span.clone()).with_message(&diagnostic.message))
                .finish()
                .write(Source::from(src), &mut out);
            if written.is_err() {
                break;
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}
