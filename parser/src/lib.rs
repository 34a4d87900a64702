//! Converts Whisker source text into the syntax tree.
extern crate whisker_dsl as dsl;

mod lexer;
mod parser;


use dsl::{ast::StmtKind, diagnostic::Diagnostic};

pub use lexer::tokenize;
pub use parser::parse;

/// Parse a full Whisker program.
///
/// Returns the statements when the program has neither token nor parse
/// errors, otherwise every diagnostic, token errors first.
pub fn parse_program(source: &str) -> Result<Vec<StmtKind>, Vec<Diagnostic>> {
    let (tokens, mut diagnostics) = tokenize(source);
    let (statements, mut parse_diagnostics) = parse(tokens);
    diagnostics.append(&mut parse_diagnostics);

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }
    Ok(statements)
}
