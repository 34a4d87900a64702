//! The compiler as individual stages (to enable testing).
//!
//! Each stage returns the diagnostics of the first stage that produced any.
//! Later stages never run on a program that earlier stages rejected.

use log::debug;
use whisker_codegen::emit::Instruction;
use whisker_dsl::{ast::StmtKind, diagnostic::Diagnostic, token::Token};

/// Lines placed before the program body. Execution starts at `.main` and
/// halts when the body jumps back to `.end`.
const PREAMBLE: [&str; 4] = ["JMP .main", ".end", "HLT", ".main"];
const TRAILER: [&str; 1] = ["JMP .end"];

/// Tokenizes the source.
///
/// Returns `Err` with every lexical diagnostic when the source has any.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<Diagnostic>> {
    let (tokens, diagnostics) = whisker_parser::tokenize(source);
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }
    Ok(tokens)
}

/// Parses the source into a program.
pub fn parse(source: &str) -> Result<Vec<StmtKind>, Vec<Diagnostic>> {
    whisker_parser::parse_program(source)
}

/// Parses and analyzes the source.
///
/// Returns `Ok` with the program if it is free of syntax and semantic errors.
pub fn check(source: &str) -> Result<Vec<StmtKind>, Vec<Diagnostic>> {
    let program = parse(source)?;
    whisker_analyzer::analyze(&program).map_err(|err| vec![err])?;
    Ok(program)
}

/// Runs the full pipeline and returns the framed assembly program.
pub fn compile(source: &str) -> Result<Vec<String>, Vec<Diagnostic>> {
    let program = check(source)?;
    let body = whisker_codegen::generate(&program).map_err(|err| vec![err])?;
    debug!("Code generation produced {} instructions", body.len());
    Ok(assemble(&body))
}

/// Wraps the instruction body with the program preamble and trailer.
pub fn assemble(body: &[Instruction]) -> Vec<String> {
    PREAMBLE
        .iter()
        .map(|line| line.to_string())
        .chain(body.iter().map(|instruction| instruction.to_string()))
        .chain(TRAILER.iter().map(|line| line.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{assemble, check, compile, tokenize};
    use whisker_test::read_shared_resource;

    #[test]
    fn assemble_when_empty_body_then_only_framing() {
        assert_eq!(
            assemble(&[]),
            vec!["JMP .main", ".end", "HLT", ".main", "JMP .end"]
        );
    }

    #[test]
    fn compile_when_expression_then_body_inside_framing() {
        let lines = compile("2 + 3;").unwrap();
        assert_eq!(
            lines,
            vec![
                "JMP .main",
                ".end",
                "HLT",
                ".main",
                "LDI r1 2",
                "LDI r2 3",
                "ADD r1 r2 r1",
                "JMP .end"
            ]
        );
    }

    #[test]
    fn compile_when_empty_source_then_only_framing() {
        assert_eq!(compile("").unwrap().len(), 5);
    }

    #[test]
    fn compile_when_uninitialized_then_analysis_error_only() {
        let result = compile(&read_shared_resource("uninitialized.wsk"));
        let diagnostics = result.unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "P0011");
    }

    #[test]
    fn compile_when_syntax_error_then_parse_errors_only() {
        let diagnostics = compile(&read_shared_resource("syntax_error.wsk")).unwrap_err();
        assert!(diagnostics.iter().all(|d| d.code == "P0005"));
    }

    #[test]
    fn compile_when_declarations_then_not_implemented() {
        let diagnostics = compile(&read_shared_resource("declarations.wsk")).unwrap_err();
        assert_eq!(diagnostics[0].code, "P0020");
    }

    #[test]
    fn check_when_declarations_then_ok() {
        assert!(check(&read_shared_resource("declarations.wsk")).is_ok());
    }

    #[test]
    fn tokenize_when_unexpected_character_then_err() {
        let diagnostics = tokenize("1 @ 2;").unwrap_err();
        assert_eq!(diagnostics[0].code, "P0001");
    }
}
