use dsl::{ast::StmtKind, diagnostic::Diagnostic};
use whisker_test::read_shared_resource;

use crate::rule_use_initialized_variable::{apply, Analysis};

pub fn parse(source: &str) -> Vec<StmtKind> {
    match whisker_parser::parse_program(source) {
        Ok(statements) => statements,
        Err(diagnostics) => panic!("{:?}", diagnostics),
    }
}

pub fn parse_shared(name: &'static str) -> Vec<StmtKind> {
    parse(&read_shared_resource(name))
}

pub fn parse_and_analyze(source: &str) -> Result<Analysis, Diagnostic> {
    apply(&parse(source))
}
