//! Integration tests for constructs the generator does not lower.

mod common;

use common::compile_err;
use rstest::rstest;
use whisker_problems::Problem;

#[rstest]
#[case("let x = 1;", "let declaration")]
#[case("const N = 1;", "const declaration")]
#[case("print 1;", "print")]
#[case("fn f() { 1; }", "function")]
#[case("x;", "variable reference")]
#[case("x = 1;", "assignment")]
#[case("f(1);", "call")]
#[case("1 and 2;", "logical operator")]
#[case("\"text\";", "string literal")]
fn generate_when_unsupported_then_not_implemented(#[case] source: &str, #[case] construct: &str) {
    let err = compile_err(source);
    assert_eq!(err.code, Problem::NotImplemented.code());
    assert_eq!(
        err.primary.message,
        format!("{} is not supported", construct)
    );
}

#[test]
fn generate_when_unsupported_inside_block_then_positioned_at_construct() {
    let err = compile_err("{\n  1;\n  print 2;\n}");
    assert_eq!(err.code, Problem::NotImplemented.code());
    assert_eq!(err.primary.position.line, 3);
    assert_eq!(err.primary.position.column, 3);
}
