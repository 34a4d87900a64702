//! Integration tests for register conservation and exhaustion.

mod common;

use common::{compile_err, parse};
use proptest::prelude::*;
use whisker_codegen::registers::GENERAL_REGISTERS;
use whisker_codegen::{generate, CodeGenerator};
use whisker_problems::Problem;

const OPERATORS: [&str; 16] = [
    "+", "-", "&", "^", "|", "<<", ">>", "*", "/", "%", ">=", ">", "<=", "<", "==", "!=",
];

/// A right nested chain `1 + (1 + (... 1))` holding `count` registers live.
fn right_nested(count: usize) -> String {
    format!(
        "{}1{};",
        "1 + (".repeat(count - 1),
        ")".repeat(count - 1)
    )
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = (0u8..20).prop_map(|n| n.to_string());
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(OPERATORS.to_vec()),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("({} {} {})", left, op, right)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            inner.prop_map(|e| format!("!{}", e)),
        ]
    })
}

#[test]
fn generate_when_all_registers_live_then_ok() {
    assert!(generate(&parse(&right_nested(GENERAL_REGISTERS as usize))).is_ok());
}

#[test]
fn generate_when_one_more_than_registers_then_exhausted() {
    let err = compile_err(&right_nested(GENERAL_REGISTERS as usize + 1));
    assert_eq!(err.code, Problem::RegistersExhausted.code());
}

#[test]
fn generate_when_left_nested_then_two_registers_suffice() {
    let source = format!("{};", vec!["1"; 40].join(" + "));
    let mut generator = CodeGenerator::new();
    generator.generate(&parse(&source)).unwrap();
    assert_eq!(generator.registers().available(), GENERAL_REGISTERS as usize);
}

proptest! {
    #[test]
    fn generate_when_any_expression_then_pool_full_after(
        statements in prop::collection::vec(expression(), 1..6),
    ) {
        let source: String = statements.iter().map(|s| format!("{};\n", s)).collect();
        let mut generator = CodeGenerator::new();
        generator.generate(&parse(&source)).unwrap();
        prop_assert_eq!(generator.registers().available(), GENERAL_REGISTERS as usize);
    }
}
