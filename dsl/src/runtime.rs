//! Errors that evaluating a program can raise.
//!
//! Nothing in the compilation pipeline raises these. They share the
//! diagnostic reporting path so that an evaluator can report them the same
//! way the compiler reports its own problems.
use thiserror::Error;
use whisker_problems::Problem;

use crate::diagnostic::{Diagnostic, Label};
use crate::token::Token;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Division by zero is not allowed.")]
    DivisionByZero { token: Token },

    #[error("Modulo by zero is not allowed.")]
    ModuloByZero { token: Token },

    #[error("Invalid operand: '{operand}'.")]
    InvalidOperand { token: Token, operand: String },

    #[error("Invalid operands: '{left}' and '{right}'.")]
    InvalidOperands {
        token: Token,
        left: String,
        right: String,
    },

    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { token: Token, name: String },

    #[error("Expected type {expected}, but got {actual}.")]
    TypeMismatch {
        token: Token,
        expected: String,
        actual: String,
    },
}

impl RuntimeError {
    /// The token where evaluation failed.
    pub fn token(&self) -> &Token {
        match self {
            RuntimeError::DivisionByZero { token }
            | RuntimeError::ModuloByZero { token }
            | RuntimeError::InvalidOperand { token, .. }
            | RuntimeError::InvalidOperands { token, .. }
            | RuntimeError::UndefinedVariable { token, .. }
            | RuntimeError::TypeMismatch { token, .. } => token,
        }
    }

    pub fn problem(&self) -> Problem {
        match self {
            RuntimeError::DivisionByZero { .. } => Problem::DivisionByZero,
            RuntimeError::ModuloByZero { .. } => Problem::ModuloByZero,
            RuntimeError::InvalidOperand { .. } => Problem::InvalidOperand,
            RuntimeError::InvalidOperands { .. } => Problem::InvalidOperands,
            RuntimeError::UndefinedVariable { .. } => Problem::UndefinedVariable,
            RuntimeError::TypeMismatch { .. } => Problem::TypeMismatch,
        }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        Diagnostic::problem(error.problem(), Label::token(error.token(), error.to_string()))
    }
}
