// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]
//! Code generation for Whisker.
//!
//! This crate transforms a parsed and analyzed Whisker syntax tree into
//! assembly for a small register machine: eight general purpose registers,
//! a zero register and no native multiply, divide, OR, variable shift or
//! comparison result. Operators the machine lacks are expanded into
//! instruction sequences with uniquely tagged labels.
//!
//! # Example
//!
//! ```
//! use whisker_codegen::generate;
//! use whisker_parser::parse_program;
//!
//! let statements = parse_program("2 + 3;").unwrap();
//! let instructions = generate(&statements).unwrap();
//! let lines: Vec<String> = instructions.iter().map(|i| i.to_string()).collect();
//! assert_eq!(lines, vec!["LDI r1 2", "LDI r2 3", "ADD r1 r2 r1"]);
//! ```
extern crate whisker_dsl as dsl;

mod compile;
pub mod emit;
pub mod labels;
pub mod macros;
pub mod registers;

pub use compile::{generate, CodeGenerator};
