//! Provides definitions of the objects from the Whisker language and the
//! shared infrastructure (diagnostics, symbols) used by every stage of the
//! compiler.

pub mod ast;
pub mod core;
pub mod diagnostic;
pub mod runtime;
pub mod symbol_table;
pub mod token;
pub mod visitor;
