//! Semantic analysis of Whisker programs.
extern crate whisker_dsl as dsl;

mod rule_use_initialized_variable;
pub mod stages;

#[cfg(test)]
mod test_helpers;

pub use rule_use_initialized_variable::Analysis;
pub use stages::analyze;
