// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

extern crate whisker_dsl;
extern crate whisker_parser;

pub mod cli;
pub mod logger;
pub mod stages;
