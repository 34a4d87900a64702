//! Problem codes reported by the compiler.
//!
//! The set of problems is generated from `resources/problem-codes.csv` so
//! that codes remain stable and documented in one place.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));
