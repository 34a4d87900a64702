//! The register file of the target machine and the pool that hands out
//! general purpose registers.
use std::fmt;

use dsl::diagnostic::{Diagnostic, Label};
use thiserror::Error;
use whisker_problems::Problem;

/// Number of general purpose registers (`r1` to `r8`).
pub const GENERAL_REGISTERS: u8 = 8;

/// A machine register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(u8);

impl Register {
    /// Always reads as zero.
    pub const ZERO: Register = Register(0);
    /// Loop counter used by the shift and multiply macros.
    pub const COUNTER: Register = Register(9);
    /// Scratch accumulator used by the multiply and divide macros.
    pub const TEMPORAL: Register = Register(10);
    /// Receives the 0/1 result of the comparison macros.
    pub const FLAGS: Register = Register(15);

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn is_general(&self) -> bool {
        (1..=GENERAL_REGISTERS).contains(&self.0)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("No more registers available.")]
    Exhausted,
    #[error("Register {0} is already free.")]
    ReleasedTwice(Register),
    #[error("Register {0} is reserved.")]
    Reserved(Register),
}

impl From<RegisterError> for Diagnostic {
    fn from(error: RegisterError) -> Self {
        let problem = match error {
            RegisterError::Exhausted => Problem::RegistersExhausted,
            RegisterError::ReleasedTwice(_) => Problem::RegisterReleasedTwice,
            RegisterError::Reserved(_) => Problem::RegisterReserved,
        };
        Diagnostic::problem(problem, Label::unpositioned(error.to_string()))
    }
}

/// The free list of general purpose registers.
///
/// A register is either free (in the pool) or live (held by the caller).
/// There is no spilling: more than eight live values is an error.
#[derive(Debug)]
pub struct RegisterPool {
    free: Vec<Register>,
}

impl Default for RegisterPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterPool {
    pub fn new() -> Self {
        // Popped from the end, so r1 is handed out first.
        Self {
            free: (1..=GENERAL_REGISTERS).rev().map(Register).collect(),
        }
    }

    pub fn acquire(&mut self) -> Result<Register, RegisterError> {
        self.free.pop().ok_or(RegisterError::Exhausted)
    }

    pub fn release(&mut self, register: Register) -> Result<(), RegisterError> {
        if !register.is_general() {
            return Err(RegisterError::Reserved(register));
        }
        if self.free.contains(&register) {
            return Err(RegisterError::ReleasedTwice(register));
        }
        self.free.push(register);
        Ok(())
    }

    /// Number of free registers.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}
