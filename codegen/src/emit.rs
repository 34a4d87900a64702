//! Low-level instruction emitter.
//!
//! Provides a builder that appends instructions to an ordered stream.
//! Instructions stay structured until they are displayed, one per line, in
//! the assembly syntax of the target machine.
use std::fmt;

use crate::registers::Register;

/// A branch target. Displays as `.<name>_<tag>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: &'static str,
    pub tag: usize,
}

impl Label {
    pub fn new(name: &'static str, tag: usize) -> Self {
        Self { name, tag }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}_{}", self.name, self.tag)
    }
}

/// The branch conditions after a `CMP a b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// a == b
    Eq,
    /// a != b
    Ne,
    /// a >= b
    Ge,
    /// a < b
    Lt,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Condition::Eq => "EQ",
            Condition::Ne => "NE",
            Condition::Ge => "GE",
            Condition::Lt => "LT",
        };
        f.write_str(text)
    }
}

/// One line of the output program.
///
/// Three-operand instructions read `OP a b dest` and compute
/// `dest = a OP b`. Two-operand instructions read `OP src dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Load immediate: `LDI dest value`.
    Ldi(Register, String),
    Mov(Register, Register),
    Add(Register, Register, Register),
    Sub(Register, Register, Register),
    And(Register, Register, Register),
    Xor(Register, Register, Register),
    Nor(Register, Register, Register),
    Not(Register, Register),
    /// Shift left by one.
    Lsh(Register, Register),
    /// Shift right by one.
    Rsh(Register, Register),
    Inc(Register),
    Dec(Register),
    Cmp(Register, Register),
    Brh(Condition, Label),
    Jmp(Label),
    /// Binds the label to the position of the next instruction.
    Label(Label),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Ldi(dest, value) => write!(f, "LDI {} {}", dest, value),
            Instruction::Mov(src, dest) => write!(f, "MOV {} {}", src, dest),
            Instruction::Add(a, b, dest) => write!(f, "ADD {} {} {}", a, b, dest),
            Instruction::Sub(a, b, dest) => write!(f, "SUB {} {} {}", a, b, dest),
            Instruction::And(a, b, dest) => write!(f, "AND {} {} {}", a, b, dest),
            Instruction::Xor(a, b, dest) => write!(f, "XOR {} {} {}", a, b, dest),
            Instruction::Nor(a, b, dest) => write!(f, "NOR {} {} {}", a, b, dest),
            Instruction::Not(src, dest) => write!(f, "NOT {} {}", src, dest),
            Instruction::Lsh(src, dest) => write!(f, "LSH {} {}", src, dest),
            Instruction::Rsh(src, dest) => write!(f, "RSH {} {}", src, dest),
            Instruction::Inc(reg) => write!(f, "INC {}", reg),
            Instruction::Dec(reg) => write!(f, "DEC {}", reg),
            Instruction::Cmp(a, b) => write!(f, "CMP {} {}", a, b),
            Instruction::Brh(condition, label) => write!(f, "BRH {} {}", condition, label),
            Instruction::Jmp(label) => write!(f, "JMP {}", label),
            Instruction::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Accumulates instructions.
#[derive(Debug, Default)]
pub struct Emitter {
    instructions: Vec<Instruction>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits LDI (loads the literal text into the register).
    pub fn emit_ldi(&mut self, dest: Register, value: impl Into<String>) {
        self.instructions.push(Instruction::Ldi(dest, value.into()));
    }

    /// Emits MOV (copies src into dest).
    pub fn emit_mov(&mut self, src: Register, dest: Register) {
        self.instructions.push(Instruction::Mov(src, dest));
    }

    pub fn emit_add(&mut self, a: Register, b: Register, dest: Register) {
        self.instructions.push(Instruction::Add(a, b, dest));
    }

    pub fn emit_sub(&mut self, a: Register, b: Register, dest: Register) {
        self.instructions.push(Instruction::Sub(a, b, dest));
    }

    pub fn emit_and(&mut self, a: Register, b: Register, dest: Register) {
        self.instructions.push(Instruction::And(a, b, dest));
    }

    pub fn emit_xor(&mut self, a: Register, b: Register, dest: Register) {
        self.instructions.push(Instruction::Xor(a, b, dest));
    }

    pub fn emit_nor(&mut self, a: Register, b: Register, dest: Register) {
        self.instructions.push(Instruction::Nor(a, b, dest));
    }

    pub fn emit_not(&mut self, src: Register, dest: Register) {
        self.instructions.push(Instruction::Not(src, dest));
    }

    pub fn emit_lsh(&mut self, src: Register, dest: Register) {
        self.instructions.push(Instruction::Lsh(src, dest));
    }

    pub fn emit_rsh(&mut self, src: Register, dest: Register) {
        self.instructions.push(Instruction::Rsh(src, dest));
    }

    pub fn emit_inc(&mut self, reg: Register) {
        self.instructions.push(Instruction::Inc(reg));
    }

    pub fn emit_dec(&mut self, reg: Register) {
        self.instructions.push(Instruction::Dec(reg));
    }

    /// Emits CMP (sets the condition state for a following BRH).
    pub fn emit_cmp(&mut self, a: Register, b: Register) {
        self.instructions.push(Instruction::Cmp(a, b));
    }

    /// Emits BRH (branches to the label when the condition holds).
    pub fn emit_brh(&mut self, condition: Condition, label: Label) {
        self.instructions.push(Instruction::Brh(condition, label));
    }

    /// Emits JMP (unconditional branch).
    pub fn emit_jmp(&mut self, label: Label) {
        self.instructions.push(Instruction::Jmp(label));
    }

    /// Binds the label to the current position.
    pub fn bind_label(&mut self, label: Label) {
        self.instructions.push(Instruction::Label(label));
    }

    /// Returns the accumulated instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}
