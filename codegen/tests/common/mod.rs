//! Shared test helpers for codegen integration tests.
use std::collections::HashMap;

use whisker_codegen::emit::{Condition, Instruction, Label};
use whisker_codegen::generate;
use whisker_codegen::registers::Register;
use whisker_dsl::ast::StmtKind;
use whisker_dsl::diagnostic::Diagnostic;
use whisker_parser::parse_program;

/// Upper bound on executed instructions before a run is declared stuck.
const MAX_STEPS: usize = 100_000;

/// Parses a Whisker source string into statements.
#[allow(dead_code)]
pub fn parse(source: &str) -> Vec<StmtKind> {
    parse_program(source).unwrap()
}

/// Parses and compiles a program.
#[allow(dead_code)]
pub fn compile(source: &str) -> Vec<Instruction> {
    generate(&parse(source)).unwrap()
}

/// Parses a program and returns the code generation error.
#[allow(dead_code)]
pub fn compile_err(source: &str) -> Diagnostic {
    generate(&parse(source)).unwrap_err()
}

/// Parses and compiles a program and returns the assembly lines.
#[allow(dead_code)]
pub fn compile_lines(source: &str) -> Vec<String> {
    compile(source).iter().map(|i| i.to_string()).collect()
}

/// Returns every label bound in the program, in order.
#[allow(dead_code)]
pub fn bound_labels(instructions: &[Instruction]) -> Vec<Label> {
    instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Label(label) => Some(*label),
            _ => None,
        })
        .collect()
}

/// Compiles the program and runs it to completion.
#[allow(dead_code)]
pub fn evaluate(source: &str) -> Machine {
    Machine::run(&compile(source))
}

/// An 8-bit model of the target machine, enough to execute generated code.
#[allow(dead_code)]
pub struct Machine {
    registers: [u8; 16],
    zero: bool,
    carry: bool,
}

#[allow(dead_code)]
impl Machine {
    pub fn run(instructions: &[Instruction]) -> Machine {
        let labels: HashMap<Label, usize> = instructions
            .iter()
            .enumerate()
            .filter_map(|(pos, i)| match i {
                Instruction::Label(label) => Some((*label, pos)),
                _ => None,
            })
            .collect();

        let mut machine = Machine {
            registers: [0; 16],
            zero: false,
            carry: false,
        };
        let mut pc = 0;
        let mut steps = 0;
        while pc < instructions.len() {
            steps += 1;
            assert!(steps < MAX_STEPS, "program did not terminate");

            let mut next = pc + 1;
            match &instructions[pc] {
                Instruction::Ldi(dest, value) => {
                    let value: u64 = value.parse().unwrap();
                    machine.write(*dest, (value % 256) as u8);
                }
                Instruction::Mov(src, dest) => machine.write(*dest, machine.read(*src)),
                Instruction::Add(a, b, dest) => {
                    machine.write(*dest, machine.read(*a).wrapping_add(machine.read(*b)))
                }
                Instruction::Sub(a, b, dest) => {
                    machine.write(*dest, machine.read(*a).wrapping_sub(machine.read(*b)))
                }
                Instruction::And(a, b, dest) => {
                    machine.write(*dest, machine.read(*a) & machine.read(*b))
                }
                Instruction::Xor(a, b, dest) => {
                    machine.write(*dest, machine.read(*a) ^ machine.read(*b))
                }
                Instruction::Nor(a, b, dest) => {
                    machine.write(*dest, !(machine.read(*a) | machine.read(*b)))
                }
                Instruction::Not(src, dest) => machine.write(*dest, !machine.read(*src)),
                Instruction::Lsh(src, dest) => machine.write(*dest, machine.read(*src) << 1),
                Instruction::Rsh(src, dest) => machine.write(*dest, machine.read(*src) >> 1),
                Instruction::Inc(reg) => machine.write(*reg, machine.read(*reg).wrapping_add(1)),
                Instruction::Dec(reg) => machine.write(*reg, machine.read(*reg).wrapping_sub(1)),
                Instruction::Cmp(a, b) => {
                    machine.zero = machine.read(*a) == machine.read(*b);
                    machine.carry = machine.read(*a) >= machine.read(*b);
                }
                Instruction::Brh(condition, label) => {
                    let taken = match condition {
                        Condition::Eq => machine.zero,
                        Condition::Ne => !machine.zero,
                        Condition::Ge => machine.carry,
                        Condition::Lt => !machine.carry,
                    };
                    if taken {
                        next = labels[label];
                    }
                }
                Instruction::Jmp(label) => next = labels[label],
                Instruction::Label(_) => {}
            }
            pc = next;
        }
        machine
    }

    /// Value of the general register `r<index>`.
    pub fn register(&self, index: usize) -> u8 {
        self.registers[index]
    }

    pub fn flags(&self) -> u8 {
        self.read(Register::FLAGS)
    }

    fn read(&self, register: Register) -> u8 {
        self.registers[register.index() as usize]
    }

    fn write(&mut self, register: Register, value: u8) {
        if register != Register::ZERO {
            self.registers[register.index() as usize] = value;
        }
    }
}
