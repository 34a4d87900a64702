//! Compiles a Whisker syntax tree into assembly instructions.
//!
//! This module walks the tree produced by the parser and checked by the
//! analyzer and lowers it into an ordered instruction stream.
//!
//! # Register discipline
//!
//! Every expression evaluates into one general purpose register. A binary
//! operator evaluates its left operand fully before its right operand,
//! combines the two into the left register and releases the right one. The
//! left register then carries the result. An expression statement releases
//! its result, so the pool is full again after every statement.
//!
//! # Supported constructs
//!
//! - Number, boolean and `null` literals
//! - Binary `+ - & ^ | << >> * / %` and the comparisons
//! - Unary `-` and `!`
//! - Grouping
//! - Expression statements, blocks, `if`/`else` and `while`
//!
//! Anything else produces a "not implemented" diagnostic and stops code
//! generation.
use dsl::ast::*;
use dsl::diagnostic::Diagnostic;
use dsl::token::TokenType;

use crate::emit::{Condition, Emitter, Instruction, Label};
use crate::labels::{LabelCounters, MacroKind, TagSource};
use crate::macros::{self, DivisionResult};
use crate::registers::{Register, RegisterPool};

/// Compiles the statements into an instruction stream.
pub fn generate(statements: &[StmtKind]) -> Result<Vec<Instruction>, Diagnostic> {
    let mut generator = CodeGenerator::new();
    generator.generate(statements)?;
    Ok(generator.into_instructions())
}

/// Tracks state during compilation of a single program.
pub struct CodeGenerator<T: TagSource = LabelCounters> {
    emitter: Emitter,
    registers: RegisterPool,
    tags: T,
}

impl CodeGenerator<LabelCounters> {
    pub fn new() -> Self {
        Self::with_tags(LabelCounters::new())
    }
}

impl Default for CodeGenerator<LabelCounters> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TagSource> CodeGenerator<T> {
    /// Creates a generator that takes its label tags from the source.
    pub fn with_tags(tags: T) -> Self {
        Self {
            emitter: Emitter::new(),
            registers: RegisterPool::new(),
            tags,
        }
    }

    /// Appends the instructions for the statements to the stream.
    ///
    /// Stops at the first statement that cannot be compiled.
    pub fn generate(&mut self, statements: &[StmtKind]) -> Result<(), Diagnostic> {
        for statement in statements {
            self.compile_stmt(statement)?;
        }
        log::debug!(
            "Generated {} instructions, {} registers free",
            self.emitter.instructions().len(),
            self.registers.available()
        );
        Ok(())
    }

    pub fn instructions(&self) -> &[Instruction] {
        self.emitter.instructions()
    }

    pub fn registers(&self) -> &RegisterPool {
        &self.registers
    }

    pub fn tags(&self) -> &T {
        &self.tags
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.emitter.into_instructions()
    }

    fn compile_stmt(&mut self, statement: &StmtKind) -> Result<(), Diagnostic> {
        match statement {
            StmtKind::Expression(expr) => {
                let result = self.compile_expr(expr)?;
                self.release(result)
            }
            StmtKind::Block(block) => {
                for statement in &block.statements {
                    self.compile_stmt(statement)?;
                }
                Ok(())
            }
            StmtKind::If(if_stmt) => self.compile_if(if_stmt),
            StmtKind::While(while_stmt) => self.compile_while(while_stmt),
            StmtKind::Var(decl) => Err(Diagnostic::not_implemented(&decl.name, "let declaration")),
            StmtKind::Const(decl) => {
                Err(Diagnostic::not_implemented(&decl.name, "const declaration"))
            }
            StmtKind::Print(print) => Err(Diagnostic::not_implemented(&print.keyword, "print")),
            StmtKind::Function(function) => {
                Err(Diagnostic::not_implemented(&function.name, "function"))
            }
        }
    }

    /// Compiles an if statement.
    ///
    /// ```text
    ///   compile(condition) -> c
    ///   CMP c r0
    ///   BRH EQ .if_else_N      (.end_if_N without else)
    ///   compile(then)
    ///   JMP .end_if_N          (only with else)
    /// .if_else_N               (only with else)
    ///   compile(else)
    /// .end_if_N
    /// ```
    fn compile_if(&mut self, if_stmt: &If) -> Result<(), Diagnostic> {
        let tag = self.tags.next_tag(MacroKind::If);
        let else_label = Label::new("if_else", tag);
        let end_label = Label::new("end_if", tag);

        self.compile_condition(&if_stmt.condition)?;

        match &if_stmt.else_branch {
            Some(else_branch) => {
                self.emitter.emit_brh(Condition::Eq, else_label);
                self.compile_stmt(&if_stmt.then_branch)?;
                self.emitter.emit_jmp(end_label);
                self.emitter.bind_label(else_label);
                self.compile_stmt(else_branch)?;
            }
            None => {
                self.emitter.emit_brh(Condition::Eq, end_label);
                self.compile_stmt(&if_stmt.then_branch)?;
            }
        }
        self.emitter.bind_label(end_label);
        Ok(())
    }

    /// Compiles a while statement.
    ///
    /// ```text
    /// .while_loop_N
    ///   compile(condition) -> c
    ///   CMP c r0
    ///   BRH EQ .end_while_N
    ///   compile(body)
    ///   JMP .while_loop_N
    /// .end_while_N
    /// ```
    fn compile_while(&mut self, while_stmt: &While) -> Result<(), Diagnostic> {
        let tag = self.tags.next_tag(MacroKind::While);
        let loop_label = Label::new("while_loop", tag);
        let end_label = Label::new("end_while", tag);

        self.emitter.bind_label(loop_label);
        self.compile_condition(&while_stmt.condition)?;
        self.emitter.emit_brh(Condition::Eq, end_label);
        self.compile_stmt(&while_stmt.body)?;
        self.emitter.emit_jmp(loop_label);
        self.emitter.bind_label(end_label);
        Ok(())
    }

    /// Evaluates the condition and compares it to zero. The register is
    /// free again before any branch is taken.
    fn compile_condition(&mut self, condition: &ExprKind) -> Result<(), Diagnostic> {
        let result = self.compile_expr(condition)?;
        self.emitter.emit_cmp(result, Register::ZERO);
        self.release(result)
    }

    /// Compiles the expression and returns the register that holds its
    /// value. The caller owns the register.
    fn compile_expr(&mut self, expr: &ExprKind) -> Result<Register, Diagnostic> {
        match expr {
            ExprKind::Literal(literal) => self.compile_literal(literal),
            ExprKind::Binary(binary) => self.compile_binary(binary),
            ExprKind::Unary(unary) => self.compile_unary(unary),
            ExprKind::Grouping(inner) => self.compile_expr(inner),
            ExprKind::Variable(variable) => Err(Diagnostic::not_implemented(
                &variable.name,
                "variable reference",
            )),
            ExprKind::Constant(constant) => Err(Diagnostic::not_implemented(
                &constant.name,
                "constant reference",
            )),
            ExprKind::Assign(assign) => {
                Err(Diagnostic::not_implemented(&assign.name, "assignment"))
            }
            ExprKind::Call(call) => Err(Diagnostic::not_implemented(&call.paren, "call")),
            ExprKind::Logical(logical) => Err(Diagnostic::not_implemented(
                &logical.operator,
                "logical operator",
            )),
        }
    }

    fn compile_literal(&mut self, literal: &Literal) -> Result<Register, Diagnostic> {
        let value = match &literal.value {
            LiteralKind::Number(text) => text.clone(),
            LiteralKind::Boolean(true) => "1".to_string(),
            LiteralKind::Boolean(false) | LiteralKind::Null => "0".to_string(),
            LiteralKind::String(_) => {
                return Err(Diagnostic::not_implemented(
                    &literal.token,
                    "string literal",
                ))
            }
        };
        let register = self.acquire()?;
        self.emitter.emit_ldi(register, value);
        Ok(register)
    }

    fn compile_unary(&mut self, unary: &UnaryExpr) -> Result<Register, Diagnostic> {
        let operand = self.compile_expr(&unary.right)?;
        match unary.operator.token_type {
            TokenType::Minus => self.emitter.emit_sub(Register::ZERO, operand, operand),
            TokenType::Bang => {
                let tag = self.tags.next_tag(MacroKind::Equal);
                macros::equal(&mut self.emitter, operand, Register::ZERO, tag);
                self.emitter.emit_mov(Register::FLAGS, operand);
            }
            _ => return Err(Diagnostic::todo(file!(), line!())),
        }
        Ok(operand)
    }

    fn compile_binary(&mut self, binary: &BinaryExpr) -> Result<Register, Diagnostic> {
        let left = self.compile_expr(&binary.left)?;
        let right = self.compile_expr(&binary.right)?;

        match binary.operator.token_type {
            TokenType::Plus => self.emitter.emit_add(left, right, left),
            TokenType::Minus => self.emitter.emit_sub(left, right, left),
            TokenType::Ampersand => self.emitter.emit_and(left, right, left),
            TokenType::Caret => self.emitter.emit_xor(left, right, left),
            TokenType::Pipe => macros::or(&mut self.emitter, left, right),
            TokenType::LeftShift => {
                let tag = self.tags.next_tag(MacroKind::ShiftLeft);
                macros::shift_left(&mut self.emitter, left, right, tag);
            }
            TokenType::RightShift => {
                let tag = self.tags.next_tag(MacroKind::ShiftRight);
                macros::shift_right(&mut self.emitter, left, right, tag);
            }
            TokenType::Star => {
                let tag = self.tags.next_tag(MacroKind::Multiply);
                macros::multiply(&mut self.emitter, left, right, tag);
            }
            TokenType::Slash => {
                let tag = self.tags.next_tag(MacroKind::Divide);
                macros::divide(&mut self.emitter, left, right, tag, DivisionResult::Quotient);
            }
            TokenType::Modulo => {
                let tag = self.tags.next_tag(MacroKind::Divide);
                macros::divide(&mut self.emitter, left, right, tag, DivisionResult::Remainder);
            }
            TokenType::GreaterEqual => {
                let tag = self.tags.next_tag(MacroKind::GreaterEqual);
                macros::greater_equal(&mut self.emitter, left, right, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            TokenType::Greater => {
                let tag = self.tags.next_tag(MacroKind::Greater);
                macros::greater(&mut self.emitter, left, right, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            // a <= b is b >= a
            TokenType::LessEqual => {
                let tag = self.tags.next_tag(MacroKind::GreaterEqual);
                macros::greater_equal(&mut self.emitter, right, left, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            // a < b is b > a
            TokenType::Less => {
                let tag = self.tags.next_tag(MacroKind::Greater);
                macros::greater(&mut self.emitter, right, left, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            TokenType::EqualEqual => {
                let tag = self.tags.next_tag(MacroKind::Equal);
                macros::equal(&mut self.emitter, left, right, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            TokenType::BangEqual => {
                let tag = self.tags.next_tag(MacroKind::NotEqual);
                macros::not_equal(&mut self.emitter, left, right, tag);
                self.emitter.emit_mov(Register::FLAGS, left);
            }
            _ => return Err(Diagnostic::todo(file!(), line!())),
        }

        self.release(right)?;
        Ok(left)
    }

    fn acquire(&mut self) -> Result<Register, Diagnostic> {
        self.registers.acquire().map_err(Diagnostic::from)
    }

    fn release(&mut self, register: Register) -> Result<(), Diagnostic> {
        self.registers.release(register).map_err(Diagnostic::from)
    }
}
