//! A trait and functions for visiting all nodes in a program.
//!
//! To use the visitor, define a struct and implement the Visitor trait
//! for the struct. Override only the functions for the nodes of interest.
//!
//! Visitor trait functions call functions that implement walking through
//! the program. Selectively call these functions to selectively descend
//! into the program.
//!
//! # Example
//!
//! ```
//! use whisker_dsl::ast::VarDecl;
//! use whisker_dsl::diagnostic::Diagnostic;
//! use whisker_dsl::visitor::{visit_var_decl, Visitor};
//!
//! struct Counter {
//!     declarations: usize,
//! }
//!
//! impl Visitor<Diagnostic> for Counter {
//!     type Value = ();
//!
//!     fn visit_var_decl(&mut self, node: &VarDecl) -> Result<(), Diagnostic> {
//!         self.declarations += 1;
//!         // Continue the recursion
//!         visit_var_decl(self, node)
//!     }
//! }
//! ```
use crate::ast::*;

pub trait Visitor<E> {
    /// Value produced by visiting a node. Walking functions discard the
    /// values of children and return the default.
    type Value: Default;

    fn walk(&mut self, statements: &[StmtKind]) -> Result<Self::Value, E> {
        for statement in statements {
            self.visit_stmt_kind(statement)?;
        }
        Ok(Self::Value::default())
    }

    fn visit_stmt_kind(&mut self, node: &StmtKind) -> Result<Self::Value, E> {
        visit_stmt_kind(self, node)
    }

    fn visit_block(&mut self, node: &Block) -> Result<Self::Value, E> {
        visit_block(self, node)
    }

    fn visit_function(&mut self, node: &Function) -> Result<Self::Value, E> {
        visit_function(self, node)
    }

    fn visit_if(&mut self, node: &If) -> Result<Self::Value, E> {
        visit_if(self, node)
    }

    fn visit_const_decl(&mut self, node: &ConstDecl) -> Result<Self::Value, E> {
        visit_const_decl(self, node)
    }

    fn visit_var_decl(&mut self, node: &VarDecl) -> Result<Self::Value, E> {
        visit_var_decl(self, node)
    }

    fn visit_while(&mut self, node: &While) -> Result<Self::Value, E> {
        visit_while(self, node)
    }

    fn visit_print(&mut self, node: &Print) -> Result<Self::Value, E> {
        visit_print(self, node)
    }

    fn visit_expr_kind(&mut self, node: &ExprKind) -> Result<Self::Value, E> {
        visit_expr_kind(self, node)
    }

    fn visit_assign(&mut self, node: &Assign) -> Result<Self::Value, E> {
        visit_assign(self, node)
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) -> Result<Self::Value, E> {
        visit_binary_expr(self, node)
    }

    fn visit_call(&mut self, node: &Call) -> Result<Self::Value, E> {
        visit_call(self, node)
    }

    fn visit_literal(&mut self, _node: &Literal) -> Result<Self::Value, E> {
        Ok(Self::Value::default())
    }

    fn visit_logical_expr(&mut self, node: &LogicalExpr) -> Result<Self::Value, E> {
        visit_logical_expr(self, node)
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) -> Result<Self::Value, E> {
        visit_unary_expr(self, node)
    }

    fn visit_named_constant(&mut self, _node: &NamedConstant) -> Result<Self::Value, E> {
        Ok(Self::Value::default())
    }

    fn visit_named_variable(&mut self, _node: &NamedVariable) -> Result<Self::Value, E> {
        Ok(Self::Value::default())
    }
}

pub fn visit_stmt_kind<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &StmtKind,
) -> Result<V::Value, E> {
    match node {
        StmtKind::Block(block) => v.visit_block(block),
        StmtKind::Expression(expr) => v.visit_expr_kind(expr),
        StmtKind::Function(function) => v.visit_function(function),
        StmtKind::If(if_stmt) => v.visit_if(if_stmt),
        StmtKind::Const(decl) => v.visit_const_decl(decl),
        StmtKind::Var(decl) => v.visit_var_decl(decl),
        StmtKind::While(while_stmt) => v.visit_while(while_stmt),
        StmtKind::Print(print) => v.visit_print(print),
    }
}

pub fn visit_block<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Block) -> Result<V::Value, E> {
    v.walk(&node.statements)
}

pub fn visit_function<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &Function,
) -> Result<V::Value, E> {
    v.walk(&node.body)
}

pub fn visit_if<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &If) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.condition)?;
    v.visit_stmt_kind(&node.then_branch)?;
    if let Some(else_branch) = &node.else_branch {
        v.visit_stmt_kind(else_branch)?;
    }
    Ok(V::Value::default())
}

pub fn visit_const_decl<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ConstDecl,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.initializer)
}

pub fn visit_var_decl<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &VarDecl,
) -> Result<V::Value, E> {
    match &node.initializer {
        Some(initializer) => v.visit_expr_kind(initializer),
        None => Ok(V::Value::default()),
    }
}

pub fn visit_while<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &While) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.condition)?;
    v.visit_stmt_kind(&node.body)
}

pub fn visit_print<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Print) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.value)
}

pub fn visit_expr_kind<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ExprKind,
) -> Result<V::Value, E> {
    match node {
        ExprKind::Assign(assign) => v.visit_assign(assign),
        ExprKind::Binary(binary) => v.visit_binary_expr(binary),
        ExprKind::Call(call) => v.visit_call(call),
        ExprKind::Grouping(inner) => v.visit_expr_kind(inner),
        ExprKind::Literal(literal) => v.visit_literal(literal),
        ExprKind::Logical(logical) => v.visit_logical_expr(logical),
        ExprKind::Unary(unary) => v.visit_unary_expr(unary),
        ExprKind::Constant(constant) => v.visit_named_constant(constant),
        ExprKind::Variable(variable) => v.visit_named_variable(variable),
    }
}

pub fn visit_assign<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Assign) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.value)
}

pub fn visit_binary_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &BinaryExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.left)?;
    v.visit_expr_kind(&node.right)
}

pub fn visit_call<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Call) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.callee)?;
    for argument in &node.arguments {
        v.visit_expr_kind(argument)?;
    }
    Ok(V::Value::default())
}

pub fn visit_logical_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &LogicalExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.left)?;
    v.visit_expr_kind(&node.right)
}

pub fn visit_unary_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &UnaryExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.right)
}
