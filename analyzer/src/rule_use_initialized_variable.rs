//! Semantic rule that a variable must be initialized before its value is
//! read.
//!
//! The rule tracks names without regard to scope: once a name is
//! initialized anywhere earlier in the program, later reads of that name
//! pass.
//!
//! ## Passes
//!
//! ```ignore
//! let x = 1;
//! print x;
//! ```
//!
//! ```ignore
//! let x = x;
//! ```
//!
//! ## Fails
//!
//! ```ignore
//! let x;
//! print x;
//! ```
//!
//! Assignment does not initialize, so this fails too:
//!
//! ```ignore
//! let x;
//! x = 1;
//! print x;
//! ```
use std::collections::BTreeSet;

use dsl::{
    ast::*,
    diagnostic::{Diagnostic, Label},
    visitor::{self, Visitor},
};
use whisker_problems::Problem;

/// What the analyzer learned about the names in a program.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub variables_defined: BTreeSet<String>,
    pub variables_initialized: BTreeSet<String>,
    pub variables_used: BTreeSet<String>,
    pub constants_defined: BTreeSet<String>,
    pub constants_used: BTreeSet<String>,
}

/// Walks the program and stops at the first read of a variable that is
/// not initialized.
pub fn apply(statements: &[StmtKind]) -> Result<Analysis, Diagnostic> {
    let mut analysis = Analysis::default();
    analysis.walk(statements)?;
    Ok(analysis)
}

impl Visitor<Diagnostic> for Analysis {
    type Value = ();

    fn visit_const_decl(&mut self, node: &ConstDecl) -> Result<(), Diagnostic> {
        self.visit_expr_kind(&node.initializer)?;
        self.constants_defined.insert(node.name.text.clone());
        Ok(())
    }

    fn visit_var_decl(&mut self, node: &VarDecl) -> Result<(), Diagnostic> {
        let name = node.name.text.clone();
        self.variables_defined.insert(name.clone());
        if let Some(initializer) = &node.initializer {
            // Initialized before the initializer is read, so `let x = x;` passes.
            self.variables_initialized.insert(name);
            self.visit_expr_kind(initializer)?;
        }
        Ok(())
    }

    fn visit_function(&mut self, node: &Function) -> Result<(), Diagnostic> {
        // A function name holds a value (the function) from its declaration on.
        self.variables_defined.insert(node.name.text.clone());
        self.variables_initialized.insert(node.name.text.clone());
        for param in &node.params {
            self.variables_defined.insert(param.text.clone());
            self.variables_initialized.insert(param.text.clone());
        }
        visitor::visit_function(self, node)
    }

    /// Assignment defines the target but does not initialize it: only a
    /// declaration with an initializer makes a variable readable.
    fn visit_assign(&mut self, node: &Assign) -> Result<(), Diagnostic> {
        self.variables_defined.insert(node.name.text.clone());
        self.visit_expr_kind(&node.value)
    }

    fn visit_named_constant(&mut self, node: &NamedConstant) -> Result<(), Diagnostic> {
        self.constants_used.insert(node.name.text.clone());
        Ok(())
    }

    fn visit_named_variable(&mut self, node: &NamedVariable) -> Result<(), Diagnostic> {
        let name = &node.name.text;
        if !self.variables_initialized.contains(name) {
            return Err(Diagnostic::problem(
                Problem::UninitializedVariable,
                Label::token(
                    &node.name,
                    format!("Variables must be initialized before use '{}'.", name),
                ),
            )
            .with_context("variable", name));
        }
        self.variables_used.insert(name.clone());
        Ok(())
    }
}
