//! Provides the scoped symbol table that maps names to what they denote.
//!
//! Scopes form a stack. Scope 0 is the global scope and is never removed.
//! Lookups search from the innermost scope outward and stop at the first
//! match, so an inner definition shadows an outer one.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What a name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
}

/// The declared data type of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    U8,
    I8,
    U16,
    I16,
    Char,
    Bool,
    /// No annotation was given; the type comes from use.
    Inferred,
}

impl FromStr for TypeTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u8" => Ok(TypeTag::U8),
            "i8" => Ok(TypeTag::I8),
            "u16" => Ok(TypeTag::U16),
            "i16" => Ok(TypeTag::I16),
            "char" => Ok(TypeTag::Char),
            "bool" => Ok(TypeTag::Bool),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::U8 => "u8",
            TypeTag::I8 => "i8",
            TypeTag::U16 => "u16",
            TypeTag::I16 => "i16",
            TypeTag::Char => "char",
            TypeTag::Bool => "bool",
            TypeTag::Inferred => "inferred",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub type_tag: TypeTag,
    /// Depth of the scope that defines the symbol (0 is global).
    pub scope_level: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Cannot exit the global scope.")]
    ExitGlobal,
    #[error("Symbol '{0}' not defined.")]
    Undefined(String),
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Removes the innermost scope and every symbol defined in it.
    pub fn exit_scope(&mut self) -> Result<(), ScopeError> {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            Ok(())
        } else {
            Err(ScopeError::ExitGlobal)
        }
    }

    /// Depth of the innermost scope (0 when only the global scope exists).
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Defines the symbol in the innermost scope, replacing any symbol with
    /// the same name in that scope.
    pub fn define(&mut self, name: &str, kind: SymbolKind, type_tag: TypeTag) {
        let scope_level = self.depth();
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            type_tag,
            scope_level,
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), symbol);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Changes the type of the nearest visible symbol with the name.
    pub fn update(&mut self, name: &str, type_tag: TypeTag) -> Result<(), ScopeError> {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
        {
            Some(symbol) => {
                symbol.type_tag = type_tag;
                Ok(())
            }
            None => Err(ScopeError::Undefined(name.to_string())),
        }
    }
}
