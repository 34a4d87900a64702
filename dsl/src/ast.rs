//! Provides definitions of the syntax tree of the Whisker language.
//!
//! The tree is a closed set of statement and expression kinds. Every node
//! owns its children, so the tree has no sharing and no cycles.
use std::fmt;

use crate::symbol_table::TypeTag;
use crate::token::Token;

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Assign(Assign),
    Binary(BinaryExpr),
    Call(Call),
    Grouping(Box<ExprKind>),
    Literal(Literal),
    Logical(LogicalExpr),
    Unary(UnaryExpr),
    Constant(NamedConstant),
    Variable(NamedVariable),
}

impl ExprKind {
    pub fn binary(left: ExprKind, operator: Token, right: ExprKind) -> Self {
        ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn logical(left: ExprKind, operator: Token, right: ExprKind) -> Self {
        ExprKind::Logical(LogicalExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn unary(operator: Token, right: ExprKind) -> Self {
        ExprKind::Unary(UnaryExpr {
            operator,
            right: Box::new(right),
        })
    }

    pub fn grouping(inner: ExprKind) -> Self {
        ExprKind::Grouping(Box::new(inner))
    }

    pub fn variable(name: Token) -> Self {
        ExprKind::Variable(NamedVariable { name })
    }

    pub fn constant(name: Token) -> Self {
        ExprKind::Constant(NamedConstant { name })
    }
}

/// Re-binds an existing variable: `name = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: Token,
    pub value: Box<ExprKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<ExprKind>,
    pub operator: Token,
    pub right: Box<ExprKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<ExprKind>,
    /// The closing parenthesis of the argument list.
    pub paren: Token,
    pub arguments: Vec<ExprKind>,
}

/// The value of a literal. Numbers keep their text; converting the text to
/// a machine value is up to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralKind {
    Number(String),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralKind,
    /// The token the literal came from (or the keyword that implied it).
    pub token: Token,
}

/// An `and` / `or` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub left: Box<ExprKind>,
    pub operator: Token,
    pub right: Box<ExprKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub right: Box<ExprKind>,
}

/// A reference to a name that the symbol table knows as a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedConstant {
    pub name: Token,
}

/// A reference to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedVariable {
    pub name: Token,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Block),
    Expression(ExprKind),
    Function(Function),
    If(If),
    Const(ConstDecl),
    Var(VarDecl),
    While(While),
    Print(Print),
}

/// A possibly empty sequence of statements that is itself a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<StmtKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<StmtKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: ExprKind,
    pub then_branch: Box<StmtKind>,
    pub else_branch: Option<Box<StmtKind>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Token,
    pub initializer: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,
    pub type_tag: TypeTag,
    pub initializer: Option<ExprKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: ExprKind,
    pub body: Box<StmtKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub keyword: Token,
    pub value: ExprKind,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Number(text) => write!(f, "{}", text),
            LiteralKind::String(text) => write!(f, "\"{}\"", text),
            LiteralKind::Boolean(value) => write!(f, "{}", value),
            LiteralKind::Null => write!(f, "null"),
        }
    }
}

// The display form is a fully parenthesized prefix notation. It makes the
// shape of the tree (precedence and associativity) visible in one line.
impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Assign(assign) => write!(f, "(= {} {})", assign.name.text, assign.value),
            ExprKind::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.operator.text, binary.left, binary.right
            ),
            ExprKind::Call(call) => {
                write!(f, "(call {}", call.callee)?;
                for argument in &call.arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            ExprKind::Grouping(inner) => write!(f, "(group {})", inner),
            ExprKind::Literal(literal) => write!(f, "{}", literal.value),
            ExprKind::Logical(logical) => write!(
                f,
                "({} {} {})",
                logical.operator.text, logical.left, logical.right
            ),
            ExprKind::Unary(unary) => write!(f, "({} {})", unary.operator.text, unary.right),
            ExprKind::Constant(constant) => write!(f, "{}", constant.name.text),
            ExprKind::Variable(variable) => write!(f, "{}", variable.name.text),
        }
    }
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StmtKind::Block(block) => {
                write!(f, "(block")?;
                for stmt in &block.statements {
                    write!(f, " {}", stmt)?;
                }
                write!(f, ")")
            }
            StmtKind::Expression(expr) => write!(f, "(; {})", expr),
            StmtKind::Function(function) => {
                write!(f, "(fn {} (", function.name.text)?;
                let params: Vec<&str> = function.params.iter().map(|p| p.text.as_str()).collect();
                write!(f, "{})", params.join(" "))?;
                for stmt in &function.body {
                    write!(f, " {}", stmt)?;
                }
                write!(f, ")")
            }
            StmtKind::If(if_stmt) => {
                write!(f, "(if {} {}", if_stmt.condition, if_stmt.then_branch)?;
                if let Some(else_branch) = &if_stmt.else_branch {
                    write!(f, " {}", else_branch)?;
                }
                write!(f, ")")
            }
            StmtKind::Const(decl) => write!(f, "(const {} {})", decl.name.text, decl.initializer),
            StmtKind::Var(decl) => {
                write!(f, "(let {}", decl.name.text)?;
                if decl.type_tag != TypeTag::Inferred {
                    write!(f, ": {}", decl.type_tag)?;
                }
                if let Some(initializer) = &decl.initializer {
                    write!(f, " {}", initializer)?;
                }
                write!(f, ")")
            }
            StmtKind::While(while_stmt) => {
                write!(f, "(while {} {})", while_stmt.condition, while_stmt.body)
            }
            StmtKind::Print(print) => write!(f, "(print {})", print.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn number(text: &str) -> ExprKind {
        ExprKind::Literal(Literal {
            value: LiteralKind::Number(text.to_owned()),
            token: Token::new(TokenType::Number, text, 1, 1).with_literal(text),
        })
    }

    #[test]
    fn display_when_nested_binary_then_prefix_form() {
        let product = ExprKind::binary(
            number("2"),
            Token::new(TokenType::Star, "*", 1, 3),
            number("3"),
        );
        let sum = ExprKind::binary(number("1"), Token::new(TokenType::Plus, "+", 1, 2), product);

        assert_eq!(sum.to_string(), "(+ 1 (* 2 3))");
    }

    #[test]
    fn display_when_var_with_type_then_includes_type() {
        let stmt = StmtKind::Var(VarDecl {
            name: Token::new(TokenType::Identifier, "x", 1, 5),
            type_tag: TypeTag::I16,
            initializer: Some(number("1")),
        });
        assert_eq!(stmt.to_string(), "(let x: i16 1)");
    }
}
