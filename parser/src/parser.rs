//! Recursive descent parser for the Whisker language. The parser
//! transforms tokens into the syntax tree.
//!
//! The grammar is a precedence cascade from the loosest binding operator
//! (assignment) to the tightest (call, primary). Every binary level is
//! left associative; assignment is right associative.
//!
//! The parser recovers at statement granularity: a statement that fails to
//! parse is dropped and parsing resumes at the next statement boundary, so
//! one broken statement yields one diagnostic.
use dsl::ast::*;
use dsl::diagnostic::{Diagnostic, Label};
use dsl::symbol_table::{SymbolKind, SymbolTable, TypeTag};
use dsl::token::{Token, TokenType};
use whisker_problems::Problem;

/// The most parameters a function may declare and the most arguments a
/// call may pass.
const MAX_ARITY: usize = 255;

type ParseResult<T> = Result<T, Diagnostic>;

/// Parses the tokens into statements.
///
/// Returns the statements that parsed and a diagnostic for each statement
/// that did not. The tokens must end with [`TokenType::Eof`].
pub fn parse(tokens: Vec<Token>) -> (Vec<StmtKind>, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let mut statements = Vec::new();
    while !parser.is_at_end() {
        if let Some(statement) = parser.declaration() {
            statements.push(statement);
        }
    }
    log::debug!(
        "Parsed {} statements with {} diagnostics",
        statements.len(),
        parser.diagnostics.len()
    );
    (statements, parser.diagnostics)
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// Tracks declarations so that a name can be resolved as a constant
    /// or a variable while parsing.
    symbols: SymbolTable,
    /// Number of enclosing blocks. Recovery stops at a `}` only inside one.
    block_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |tok| !tok.is_eof()) {
            let line = tokens.last().map_or(1, |tok| tok.line);
            tokens.push(Token::new(TokenType::Eof, "", line, 1));
        }
        Self {
            tokens,
            current: 0,
            symbols: SymbolTable::new(),
            block_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    // Declarations and statements

    /// Parses one declaration or statement. On failure, records the
    /// diagnostic, skips to the next statement boundary and returns `None`.
    fn declaration(&mut self) -> Option<StmtKind> {
        let result = if self.matches(&[TokenType::Fn]) {
            self.function()
        } else if self.matches(&[TokenType::Let]) {
            self.var_declaration()
        } else if self.matches(&[TokenType::Const]) {
            self.const_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(diagnostic) => {
                self.diagnostics.push(diagnostic);
                self.synchronize();
                None
            }
        }
    }

    fn statement(&mut self) -> ParseResult<StmtKind> {
        if self.matches(&[TokenType::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenType::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenType::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenType::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenType::LeftBrace]) {
            let statements = self.scoped(|parser| parser.block())?;
            return Ok(StmtKind::Block(Block { statements }));
        }
        self.expression_statement()
    }

    /// Parses `for (init; cond; incr) body` into the equivalent `while`
    /// loop wrapped in a block that holds the initializer.
    fn for_statement(&mut self) -> ParseResult<StmtKind> {
        let keyword = self.previous().clone();
        self.scoped(|parser| {
            parser.consume(TokenType::LeftParen, "Expected '(' after 'for'.")?;

            let initializer = if parser.matches(&[TokenType::Semicolon]) {
                None
            } else if parser.matches(&[TokenType::Let]) {
                Some(parser.var_declaration()?)
            } else {
                Some(parser.expression_statement()?)
            };

            let condition = if parser.check(TokenType::Semicolon) {
                None
            } else {
                Some(parser.expression()?)
            };
            parser.consume(TokenType::Semicolon, "Expected ';' after loop condition.")?;

            let increment = if parser.check(TokenType::RightParen) {
                None
            } else {
                Some(parser.expression()?)
            };
            parser.consume(TokenType::RightParen, "Expected ')' after for clauses.")?;

            parser.require_brace("Expected '{' after for statement.")?;
            let mut body = parser.statement()?;

            if let Some(increment) = increment {
                body = StmtKind::Block(Block {
                    statements: vec![body, StmtKind::Expression(increment)],
                });
            }

            let condition = condition.unwrap_or_else(|| {
                ExprKind::Literal(Literal {
                    value: LiteralKind::Boolean(true),
                    token: keyword.clone(),
                })
            });
            body = StmtKind::While(While {
                condition,
                body: Box::new(body),
            });

            if let Some(initializer) = initializer {
                body = StmtKind::Block(Block {
                    statements: vec![initializer, body],
                });
            }

            Ok(body)
        })
    }

    fn if_statement(&mut self) -> ParseResult<StmtKind> {
        self.consume(TokenType::LeftParen, "Expected '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expected ')' after if condition.")?;

        self.require_brace("Expected '{' after if condition.")?;
        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.matches(&[TokenType::Else]) {
            self.require_brace("Expected '{' before else branch.")?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(StmtKind::If(If {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn print_statement(&mut self) -> ParseResult<StmtKind> {
        let keyword = self.previous().clone();
        let value = self.expression()?;
        self.consume(TokenType::Semicolon, "Expected ';' after value.")?;
        Ok(StmtKind::Print(Print { keyword, value }))
    }

    fn var_declaration(&mut self) -> ParseResult<StmtKind> {
        let name = self
            .consume(TokenType::Identifier, "Expected variable name.")?
            .clone();

        let type_tag = if self.matches(&[TokenType::Colon]) {
            let type_name = self
                .consume(TokenType::Identifier, "Expected type name after ':'.")?
                .clone();
            type_name.text.parse::<TypeTag>().map_err(|_| {
                self.error(
                    &type_name,
                    Problem::UnknownTypeName,
                    &format!("Unknown type '{}'.", type_name.text),
                )
            })?
        } else {
            TypeTag::Inferred
        };

        let initializer = if self.matches(&[TokenType::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::Semicolon,
            "Expected ';' after variable declaration.",
        )?;

        self.symbols
            .define(&name.text, SymbolKind::Variable, type_tag);
        Ok(StmtKind::Var(VarDecl {
            name,
            type_tag,
            initializer,
        }))
    }

    fn const_declaration(&mut self) -> ParseResult<StmtKind> {
        let name = self
            .consume(TokenType::Identifier, "Expected constant name.")?
            .clone();
        self.consume(TokenType::Equal, "Expected '=' after constant name.")?;
        let initializer = self.expression()?;
        self.consume(
            TokenType::Semicolon,
            "Expected ';' after constant declaration.",
        )?;

        self.symbols
            .define(&name.text, SymbolKind::Constant, TypeTag::Inferred);
        Ok(StmtKind::Const(ConstDecl { name, initializer }))
    }

    fn while_statement(&mut self) -> ParseResult<StmtKind> {
        self.consume(TokenType::LeftParen, "Expected '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expected ')' after condition.")?;

        self.require_brace("Expected '{' after while condition.")?;
        let body = Box::new(self.statement()?);

        Ok(StmtKind::While(While { condition, body }))
    }

    fn expression_statement(&mut self) -> ParseResult<StmtKind> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expected ';' after expression.")?;
        Ok(StmtKind::Expression(expr))
    }

    fn function(&mut self) -> ParseResult<StmtKind> {
        let name = self
            .consume(TokenType::Identifier, "Expected function name.")?
            .clone();
        // Defined before the body so that the body can refer to itself.
        self.symbols
            .define(&name.text, SymbolKind::Function, TypeTag::Inferred);

        self.consume(TokenType::LeftParen, "Expected '(' after function name.")?;
        let mut params = Vec::new();
        if !self.check(TokenType::RightParen) {
            loop {
                if params.len() >= MAX_ARITY {
                    return Err(self.error(
                        self.peek(),
                        Problem::TooManyParameters,
                        "Can't have more than 255 parameters.",
                    ));
                }
                params.push(
                    self.consume(TokenType::Identifier, "Expected parameter name.")?
                        .clone(),
                );
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenType::RightParen, "Expected ')' after parameters.")?;
        self.consume(TokenType::LeftBrace, "Expected '{' before function body.")?;

        let body = self.scoped(|parser| {
            for param in &params {
                parser
                    .symbols
                    .define(&param.text, SymbolKind::Variable, TypeTag::Inferred);
            }
            parser.block()
        })?;

        Ok(StmtKind::Function(Function { name, params, body }))
    }

    /// Parses the statements up to the closing brace. The opening brace
    /// must be the previous token.
    fn block(&mut self) -> ParseResult<Vec<StmtKind>> {
        let opening = self.previous().clone();
        let mut statements = Vec::new();

        self.block_depth += 1;
        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.block_depth -= 1;

        if self.is_at_end() {
            return Err(self.error(
                &opening,
                Problem::UnclosedDelimiter,
                "Unclosed delimiter.",
            ));
        }

        self.consume(
            TokenType::RightBrace,
            "Unclosed delimiter. Expected '}' after block.",
        )?;
        Ok(statements)
    }

    // Expressions, loosest binding first

    fn expression(&mut self) -> ParseResult<ExprKind> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<ExprKind> {
        let expr = self.or()?;

        if self.matches(&[TokenType::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                ExprKind::Variable(variable) => Ok(ExprKind::Assign(Assign {
                    name: variable.name,
                    value: Box::new(value),
                })),
                _ => Err(self.error(
                    &equals,
                    Problem::InvalidAssignmentTarget,
                    "Invalid assignment target.",
                )),
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<ExprKind> {
        self.logical(&[TokenType::Or], Self::and)
    }

    fn and(&mut self) -> ParseResult<ExprKind> {
        self.logical(&[TokenType::And], Self::equality)
    }

    fn equality(&mut self) -> ParseResult<ExprKind> {
        self.binary(
            &[TokenType::BangEqual, TokenType::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> ParseResult<ExprKind> {
        self.binary(
            &[
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Less,
                TokenType::LessEqual,
            ],
            Self::inclusive,
        )
    }

    fn inclusive(&mut self) -> ParseResult<ExprKind> {
        self.binary(&[TokenType::Pipe], Self::exclusive)
    }

    fn exclusive(&mut self) -> ParseResult<ExprKind> {
        self.binary(&[TokenType::Caret], Self::conjunction)
    }

    fn conjunction(&mut self) -> ParseResult<ExprKind> {
        self.binary(&[TokenType::Ampersand], Self::shift)
    }

    fn shift(&mut self) -> ParseResult<ExprKind> {
        self.binary(&[TokenType::LeftShift, TokenType::RightShift], Self::term)
    }

    fn term(&mut self) -> ParseResult<ExprKind> {
        self.binary(&[TokenType::Minus, TokenType::Plus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<ExprKind> {
        self.binary(
            &[TokenType::Modulo, TokenType::Slash, TokenType::Star],
            Self::unary,
        )
    }

    fn unary(&mut self) -> ParseResult<ExprKind> {
        if self.matches(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(ExprKind::unary(operator, right));
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<ExprKind> {
        let mut expr = self.primary()?;
        while self.matches(&[TokenType::LeftParen]) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: ExprKind) -> ParseResult<ExprKind> {
        let mut arguments = Vec::new();
        if !self.check(TokenType::RightParen) {
            loop {
                if arguments.len() >= MAX_ARITY {
                    return Err(self.error(
                        self.peek(),
                        Problem::TooManyArguments,
                        "Can't have more than 255 arguments.",
                    ));
                }
                arguments.push(self.expression()?);
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }
        let paren = self
            .consume(TokenType::RightParen, "Expected ')' after arguments.")?
            .clone();

        Ok(ExprKind::Call(Call {
            callee: Box::new(callee),
            paren,
            arguments,
        }))
    }

    fn primary(&mut self) -> ParseResult<ExprKind> {
        let token = self.peek().clone();
        let value = match token.token_type {
            TokenType::False => Some(LiteralKind::Boolean(false)),
            TokenType::True => Some(LiteralKind::Boolean(true)),
            TokenType::Null => Some(LiteralKind::Null),
            TokenType::Number => Some(LiteralKind::Number(
                token.literal.clone().unwrap_or_else(|| token.text.clone()),
            )),
            TokenType::String => Some(LiteralKind::String(
                token.literal.clone().unwrap_or_default(),
            )),
            _ => None,
        };
        if let Some(value) = value {
            self.advance();
            return Ok(ExprKind::Literal(Literal { value, token }));
        }

        if self.matches(&[TokenType::Identifier]) {
            let is_constant = self
                .symbols
                .lookup(&token.text)
                .is_some_and(|symbol| symbol.kind == SymbolKind::Constant);
            return Ok(if is_constant {
                ExprKind::constant(token)
            } else {
                ExprKind::variable(token)
            });
        }

        if self.matches(&[TokenType::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expected ')' after expression.")?;
            return Ok(ExprKind::grouping(expr));
        }

        Err(self.error(
            &token,
            Problem::ExpectedExpression,
            "Expected expression.",
        ))
    }

    /// Parses one left associative level of binary operators.
    fn binary(
        &mut self,
        operators: &[TokenType],
        next: fn(&mut Self) -> ParseResult<ExprKind>,
    ) -> ParseResult<ExprKind> {
        let mut expr = next(self)?;
        while self.matches(operators) {
            let operator = self.previous().clone();
            let right = next(self)?;
            expr = ExprKind::binary(expr, operator, right);
        }
        Ok(expr)
    }

    /// Parses one left associative level of `and` / `or`.
    fn logical(
        &mut self,
        operators: &[TokenType],
        next: fn(&mut Self) -> ParseResult<ExprKind>,
    ) -> ParseResult<ExprKind> {
        let mut expr = next(self)?;
        while self.matches(operators) {
            let operator = self.previous().clone();
            let right = next(self)?;
            expr = ExprKind::logical(expr, operator, right);
        }
        Ok(expr)
    }

    // Token handling

    /// Runs the parse function inside a new symbol scope.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.symbols.enter_scope();
        let result = f(self);
        self.symbols
            .exit_scope()
            .map_err(|_| Diagnostic::todo(file!(), line!()))?;
        result
    }

    /// Skips tokens until the start of the next statement: just past a
    /// `;` or at a keyword that begins a statement. Inside a block, a `}`
    /// is left for the block to close.
    fn synchronize(&mut self) {
        if self.at_closing_brace() {
            return;
        }
        self.advance();
        while !self.is_at_end() {
            if self.previous().token_type == TokenType::Semicolon {
                return;
            }
            if self.peek().token_type.starts_statement() || self.at_closing_brace() {
                return;
            }
            self.advance();
        }
    }

    fn at_closing_brace(&self) -> bool {
        self.block_depth > 0 && self.check(TokenType::RightBrace)
    }

    fn require_brace(&self, message: &str) -> ParseResult<()> {
        if self.check(TokenType::LeftBrace) {
            Ok(())
        } else {
            Err(self.error(self.peek(), Problem::ExpectedToken, message))
        }
    }

    fn matches(&mut self, types: &[TokenType]) -> bool {
        if types.iter().any(|token_type| self.check(*token_type)) {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> ParseResult<&Token> {
        if self.check(token_type) {
            return Ok(self.advance());
        }
        Err(self.error(self.peek(), Problem::ExpectedToken, message))
    }

    fn check(&self, token_type: TokenType) -> bool {
        !self.is_at_end() && self.peek().token_type == token_type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Creates the diagnostic for a parse error at the token.
    fn error(&self, token: &Token, problem: Problem, detail: &str) -> Diagnostic {
        let message = if token.is_eof() {
            format!("at end: {}", detail)
        } else {
            format!("at '{}': {}", token.text, detail)
        };
        Diagnostic::problem(problem, Label::token(token, message))
    }
}
