//! Provides definitions of the tokens of the Whisker language.
use std::fmt;

use logos::{Lexer, Logos};

use crate::core::SourceSpan;

/// Consumes the body of a block comment.
///
/// Returns whether the closing `*/` was found. An unterminated comment
/// consumes the rest of the input.
fn block_comment(lex: &mut Lexer<TokenType>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"([ \t\r\f]+|//[^\n]*)")]
pub enum TokenType {
    #[token("\n")]
    Newline,

    /// A `/* ... */` comment. The value is false when the comment runs to
    /// the end of the input without the closing marker.
    #[token("/*", block_comment)]
    BlockComment(bool),

    // Grouping and other markers
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,

    // Operators
    #[token("-")]
    Minus,
    #[token("%")]
    Modulo,
    #[token("+")]
    Plus,
    #[token("&")]
    Ampersand,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,

    // Literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r#""[^"]*""#)]
    String,
    /// A string that reaches the end of the input without a closing quote.
    #[regex(r#""[^"]*"#)]
    UnterminatedString,
    #[regex(r"[0-9]+")]
    Number,

    // Keywords
    #[token("and")]
    And,
    #[token("break")]
    Break,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fn")]
    Fn,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("not")]
    Not,
    #[token("null")]
    Null,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("self")]
    SelfValue,
    #[token("super")]
    Super,
    #[token("true")]
    True,
    #[token("let")]
    Let,
    #[token("while")]
    While,

    /// Marks the end of the input. Never produced by the lexer rules; the
    /// tokenizer appends exactly one.
    Eof,
}

impl TokenType {
    /// Returns true for the keywords that begin a statement or declaration.
    ///
    /// The parser uses this set to find a place to resume after an error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenType::Const
                | TokenType::Class
                | TokenType::Fn
                | TokenType::Let
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return
        )
    }
}

/// A token produced by the lexer. Tokens are never modified once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,

    /// Byte range of the lexeme in the source text.
    pub span: SourceSpan,

    /// The line number (1-indexed).
    pub line: usize,

    /// The column of the first character (1-indexed).
    pub col: usize,

    /// The lexeme exactly as it appears in the source text.
    pub text: String,

    /// The literal value for numbers (the digits) and strings (the text
    /// between the quotes).
    pub literal: Option<String>,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            token_type,
            span: SourceSpan::default(),
            line,
            col,
            text: text.into(),
            literal: None,
        }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {:?}, Value: '{}', At: Ln {},Col {}",
            self.token_type, self.text, self.line, self.col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TokenType;
    use logos::Logos;

    fn kinds(source: &str) -> Vec<TokenType> {
        TokenType::lexer(source).filter_map(|tok| tok.ok()).collect()
    }

    #[test]
    fn lexer_when_two_character_operators_then_greedy() {
        assert_eq!(
            kinds("<= << >= >> == !="),
            vec![
                TokenType::LessEqual,
                TokenType::LeftShift,
                TokenType::GreaterEqual,
                TokenType::RightShift,
                TokenType::EqualEqual,
                TokenType::BangEqual,
            ]
        );
    }

    #[test]
    fn lexer_when_keyword_prefix_then_identifier() {
        assert_eq!(
            kinds("let letter while_ fn"),
            vec![
                TokenType::Let,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Fn,
            ]
        );
    }

    #[test]
    fn lexer_when_line_comment_then_skipped() {
        assert_eq!(
            kinds("1 // two\n3"),
            vec![TokenType::Number, TokenType::Newline, TokenType::Number]
        );
    }

    #[test]
    fn lexer_when_block_comment_unterminated_then_flagged() {
        assert_eq!(
            kinds("1 /* open"),
            vec![TokenType::Number, TokenType::BlockComment(false)]
        );
    }

    #[test]
    fn lexer_when_question_mark_then_error() {
        let mut lex = TokenType::lexer("?");
        assert!(lex.next().unwrap().is_err());
    }

    #[test]
    fn starts_statement_when_print_then_true() {
        assert!(TokenType::Print.starts_statement());
        assert!(!TokenType::Identifier.starts_statement());
    }
}
