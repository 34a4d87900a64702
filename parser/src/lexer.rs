//! Lexer for the Whisker language. The lexer transforms text into tokens
//! (tokens are the input to the parser).
//!
//! Comments and line breaks are consumed here and never reach the parser.
use std::ops::Range;

use dsl::core::SourceSpan;
use dsl::diagnostic::{Diagnostic, Label, QualifiedPosition};
use dsl::token::{Token, TokenType};
use logos::Logos;
use whisker_problems::Problem;

/// Tracks the line and the byte offset where that line starts so that
/// columns can be counted in characters.
struct Cursor<'src> {
    source: &'src str,
    line: usize,
    line_start: usize,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            line: 1,
            line_start: 0,
        }
    }

    /// Returns the 1-indexed column of the byte offset on the current line.
    fn column(&self, offset: usize) -> usize {
        self.source[self.line_start..offset].chars().count() + 1
    }

    /// Moves past the text in the range, counting the line breaks in it.
    fn advance(&mut self, start: usize, end: usize) {
        let text = &self.source[start..end];
        if let Some(last) = text.rfind('\n') {
            self.line += text.matches('\n').count();
            self.line_start = start + last + 1;
        }
    }
}

fn label(line: usize, col: usize, span: &Range<usize>, message: impl Into<String>) -> Label {
    Label {
        position: QualifiedPosition::new(line, col, span.start),
        span: SourceSpan::range(span.start, span.end),
        message: message.into(),
    }
}

/// Tokenize a Whisker program.
///
/// Returns a list of tokens and a list of diagnostics. This does not return a result
/// because we continue with parsing even if there are token errors: the
/// parser can still report what is wrong with the rest of the program.
///
/// The token list always ends with exactly one [`TokenType::Eof`].
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lexer = TokenType::lexer(source);
    let mut cursor = Cursor::new(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let line = cursor.line;
        let col = cursor.column(span.start);

        match token {
            Ok(TokenType::Newline) | Ok(TokenType::BlockComment(true)) => {}
            Ok(TokenType::BlockComment(false)) => {
                diagnostics.push(Diagnostic::problem(
                    Problem::UnterminatedComment,
                    label(line, col, &span, "Unterminated block comment."),
                ));
            }
            Ok(TokenType::UnterminatedString) => {
                diagnostics.push(Diagnostic::problem(
                    Problem::UnterminatedString,
                    label(line, col, &span, "Unterminated string."),
                ));
            }
            Ok(token_type) => {
                let mut token = Token::new(token_type, text, line, col)
                    .with_span(SourceSpan::range(span.start, span.end));
                match token_type {
                    TokenType::Number => token = token.with_literal(text),
                    TokenType::String => token = token.with_literal(&text[1..text.len() - 1]),
                    _ => {}
                }
                tokens.push(token);
            }
            Err(_) => {
                diagnostics.push(Diagnostic::problem(
                    Problem::UnexpectedCharacter,
                    label(
                        line,
                        col,
                        &span,
                        format!("Unexpected character: '{}'.", text),
                    ),
                ));
            }
        }

        cursor.advance(span.start, span.end);
    }

    let end = source.len();
    tokens.push(
        Token::new(TokenType::Eof, "", cursor.line, cursor.column(end))
            .with_span(SourceSpan::range(end, end)),
    );

    log::trace!(
        "Tokenized {} tokens with {} diagnostics",
        tokens.len(),
        diagnostics.len()
    );

    (tokens, diagnostics)
}

#[cfg(test)]
mod test {
    use dsl::token::TokenType;
    use whisker_test::read_shared_resource;

    use super::tokenize;

    fn kinds(source: &str) -> Vec<TokenType> {
        let (tokens, _) = tokenize(source);
        tokens.iter().map(|tok| tok.token_type).collect()
    }

    #[test]
    fn tokenize_when_empty_then_only_eof() {
        let (tokens, diagnostics) = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn tokenize_when_keywords_then_keyword_tokens() {
        assert_eq!(
            kinds("let letter = while;"),
            vec![
                TokenType::Let,
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::While,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_when_multiple_lines_then_line_and_column() {
        let (tokens, _) = tokenize("a\n  bc = 12;");
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 6), (2, 8), (2, 10), (2, 11)]);
    }

    #[test]
    fn tokenize_when_block_comment_spans_lines_then_counts_lines() {
        let (tokens, diagnostics) = tokenize("/* one\ntwo\n*/ x");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].token_type, TokenType::Identifier);
        assert_eq!((tokens[0].line, tokens[0].col), (3, 4));
    }

    #[test]
    fn tokenize_when_line_comment_then_skipped() {
        assert_eq!(
            kinds("1 // ignored ; stuff\n2"),
            vec![TokenType::Number, TokenType::Number, TokenType::Eof]
        );
    }

    #[test]
    fn tokenize_when_string_then_literal_excludes_quotes() {
        let (tokens, _) = tokenize("\"hello\"");
        assert_eq!(tokens[0].token_type, TokenType::String);
        assert_eq!(tokens[0].text, "\"hello\"");
        assert_eq!(tokens[0].literal.as_deref(), Some("hello"));
    }

    #[test]
    fn tokenize_when_number_then_literal_is_text() {
        let (tokens, _) = tokenize("042");
        assert_eq!(tokens[0].literal.as_deref(), Some("042"));
    }

    #[test]
    fn tokenize_when_unterminated_string_then_diagnostic_at_start() {
        let (tokens, diagnostics) = tokenize("x = \"abc");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "P0002");
        assert_eq!(diagnostics[0].primary.position.column, 5);
        assert_eq!(tokens.last().map(|t| t.token_type), Some(TokenType::Eof));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn tokenize_when_unterminated_comment_then_diagnostic() {
        let (tokens, diagnostics) = tokenize("1;\n/* never closed");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "P0003");
        assert_eq!(diagnostics[0].primary.position.line, 2);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn tokenize_when_unexpected_character_then_reports_and_continues() {
        let (tokens, diagnostics) = tokenize("1 @ 2");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "P0001");
        assert_eq!(diagnostics[0].primary.message, "Unexpected character: '@'.");
        assert_eq!(diagnostics[0].primary.position.column, 3);
        assert_eq!(
            tokens.iter().map(|t| t.token_type).collect::<Vec<_>>(),
            vec![TokenType::Number, TokenType::Number, TokenType::Eof]
        );
    }

    #[test]
    fn tokenize_when_tabs_then_each_is_one_column() {
        let (tokens, _) = tokenize("\t\tx");
        assert_eq!(tokens[0].col, 3);
    }

    #[test]
    fn tokenize_when_shared_resources_then_no_diagnostics() {
        for name in ["arithmetic.wsk", "control_flow.wsk", "declarations.wsk"] {
            let source = read_shared_resource(name);
            let (_, diagnostics) = tokenize(&source);
            assert!(diagnostics.is_empty(), "{} has {:?}", name, diagnostics);
        }
    }
}
