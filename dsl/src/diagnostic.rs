//! Provides definition for diagnostics, which are normally errors
//! associated with compilation.
//!
//! A diagnostic is a value. Stages return diagnostics to their caller
//! rather than printing them, so the caller decides whether (and how) to
//! render them and whether compilation may continue.

use whisker_problems::Problem;

use crate::core::SourceSpan;
use crate::token::Token;

/// A position marker that has both line and offset information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifiedPosition {
    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed, counted in characters)
    pub column: usize,

    /// Byte offset from start of string (0-indexed)
    pub offset: usize,
}

impl QualifiedPosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A label that refers to some position in the source text and an
/// associated message related to that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The position of label.
    pub position: QualifiedPosition,

    /// The byte range the label covers.
    pub span: SourceSpan,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn qualified(position: QualifiedPosition, message: impl Into<String>) -> Self {
        let span = SourceSpan::range(position.offset, position.offset);
        Self {
            position,
            span,
            message: message.into(),
        }
    }

    /// Creates a label anchored at the token.
    pub fn token(token: &Token, message: impl Into<String>) -> Self {
        Self {
            position: QualifiedPosition::new(token.line, token.col, token.span.start),
            span: token.span.clone(),
            message: message.into(),
        }
    }

    /// A "position" that is not in the source text at all.
    pub fn unpositioned(message: impl Into<String>) -> Self {
        Self::qualified(QualifiedPosition::default(), message)
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the category
/// and a primary location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The compilation phase that reported the diagnostic, for example
    /// `Parse` or `Resolution`.
    pub phase: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            phase: problem.phase().to_string(),
            primary,
            described: vec![],
        }
    }

    /// Creates a "todo" diagnostic associated with a file and line in the Rust
    /// source code.
    ///
    /// Unlike other uses of problem, the location in this is related to the compiler
    /// rather than the Whisker source.
    pub fn todo(file: &str, line: u32) -> Self {
        Diagnostic::problem(
            Problem::NotImplemented,
            Label::unpositioned(format!("Not implemented at {}#L{}", file, line)),
        )
    }

    /// Creates a diagnostic for a construct that is valid but that has no
    /// lowering. The label points at the construct in the Whisker source.
    pub fn not_implemented(token: &Token, construct: &str) -> Self {
        Diagnostic::problem(
            Problem::NotImplemented,
            Label::token(token, format!("{} is not supported", construct)),
        )
        .with_context("construct", &construct.to_string())
    }

    /// Adds to the problem description (primary text) additional context
    /// about the problem.
    ///
    /// This is similar to adding a label except that this forms part of the
    /// main description and does not need to be related to a position in
    /// the source text.
    pub fn with_context(mut self, description: &str, item: &String) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    /// Returns the description for the diagnostic. This may add in other
    /// data in addition that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }

    /// Renders the diagnostic as plain text against the source that
    /// produced it.
    ///
    /// The output names the phase and position, quotes the offending line
    /// and points at the column with a caret. Tabs before the column are
    /// kept as tabs so the caret lines up in a fixed-width terminal.
    pub fn render(&self, source: &str) -> String {
        let position = &self.primary.position;
        let mut out = format!(
            "[{}Error] in line {}:{}: {}\n",
            self.phase,
            position.line,
            position.column,
            self.description()
        );

        if position.line == 0 {
            out.push_str(&self.primary.message);
            out.push('\n');
            return out;
        }

        let text = source.lines().nth(position.line - 1).unwrap_or("");
        let gutter = position.line.to_string();
        out.push_str(&format!("{} | {}\n", gutter, text));

        let pad: String = text
            .chars()
            .take(position.column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        out.push_str(&format!(
            "{} | {}^ {}\n",
            " ".repeat(gutter.len()),
            pad,
            self.primary.message
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use whisker_problems::Problem;

    use super::{Diagnostic, Label, QualifiedPosition};
    use crate::token::{Token, TokenType};

    #[test]
    fn description_when_context_then_appends_context() {
        let diagnostic = Diagnostic::problem(Problem::UndefinedVariable, Label::unpositioned(""))
            .with_context("name", &"x".to_string());

        assert_eq!(diagnostic.description(), "Variable is not defined (name=x)");
        assert_eq!(diagnostic.phase, "Resolution");
        assert_eq!(diagnostic.code, "P0012");
    }

    #[test]
    fn render_when_position_then_quotes_line_and_caret() {
        let source = "let a = 1;\nlet x = ;\n";
        let diagnostic = Diagnostic::problem(
            Problem::ExpectedExpression,
            Label::qualified(QualifiedPosition::new(2, 9, 19), "at ';': Expect expression."),
        );

        assert_eq!(
            diagnostic.render(source),
            "[ParseError] in line 2:9: Expected expression\n\
             2 | let x = ;\n  |         ^ at ';': Expect expression.\n"
        );
    }

    #[test]
    fn render_when_tabs_before_column_then_keeps_tabs() {
        let source = "\t\tx = ;";
        let token = Token::new(TokenType::Semicolon, ";", 1, 7);
        let diagnostic = Diagnostic::problem(Problem::ExpectedExpression, Label::token(&token, ""));

        let rendered = diagnostic.render(source);
        let caret_line = rendered.lines().nth(2).unwrap();
        assert_eq!(caret_line, "  | \t\t    ^ ");
    }

    #[test]
    fn todo_when_created_then_not_implemented_code() {
        let diagnostic = Diagnostic::todo(file!(), line!());
        assert_eq!(diagnostic.code, "P0020");
        assert!(diagnostic.primary.message.starts_with("Not implemented at"));
    }
}
