// C-flat - A compiler for the C-flat teaching language targeting a MIPS-style stack machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Error and diagnostic types for the C-flat compiler.
//!
//! Lexical and syntax errors abort the front end with a single
//! [`CompileError`]. Name and type errors are collected into [`Diagnostics`]
//! so a pass can keep walking the tree after the first problem.

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The broad class an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Name,
    Type,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Lexical => "LexicalError",
            ErrorCategory::Syntax => "SyntaxError",
            ErrorCategory::Name => "NameError",
            ErrorCategory::Type => "TypeError",
        };
        write!(f, "{}", name)
    }
}

/// Error codes for the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E012)
    InvalidCharacter,
    UnterminatedString,
    InvalidEscapeSequence,

    // Syntax errors (E100-E112)
    UnexpectedToken,
    UnexpectedEndOfFile,
    ExpectedExpression,
    ExpectedIdentifier,
    ExpectedType,
    InvalidAssignmentTarget,
    NonAssociativeComparison,
    EmptyStructBody,

    // Name errors (E200-E205)
    UndeclaredIdentifier,
    MultiplyDeclared,
    InvalidStructType,
    InvalidStructField,
    DotAccessOfNonStruct,
    NonFunctionDeclaredVoid,

    // Type errors (E300-E341)
    ArithmeticOperand,
    LogicalOperand,
    RelationalOperand,
    EqualityOperand,
    TypeMismatch,
    InvalidAssignment,
    NotAFunction,
    WrongNumberOfArguments,
    ArgumentTypeMismatch,
    MissingReturnValue,
    ReturnValueInVoidFunction,
    BadReturnValue,
    IllegalRead,
    IllegalWrite,
    NonBoolCondition,
    NoMainFunction,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::UnterminatedString => "E010",
            ErrorCode::InvalidEscapeSequence => "E012",

            // Syntax errors
            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::UnexpectedEndOfFile => "E101",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::ExpectedType => "E106",
            ErrorCode::InvalidAssignmentTarget => "E109",
            ErrorCode::NonAssociativeComparison => "E111",
            ErrorCode::EmptyStructBody => "E112",

            // Name errors
            ErrorCode::UndeclaredIdentifier => "E200",
            ErrorCode::MultiplyDeclared => "E201",
            ErrorCode::InvalidStructType => "E202",
            ErrorCode::InvalidStructField => "E203",
            ErrorCode::DotAccessOfNonStruct => "E204",
            ErrorCode::NonFunctionDeclaredVoid => "E205",

            // Type errors
            ErrorCode::ArithmeticOperand => "E300",
            ErrorCode::LogicalOperand => "E301",
            ErrorCode::RelationalOperand => "E302",
            ErrorCode::EqualityOperand => "E303",
            ErrorCode::TypeMismatch => "E310",
            ErrorCode::InvalidAssignment => "E311",
            ErrorCode::NotAFunction => "E320",
            ErrorCode::WrongNumberOfArguments => "E321",
            ErrorCode::ArgumentTypeMismatch => "E322",
            ErrorCode::MissingReturnValue => "E325",
            ErrorCode::ReturnValueInVoidFunction => "E326",
            ErrorCode::BadReturnValue => "E327",
            ErrorCode::IllegalRead => "E330",
            ErrorCode::IllegalWrite => "E331",
            ErrorCode::NonBoolCondition => "E340",
            ErrorCode::NoMainFunction => "E341",
        }
    }

    /// Get the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self.code().as_bytes()[1] {
            b'0' => ErrorCategory::Lexical,
            b'1' => ErrorCategory::Syntax,
            b'2' => ErrorCategory::Name,
            _ => ErrorCategory::Type,
        }
    }
}

/// A compiler error with source location.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    IntegerLiteralTooLarge,
}

impl WarningCode {
    /// Get the numeric code for this warning.
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::IntegerLiteralTooLarge => "W001",
        }
    }
}

/// A non-fatal diagnostic.
#[derive(Debug, Clone)]
pub struct CompileWarning {
    pub code: WarningCode,
    pub message: String,
    pub span: Span,
}

impl CompileWarning {
    /// Create a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[line_start..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Severity of a collected diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One entry of the diagnostic stream, already positioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// `E...` or `W...` code.
    pub code: &'static str,
    pub message: String,
    pub span: Span,
    /// 1-based line, or 0 for program-level diagnostics.
    pub line: usize,
    /// 1-based column, or 0 for program-level diagnostics.
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "***ERROR***",
            Severity::Warning => "***WARNING***",
        };
        write!(f, "{}:{} {} {}", self.line, self.column, tag, self.message)
    }
}

/// The ordered diagnostic stream of one compilation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty diagnostic stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fatal error, positioning it against `source`.
    pub fn error(&mut self, error: &CompileError, source: &str) {
        let (line, column) = Self::position(source, &error.span);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            code: error.code_str(),
            message: error.message.clone(),
            span: error.span.clone(),
            line,
            column,
        });
    }

    /// Record a fatal error that belongs to the whole program (`0:0`).
    pub fn program_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            code: code.code(),
            message: message.into(),
            span: Span::default(),
            line: 0,
            column: 0,
        });
    }

    /// Record a warning, positioning it against `source`.
    pub fn warning(&mut self, warning: &CompileWarning, source: &str) {
        let (line, column) = Self::position(source, &warning.span);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            code: warning.code.code(),
            message: warning.message.clone(),
            span: warning.span.clone(),
            line,
            column,
        });
    }

    fn position(source: &str, span: &Span) -> (usize, usize) {
        let loc = SourceLocation::from_offset(source, span.start);
        (loc.line, loc.column)
    }

    /// Check if any fatal diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Number of fatal diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Iterate over the fatal diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Render one diagnostic with an `ariadne` source snippet.
pub fn render_pretty(diagnostic: &Diagnostic, source: &str, filename: &str) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };

    let mut builder = Report::build(kind, filename, diagnostic.span.start)
        .with_code(diagnostic.code)
        .with_message(&diagnostic.message);
    if diagnostic.line > 0 {
        let end = diagnostic.span.end.max(diagnostic.span.start + 1).min(source.len());
        let start = diagnostic.span.start.min(end);
        builder = builder.with_label(
            Label::new((filename, start..end))
                .with_message(&diagnostic.message)
                .with_color(color),
        );
    }

    let mut out = Vec::new();
    if builder
        .finish()
        .write((filename, Source::from(source)), &mut out)
        .is_err()
    {
        return format!("{}\n", diagnostic);
    }
    String::from_utf8_lossy(&out).into_owned()
}
