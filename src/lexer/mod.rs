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

//! Lexer module for the C-flat compiler.
//!
//! Token recognition is derived with `logos`; this module adds the checks
//! the regular grammar cannot express:
//! - escape sequences inside string literals
//! - unterminated string literals
//! - integer literals that overflow `i32` (a warning, not an error)

mod tokens;

pub use tokens::Token;

use crate::error::{CompileError, CompileWarning, ErrorCode, Span, WarningCode};
use logos::Logos;

/// Escapes accepted inside string literals.
const VALID_ESCAPES: [char; 5] = ['n', 't', '\'', '"', '\\'];

/// Tokenize source code, discarding warnings.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    tokenize_with_warnings(source).map(|(tokens, _)| tokens)
}

/// Tokenize source code into `(token, span)` pairs plus any warnings.
pub fn tokenize_with_warnings(
    source: &str,
) -> Result<(Vec<(Token, Span)>, Vec<CompileWarning>), CompileError> {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        let token = match result {
            Ok(token) => token,
            Err(()) => {
                return Err(CompileError::new(
                    ErrorCode::InvalidCharacter,
                    format!("ignoring illegal character: {}", lexer.slice()),
                    span,
                ));
            }
        };

        match &token {
            Token::UnterminatedString => {
                return Err(CompileError::new(
                    ErrorCode::UnterminatedString,
                    format!("unterminated string literal ignored: {}", lexer.slice()),
                    span,
                ));
            }
            Token::StringLiteral(text) => check_escapes(text, &span)?,
            Token::IntLiteral(_) if lexer.slice().parse::<i32>().is_err() => {
                warnings.push(CompileWarning::new(
                    WarningCode::IntegerLiteralTooLarge,
                    "integer literal too large; using max value",
                    span.clone(),
                ));
            }
            _ => {}
        }

        tokens.push((token, span));
    }

    log::trace!(
        "lexed {} tokens ({} warnings)",
        tokens.len(),
        warnings.len()
    );
    Ok((tokens, warnings))
}

/// Reject escape sequences the target assembler would not understand.
fn check_escapes(text: &str, span: &Span) -> Result<(), CompileError> {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            Some(escaped) if VALID_ESCAPES.contains(&escaped) => {}
            Some(escaped) => {
                return Err(CompileError::new(
                    ErrorCode::InvalidEscapeSequence,
                    format!(
                        "string literal with bad escaped character ignored: \\{}",
                        escaped
                    ),
                    span.clone(),
                ));
            }
            None => {
                return Err(CompileError::new(
                    ErrorCode::UnterminatedString,
                    "unterminated string literal ignored",
                    span.clone(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    // ========================================
    // Token Stream Tests
    // ========================================

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \n\t // nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("int x;"),
            vec![
                Token::Int,
                Token::Identifier("x".to_string()),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn test_io_statement_tokens() {
        assert_eq!(
            kinds("cout << \"hi\"; cin >> x;"),
            vec![
                Token::Cout,
                Token::WriteOp,
                Token::StringLiteral("hi".to_string()),
                Token::Semicolon,
                Token::Cin,
                Token::ReadOp,
                Token::Identifier("x".to_string()),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let tokens = tokenize("int  xy;").unwrap();
        assert_eq!(tokens[0].1, Span::new(0, 3));
        assert_eq!(tokens[1].1, Span::new(5, 7));
        assert_eq!(tokens[2].1, Span::new(7, 8));
    }

    // ========================================
    // Literal Tests
    // ========================================

    #[test]
    fn test_integer_literal() {
        assert_eq!(kinds("2147483647"), vec![Token::IntLiteral(i32::MAX)]);
    }

    #[test]
    fn test_integer_overflow_warns_and_clamps() {
        let (tokens, warnings) = tokenize_with_warnings("99999999999").unwrap();
        assert_eq!(tokens[0].0, Token::IntLiteral(i32::MAX));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::IntegerLiteralTooLarge);
    }

    #[test]
    fn test_valid_escapes() {
        assert!(tokenize(r#""tab\there\nquote\" back\\ tick\'""#).is_ok());
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_illegal_character() {
        let err = tokenize("int x @ y;").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCharacter);
        assert_eq!(err.span, Span::new(6, 7));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("cout << \"abc\n;").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnterminatedString);
    }

    #[test]
    fn test_bad_escape() {
        let err = tokenize(r#""a\qb""#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEscapeSequence);
    }
}
