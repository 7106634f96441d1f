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

//! Token definitions for the C-flat language.

use logos::Logos;

/// A token in the C-flat language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Literals
    /// Integer literal. Values above `i32::MAX` are clamped.
    #[regex("[0-9]+", |lex| lex.slice().parse::<i32>().unwrap_or(i32::MAX))]
    IntLiteral(i32),
    /// String literal, without quotes and with escapes left as written.
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    StringLiteral(String),
    /// A string literal missing its closing quote. Never reaches the parser.
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,
    /// Identifier.
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Type keywords
    /// `int`
    #[token("int")]
    Int,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `void`
    #[token("void")]
    Void,
    /// `struct`
    #[token("struct")]
    Struct,

    // Boolean literals
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,

    // I/O keywords
    /// `cin`
    #[token("cin")]
    Cin,
    /// `cout`
    #[token("cout")]
    Cout,

    // Control flow keywords
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,

    // Punctuation
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Stream operators
    /// `<<` - write.
    #[token("<<")]
    WriteOp,
    /// `>>` - read.
    #[token(">>")]
    ReadOp,

    // Arithmetic operators
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Logical operators
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    // Comparison operators
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,

    /// `=` - assignment.
    #[token("=")]
    Assign,
}

impl Token {
    /// Get a human-readable name for this token.
    pub fn name(&self) -> &'static str {
        match self {
            Token::IntLiteral(_) => "integer literal",
            Token::StringLiteral(_) => "string literal",
            Token::UnterminatedString => "unterminated string",
            Token::Identifier(_) => "identifier",
            Token::Int => "'int'",
            Token::Bool => "'bool'",
            Token::Void => "'void'",
            Token::Struct => "'struct'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Cin => "'cin'",
            Token::Cout => "'cout'",
            Token::If => "'if'",
            Token::Else => "'else'",
            Token::While => "'while'",
            Token::Return => "'return'",
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::LeftParen => "'('",
            Token::RightParen => "')'",
            Token::Semicolon => "';'",
            Token::Comma => "','",
            Token::Dot => "'.'",
            Token::WriteOp => "'<<'",
            Token::ReadOp => "'>>'",
            Token::PlusPlus => "'++'",
            Token::MinusMinus => "'--'",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Bang => "'!'",
            Token::AndAnd => "'&&'",
            Token::OrOr => "'||'",
            Token::EqualEqual => "'=='",
            Token::BangEqual => "'!='",
            Token::Less => "'<'",
            Token::Greater => "'>'",
            Token::LessEqual => "'<='",
            Token::GreaterEqual => "'>='",
            Token::Assign => "'='",
        }
    }

    /// Check if this token starts a type.
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, Token::Int | Token::Bool | Token::Void)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::IntLiteral(n) => write!(f, "{}", n),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::Identifier(s) => write!(f, "{}", s),
            _ => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|t| t.ok()).collect()
    }

    #[test]
    fn test_keyword_recognition() {
        assert_eq!(
            lex_all("int bool void struct"),
            vec![Token::Int, Token::Bool, Token::Void, Token::Struct]
        );
        assert_eq!(lex_all("cin cout"), vec![Token::Cin, Token::Cout]);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            lex_all("integer iffy"),
            vec![
                Token::Identifier("integer".to_string()),
                Token::Identifier("iffy".to_string())
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            lex_all("<<= ++ -- >= !="),
            vec![
                Token::WriteOp,
                Token::Assign,
                Token::PlusPlus,
                Token::MinusMinus,
                Token::GreaterEqual,
                Token::BangEqual
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            lex_all("x // trailing\n# hash comment\ny"),
            vec![
                Token::Identifier("x".to_string()),
                Token::Identifier("y".to_string())
            ]
        );
    }

    #[test]
    fn test_string_keeps_escapes() {
        assert_eq!(
            lex_all(r#""a\n\"b""#),
            vec![Token::StringLiteral(r#"a\n\"b"#.to_string())]
        );
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::IntLiteral(42).to_string(), "42");
        assert_eq!(Token::Semicolon.to_string(), "';'");
        assert_eq!(Token::StringLiteral("hi".into()).to_string(), "\"hi\"");
    }
}
