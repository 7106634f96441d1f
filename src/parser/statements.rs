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

//! Statement parsing for the parser.
//!
//! This module provides statement parsing functionality:
//! - Assignment, increment and decrement statements
//! - Call statements
//! - `cin >>` and `cout <<`
//! - `if`, `if`/`else` and `while`
//! - `return`

use super::declarations::DeclarationParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{ExprKind, Stmt, StmtKind};
use crate::error::{CompileError, ErrorCode, Span};
use crate::lexer::Token;

/// Extension trait for statement parsing.
pub trait StatementParser {
    /// Parse a statement.
    fn parse_statement(&mut self) -> Result<Stmt, CompileError>;

    /// Parse a statement starting with an identifier.
    fn parse_identifier_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Parse `cin >> loc;`.
    fn parse_read_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Parse `cout << exp;`.
    fn parse_write_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Parse an `if` statement with an optional `else` block.
    fn parse_if_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Parse a `while` loop.
    fn parse_while_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Parse a `return` statement.
    fn parse_return_statement(&mut self, start: Span) -> Result<Stmt, CompileError>;

    /// Consume the closing `;` and return the merged span.
    fn finish_statement(&mut self, start: Span) -> Result<Span, CompileError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_statement(&mut self) -> Result<Stmt, CompileError> {
        let Some(start) = self.peek_span() else {
            return Err(self.unexpected("Expected statement"));
        };

        match self.peek() {
            Some(Token::Identifier(_)) => self.parse_identifier_statement(start),
            Some(Token::Cin) => self.parse_read_statement(start),
            Some(Token::Cout) => self.parse_write_statement(start),
            Some(Token::If) => self.parse_if_statement(start),
            Some(Token::While) => self.parse_while_statement(start),
            Some(Token::Return) => self.parse_return_statement(start),
            _ => Err(self.unexpected("Expected statement")),
        }
    }

    fn parse_identifier_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        let expr = self.parse_expression()?;

        if expr.is_location() {
            if self.match_token(&Token::PlusPlus) {
                let span = self.finish_statement(start)?;
                return Ok(Stmt::new(StmtKind::PostInc(expr), span));
            }
            if self.match_token(&Token::MinusMinus) {
                let span = self.finish_statement(start)?;
                return Ok(Stmt::new(StmtKind::PostDec(expr), span));
            }
        }

        let kind = match &expr.kind {
            ExprKind::Assign { .. } => StmtKind::Assign(expr),
            ExprKind::Call { .. } => StmtKind::Call(expr),
            _ => {
                return Err(CompileError::new(
                    ErrorCode::UnexpectedToken,
                    "Expected assignment, call, '++' or '--'",
                    expr.span.clone(),
                ))
            }
        };

        let span = self.finish_statement(start)?;
        Ok(Stmt::new(kind, span))
    }

    fn parse_read_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        self.advance();
        self.expect(&Token::ReadOp, "Expected '>>' after 'cin'")?;

        let target = self.parse_expression()?;
        if !target.is_location() {
            return Err(CompileError::new(
                ErrorCode::InvalidAssignmentTarget,
                "'cin >>' needs a variable or field",
                target.span.clone(),
            ));
        }

        let span = self.finish_statement(start)?;
        Ok(Stmt::new(StmtKind::Read(target), span))
    }

    fn parse_write_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        self.advance();
        self.expect(&Token::WriteOp, "Expected '<<' after 'cout'")?;

        let value = self.parse_expression()?;
        let span = self.finish_statement(start)?;
        Ok(Stmt::new(StmtKind::Write(value), span))
    }

    fn parse_if_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        self.advance();
        self.expect(&Token::LeftParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expression()?;
        self.expect(&Token::RightParen, "Expected ')' after condition")?;

        let then_body = self.parse_body()?;
        let else_body = if self.match_token(&Token::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };

        let span = start.merge(&self.previous_span());
        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            span,
        ))
    }

    fn parse_while_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        self.advance();
        self.expect(&Token::LeftParen, "Expected '(' after 'while'")?;
        let cond = self.parse_expression()?;
        self.expect(&Token::RightParen, "Expected ')' after condition")?;

        let body = self.parse_body()?;

        let span = start.merge(&self.previous_span());
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    fn parse_return_statement(&mut self, start: Span) -> Result<Stmt, CompileError> {
        self.advance();

        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let span = self.finish_statement(start)?;
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn finish_statement(&mut self, start: Span) -> Result<Span, CompileError> {
        let end = self.expect(&Token::Semicolon, "Expected ';' after statement")?;
        Ok(start.merge(&end))
    }
}
