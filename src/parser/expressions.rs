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

//! Expression parsing for the parser.
//!
//! Precedence, lowest first:
//! - assignment (right associative, target must be a location)
//! - `||`
//! - `&&`
//! - comparisons (non-associative)
//! - `+` `-`
//! - `*` `/`
//! - unary `!` `-`
//! - field access, calls and primaries

use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an assignment or anything of higher precedence.
    fn parse_assignment_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'or' expression.
    fn parse_or_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'and' expression.
    fn parse_and_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a comparison expression.
    fn parse_comparison_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse a comparison operator.
    fn try_parse_comparison_op(&mut self) -> Option<BinaryOp>;

    /// Parse an additive expression.
    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse an additive operator.
    fn try_parse_additive_op(&mut self) -> Option<BinaryOp>;

    /// Parse a multiplicative expression.
    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse a multiplicative operator.
    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp>;

    /// Parse a unary expression.
    fn parse_unary_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a primary expression.
    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an identifier use: a location, a field chain or a call.
    fn parse_identifier_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a comma separated argument list after `(`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, CompileError>;

    /// Build a binary node with a fresh id.
    fn binary(&mut self, left: Expr, op: BinaryOp, right: Expr) -> Expr;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expr, CompileError> {
        self.parse_assignment_expression()
    }

    fn parse_assignment_expression(&mut self) -> Result<Expr, CompileError> {
        let target = self.parse_or_expression()?;

        if !self.check(&Token::Assign) {
            return Ok(target);
        }

        if !target.is_location() {
            return Err(CompileError::new(
                ErrorCode::InvalidAssignmentTarget,
                "Left side of '=' must be a variable or field",
                target.span.clone(),
            ));
        }

        self.advance();
        let value = self.parse_assignment_expression()?;
        let span = target.span.merge(&value.span);
        let id = self.next_id();
        Ok(Expr::new(
            id,
            ExprKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_or_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_and_expression()?;

        while self.match_token(&Token::OrOr) {
            let right = self.parse_and_expression()?;
            left = self.binary(left, BinaryOp::Or, right);
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_comparison_expression()?;

        while self.match_token(&Token::AndAnd) {
            let right = self.parse_comparison_expression()?;
            left = self.binary(left, BinaryOp::And, right);
        }

        Ok(left)
    }

    fn parse_comparison_expression(&mut self) -> Result<Expr, CompileError> {
        let left = self.parse_additive_expression()?;

        let Some(op) = self.try_parse_comparison_op() else {
            return Ok(left);
        };
        let right = self.parse_additive_expression()?;
        let expr = self.binary(left, op, right);

        if self.peek().is_some_and(is_comparison_token) {
            return Err(self.error(
                ErrorCode::NonAssociativeComparison,
                "Comparison operators cannot be chained",
            ));
        }

        Ok(expr)
    }

    fn try_parse_comparison_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::EqualEqual => BinaryOp::Equal,
            Token::BangEqual => BinaryOp::NotEqual,
            Token::Less => BinaryOp::Less,
            Token::Greater => BinaryOp::Greater,
            Token::LessEqual => BinaryOp::LessEqual,
            Token::GreaterEqual => BinaryOp::GreaterEqual,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.try_parse_additive_op() {
            let right = self.parse_multiplicative_expression()?;
            left = self.binary(left, op, right);
        }

        Ok(left)
    }

    fn try_parse_additive_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.try_parse_multiplicative_op() {
            let right = self.parse_unary_expression()?;
            left = self.binary(left, op, right);
        }

        Ok(left)
    }

    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_unary_expression(&mut self) -> Result<Expr, CompileError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Negate,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };

        let start = self.peek_span().unwrap_or_else(|| self.previous_span());
        self.advance();
        let operand = self.parse_unary_expression()?;
        let span = start.merge(&operand.span);
        let id = self.next_id();
        Ok(Expr::new(
            id,
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError> {
        let kind = match self.peek() {
            Some(Token::IntLiteral(value)) => ExprKind::IntLiteral(*value),
            Some(Token::StringLiteral(text)) => ExprKind::StringLiteral(text.clone()),
            Some(Token::True) => ExprKind::BoolLiteral(true),
            Some(Token::False) => ExprKind::BoolLiteral(false),
            Some(Token::Identifier(_)) => return self.parse_identifier_expression(),
            Some(Token::LeftParen) => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&Token::RightParen, "Expected ')' after expression")?;
                return Ok(inner);
            }
            Some(_) => {
                return Err(self.error(ErrorCode::ExpectedExpression, "Expected expression"))
            }
            None => return Err(self.unexpected("Expected expression")),
        };

        let span = self.peek_span().unwrap_or_else(|| self.previous_span());
        self.advance();
        let id = self.next_id();
        Ok(Expr::new(id, kind, span))
    }

    fn parse_identifier_expression(&mut self) -> Result<Expr, CompileError> {
        let name = self.expect_identifier("Expected identifier")?;

        if self.match_token(&Token::LeftParen) {
            let args = self.parse_arguments()?;
            let end = self.expect(&Token::RightParen, "Expected ')' after arguments")?;
            let span = name.span.merge(&end);
            let id = self.next_id();
            return Ok(Expr::new(id, ExprKind::Call { callee: name, args }, span));
        }

        let span = name.span.clone();
        let id = self.next_id();
        let mut expr = Expr::new(id, ExprKind::Id(name), span);

        while self.match_token(&Token::Dot) {
            let field = self.expect_identifier("Expected field name after '.'")?;
            let span = expr.span.merge(&field.span);
            let id = self.next_id();
            expr = Expr::new(
                id,
                ExprKind::Dot {
                    base: Box::new(expr),
                    field,
                },
                span,
            );
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, CompileError> {
        let mut args = Vec::new();
        if self.check(&Token::RightParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        Ok(args)
    }

    fn binary(&mut self, left: Expr, op: BinaryOp, right: Expr) -> Expr {
        let span = left.span.merge(&right.span);
        let id = self.next_id();
        Expr::new(
            id,
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }
}

fn is_comparison_token(token: &Token) -> bool {
    matches!(
        token,
        Token::EqualEqual
            | Token::BangEqual
            | Token::Less
            | Token::Greater
            | Token::LessEqual
            | Token::GreaterEqual
    )
}
