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

//! Expression AST nodes for the C-flat compiler.

use super::{Ident, NodeId};
use crate::error::Span;

/// An expression in the C-flat language.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Key for the expression's type annotation.
    pub id: NodeId,
    /// The kind of expression.
    pub kind: ExprKind,
    /// The source span of this expression.
    pub span: Span,
}

impl Expr {
    /// Create a new expression.
    pub fn new(id: NodeId, kind: ExprKind, span: Span) -> Self {
        Self { id, kind, span }
    }

    /// Check if this expression denotes a storage location.
    pub fn is_location(&self) -> bool {
        matches!(self.kind, ExprKind::Id(_) | ExprKind::Dot { .. })
    }

    /// The leftmost identifier of this expression, used to position
    /// diagnostics the way the reader expects.
    pub fn first_ident(&self) -> Option<&Ident> {
        match &self.kind {
            ExprKind::Id(ident) => Some(ident),
            ExprKind::Dot { base, .. } => base.first_ident(),
            ExprKind::Assign { target, .. } => target.first_ident(),
            ExprKind::Call { callee, .. } => Some(callee),
            ExprKind::Unary { operand, .. } => operand.first_ident(),
            ExprKind::Binary { left, .. } => left.first_ident(),
            ExprKind::IntLiteral(_) | ExprKind::StringLiteral(_) | ExprKind::BoolLiteral(_) => {
                None
            }
        }
    }

    /// Span used when reporting a diagnostic about this expression.
    pub fn report_span(&self) -> Span {
        self.first_ident()
            .map(|ident| ident.span.clone())
            .unwrap_or_else(|| self.span.clone())
    }
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// An integer literal.
    IntLiteral(i32),

    /// A string literal, escapes kept as written.
    StringLiteral(String),

    /// `true` or `false`.
    BoolLiteral(bool),

    /// A plain identifier use.
    Id(Ident),

    /// Field access `base.field`.
    Dot { base: Box<Expr>, field: Ident },

    /// Assignment `target = value`; `target` is a location.
    Assign { target: Box<Expr>, value: Box<Expr> },

    /// A function call.
    Call { callee: Ident, args: Vec<Expr> },

    /// A unary operation.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// A binary operation.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Logical
    And,
    Or,

    // Equality
    Equal,
    NotEqual,

    // Relational
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    /// Check if this is an arithmetic operator.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }

    /// Check if this is a short-circuit logical operator.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Check if this is `==` or `!=`.
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOp::Equal | BinaryOp::NotEqual)
    }

    /// Check if this is an ordering comparison.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual
        )
    }

    /// Get the string representation of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (-).
    Negate,
    /// Logical not (!).
    Not,
}

impl UnaryOp {
    /// Get the string representation of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
