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

//! Statement AST nodes for the C-flat compiler.

use super::{Body, Expr};
use crate::error::Span;

/// A statement in the C-flat language.
#[derive(Debug, Clone)]
pub struct Stmt {
    /// The kind of statement.
    pub kind: StmtKind,
    /// The source span of this statement.
    pub span: Span,
}

impl Stmt {
    /// Create a new statement.
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `loc = exp;` (the expression is an [`ExprKind::Assign`](super::ExprKind::Assign)).
    Assign(Expr),

    /// `loc++;`
    PostInc(Expr),

    /// `loc--;`
    PostDec(Expr),

    /// `cin >> loc;`
    Read(Expr),

    /// `cout << exp;`
    Write(Expr),

    /// `if (cond) { ... } [else { ... }]`
    If {
        cond: Expr,
        then_body: Body,
        else_body: Option<Body>,
    },

    /// `while (cond) { ... }`
    While { cond: Expr, body: Body },

    /// `f(args);` (the expression is an [`ExprKind::Call`](super::ExprKind::Call)).
    Call(Expr),

    /// `return [exp];`
    Return(Option<Expr>),
}
