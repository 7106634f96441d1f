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

//! Resolution of identifier uses in statements and expressions.

use super::declarations::DeclarationResolver;
use super::resolver::NameResolver;
use super::symbol::SymbolId;
use crate::ast::{Body, Expr, ExprKind, Stmt, StmtKind};
use crate::error::{ErrorCode, Span};

/// Outcome of resolving one step of a location.
#[derive(Debug, Clone)]
pub enum Access {
    /// Already reported; stop processing this chain.
    Bad,
    /// A struct instance of the given definition.
    Struct(SymbolId),
    /// Anything else; the span is that of its last name.
    Plain(Span),
}

/// Extension trait for resolving uses.
pub trait ReferenceResolver {
    /// Resolve a statement.
    fn resolve_stmt(&mut self, stmt: &Stmt);

    /// Resolve a nested block in its own transient scope.
    fn resolve_block(&mut self, body: &Body);

    /// Resolve an expression.
    fn resolve_expr(&mut self, expr: &Expr);

    /// Resolve a location left to right through its field chain.
    fn resolve_access(&mut self, expr: &Expr) -> Access;
}

impl<'a> ReferenceResolver for NameResolver<'a> {
    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign(expr)
            | StmtKind::PostInc(expr)
            | StmtKind::PostDec(expr)
            | StmtKind::Read(expr)
            | StmtKind::Write(expr)
            | StmtKind::Call(expr) => self.resolve_expr(expr),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                self.resolve_expr(cond);
                self.resolve_block(then_body);
                if let Some(else_body) = else_body {
                    self.resolve_block(else_body);
                }
            }
            StmtKind::While { cond, body } => {
                self.resolve_expr(cond);
                self.resolve_block(body);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_block(&mut self, body: &Body) {
        self.table.add_scope();
        self.resolve_body(body);
        self.leave_scope();
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLiteral(_) | ExprKind::StringLiteral(_) | ExprKind::BoolLiteral(_) => {}
            ExprKind::Id(_) | ExprKind::Dot { .. } => {
                self.resolve_access(expr);
            }
            ExprKind::Assign { target, value } => {
                self.resolve_expr(target);
                self.resolve_expr(value);
            }
            ExprKind::Call { callee, args } => {
                self.resolve_ident(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
        }
    }

    fn resolve_access(&mut self, expr: &Expr) -> Access {
        match &expr.kind {
            ExprKind::Id(ident) => match self.resolve_ident(ident) {
                None => Access::Bad,
                Some(id) => match self.annotations.symbol(id).struct_def_id() {
                    Some(def) => Access::Struct(def),
                    None => Access::Plain(ident.span.clone()),
                },
            },
            ExprKind::Dot { base, field } => {
                let def = match self.resolve_access(base) {
                    Access::Bad => return Access::Bad,
                    Access::Plain(span) => {
                        self.report(
                            ErrorCode::DotAccessOfNonStruct,
                            "Dot-access of non-struct type",
                            span,
                        );
                        return Access::Bad;
                    }
                    Access::Struct(def) => def,
                };

                let found = self
                    .annotations
                    .symbol(def)
                    .fields()
                    .and_then(|fields| fields.lookup(&field.name));
                match found {
                    None => {
                        self.report(
                            ErrorCode::InvalidStructField,
                            "Invalid struct field name",
                            field.span.clone(),
                        );
                        Access::Bad
                    }
                    Some(id) => {
                        self.annotations.link(field.id, id);
                        match self.annotations.symbol(id).struct_def_id() {
                            Some(inner) => Access::Struct(inner),
                            None => Access::Plain(field.span.clone()),
                        }
                    }
                }
            }
            _ => {
                self.resolve_expr(expr);
                Access::Plain(expr.span.clone())
            }
        }
    }
}
