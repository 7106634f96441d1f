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

//! Statement type checking.

use super::expressions::ExpressionChecker;
use super::operators::OperatorChecker;
use super::type_check::TypeChecker;
use super::types::Type;
use crate::ast::{Body, Expr, Stmt, StmtKind};
use crate::error::ErrorCode;

/// Extension trait for statement type checking.
pub trait StatementChecker {
    /// Check every statement of a body.
    fn check_body(&mut self, body: &Body);

    /// Check a statement.
    fn check_stmt(&mut self, stmt: &Stmt);

    /// Require an `if`/`while` condition to be `bool`.
    fn check_condition(&mut self, cond: &Expr);

    /// Check `cin >> loc`.
    fn check_read(&mut self, target: &Expr);

    /// Check `cout << exp`.
    fn check_write(&mut self, value: &Expr);

    /// Check `return [exp]` against the enclosing function.
    fn check_return(&mut self, value: Option<&Expr>);
}

impl<'a> StatementChecker for TypeChecker<'a> {
    fn check_body(&mut self, body: &Body) {
        for stmt in &body.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign(expr) | StmtKind::Call(expr) => {
                self.check_expr(expr);
            }
            StmtKind::PostInc(target) | StmtKind::PostDec(target) => {
                let operand = self.check_operand(target);
                self.check_operands(
                    &[&operand],
                    Type::is_int,
                    ErrorCode::ArithmeticOperand,
                    "Arithmetic operator applied to non-numeric operand",
                    Type::Int,
                );
            }
            StmtKind::Read(target) => self.check_read(target),
            StmtKind::Write(value) => self.check_write(value),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                self.check_condition(cond);
                self.check_body(then_body);
                if let Some(else_body) = else_body {
                    self.check_body(else_body);
                }
            }
            StmtKind::While { cond, body } => {
                self.check_condition(cond);
                self.check_body(body);
            }
            StmtKind::Return(value) => self.check_return(value.as_ref()),
        }
    }

    fn check_condition(&mut self, cond: &Expr) {
        let ty = self.check_expr(cond);
        if !ty.is_error() && !ty.is_bool() {
            self.report(
                ErrorCode::NonBoolCondition,
                "Non-bool expression used as a condition",
                cond.report_span(),
            );
        }
    }

    fn check_read(&mut self, target: &Expr) {
        let ty = self.check_expr(target);
        let message = match ty {
            Type::Fn { .. } => "Attempt to read a function",
            Type::StructDef(_) => "Attempt to read a struct name",
            Type::StructType(_) => "Attempt to read a struct variable",
            _ => return,
        };
        self.report(ErrorCode::IllegalRead, message, target.report_span());
    }

    fn check_write(&mut self, value: &Expr) {
        let ty = self.check_expr(value);
        let message = match ty {
            Type::Fn { .. } => "Attempt to write a function",
            Type::StructDef(_) => "Attempt to write a struct name",
            Type::StructType(_) => "Attempt to write a struct variable",
            Type::Void => "Attempt to write void",
            _ => return,
        };
        self.report(ErrorCode::IllegalWrite, message, value.report_span());
    }

    fn check_return(&mut self, value: Option<&Expr>) {
        let expected = self.return_type.clone();

        let Some(value) = value else {
            if !expected.is_void() {
                self.report_program(ErrorCode::MissingReturnValue, "Missing return value");
            }
            return;
        };

        let ty = self.check_expr(value);
        if expected.is_void() {
            self.report(
                ErrorCode::ReturnValueInVoidFunction,
                "Return with a value in a void function",
                value.report_span(),
            );
        } else if !ty.is_error() && !ty.compatible(&expected) {
            self.report(
                ErrorCode::BadReturnValue,
                "Bad return value",
                value.report_span(),
            );
        }
    }
}
