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

//! Expression type checking.
//!
//! This module computes expression types:
//! - Literals and identifier uses
//! - Field access
//! - Assignment
//! - Function calls
//! - Operator dispatch to [`OperatorChecker`]

use super::operators::{Operand, OperatorChecker};
use super::type_check::TypeChecker;
use super::types::Type;
use crate::ast::{Expr, ExprKind, Ident};
use crate::error::ErrorCode;

/// Extension trait for expression type checking.
pub trait ExpressionChecker {
    /// Compute and record the type of an expression.
    fn check_expr(&mut self, expr: &Expr) -> Type;

    /// Compute the type of an expression without recording it.
    fn infer_expr(&mut self, expr: &Expr) -> Type;

    /// Check an expression and pair it with its report position.
    fn check_operand(&mut self, expr: &Expr) -> Operand;

    /// The declared type of a resolved identifier.
    fn ident_type(&self, ident: &Ident) -> Type;

    /// Check `target = value`.
    fn check_assignment(&mut self, target: &Expr, value: &Expr) -> Type;

    /// Check a call against the callee's signature.
    fn check_call(&mut self, callee: &Ident, args: &[Expr]) -> Type;
}

impl<'a> ExpressionChecker for TypeChecker<'a> {
    fn check_expr(&mut self, expr: &Expr) -> Type {
        let ty = self.infer_expr(expr);
        self.annotations.set_type(expr.id, ty.clone());
        ty
    }

    fn infer_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::IntLiteral(_) => Type::Int,
            ExprKind::StringLiteral(_) => Type::String,
            ExprKind::BoolLiteral(_) => Type::Bool,
            ExprKind::Id(ident) => self.ident_type(ident),
            ExprKind::Dot { base, field } => {
                self.check_expr(base);
                self.ident_type(field)
            }
            ExprKind::Assign { target, value } => self.check_assignment(target, value),
            ExprKind::Call { callee, args } => self.check_call(callee, args),
            ExprKind::Unary { op, operand } => {
                let operand = self.check_operand(operand);
                self.check_unary_op(*op, &operand)
            }
            ExprKind::Binary { left, op, right } => {
                let left = self.check_operand(left);
                let right = self.check_operand(right);
                self.check_binary_op(&left, *op, &right, expr.report_span())
            }
        }
    }

    fn check_operand(&mut self, expr: &Expr) -> Operand {
        let ty = self.check_expr(expr);
        Operand::new(ty, expr.report_span())
    }

    fn ident_type(&self, ident: &Ident) -> Type {
        self.annotations
            .symbol_of(ident.id)
            .map(|symbol| symbol.ty.clone())
            .unwrap_or_else(|| panic!("identifier '{}' was never resolved", ident.name))
    }

    fn check_assignment(&mut self, target: &Expr, value: &Expr) -> Type {
        let target_ty = self.check_expr(target);
        let value_ty = self.check_expr(value);

        if target_ty.is_error() || value_ty.is_error() {
            return Type::Error;
        }

        let forbidden = if target_ty.is_fn() && value_ty.is_fn() {
            Some("Function assignment")
        } else if target_ty.is_struct_def() && value_ty.is_struct_def() {
            Some("Struct name assignment")
        } else if target_ty.is_struct_type() && value_ty.is_struct_type() {
            Some("Struct variable assignment")
        } else {
            None
        };

        if let Some(message) = forbidden {
            self.report(ErrorCode::InvalidAssignment, message, target.report_span());
            return Type::Error;
        }

        if !target_ty.compatible(&value_ty) {
            self.report(ErrorCode::TypeMismatch, "Type mismatch", target.report_span());
            return Type::Error;
        }

        target_ty
    }

    fn check_call(&mut self, callee: &Ident, args: &[Expr]) -> Type {
        let actuals: Vec<Operand> = args.iter().map(|arg| self.check_operand(arg)).collect();

        let (params, ret) = match self.ident_type(callee) {
            Type::Fn { params, ret } => (params, *ret),
            _ => {
                self.report(
                    ErrorCode::NotAFunction,
                    "Attempt to call a non-function",
                    callee.span.clone(),
                );
                return Type::Error;
            }
        };

        if params.len() != actuals.len() {
            self.report(
                ErrorCode::WrongNumberOfArguments,
                "Function call with wrong number of args",
                callee.span.clone(),
            );
            return ret;
        }

        for (actual, formal) in actuals.iter().zip(&params) {
            if !actual.ty.is_error() && !actual.ty.compatible(formal) {
                self.report(
                    ErrorCode::ArgumentTypeMismatch,
                    "Type of actual does not match type of formal",
                    actual.span.clone(),
                );
            }
        }

        ret
    }
}
