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

//! Operator checking for the type checker.
//!
//! This module provides type checking for binary and unary operators:
//! - Arithmetic operators (+, -, *, /, unary -)
//! - Logical operators (&&, ||, !)
//! - Relational operators (<, >, <=, >=)
//! - Equality operators (==, !=)
//!
//! The checks work on already computed operand types, so they can be
//! exercised without building a tree.

use super::type_check::TypeChecker;
use super::types::Type;
use crate::ast::{BinaryOp, UnaryOp};
use crate::error::{ErrorCode, Span};

/// A checked operand: its type and where to report problems with it.
#[derive(Debug, Clone)]
pub struct Operand {
    pub ty: Type,
    pub span: Span,
}

impl Operand {
    pub fn new(ty: Type, span: Span) -> Self {
        Self { ty, span }
    }
}

/// Extension trait for operator type checking.
pub trait OperatorChecker {
    /// Check a binary operation and return its result type.
    fn check_binary_op(&mut self, left: &Operand, op: BinaryOp, right: &Operand, span: Span)
        -> Type;

    /// Check a unary operation and return its result type.
    fn check_unary_op(&mut self, op: UnaryOp, operand: &Operand) -> Type;

    /// Require every operand to satisfy `accepts`, reporting each one that
    /// does not. Returns `result` only if all operands were fine.
    fn check_operands(
        &mut self,
        operands: &[&Operand],
        accepts: fn(&Type) -> bool,
        code: ErrorCode,
        message: &str,
        result: Type,
    ) -> Type;

    /// Check `==` and `!=`.
    fn check_equality(&mut self, left: &Type, right: &Type, span: Span) -> Type;
}

impl<'a> OperatorChecker for TypeChecker<'a> {
    fn check_binary_op(
        &mut self,
        left: &Operand,
        op: BinaryOp,
        right: &Operand,
        span: Span,
    ) -> Type {
        if op.is_arithmetic() {
            self.check_operands(
                &[left, right],
                Type::is_int,
                ErrorCode::ArithmeticOperand,
                "Arithmetic operator applied to non-numeric operand",
                Type::Int,
            )
        } else if op.is_logical() {
            self.check_operands(
                &[left, right],
                Type::is_bool,
                ErrorCode::LogicalOperand,
                "Logical operator applied to non-bool operand",
                Type::Bool,
            )
        } else if op.is_relational() {
            self.check_operands(
                &[left, right],
                Type::is_int,
                ErrorCode::RelationalOperand,
                "Relational operator applied to non-numeric operand",
                Type::Bool,
            )
        } else {
            self.check_equality(&left.ty, &right.ty, span)
        }
    }

    fn check_unary_op(&mut self, op: UnaryOp, operand: &Operand) -> Type {
        match op {
            UnaryOp::Negate => self.check_operands(
                &[operand],
                Type::is_int,
                ErrorCode::ArithmeticOperand,
                "Arithmetic operator applied to non-numeric operand",
                Type::Int,
            ),
            UnaryOp::Not => self.check_operands(
                &[operand],
                Type::is_bool,
                ErrorCode::LogicalOperand,
                "Logical operator applied to non-bool operand",
                Type::Bool,
            ),
        }
    }

    fn check_operands(
        &mut self,
        operands: &[&Operand],
        accepts: fn(&Type) -> bool,
        code: ErrorCode,
        message: &str,
        result: Type,
    ) -> Type {
        let mut ok = true;
        for operand in operands {
            if operand.ty.is_error() {
                ok = false;
            } else if !accepts(&operand.ty) {
                self.report(code, message, operand.span.clone());
                ok = false;
            }
        }
        if ok {
            result
        } else {
            Type::Error
        }
    }

    fn check_equality(&mut self, left: &Type, right: &Type, span: Span) -> Type {
        if left.is_error() || right.is_error() {
            return Type::Error;
        }

        let forbidden = if left.is_void() && right.is_void() {
            Some("Equality operator applied to void functions")
        } else if left.is_fn() && right.is_fn() {
            Some("Equality operator applied to functions")
        } else if left.is_struct_def() && right.is_struct_def() {
            Some("Equality operator applied to struct names")
        } else if left.is_struct_type() && right.is_struct_type() {
            Some("Equality operator applied to struct variables")
        } else {
            None
        };

        if let Some(message) = forbidden {
            self.report(ErrorCode::EqualityOperand, message, span);
            return Type::Error;
        }

        if !left.compatible(right) {
            self.report(ErrorCode::TypeMismatch, "Type mismatch", span);
            return Type::Error;
        }

        Type::Bool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::annotations::Annotations;
    use crate::context::CompilationContext;

    fn operand(ty: Type) -> Operand {
        Operand::new(ty, Span::new(0, 1))
    }

    fn with_checker<R>(f: impl FnOnce(&mut TypeChecker<'_>) -> R) -> (R, Vec<String>) {
        let mut annotations = Annotations::new();
        let mut ctx = CompilationContext::new("x");
        let result = f(&mut TypeChecker::new(&mut annotations, &mut ctx));
        let messages = ctx.diagnostics().iter().map(|d| d.message.clone()).collect();
        (result, messages)
    }

    #[test]
    fn test_arithmetic_result() {
        let (ty, messages) = with_checker(|c| {
            c.check_binary_op(&operand(Type::Int), BinaryOp::Mul, &operand(Type::Int), Span::new(0, 1))
        });
        assert_eq!(ty, Type::Int);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_relational_yields_bool() {
        let (ty, _) = with_checker(|c| {
            c.check_binary_op(&operand(Type::Int), BinaryOp::LessEqual, &operand(Type::Int), Span::new(0, 1))
        });
        assert_eq!(ty, Type::Bool);
    }

    #[test]
    fn test_string_is_not_numeric() {
        let (ty, messages) = with_checker(|c| {
            c.check_binary_op(&operand(Type::String), BinaryOp::Add, &operand(Type::Int), Span::new(0, 1))
        });
        assert_eq!(ty, Type::Error);
        assert_eq!(messages, vec!["Arithmetic operator applied to non-numeric operand"]);
    }

    #[test]
    fn test_error_operands_are_silent() {
        let (ty, messages) = with_checker(|c| {
            c.check_binary_op(&operand(Type::Error), BinaryOp::Or, &operand(Type::Error), Span::new(0, 1))
        });
        assert_eq!(ty, Type::Error);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_unary_operators() {
        let (ty, messages) = with_checker(|c| c.check_unary_op(UnaryOp::Not, &operand(Type::Int)));
        assert_eq!(ty, Type::Error);
        assert_eq!(messages, vec!["Logical operator applied to non-bool operand"]);

        let (ty, _) = with_checker(|c| c.check_unary_op(UnaryOp::Negate, &operand(Type::Int)));
        assert_eq!(ty, Type::Int);
    }

    #[test]
    fn test_equality_of_struct_names() {
        let (ty, messages) = with_checker(|c| {
            c.check_equality(
                &Type::StructDef("P".into()),
                &Type::StructDef("P".into()),
                Span::new(0, 1),
            )
        });
        assert_eq!(ty, Type::Error);
        assert_eq!(messages, vec!["Equality operator applied to struct names"]);
    }

    #[test]
    fn test_equality_of_strings() {
        let (ty, messages) =
            with_checker(|c| c.check_equality(&Type::String, &Type::String, Span::new(0, 1)));
        assert_eq!(ty, Type::Bool);
        assert!(messages.is_empty());
    }
}
