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

//! Expression code generation.
//!
//! Every expression leaves exactly one word on the operand stack:
//! - Literals and variable loads push their value
//! - Binary operators pop the right operand into `$t1`, the left into
//!   `$t0`, and push the result
//! - `&&` and `||` skip the right operand when the left decides
//! - Assignment stores the value and leaves it on the stack

use super::emit::EmitHelpers;
use super::functions::FunctionGenerator;
use super::labels::LabelManager;
use super::mips::{directives, opcodes, Reg};
use super::variables::VariableAccess;
use super::CodeGenerator;
use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};

/// The `.asciiz` operand for a string literal's source text.
///
/// `\'` becomes a plain `'`; every other escape is kept as written.
fn asciiz_operand(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\'') => out.push('\''),
            Some(escaped) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }
    out.push('"');
    out
}

/// Mnemonic computing `$t0 = $t0 op $t1` for a non-short-circuit operator.
fn binary_opcode(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => opcodes::ADD,
        BinaryOp::Sub => opcodes::SUB,
        BinaryOp::Mul => opcodes::MUL,
        BinaryOp::Div => opcodes::DIV,
        BinaryOp::Equal => opcodes::SEQ,
        BinaryOp::NotEqual => opcodes::SNE,
        BinaryOp::Less => opcodes::SLT,
        BinaryOp::Greater => opcodes::SGT,
        BinaryOp::LessEqual => opcodes::SLE,
        BinaryOp::GreaterEqual => opcodes::SGE,
        BinaryOp::And | BinaryOp::Or => {
            panic!("short-circuit operator {} has no single opcode", op)
        }
    }
}

/// Extension trait for expression code generation.
pub trait ExpressionGenerator {
    /// Generate code that pushes the value of `expr`.
    fn generate_expr(&mut self, expr: &Expr);

    /// Push an immediate value.
    fn generate_immediate(&mut self, value: i32);

    /// Push the address of a string literal placed in the data region.
    fn generate_string_literal(&mut self, text: &str);

    /// Push the word stored at a location expression.
    fn generate_load(&mut self, expr: &Expr);

    /// Store `value` to `target`, leaving the value on the stack.
    fn generate_assignment(&mut self, target: &Expr, value: &Expr);

    /// Generate a unary operation.
    fn generate_unary(&mut self, op: UnaryOp, operand: &Expr);

    /// Generate a strict binary operation.
    fn generate_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr);

    /// Generate `&&` or `||`.
    fn generate_short_circuit(&mut self, left: &Expr, op: BinaryOp, right: &Expr);
}

impl<'a> ExpressionGenerator for CodeGenerator<'a> {
    fn generate_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLiteral(value) => self.generate_immediate(*value),
            ExprKind::BoolLiteral(value) => self.generate_immediate(i32::from(*value)),
            ExprKind::StringLiteral(text) => self.generate_string_literal(text),
            ExprKind::Id(_) | ExprKind::Dot { .. } => self.generate_load(expr),
            ExprKind::Assign { target, value } => self.generate_assignment(target, value),
            ExprKind::Call { callee, args } => self.generate_call(callee, args),
            ExprKind::Unary { op, operand } => self.generate_unary(*op, operand),
            ExprKind::Binary { left, op, right } if op.is_logical() => {
                self.generate_short_circuit(left, *op, right)
            }
            ExprKind::Binary { left, op, right } => self.generate_binary(left, *op, right),
        }
    }

    fn generate_immediate(&mut self, value: i32) {
        self.emit(opcodes::LI, &[Reg::T0.as_str(), &value.to_string()]);
        self.push_reg(Reg::T0);
    }

    fn generate_string_literal(&mut self, text: &str) {
        let label = self.make_label("str");
        self.enter_data();
        self.emit_data(&label, directives::ASCIIZ, &asciiz_operand(text));
        self.enter_text();
        self.emit(opcodes::LA, &[Reg::T0.as_str(), &label]);
        self.push_reg(Reg::T0);
    }

    fn generate_load(&mut self, expr: &Expr) {
        let location = self.location_of(expr);
        self.load(Reg::T0, &location);
        self.push_reg(Reg::T0);
    }

    fn generate_assignment(&mut self, target: &Expr, value: &Expr) {
        self.generate_expr(value);
        self.peek(Reg::T0);
        let location = self.location_of(target);
        self.store(Reg::T0, &location);
    }

    fn generate_unary(&mut self, op: UnaryOp, operand: &Expr) {
        self.generate_expr(operand);
        self.pop_reg(Reg::T0);
        match op {
            UnaryOp::Negate => self.emit(opcodes::NEG, &[Reg::T0.as_str(), Reg::T0.as_str()]),
            UnaryOp::Not => self.emit(opcodes::SEQ, &[Reg::T0.as_str(), Reg::T0.as_str(), "0"]),
        }
        self.push_reg(Reg::T0);
    }

    fn generate_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr) {
        self.generate_expr(left);
        self.generate_expr(right);
        self.pop_reg(Reg::T1);
        self.pop_reg(Reg::T0);
        self.emit(
            binary_opcode(op),
            &[Reg::T0.as_str(), Reg::T0.as_str(), Reg::T1.as_str()],
        );
        self.push_reg(Reg::T0);
    }

    fn generate_short_circuit(&mut self, left: &Expr, op: BinaryOp, right: &Expr) {
        let (prefix, decisive) = match op {
            BinaryOp::And => ("and", "0"),
            BinaryOp::Or => ("or", "1"),
            other => panic!("operator {} does not short-circuit", other),
        };
        let end = self.make_label(&format!("{}_end", prefix));

        self.generate_expr(left);
        self.peek(Reg::T0);
        self.emit(opcodes::BEQ, &[Reg::T0.as_str(), decisive, &end]);
        self.discard_top();
        self.generate_expr(right);
        self.define_label(&end);
    }
}
