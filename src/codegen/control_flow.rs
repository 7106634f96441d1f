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

//! Statement code generation.
//!
//! This module handles:
//! - Assignment and call statements (the leftover word is dropped)
//! - Post-increment and post-decrement
//! - `cin >>` and `cout <<` through SPIM syscalls
//! - If, if-else and while
//! - Return

use super::emit::EmitHelpers;
use super::expressions::ExpressionGenerator;
use super::labels::LabelManager;
use super::mips::{opcodes, syscalls, Reg};
use super::variables::VariableAccess;
use super::CodeGenerator;
use crate::analyzer::Type;
use crate::ast::{Body, Expr, Stmt, StmtKind};

/// Extension trait for statement code generation.
pub trait StatementGenerator {
    /// Generate every statement of a body.
    fn generate_body(&mut self, body: &Body);

    /// Generate a statement. The operand stack is balanced afterwards.
    fn generate_stmt(&mut self, stmt: &Stmt);

    /// Add `delta` to the word at a location.
    fn generate_step(&mut self, target: &Expr, delta: i32);

    /// Read an integer into a location.
    fn generate_read(&mut self, target: &Expr);

    /// Print a value with the syscall matching its type.
    fn generate_write(&mut self, value: &Expr);

    /// Generate `if` with an optional `else`.
    fn generate_if(&mut self, cond: &Expr, then_body: &Body, else_body: Option<&Body>);

    /// Generate `while`.
    fn generate_while(&mut self, cond: &Expr, body: &Body);

    /// Evaluate a condition and jump to `target` when it is false.
    fn generate_branch_if_false(&mut self, cond: &Expr, target: &str);

    /// Set `$v0` and jump to the function's exit.
    fn generate_return(&mut self, value: Option<&Expr>);
}

impl<'a> StatementGenerator for CodeGenerator<'a> {
    fn generate_body(&mut self, body: &Body) {
        for stmt in &body.stmts {
            self.generate_stmt(stmt);
        }
    }

    fn generate_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign(expr) => {
                self.emit_comment("ASSIGN");
                self.generate_expr(expr);
                self.discard_top();
            }
            StmtKind::Call(expr) => {
                self.emit_comment("CALL");
                self.generate_expr(expr);
                self.discard_top();
            }
            StmtKind::PostInc(target) => {
                self.emit_comment("POST-INCREMENT");
                self.generate_step(target, 1);
            }
            StmtKind::PostDec(target) => {
                self.emit_comment("POST-DECREMENT");
                self.generate_step(target, -1);
            }
            StmtKind::Read(target) => self.generate_read(target),
            StmtKind::Write(value) => self.generate_write(value),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => self.generate_if(cond, then_body, else_body.as_ref()),
            StmtKind::While { cond, body } => self.generate_while(cond, body),
            StmtKind::Return(value) => self.generate_return(value.as_ref()),
        }
    }

    fn generate_step(&mut self, target: &Expr, delta: i32) {
        let location = self.location_of(target);
        self.load(Reg::T0, &location);
        self.emit(
            opcodes::ADDI,
            &[Reg::T0.as_str(), Reg::T0.as_str(), &delta.to_string()],
        );
        self.store(Reg::T0, &location);
    }

    fn generate_read(&mut self, target: &Expr) {
        self.emit_comment("READ");
        self.emit(
            opcodes::LI,
            &[Reg::V0.as_str(), &syscalls::READ_INT.to_string()],
        );
        self.emit(opcodes::SYSCALL, &[]);
        let location = self.location_of(target);
        self.store(Reg::V0, &location);
    }

    fn generate_write(&mut self, value: &Expr) {
        self.emit_comment("WRITE");
        let syscall = match self.annotations.type_of(value.id) {
            Some(Type::String) => syscalls::PRINT_STRING,
            Some(_) => syscalls::PRINT_INT,
            None => panic!("expression {} was never typed", value.id),
        };

        self.generate_expr(value);
        self.pop_reg(Reg::A0);
        self.emit(opcodes::LI, &[Reg::V0.as_str(), &syscall.to_string()]);
        self.emit(opcodes::SYSCALL, &[]);
    }

    fn generate_if(&mut self, cond: &Expr, then_body: &Body, else_body: Option<&Body>) {
        self.emit_comment("IF");
        match else_body {
            None => {
                let end = self.make_label("if_end");
                self.generate_branch_if_false(cond, &end);
                self.generate_body(then_body);
                self.define_label(&end);
            }
            Some(else_body) => {
                let else_label = self.make_label("else");
                let end = self.make_label("if_end");
                self.generate_branch_if_false(cond, &else_label);
                self.generate_body(then_body);
                self.emit(opcodes::B, &[end.as_str()]);
                self.define_label(&else_label);
                self.generate_body(else_body);
                self.define_label(&end);
            }
        }
    }

    fn generate_while(&mut self, cond: &Expr, body: &Body) {
        self.emit_comment("WHILE");
        let start = self.make_label("while");
        let end = self.make_label("while_end");

        self.define_label(&start);
        self.generate_branch_if_false(cond, &end);
        self.generate_body(body);
        self.emit(opcodes::B, &[start.as_str()]);
        self.define_label(&end);
    }

    fn generate_branch_if_false(&mut self, cond: &Expr, target: &str) {
        self.generate_expr(cond);
        self.pop_reg(Reg::T0);
        self.emit(opcodes::BEQ, &[Reg::T0.as_str(), "0", target]);
    }

    fn generate_return(&mut self, value: Option<&Expr>) {
        self.emit_comment("RETURN");
        if let Some(value) = value {
            self.generate_expr(value);
            self.pop_reg(Reg::V0);
        }
        let exit = self.exit_label.clone();
        self.emit(opcodes::B, &[exit.as_str()]);
    }
}
