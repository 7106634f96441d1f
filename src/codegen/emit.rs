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

//! Emit helper methods for code generation.
//!
//! This module provides the line-level emission utilities:
//! - Instructions, with optional comments
//! - Labels, directives and data declarations
//! - Operand stack push, pop and peek

use super::mips::{directives, opcodes, Reg};
use super::{AsmLine, CodeGenerator};
use crate::analyzer::types::WORD_SIZE;

/// Render a base-plus-offset operand such as `-8($fp)`.
pub fn indexed(offset: i32, base: Reg) -> String {
    format!("{}({})", offset, base)
}

/// Extension trait for low-level code emission.
///
/// Implemented for `CodeGenerator`; separates line bookkeeping and the
/// operand stack discipline from the tree walk.
pub trait EmitHelpers {
    /// Emit an instruction.
    fn emit(&mut self, op: &'static str, operands: &[&str]);

    /// Emit an instruction followed by a comment.
    fn emit_with_comment(&mut self, op: &'static str, operands: &[&str], comment: &str);

    /// Emit a label definition line.
    fn emit_label(&mut self, name: &str);

    /// Emit a directive with its arguments.
    fn emit_directive(&mut self, name: &'static str, args: &str);

    /// Emit a labelled data declaration.
    fn emit_data(&mut self, label: &str, directive: &'static str, value: &str);

    /// Emit a comment line, if comments are enabled.
    fn emit_comment(&mut self, text: &str);

    /// Push a register onto the operand stack.
    fn push_reg(&mut self, reg: Reg);

    /// Pop the top of the operand stack into a register.
    fn pop_reg(&mut self, reg: Reg);

    /// Copy the top of the operand stack into a register, leaving it there.
    fn peek(&mut self, reg: Reg);

    /// Drop the top of the operand stack.
    fn discard_top(&mut self);
}

impl<'a> EmitHelpers for CodeGenerator<'a> {
    fn emit(&mut self, op: &'static str, operands: &[&str]) {
        self.lines.push(AsmLine::Instr {
            op,
            operands: operands.iter().map(|s| s.to_string()).collect(),
            comment: None,
        });
    }

    fn emit_with_comment(&mut self, op: &'static str, operands: &[&str], comment: &str) {
        let comment = self.options.comments.then(|| comment.to_string());
        self.lines.push(AsmLine::Instr {
            op,
            operands: operands.iter().map(|s| s.to_string()).collect(),
            comment,
        });
    }

    fn emit_label(&mut self, name: &str) {
        self.lines.push(AsmLine::Label(name.to_string()));
    }

    fn emit_directive(&mut self, name: &'static str, args: &str) {
        self.lines.push(AsmLine::Directive {
            name,
            args: args.to_string(),
        });
    }

    fn emit_data(&mut self, label: &str, directive: &'static str, value: &str) {
        self.lines.push(AsmLine::Data {
            label: label.to_string(),
            directive,
            value: value.to_string(),
        });
    }

    fn emit_comment(&mut self, text: &str) {
        if self.options.comments {
            self.lines.push(AsmLine::Comment(text.to_string()));
        }
    }

    fn push_reg(&mut self, reg: Reg) {
        self.emit_with_comment(
            opcodes::SW,
            &[reg.as_str(), &indexed(0, Reg::Sp)],
            &format!("PUSH {}", reg),
        );
        self.emit(
            opcodes::SUBU,
            &[Reg::Sp.as_str(), Reg::Sp.as_str(), &WORD_SIZE.to_string()],
        );
    }

    fn pop_reg(&mut self, reg: Reg) {
        self.emit_with_comment(
            opcodes::LW,
            &[reg.as_str(), &indexed(WORD_SIZE as i32, Reg::Sp)],
            &format!("POP {}", reg),
        );
        self.emit(
            opcodes::ADDU,
            &[Reg::Sp.as_str(), Reg::Sp.as_str(), &WORD_SIZE.to_string()],
        );
    }

    fn peek(&mut self, reg: Reg) {
        self.emit_with_comment(
            opcodes::LW,
            &[reg.as_str(), &indexed(WORD_SIZE as i32, Reg::Sp)],
            "peek",
        );
    }

    fn discard_top(&mut self) {
        self.emit_with_comment(
            opcodes::ADDU,
            &[Reg::Sp.as_str(), Reg::Sp.as_str(), &WORD_SIZE.to_string()],
            "discard",
        );
    }
}

impl<'a> CodeGenerator<'a> {
    /// Switch to the data region.
    pub(super) fn enter_data(&mut self) {
        self.emit_directive(directives::DATA, "");
    }

    /// Switch to the text region.
    pub(super) fn enter_text(&mut self) {
        self.emit_directive(directives::TEXT, "");
    }
}
