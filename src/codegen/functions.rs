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

//! Function code generation.
//!
//! This module handles:
//! - Function entry labels (`main` is exported as the simulator entry)
//! - Prologue and epilogue around the frame computed by layout
//! - Calls

use super::control_flow::StatementGenerator;
use super::emit::{indexed, EmitHelpers};
use super::expressions::ExpressionGenerator;
use super::labels::{exit_label, function_label, LabelManager};
use super::mips::{directives, opcodes, syscalls, Reg};
use super::CodeGenerator;
use crate::analyzer::types::WORD_SIZE;
use crate::analyzer::FnInfo;
use crate::ast::{Expr, FnDecl, Ident};

/// Extension trait for function code generation.
pub trait FunctionGenerator {
    /// Generate a whole function: entry, prologue, body and epilogue.
    fn generate_function(&mut self, func: &FnDecl);

    /// Save `$ra` and `$fp`, set up `$fp` and reserve local space.
    fn emit_prologue(&mut self, info: &FnInfo);

    /// Restore the caller's frame and leave the function.
    fn emit_epilogue(&mut self, info: &FnInfo, is_main: bool);

    /// Push the arguments, call and push the result.
    fn generate_call(&mut self, callee: &Ident, args: &[Expr]);
}

impl<'a> CodeGenerator<'a> {
    fn fn_info(&self, name: &Ident) -> FnInfo {
        self.annotations
            .symbol_of(name.id)
            .and_then(|symbol| symbol.fn_info())
            .cloned()
            .unwrap_or_else(|| panic!("'{}' is not a resolved function", name.name))
    }
}

impl<'a> FunctionGenerator for CodeGenerator<'a> {
    fn generate_function(&mut self, func: &FnDecl) {
        let info = self.fn_info(&func.name);
        let is_main = func.is_main();

        self.enter_text();
        if is_main {
            self.emit_directive(directives::GLOBL, "main");
        }
        self.define_label(&function_label(&func.name.name));
        self.emit_comment("FUNCTION ENTRY");
        self.emit_prologue(&info);

        self.exit_label = exit_label(&func.name.name);
        self.generate_body(&func.body);

        self.emit_comment("FUNCTION EXIT");
        let exit = std::mem::take(&mut self.exit_label);
        self.define_label(&exit);
        self.emit_epilogue(&info, is_main);
    }

    fn emit_prologue(&mut self, info: &FnInfo) {
        self.push_reg(Reg::Ra);
        self.push_reg(Reg::Fp);
        let frame = 2 * WORD_SIZE + info.formal_space;
        self.emit_with_comment(
            opcodes::ADDU,
            &[Reg::Fp.as_str(), Reg::Sp.as_str(), &frame.to_string()],
            "set FP",
        );
        if info.local_space > 0 {
            self.emit_with_comment(
                opcodes::SUBU,
                &[Reg::Sp.as_str(), Reg::Sp.as_str(), &info.local_space.to_string()],
                "reserve locals",
            );
        }
    }

    fn emit_epilogue(&mut self, info: &FnInfo, is_main: bool) {
        let ra_offset = -(info.formal_space as i32);
        let fp_offset = ra_offset - WORD_SIZE as i32;

        self.emit_with_comment(
            opcodes::LW,
            &[Reg::Ra.as_str(), &indexed(ra_offset, Reg::Fp)],
            "get RA",
        );
        self.emit_with_comment(
            opcodes::MOVE,
            &[Reg::T0.as_str(), Reg::Fp.as_str()],
            "save control link",
        );
        self.emit_with_comment(
            opcodes::LW,
            &[Reg::Fp.as_str(), &indexed(fp_offset, Reg::Fp)],
            "restore FP",
        );
        self.emit_with_comment(
            opcodes::MOVE,
            &[Reg::Sp.as_str(), Reg::T0.as_str()],
            "restore SP",
        );

        if is_main {
            self.emit_with_comment(
                opcodes::LI,
                &[Reg::V0.as_str(), &syscalls::EXIT.to_string()],
                "load exit code for syscall",
            );
            self.emit(opcodes::SYSCALL, &[]);
        } else {
            self.emit_with_comment(opcodes::JR, &[Reg::Ra.as_str()], "return");
        }
    }

    fn generate_call(&mut self, callee: &Ident, args: &[Expr]) {
        for arg in args {
            self.generate_expr(arg);
        }
        self.emit(opcodes::JAL, &[function_label(&callee.name).as_str()]);
        self.push_reg(Reg::V0);
    }
}
