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

//! MIPS register names, mnemonics and SPIM syscall numbers.
//!
//! The generator only uses a handful of registers: `$t0`/`$t1` as scratch,
//! `$v0` for results and syscall numbers, `$a0` for syscall arguments, and
//! the three frame registers.

use std::fmt;

/// A machine register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    T0,
    T1,
    V0,
    A0,
    Sp,
    Fp,
    Ra,
}

impl Reg {
    /// Assembler spelling of the register.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reg::T0 => "$t0",
            Reg::T1 => "$t1",
            Reg::V0 => "$v0",
            Reg::A0 => "$a0",
            Reg::Sp => "$sp",
            Reg::Fp => "$fp",
            Reg::Ra => "$ra",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction mnemonics.
///
/// Pseudo-instructions (`li`, `la`, `move`, `neg`, the set-on-compare family
/// except `slt`, and `b`) are expanded by the assembler.
#[allow(dead_code)]
pub mod opcodes {
    // Load/Store
    pub const LW: &str = "lw";
    pub const SW: &str = "sw";
    pub const LI: &str = "li";
    pub const LA: &str = "la";
    pub const MOVE: &str = "move";

    // Arithmetic
    pub const ADD: &str = "add";
    pub const ADDI: &str = "addi";
    pub const ADDU: &str = "addu";
    pub const SUB: &str = "sub";
    pub const SUBU: &str = "subu";
    pub const MUL: &str = "mul";
    pub const DIV: &str = "div";
    pub const NEG: &str = "neg";

    // Compare and set
    pub const SEQ: &str = "seq";
    pub const SNE: &str = "sne";
    pub const SLT: &str = "slt";
    pub const SGT: &str = "sgt";
    pub const SLE: &str = "sle";
    pub const SGE: &str = "sge";

    // Control flow
    pub const B: &str = "b";
    pub const BEQ: &str = "beq";
    pub const JAL: &str = "jal";
    pub const JR: &str = "jr";
    pub const SYSCALL: &str = "syscall";
}

/// SPIM syscall numbers, loaded into `$v0`.
pub mod syscalls {
    pub const PRINT_INT: i32 = 1;
    pub const PRINT_STRING: i32 = 4;
    pub const READ_INT: i32 = 5;
    pub const EXIT: i32 = 10;
}

/// Assembler directives.
pub mod directives {
    pub const TEXT: &str = ".text";
    pub const DATA: &str = ".data";
    pub const GLOBL: &str = ".globl";
    pub const ALIGN: &str = ".align";
    pub const SPACE: &str = ".space";
    pub const ASCIIZ: &str = ".asciiz";
}
