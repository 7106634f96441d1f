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

//! Variable addressing for code generation.
//!
//! Globals live in the data region under `_<name>`, formals and locals at
//! their frame offset from `$fp`. A field access `a.b.c` is unrolled into a
//! single address by adding up the field offsets along the chain:
//! downwards from a frame slot, upwards from a global label.

use super::emit::{indexed, EmitHelpers};
use super::labels::global_label;
use super::mips::{directives, opcodes, Reg};
use super::CodeGenerator;
use crate::analyzer::Symbol;
use crate::ast::{Expr, ExprKind, VarDecl};
use std::fmt;

/// A resolved storage address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Byte `offset` past a global label.
    Global { label: String, offset: u32 },
    /// Signed offset from `$fp`.
    Frame(i32),
}

impl Location {
    /// Move the address to a field at `struct_offset` within it.
    pub fn field(self, struct_offset: i32) -> Self {
        match self {
            Location::Global { label, offset } => Location::Global {
                label,
                offset: offset + struct_offset.unsigned_abs(),
            },
            Location::Frame(offset) => Location::Frame(offset + struct_offset),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Global { label, offset: 0 } => write!(f, "{}", label),
            Location::Global { label, offset } => write!(f, "{}+{}", label, offset),
            Location::Frame(offset) => write!(f, "{}", indexed(*offset, Reg::Fp)),
        }
    }
}

/// Extension trait for variable storage and access.
pub trait VariableAccess {
    /// The symbol an identifier expression was resolved to.
    fn symbol_for(&self, expr: &Expr) -> &Symbol;

    /// The address denoted by a location expression.
    fn location_of(&self, expr: &Expr) -> Location;

    /// Load a word from `location` into `reg`.
    fn load(&mut self, reg: Reg, location: &Location);

    /// Store `reg` to `location`.
    fn store(&mut self, reg: Reg, location: &Location);

    /// Reserve data-region storage for a global variable.
    fn emit_global(&mut self, decl: &VarDecl);
}

impl<'a> VariableAccess for CodeGenerator<'a> {
    fn symbol_for(&self, expr: &Expr) -> &Symbol {
        let ident = match &expr.kind {
            ExprKind::Id(ident) => ident,
            ExprKind::Dot { field, .. } => field,
            other => panic!("expression {:?} does not name a symbol", other),
        };
        self.annotations
            .symbol_of(ident.id)
            .unwrap_or_else(|| panic!("identifier '{}' was never resolved", ident.name))
    }

    fn location_of(&self, expr: &Expr) -> Location {
        match &expr.kind {
            ExprKind::Id(ident) => {
                let symbol = self.symbol_for(expr);
                if symbol.is_global {
                    Location::Global {
                        label: global_label(&ident.name),
                        offset: 0,
                    }
                } else {
                    Location::Frame(symbol.offset)
                }
            }
            ExprKind::Dot { base, .. } => {
                let field = self.symbol_for(expr).struct_offset;
                self.location_of(base).field(field)
            }
            other => panic!("expression {:?} is not a location", other),
        }
    }

    fn load(&mut self, reg: Reg, location: &Location) {
        self.emit(opcodes::LW, &[reg.as_str(), &location.to_string()]);
    }

    fn store(&mut self, reg: Reg, location: &Location) {
        self.emit(opcodes::SW, &[reg.as_str(), &location.to_string()]);
    }

    fn emit_global(&mut self, decl: &VarDecl) {
        let size = self
            .annotations
            .symbol_of(decl.name.id)
            .map(|symbol| symbol.size)
            .unwrap_or_else(|| panic!("global '{}' was never resolved", decl.name.name));

        self.enter_data();
        self.emit_directive(directives::ALIGN, "2");
        self.emit_data(
            &global_label(&decl.name.name),
            directives::SPACE,
            &size.to_string(),
        );
    }
}
