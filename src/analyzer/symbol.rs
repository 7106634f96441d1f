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

//! Symbol definitions for the semantic analyzer.
//!
//! Symbols live in an arena owned by [`Annotations`](super::Annotations)
//! and are referenced by [`SymbolId`]. Layout fills in `size`, `offset`
//! and `struct_offset` after resolution.

use super::scope::Scope;
use super::types::{Type, WORD_SIZE};
use crate::error::Span;

/// Index of a symbol in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// The arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Symbol table entry.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The declared name.
    pub name: String,
    /// The symbol type.
    pub ty: Type,
    /// The kind of entity this symbol names.
    pub kind: SymbolKind,
    /// Bytes occupied, a multiple of the word size.
    pub size: u32,
    /// Frame pointer relative offset. Unused for globals.
    pub offset: i32,
    /// Offset within the enclosing struct. Only used for fields.
    pub struct_offset: i32,
    /// Declared at program level.
    pub is_global: bool,
    /// The span where this symbol was declared.
    pub span: Span,
}

/// What a symbol names.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A scalar variable, formal or field.
    Var,
    /// A function.
    Fn(FnInfo),
    /// A struct definition and its field table.
    StructDef { fields: Scope },
    /// A variable of struct type.
    StructVar { def: SymbolId },
}

/// Function-specific symbol data.
#[derive(Debug, Clone)]
pub struct FnInfo {
    pub params: Vec<Type>,
    pub ret: Type,
    /// Bytes taken by the formals.
    pub formal_space: u32,
    /// Bytes taken by all locals of the body.
    pub local_space: u32,
}

impl Symbol {
    fn with_kind(name: impl Into<String>, ty: Type, kind: SymbolKind, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            kind,
            size: WORD_SIZE,
            offset: 0,
            struct_offset: 0,
            is_global: false,
            span,
        }
    }

    /// Create a scalar variable symbol.
    pub fn variable(name: impl Into<String>, ty: Type, span: Span) -> Self {
        Self::with_kind(name, ty, SymbolKind::Var, span)
    }

    /// Create a function symbol. Formals are filled in afterwards.
    pub fn function(name: impl Into<String>, ret: Type, span: Span) -> Self {
        let info = FnInfo {
            params: Vec::new(),
            ret: ret.clone(),
            formal_space: 0,
            local_space: 0,
        };
        Self::with_kind(
            name,
            Type::function(Vec::new(), ret),
            SymbolKind::Fn(info),
            span,
        )
    }

    /// Create a struct definition symbol around its field table.
    pub fn struct_def(name: impl Into<String>, fields: Scope, span: Span) -> Self {
        let name = name.into();
        let ty = Type::StructDef(name.clone());
        let mut symbol = Self::with_kind(name, ty, SymbolKind::StructDef { fields }, span);
        symbol.size = 0;
        symbol
    }

    /// Create a struct instance symbol. Its size is set by layout.
    pub fn struct_var(name: impl Into<String>, struct_name: &str, def: SymbolId, span: Span) -> Self {
        let mut symbol = Self::with_kind(
            name,
            Type::StructType(struct_name.to_string()),
            SymbolKind::StructVar { def },
            span,
        );
        symbol.size = 0;
        symbol
    }

    /// Record the formal parameter types of a function symbol.
    pub fn set_params(&mut self, params: Vec<Type>) {
        if let SymbolKind::Fn(info) = &mut self.kind {
            info.params = params.clone();
            self.ty = Type::function(params, info.ret.clone());
        }
    }

    /// Function data, if this names a function.
    pub fn fn_info(&self) -> Option<&FnInfo> {
        match &self.kind {
            SymbolKind::Fn(info) => Some(info),
            _ => None,
        }
    }

    /// Mutable function data, if this names a function.
    pub fn fn_info_mut(&mut self) -> Option<&mut FnInfo> {
        match &mut self.kind {
            SymbolKind::Fn(info) => Some(info),
            _ => None,
        }
    }

    /// The field table, if this is a struct definition.
    pub fn fields(&self) -> Option<&Scope> {
        match &self.kind {
            SymbolKind::StructDef { fields } => Some(fields),
            _ => None,
        }
    }

    /// The struct definition, if this is a struct instance.
    pub fn struct_def_id(&self) -> Option<SymbolId> {
        match self.kind {
            SymbolKind::StructVar { def } => Some(def),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Fn(_))
    }

    pub fn is_struct_def(&self) -> bool {
        matches!(self.kind, SymbolKind::StructDef { .. })
    }

    pub fn is_struct_var(&self) -> bool {
        matches!(self.kind, SymbolKind::StructVar { .. })
    }
}
