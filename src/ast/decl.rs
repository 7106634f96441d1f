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

//! Declaration AST nodes for the C-flat compiler.

use super::{Body, Ident, TypeSpec};
use crate::error::Span;

/// A program-level declaration.
#[derive(Debug, Clone)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

impl Decl {
    /// Create a new declaration.
    pub fn new(kind: DeclKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The declared name.
    pub fn name(&self) -> &Ident {
        match &self.kind {
            DeclKind::Var(decl) => &decl.name,
            DeclKind::Fn(decl) => &decl.name,
            DeclKind::Struct(decl) => &decl.name,
        }
    }
}

/// The kind of declaration.
#[derive(Debug, Clone)]
pub enum DeclKind {
    /// A global variable.
    Var(VarDecl),
    /// A function definition.
    Fn(FnDecl),
    /// A struct definition.
    Struct(StructDecl),
}

/// A variable, formal parameter or struct field declaration.
///
/// Annotations for a declaration are keyed by its name's [`NodeId`](super::NodeId).
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: TypeSpec,
    pub name: Ident,
    pub span: Span,
}

/// A function definition.
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub return_type: TypeSpec,
    pub name: Ident,
    pub formals: Vec<VarDecl>,
    pub body: Body,
    pub span: Span,
}

impl FnDecl {
    /// Check if this is the program entry point.
    pub fn is_main(&self) -> bool {
        self.name.name == "main"
    }
}

/// A struct definition.
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: Ident,
    /// Fields in declaration order.
    pub fields: Vec<VarDecl>,
    pub span: Span,
}
