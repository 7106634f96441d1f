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

//! Abstract Syntax Tree (AST) definitions for the C-flat compiler.
//!
//! The tree is immutable once parsed. Every node that a later pass needs to
//! annotate (identifiers, expressions and declarations) carries a [`NodeId`];
//! the passes store their results in side tables keyed by that id.

mod decl;
mod expr;
mod stmt;
mod types;
mod unparse;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;
pub use unparse::{AnnotatedProgram, IdentAnnotator};

use crate::error::Span;

/// Stable identifier of an annotatable node.
///
/// Ids are dense indices handed out by the parser in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator for [`NodeId`]s.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn count(&self) -> u32 {
        self.next
    }
}

/// A complete C-flat program.
#[derive(Debug, Clone)]
pub struct Program {
    /// Global declarations in source order.
    pub decls: Vec<Decl>,
    /// Number of node ids allocated while building this tree.
    pub node_count: u32,
}

impl Program {
    /// Create a program from its declarations.
    pub fn new(decls: Vec<Decl>, node_count: u32) -> Self {
        Self { decls, node_count }
    }

    /// Iterate over the function declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FnDecl> {
        self.decls.iter().filter_map(|decl| match &decl.kind {
            DeclKind::Fn(func) => Some(func),
            _ => None,
        })
    }

    /// Find the main function in the program.
    pub fn main_function(&self) -> Option<&FnDecl> {
        self.functions().find(|func| func.name.name == "main")
    }
}

/// An identifier occurrence.
///
/// Both declaring and using occurrences get an id; the resolver links each
/// of them to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

impl Ident {
    /// Create a new identifier node.
    pub fn new(id: NodeId, name: impl Into<String>, span: Span) -> Self {
        Self {
            id,
            name: name.into(),
            span,
        }
    }
}

/// The declarations and statements of a braced block.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

impl Body {
    /// Create a new body.
    pub fn new(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Self {
        Self { decls, stmts }
    }

    /// Check if this body is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.stmts.is_empty()
    }
}
