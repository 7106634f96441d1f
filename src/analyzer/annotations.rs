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

//! Side tables written by the analysis passes.
//!
//! The tree is never mutated. The resolver links identifier nodes to
//! symbols, the type checker records expression types and layout writes
//! sizes and offsets onto the arena symbols.

use std::collections::HashMap;

use super::symbol::{Symbol, SymbolId};
use super::types::Type;
use crate::ast::{Ident, IdentAnnotator, NodeId};

/// The symbol arena plus per-node annotations.
#[derive(Debug, Default)]
pub struct Annotations {
    symbols: Vec<Symbol>,
    links: HashMap<NodeId, SymbolId>,
    types: HashMap<NodeId, Type>,
}

impl Annotations {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================
    // Symbol Arena
    // ========================================

    /// Move a symbol into the arena.
    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    /// Get a symbol by id.
    ///
    /// Ids are only handed out by [`add_symbol`](Self::add_symbol), so a
    /// missing entry is a compiler bug.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Get a symbol by id, mutably.
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Number of symbols in the arena.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    // ========================================
    // Links
    // ========================================

    /// Link an identifier or declaration node to a symbol.
    pub fn link(&mut self, node: NodeId, symbol: SymbolId) {
        self.links.insert(node, symbol);
    }

    /// The symbol linked to a node.
    pub fn linked(&self, node: NodeId) -> Option<SymbolId> {
        self.links.get(&node).copied()
    }

    /// The symbol linked to a node, resolved through the arena.
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.linked(node).map(|id| self.symbol(id))
    }

    /// The symbol linked to a node that must have been resolved.
    pub fn resolved(&self, node: NodeId) -> SymbolId {
        self.linked(node)
            .unwrap_or_else(|| panic!("node {} was never resolved", node))
    }

    /// Number of recorded links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // ========================================
    // Types
    // ========================================

    /// Record the type of an expression.
    pub fn set_type(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    /// The recorded type of an expression.
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }
}

/// Prints each identifier with the type of the symbol it resolved to.
/// Unresolved identifiers are marked `***null***`.
impl IdentAnnotator for Annotations {
    fn annotate(&self, ident: &Ident) -> Option<String> {
        let text = match self.symbol_of(ident.id) {
            Some(symbol) => symbol.ty.to_string(),
            None => "***null***".to_string(),
        };
        Some(text)
    }
}
