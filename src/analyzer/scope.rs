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

//! Scope management for the semantic analyzer.
//!
//! A scope maps names to symbol ids. The same type serves as the field
//! table of a struct definition, which is why insertion order is kept.

use super::symbol::SymbolId;
use super::symbol_table::SymbolTableError;
use std::collections::HashMap;

/// A scope in the symbol table, or a struct's field table.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Symbols defined in this scope.
    symbols: HashMap<String, SymbolId>,
    /// Names in declaration order.
    order: Vec<String>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a name in this scope.
    pub fn declare(&mut self, name: &str, id: SymbolId) -> Result<(), SymbolTableError> {
        if name.is_empty() {
            return Err(SymbolTableError::NullKey);
        }
        if self.symbols.contains_key(name) {
            return Err(SymbolTableError::DuplicateName(name.to_string()));
        }
        self.symbols.insert(name.to_string(), id);
        self.order.push(name.to_string());
        Ok(())
    }

    /// Look up a name in this scope.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    /// Check if a name is declared here.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over the entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.symbols.get(name).map(|id| (name.as_str(), *id)))
    }
}
