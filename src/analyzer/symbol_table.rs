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

//! Symbol table for the semantic analyzer.
//!
//! The symbol table manages a stack of scopes: the program scope, a
//! function's parameters and locals, and one transient scope per `if`
//! branch or `while` body. Symbols are never removed one by one.
//!
//! The program scope is created with the table and can never be popped,
//! so the stack always holds at least one scope.

use super::scope::Scope;
use super::symbol::SymbolId;
use thiserror::Error;

/// Failures of scope stack operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolTableError {
    #[error("no scope left to remove")]
    EmptyScope,
    #[error("'{0}' is already declared in this scope")]
    DuplicateName(String),
    #[error("missing name for declaration")]
    NullKey,
}

/// The scope stack.
#[derive(Debug)]
pub struct SymbolTable {
    /// The scope stack (innermost scope last, program scope first).
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a symbol table holding only the program scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    /// Push a new scope onto the stack.
    pub fn add_scope(&mut self) {
        self.scopes.push(Scope::new());
        log::trace!("enter scope, depth {}", self.scopes.len());
    }

    /// Pop the innermost scope. The program scope is never removed.
    pub fn remove_scope(&mut self) -> Result<Scope, SymbolTableError> {
        if self.scopes.len() <= 1 {
            return Err(SymbolTableError::EmptyScope);
        }
        let scope = self.scopes.pop().ok_or(SymbolTableError::EmptyScope)?;
        log::trace!("leave scope, depth {}", self.scopes.len());
        Ok(scope)
    }

    /// Declare a name in the innermost scope.
    pub fn add_decl(&mut self, name: &str, id: SymbolId) -> Result<(), SymbolTableError> {
        if name.is_empty() {
            return Err(SymbolTableError::NullKey);
        }
        self.scopes
            .last_mut()
            .ok_or(SymbolTableError::EmptyScope)?
            .declare(name, id)
    }

    /// Look up a name in the innermost scope only.
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes.last().and_then(|scope| scope.lookup(name))
    }

    /// Look up a name, searching from innermost to outermost scope.
    pub fn lookup_global(&self, name: &str) -> Option<SymbolId> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Get the current number of scopes.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Check if declarations currently go to program level.
    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }
}
