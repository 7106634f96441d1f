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

//! Name resolution pass.
//!
//! Walks the tree once, maintaining the scope stack, and links every
//! identifier occurrence to its symbol. Each scope's declarations are
//! processed before its statements.

use super::annotations::Annotations;
use super::declarations::DeclarationResolver;
use super::symbol::SymbolId;
use super::symbol_table::SymbolTable;
use crate::ast::{Ident, Program};
use crate::context::CompilationContext;
use crate::error::{CompileError, ErrorCode, Span};

/// Key under which a struct definition is declared.
///
/// The space makes it impossible for an identifier to spell it.
pub fn struct_key(name: &str) -> String {
    format!("struct {}", name)
}

/// State of the name resolution pass.
pub struct NameResolver<'a> {
    /// The scope stack.
    pub(crate) table: SymbolTable,
    /// Arena and link store being filled.
    pub(crate) annotations: &'a mut Annotations,
    /// Diagnostics sink.
    pub(crate) ctx: &'a mut CompilationContext,
    /// Errors reported by this pass.
    pub(crate) error_count: usize,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver writing into `annotations`.
    pub fn new(annotations: &'a mut Annotations, ctx: &'a mut CompilationContext) -> Self {
        Self {
            table: SymbolTable::new(),
            annotations,
            ctx,
            error_count: 0,
        }
    }

    /// Resolve a whole program. Returns `true` if no error was reported.
    pub fn resolve_program(&mut self, program: &Program) -> bool {
        for decl in &program.decls {
            self.resolve_decl(decl);
        }
        debug_assert!(self.table.is_global_scope());

        log::debug!(
            "name resolution: {} symbols, {} links, {} errors",
            self.annotations.symbol_count(),
            self.annotations.link_count(),
            self.error_count
        );
        self.error_count == 0
    }

    /// Report a name error.
    pub(crate) fn report(&mut self, code: ErrorCode, message: &str, span: Span) {
        self.error_count += 1;
        self.ctx.error(CompileError::new(code, message, span));
    }

    /// Pop a scope the resolver itself pushed.
    pub(crate) fn leave_scope(&mut self) {
        self.table
            .remove_scope()
            .expect("scope stack underflow during name resolution");
    }

    /// Insert a checked-unique name into the innermost scope and link it.
    pub(crate) fn declare(&mut self, key: &str, name: &Ident, symbol: SymbolId) {
        if let Err(err) = self.table.add_decl(key, symbol) {
            panic!("unexpected symbol table failure for '{}': {}", key, err);
        }
        self.annotations.link(name.id, symbol);
    }

    /// Resolve a plain identifier use: innermost scope first, then outward.
    pub(crate) fn resolve_ident(&mut self, ident: &Ident) -> Option<SymbolId> {
        let found = self
            .table
            .lookup_local(&ident.name)
            .or_else(|| self.table.lookup_global(&ident.name));

        match found {
            Some(id) => {
                self.annotations.link(ident.id, id);
                Some(id)
            }
            None => {
                self.report(
                    ErrorCode::UndeclaredIdentifier,
                    "Undeclared identifier",
                    ident.span.clone(),
                );
                None
            }
        }
    }
}
