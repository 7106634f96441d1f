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

//! Declaration resolution.
//!
//! Variables, formals and struct fields go through one routine; the only
//! difference is whether the name lands in the scope stack or in a struct's
//! field table. Struct types are always looked up in the scope stack.

use super::references::ReferenceResolver;
use super::resolver::{struct_key, NameResolver};
use super::scope::Scope;
use super::symbol::{Symbol, SymbolId};
use super::types::Type;
use crate::ast::{Body, Decl, DeclKind, FnDecl, StructDecl, TypeSpec, VarDecl};
use crate::error::ErrorCode;

/// Extension trait for resolving declarations.
pub trait DeclarationResolver {
    /// Resolve one program-level declaration.
    fn resolve_decl(&mut self, decl: &Decl);

    /// Resolve a variable, formal or field declaration.
    ///
    /// With `fields` set the name goes into that field table, otherwise
    /// into the innermost scope.
    fn resolve_var_decl(&mut self, decl: &VarDecl, fields: Option<&mut Scope>) -> Option<SymbolId>;

    /// Resolve a function: its name, then formals and body in a new scope.
    fn resolve_fn_decl(&mut self, decl: &FnDecl);

    /// Resolve a struct definition into a fresh field table.
    fn resolve_struct_decl(&mut self, decl: &StructDecl);

    /// Resolve declarations then statements, in the current scope.
    fn resolve_body(&mut self, body: &Body);
}

impl<'a> DeclarationResolver for NameResolver<'a> {
    fn resolve_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Var(var) => {
                self.resolve_var_decl(var, None);
            }
            DeclKind::Fn(func) => self.resolve_fn_decl(func),
            DeclKind::Struct(def) => self.resolve_struct_decl(def),
        }
    }

    fn resolve_var_decl(
        &mut self,
        decl: &VarDecl,
        mut fields: Option<&mut Scope>,
    ) -> Option<SymbolId> {
        let name = &decl.name;
        let mut bad_decl = false;
        let mut struct_def = None;

        match &decl.ty {
            TypeSpec::Void => {
                self.report(
                    ErrorCode::NonFunctionDeclaredVoid,
                    "Non-function declared void",
                    name.span.clone(),
                );
                bad_decl = true;
            }
            TypeSpec::Struct(struct_name) => {
                let found = self
                    .table
                    .lookup_global(&struct_key(&struct_name.name))
                    .filter(|id| self.annotations.symbol(*id).is_struct_def());
                match found {
                    Some(def) => {
                        self.annotations.link(struct_name.id, def);
                        struct_def = Some(def);
                    }
                    None => {
                        self.report(
                            ErrorCode::InvalidStructType,
                            "Invalid struct type",
                            struct_name.span.clone(),
                        );
                        bad_decl = true;
                    }
                }
            }
            TypeSpec::Int | TypeSpec::Bool => {}
        }

        let already_declared = match fields.as_deref() {
            Some(scope) => scope.contains(&name.name),
            None => self.table.lookup_local(&name.name).is_some(),
        };
        if already_declared {
            self.report(
                ErrorCode::MultiplyDeclared,
                "Multiply declared identifier",
                name.span.clone(),
            );
            bad_decl = true;
        }

        if bad_decl {
            return None;
        }

        let mut symbol = match (&decl.ty, struct_def) {
            (TypeSpec::Struct(struct_name), Some(def)) => {
                Symbol::struct_var(&name.name, &struct_name.name, def, name.span.clone())
            }
            _ => Symbol::variable(&name.name, Type::from_spec(&decl.ty), name.span.clone()),
        };
        symbol.is_global = fields.is_none() && self.table.is_global_scope();
        let id = self.annotations.add_symbol(symbol);

        match fields.as_deref_mut() {
            Some(scope) => {
                if let Err(err) = scope.declare(&name.name, id) {
                    panic!("unexpected field table failure for '{}': {}", name.name, err);
                }
                self.annotations.link(name.id, id);
            }
            None => self.declare(&name.name, name, id),
        }
        Some(id)
    }

    fn resolve_fn_decl(&mut self, decl: &FnDecl) {
        let name = &decl.name;

        let symbol = if self.table.lookup_local(&name.name).is_some() {
            self.report(
                ErrorCode::MultiplyDeclared,
                "Multiply declared identifier",
                name.span.clone(),
            );
            None
        } else {
            let mut symbol = Symbol::function(
                &name.name,
                Type::from_spec(&decl.return_type),
                name.span.clone(),
            );
            symbol.is_global = self.table.is_global_scope();
            let id = self.annotations.add_symbol(symbol);
            self.declare(&name.name, name, id);
            Some(id)
        };

        self.table.add_scope();

        let params: Vec<Type> = decl
            .formals
            .iter()
            .map(|formal| {
                self.resolve_var_decl(formal, None);
                Type::from_spec(&formal.ty)
            })
            .collect();
        if let Some(id) = symbol {
            self.annotations.symbol_mut(id).set_params(params);
        }

        self.resolve_body(&decl.body);
        self.leave_scope();
    }

    fn resolve_struct_decl(&mut self, decl: &StructDecl) {
        let name = &decl.name;
        let key = struct_key(&name.name);

        let bad_decl = self.table.lookup_local(&key).is_some();
        if bad_decl {
            self.report(
                ErrorCode::MultiplyDeclared,
                "Multiply declared identifier",
                name.span.clone(),
            );
        }

        let mut fields = Scope::new();
        for field in &decl.fields {
            self.resolve_var_decl(field, Some(&mut fields));
        }

        if !bad_decl {
            let mut symbol = Symbol::struct_def(&name.name, fields, name.span.clone());
            symbol.is_global = self.table.is_global_scope();
            let id = self.annotations.add_symbol(symbol);
            self.declare(&key, name, id);
        }
    }

    fn resolve_body(&mut self, body: &Body) {
        for decl in &body.decls {
            self.resolve_var_decl(decl, None);
        }
        for stmt in &body.stmts {
            self.resolve_stmt(stmt);
        }
    }
}
