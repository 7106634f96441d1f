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

//! Frame layout pass.
//!
//! Assigns sizes and frame offsets on a valid, typed tree.
//!
//! Frame of a function with `n` formals, relative to `$fp`:
//!
//! ```text
//!   0, -4, ..        formals, first one at 0
//!   -4n              saved $ra
//!   -4n - 4          saved $fp
//!   -4n - 8, ..      locals, in source order including nested blocks
//! ```

use super::annotations::Annotations;
use super::symbol::SymbolId;
use super::types::WORD_SIZE;
use crate::ast::{Body, DeclKind, FnDecl, Program, StmtKind, StructDecl, VarDecl};

/// Bytes between the formals and the first local: saved `$ra` and `$fp`.
const SAVED_REGISTERS: i32 = 2 * WORD_SIZE as i32;

/// State of the layout pass.
pub struct LayoutAssigner<'a> {
    annotations: &'a mut Annotations,
    /// Next free local offset in the current function.
    next_offset: i32,
}

impl<'a> LayoutAssigner<'a> {
    /// Create a layout pass over resolved annotations.
    pub fn new(annotations: &'a mut Annotations) -> Self {
        Self {
            annotations,
            next_offset: 0,
        }
    }

    /// Lay out every declaration of the program.
    pub fn assign_program(&mut self, program: &Program) {
        for decl in &program.decls {
            match &decl.kind {
                DeclKind::Struct(def) => self.assign_struct(def),
                DeclKind::Var(var) => {
                    self.assign_size(var);
                }
                DeclKind::Fn(func) => self.assign_function(func),
            }
        }
    }

    fn symbol_id(&self, decl: &VarDecl) -> SymbolId {
        self.annotations.resolved(decl.name.id)
    }

    /// Set a variable's size from its type and return it.
    fn assign_size(&mut self, decl: &VarDecl) -> u32 {
        let id = self.symbol_id(decl);
        let size = match self.annotations.symbol(id).struct_def_id() {
            Some(def) => self.annotations.symbol(def).size,
            None => WORD_SIZE,
        };
        self.annotations.symbol_mut(id).size = size;
        size
    }

    /// Compute a struct's size and its fields' offsets, in declaration order.
    fn assign_struct(&mut self, def: &StructDecl) {
        let mut total = 0u32;
        for field in &def.fields {
            let size = self.assign_size(field);
            let id = self.symbol_id(field);
            self.annotations.symbol_mut(id).struct_offset = -(total as i32);
            total += size;
        }

        let id = self.annotations.resolved(def.name.id);
        self.annotations.symbol_mut(id).size = total;
        log::trace!("struct {} has size {}", def.name.name, total);
    }

    fn assign_function(&mut self, func: &FnDecl) {
        let mut offset = 0i32;
        for formal in &func.formals {
            self.assign_size(formal);
            let id = self.symbol_id(formal);
            self.annotations.symbol_mut(id).offset = offset;
            offset -= WORD_SIZE as i32;
        }
        let formal_space = WORD_SIZE * func.formals.len() as u32;

        let start = -(formal_space as i32 + SAVED_REGISTERS);
        self.next_offset = start;
        self.assign_body(&func.body);
        let local_space = (start - self.next_offset) as u32;

        let id = self.annotations.resolved(func.name.id);
        if let Some(info) = self.annotations.symbol_mut(id).fn_info_mut() {
            info.formal_space = formal_space;
            info.local_space = local_space;
        }
        log::trace!(
            "function {}: formal space {}, local space {}",
            func.name.name,
            formal_space,
            local_space
        );
    }

    fn assign_body(&mut self, body: &Body) {
        for decl in &body.decls {
            let size = self.assign_size(decl);
            let id = self.symbol_id(decl);
            self.annotations.symbol_mut(id).offset = self.next_offset;
            self.next_offset -= size as i32;
        }

        for stmt in &body.stmts {
            match &stmt.kind {
                StmtKind::If {
                    then_body,
                    else_body,
                    ..
                } => {
                    self.assign_body(then_body);
                    if let Some(else_body) = else_body {
                        self.assign_body(else_body);
                    }
                }
                StmtKind::While { body, .. } => self.assign_body(body),
                StmtKind::Assign(_)
                | StmtKind::PostInc(_)
                | StmtKind::PostDec(_)
                | StmtKind::Read(_)
                | StmtKind::Write(_)
                | StmtKind::Call(_)
                | StmtKind::Return(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{check, resolve};
    use crate::context::CompilationContext;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn layout(source: &str) -> (Program, Annotations) {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        let mut annotations = Annotations::new();
        let mut ctx = CompilationContext::new(source);
        assert!(resolve(&program, &mut annotations, &mut ctx));
        assert!(check(&program, &mut annotations, &mut ctx));
        LayoutAssigner::new(&mut annotations).assign_program(&program);
        (program, annotations)
    }

    #[test]
    fn test_struct_size_and_field_offsets() {
        let (program, annotations) =
            layout("struct S { int f1; int f2; bool f3; }; void main() { }");
        let def = match &program.decls[0].kind {
            DeclKind::Struct(def) => def,
            other => panic!("Expected struct, got {:?}", other),
        };
        assert_eq!(annotations.symbol_of(def.name.id).unwrap().size, 12);
        let offsets: Vec<i32> = def
            .fields
            .iter()
            .map(|f| annotations.symbol_of(f.name.id).unwrap().struct_offset)
            .collect();
        assert_eq!(offsets, vec![0, -4, -8]);
    }

    #[test]
    fn test_nested_struct_size() {
        let (program, annotations) = layout(
            "struct A { int x; int y; }; struct B { int k; struct A a; int z; }; void main() { }",
        );
        let def = match &program.decls[1].kind {
            DeclKind::Struct(def) => def,
            other => panic!("Expected struct, got {:?}", other),
        };
        assert_eq!(annotations.symbol_of(def.name.id).unwrap().size, 16);
        let z = annotations.symbol_of(def.fields[2].name.id).unwrap();
        assert_eq!(z.struct_offset, -12);
    }

    #[test]
    fn test_formal_and_local_offsets() {
        let (program, annotations) = layout(
            "int f(int a, int b) { int x; bool y; if (true) { int z; } return a; } \
             void main() { }",
        );
        let func = program.functions().next().unwrap();
        let offset = |decl: &VarDecl| annotations.symbol_of(decl.name.id).unwrap().offset;

        assert_eq!(offset(&func.formals[0]), 0);
        assert_eq!(offset(&func.formals[1]), -4);
        assert_eq!(offset(&func.body.decls[0]), -16);
        assert_eq!(offset(&func.body.decls[1]), -20);
        match &func.body.stmts[0].kind {
            StmtKind::If { then_body, .. } => assert_eq!(offset(&then_body.decls[0]), -24),
            other => panic!("Expected if, got {:?}", other),
        }

        let info = annotations.symbol_of(func.name.id).unwrap().fn_info().unwrap().clone();
        assert_eq!(info.formal_space, 8);
        assert_eq!(info.local_space, 12);
    }

    #[test]
    fn test_struct_local_takes_its_size() {
        let (program, annotations) = layout(
            "struct S { int a; int b; int c; }; \
             void main() { int before; struct S s; int after; }",
        );
        let main = program.main_function().unwrap();
        let symbol = |i: usize| annotations.symbol_of(main.body.decls[i].name.id).unwrap();

        assert_eq!(symbol(0).offset, -8);
        assert_eq!(symbol(1).offset, -12);
        assert_eq!(symbol(1).size, 12);
        assert_eq!(symbol(2).offset, -24);

        let info = annotations.symbol_of(main.name.id).unwrap().fn_info().unwrap().clone();
        assert_eq!(info.local_space, 20);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let source = "struct S { int a; bool b; }; struct S g; void main() { struct S l; }";
        let (first_program, first) = layout(source);
        let (_, second) = layout(source);
        for decl in &first_program.decls {
            let id = first.resolved(decl.name().id);
            assert_eq!(first.symbol(id).size, second.symbol(id).size);
            assert_eq!(first.symbol(id).offset, second.symbol(id).offset);
        }
    }
}
