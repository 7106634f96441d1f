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

//! Semantic analyzer module for the C-flat compiler.
//!
//! Three passes run over the immutable tree, each writing to a shared
//! [`Annotations`] store:
//! - name resolution links identifiers to symbols
//! - type checking records expression types
//! - layout assigns sizes and frame offsets
//!
//! # Module Structure
//!
//! - `annotations` - Symbol arena and per-node side tables
//! - `declarations` - Declaration resolution (DeclarationResolver trait)
//! - `expressions` - Expression typing (ExpressionChecker trait)
//! - `functions` - Function and `main` checks (FunctionChecker trait)
//! - `layout` - Sizes and frame offsets
//! - `operators` - Operator typing (OperatorChecker trait)
//! - `references` - Identifier use resolution (ReferenceResolver trait)
//! - `resolver` - Name resolution pass
//! - `scope` - A single scope or field table
//! - `statements` - Statement typing (StatementChecker trait)
//! - `symbol` - Symbol definitions
//! - `symbol_table` - The scope stack
//! - `type_check` - Type checking pass
//! - `types` - Semantic types

pub mod annotations;
pub mod declarations;
pub mod expressions;
pub mod functions;
pub mod layout;
pub mod operators;
pub mod references;
pub mod resolver;
pub mod scope;
pub mod statements;
pub mod symbol;
pub mod symbol_table;
pub mod type_check;
pub mod types;

pub use annotations::Annotations;
pub use symbol::{FnInfo, Symbol, SymbolId, SymbolKind};
pub use symbol_table::{SymbolTable, SymbolTableError};
pub use types::Type;

use crate::ast::Program;
use crate::context::CompilationContext;
use layout::LayoutAssigner;
use resolver::NameResolver;
use type_check::TypeChecker;

/// Resolve every identifier of `program`.
///
/// Returns `true` if no name error was reported.
pub fn resolve(
    program: &Program,
    annotations: &mut Annotations,
    ctx: &mut CompilationContext,
) -> bool {
    NameResolver::new(annotations, ctx).resolve_program(program)
}

/// Type check a resolved program.
///
/// Returns `true` if every check passed.
pub fn check(program: &Program, annotations: &mut Annotations, ctx: &mut CompilationContext) -> bool {
    TypeChecker::new(annotations, ctx).check_program(program)
}

/// Assign sizes and offsets. The program must have passed [`check`].
pub fn assign_layout(program: &Program, annotations: &mut Annotations) {
    LayoutAssigner::new(annotations).assign_program(program);
}
