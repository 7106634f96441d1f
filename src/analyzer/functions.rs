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

//! Function-level type checking.
//!
//! This module provides:
//! - Function body checking with the declared return type in scope
//! - The program-level `main` requirement

use super::statements::StatementChecker;
use super::type_check::TypeChecker;
use super::types::Type;
use crate::ast::{FnDecl, Program};
use crate::error::ErrorCode;

/// Extension trait for function checking.
pub trait FunctionChecker {
    /// Check a function body against its declared return type.
    fn check_fn_decl(&mut self, func: &FnDecl);

    /// Require a parameterless `main` at program level.
    fn check_main(&mut self, program: &Program);
}

impl<'a> FunctionChecker for TypeChecker<'a> {
    fn check_fn_decl(&mut self, func: &FnDecl) {
        self.return_type = Type::from_spec(&func.return_type);
        self.check_body(&func.body);
        self.return_type = Type::Void;
    }

    fn check_main(&mut self, program: &Program) {
        let has_main = program.main_function().is_some_and(|main| {
            self.annotations
                .symbol_of(main.name.id)
                .and_then(|symbol| symbol.fn_info())
                .is_some_and(|info| info.params.is_empty())
        });

        if !has_main {
            self.report_program(ErrorCode::NoMainFunction, "No main function");
        }
    }
}
