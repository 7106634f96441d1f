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

//! Label management for code generation.
//!
//! Three label namespaces never overlap:
//! - symbol labels start with `_` (`main` is the one exception);
//! - generated labels have the form `<prefix>_<n>`, numbered by the
//!   compilation context;
//! - exit labels have the form `<function>_exit`, never start with `_` and
//!   never end in a digit.

use super::emit::EmitHelpers;
use super::CodeGenerator;

/// Extension trait for label management.
pub trait LabelManager {
    /// Generate a unique label with the given prefix.
    fn make_label(&mut self, prefix: &str) -> String;

    /// Define a label at the current position.
    fn define_label(&mut self, name: &str);
}

impl<'a> LabelManager for CodeGenerator<'a> {
    fn make_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.ctx.next_label_id());
        log::trace!("new label {}", label);
        label
    }

    fn define_label(&mut self, name: &str) {
        self.emit_label(name);
    }
}

/// Label of a function's entry point.
pub fn function_label(name: &str) -> String {
    if name == "main" {
        name.to_string()
    } else {
        format!("_{}", name)
    }
}

/// Label of the single exit point every `return` of a function jumps to.
pub fn exit_label(name: &str) -> String {
    format!("{}_exit", name)
}

/// Label of a global variable's storage.
pub fn global_label(name: &str) -> String {
    format!("_{}", name)
}
