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

//! Written type annotations.

use super::Ident;

/// A type as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Int,
    Bool,
    Void,
    /// `struct Name`, naming a struct definition.
    Struct(Ident),
}

impl TypeSpec {
    /// Check if this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeSpec::Void)
    }

    /// The struct name, if this names a struct.
    pub fn struct_name(&self) -> Option<&Ident> {
        match self {
            TypeSpec::Struct(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSpec::Int => write!(f, "int"),
            TypeSpec::Bool => write!(f, "bool"),
            TypeSpec::Void => write!(f, "void"),
            TypeSpec::Struct(name) => write!(f, "struct {}", name.name),
        }
    }
}
