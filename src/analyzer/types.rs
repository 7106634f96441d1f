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

//! Semantic types.
//!
//! Two types are compatible iff their printed forms are identical, so
//! `Display` is the single source of truth for type equality.

use std::fmt;

use crate::ast::TypeSpec;

/// Size in bytes of one machine word.
pub const WORD_SIZE: u32 = 4;

/// The type of a symbol or expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Void,
    String,
    /// The name of a struct definition.
    StructDef(String),
    /// An instance of the named struct.
    StructType(String),
    /// A function from parameter types to a return type.
    Fn { params: Vec<Type>, ret: Box<Type> },
    /// Result of an already reported error.
    Error,
}

impl Type {
    /// Build the semantic type for a written type.
    pub fn from_spec(spec: &TypeSpec) -> Self {
        match spec {
            TypeSpec::Int => Type::Int,
            TypeSpec::Bool => Type::Bool,
            TypeSpec::Void => Type::Void,
            TypeSpec::Struct(name) => Type::StructType(name.name.clone()),
        }
    }

    /// Build a function type.
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Fn {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_fn(&self) -> bool {
        matches!(self, Type::Fn { .. })
    }

    pub fn is_struct_def(&self) -> bool {
        matches!(self, Type::StructDef(_))
    }

    pub fn is_struct_type(&self) -> bool {
        matches!(self, Type::StructType(_))
    }

    /// Check compatibility by printed form. `Error` matches nothing.
    pub fn compatible(&self, other: &Type) -> bool {
        if self.is_error() || other.is_error() {
            return false;
        }
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "string"),
            Type::StructDef(name) => write!(f, "struct-def {}", name),
            Type::StructType(name) => write!(f, "{}", name),
            Type::Fn { params, ret } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", ret)
            }
            Type::Error => write!(f, "<error>"),
        }
    }
}
