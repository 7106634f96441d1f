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

//! Code generation module for the C-flat compiler.
//!
//! This module emits SPIM-compatible MIPS assembly from a resolved, typed
//! and laid-out program. The target is a stack machine: every expression
//! leaves exactly one word on the operand stack.
//!
//! # Module Structure
//!
//! - `mips` - Registers, mnemonics, syscalls and directives
//! - `emit` - Line emission and operand stack helpers (EmitHelpers trait)
//! - `labels` - Generated labels (LabelManager trait)
//! - `variables` - Addressing of globals, locals and fields (VariableAccess trait)
//! - `expressions` - Expression evaluation (ExpressionGenerator trait)
//! - `control_flow` - Statements (StatementGenerator trait)
//! - `functions` - Prologue, epilogue and calls (FunctionGenerator trait)

pub mod control_flow;
pub mod emit;
pub mod expressions;
pub mod functions;
pub mod labels;
pub mod mips;
pub mod variables;

use crate::analyzer::Annotations;
use crate::ast::{DeclKind, Program};
use crate::context::CompilationContext;
use functions::FunctionGenerator;
use std::fmt;
use variables::VariableAccess;

/// Options controlling the emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Emit `#` comments next to instructions and before statements.
    pub comments: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

/// One line of assembly output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmLine {
    /// A directive such as `.text` or `.align 2`.
    Directive { name: &'static str, args: String },
    /// A code label.
    Label(String),
    /// A labelled data declaration such as `_x: .space 4`.
    Data {
        label: String,
        directive: &'static str,
        value: String,
    },
    /// An instruction with its operands.
    Instr {
        op: &'static str,
        operands: Vec<String>,
        comment: Option<String>,
    },
    /// A comment on its own line.
    Comment(String),
    /// An empty line.
    Blank,
}

impl fmt::Display for AsmLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmLine::Directive { name, args } if args.is_empty() => write!(f, "\t{}", name),
            AsmLine::Directive { name, args } => write!(f, "\t{} {}", name, args),
            AsmLine::Label(name) => write!(f, "{}:", name),
            AsmLine::Data {
                label,
                directive,
                value,
            } => write!(f, "{}:\t{} {}", label, directive, value),
            AsmLine::Instr {
                op,
                operands,
                comment,
            } => {
                write!(f, "\t{}", op)?;
                if !operands.is_empty() {
                    write!(f, "\t{}", operands.join(", "))?;
                }
                if let Some(comment) = comment {
                    write!(f, "\t\t# {}", comment)?;
                }
                Ok(())
            }
            AsmLine::Comment(text) => write!(f, "\t\t# {}", text),
            AsmLine::Blank => Ok(()),
        }
    }
}

/// A generated assembly program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    lines: Vec<AsmLine>,
}

impl Assembly {
    /// Wrap emitted lines.
    pub fn new(lines: Vec<AsmLine>) -> Self {
        Self { lines }
    }

    /// The emitted lines.
    pub fn lines(&self) -> &[AsmLine] {
        &self.lines
    }

    /// Iterate over the instructions only, as `(op, operands)`.
    pub fn instructions(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.lines.iter().filter_map(|line| match line {
            AsmLine::Instr { op, operands, .. } => Some((*op, operands.as_slice())),
            _ => None,
        })
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// The code generator.
///
/// Reads symbols and types from the annotation store; the only state it
/// mutates besides its own output is the context's label counter.
pub struct CodeGenerator<'a> {
    /// Results of the analysis passes.
    annotations: &'a Annotations,
    /// Per-compilation state (label counter).
    ctx: &'a mut CompilationContext,
    /// Output options.
    options: CodegenOptions,
    /// Emitted lines.
    lines: Vec<AsmLine>,
    /// Exit label of the function being generated.
    exit_label: String,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator.
    pub fn new(
        annotations: &'a Annotations,
        ctx: &'a mut CompilationContext,
        options: CodegenOptions,
    ) -> Self {
        Self {
            annotations,
            ctx,
            options,
            lines: Vec::new(),
            exit_label: String::new(),
        }
    }

    /// Generate the whole program.
    pub fn generate_program(mut self, program: &Program) -> Assembly {
        for decl in &program.decls {
            match &decl.kind {
                DeclKind::Var(var) => self.emit_global(var),
                DeclKind::Fn(func) => self.generate_function(func),
                DeclKind::Struct(_) => {}
            }
        }
        log::debug!("generated {} lines of assembly", self.lines.len());
        Assembly::new(self.lines)
    }
}

/// Generate assembly for a program that passed every analysis pass,
/// including [`assign_layout`](crate::analyzer::assign_layout).
pub fn generate(
    program: &Program,
    annotations: &Annotations,
    ctx: &mut CompilationContext,
    options: CodegenOptions,
) -> Assembly {
    CodeGenerator::new(annotations, ctx, options).generate_program(program)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::analyzer::{assign_layout, check, resolve};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    /// Run the whole pipeline on a valid program.
    pub fn compile_source(source: &str, options: CodegenOptions) -> Assembly {
        let tokens = tokenize(source).expect("lexing failed");
        let program = parse(&tokens).expect("parsing failed");
        let mut annotations = Annotations::new();
        let mut ctx = CompilationContext::new(source);
        assert!(resolve(&program, &mut annotations, &mut ctx), "{}", ctx.diagnostics());
        assert!(check(&program, &mut annotations, &mut ctx), "{}", ctx.diagnostics());
        assign_layout(&program, &mut annotations);
        generate(&program, &annotations, &mut ctx, options)
    }

    /// Compile without comments and render each instruction as `op a, b`.
    pub fn instructions(source: &str) -> Vec<String> {
        compile_source(source, CodegenOptions { comments: false })
            .instructions()
            .map(|(op, operands)| {
                if operands.is_empty() {
                    op.to_string()
                } else {
                    format!("{} {}", op, operands.join(", "))
                }
            })
            .collect()
    }

    /// Whether `needle` occurs as a contiguous run in `haystack`.
    pub fn contains_sequence(haystack: &[String], needle: &[&str]) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window.iter().zip(needle).all(|(a, b)| a == b))
    }
}
