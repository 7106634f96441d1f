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

//! C-flat Compiler Library
//!
//! This library provides all the components needed to compile C-flat source
//! code into SPIM-compatible MIPS assembly.
//!
//! # Modules
//!
//! - [`error`] - Error types and diagnostics
//! - [`context`] - Per-compilation state
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Parsing tokens into an AST
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`analyzer`] - Name resolution, type checking and frame layout
//! - [`codegen`] - MIPS assembly generation
//!
//! # Example
//!
//! ```no_run
//! use cflat::analyzer::{self, Annotations};
//! use cflat::codegen::{self, CodegenOptions};
//! use cflat::context::CompilationContext;
//! use cflat::{lexer, parser};
//!
//! fn compile(source: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     let tokens = lexer::tokenize(source)?;
//!     let program = parser::parse(&tokens)?;
//!
//!     let mut ctx = CompilationContext::new(source);
//!     let mut annotations = Annotations::new();
//!     if !analyzer::resolve(&program, &mut annotations, &mut ctx)
//!         || !analyzer::check(&program, &mut annotations, &mut ctx)
//!     {
//!         return Err(ctx.diagnostics().to_string().into());
//!     }
//!     analyzer::assign_layout(&program, &mut annotations);
//!
//!     let assembly = codegen::generate(&program, &annotations, &mut ctx, CodegenOptions::default());
//!     Ok(assembly.to_string())
//! }
//! ```

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod context;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use ast::Program;
pub use codegen::{Assembly, CodegenOptions};
pub use context::CompilationContext;
pub use error::{CompileError, Diagnostics, ErrorCode, Result, SourceLocation, Span};
pub use lexer::Token;

use analyzer::Annotations;

/// The version of the C-flat compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "C-flat";

/// The result of a successful compilation.
#[derive(Debug)]
pub struct Compilation {
    /// The parsed program.
    pub program: Program,
    /// The generated assembly.
    pub assembly: Assembly,
    /// Warnings collected along the way.
    pub diagnostics: Diagnostics,
}

/// Compile source code to assembly.
///
/// This is the main entry point. It runs every stage: lexing, parsing,
/// name resolution, type checking, layout and code generation.
///
/// # Returns
///
/// The generated assembly with any warnings, or every diagnostic collected
/// before the first failing stage.
///
/// # Example
///
/// ```no_run
/// let source = "void main() { cout << \"Hello, World!\\n\"; }";
///
/// match cflat::compile(source) {
///     Ok(compilation) => print!("{}", compilation.assembly),
///     Err(diagnostics) => eprint!("{}", diagnostics),
/// }
/// ```
pub fn compile(source: &str) -> std::result::Result<Compilation, Diagnostics> {
    compile_with_options(source, CodegenOptions::default())
}

/// Compile source code with explicit code generation options.
pub fn compile_with_options(
    source: &str,
    options: CodegenOptions,
) -> std::result::Result<Compilation, Diagnostics> {
    let mut ctx = CompilationContext::new(source);
    let output = compile_with_context(source, &mut ctx, options);
    let diagnostics = ctx.into_diagnostics();

    match output {
        Some((program, assembly)) => Ok(Compilation {
            program,
            assembly,
            diagnostics,
        }),
        None => Err(diagnostics),
    }
}

/// Run the whole pipeline, reporting into `ctx`.
///
/// Returns `None` once a stage has failed; the reasons are in `ctx`.
pub fn compile_with_context(
    source: &str,
    ctx: &mut CompilationContext,
    options: CodegenOptions,
) -> Option<(Program, Assembly)> {
    let program = parse_source(source, ctx)?;
    let assembly = compile_program(&program, ctx, options)?;
    Some((program, assembly))
}

/// Lex and parse `source`.
///
/// Lexer warnings are recorded in `ctx`; a lexical or syntax error is
/// recorded and yields `None`.
pub fn parse_source(source: &str, ctx: &mut CompilationContext) -> Option<Program> {
    let (tokens, warnings) = match lexer::tokenize_with_warnings(source) {
        Ok(result) => result,
        Err(error) => {
            ctx.error(error);
            return None;
        }
    };
    for warning in warnings {
        ctx.warning(warning);
    }

    match parser::parse(&tokens) {
        Ok(program) => Some(program),
        Err(error) => {
            ctx.error(error);
            None
        }
    }
}

/// Analyze a parsed program and generate its assembly.
///
/// Each pass only runs if the previous one reported no error.
pub fn compile_program(
    program: &Program,
    ctx: &mut CompilationContext,
    options: CodegenOptions,
) -> Option<Assembly> {
    let mut annotations = Annotations::new();

    analyzer::resolve(program, &mut annotations, ctx);
    if ctx.has_failed() {
        log::debug!("name resolution failed, skipping type checking");
        return None;
    }

    analyzer::check(program, &mut annotations, ctx);
    if ctx.has_failed() {
        log::debug!("type checking failed, skipping code generation");
        return None;
    }

    analyzer::assign_layout(program, &mut annotations);
    Some(codegen::generate(program, &annotations, ctx, options))
}

/// Print `program` with every identifier followed by the type it resolves
/// to, as in `x(int) = 1;`.
///
/// Name resolution runs on a scratch context, so nothing is reported here;
/// identifiers that fail to resolve print as `name(***null***)`.
pub fn unparse_resolved(program: &Program) -> String {
    let mut annotations = Annotations::new();
    let mut scratch = CompilationContext::new("");
    analyzer::resolve(program, &mut annotations, &mut scratch);
    program.annotated(&annotations).to_string()
}
