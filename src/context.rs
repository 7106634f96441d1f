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

//! Per-compilation state shared by every pass.
//!
//! A fresh context means a fresh diagnostic stream, a cleared failure flag
//! and a label counter starting at zero, so compiling the same program twice
//! produces identical output.

use crate::error::{CompileError, CompileWarning, Diagnostics, ErrorCode};

/// State threaded through the whole pipeline.
#[derive(Debug, Default)]
pub struct CompilationContext {
    /// Source text, used to position diagnostics.
    source: String,
    /// Collected diagnostics.
    diagnostics: Diagnostics,
    /// Next generated label number.
    label_counter: u32,
}

impl CompilationContext {
    /// Create a context for compiling `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            diagnostics: Diagnostics::new(),
            label_counter: 0,
        }
    }

    /// The source being compiled.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Report a fatal diagnostic. Sets the failure flag.
    pub fn error(&mut self, error: CompileError) {
        log::debug!("{}: {}", error.code, error.message);
        self.diagnostics.error(&error, &self.source);
    }

    /// Report a fatal diagnostic that has no source position.
    pub fn program_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.diagnostics.program_error(code, message);
    }

    /// Report a warning. Does not affect the failure flag.
    pub fn warning(&mut self, warning: CompileWarning) {
        self.diagnostics.warning(&warning, &self.source);
    }

    /// Whether any fatal diagnostic has been reported.
    pub fn has_failed(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The diagnostic stream so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the context, keeping only its diagnostics.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Hand out the next label number.
    pub fn next_label_id(&mut self) -> u32 {
        let id = self.label_counter;
        self.label_counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Span, WarningCode};

    #[test]
    fn test_fresh_context_has_not_failed() {
        let ctx = CompilationContext::new("int x;");
        assert!(!ctx.has_failed());
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_warning_does_not_fail() {
        let mut ctx = CompilationContext::new("int x;");
        ctx.warning(CompileWarning::new(
            WarningCode::IntegerLiteralTooLarge,
            "integer literal too large; using max value",
            Span::new(0, 1),
        ));
        assert!(!ctx.has_failed());
        assert_eq!(ctx.diagnostics().len(), 1);
    }

    #[test]
    fn test_error_sets_failure_flag() {
        let mut ctx = CompilationContext::new("x");
        ctx.error(CompileError::new(
            ErrorCode::UndeclaredIdentifier,
            "Undeclared identifier",
            Span::new(0, 1),
        ));
        assert!(ctx.has_failed());
    }

    #[test]
    fn test_label_counter_is_per_context() {
        let mut first = CompilationContext::new("");
        assert_eq!(first.next_label_id(), 0);
        assert_eq!(first.next_label_id(), 1);

        let mut second = CompilationContext::new("");
        assert_eq!(second.next_label_id(), 0);
    }
}
