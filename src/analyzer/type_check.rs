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

//! Type checking pass.
//!
//! Runs on a fully resolved tree. Every expression's type is recorded in
//! the annotations; an operand typed [`Type::Error`] never produces a
//! second diagnostic.

use super::annotations::Annotations;
use super::functions::FunctionChecker;
use super::types::Type;
use crate::ast::{DeclKind, Program};
use crate::context::CompilationContext;
use crate::error::{CompileError, ErrorCode, Span};

/// State of the type checking pass.
pub struct TypeChecker<'a> {
    /// Links from the resolver; types are recorded here.
    pub(crate) annotations: &'a mut Annotations,
    /// Diagnostics sink.
    pub(crate) ctx: &'a mut CompilationContext,
    /// Return type of the function being checked.
    pub(crate) return_type: Type,
    /// Errors reported by this pass.
    pub(crate) error_count: usize,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker over resolved annotations.
    pub fn new(annotations: &'a mut Annotations, ctx: &'a mut CompilationContext) -> Self {
        Self {
            annotations,
            ctx,
            return_type: Type::Void,
            error_count: 0,
        }
    }

    /// Check a whole program. Returns `true` if every check passed.
    pub fn check_program(&mut self, program: &Program) -> bool {
        for decl in &program.decls {
            if let DeclKind::Fn(func) = &decl.kind {
                self.check_fn_decl(func);
            }
        }
        self.check_main(program);

        log::debug!("type checking: {} errors", self.error_count);
        self.error_count == 0
    }

    /// Report a type error.
    pub(crate) fn report(&mut self, code: ErrorCode, message: &str, span: Span) {
        self.error_count += 1;
        self.ctx.error(CompileError::new(code, message, span));
    }

    /// Report a type error that has no source position.
    pub(crate) fn report_program(&mut self, code: ErrorCode, message: &str) {
        self.error_count += 1;
        self.ctx.program_error(code, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::resolver::NameResolver;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn check_source(source: &str) -> (Vec<String>, bool) {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        let mut annotations = Annotations::new();
        let mut ctx = CompilationContext::new(source);
        assert!(NameResolver::new(&mut annotations, &mut ctx).resolve_program(&program));
        let ok = TypeChecker::new(&mut annotations, &mut ctx).check_program(&program);
        let lines = ctx.diagnostics().iter().map(|d| d.to_string()).collect();
        (lines, ok)
    }

    fn errors_in_main(body: &str) -> Vec<String> {
        let source = format!(
            "struct P {{ int a; }}; struct P p; struct P q; \
             int f(int x, bool y) {{ return x; }} void g() {{ }} \
             void main() {{ int i; bool b; {} }}",
            body
        );
        let (lines, _) = check_source(&source);
        lines
            .into_iter()
            .map(|line| line.split("***ERROR*** ").nth(1).unwrap_or("").to_string())
            .collect()
    }

    // ========================================
    // Program Level Tests
    // ========================================

    #[test]
    fn test_valid_program() {
        let (lines, ok) = check_source("int x; void main() { x = 1 + 2; cout << x; }");
        assert!(ok, "{:?}", lines);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_no_main_function() {
        let (lines, ok) = check_source("int x;");
        assert!(!ok);
        assert_eq!(lines, vec!["0:0 ***ERROR*** No main function"]);
    }

    #[test]
    fn test_main_with_parameters_is_not_main() {
        let (lines, ok) = check_source("void main(int a) { }");
        assert!(!ok);
        assert_eq!(lines, vec!["0:0 ***ERROR*** No main function"]);
    }

    // ========================================
    // Operator Tests
    // ========================================

    #[test]
    fn test_arithmetic_on_bool() {
        assert_eq!(
            errors_in_main("i = b + 1;"),
            vec!["Arithmetic operator applied to non-numeric operand"]
        );
    }

    #[test]
    fn test_each_bad_operand_is_reported() {
        assert_eq!(
            errors_in_main("i = b * b;"),
            vec![
                "Arithmetic operator applied to non-numeric operand",
                "Arithmetic operator applied to non-numeric operand"
            ]
        );
    }

    #[test]
    fn test_error_operand_is_not_reported_twice() {
        assert_eq!(
            errors_in_main("i = (b + 1) * 2;"),
            vec!["Arithmetic operator applied to non-numeric operand"]
        );
    }

    #[test]
    fn test_logical_and_relational() {
        assert_eq!(
            errors_in_main("b = i && true;"),
            vec!["Logical operator applied to non-bool operand"]
        );
        assert_eq!(
            errors_in_main("b = b < 1;"),
            vec!["Relational operator applied to non-numeric operand"]
        );
    }

    #[test]
    fn test_equality_rules() {
        assert_eq!(errors_in_main("b = i == b;"), vec!["Type mismatch"]);
        assert_eq!(
            errors_in_main("b = g() == g();"),
            vec!["Equality operator applied to void functions"]
        );
        assert_eq!(
            errors_in_main("b = p == q;"),
            vec!["Equality operator applied to struct variables"]
        );
        assert_eq!(
            errors_in_main("b = f == f;"),
            vec!["Equality operator applied to functions"]
        );
        assert!(errors_in_main("b = i != 3;").is_empty());
    }

    // ========================================
    // Assignment And Call Tests
    // ========================================

    #[test]
    fn test_assignment_rules() {
        assert_eq!(errors_in_main("i = true;"), vec!["Type mismatch"]);
        assert_eq!(errors_in_main("p = q;"), vec!["Struct variable assignment"]);
        assert_eq!(errors_in_main("f = f;"), vec!["Function assignment"]);
        assert!(errors_in_main("p.a = i = 3;").is_empty());
    }

    #[test]
    fn test_call_rules() {
        assert_eq!(errors_in_main("i();"), vec!["Attempt to call a non-function"]);
        assert_eq!(
            errors_in_main("i = f(3);"),
            vec!["Function call with wrong number of args"]
        );
        assert_eq!(
            errors_in_main("i = f(b, i);"),
            vec![
                "Type of actual does not match type of formal",
                "Type of actual does not match type of formal"
            ]
        );
        assert!(errors_in_main("i = f(1, true);").is_empty());
    }

    #[test]
    fn test_arguments_checked_even_on_arity_mismatch() {
        assert_eq!(
            errors_in_main("i = f(b + 1);"),
            vec![
                "Arithmetic operator applied to non-numeric operand",
                "Function call with wrong number of args"
            ]
        );
    }

    // ========================================
    // Statement Tests
    // ========================================

    #[test]
    fn test_condition_must_be_bool() {
        assert_eq!(
            errors_in_main("if (i) { } while (i + 1) { }"),
            vec![
                "Non-bool expression used as a condition",
                "Non-bool expression used as a condition"
            ]
        );
    }

    #[test]
    fn test_condition_error_is_not_reported_twice() {
        assert_eq!(
            errors_in_main("if (b + 1) { }"),
            vec!["Arithmetic operator applied to non-numeric operand"]
        );
    }

    #[test]
    fn test_read_and_write_rules() {
        assert_eq!(errors_in_main("cin >> f;"), vec!["Attempt to read a function"]);
        assert_eq!(errors_in_main("cin >> p;"), vec!["Attempt to read a struct variable"]);
        assert_eq!(errors_in_main("cout << f;"), vec!["Attempt to write a function"]);
        assert_eq!(errors_in_main("cout << p;"), vec!["Attempt to write a struct variable"]);
        assert_eq!(errors_in_main("cout << g();"), vec!["Attempt to write void"]);
        assert!(errors_in_main("cin >> p.a; cout << \"ok\"; cout << b;").is_empty());
    }

    #[test]
    fn test_increment_needs_int() {
        assert_eq!(
            errors_in_main("b++;"),
            vec!["Arithmetic operator applied to non-numeric operand"]
        );
    }

    #[test]
    fn test_return_rules() {
        let (lines, _) = check_source("int h() { return; } void main() { }");
        assert_eq!(lines, vec!["0:0 ***ERROR*** Missing return value"]);

        let (lines, _) = check_source("void main() { return 1; }");
        assert_eq!(lines, vec!["1:22 ***ERROR*** Return with a value in a void function"]);

        let (lines, _) = check_source("int h() { return true; } void main() { }");
        assert_eq!(lines, vec!["1:18 ***ERROR*** Bad return value"]);
    }

    #[test]
    fn test_errors_are_positioned_at_first_identifier() {
        let (lines, _) = check_source("void main() { int i; bool b; i = b + 1; }");
        assert_eq!(
            lines,
            vec!["1:34 ***ERROR*** Arithmetic operator applied to non-numeric operand"]
        );
    }
}
