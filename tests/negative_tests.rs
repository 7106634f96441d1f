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

//! Negative/Error tests for the C-flat compiler.
//!
//! These tests verify that the compiler rejects invalid programs with the
//! expected diagnostics, positioned as `line:column`.

use cflat::{compile, lexer, parser, ErrorCode};
use test_case::test_case;

/// Compile a program that must fail and return its error lines.
fn error_lines(source: &str) -> Vec<String> {
    let diagnostics = compile(source).expect_err("Expected compilation to fail");
    diagnostics.errors().map(|d| d.to_string()).collect()
}

// ============================================================================
// Lexer Error Tests
// ============================================================================

#[test_case("void main() { @ }", ErrorCode::InvalidCharacter; "at_sign")]
#[test_case("void main() { int x; x = 1 $ 2; }", ErrorCode::InvalidCharacter; "dollar")]
#[test_case("void main() { cout << \"open; }", ErrorCode::UnterminatedString; "eof_in_string")]
#[test_case("void main() { cout << \"line\nbreak\"; }", ErrorCode::UnterminatedString; "newline_in_string")]
#[test_case("void main() { cout << \"\\q\"; }", ErrorCode::InvalidEscapeSequence; "invalid_q")]
fn test_lexer_errors(source: &str, expected_code: ErrorCode) {
    let err = lexer::tokenize(source).unwrap_err();
    assert_eq!(err.code, expected_code);
}

// ============================================================================
// Parser Error Tests
// ============================================================================

#[test_case("int x", ErrorCode::UnexpectedEndOfFile; "missing_semicolon_at_eof")]
#[test_case("void main() { int x }", ErrorCode::UnexpectedToken; "missing_semicolon")]
#[test_case("void main() { x = ; }", ErrorCode::ExpectedExpression; "missing_operand")]
#[test_case("void main() { 1 = x; }", ErrorCode::UnexpectedToken; "literal_statement")]
#[test_case("void main() { x = 1 < 2 < 3; }", ErrorCode::NonAssociativeComparison; "chained_comparison")]
#[test_case("struct P { };", ErrorCode::EmptyStructBody; "empty_struct")]
#[test_case("void f(struct P p) { }", ErrorCode::ExpectedType; "struct_formal")]
#[test_case("struct P { int x; }; struct P f() { }", ErrorCode::ExpectedType; "struct_return")]
#[test_case("void main() { f() = 1; }", ErrorCode::InvalidAssignmentTarget; "call_as_target")]
fn test_parser_errors(source: &str, expected_code: ErrorCode) {
    let tokens = lexer::tokenize(source).unwrap();
    let err = parser::parse(&tokens).unwrap_err();
    assert_eq!(err.code, expected_code);
}

// ============================================================================
// Name Error Tests
// ============================================================================

#[test_case("void main() { x = 1; }", "1:15 ***ERROR*** Undeclared identifier"; "undeclared")]
#[test_case("int x; bool x; void main() { }", "1:13 ***ERROR*** Multiply declared identifier"; "duplicate_global")]
#[test_case("void f(int a, int a) { } void main() { }", "1:19 ***ERROR*** Multiply declared identifier"; "duplicate_formal")]
#[test_case("void v; void main() { }", "1:6 ***ERROR*** Non-function declared void"; "void_variable")]
#[test_case("void main() { struct Q q; }", "1:22 ***ERROR*** Invalid struct type"; "unknown_struct")]
#[test_case("void main() { int i; i.f = 1; }", "1:22 ***ERROR*** Dot-access of non-struct type"; "dot_on_int")]
#[test_case("struct S { int a; }; void main() { struct S s; s.b = 1; }", "1:50 ***ERROR*** Invalid struct field name"; "unknown_field")]
fn test_name_errors(source: &str, expected: &str) {
    assert_eq!(error_lines(source), vec![expected.to_string()]);
}

#[test]
fn test_name_errors_are_all_reported() {
    let lines = error_lines("void main() { a = 1; b = 2; }");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_shadowing_is_not_a_duplicate() {
    assert!(compile("int x; void main() { int x; x = 1; }").is_ok());
    assert!(compile("void main() { int x; if (true) { bool x; x = true; } }").is_ok());
}

#[test]
fn test_struct_name_and_variable_may_share_a_name() {
    assert!(compile("struct P { int x; }; int P; void main() { struct P p; P = p.x; }").is_ok());
}

// ============================================================================
// Type Error Tests
// ============================================================================

#[test_case("int x; void main() { x = true + 1; }", "Arithmetic operator applied to non-numeric operand"; "arith_on_bool")]
#[test_case("bool b; void main() { b = 1 && true; }", "Logical operator applied to non-bool operand"; "and_on_int")]
#[test_case("bool b; void main() { b = !1; }", "Logical operator applied to non-bool operand"; "not_on_int")]
#[test_case("bool b; void main() { b = true < 1; }", "Relational operator applied to non-numeric operand"; "less_on_bool")]
#[test_case("bool b; void main() { b = 1 == true; }", "Type mismatch"; "equality_mismatch")]
#[test_case("void f() { } bool b; void main() { b = f() == f(); }", "Equality operator applied to void functions"; "equality_void_fn")]
#[test_case("int x; void main() { x = true; }", "Type mismatch"; "assign_mismatch")]
#[test_case("int f() { return 1; } int g() { return 2; } void main() { f = g; }", "Function assignment"; "assign_function")]
#[test_case("struct S { int a; }; void main() { struct S s; struct S t; s = t; }", "Struct variable assignment"; "assign_struct")]
#[test_case("int x; void main() { x(); }", "Attempt to call a non-function"; "call_non_function")]
#[test_case("void f(int a) { } void main() { f(true); }", "Type of actual does not match type of formal"; "bad_actual")]
#[test_case("int f() { return true; } void main() { }", "Bad return value"; "bad_return")]
#[test_case("void main() { return 1; }", "Return with a value in a void function"; "value_in_void")]
#[test_case("void f() { } void main() { cin >> f; }", "Attempt to read a function"; "read_function")]
#[test_case("struct S { int a; }; void main() { struct S s; cout << s; }", "Attempt to write a struct variable"; "write_struct")]
#[test_case("void f() { } void main() { cout << f(); }", "Attempt to write void"; "write_void")]
#[test_case("void main() { while (1) { } }", "Non-bool expression used as a condition"; "int_while")]
#[test_case("void f() { }", "No main function"; "missing_main")]
#[test_case("int main; ", "No main function"; "main_not_a_function")]
#[test_case("void main(int a) { }", "No main function"; "main_with_params")]
fn test_type_errors(source: &str, expected: &str) {
    let lines = error_lines(source);
    assert_eq!(lines.len(), 1, "{:?}", lines);
    assert!(lines[0].ends_with(expected), "{:?}", lines);
}

#[test]
fn test_missing_return_value_is_program_level() {
    assert_eq!(
        error_lines("int f() { return; } void main() { }"),
        vec!["0:0 ***ERROR*** Missing return value".to_string()]
    );
}

#[test]
fn test_error_type_suppresses_cascades() {
    // only the innermost mismatch is reported
    let lines = error_lines("int x; void main() { x = (true + 1) * 2 - 3; }");
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_one_error_per_bad_argument() {
    let lines = error_lines("void f(int a, bool b) { } void main() { f(true, 1); }");
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.ends_with("Type of actual does not match type of formal")));
}
