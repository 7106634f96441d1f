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

//! Property-based fuzz tests for the C-flat compiler.
//!
//! These tests use proptest to generate random inputs and verify
//! that the compiler handles them gracefully (no panics).
//!
//! Unlike cargo-fuzz, these tests run on stable Rust.

use proptest::prelude::*;

// ============================================================================
// Lexer Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the lexer with random ASCII strings.
    #[test]
    fn fuzz_lexer_ascii(s in "[ -~]{0,500}") {
        let _ = cflat::lexer::tokenize(&s);
    }

    /// Fuzz the lexer with random bytes (may include invalid UTF-8).
    #[test]
    fn fuzz_lexer_bytes(bytes in prop::collection::vec(any::<u8>(), 0..500)) {
        if let Ok(s) = String::from_utf8(bytes) {
            let _ = cflat::lexer::tokenize(&s);
        }
    }

    /// Fuzz with strings that look like C-flat code.
    #[test]
    fn fuzz_lexer_codelike(
        keyword in prop::sample::select(vec![
            "int", "bool", "void", "struct", "if", "else", "while", "return", "cin", "cout", "true", "false",
        ]),
        ident in "[a-z_][a-z0-9_]{0,10}",
        num in 0u32..u32::MAX,
        op in prop::sample::select(vec![
            "+", "-", "*", "/", "=", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", "&&", "||", "!", "++", "--", ".", ";", ",",
        ]),
    ) {
        let source = format!("{} {} {} {} {}", keyword, ident, op, num, ident);
        prop_assert!(cflat::lexer::tokenize(&source).is_ok(), "{}", source);
    }
}

// ============================================================================
// Parser Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the parser with random function bodies.
    #[test]
    fn fuzz_parser_function(
        name in "[a-z_][a-z0-9_]{0,10}",
        body in "[ a-z0-9_=+\\-*/();<>!&|.]{0,100}",
    ) {
        let source = format!("void {}() {{ {} }}", name, body);
        if let Ok(tokens) = cflat::lexer::tokenize(&source) {
            let _ = cflat::parser::parse(&tokens);
        }
    }

    /// Fuzz with nested control structures.
    #[test]
    fn fuzz_parser_control_flow(
        depth in 1usize..8,
        keyword in prop::sample::select(vec!["if", "while"]),
    ) {
        let mut source = String::from("bool b; void main() { ");
        for _ in 0..depth {
            source.push_str(&format!("{} (b) {{ ", keyword));
        }
        source.push_str("cout << 1; ");
        for _ in 0..depth {
            source.push_str("} ");
        }
        source.push('}');

        let tokens = cflat::lexer::tokenize(&source).unwrap();
        prop_assert!(cflat::parser::parse(&tokens).is_ok(), "{}", source);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }
}

// ============================================================================
// Compiler Pipeline Fuzzing
// ============================================================================

proptest! {
    /// Fuzz with global variable declarations.
    #[test]
    fn fuzz_compiler_variables(
        name in "v_[a-z0-9_]{0,8}",
        typ in prop::sample::select(vec!["int", "bool"]),
    ) {
        let source = format!("{} {}; void main() {{ cin >> {}; }}", typ, name, name);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Fuzz with arithmetic expressions.
    #[test]
    fn fuzz_compiler_arithmetic(
        a in 0u16..1000,
        b in 0u16..1000,
        op in prop::sample::select(vec!["+", "-", "*", "/"]),
    ) {
        let source = format!("int x; void main() {{ x = {} {} {}; cout << x; }}", a, op, b);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Fuzz with output statements.
    #[test]
    fn fuzz_compiler_write(s in "[A-Za-z ]{0,20}") {
        let source = format!("void main() {{ cout << \"{}\"; }}", s);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Mixing int and bool operands never compiles.
    #[test]
    fn fuzz_compiler_mixed_operands(
        op in prop::sample::select(vec!["+", "-", "*", "/", "<", ">", "<=", ">=", "&&", "||"]),
    ) {
        let source = format!("int i; bool b; bool r; void main() {{ r = i {} b; }}", op);
        prop_assert!(cflat::compile(&source).is_err(), "{}", source);
    }
}

// ============================================================================
// Edge Case Fuzzing
// ============================================================================

proptest! {
    /// Fuzz with deeply nested parentheses.
    #[test]
    fn fuzz_nested_parens(depth in 1usize..30) {
        let opens = "(".repeat(depth);
        let closes = ")".repeat(depth);
        let source = format!("int x; void main() {{ x = {}1{}; }}", opens, closes);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Fuzz with long identifiers.
    #[test]
    fn fuzz_long_identifiers(name in "v_[a-z_]{1,100}") {
        let source = format!("void main() {{ int {}; {} = 1; }}", name, name);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Fuzz with boundary numbers.
    #[test]
    fn fuzz_boundary_numbers(
        n in prop::sample::select(vec![0u64, 1, 32767, 32768, 65535, 2147483647, 2147483648, 99999999999]),
    ) {
        let source = format!("int x; void main() {{ x = {}; }}", n);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }

    /// Fuzz with escape sequences in strings.
    #[test]
    fn fuzz_string_escapes(
        content in prop::sample::select(vec![
            r#""#,
            r#"A"#,
            r#"\n"#,
            r#"\t"#,
            r#"\\"#,
            r#"\""#,
            r#"HELLO\nWORLD"#,
        ])
    ) {
        let source = format!("void main() {{ cout << \"{}\"; }}", content);
        prop_assert!(cflat::compile(&source).is_ok(), "{}", source);
    }
}

// ============================================================================
// Stress Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    /// Stress test with many statements.
    #[test]
    fn fuzz_many_statements(count in 1usize..100) {
        let mut source = String::from("void main() {\n");
        for i in 0..count {
            source.push_str(&format!("    int x{};\n", i));
        }
        for i in 0..count {
            source.push_str(&format!("    x{} = {};\n", i, i));
        }
        source.push('}');
        prop_assert!(cflat::compile(&source).is_ok());
    }

    /// Stress test with many functions.
    #[test]
    fn fuzz_many_functions(count in 1usize..30) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("void func{}() {{ }}\n", i));
        }
        source.push_str("void main() { }\n");
        prop_assert!(cflat::compile(&source).is_ok());
    }
}

// ============================================================================
// Invariant Tests
// ============================================================================

proptest! {
    /// Verify that compilation either succeeds or fails gracefully.
    #[test]
    fn invariant_no_panic(s in "[ -~]{0,300}") {
        let result = std::panic::catch_unwind(|| {
            let _ = cflat::compile(&s);
        });
        prop_assert!(result.is_ok(), "Compiler panicked on input");
    }

    /// A failed compilation always carries at least one error.
    #[test]
    fn invariant_failure_has_errors(s in "[a-z(){};=+<> ]{0,120}") {
        if let Err(diagnostics) = cflat::compile(&s) {
            prop_assert!(diagnostics.has_errors());
        }
    }
}
