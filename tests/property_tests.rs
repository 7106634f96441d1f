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

//! Property-based tests for the C-flat compiler.
//!
//! These tests verify invariants that should hold for all inputs, using
//! proptest for random input generation.

use cflat::analyzer::{Annotations, Symbol, SymbolTable, SymbolTableError, Type};
use cflat::{compile, lexer, parser, Span};
use proptest::prelude::*;

// ============================================================================
// Lexer Property Tests
// ============================================================================

proptest! {
    /// Property: token spans are ordered, non-overlapping and in bounds.
    #[test]
    fn prop_lexer_spans_valid(source in "[a-z0-9_ +\\-*/=<>!&|;(){}.\\n]{0,200}") {
        if let Ok(tokens) = lexer::tokenize(&source) {
            let mut last_end = 0;
            for (token, span) in &tokens {
                prop_assert!(span.start < span.end, "Empty span for {:?}", token);
                prop_assert!(span.start >= last_end, "Overlapping span for {:?}", token);
                prop_assert!(span.end <= source.len());
                last_end = span.end;
            }
        }
    }

    /// Property: the lexer never panics on arbitrary input.
    #[test]
    fn prop_lexer_total(source in "\\PC{0,100}") {
        let _ = lexer::tokenize(&source);
    }

    /// Property: any digit string lexes to one literal, clamped on overflow.
    #[test]
    fn prop_int_literal_clamps(digits in "[1-9][0-9]{0,15}") {
        let (tokens, warnings) = lexer::tokenize_with_warnings(&digits).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        let expected = digits.parse::<i32>().unwrap_or(i32::MAX);
        prop_assert_eq!(&tokens[0].0, &cflat::Token::IntLiteral(expected));
        prop_assert_eq!(warnings.len(), usize::from(digits.parse::<i32>().is_err()));
    }
}

// ============================================================================
// Scope Stack Property Tests
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Push,
    Pop,
    Declare(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Push),
        Just(Op::Pop),
        (0u8..6).prop_map(Op::Declare),
    ]
}

proptest! {
    /// Property: the scope stack behaves like a stack of maps whose
    /// program scope can never be removed.
    #[test]
    fn prop_scope_stack_matches_model(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut annotations = Annotations::new();
        let mut table = SymbolTable::new();
        let mut model: Vec<Vec<(String, cflat::analyzer::SymbolId)>> = vec![Vec::new()];

        for op in ops {
            match op {
                Op::Push => {
                    table.add_scope();
                    model.push(Vec::new());
                }
                Op::Pop => {
                    let result = table.remove_scope();
                    if model.len() > 1 {
                        prop_assert!(result.is_ok());
                        model.pop();
                    } else {
                        prop_assert_eq!(result.unwrap_err(), SymbolTableError::EmptyScope);
                    }
                }
                Op::Declare(n) => {
                    let name = format!("v{}", n);
                    let id = annotations.add_symbol(Symbol::variable(&name, Type::Int, Span::default()));
                    let result = table.add_decl(&name, id);
                    match model.last_mut() {
                        None => prop_assert!(result.is_err()),
                        Some(scope) if scope.iter().any(|(k, _)| *k == name) => {
                            prop_assert!(result.is_err())
                        }
                        Some(scope) => {
                            prop_assert!(result.is_ok());
                            scope.push((name, id));
                        }
                    }
                }
            }

            prop_assert_eq!(table.scope_depth(), model.len());
            for n in 0..6u8 {
                let name = format!("v{}", n);
                let local = model
                    .last()
                    .and_then(|scope| scope.iter().find(|(k, _)| *k == name))
                    .map(|(_, id)| *id);
                let global = model
                    .iter()
                    .rev()
                    .find_map(|scope| scope.iter().find(|(k, _)| *k == name).map(|(_, id)| *id));
                prop_assert_eq!(table.lookup_local(&name), local);
                prop_assert_eq!(table.lookup_global(&name), global);
            }
        }
    }
}

// ============================================================================
// Pipeline Property Tests
// ============================================================================

fn arith_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i32..1000).prop_map(|n| n.to_string()),
        Just("x".to_string()),
        Just("y".to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")], inner)
            .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r))
    })
}

proptest! {
    /// Property: well-typed programs compile, deterministically.
    #[test]
    fn prop_valid_programs_compile(expr in arith_expr()) {
        let source = format!("int x; int y; void main() {{ x = {}; y = x; cout << y; }}", expr);
        let first = compile(&source);
        prop_assert!(first.is_ok(), "{}", source);
        let second = compile(&source).unwrap();
        prop_assert_eq!(first.unwrap().assembly, second.assembly);
    }

    /// Property: using an int as a condition yields exactly one error.
    #[test]
    fn prop_int_condition_single_error(expr in arith_expr()) {
        let source = format!("int x; int y; void main() {{ if ({}) {{ }} }}", expr);
        let diagnostics = compile(&source).unwrap_err();
        prop_assert_eq!(diagnostics.error_count(), 1);
    }

    /// Property: unparsing a parsed program is a fixpoint.
    #[test]
    fn prop_unparse_fixpoint(expr in arith_expr()) {
        let source = format!("int x; int y; void main() {{ x = {}; }}", expr);
        let tokens = lexer::tokenize(&source).unwrap();
        let once = parser::parse(&tokens).unwrap().to_string();
        let tokens = lexer::tokenize(&once).unwrap();
        let twice = parser::parse(&tokens).unwrap().to_string();
        prop_assert_eq!(once, twice);
    }
}
