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

//! Declaration parsing: variables, structs, functions and block bodies.

use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::Parser;
use crate::ast::{Body, Decl, DeclKind, FnDecl, Ident, StructDecl, TypeSpec, VarDecl};
use crate::error::{CompileError, ErrorCode, Span};
use crate::lexer::Token;

/// Extension trait for declaration parsing.
pub trait DeclarationParser {
    /// Parse one program-level declaration.
    fn parse_decl(&mut self) -> Result<Decl, CompileError>;

    /// Parse `int`, `bool`, `void` or `struct Name`.
    fn parse_type(&mut self) -> Result<TypeSpec, CompileError>;

    /// Parse `type name ;`.
    fn parse_var_decl(&mut self) -> Result<VarDecl, CompileError>;

    /// Parse `struct Name { fields } ;` after the leading `struct`.
    fn parse_struct_decl(&mut self, start: Span) -> Result<StructDecl, CompileError>;

    /// Parse the rest of a function after its return type and name.
    fn parse_fn_decl(
        &mut self,
        return_type: TypeSpec,
        name: Ident,
        start: Span,
    ) -> Result<FnDecl, CompileError>;

    /// Parse a single formal parameter.
    fn parse_formal(&mut self) -> Result<VarDecl, CompileError>;

    /// Parse `{ varDecl* stmt* }`.
    fn parse_body(&mut self) -> Result<Body, CompileError>;

    /// Check if the current token starts a variable declaration.
    fn at_var_decl(&self) -> bool;
}

impl<'a> DeclarationParser for Parser<'a> {
    fn parse_decl(&mut self) -> Result<Decl, CompileError> {
        let start = self.peek_span().unwrap_or_else(|| self.previous_span());

        let is_struct_def = self.check(&Token::Struct)
            && matches!(self.peek_ahead(1), Some(Token::Identifier(_)))
            && matches!(self.peek_ahead(2), Some(Token::LeftBrace));
        if is_struct_def {
            self.advance();
            let decl = self.parse_struct_decl(start)?;
            let span = decl.span.clone();
            return Ok(Decl::new(DeclKind::Struct(decl), span));
        }

        let ty = self.parse_type()?;
        let name = self.expect_identifier("Expected declaration name")?;

        if self.check(&Token::LeftParen) {
            if matches!(ty, TypeSpec::Struct(_)) {
                return Err(CompileError::new(
                    ErrorCode::ExpectedType,
                    "Functions must return int, bool or void",
                    start,
                ));
            }
            let decl = self.parse_fn_decl(ty, name, start)?;
            let span = decl.span.clone();
            return Ok(Decl::new(DeclKind::Fn(decl), span));
        }

        let end = self.expect(&Token::Semicolon, "Expected ';' after variable declaration")?;
        let span = start.merge(&end);
        Ok(Decl::new(DeclKind::Var(VarDecl { ty, name, span: span.clone() }), span))
    }

    fn parse_type(&mut self) -> Result<TypeSpec, CompileError> {
        match self.peek() {
            Some(Token::Int) => {
                self.advance();
                Ok(TypeSpec::Int)
            }
            Some(Token::Bool) => {
                self.advance();
                Ok(TypeSpec::Bool)
            }
            Some(Token::Void) => {
                self.advance();
                Ok(TypeSpec::Void)
            }
            Some(Token::Struct) => {
                self.advance();
                let name = self.expect_identifier("Expected struct name after 'struct'")?;
                Ok(TypeSpec::Struct(name))
            }
            Some(_) => Err(self.error(
                ErrorCode::ExpectedType,
                format!("Expected a type, found {}", self.peek().map_or(String::new(), |t| t.to_string())),
            )),
            None => Err(self.unexpected("Expected a type")),
        }
    }

    fn parse_var_decl(&mut self) -> Result<VarDecl, CompileError> {
        let start = self.peek_span().unwrap_or_else(|| self.previous_span());
        let ty = self.parse_type()?;
        let name = self.expect_identifier("Expected variable name")?;
        let end = self.expect(&Token::Semicolon, "Expected ';' after variable declaration")?;
        Ok(VarDecl {
            ty,
            name,
            span: start.merge(&end),
        })
    }

    fn parse_struct_decl(&mut self, start: Span) -> Result<StructDecl, CompileError> {
        let name = self.expect_identifier("Expected struct name")?;
        self.expect(&Token::LeftBrace, "Expected '{' after struct name")?;

        let mut fields = Vec::new();
        while self.at_var_decl() {
            fields.push(self.parse_var_decl()?);
        }
        if fields.is_empty() {
            return Err(self.error(
                ErrorCode::EmptyStructBody,
                "A struct must declare at least one field",
            ));
        }

        self.expect(&Token::RightBrace, "Expected '}' after struct fields")?;
        let end = self.expect(&Token::Semicolon, "Expected ';' after struct declaration")?;

        Ok(StructDecl {
            name,
            fields,
            span: start.merge(&end),
        })
    }

    fn parse_fn_decl(
        &mut self,
        return_type: TypeSpec,
        name: Ident,
        start: Span,
    ) -> Result<FnDecl, CompileError> {
        self.expect(&Token::LeftParen, "Expected '(' after function name")?;

        let mut formals = Vec::new();
        if !self.check(&Token::RightParen) {
            loop {
                formals.push(self.parse_formal()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RightParen, "Expected ')' after parameters")?;

        let body = self.parse_body()?;

        Ok(FnDecl {
            return_type,
            name,
            formals,
            body,
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_formal(&mut self) -> Result<VarDecl, CompileError> {
        let start = self.peek_span().unwrap_or_else(|| self.previous_span());
        let ty = match self.peek() {
            Some(t) if t.is_type_keyword() => self.parse_type()?,
            _ => {
                return Err(self.error(
                    ErrorCode::ExpectedType,
                    "Expected parameter type int, bool or void",
                ))
            }
        };
        let name = self.expect_identifier("Expected parameter name")?;
        Ok(VarDecl {
            ty,
            span: start.merge(&name.span),
            name,
        })
    }

    fn parse_body(&mut self) -> Result<Body, CompileError> {
        self.expect(&Token::LeftBrace, "Expected '{'")?;

        let mut decls = Vec::new();
        while self.at_var_decl() {
            decls.push(self.parse_var_decl()?);
        }

        let mut stmts = Vec::new();
        while !self.check(&Token::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected("Expected '}'"));
            }
            stmts.push(self.parse_statement()?);
        }
        self.expect(&Token::RightBrace, "Expected '}'")?;

        Ok(Body::new(decls, stmts))
    }

    fn at_var_decl(&self) -> bool {
        self.peek()
            .is_some_and(|t| t.is_type_keyword() || matches!(t, Token::Struct))
    }
}
