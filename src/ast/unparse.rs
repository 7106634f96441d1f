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

//! Printing the tree back as C-flat source.
//!
//! Compound expressions are fully parenthesized, so the output re-parses to
//! the same tree shape. `Display` prints plain source; [`Program::annotated`]
//! additionally prints a text after every identifier, such as the type its
//! symbol resolved to.

use std::fmt::{self, Display, Formatter};

use super::{
    Body, Decl, DeclKind, Expr, ExprKind, FnDecl, Ident, Program, Stmt, StmtKind, StructDecl,
    TypeSpec, VarDecl,
};

const INDENT: usize = 4;

/// Supplies the text printed in parentheses after an identifier.
pub trait IdentAnnotator {
    /// The annotation of `ident`, or `None` to print the bare name.
    fn annotate(&self, ident: &Ident) -> Option<String>;
}

/// Prints every identifier bare.
struct Plain;

impl IdentAnnotator for Plain {
    fn annotate(&self, _ident: &Ident) -> Option<String> {
        None
    }
}

/// A program printed with annotated identifiers, see [`Program::annotated`].
pub struct AnnotatedProgram<'a> {
    program: &'a Program,
    annotator: &'a dyn IdentAnnotator,
}

impl Program {
    /// Print the program with `annotator`'s text after each identifier,
    /// as in `x(int) = f((int) -> int)(1);`.
    pub fn annotated<'a>(&'a self, annotator: &'a dyn IdentAnnotator) -> AnnotatedProgram<'a> {
        AnnotatedProgram {
            program: self,
            annotator,
        }
    }
}

impl Display for AnnotatedProgram<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, self.annotator).program(self.program)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).program(self)
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).decl(self)
    }
}

impl Display for VarDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).var_decl(self)
    }
}

impl Display for StructDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).struct_decl(self)
    }
}

impl Display for FnDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).fn_decl(self)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Unparser::new(f, &Plain).expr(self)
    }
}

/// Writes nodes to a formatter, annotating identifiers on the way.
struct Unparser<'f, 'w, 'a> {
    f: &'f mut Formatter<'w>,
    annotator: &'a dyn IdentAnnotator,
}

impl<'f, 'w, 'a> Unparser<'f, 'w, 'a> {
    fn new(f: &'f mut Formatter<'w>, annotator: &'a dyn IdentAnnotator) -> Self {
        Self { f, annotator }
    }

    fn indent(&mut self, indent: usize) -> fmt::Result {
        write!(self.f, "{:indent$}", "", indent = indent)
    }

    fn ident(&mut self, ident: &Ident) -> fmt::Result {
        write!(self.f, "{}", ident.name)?;
        match self.annotator.annotate(ident) {
            Some(text) => write!(self.f, "({})", text),
            None => Ok(()),
        }
    }

    fn type_spec(&mut self, ty: &TypeSpec) -> fmt::Result {
        match ty {
            TypeSpec::Struct(name) => {
                write!(self.f, "struct ")?;
                self.ident(name)
            }
            other => write!(self.f, "{}", other),
        }
    }

    fn program(&mut self, program: &Program) -> fmt::Result {
        for (i, decl) in program.decls.iter().enumerate() {
            if i > 0 && !matches!(decl.kind, DeclKind::Var(_)) {
                writeln!(self.f)?;
            }
            self.decl(decl)?;
        }
        Ok(())
    }

    fn decl(&mut self, decl: &Decl) -> fmt::Result {
        match &decl.kind {
            DeclKind::Var(var) => {
                self.var_decl(var)?;
                writeln!(self.f)
            }
            DeclKind::Fn(func) => self.fn_decl(func),
            DeclKind::Struct(def) => self.struct_decl(def),
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) -> fmt::Result {
        self.type_spec(&decl.ty)?;
        write!(self.f, " ")?;
        self.ident(&decl.name)?;
        write!(self.f, ";")
    }

    fn struct_decl(&mut self, def: &StructDecl) -> fmt::Result {
        write!(self.f, "struct ")?;
        self.ident(&def.name)?;
        writeln!(self.f, " {{")?;
        for field in &def.fields {
            self.indent(INDENT)?;
            self.var_decl(field)?;
            writeln!(self.f)?;
        }
        writeln!(self.f, "}};")
    }

    fn fn_decl(&mut self, func: &FnDecl) -> fmt::Result {
        self.type_spec(&func.return_type)?;
        write!(self.f, " ")?;
        self.ident(&func.name)?;
        write!(self.f, "(")?;
        for (i, formal) in func.formals.iter().enumerate() {
            if i > 0 {
                write!(self.f, ", ")?;
            }
            self.type_spec(&formal.ty)?;
            write!(self.f, " ")?;
            self.ident(&formal.name)?;
        }
        writeln!(self.f, ") {{")?;
        self.body(&func.body, INDENT)?;
        writeln!(self.f, "}}")
    }

    fn body(&mut self, body: &Body, indent: usize) -> fmt::Result {
        for decl in &body.decls {
            self.indent(indent)?;
            self.var_decl(decl)?;
            writeln!(self.f)?;
        }
        for stmt in &body.stmts {
            self.stmt(stmt, indent)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt, indent: usize) -> fmt::Result {
        self.indent(indent)?;
        match &stmt.kind {
            StmtKind::Assign(expr) => {
                match &expr.kind {
                    ExprKind::Assign { target, value } => {
                        self.expr(target)?;
                        write!(self.f, " = ")?;
                        self.expr(value)?;
                    }
                    _ => self.expr(expr)?,
                }
                writeln!(self.f, ";")
            }
            StmtKind::PostInc(loc) => {
                self.expr(loc)?;
                writeln!(self.f, "++;")
            }
            StmtKind::PostDec(loc) => {
                self.expr(loc)?;
                writeln!(self.f, "--;")
            }
            StmtKind::Read(loc) => {
                write!(self.f, "cin >> ")?;
                self.expr(loc)?;
                writeln!(self.f, ";")
            }
            StmtKind::Write(value) => {
                write!(self.f, "cout << ")?;
                self.expr(value)?;
                writeln!(self.f, ";")
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                write!(self.f, "if (")?;
                self.expr(cond)?;
                writeln!(self.f, ") {{")?;
                self.body(then_body, indent + INDENT)?;
                self.indent(indent)?;
                write!(self.f, "}}")?;
                if let Some(else_body) = else_body {
                    writeln!(self.f)?;
                    self.indent(indent)?;
                    writeln!(self.f, "else {{")?;
                    self.body(else_body, indent + INDENT)?;
                    self.indent(indent)?;
                    write!(self.f, "}}")?;
                }
                writeln!(self.f)
            }
            StmtKind::While { cond, body } => {
                write!(self.f, "while (")?;
                self.expr(cond)?;
                writeln!(self.f, ") {{")?;
                self.body(body, indent + INDENT)?;
                self.indent(indent)?;
                writeln!(self.f, "}}")
            }
            StmtKind::Call(call) => {
                self.expr(call)?;
                writeln!(self.f, ";")
            }
            StmtKind::Return(None) => writeln!(self.f, "return;"),
            StmtKind::Return(Some(value)) => {
                write!(self.f, "return ")?;
                self.expr(value)?;
                writeln!(self.f, ";")
            }
        }
    }

    fn expr(&mut self, expr: &Expr) -> fmt::Result {
        match &expr.kind {
            ExprKind::IntLiteral(value) => write!(self.f, "{}", value),
            ExprKind::StringLiteral(text) => write!(self.f, "\"{}\"", text),
            ExprKind::BoolLiteral(value) => write!(self.f, "{}", value),
            ExprKind::Id(ident) => self.ident(ident),
            ExprKind::Dot { base, field } => {
                self.expr(base)?;
                write!(self.f, ".")?;
                self.ident(field)
            }
            ExprKind::Assign { target, value } => {
                write!(self.f, "(")?;
                self.expr(target)?;
                write!(self.f, " = ")?;
                self.expr(value)?;
                write!(self.f, ")")
            }
            ExprKind::Call { callee, args } => {
                self.ident(callee)?;
                write!(self.f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(self.f, ", ")?;
                    }
                    self.expr(arg)?;
                }
                write!(self.f, ")")
            }
            ExprKind::Unary { op, operand } => {
                write!(self.f, "({}", op)?;
                self.expr(operand)?;
                write!(self.f, ")")
            }
            ExprKind::Binary { left, op, right } => {
                write!(self.f, "(")?;
                self.expr(left)?;
                write!(self.f, " {} ", op)?;
                self.expr(right)?;
                write!(self.f, ")")
            }
        }
    }
}
