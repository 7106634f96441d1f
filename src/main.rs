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

//! C-flat Compiler CLI
//!
//! Compiles one C-flat source file into SPIM assembly.

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use cflat::codegen::CodegenOptions;
use cflat::error::render_pretty;
use cflat::{CompilationContext, Diagnostics};

/// cflatc - Compiler for the C-flat teaching language
#[derive(Parser, Debug)]
#[command(name = "cflatc")]
#[command(version)]
#[command(about = "A compiler for the C-flat teaching language targeting a MIPS-style stack machine")]
#[command(long_about = r#"
cflatc compiles a C-flat source file into MIPS assembly that runs on the
SPIM simulator.

Example usage:
  cflatc hello.cf              writes hello.s
  cflatc hello.cf -o out.s
  cflatc hello.cf --unparse    also prints the parsed program
  cflatc hello.cf --unparse-resolved
                               prints it with every identifier's type
"#)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Output file (defaults to the input with a .s extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the parsed program
    #[arg(long)]
    unparse: bool,

    /// Print the parsed program with the resolved type of every identifier
    #[arg(long)]
    unparse_resolved: bool,

    /// Render diagnostics with source snippets
    #[arg(long)]
    pretty: bool,

    /// Do not emit comments in the assembly
    #[arg(long)]
    no_comments: bool,
}

/// Failures of the driver itself.
#[derive(Debug, Error)]
enum CliError {
    #[error("Cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("compilation failed with {0} error(s)")]
    Compile(usize),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Compile(_) => ExitCode::from(1),
            CliError::ReadInput { .. } => ExitCode::from(3),
            CliError::WriteOutput { .. } => ExitCode::from(4),
        }
    }
}

fn main() -> ExitCode {
    // clap exits with code 2 on bad usage
    let cli = Cli::parse();

    if cli.verbose {
        if let Err(e) = TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ) {
            eprintln!("Warning: cannot enable verbose logging: {}", e);
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Compile(count)) => {
            log::debug!("{} error(s)", count);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = std::fs::read_to_string(&cli.input).map_err(|source| CliError::ReadInput {
        path: cli.input.clone(),
        source,
    })?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    let filename = cli
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    log::info!("compiling {} -> {}", cli.input.display(), output_path.display());

    let mut ctx = CompilationContext::new(source.as_str());
    let program = cflat::parse_source(&source, &mut ctx);
    if let Some(program) = &program {
        if cli.unparse {
            print!("{}", program);
        }
        if cli.unparse_resolved {
            print!("{}", cflat::unparse_resolved(program));
        }
    }

    let options = CodegenOptions {
        comments: !cli.no_comments,
    };
    let assembly = program.and_then(|program| cflat::compile_program(&program, &mut ctx, options));

    let diagnostics = ctx.into_diagnostics();
    report(&diagnostics, &source, filename, cli.pretty);

    let Some(assembly) = assembly else {
        return Err(CliError::Compile(diagnostics.error_count()));
    };

    std::fs::write(&output_path, assembly.to_string()).map_err(|source| {
        CliError::WriteOutput {
            path: output_path.clone(),
            source,
        }
    })?;

    if cli.verbose {
        println!("Generated {} lines of assembly", assembly.len());
    }
    println!("Compiled {} -> {}", filename, output_path.display());
    Ok(())
}

/// `<input>` with its extension replaced by `.s`.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("s")
}

/// Print every diagnostic to stderr.
fn report(diagnostics: &Diagnostics, source: &str, filename: &str, pretty: bool) {
    for diagnostic in diagnostics.iter() {
        if pretty {
            eprint!("{}", render_pretty(diagnostic, source, filename));
        } else {
            eprintln!("{}", diagnostic);
        }
    }
}
