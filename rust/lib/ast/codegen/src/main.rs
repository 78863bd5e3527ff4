//! `ast-codegen` - generate the slang AST headers.
//!
//! Usage:
//!   ast-codegen [--table <FILE>] [--grammar <baseline|bracketed>] <OUTPUT_DIR>
//!
//! Without `--table` the built-in slang table (Expr, Stmt) is used.
//! Exit status follows sysexits: 64 usage, 65 bad table, 66 unreadable
//! table, 70 generator failure, 73 output not writable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use slang_ast_codegen_lib::{
    default_table, write_files, Codegen, CppHeaderGenerator, Grammar, Table, TableError,
    WriteError,
};
use tracing::{error, info};

const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_SOFTWARE: u8 = 70;
const EX_CANTCREAT: u8 = 73;

#[derive(Parser, Debug)]
#[command(name = "ast-codegen", version)]
#[command(about = "Generate C++ AST node classes and visitors from a hierarchy table")]
struct Args {
    /// Output directory (must exist)
    output: PathBuf,

    /// Hierarchy table (JSON); defaults to the built-in slang table
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Shape grammar, overriding the table's (baseline, bracketed)
    #[arg(short, long)]
    grammar: Option<Grammar>,
}

enum Failure {
    Table(TableError),
    /// [`Codegen::generate`] is fallible; the C++ generator never fails on a
    /// parsed schema, so this only surfaces from other generators.
    Generate(anyhow::Error),
    Write(WriteError),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Table(TableError::Read { .. }) => EX_NOINPUT,
            Failure::Table(_) => EX_DATAERR,
            Failure::Generate(_) => EX_SOFTWARE,
            Failure::Write(_) => EX_CANTCREAT,
        }
    }
}

impl From<TableError> for Failure {
    fn from(e: TableError) -> Self {
        Failure::Table(e)
    }
}

impl From<WriteError> for Failure {
    fn from(e: WriteError) -> Self {
        Failure::Write(e)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EX_USAGE),
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            match &failure {
                Failure::Table(e) => error!("{}", e),
                Failure::Generate(e) => error!("{:#}", e),
                Failure::Write(e) => error!("{} in {}", e, args.output.display()),
            }
            ExitCode::from(failure.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), Failure> {
    let mut table = match &args.table {
        Some(path) => {
            info!("Reading table: {}", path.display());
            Table::load(path)?
        }
        None => default_table(),
    };
    if let Some(grammar) = args.grammar {
        table.grammar = grammar;
    }

    let schema = table.parse()?;

    let generator = CppHeaderGenerator;
    info!(
        "Generating {} {} file(s) ({} grammar)",
        schema.hierarchies.len(),
        generator.language(),
        table.grammar
    );
    let code = generator.generate(&schema).map_err(Failure::Generate)?;

    let written = write_files(&args.output, &code)?;
    info!("Done: {} file(s) in {}", written.len(), args.output.display());
    Ok(())
}
