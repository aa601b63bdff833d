// holeyc: parse a HoleyC source file and write its canonical rendering

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{info, Level};

use holeyc::{dump, parse_source, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Canonical, fully parenthesized source
    Unparse,
    /// Position-free structural dump of the tree
    Ast,
}

#[derive(Debug, Parser)]
#[command(name = "holeyc")]
#[command(about = "Parse a HoleyC program and print it back in canonical form")]
struct Args {
    /// Path to the HoleyC source file
    input: PathBuf,

    /// Write the output here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to write for a successfully parsed program
    #[arg(long, value_enum, default_value_t = Emit::Unparse)]
    emit: Emit,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(args.verbose))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let path = args.input.display();

    let source = fs::read_to_string(&args.input)
        .map_err(|e| format!("{}: cannot read file: {}", path, e))?;

    info!(input = %path, bytes = source.len(), "parsing");
    let program = parse_source(&source).map_err(|err| {
        err.to_string()
            .lines()
            .map(|line| format!("{}: {}", path, line))
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    info!(declarations = program.decls.len(), "parsed");

    let text = match args.emit {
        Emit::Unparse => render(&program, 0),
        Emit::Ast => dump(&program) + "\n",
    };

    match &args.output {
        Some(output) => fs::write(output, text)
            .map_err(|e| format!("{}: cannot write file: {}", output.display(), e)),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| format!("cannot write to standard output: {}", e)),
    }
}
