mod cli;

use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Mode};
use pascal_subset::{EvalError, calculate, execute};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let mode = Mode::from_args(&args);

    match &args.file {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            match run(mode, &source) {
                Ok(output) => println!("{}", output),
                Err(err) => {
                    eprintln!("error: {}", err);
                    process::exit(1);
                }
            }
        }
        None => repl(mode)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(mode: Mode, source: &str) -> Result<String, EvalError> {
    match mode {
        Mode::Program => execute(source).map(|variables| variables.to_string()),
        Mode::Expression => calculate(source).map(|value| value.to_string()),
    }
}

fn repl(mode: Mode) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", mode.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        match run(mode, text) {
            Ok(output) => println!("{}", output),
            Err(err) => println!("error: {}", err),
        }
    }

    Ok(())
}
