use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pascal_subset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for a small Pascal subset", long_about = None)]
pub struct Args {
    /// Program file to run. Starts an interactive prompt when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Treat each input as a bare arithmetic expression.
    #[arg(short, long = "expr")]
    pub expr: bool,

    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Program,
    Expression,
}

impl Mode {
    pub fn from_args(args: &Args) -> Self {
        if args.expr {
            Mode::Expression
        } else {
            Mode::Program
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Program => "pascal> ",
            Mode::Expression => "calc> ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_program_mode() {
        let args = Args::parse_from(["pascal_subset"]);
        assert_eq!(Mode::from_args(&args), Mode::Program);
        assert!(args.file.is_none());
    }

    #[test]
    fn test_expr_flag() {
        let args = Args::parse_from(["pascal_subset", "-e", "calc.txt"]);
        assert_eq!(Mode::from_args(&args), Mode::Expression);
        assert_eq!(args.file, Some(PathBuf::from("calc.txt")));
    }
}
