//! cfn2rs
//!
//! Convert C function declarations to Rust FFI declarations.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser, ValueEnum};
use log::{info, warn};

use cfn2rs::backend::{ExternBlockRenderer, JsonRenderer, PlainRenderer, Render};
use cfn2rs::config::TypeMapConfig;
use cfn2rs::input::Input;
use cfn2rs::translate_with;

/// Convert C function declarations to Rust.
/// Use this tool to help in the creation of foreign function interfaces.
#[derive(Parser, Debug)]
#[command(name = "cfn2rs")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(group(ArgGroup::new("source").args(["declarations", "file", "stdin"])))]
#[command(after_help = "EXAMPLES:\n  \
    cfn2rs \"int foo(int x, const char *s)\"\n\n  \
    cfn2rs -f cfunctions.txt\n\n  \
    cat cfunctions.txt | cfn2rs -s")]
struct Cli {
    /// C function declarations
    #[arg(value_name = "DECLARATIONS")]
    declarations: Option<String>,

    /// Path to a file containing C functions
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read C functions from standard input
    #[arg(short, long)]
    stdin: bool,

    /// Print the corresponding C function next to each Rust function
    #[arg(short = 'c', long)]
    show_c: bool,

    /// Wrap the output in an `extern "C"` block (text format only)
    #[arg(long)]
    extern_block: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Extra type mapping C_TYPE=RUST_TYPE (repeatable)
    #[arg(short = 'm', long = "map", value_name = "C=RUST")]
    mappings: Vec<String>,

    /// JSON file mapping C type spellings to Rust types
    #[arg(long, value_name = "PATH")]
    types: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn input(&self) -> Option<Input> {
        if let Some(path) = &self.file {
            Some(Input::File(path.clone()))
        } else if let Some(text) = &self.declarations {
            Some(Input::Text(text.clone()))
        } else if self.stdin {
            Some(Input::Stdin)
        } else {
            None
        }
    }

    /// `--format json` has no room for the text-only flags
    fn check_conflicts(&self) -> Result<(), clap::Error> {
        if self.format != Format::Json {
            return Ok(());
        }
        let flag = if self.extern_block {
            "--extern-block"
        } else if self.show_c {
            "--show-c"
        } else {
            return Ok(());
        };
        Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            format!("the argument '{}' cannot be used with '--format json'", flag),
        ))
    }

    fn renderer(&self) -> Box<dyn Render> {
        match (self.format, self.extern_block) {
            (Format::Json, _) => Box::new(JsonRenderer),
            (Format::Text, true) => Box::new(ExternBlockRenderer { show_c: self.show_c }),
            (Format::Text, false) => Box::new(PlainRenderer { show_c: self.show_c }),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = cli.check_conflicts() {
        e.exit();
    }

    let Some(input) = cli.input() else {
        let _ = Cli::command().print_help();
        process::exit(2);
    };

    if let Err(e) = run(&cli, &input) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, input: &Input) -> anyhow::Result<()> {
    let type_map = TypeMapConfig {
        types_file: cli.types.clone(),
        mappings: cli.mappings.clone(),
    }
    .build()
    .context("could not build the type map")?;

    info!("reading declarations from {}", input.describe());
    let source = input.read()?;

    let translation = translate_with(&source, &type_map);
    if translation.is_empty() {
        warn!("no C function declarations found in {}", input.describe());
    } else {
        info!("translated {} declarations", translation.len());
    }

    let renderer = cli.renderer();
    let output = renderer
        .render(&translation)
        .with_context(|| format!("could not render {} output", renderer.name()))?;
    print!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_inputs_are_exclusive() {
        let cases: [&[&str]; 3] = [
            &["cfn2rs", "int f()", "-s"],
            &["cfn2rs", "int f()", "-f", "a.h"],
            &["cfn2rs", "-s", "--file=a.h"],
        ];
        for args in cases {
            let err = Cli::try_parse_from(args.iter().copied()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{:?}", args);
        }
    }

    #[test]
    fn test_no_input() {
        assert_eq!(parse(&["cfn2rs"]).input(), None);
        assert_eq!(parse(&["cfn2rs", "-c", "--format", "text"]).input(), None);
    }

    #[test]
    fn test_input_sources() {
        assert_eq!(
            parse(&["cfn2rs", "int f()"]).input(),
            Some(Input::Text("int f()".to_string()))
        );
        assert_eq!(
            parse(&["cfn2rs", "-f", "decls.h"]).input(),
            Some(Input::File(PathBuf::from("decls.h")))
        );
        assert_eq!(parse(&["cfn2rs", "--stdin"]).input(), Some(Input::Stdin));
    }

    #[test]
    fn test_renderer_selection() {
        assert_eq!(parse(&["cfn2rs", "int f()"]).renderer().name(), "text");
        assert_eq!(parse(&["cfn2rs", "-c", "int f()"]).renderer().name(), "text");
        assert_eq!(parse(&["cfn2rs", "--extern-block", "int f()"]).renderer().name(), "extern");
        assert_eq!(parse(&["cfn2rs", "--format", "json", "int f()"]).renderer().name(), "json");
    }

    #[test]
    fn test_json_rejects_text_flags() {
        assert!(parse(&["cfn2rs", "--format", "json", "int f()"]).check_conflicts().is_ok());
        assert!(parse(&["cfn2rs", "--extern-block", "-c", "int f()"]).check_conflicts().is_ok());

        for flag in ["--extern-block", "-c"] {
            let err = parse(&["cfn2rs", "--format", "json", flag, "int f()"])
                .check_conflicts()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        }
    }
}
