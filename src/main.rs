//! rapcode - flowchart translator and Rapcode interpreter
//!
//! This is the command-line interface: it converts a program between its
//! input format and one of the output targets, or runs it.

use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use rapcode::Error;
use rapcode::ast::{LineIndex, Program};
use rapcode::codegen::{
    CodeGenerator, Direction, DotBackend, JsonBackend, MermaidBackend, RapcodeBackend,
};
use rapcode::interpreter::Interpreter;
use rapcode::lexer::lex;
use rapcode::source::{self, SourceKind};

/// Output formats for `--to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Rapcode text
    Rapcode,
    /// Mermaid flowchart
    Mermaid,
    /// Graphviz DOT graph
    Dot,
    /// JSON form of the AST
    Ast,
}

/// Diagram layout for `--direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// Top to bottom
    Td,
    /// Left to right
    Lr,
}

/// rapcode - translate RAPTOR flowcharts and run Rapcode programs
#[derive(Parser, Debug)]
#[command(name = "rapcode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (.rap flowchart, .rapcode text or .json AST)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, required_unless_present_any = ["run", "tokens"])]
    to: Option<Target>,

    /// Output file, or '-' for stdout (default: <input>_converted.<ext>)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Execute the program
    #[arg(long)]
    run: bool,

    /// Only run the lexer and print tokens (for debugging)
    #[arg(long)]
    tokens: bool,

    /// Spaces per nesting level in Rapcode output
    #[arg(long, value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Layout direction of Mermaid output
    #[arg(long, value_enum, default_value = "td")]
    direction: Layout,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    // Read source file
    let text = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if let Err(err) = run(&args, &text) {
        report(&args.input, &text, &err);
        process::exit(1);
    }
}

fn run(args: &Args, text: &str) -> Result<(), Error> {
    let kind = SourceKind::from_path(&args.input).unwrap_or_else(|| {
        log::warn!(
            "unrecognized extension on '{}', reading it as Rapcode",
            args.input.display()
        );
        SourceKind::Rapcode
    });

    if args.tokens {
        print_tokens(&args.input, text, kind)?;
        return Ok(());
    }

    let loaded = source::load(text, kind)?;
    for warning in &loaded.warnings {
        let position = LineIndex::new(text).position(warning.offset);
        eprintln!("{}:{}: warning: {}", args.input.display(), position, warning);
    }
    log::info!(
        "loaded '{}' ({} top-level statements)",
        args.input.display(),
        loaded.program.body.len()
    );

    if let Some(target) = args.to {
        convert(args, &loaded.program, target)?;
    }

    if args.run {
        let mut interpreter = Interpreter::new().with_source(text);
        interpreter.run(&loaded.program)?;
    }

    Ok(())
}

fn convert(args: &Args, program: &Program, target: Target) -> Result<(), Error> {
    let backend: Box<dyn CodeGenerator> = match target {
        Target::Rapcode => Box::new(RapcodeBackend::new().with_indent(args.indent)),
        Target::Mermaid => Box::new(MermaidBackend::new().with_direction(match args.direction {
            Layout::Td => Direction::TopDown,
            Layout::Lr => Direction::LeftRight,
        })),
        Target::Dot => Box::new(DotBackend::new()),
        Target::Ast => Box::new(JsonBackend::new()),
    };
    let output = backend.generate(program)?;

    match &args.output {
        Some(path) if path.as_os_str() == "-" => {
            io::stdout().lock().write_all(output.code.as_bytes())?;
        }
        Some(path) => write_output(path, &output.code, &output.format)?,
        None => {
            let path = default_output_path(&args.input, &output.extension);
            write_output(&path, &output.code, &output.format)?;
        }
    }
    Ok(())
}

fn write_output(path: &Path, code: &str, format: &str) -> Result<(), Error> {
    fs::write(path, code)?;
    log::info!("wrote {} output to '{}'", format, path.display());
    Ok(())
}

/// `dir/name.rap` → `dir/name_converted.<extension>`.
fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_converted.{}", stem, extension))
}

fn print_tokens(input: &Path, text: &str, kind: SourceKind) -> Result<(), Error> {
    if kind != SourceKind::Rapcode {
        log::warn!("--tokens only applies to Rapcode text; lexing the file as-is");
    }

    println!("Tokens for {}:", input.display());
    println!("{:-<60}", "");

    for token in lex(text)? {
        println!(
            "{:4}..{:<4} {:20} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.text
        );
    }
    Ok(())
}

fn report(input: &Path, text: &str, err: &Error) {
    match err.offset() {
        Some(offset) => {
            let position = LineIndex::new(text).position(offset);
            eprintln!("{}:{}: error: {}", input.display(), position, err);
        }
        None => eprintln!("{}: error: {}", input.display(), err),
    }
}
