use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pyfront::{Error, Token, parse_tokens, tokenize};

#[derive(Parser)]
#[command(name = "pyfront")]
#[command(about = "Tokenize and parse a small Python-like expression language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream, one token per line
    Tokens {
        /// Source file, or `-` for stdin
        input: String,
    },

    /// Parse and print the top-level statements
    Parse {
        /// Source file, or `-` for stdin
        input: String,

        /// Print the tokens before the AST
        #[arg(long)]
        show_tokens: bool,

        /// Print the AST with `{:#?}` instead of source form
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pyfront=warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            print_tokens(&tokenize(&source)?);
        }
        Commands::Parse { input, show_tokens, debug } => {
            let source = read_source(&input)?;
            let tokens = tokenize(&source)?;

            if show_tokens {
                println!("=== TOKENS ===");
                print_tokens(&tokens);
                println!("=== AST ===");
            }

            let program = parse_tokens(&tokens)?;
            tracing::info!(input, statements = program.statements.len(), "parsed");

            if debug {
                println!("{:#?}", program);
            } else {
                print!("{}", program);
            }
        }
    }

    Ok(())
}

fn read_source(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{:<12} {:<16} {}",
            token.kind.to_string(),
            format!("{:?}", token.text),
            token.position()
        );
    }
}
