use clap::{Parser as ClapParser, Subcommand};
use objcomp::cli::{self, CliError, EvalOptions, EvalOutcome};
use std::io::{self, Read};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(ClapParser)]
#[command(name = "objcomp")]
#[command(about = "objcomp - Build JSON objects from comprehension expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a comprehension
    Eval {
        /// The comprehension, with ${} marking each slot
        expression: String,

        /// JSON value for the next slot (repeatable)
        #[arg(short, long = "slot")]
        slots: Vec<String>,

        /// JSON source for the last slot (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Print null instead of failing
        #[arg(long)]
        safe: bool,
    },

    /// Show the grammar reference
    Grammar,
}

fn main() {
    // Respects RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            slots,
            input,
            pretty,
            safe,
        } => run_eval(expression, slots, input, pretty, safe),
        Commands::Grammar => {
            print!("{}", cli::get_grammar_reference());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(
    expression: String,
    slots: Vec<String>,
    input: Option<String>,
    pretty: bool,
    safe: bool,
) -> Result<(), CliError> {
    let mut options = EvalOptions {
        expression,
        slots,
        input,
        pretty,
        safe,
    };

    // Stdin is only read when a slot is still unfilled
    if options.input.is_none() && options.needs_input() && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.input = Some(buffer);
    }

    match cli::execute_eval(&options)? {
        EvalOutcome::Success(json) => println!("{}", json),
        EvalOutcome::NoResult => println!("null"),
    }
    Ok(())
}
