use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use pierogi::interpreter::{
    evaluator::core::{Config, Context, MAX_CALL_DEPTH},
    io::ConsoleIo,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const PROMPT: &str = "pierogi>";

/// pierogi is a small scripting language with closures, lists and strings.
///
/// Without CONTENTS an interactive session is started; type `exit` to leave
/// it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pierogi to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode is a feature that automatically prints out the value of the
    /// last top-level expression of a script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Nested function calls allowed before a stack overflow is reported.
    #[arg(long, default_value_t = MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Seed for the `random` builtin.
    #[arg(long)]
    seed: Option<u64>,

    contents: Option<String>,
}

/// Installs a stderr log subscriber, only if `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = Config { max_call_depth: args.max_depth,
                          seed:           args.seed, };
    let mut context = Context::with_config(config, ConsoleIo);

    let Some(contents) = args.contents else {
        return repl(&mut context);
    };

    let script = if args.file {
        match fs::read_to_string(&contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{contents}': {e}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents
    };

    match context.run(&script) {
        Some(values) => {
            if args.pipe_mode
               && let Some(last) = values.last()
            {
                println!("{last}");
            }
            ExitCode::SUCCESS
        },
        None => ExitCode::FAILURE,
    }
}

/// Reads lines until `exit` or end of input, printing every value.
///
/// Each line is its own source unit; definitions persist across lines.
fn repl(context: &mut Context) -> ExitCode {
    let stdin = io::stdin();

    loop {
        print!("{PROMPT}");
        if let Err(e) = io::stdout().flush() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }

        // The lock is released between lines so `input()` can read too.
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {},
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        }

        if line.trim() == "exit" {
            return ExitCode::SUCCESS;
        }

        for value in context.run(&line).unwrap_or_default() {
            println!("{value}");
        }
    }
}
