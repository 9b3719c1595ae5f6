use std::io;

use clap::Parser;
use mini_sqlite::{DEFAULT_PROMPT, Repl};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "mini-sqlite")]
#[command(about = "In-memory single-table database shell", long_about = None)]
struct Cli {
    /// Log verbosity, written to stderr (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Prompt printed before each command
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the shell transcript, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut repl = Repl::with_prompt(stdin, stdout, cli.prompt);
    repl.run()?;
    Ok(())
}
