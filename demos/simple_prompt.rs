// Simple prompt that echoes each submitted line, with "remove" and "mkdir" completable

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use promptline::terminals::StdioTerminal;
use promptline::{Prompt, DEFAULT_PROMPT};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Line-editing prompt with history (Up/Down) and completion (Tab)")]
struct Args {
    /// Text printed before each line
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Text printed once at startup
    #[arg(long, default_value = "Simple prompt - Tab completes, Up/Down recalls, Ctrl+C quits")]
    welcome: String,

    /// Extra completion command (repeatable)
    #[arg(long = "command", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Write logs here; filtered by RUST_LOG (default "debug")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        match File::create(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
                )
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init(),
            Err(e) => {
                eprintln!("cannot open log file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let mut prompt = Prompt::builder()
        .prompt(args.prompt)
        .welcome(args.welcome)
        .commands(["remove", "mkdir"])
        .commands(args.commands)
        .on_submit(|line| println!("typed: {line}"))
        .build();

    let mut terminal = StdioTerminal::new();
    match prompt.start(&mut terminal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError reading input: {e}");
            ExitCode::FAILURE
        }
    }
}
