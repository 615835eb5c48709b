mod cli;
mod error;
mod openai_client;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::cli::chat::dispatcher::{Dispatcher, DispatcherConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Query to send without entering the interactive loop
    #[arg(short, long)]
    input: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a chat session
    Chat {
        /// Query to send without entering the interactive loop
        #[arg(short, long)]
        input: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let (input, verbose) = match cli.command {
        Some(Commands::Chat { input, verbose }) => (input.or(cli.input), verbose || cli.verbose),
        None => (cli.input, cli.verbose),
    };

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting Trek Chat CLI");

    // The local-vs-remote route is decided here, once, for the whole run
    let dispatcher = Dispatcher::new(DispatcherConfig::from_env());

    let mut chat_context = ChatContext::new(Box::new(io::stdout()), input, true, dispatcher);
    chat_context.run().await
}
