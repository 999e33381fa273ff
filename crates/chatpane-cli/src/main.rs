//! chatpane CLI: terminal chat client for a `/chat` endpoint

mod logging;

use chatpane_engine::{ChatController, Config, HttpTransport, MessageLog, TextField};
use clap::{Parser, Subcommand};
use logging::LogTarget;
use std::path::PathBuf;

/// Minimal chat client: type a message, see the reply
#[derive(Parser)]
#[command(name = "chatpane")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the chat server (overrides config and CHATPANE_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat page (default when no command specified)
    Tui,

    /// Send one message and print the exchange
    Send {
        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let target = cli
                .log_file
                .as_deref()
                .map_or(LogTarget::Discard, LogTarget::File);
            init_logging(target);

            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(chatpane_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { text }) => {
            let target = cli
                .log_file
                .as_deref()
                .map_or(LogTarget::Stderr, LogTarget::File);
            init_logging(target);
            cmd_send(&config, &text.join(" "));
        }
        Some(Commands::Config { json }) => {
            cmd_config(&config, json);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, chatpane_engine::ConfigError> {
    let config = Config::resolve(cli.config.as_deref())?.with_endpoint(cli.endpoint.as_deref());
    // Fail early on a bad endpoint rather than on the first send.
    config.chat_url()?;
    Ok(config)
}

fn init_logging(target: LogTarget<'_>) {
    if let Err(e) = logging::init(target) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }
}

fn cmd_send(config: &Config, text: &str) {
    let transport = match HttpTransport::from_config(config) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let controller = ChatController::new(transport);

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    for line in rt.block_on(exchange(&controller, text)) {
        println!("{line}");
    }
}

/// Send `text` and return the transcript as `Label: text` lines.
///
/// Blank input is ignored, so nothing is sent and no lines come back.
async fn exchange(controller: &ChatController, text: &str) -> Vec<String> {
    let mut input = TextField::new(text);
    let mut log = MessageLog::new();
    controller.send(&mut input, &mut log).await;

    log.messages()
        .iter()
        .map(|message| format!("{}: {}", message.sender.label(), message.text))
        .collect()
}

fn cmd_config(config: &Config, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(config).expect("failed to serialize")
        );
        return;
    }

    println!("Endpoint:  {}", config.endpoint);
    println!("Chat path: {}", config.chat_path);
    match config.chat_url() {
        Ok(url) => println!("Chat URL:  {url}"),
        Err(e) => println!("Chat URL:  {e}"),
    }
    println!("Tick rate: {}ms", config.tick_rate_ms);
}
