//! chatrelay-chat - terminal chat front-end for the chatrelay service.

mod backend;
mod command;
mod render;
mod session;
mod transcript;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chatrelay::config::Config;
use chatrelay::dispatch::Dispatcher;
use chatrelay_client::RelayClient;
use chatrelay_types::{ModelsResponse, Provider};
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::backend::{ChatBackend, DirectBackend, RelayBackend};
use crate::command::{Command, HELP};
use crate::session::ChatSession;

#[derive(Parser)]
#[command(name = "chatrelay-chat", version, about = "Chat with hosted LLMs through chatrelay")]
struct Cli {
    /// Relay base URL
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Provider to start with
    #[arg(long, default_value = "google")]
    provider: Provider,

    /// Model to start with (defaults to the provider's first listed model)
    #[arg(long)]
    model: Option<String>,

    /// Call providers from this process instead of going through a relay
    #[arg(long)]
    direct: bool,

    /// Relay config used in --direct mode
    #[arg(long, default_value = "chatrelay.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let backend: Box<dyn ChatBackend> = if cli.direct {
        let config = Config::load(&cli.config)
            .await
            .with_context(|| format!("loading {}", cli.config.display()))?;
        let dispatcher = Dispatcher::from_config(&config, |name| std::env::var(name).ok());
        Box::new(DirectBackend::new(dispatcher))
    } else {
        let client = RelayClient::new(&cli.base_url)
            .with_context(|| format!("invalid relay url '{}'", cli.base_url))?;
        Box::new(RelayBackend::new(client))
    };

    let catalog = match backend.models().await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "Could not fetch models, using defaults");
            eprintln!("{} could not fetch models: {e}", "warning:".yellow().bold());
            ModelsResponse::fallback()
        }
    };

    let mut session = ChatSession::new(backend, catalog, cli.provider, cli.model);
    run(&mut session).await
}

async fn run(session: &mut ChatSession) -> anyhow::Result<()> {
    let mut line_editor = Reedline::create();

    println!("{}", "Multi-Model Chatbot".bold());
    println!("{}", render::render_status(session.provider(), session.model()));
    println!("{}", "Type /help for commands.".dimmed());

    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(session.provider().to_string()),
            DefaultPromptSegment::Empty,
        );

        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            Signal::CtrlD => break,
            _ => continue,
        };

        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Prompt(text) => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message("Thinking...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                let reply = session.submit(text).await;
                spinner.finish_and_clear();
                println!("{}\n", render::render_message(reply));
            }
            Command::Provider(provider) => {
                session.select_provider(provider);
                println!("{}", render::render_status(session.provider(), session.model()));
            }
            Command::Model(model) => {
                if !session.select_model(model) {
                    eprintln!(
                        "{} '{}' is not listed for {}; sending it anyway",
                        "warning:".yellow().bold(),
                        session.model(),
                        session.provider().display_name()
                    );
                }
                println!("{}", render::render_status(session.provider(), session.model()));
            }
            Command::Models => {
                println!(
                    "{}",
                    render::render_catalog(session.catalog(), session.provider(), session.model())
                );
            }
            Command::Clear => {
                session.clear();
                println!("{}", "Chat history cleared.".dimmed());
            }
            Command::History => {
                let transcript = session.transcript();
                if transcript.is_empty() {
                    println!("{}", "No messages yet.".dimmed());
                } else {
                    println!("{}\n", render::render_transcript(transcript));
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(message) => {
                eprintln!("{} {message}", "error:".red().bold());
            }
        }
    }

    Ok(())
}
