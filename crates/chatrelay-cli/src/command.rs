//! Input line parsing.

use chatrelay_types::{Provider, UnknownProvider};

pub const HELP: &str = "\
Commands:
  /provider <google|groq>  switch provider (resets the model)
  /model <id>              switch model
  /models                  list models for every provider
  /clear                   clear the chat history
  /history                 show the chat history
  /help                    show this help
  /quit                    exit

Anything else is sent as a prompt.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Prompt(String),
    Provider(Provider),
    Model(String),
    Models,
    Clear,
    History,
    Help,
    Quit,
    /// Shown to the user; never sent to the relay.
    Invalid(String),
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Command> {
        if line.trim().is_empty() {
            return None;
        }
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Some(Command::Prompt(line.to_string()));
        };

        let mut parts = rest.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        let command = match (name, arg) {
            ("provider", Some(arg)) => match arg.parse::<Provider>() {
                Ok(provider) => Command::Provider(provider),
                Err(UnknownProvider(name)) => {
                    Command::Invalid(format!("unknown provider '{name}' (use google or groq)"))
                }
            },
            ("provider", None) => Command::Invalid("usage: /provider <google|groq>".to_string()),
            ("model", Some(arg)) => Command::Model(arg.to_string()),
            ("model", None) => Command::Invalid("usage: /model <id>".to_string()),
            ("models", _) => Command::Models,
            ("clear", _) => Command::Clear,
            ("history", _) => Command::History,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => Command::Invalid(format!("unknown command '/{other}' (try /help)")),
        };
        Some(command)
    }
}
