//! Terminal rendering.

use chatrelay_types::{ModelsResponse, Provider};
use colored::Colorize;

use crate::transcript::{ChatMessage, ChatRole, Transcript};

pub fn render_message(message: &ChatMessage) -> String {
    let label = match message.role {
        ChatRole::User => "you".bold().cyan(),
        ChatRole::Assistant => "assistant".bold().green(),
    };
    format!("{label}: {}", message.content)
}

/// Every entry, oldest first. An empty transcript renders as an empty string.
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .messages()
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Catalog listing with the active selection marked.
pub fn render_catalog(catalog: &ModelsResponse, provider: Provider, model: &str) -> String {
    let mut out = Vec::new();
    for p in Provider::ALL {
        out.push(format!("{}:", p.display_name()).bold().to_string());
        for m in catalog.models(p) {
            let marker = if p == provider && m == model { "*" } else { " " };
            out.push(format!(" {marker} {m}"));
        }
    }
    out.join("\n")
}

pub fn render_status(provider: Provider, model: &str) -> String {
    format!("{} / {}", provider.display_name(), model)
        .dimmed()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn messages_are_labelled_by_role() {
        plain();
        let mut transcript = Transcript::new();
        transcript.push(ChatRole::User, "Hi");
        transcript.push(ChatRole::Assistant, "Hello!");
        assert_eq!(render_transcript(&transcript), "you: Hi\n\nassistant: Hello!");
    }

    #[test]
    fn cleared_transcript_renders_nothing() {
        plain();
        let mut transcript = Transcript::new();
        transcript.push(ChatRole::User, "Hi");
        transcript.clear();
        assert_eq!(render_transcript(&transcript), "");
    }

    #[test]
    fn catalog_marks_selection() {
        plain();
        let catalog = ModelsResponse {
            google: vec!["g1".to_string()],
            groq: vec!["q1".to_string(), "q2".to_string()],
        };
        let out = render_catalog(&catalog, Provider::Groq, "q2");
        assert_eq!(out, "Google:\n   g1\nGroq:\n   q1\n * q2");
    }
}
