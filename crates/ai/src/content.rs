//! Text content with graceful degradation.
//!
//! Every method here succeeds: vendor errors and unparseable replies are
//! logged and replaced with canned content, and the result says which
//! happened.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chat::TextGenerator;
use crate::extract::{extract_json_object, extract_string_list};
use crate::fallback::{fallback_bio, fallback_dialogs};
use crate::prompts::{bio_prompt, dialog_prompt, CharacterSubject, DIALOG_LINES};

/// Longest bio kept from a raw (non-JSON) reply.
pub const MAX_BIO_CHARS: usize = 600;

/// A generated value and whether it came from the fallback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated<T> {
    pub value: T,
    pub fallback: bool,
}

impl<T> Generated<T> {
    fn generated(value: T) -> Self {
        Self {
            value,
            fallback: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            fallback: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BioReply {
    bio: String,
}

#[derive(Clone)]
pub struct ContentService {
    text: Arc<dyn TextGenerator>,
}

impl ContentService {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    /// A short character bio.
    ///
    /// Prefers the `{"bio": ...}` object the prompt asks for, accepts a plain
    /// prose reply (truncated to [`MAX_BIO_CHARS`]), and falls back to a
    /// canned bio otherwise.
    pub async fn character_bio(&self, subject: &CharacterSubject) -> Generated<String> {
        let canned = || fallback_bio(&subject.name, subject.series.as_deref());

        let reply = match self.text.complete(&bio_prompt(subject)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, character = %subject.name, "Bio generation failed, using fallback");
                return Generated::fallback(canned());
            }
        };

        if let Some(parsed) = extract_json_object::<BioReply>(&reply) {
            let bio = parsed.bio.trim();
            if !bio.is_empty() {
                return Generated::generated(truncate_chars(bio, MAX_BIO_CHARS));
            }
        }

        let prose = reply.trim();
        if prose.is_empty() || prose.starts_with('{') || prose.starts_with('[') {
            tracing::warn!(character = %subject.name, "Bio reply was unusable, using fallback");
            return Generated::fallback(canned());
        }
        Generated::generated(truncate_chars(prose, MAX_BIO_CHARS))
    }

    /// Up to [`DIALOG_LINES`] greeting lines parsed from a JSON array.
    pub async fn character_dialogs(&self, subject: &CharacterSubject) -> Generated<Vec<String>> {
        match self.text.complete(&dialog_prompt(subject)).await {
            Ok(reply) => match extract_string_list(&reply) {
                Some(mut lines) => {
                    lines.truncate(DIALOG_LINES);
                    Generated::generated(lines)
                }
                None => {
                    tracing::warn!(character = %subject.name, "Dialog reply had no JSON array, using fallback");
                    Generated::fallback(fallback_dialogs())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, character = %subject.name, "Dialog generation failed, using fallback");
                Generated::fallback(fallback_dialogs())
            }
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatMessage, DisabledTextGenerator};
    use crate::fallback::FALLBACK_DIALOGS;
    use crate::AiError;
    use async_trait::async_trait;

    /// Replies with a fixed string.
    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, AiError> {
            Ok(self.0.to_string())
        }
    }

    fn service(reply: &'static str) -> ContentService {
        ContentService::new(Arc::new(Canned(reply)))
    }

    fn aria() -> CharacterSubject {
        CharacterSubject {
            series: Some("Starfall".into()),
            ..CharacterSubject::named("Aria")
        }
    }

    #[tokio::test]
    async fn bio_from_json_object() {
        let bio = service(r#"Here you go: {"bio": "Aria rides the storm."}"#)
            .character_bio(&aria())
            .await;
        assert_eq!(bio, Generated::generated("Aria rides the storm.".to_string()));
    }

    #[tokio::test]
    async fn bio_accepts_plain_prose() {
        let bio = service("Aria rides the storm.").character_bio(&aria()).await;
        assert!(!bio.fallback);
        assert_eq!(bio.value, "Aria rides the storm.");
    }

    #[tokio::test]
    async fn bio_falls_back_on_vendor_error() {
        let bio = ContentService::new(Arc::new(DisabledTextGenerator))
            .character_bio(&aria())
            .await;
        assert!(bio.fallback);
        assert!(bio.value.contains("Starfall"));
    }

    #[tokio::test]
    async fn dialogs_are_capped() {
        let dialogs = service(r#"["1", "2", "3", "4", "5", "6", "7"]"#)
            .character_dialogs(&aria())
            .await;
        assert!(!dialogs.fallback);
        assert_eq!(dialogs.value.len(), DIALOG_LINES);
    }

    #[tokio::test]
    async fn dialogs_fall_back_without_array() {
        let dialogs = service("I cannot do that.").character_dialogs(&aria()).await;
        assert!(dialogs.fallback);
        assert_eq!(dialogs.value[0], FALLBACK_DIALOGS[0]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
