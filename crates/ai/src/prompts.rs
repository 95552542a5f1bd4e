//! Prompt construction for bios, dialog and artwork.

use crate::chat::ChatMessage;

/// Number of dialog lines requested per character.
pub const DIALOG_LINES: usize = 5;

/// What the model is told about a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSubject {
    pub name: String,
    pub series: Option<String>,
    pub universe: Option<String>,
    pub bio: Option<String>,
}

impl CharacterSubject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn describe(&self) -> String {
        let mut description = self.name.clone();
        if let Some(series) = &self.series {
            description.push_str(&format!(" from the series \"{series}\""));
        }
        if let Some(universe) = &self.universe {
            description.push_str(&format!(" (universe: {universe})"));
        }
        description
    }
}

const SYSTEM_PROMPT: &str = "You write flavour text for a character-collecting game. \
     Keep everything family-friendly and answer with JSON only.";

/// Ask for a short bio as `{"bio": "..."}`.
pub fn bio_prompt(subject: &CharacterSubject) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Write a two to three sentence character bio for {}. \
             Respond with a JSON object of the form {{\"bio\": \"...\"}}.",
            subject.describe()
        )),
    ]
}

/// Ask for [`DIALOG_LINES`] short lines as a JSON array of strings.
pub fn dialog_prompt(subject: &CharacterSubject) -> Vec<ChatMessage> {
    let mut request = format!(
        "Write {DIALOG_LINES} short lines of dialog that {} might say when greeting the player.",
        subject.describe()
    );
    if let Some(bio) = subject.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        request.push_str(&format!(" Their bio: {bio}"));
    }
    request.push_str(" Respond with a JSON array of strings and nothing else.");

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(request)]
}

/// Art prompt: the caller's description plus an optional style suffix.
pub fn art_prompt(description: &str, style: Option<&str>) -> String {
    match style.map(str::trim).filter(|s| !s.is_empty()) {
        Some(style) => format!("{}, {style} style, character portrait", description.trim()),
        None => format!("{}, character portrait", description.trim()),
    }
}
