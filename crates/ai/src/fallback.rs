//! Canned content used whenever the text vendor fails or returns junk.

/// Dialog lines used when generation fails.
pub const FALLBACK_DIALOGS: [&str; 5] = [
    "Nice to meet you! Let's make this journey a memorable one.",
    "I've been waiting for someone like you.",
    "Stay close. Things get interesting from here.",
    "Every adventure starts with a single step.",
    "Don't worry, I've got your back.",
];

pub fn fallback_dialogs() -> Vec<String> {
    FALLBACK_DIALOGS.iter().map(|line| line.to_string()).collect()
}

/// A generic bio naming the character (and series, when known).
pub fn fallback_bio(name: &str, series: Option<&str>) -> String {
    match series {
        Some(series) => format!(
            "{name} is a mysterious figure from {series}. Little is known about their past, \
             but their determination is unmistakable."
        ),
        None => format!(
            "{name} is a mysterious wanderer. Little is known about their past, \
             but their determination is unmistakable."
        ),
    }
}
