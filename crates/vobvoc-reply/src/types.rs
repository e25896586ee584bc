//! Reply tones and the chat completions wire format.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Voice used for a drafted customer reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Empathetic,
    FirmButPolite,
}

impl Tone {
    /// Tone name as written into the prompt.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Empathetic => "Empathetic",
            Self::FirmButPolite => "Firm but polite",
        }
    }

    /// Korean display label for the tone.
    #[must_use]
    pub fn localized(self) -> &'static str {
        match self {
            Self::Professional => "담백형",
            Self::Empathetic => "공감형",
            Self::FirmButPolite => "단호하지만 정중형",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    /// Accepts the English name (case-insensitive, with `-`/`_` as spaces),
    /// the short form `firm`, or the Korean label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "professional" => Ok(Self::Professional),
            "empathetic" => Ok(Self::Empathetic),
            "firm" | "firm but polite" | "firmbutpolite" => Ok(Self::FirmButPolite),
            _ => [Self::Professional, Self::Empathetic, Self::FirmButPolite]
                .into_iter()
                .find(|tone| tone.localized() == trimmed)
                .ok_or_else(|| {
                    format!("unknown tone '{s}' (expected professional, empathetic, or firm)")
                }),
        }
    }
}

/// One message of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if it has any.
    pub(crate) fn first_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_parses_english_and_korean_labels() {
        assert_eq!("Professional".parse::<Tone>(), Ok(Tone::Professional));
        assert_eq!("empathetic".parse::<Tone>(), Ok(Tone::Empathetic));
        assert_eq!("firm-but-polite".parse::<Tone>(), Ok(Tone::FirmButPolite));
        assert_eq!("firm".parse::<Tone>(), Ok(Tone::FirmButPolite));
        assert_eq!("공감형".parse::<Tone>(), Ok(Tone::Empathetic));
        assert_eq!("단호하지만 정중형".parse::<Tone>(), Ok(Tone::FirmButPolite));
        assert!("cheerful".parse::<Tone>().is_err());
    }

    #[test]
    fn tone_trims_korean_labels_and_explains_failures() {
        assert_eq!(" 담백형 ".parse::<Tone>(), Ok(Tone::Professional));
        let err = "친절형".parse::<Tone>().unwrap_err();
        assert!(err.contains("'친절형'"), "{err}");
        assert!(err.contains("professional, empathetic, or firm"), "{err}");
    }

    #[test]
    fn tone_prompt_names() {
        assert_eq!(Tone::FirmButPolite.to_string(), "Firm but polite");
        assert_eq!(Tone::default(), Tone::Professional);
    }

    #[test]
    fn first_text_trims_and_skips_blank() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Hello there.  " } }]
        }))
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Hello there."));

        let blank: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "content": "   " } }]
        }))
        .unwrap();
        assert!(blank.first_text().is_none());

        let none: ChatResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(none.first_text().is_none());
    }
}
