//! Customer reply drafting and Korean translation for VoB–VoC.
//!
//! Talks to an OpenAI-compatible chat completions endpoint. Without an API
//! key, or with mock mode forced, every call returns fixed canned text.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

mod retry;

pub use client::{ReplyClient, MOCK_REPLY, MOCK_TRANSLATION};
pub use error::ReplyError;
pub use types::{ChatMessage, Tone};
