//! Caller-owned analysis session over one loaded review collection.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vobvoc_core::Review;

use crate::classifier::classify_reviews;
use crate::quality::{assess_reviews, QualityReport};

/// A generated reply kept for the review it was written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedReply {
    pub review_index: usize,
    pub text: String,
}

/// Loaded reviews plus the state derived from them.
///
/// The collection is written to exactly once, by [`ReviewSession::classify`].
/// Loading a different source replaces the collection and drops every piece
/// of derived state.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    id: Uuid,
    source_key: String,
    loaded_at: DateTime<Utc>,
    reviews: Vec<Review>,
    classified: bool,
    cached_reply: Option<CachedReply>,
}

impl ReviewSession {
    /// Start a session over `reviews`, fingerprinted by `source_key`.
    #[must_use]
    pub fn load(source_key: impl Into<String>, reviews: Vec<Review>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            source_key: source_key.into(),
            loaded_at: Utc::now(),
            classified: false,
            cached_reply: None,
            reviews,
        };
        tracing::info!(
            session_id = %session.id,
            rows = session.reviews.len(),
            "review session loaded"
        );
        session
    }

    /// Replace the collection when `source_key` differs from the current one.
    ///
    /// Returns `true` when the collection was replaced. Reloading the same
    /// source is a no-op that keeps classification and the cached reply.
    pub fn replace_source(&mut self, source_key: impl Into<String>, reviews: Vec<Review>) -> bool {
        let source_key = source_key.into();
        if source_key == self.source_key {
            tracing::debug!(session_id = %self.id, "same source reloaded; keeping session state");
            return false;
        }
        self.source_key = source_key;
        self.reviews = reviews;
        self.loaded_at = Utc::now();
        self.classified = false;
        self.cached_reply = None;
        tracing::info!(
            session_id = %self.id,
            rows = self.reviews.len(),
            "review session source replaced"
        );
        true
    }

    /// Classify the collection once.
    ///
    /// Skipped when a previous call already ran or when any loaded row
    /// already carries a gap label. Returns the number of rows written.
    pub fn classify(&mut self) -> usize {
        if self.classified {
            return 0;
        }
        self.classified = true;
        if self.reviews.iter().any(Review::is_classified) {
            tracing::debug!(session_id = %self.id, "pre-labelled data; classification skipped");
            return 0;
        }
        classify_reviews(&mut self.reviews)
    }

    #[must_use]
    pub fn quality(&self) -> QualityReport {
        assess_reviews(&self.reviews)
    }

    pub fn store_reply(&mut self, review_index: usize, text: impl Into<String>) {
        self.cached_reply = Some(CachedReply {
            review_index,
            text: text.into(),
        });
    }

    #[must_use]
    pub fn cached_reply(&self) -> Option<&CachedReply> {
        self.cached_reply.as_ref()
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.classified
    }
}
