//! Lexical rule cascade mapping review text to sentiment and gap labels.
//!
//! Every rule table is evaluated top to bottom against the lowercased text;
//! the first table with a matching cue decides the outcome and the terminal
//! default applies when nothing matches. Cues are plain substrings, so
//! `"late"` also fires inside longer words.

use serde::Serialize;
use vobvoc_core::{GapType, Review, Sentiment};

/// Sentiment cue tables in priority order.
///
/// Positive cues short-circuit first, so a review mixing praise with a defect
/// report is still positive.
pub(crate) const SENTIMENT_RULES: &[(Sentiment, &[&str])] = &[
    (
        Sentiment::Positive,
        &["love", "great", "amazing", "perfect", "best", "holy grail"],
    ),
    (
        Sentiment::Negative,
        &["worst", "hate", "terrible", "waste", "awful"],
    ),
    (
        Sentiment::Negative,
        &["broken", "damaged", "wrong item", "fake", "not authentic"],
    ),
    (
        Sentiment::Negative,
        &["disappointed", "too harsh", "too drying", "breakout", "irritation"],
    ),
];

/// Gap cue tables in priority order, consulted only for non-positive reviews.
pub(crate) const GAP_RULES: &[(GapType, &[&str])] = &[
    (
        GapType::Texture,
        &["sticky", "oily", "greasy", "heavy", "drying", "too dry", "flaky", "harsh"],
    ),
    (
        GapType::Delivery,
        &["delivery", "shipping", "late", "wait", "courier"],
    ),
    (
        GapType::ProductQuality,
        &["broken", "damaged", "leaked", "pump", "cracked", "dented", "defective", "fake"],
    ),
    (
        GapType::Promotion,
        &["free gift", "freebie", "sample", "promo", "promotion"],
    ),
];

/// Outcome of classifying one review text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub gap_type: GapType,
    /// Canned issue description for `gap_type`.
    pub issue_detail: &'static str,
    /// Canned copy suggestion for `gap_type`.
    pub recommended_copy: &'static str,
}

impl Classification {
    /// Write the derived fields into `review`, replacing any previous values.
    pub fn apply_to(&self, review: &mut Review) {
        review.sentiment = Some(self.sentiment);
        review.gap_type = Some(self.gap_type.clone());
        review.issue_detail = Some(self.issue_detail.to_string());
        review.recommended_copy = Some(self.recommended_copy.to_string());
    }
}

/// Fixed `(issue_detail, recommended_copy)` pair for a gap type.
///
/// Types the classifier never emits share the Product Performance template.
#[must_use]
pub fn template_for(gap: &GapType) -> (&'static str, &'static str) {
    match gap {
        GapType::NoGap => ("Satisfied customer", "Thank you for your love!"),
        GapType::Texture => (
            "Unpleasant texture or drying feeling",
            "Lightweight, comfortable finish with clear usage tips.",
        ),
        GapType::Delivery => (
            "Delivery delay or shipping issue",
            "Improved tracking updates and clearer delivery timelines.",
        ),
        GapType::ProductQuality => (
            "Damaged/defective or authenticity concern",
            "Quality-checked packing and quick resolution via Shopee chat.",
        ),
        GapType::Promotion => (
            "Missing/unclear freebies or promotion",
            "Promo conditions are shown at checkout when successfully applied.",
        ),
        GapType::ProductPerformance
        | GapType::Suitability
        | GapType::Service
        | GapType::Other(_) => (
            "Performance did not meet expectation",
            "Clear expectations with usage guide for best results.",
        ),
    }
}

fn first_match<'a, T>(rules: &'a [(T, &[&str])], lower: &str) -> Option<&'a T> {
    rules
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
        .map(|(outcome, _)| outcome)
}

/// Classify sentiment alone. Text with no cue is neutral.
#[must_use]
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    first_match(SENTIMENT_RULES, &lower)
        .copied()
        .unwrap_or(Sentiment::Neutral)
}

/// Classify one review text.
///
/// Pure and deterministic: identical input always yields identical output,
/// and every input, including the empty string, maps to a defined result.
#[must_use]
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();
    let sentiment = first_match(SENTIMENT_RULES, &lower)
        .copied()
        .unwrap_or(Sentiment::Neutral);

    let gap_type = if sentiment == Sentiment::Positive {
        GapType::NoGap
    } else {
        first_match(GAP_RULES, &lower)
            .cloned()
            .unwrap_or(GapType::ProductPerformance)
    };

    let (issue_detail, recommended_copy) = template_for(&gap_type);
    Classification {
        sentiment,
        gap_type,
        issue_detail,
        recommended_copy,
    }
}

/// Classify every review in place and return how many were written.
pub fn classify_reviews(reviews: &mut [Review]) -> usize {
    let mut negatives = 0_usize;
    for review in reviews.iter_mut() {
        let result = classify(&review.review_text);
        if result.sentiment == Sentiment::Negative {
            negatives += 1;
        }
        result.apply_to(review);
    }
    tracing::debug!(
        classified = reviews.len(),
        negatives,
        "classification pass complete"
    );
    reviews.len()
}
