//! Fitness-for-analysis checks on raw review text.

use std::collections::HashSet;

use serde::Serialize;
use vobvoc_core::Review;

/// Texts shorter than this many characters count as empty.
pub const EMPTY_TEXT_MIN_CHARS: usize = 5;
/// Upper bound (inclusive, percent) on the empty rate for a Good label.
pub const GOOD_EMPTY_RATE: f64 = 3.0;
/// Upper bound (inclusive, percent) on the duplicate rate for a Good label.
pub const GOOD_DUP_RATE: f64 = 5.0;
/// Upper bound (inclusive, percent) on the empty rate for Needs Attention.
pub const ATTENTION_EMPTY_RATE: f64 = 8.0;
/// Upper bound (inclusive, percent) on the duplicate rate for Needs Attention.
pub const ATTENTION_DUP_RATE: f64 = 12.0;

/// Three-level data quality label, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QualityLabel {
    Good,
    NeedsAttention,
    NeedsReview,
}

impl QualityLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
            Self::NeedsReview => "Needs Review",
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a review collection's text quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub empty_reviews: usize,
    /// Every occurrence of a text after its first.
    pub dup_reviews: usize,
    /// Mean character length, truncated.
    pub avg_len: usize,
    pub empty_rate: f64,
    pub dup_rate: f64,
    pub label: QualityLabel,
}

impl QualityReport {
    /// Returns `true` when the report was computed over zero rows. Such a
    /// report is labelled Good only because nothing contradicts it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Map empty and duplicate rates (percent) to a label. First band that
/// holds both limits wins.
#[must_use]
pub fn quality_label(empty_rate: f64, dup_rate: f64) -> QualityLabel {
    if empty_rate <= GOOD_EMPTY_RATE && dup_rate <= GOOD_DUP_RATE {
        QualityLabel::Good
    } else if empty_rate <= ATTENTION_EMPTY_RATE && dup_rate <= ATTENTION_DUP_RATE {
        QualityLabel::NeedsAttention
    } else {
        QualityLabel::NeedsReview
    }
}

/// Assess a sequence of review texts.
#[must_use]
pub fn assess_texts<'a, I>(texts: I) -> QualityReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows = 0_usize;
    let mut empty_reviews = 0_usize;
    let mut dup_reviews = 0_usize;
    let mut total_len = 0_usize;
    let mut seen = HashSet::new();

    for text in texts {
        rows += 1;
        let len = text.chars().count();
        total_len += len;
        if len < EMPTY_TEXT_MIN_CHARS {
            empty_reviews += 1;
        }
        if !seen.insert(text) {
            dup_reviews += 1;
        }
    }

    if rows == 0 {
        tracing::warn!("quality assessed over an empty collection; reporting Good by convention");
        return QualityReport {
            rows,
            empty_reviews,
            dup_reviews,
            avg_len: 0,
            empty_rate: 0.0,
            dup_rate: 0.0,
            label: QualityLabel::Good,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let (empty_rate, dup_rate) = {
        let denom = rows as f64;
        (
            empty_reviews as f64 / denom * 100.0,
            dup_reviews as f64 / denom * 100.0,
        )
    };

    QualityReport {
        rows,
        empty_reviews,
        dup_reviews,
        avg_len: total_len / rows,
        empty_rate,
        dup_rate,
        label: quality_label(empty_rate, dup_rate),
    }
}

/// Assess the review text of every row.
#[must_use]
pub fn assess_reviews(reviews: &[Review]) -> QualityReport {
    assess_texts(reviews.iter().map(|r| r.review_text.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_good_with_zero_rates() {
        let report = assess_texts(std::iter::empty());
        assert!(report.is_empty());
        assert_eq!(report.empty_rate, 0.0);
        assert_eq!(report.dup_rate, 0.0);
        assert_eq!(report.avg_len, 0);
        assert_eq!(report.label, QualityLabel::Good);
    }

    #[test]
    fn counts_empty_and_duplicate_texts() {
        let texts = ["ok", "", "Lovely serum", "Lovely serum", "Lovely serum"];
        let report = assess_texts(texts);
        assert_eq!(report.rows, 5);
        assert_eq!(report.empty_reviews, 2);
        assert_eq!(report.dup_reviews, 2);
        // (2 + 0 + 12 * 3) / 5 = 7.6, truncated
        assert_eq!(report.avg_len, 7);
        assert_eq!(report.empty_rate, 40.0);
        assert_eq!(report.label, QualityLabel::NeedsReview);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Four Hangul syllables are 12 bytes but still an empty (< 5 char) text.
        let report = assess_texts(["좋아요요"]);
        assert_eq!(report.empty_reviews, 1);
        assert_eq!(report.avg_len, 4);
    }

    #[test]
    fn clean_collection_is_good() {
        let texts: Vec<String> = (0..40).map(|i| format!("Review number {i}")).collect();
        let report = assess_texts(texts.iter().map(String::as_str));
        assert_eq!(report.empty_reviews, 0);
        assert_eq!(report.dup_reviews, 0);
        assert_eq!(report.label, QualityLabel::Good);
    }

    #[test]
    fn label_bands_are_inclusive() {
        assert_eq!(quality_label(3.0, 5.0), QualityLabel::Good);
        assert_eq!(quality_label(3.1, 5.0), QualityLabel::NeedsAttention);
        assert_eq!(quality_label(8.0, 12.0), QualityLabel::NeedsAttention);
        assert_eq!(quality_label(8.0, 12.1), QualityLabel::NeedsReview);
        assert_eq!(quality_label(0.0, 50.0), QualityLabel::NeedsReview);
    }

    #[test]
    fn label_never_improves_as_rates_grow() {
        let steps: Vec<f64> = (0..=30).map(|i| f64::from(i) * 0.5).collect();
        for &empty in &steps {
            for pair in steps.windows(2) {
                assert!(quality_label(empty, pair[0]) <= quality_label(empty, pair[1]));
                assert!(quality_label(pair[0], empty) <= quality_label(pair[1], empty));
            }
        }
    }

    #[test]
    fn assess_reviews_uses_review_text() {
        let reviews = vec![Review::new("A", "same text"), Review::new("B", "same text")];
        let report = assess_reviews(&reviews);
        assert_eq!(report.dup_reviews, 1);
        assert_eq!(report.dup_rate, 50.0);
    }
}
