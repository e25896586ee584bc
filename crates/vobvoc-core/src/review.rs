use serde::{Deserialize, Serialize};

use crate::labels::GAP_LABEL_KEYS;

const NO_GAP_KEY: &str = "no gap";

/// Product name assigned to rows that arrive without one.
pub const DEFAULT_PRODUCT_NAME: &str = "Default Product";

/// Per-review sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse a free-form sentiment label.
    ///
    /// Matching is case-insensitive containment. The full words `positive`
    /// and `negative` win over the short forms `pos` and `neg`, so
    /// `"Negative (post-purchase)"` stays negative. Every other non-blank
    /// label is neutral. Blank input means the row carries no sentiment.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if is_blank_label(&lower) {
            return None;
        }
        if lower.contains("positive") {
            Some(Self::Positive)
        } else if lower.contains("negative") {
            Some(Self::Negative)
        } else if lower.contains("pos") {
            Some(Self::Positive)
        } else if lower.contains("neg") {
            Some(Self::Negative)
        } else {
            Some(Self::Neutral)
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorical mismatch between the brand promise and the customer experience.
///
/// `Other` keeps labels from pre-analyzed data that match no canonical key;
/// those rows still count as gaps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GapType {
    ProductPerformance,
    Texture,
    ProductQuality,
    Suitability,
    Service,
    Delivery,
    Promotion,
    NoGap,
    Other(String),
}

impl GapType {
    /// Parse a gap label by case-insensitive containment against the canonical
    /// keys, in table order. Any label containing `no gap` is [`Self::NoGap`]
    /// regardless of other keys in it. Aliases (`Usage`, `Logistics`,
    /// `Freebies`) fold into their canonical type. Returns `None` for blank
    /// labels.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let lower = trimmed.to_lowercase();
        if is_blank_label(&lower) {
            return None;
        }
        if lower.contains(NO_GAP_KEY) {
            return Some(Self::NoGap);
        }
        let matched = GAP_LABEL_KEYS
            .iter()
            .find(|(key, _)| lower.contains(&key.to_lowercase()))
            .map(|(_, gap)| gap.clone());
        Some(matched.unwrap_or_else(|| Self::Other(trimmed.to_string())))
    }

    /// Canonical English label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::ProductPerformance => "Product Performance",
            Self::Texture => "Texture",
            Self::ProductQuality => "Product Quality",
            Self::Suitability => "Suitability",
            Self::Service => "Service",
            Self::Delivery => "Delivery",
            Self::Promotion => "Promotion",
            Self::NoGap => "No Gap",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub fn is_no_gap(&self) -> bool {
        matches!(self, Self::NoGap)
    }
}

impl std::fmt::Display for GapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for GapType {
    fn from(label: String) -> Self {
        Self::parse(&label).unwrap_or(Self::Other(label))
    }
}

impl From<GapType> for String {
    fn from(gap: GapType) -> Self {
        gap.label().to_string()
    }
}

fn is_blank_label(lower: &str) -> bool {
    matches!(lower, "" | "nan" | "none" | "null")
}

/// One customer-submitted review, plus the fields derived by classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub product_name: String,
    pub review_text: String,
    /// Star rating, nominally 1–5.
    pub rating: Option<f64>,
    pub country: Option<String>,
    pub channel: Option<String>,
    pub skin_type: Option<String>,
    /// Brand promise text shipped with the row, if any.
    pub vob_text: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub gap_type: Option<GapType>,
    pub issue_detail: Option<String>,
    pub recommended_copy: Option<String>,
}

impl Review {
    /// Create an unclassified review with no optional metadata.
    ///
    /// A blank product name falls back to [`DEFAULT_PRODUCT_NAME`].
    #[must_use]
    pub fn new(product_name: impl Into<String>, review_text: impl Into<String>) -> Self {
        let product_name = product_name.into();
        let product_name = if product_name.trim().is_empty() {
            DEFAULT_PRODUCT_NAME.to_string()
        } else {
            product_name
        };
        Self {
            product_name,
            review_text: review_text.into(),
            rating: None,
            country: None,
            channel: None,
            skin_type: None,
            vob_text: None,
            sentiment: None,
            gap_type: None,
            issue_detail: None,
            recommended_copy: None,
        }
    }

    /// Returns `true` once a gap label has been assigned.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.gap_type.is_some()
    }

    /// Returns `true` unless the review is explicitly labelled No Gap.
    ///
    /// Rows without any gap label count as gaps, so they lower the score.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        !self.gap_type.as_ref().is_some_and(GapType::is_no_gap)
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.sentiment == Some(Sentiment::Positive)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.sentiment == Some(Sentiment::Negative)
    }

    /// Issue bucket key: the issue detail when present, otherwise the gap label.
    #[must_use]
    pub fn issue_key(&self) -> Option<&str> {
        self.issue_detail
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.gap_type.as_ref().map(GapType::label))
    }
}
