//! Review file loading.
//!
//! Accepts a JSON array of rows or a YAML sequence of rows. Column names may
//! use the Korean or legacy spellings produced by the upstream review
//! exports; values are coerced leniently rather than rejected.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use vobvoc_core::{GapType, Review, Sentiment};

/// Supported review file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    pub(crate) fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => bail!(
                "unsupported review file '{}'; expected .json, .yaml, or .yml",
                path.display()
            ),
        }
    }
}

/// Reviews read from one file, with a fingerprint of its bytes.
#[derive(Debug)]
pub(crate) struct LoadedReviews {
    /// Lowercase hex SHA-256 of the file contents.
    pub source_key: String,
    pub reviews: Vec<Review>,
}

/// A cell that may arrive as text, a number, or a boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_rating(&self) -> Option<f64> {
        let value = match self {
            Self::Bool(_) => None,
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct RawReviewRow {
    #[serde(default, alias = "상품명", alias = "product")]
    product_name: Option<Scalar>,
    #[serde(default, alias = "리뷰", alias = "review_text_original")]
    review_text: Option<Scalar>,
    #[serde(default, alias = "별점")]
    rating: Option<Scalar>,
    #[serde(default, alias = "국가")]
    country: Option<Scalar>,
    #[serde(default)]
    channel: Option<Scalar>,
    #[serde(default, alias = "피부타입")]
    skin_type: Option<Scalar>,
    #[serde(default, alias = "VoB")]
    vob_text: Option<Scalar>,
    #[serde(default)]
    sentiment: Option<Scalar>,
    #[serde(default)]
    gap_type: Option<Scalar>,
    #[serde(default, alias = "gap_detail")]
    issue_detail: Option<Scalar>,
    #[serde(default)]
    recommended_copy: Option<Scalar>,
}

fn text(cell: Option<Scalar>) -> Option<String> {
    cell.map(Scalar::into_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RawReviewRow {
    fn into_review(self) -> Review {
        let review_text = self
            .review_text
            .map(Scalar::into_text)
            .unwrap_or_default();
        let mut review = Review::new(text(self.product_name).unwrap_or_default(), review_text);
        review.rating = self.rating.as_ref().and_then(Scalar::as_rating);
        review.country = text(self.country);
        review.channel = text(self.channel);
        review.skin_type = text(self.skin_type);
        review.vob_text = text(self.vob_text);
        review.sentiment = text(self.sentiment).and_then(|s| Sentiment::parse(&s));
        review.gap_type = text(self.gap_type).and_then(|s| GapType::parse(&s));
        review.issue_detail = text(self.issue_detail);
        review.recommended_copy = text(self.recommended_copy);
        review
    }
}

/// Decode review rows from raw file bytes.
pub(crate) fn parse_reviews(bytes: &[u8], format: InputFormat) -> anyhow::Result<Vec<Review>> {
    let rows: Vec<RawReviewRow> = match format {
        InputFormat::Json => {
            serde_json::from_slice(bytes).context("failed to parse review JSON")?
        }
        InputFormat::Yaml => {
            serde_yaml::from_slice(bytes).context("failed to parse review YAML")?
        }
    };
    Ok(rows.into_iter().map(RawReviewRow::into_review).collect())
}

/// Lowercase hex SHA-256 of `bytes`.
pub(crate) fn source_key(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Read and decode a review file.
pub(crate) fn load_reviews(path: &Path) -> anyhow::Result<LoadedReviews> {
    let format = InputFormat::from_path(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let reviews = parse_reviews(&bytes, format)
        .with_context(|| format!("failed to load reviews from {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = reviews.len(), "reviews loaded");
    Ok(LoadedReviews {
        source_key: source_key(&bytes),
        reviews,
    })
}
