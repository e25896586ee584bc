//! Review filtering and facet listing.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use vobvoc_core::Review;

/// Criteria for narrowing a review collection. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    pub country: Option<String>,
    pub channel: Option<String>,
    pub skin_type: Option<String>,
    /// Inclusive `(min, max)` rating bounds.
    pub rating_range: Option<(f64, f64)>,
    /// Literal, case-insensitive text query.
    pub query: Option<String>,
}

impl ReviewFilter {
    /// Returns the matching reviews in collection order.
    ///
    /// The rating range only applies when at least one review in `reviews`
    /// carries a rating; rows without a rating are then excluded.
    #[must_use]
    pub fn apply<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        let any_rating = reviews.iter().any(|r| r.rating.is_some());
        let rating_range = self.rating_range.filter(|_| any_rating);
        let query = self.query.as_deref().and_then(QueryMatcher::new);

        let matched: Vec<&Review> = reviews
            .iter()
            .filter(|r| field_matches(self.country.as_deref(), r.country.as_deref()))
            .filter(|r| field_matches(self.channel.as_deref(), r.channel.as_deref()))
            .filter(|r| field_matches(self.skin_type.as_deref(), r.skin_type.as_deref()))
            .filter(|r| {
                rating_range.is_none_or(|(min, max)| {
                    r.rating.is_some_and(|rating| rating >= min && rating <= max)
                })
            })
            .filter(|r| query.as_ref().is_none_or(|q| q.matches_review(r)))
            .collect();

        tracing::debug!(
            input = reviews.len(),
            matched = matched.len(),
            "reviews filtered"
        );
        matched
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

/// Escaped, case-insensitive literal match.
enum QueryMatcher {
    Pattern(Regex),
    Lowercase(String),
}

impl QueryMatcher {
    /// `None` for a blank query, which matches everything.
    fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let matcher = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Self::Pattern(re),
            Err(e) => {
                // Escaped literals only fail on size limits.
                tracing::warn!(error = %e, "query pattern rejected; using plain containment");
                Self::Lowercase(query.to_lowercase())
            }
        };
        Some(matcher)
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(haystack),
            Self::Lowercase(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }

    fn matches_review(&self, review: &Review) -> bool {
        self.is_match(&review.review_text)
            || review
                .issue_detail
                .as_deref()
                .is_some_and(|s| self.is_match(s))
            || review
                .gap_type
                .as_ref()
                .is_some_and(|g| self.is_match(g.label()))
    }
}

/// Reviews whose gap is not No Gap, including rows with no gap label.
#[must_use]
pub fn gap_only<'a>(reviews: &[&'a Review]) -> Vec<&'a Review> {
    reviews.iter().copied().filter(|r| r.is_gap()).collect()
}

/// Distinct values available to filter on, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub countries: Vec<String>,
    pub channels: Vec<String>,
    pub skin_types: Vec<String>,
    pub products: Vec<String>,
}

impl Facets {
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        Self {
            countries: distinct(reviews.iter().map(|r| r.country.as_deref())),
            channels: distinct(reviews.iter().map(|r| r.channel.as_deref())),
            skin_types: distinct(reviews.iter().map(|r| r.skin_type.as_deref())),
            products: distinct(reviews.iter().map(|r| Some(r.product_name.as_str()))),
        }
    }
}

fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use vobvoc_core::GapType;

    use super::*;
    use crate::classifier::classify_reviews;

    fn review(country: &str, channel: &str, rating: Option<f64>, text: &str) -> Review {
        let mut r = Review::new("Serum", text);
        r.country = Some(country.to_string());
        r.channel = Some(channel.to_string());
        r.rating = rating;
        r
    }

    fn sample() -> Vec<Review> {
        let mut reviews = vec![
            review("SG", "Shopee", Some(5.0), "Love it"),
            review("MY", "Shopee", Some(2.0), "Too sticky"),
            review("SG", "Lazada", None, "Shipping was late (again)"),
            review("SG", "Shopee", Some(1.0), "Pump arrived broken"),
        ];
        classify_reviews(&mut reviews);
        reviews
    }

    fn texts<'a>(reviews: &[&'a Review]) -> Vec<&'a str> {
        reviews.iter().map(|r| r.review_text.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let reviews = sample();
        assert_eq!(ReviewFilter::default().apply(&reviews).len(), 4);
    }

    #[test]
    fn exact_match_on_country_and_channel() {
        let reviews = sample();
        let filter = ReviewFilter {
            country: Some("SG".to_string()),
            channel: Some("Shopee".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(
            texts(&filter.apply(&reviews)),
            vec!["Love it", "Pump arrived broken"]
        );
    }

    #[test]
    fn rating_range_excludes_unrated_rows() {
        let reviews = sample();
        let filter = ReviewFilter {
            rating_range: Some((1.0, 2.0)),
            ..ReviewFilter::default()
        };
        assert_eq!(
            texts(&filter.apply(&reviews)),
            vec!["Too sticky", "Pump arrived broken"]
        );
    }

    #[test]
    fn rating_range_ignored_when_no_row_is_rated() {
        let reviews = vec![review("SG", "Shopee", None, "fine")];
        let filter = ReviewFilter {
            rating_range: Some((4.0, 5.0)),
            ..ReviewFilter::default()
        };
        assert_eq!(filter.apply(&reviews).len(), 1);
    }

    #[test]
    fn query_is_literal_and_case_insensitive() {
        let reviews = sample();
        let filter = ReviewFilter {
            query: Some("LATE (AGAIN)".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(texts(&filter.apply(&reviews)), vec!["Shipping was late (again)"]);
    }

    #[test]
    fn query_matches_issue_detail_and_gap_label() {
        let reviews = sample();
        let by_gap = ReviewFilter {
            query: Some("texture".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(texts(&by_gap.apply(&reviews)), vec!["Too sticky"]);

        let by_issue = ReviewFilter {
            query: Some("damaged".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(texts(&by_issue.apply(&reviews)), vec!["Pump arrived broken"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let reviews = sample();
        let filter = ReviewFilter {
            query: Some("   ".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(filter.apply(&reviews).len(), 4);
    }

    #[test]
    fn gap_only_drops_no_gap_rows() {
        let reviews = sample();
        let all: Vec<&Review> = reviews.iter().collect();
        let gaps = gap_only(&all);
        assert_eq!(gaps.len(), 3);
        assert!(gaps.iter().all(|r| r.gap_type != Some(GapType::NoGap)));
    }

    #[test]
    fn facets_are_sorted_unique_and_non_blank() {
        let mut reviews = sample();
        reviews.push(review(" ", "Shopee", None, "blank country"));
        reviews.push(Review::new("Cream", "other product"));
        let facets = Facets::from_reviews(&reviews);
        assert_eq!(facets.countries, vec!["MY", "SG"]);
        assert_eq!(facets.channels, vec!["Lazada", "Shopee"]);
        assert!(facets.skin_types.is_empty());
        assert_eq!(facets.products, vec!["Cream", "Serum"]);
    }
}
