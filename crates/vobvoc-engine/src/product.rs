//! Per-product grouping, issue buckets, and the single-product report.

use std::collections::BTreeMap;

use serde::Serialize;
use vobvoc_core::{action_for_label, localized_label, GapType, Review};

use crate::gaps::{tally, GapDistribution};
use crate::score::{percent, score_reviews, Score};

/// Maximum number of issue buckets reported per product.
pub const ISSUE_BUCKET_LIMIT: usize = 3;
/// Representative review texts attached to each issue bucket.
pub const ISSUE_SAMPLE_SIZE: usize = 3;

/// The reviews of one product, in collection order.
#[derive(Debug, Clone)]
pub struct ProductGroup<'a> {
    pub name: &'a str,
    pub reviews: Vec<&'a Review>,
}

impl<'a> ProductGroup<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        score_reviews(self.reviews.iter().copied())
    }

    /// Reviews not labelled No Gap, including rows with no gap label.
    pub fn gap_reviews(&self) -> impl Iterator<Item = &'a Review> + '_ {
        self.reviews.iter().copied().filter(|r| r.is_gap())
    }

    /// First non-blank brand promise carried by the group's rows.
    #[must_use]
    pub fn vob_text(&self) -> Option<&'a str> {
        self.reviews
            .iter()
            .filter_map(|r| r.vob_text.as_deref())
            .find(|text| !text.trim().is_empty())
    }
}

/// Partition reviews by product name, ordered by name.
///
/// Accepts a whole collection or an already filtered selection.
#[must_use]
pub fn group_by_product<'a, I>(reviews: I) -> Vec<ProductGroup<'a>>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a Review>> = BTreeMap::new();
    for review in reviews {
        groups
            .entry(review.product_name.as_str())
            .or_default()
            .push(review);
    }
    groups
        .into_iter()
        .map(|(name, reviews)| ProductGroup { name, reviews })
        .collect()
}

/// One frequent issue among a product's gap reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueBucket {
    /// Issue detail text, or the gap label when the detail is missing.
    pub label: String,
    /// Gap type of the first review in the bucket.
    pub gap_type: Option<GapType>,
    pub localized_gap: String,
    pub count: usize,
    /// Share of the product's gap reviews, in percent.
    pub share: u8,
    /// First review texts in collection order.
    pub samples: Vec<String>,
    pub action: &'static str,
}

/// Most frequent issues among `reviews`' gap rows.
///
/// Buckets are ordered by count descending, ties by first appearance. Gap
/// rows with neither an issue detail nor a gap label join no bucket but
/// still count toward the share denominator.
#[must_use]
pub fn top_issues(reviews: &[&Review], limit: usize, sample_size: usize) -> Vec<IssueBucket> {
    let gap_rows: Vec<&Review> = reviews.iter().copied().filter(|r| r.is_gap()).collect();
    let total_gap = gap_rows.len();

    tally(gap_rows.iter().filter_map(|r| r.issue_key()))
        .into_iter()
        .take(limit)
        .map(|(label, count)| {
            let members: Vec<&Review> = gap_rows
                .iter()
                .copied()
                .filter(|r| r.issue_key() == Some(label))
                .collect();
            let gap_type = members.first().and_then(|r| r.gap_type.clone());
            let action = action_for_label(gap_type.as_ref().map_or("", GapType::label));
            IssueBucket {
                label: label.to_string(),
                localized_gap: localized_label(gap_type.as_ref()),
                gap_type,
                count,
                share: percent(count, total_gap),
                samples: members
                    .iter()
                    .take(sample_size)
                    .map(|r| r.review_text.trim().to_string())
                    .collect(),
                action,
            }
        })
        .collect()
}

/// Everything a presentation layer needs for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub product_name: String,
    /// Brand promise (VoB) for the product, if known.
    pub promise: Option<String>,
    pub score: Score,
    pub gap_distribution: GapDistribution,
    pub top_issues: Vec<IssueBucket>,
}

impl ProductReport {
    /// Build the report for `group`. An explicit `promise` wins over any
    /// promise text carried by the rows.
    #[must_use]
    pub fn build(group: &ProductGroup<'_>, promise: Option<&str>) -> Self {
        Self {
            product_name: group.name.to_string(),
            promise: promise.or_else(|| group.vob_text()).map(str::to_string),
            score: group.score(),
            gap_distribution: GapDistribution::from_reviews(group.reviews.iter().copied()),
            top_issues: top_issues(&group.reviews, ISSUE_BUCKET_LIMIT, ISSUE_SAMPLE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use vobvoc_core::Sentiment;

    use super::*;
    use crate::classifier::classify_reviews;

    fn classified(product: &str, texts: &[&str]) -> Vec<Review> {
        let mut reviews: Vec<Review> = texts.iter().map(|t| Review::new(product, *t)).collect();
        classify_reviews(&mut reviews);
        reviews
    }

    #[test]
    fn groups_are_sorted_by_name() {
        let mut reviews = classified("Serum", &["great"]);
        reviews.extend(classified("Cream", &["sticky", "late"]));
        let groups = group_by_product(&reviews);
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Cream", "Serum"]);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn groups_cover_only_the_selected_rows() {
        let mut reviews = classified("Serum", &["great", "sticky"]);
        reviews.extend(classified("Cream", &["late"]));
        let selected: Vec<&Review> = reviews.iter().filter(|r| r.is_gap()).collect();

        let groups = group_by_product(selected);
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Cream", "Serum"]);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1].reviews[0].review_text, "sticky");
    }

    #[test]
    fn top_issues_ranks_by_frequency_and_samples_in_order() {
        let reviews = classified(
            "Serum",
            &[
                "Shipping was slow",
                "Too sticky for me",
                "Courier lost the box",
                "Love it",
                "Still waiting for delivery",
                "Sticky residue",
            ],
        );
        let refs: Vec<&Review> = reviews.iter().collect();
        let issues = top_issues(&refs, 3, 2);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].label, "Delivery delay or shipping issue");
        assert_eq!(issues[0].count, 3);
        assert_eq!(issues[0].share, 60);
        assert_eq!(
            issues[0].samples,
            vec!["Shipping was slow".to_string(), "Courier lost the box".to_string()]
        );
        assert_eq!(issues[0].gap_type, Some(GapType::Delivery));
        assert!(issues[0].action.contains("리드타임"));
        assert_eq!(issues[1].count, 2);
        assert_eq!(issues[1].localized_gap, "제형·사용감 불일치 (Texture)");
    }

    #[test]
    fn top_issues_respects_limit() {
        let reviews = classified(
            "Serum",
            &["sticky", "late", "broken pump", "free gift missing", "meh"],
        );
        let refs: Vec<&Review> = reviews.iter().collect();
        assert_eq!(top_issues(&refs, 3, 3).len(), 3);
    }

    #[test]
    fn top_issues_empty_without_gap_rows() {
        let reviews = classified("Serum", &["great", "love it"]);
        let refs: Vec<&Review> = reviews.iter().collect();
        assert!(top_issues(&refs, 3, 3).is_empty());
    }

    #[test]
    fn issue_label_falls_back_to_gap_type() {
        let mut review = Review::new("Serum", "bad service");
        review.sentiment = Some(Sentiment::Negative);
        review.gap_type = Some(GapType::Service);
        let issues = top_issues(&[&review], 3, 3);
        assert_eq!(issues[0].label, "Service");
        assert!(issues[0].action.starts_with("CS"));
    }

    #[test]
    fn product_report_prefers_explicit_promise() {
        let mut reviews = classified("Serum", &["great", "sticky"]);
        reviews[1].vob_text = Some("Row promise".to_string());
        let groups = group_by_product(&reviews);

        let from_rows = ProductReport::build(&groups[0], None);
        assert_eq!(from_rows.promise.as_deref(), Some("Row promise"));
        assert_eq!(from_rows.score.value(), 50);
        assert_eq!(from_rows.gap_distribution.count(&GapType::Texture), 1);
        assert_eq!(from_rows.top_issues.len(), 1);

        let from_catalog = ProductReport::build(&groups[0], Some("Catalog promise"));
        assert_eq!(from_catalog.promise.as_deref(), Some("Catalog promise"));
    }
}
