//! Cross-product comparison: scores, risk ranking, issue map, action board.

use serde::Serialize;
use vobvoc_core::{action_for_label, localized_label, Review};

use crate::gaps::tally;
use crate::product::{group_by_product, ProductGroup};
use crate::score::{percent, Score};

/// Products listed on the action board.
pub const ACTION_BOARD_SIZE: usize = 3;
/// Representative reviews per action board entry.
pub const ACTION_SAMPLE_SIZE: usize = 2;

const GAP_RATE_WEIGHT: f64 = 0.6;
const INVERTED_SCORE_WEIGHT: f64 = 0.4;

/// Composite risk: `gap_rate * 0.6 + (100 - score) * 0.4`.
#[must_use]
pub fn risk_key(score: &Score) -> f64 {
    f64::from(score.gap_rate()) * GAP_RATE_WEIGHT
        + f64::from(100 - score.value()) * INVERTED_SCORE_WEIGHT
}

/// Score and risk for one product in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub score: Score,
    pub risk_key: f64,
}

/// One non-empty (product, gap) cell of the issue map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueMapCell {
    pub product_name: String,
    pub gap_label: String,
    pub count: usize,
}

/// The gap a risky product should address first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionFocus {
    /// Localized gap label.
    pub gap_label: String,
    pub count: usize,
    /// Share of all the product's reviews, in percent.
    pub share: u8,
    pub action: &'static str,
    pub samples: Vec<String>,
}

/// Action board row. `focus` is `None` when the product has no gap reviews,
/// meaning current messaging should simply be maintained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionBoardEntry {
    pub product_name: String,
    pub focus: Option<ActionFocus>,
}

/// Comparison across the selected products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    /// One summary per product, ordered by name.
    pub products: Vec<ProductSummary>,
    /// Product names by risk descending, ties by name.
    pub risk_ranking: Vec<String>,
    pub highest_gap_rate: Option<String>,
    pub lowest_score: Option<String>,
    /// Most frequent localized gap label across all gap reviews.
    pub dominant_gap: Option<String>,
    pub issue_map: Vec<IssueMapCell>,
    pub action_board: Vec<ActionBoardEntry>,
}

impl PortfolioReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Order summaries by risk descending, ties by product name ascending.
#[must_use]
pub fn rank_by_risk(products: &[ProductSummary]) -> Vec<&ProductSummary> {
    let mut ranked: Vec<&ProductSummary> = products.iter().collect();
    ranked.sort_by(|a, b| {
        b.risk_key
            .total_cmp(&a.risk_key)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    ranked
}

fn action_focus(group: &ProductGroup<'_>) -> Option<ActionFocus> {
    let gap_rows: Vec<&Review> = group.gap_reviews().collect();
    let labels = gap_rows.iter().map(|r| localized_label(r.gap_type.as_ref()));
    let (gap_label, count) = tally(labels).into_iter().next()?;
    let samples = gap_rows
        .iter()
        .take(ACTION_SAMPLE_SIZE)
        .map(|r| r.review_text.trim().to_string())
        .collect();
    Some(ActionFocus {
        action: action_for_label(&gap_label),
        share: percent(count, group.len()),
        gap_label,
        count,
        samples,
    })
}

/// Build the portfolio view.
///
/// When `selection` is given, only reviews of those product names take part;
/// an empty selection yields an empty report.
#[must_use]
pub fn build_portfolio(reviews: &[Review], selection: Option<&[String]>) -> PortfolioReport {
    let groups: Vec<ProductGroup<'_>> = group_by_product(reviews)
        .into_iter()
        .filter(|g| selection.is_none_or(|names| names.iter().any(|n| n == g.name)))
        .collect();

    let products: Vec<ProductSummary> = groups
        .iter()
        .map(|g| {
            let score = g.score();
            ProductSummary {
                product_name: g.name.to_string(),
                risk_key: risk_key(&score),
                score,
            }
        })
        .collect();

    let risk_ranking: Vec<String> = rank_by_risk(&products)
        .into_iter()
        .map(|p| p.product_name.clone())
        .collect();

    // `products` is name-ordered, so the first extreme wins ties by name.
    let highest_gap_rate = products
        .iter()
        .fold(None::<&ProductSummary>, |best, p| match best {
            Some(b) if b.score.gap_rate() >= p.score.gap_rate() => Some(b),
            _ => Some(p),
        })
        .map(|p| p.product_name.clone());
    let lowest_score = products
        .iter()
        .fold(None::<&ProductSummary>, |best, p| match best {
            Some(b) if b.score.value() <= p.score.value() => Some(b),
            _ => Some(p),
        })
        .map(|p| p.product_name.clone());

    let dominant_gap = tally(
        groups
            .iter()
            .flat_map(|g| g.gap_reviews())
            .map(|r| localized_label(r.gap_type.as_ref())),
    )
    .into_iter()
    .next()
    .map(|(label, _)| label);

    let mut issue_map = Vec::new();
    for group in &groups {
        let mut cells: Vec<(String, usize)> =
            tally(group.gap_reviews().map(|r| localized_label(r.gap_type.as_ref())));
        cells.sort_by(|a, b| a.0.cmp(&b.0));
        issue_map.extend(cells.into_iter().map(|(gap_label, count)| IssueMapCell {
            product_name: group.name.to_string(),
            gap_label,
            count,
        }));
    }

    let action_board = risk_ranking
        .iter()
        .take(ACTION_BOARD_SIZE)
        .filter_map(|name| groups.iter().find(|g| g.name == name.as_str()))
        .map(|group| ActionBoardEntry {
            product_name: group.name.to_string(),
            focus: action_focus(group),
        })
        .collect();

    tracing::debug!(
        products = products.len(),
        issue_cells = issue_map.len(),
        "portfolio built"
    );

    PortfolioReport {
        products,
        risk_ranking,
        highest_gap_rate,
        lowest_score,
        dominant_gap,
        issue_map,
        action_board,
    }
}

#[cfg(test)]
#[path = "portfolio_test.rs"]
mod tests;
