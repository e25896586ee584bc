use vobvoc_core::{GapType, Sentiment};

use super::*;

fn labelled(product: &str, text: &str, sentiment: Sentiment, gap: GapType) -> Review {
    let mut review = Review::new(product, text);
    review.sentiment = Some(sentiment);
    review.gap_type = Some(gap);
    review
}

fn repeat(
    out: &mut Vec<Review>,
    n: usize,
    product: &str,
    sentiment: Sentiment,
    gap: &GapType,
) {
    for i in 0..n {
        out.push(labelled(
            product,
            &format!("{product} {} review {i}", gap.label()),
            sentiment,
            gap.clone(),
        ));
    }
}

/// Product A: gap rate 80, score 30. Product B: gap rate 20, score 85.
fn two_product_portfolio() -> Vec<Review> {
    let mut reviews = Vec::new();
    repeat(&mut reviews, 2, "A", Sentiment::Positive, &GapType::NoGap);
    repeat(&mut reviews, 2, "A", Sentiment::Positive, &GapType::Texture);
    repeat(&mut reviews, 6, "A", Sentiment::Negative, &GapType::Texture);
    repeat(&mut reviews, 8, "B", Sentiment::Positive, &GapType::NoGap);
    repeat(&mut reviews, 1, "B", Sentiment::Positive, &GapType::Delivery);
    repeat(&mut reviews, 1, "B", Sentiment::Negative, &GapType::Delivery);
    reviews
}

#[test]
fn fixture_scores_match_expectations() {
    let report = build_portfolio(&two_product_portfolio(), None);
    let a = &report.products[0];
    let b = &report.products[1];
    assert_eq!((a.score.gap_rate(), a.score.value()), (80, 30));
    assert_eq!((b.score.gap_rate(), b.score.value()), (20, 85));
    assert!((a.risk_key - 76.0).abs() < 1e-9);
    assert!((b.risk_key - 18.0).abs() < 1e-9);
}

#[test]
fn riskier_product_ranks_first() {
    let report = build_portfolio(&two_product_portfolio(), None);
    assert_eq!(report.risk_ranking, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(report.highest_gap_rate.as_deref(), Some("A"));
    assert_eq!(report.lowest_score.as_deref(), Some("A"));
}

#[test]
fn equal_risk_is_broken_by_name() {
    let mut reviews = Vec::new();
    repeat(&mut reviews, 3, "Zeta", Sentiment::Negative, &GapType::Texture);
    repeat(&mut reviews, 3, "Alpha", Sentiment::Negative, &GapType::Texture);
    repeat(&mut reviews, 3, "Mid", Sentiment::Positive, &GapType::NoGap);
    let report = build_portfolio(&reviews, None);
    assert_eq!(report.risk_ranking, vec!["Alpha", "Zeta", "Mid"]);
    assert_eq!(report.highest_gap_rate.as_deref(), Some("Alpha"));
    assert_eq!(report.lowest_score.as_deref(), Some("Alpha"));
}

#[test]
fn dominant_gap_spans_all_products() {
    let report = build_portfolio(&two_product_portfolio(), None);
    assert_eq!(
        report.dominant_gap.as_deref(),
        Some("제형·사용감 불일치 (Texture)")
    );
}

#[test]
fn dominant_gap_is_none_without_gap_reviews() {
    let mut reviews = Vec::new();
    repeat(&mut reviews, 2, "A", Sentiment::Positive, &GapType::NoGap);
    let report = build_portfolio(&reviews, None);
    assert!(report.dominant_gap.is_none());
    assert!(report.issue_map.is_empty());
    assert_eq!(report.action_board.len(), 1);
    assert!(report.action_board[0].focus.is_none());
}

#[test]
fn selection_limits_products() {
    let selection = vec!["B".to_string()];
    let report = build_portfolio(&two_product_portfolio(), Some(selection.as_slice()));
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].product_name, "B");
    assert_eq!(
        report.dominant_gap.as_deref(),
        Some("배송 이슈 (Delivery)")
    );
}

#[test]
fn empty_selection_yields_empty_report() {
    let selection: Vec<String> = Vec::new();
    let report = build_portfolio(&two_product_portfolio(), Some(selection.as_slice()));
    assert!(report.is_empty());
    assert!(report.risk_ranking.is_empty());
    assert!(report.highest_gap_rate.is_none());
    assert!(report.lowest_score.is_none());
    assert!(report.action_board.is_empty());
}

#[test]
fn empty_collection_yields_empty_report() {
    let report = build_portfolio(&[], None);
    assert!(report.is_empty());
    assert!(report.dominant_gap.is_none());
}

#[test]
fn action_board_reports_main_gap_with_two_samples() {
    let report = build_portfolio(&two_product_portfolio(), None);
    let entry = &report.action_board[0];
    assert_eq!(entry.product_name, "A");
    let focus = entry.focus.as_ref().expect("A has gap reviews");
    assert_eq!(focus.gap_label, "제형·사용감 불일치 (Texture)");
    assert_eq!(focus.count, 8);
    // 8 of A's 10 reviews
    assert_eq!(focus.share, 80);
    assert!(focus.action.starts_with("사용감"));
    assert_eq!(
        focus.samples,
        vec!["A Texture review 0".to_string(), "A Texture review 1".to_string()]
    );
}

#[test]
fn action_board_is_capped() {
    let mut reviews = Vec::new();
    for product in ["P1", "P2", "P3", "P4"] {
        repeat(&mut reviews, 2, product, Sentiment::Negative, &GapType::Delivery);
    }
    let report = build_portfolio(&reviews, None);
    assert_eq!(report.products.len(), 4);
    assert_eq!(report.action_board.len(), ACTION_BOARD_SIZE);
}

#[test]
fn issue_map_lists_each_product_gap_pair() {
    let report = build_portfolio(&two_product_portfolio(), None);
    assert_eq!(
        report.issue_map,
        vec![
            IssueMapCell {
                product_name: "A".to_string(),
                gap_label: "제형·사용감 불일치 (Texture)".to_string(),
                count: 8,
            },
            IssueMapCell {
                product_name: "B".to_string(),
                gap_label: "배송 이슈 (Delivery)".to_string(),
                count: 2,
            },
        ]
    );
}

#[test]
fn unlabelled_gap_rows_show_as_no_info() {
    let reviews = vec![Review::new("A", "unlabelled")];
    let report = build_portfolio(&reviews, None);
    assert_eq!(report.dominant_gap.as_deref(), Some(vobvoc_core::NO_INFO_LABEL));
}
