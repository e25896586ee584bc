//! Markdown rendering for quality, product, and portfolio reports.
//!
//! Each renderer collects lines and joins them; output ends with a newline.

use chrono::Utc;
use vobvoc_engine::{PortfolioReport, ProductReport, QualityReport, Score};

const NO_NOTABLE_ISSUE: &str = "no notable issue";
const MAINTAIN_MESSAGING: &str = "No gap reviews; maintain current messaging.";

fn finish(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn generated_line() -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    format!("**Generated**: {now}")
}

fn score_cells(score: &Score) -> (String, String, &'static str) {
    match score.record() {
        Some(r) => (r.score.to_string(), format!("{}%", r.gap_rate), score.grade_label()),
        None => ("-".to_string(), "-".to_string(), score.grade_label()),
    }
}

pub(crate) fn render_quality(report: &QualityReport) -> String {
    let mut lines = vec![
        "# Data Quality".to_string(),
        String::new(),
        generated_line(),
        String::new(),
        "| Metric | Value |".to_string(),
        "|--------|-------|".to_string(),
        format!("| Rows | {} |", report.rows),
        format!(
            "| Empty reviews | {} ({:.1}%) |",
            report.empty_reviews, report.empty_rate
        ),
        format!(
            "| Duplicate reviews | {} ({:.1}%) |",
            report.dup_reviews, report.dup_rate
        ),
        format!("| Average length | {} |", report.avg_len),
        format!("| Label | {} |", report.label),
    ];
    if report.is_empty() {
        lines.push(String::new());
        lines.push("_No rows were loaded; the label carries no evidence._".to_string());
    }
    finish(&lines)
}

pub(crate) fn render_product(report: &ProductReport) -> String {
    let mut lines = vec![format!("## {}", report.product_name), String::new()];
    if let Some(promise) = &report.promise {
        lines.push(format!("**Promise (VoB)**: {promise}"));
    }
    let (score, gap_rate, grade) = score_cells(&report.score);
    lines.push(format!("**Score**: {score} ({grade})"));
    lines.push(format!("**Gap rate**: {gap_rate}"));
    lines.push(format!("**Reviews**: {}", report.score.total()));
    lines.push(String::new());

    if !report.gap_distribution.is_empty() {
        lines.push("| Gap | Reviews |".to_string());
        lines.push("|-----|---------|".to_string());
        lines.extend(
            report
                .gap_distribution
                .localized()
                .into_iter()
                .map(|(label, count)| format!("| {label} | {count} |")),
        );
        lines.push(String::new());
    }

    if report.top_issues.is_empty() {
        lines.push(MAINTAIN_MESSAGING.to_string());
        return finish(&lines);
    }

    lines.push("### Top issues".to_string());
    for (i, issue) in report.top_issues.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{}. **{}** ({}) - {} reviews, {}% of gap reviews",
            i + 1,
            issue.label,
            issue.localized_gap,
            issue.count,
            issue.share
        ));
        lines.push(format!("   - Action: {}", issue.action));
        lines.extend(issue.samples.iter().map(|sample| format!("   - \"{sample}\"")));
    }
    finish(&lines)
}

pub(crate) fn render_product_reports(reports: &[ProductReport]) -> String {
    let mut lines = vec![
        "# Product Report".to_string(),
        String::new(),
        generated_line(),
        format!("**Products**: {}", reports.len()),
    ];
    for report in reports {
        lines.push(String::new());
        lines.push(render_product(report).trim_end().to_string());
    }
    finish(&lines)
}

pub(crate) fn render_portfolio(report: &PortfolioReport) -> String {
    let mut lines = vec![
        "# Portfolio Report".to_string(),
        String::new(),
        generated_line(),
        format!("**Products**: {}", report.products.len()),
    ];

    if report.is_empty() {
        lines.push(String::new());
        lines.push("_No products selected._".to_string());
        return finish(&lines);
    }

    let none = "-";
    lines.push(format!(
        "**Highest gap rate**: {}",
        report.highest_gap_rate.as_deref().unwrap_or(none)
    ));
    lines.push(format!(
        "**Lowest score**: {}",
        report.lowest_score.as_deref().unwrap_or(none)
    ));
    lines.push(format!(
        "**Dominant gap**: {}",
        report.dominant_gap.as_deref().unwrap_or(NO_NOTABLE_ISSUE)
    ));
    lines.push(String::new());

    lines.push("## Risk ranking".to_string());
    lines.push(String::new());
    lines.push("| # | Product | Score | Gap rate | Grade | Risk |".to_string());
    lines.push("|---|---------|-------|----------|-------|------|".to_string());
    for (rank, name) in report.risk_ranking.iter().enumerate() {
        let Some(summary) = report.products.iter().find(|p| &p.product_name == name) else {
            continue;
        };
        let (score, gap_rate, grade) = score_cells(&summary.score);
        lines.push(format!(
            "| {} | {} | {score} | {gap_rate} | {grade} | {:.1} |",
            rank + 1,
            name,
            summary.risk_key
        ));
    }

    if !report.issue_map.is_empty() {
        lines.push(String::new());
        lines.push("## Issue map".to_string());
        lines.push(String::new());
        lines.push("| Product | Gap | Reviews |".to_string());
        lines.push("|---------|-----|---------|".to_string());
        lines.extend(report.issue_map.iter().map(|cell| {
            format!(
                "| {} | {} | {} |",
                cell.product_name, cell.gap_label, cell.count
            )
        }));
    }

    lines.push(String::new());
    lines.push("## Action board".to_string());
    for entry in &report.action_board {
        lines.push(String::new());
        lines.push(format!("### {}", entry.product_name));
        match &entry.focus {
            None => lines.push(MAINTAIN_MESSAGING.to_string()),
            Some(focus) => {
                lines.push(format!(
                    "**Main gap**: {} ({} reviews, {}%)",
                    focus.gap_label, focus.count, focus.share
                ));
                lines.push(format!("**Action**: {}", focus.action));
                lines.extend(focus.samples.iter().map(|sample| format!("- \"{sample}\"")));
            }
        }
    }
    finish(&lines)
}
