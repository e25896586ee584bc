//! Review analysis engine for VoB–VoC.
//!
//! Classifies review text into sentiment and gap labels, checks data
//! quality, scores each product, and compares products across a portfolio.
//! Every operation is synchronous and total; nothing here performs I/O.

pub mod classifier;
pub mod filter;
pub mod gaps;
pub mod portfolio;
pub mod product;
pub mod quality;
pub mod score;
pub mod session;

pub use classifier::{classify, classify_reviews, classify_sentiment, template_for, Classification};
pub use filter::{gap_only, Facets, ReviewFilter};
pub use gaps::GapDistribution;
pub use portfolio::{
    build_portfolio, rank_by_risk, risk_key, ActionBoardEntry, ActionFocus, IssueMapCell,
    PortfolioReport, ProductSummary,
};
pub use product::{group_by_product, top_issues, IssueBucket, ProductGroup, ProductReport};
pub use quality::{assess_reviews, assess_texts, quality_label, QualityLabel, QualityReport};
pub use score::{grade_for, score_reviews, Grade, Score, ScoreRecord, NO_DATA_LABEL};
pub use session::{CachedReply, ReviewSession};
