//! Command handlers. Each loads the review file into a session, classifies
//! it once, and prints or writes the requested view.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use serde::Serialize;
use vobvoc_core::{load_products, AppConfig, ProductsFile, Review, Sentiment};
use vobvoc_engine::{
    build_portfolio, gap_only, group_by_product, Facets, ProductReport, ReviewFilter,
    ReviewSession,
};
use vobvoc_reply::{ReplyClient, Tone};

use crate::ingest::load_reviews;
use crate::report::{render_portfolio, render_product_reports, render_quality};

/// Row filters shared by commands that select reviews.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub(crate) struct FilterArgs {
    /// Keep only reviews from this country
    #[arg(long)]
    pub country: Option<String>,

    /// Keep only reviews from this sales channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Keep only reviews from this skin type
    #[arg(long)]
    pub skin_type: Option<String>,

    /// Lowest star rating to keep (inclusive)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Highest star rating to keep (inclusive)
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Case-insensitive text to find in the review, issue, or gap label
    #[arg(long)]
    pub query: Option<String>,
}

impl FilterArgs {
    pub(crate) fn to_filter(&self) -> ReviewFilter {
        let rating_range = match (self.min_rating, self.max_rating) {
            (None, None) => None,
            (min, max) => Some((
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY),
            )),
        };
        ReviewFilter {
            country: self.country.clone(),
            channel: self.channel.clone(),
            skin_type: self.skin_type.clone(),
            rating_range,
            query: self.query.clone(),
        }
    }
}

fn open_session(file: &Path) -> anyhow::Result<ReviewSession> {
    let loaded = load_reviews(file)?;
    let mut session = ReviewSession::load(loaded.source_key, loaded.reviews);
    session.classify();
    Ok(session)
}

/// Product promise catalog, or an empty one when the file does not exist.
fn load_catalog(config: &AppConfig) -> anyhow::Result<ProductsFile> {
    let path = &config.products_path;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no product catalog; using row promises only");
        return Ok(ProductsFile::default());
    }
    Ok(load_products(path)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Print data quality for a review file.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub(crate) fn run_quality(file: &Path, json: bool) -> anyhow::Result<()> {
    let loaded = load_reviews(file)?;
    let session = ReviewSession::load(loaded.source_key, loaded.reviews);
    let report = session.quality();
    if json {
        print_json(&report)
    } else {
        print!("{}", render_quality(&report));
        Ok(())
    }
}

/// Classify a review file and write the labelled rows as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the output cannot be written.
pub(crate) fn run_analyze(file: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let session = open_session(file)?;
    match out {
        Some(path) => {
            write_json(path, session.reviews())?;
            tracing::info!(
                path = %path.display(),
                rows = session.reviews().len(),
                "labelled reviews written"
            );
            Ok(())
        }
        None => print_json(session.reviews()),
    }
}

/// Reports for the products among `reviews`, optionally just one of them.
fn product_reports(
    reviews: &[&Review],
    catalog: &ProductsFile,
    product: Option<&str>,
) -> Vec<ProductReport> {
    group_by_product(reviews.iter().copied())
        .iter()
        .filter(|g| product.is_none_or(|name| g.name == name))
        .map(|g| ProductReport::build(g, catalog.promise_for(g.name)))
        .collect()
}

/// Print per-product reports over the rows that pass `filter`.
///
/// # Errors
///
/// Returns an error if the file or catalog cannot be loaded, or if
/// `product` names a product absent from the filtered rows.
pub(crate) fn run_report(
    config: &AppConfig,
    file: &Path,
    product: Option<&str>,
    filter: &FilterArgs,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(file)?;
    let catalog = load_catalog(config)?;
    let selected = filter.to_filter().apply(session.reviews());
    tracing::debug!(
        selected = selected.len(),
        total = session.reviews().len(),
        "report rows selected"
    );

    let reports = product_reports(&selected, &catalog, product);
    if let Some(name) = product {
        if reports.is_empty() {
            let known = Facets::from_reviews(session.reviews()).products.join(", ");
            bail!("product '{name}' has no rows matching the filters; available: {known}");
        }
    }

    if json {
        print_json(&reports)
    } else {
        print!("{}", render_product_reports(&reports));
        Ok(())
    }
}

/// Print the portfolio comparison.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub(crate) fn run_portfolio(
    file: &Path,
    products: Option<&[String]>,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(file)?;
    let report = build_portfolio(session.reviews(), products);
    if json {
        print_json(&report)
    } else {
        print!("{}", render_portfolio(&report));
        Ok(())
    }
}

/// Write filtered rows and their gap-only subset to `out_dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the exports cannot be written.
pub(crate) fn run_export(file: &Path, out_dir: &Path, filter: &FilterArgs) -> anyhow::Result<()> {
    let session = open_session(file)?;
    let filtered: Vec<&Review> = filter.to_filter().apply(session.reviews());
    let gaps = gap_only(&filtered);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let filtered_path: PathBuf = out_dir.join("filtered_reviews.json");
    let gaps_path: PathBuf = out_dir.join("gap_reviews.json");
    write_json(&filtered_path, &filtered)?;
    write_json(&gaps_path, &gaps)?;

    tracing::info!(
        filtered = filtered.len(),
        gaps = gaps.len(),
        out_dir = %out_dir.display(),
        "exports written"
    );
    println!(
        "wrote {} filtered rows to {}",
        filtered.len(),
        filtered_path.display()
    );
    println!("wrote {} gap rows to {}", gaps.len(), gaps_path.display());
    Ok(())
}

/// The review at `index`, provided it is a negative review.
///
/// Replies are drafted only for complaints, so positive and neutral rows are
/// refused along with out-of-range indexes.
fn reply_target(reviews: &[Review], index: usize) -> anyhow::Result<&Review> {
    let Some(review) = reviews.get(index) else {
        bail!(
            "review index {index} out of range; file has {} reviews",
            reviews.len()
        );
    };
    if !review.is_negative() {
        let sentiment = review.sentiment.map_or("unlabelled", Sentiment::label);
        bail!("review {index} is {sentiment}; replies are drafted for Negative reviews only");
    }
    Ok(review)
}

/// Draft a reply to one negative review, optionally with a Korean
/// translation of the review itself.
///
/// Collaborator failures are printed inline as `Error: ...` rather than
/// failing the command.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, `index` is out of range or
/// not a negative review, or the reply client cannot be constructed.
pub(crate) async fn run_reply(
    config: &AppConfig,
    file: &Path,
    index: usize,
    tone: Tone,
    translate: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(file)?;
    let review = reply_target(session.reviews(), index)?;
    let review_text = review.review_text.clone();
    let issue_detail = review.issue_detail.clone();

    let client = ReplyClient::from_config(config)?;
    if client.is_mock() {
        tracing::info!("reply client in mock mode");
    }

    println!("Review: {review_text}");
    if translate {
        let translated = client.translate(&review_text).await;
        println!("Review (KO): {translated}");
    }

    let reply = client
        .generate_reply(&review_text, issue_detail.as_deref(), tone)
        .await;
    session.store_reply(index, reply.clone());

    println!("Tone: {tone} ({})", tone.localized());
    println!();
    println!("{reply}");
    Ok(())
}
