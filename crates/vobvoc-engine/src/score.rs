//! VoB–VoC health score for one product group.
//!
//! `score = round((pos_rate * 0.5 + nogap_rate * 0.5) * 100)`, computed in
//! integer arithmetic with halves rounding up.

use serde::Serialize;
use vobvoc_core::Review;

/// Grade label reported for a group with no reviews.
pub const NO_DATA_LABEL: &str = "No Data";

/// Score band for a computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    Good,
    Attention,
    Critical,
}

impl Grade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Attention => "Attention",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band a 0–100 score: 70 and above is Good, 50–69 Attention, below 50 Critical.
#[must_use]
pub fn grade_for(score: u8) -> Grade {
    if score >= 70 {
        Grade::Good
    } else if score >= 50 {
        Grade::Attention
    } else {
        Grade::Critical
    }
}

/// Counts and derived score for a non-empty product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub total: usize,
    pub pos: usize,
    pub neg: usize,
    pub nogap: usize,
    pub gap: usize,
    /// Percentage of reviews not labelled No Gap.
    pub gap_rate: u8,
    pub score: u8,
    pub grade: Grade,
}

impl ScoreRecord {
    /// Complement of [`ScoreRecord::gap_rate`]; the two always sum to 100.
    #[must_use]
    pub fn no_gap_rate(&self) -> u8 {
        100 - self.gap_rate
    }
}

/// Score result; `Empty` is the explicit "no data" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Score {
    Empty,
    Computed(ScoreRecord),
}

impl Score {
    #[must_use]
    pub fn record(&self) -> Option<&ScoreRecord> {
        match self {
            Self::Empty => None,
            Self::Computed(record) => Some(record),
        }
    }

    /// Numeric score, `0` for [`Score::Empty`].
    #[must_use]
    pub fn value(&self) -> u8 {
        self.record().map_or(0, |r| r.score)
    }

    /// Gap rate, `0` for [`Score::Empty`].
    #[must_use]
    pub fn gap_rate(&self) -> u8 {
        self.record().map_or(0, |r| r.gap_rate)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.record().map_or(0, |r| r.total)
    }

    #[must_use]
    pub fn grade(&self) -> Option<Grade> {
        self.record().map(|r| r.grade)
    }

    /// Grade label, [`NO_DATA_LABEL`] for [`Score::Empty`].
    #[must_use]
    pub fn grade_label(&self) -> &'static str {
        self.grade().map_or(NO_DATA_LABEL, Grade::as_str)
    }
}

/// Integer percentage of `part` over `whole`, halves rounding up.
/// Returns `0` when `whole` is zero.
pub(crate) fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part.min(whole) * 200 + whole) / (2 * whole);
    u8::try_from(rounded).unwrap_or(100)
}

/// Score one product group.
///
/// Rows without a sentiment count toward the total but neither polarity;
/// rows without a gap label count as gaps.
#[must_use]
pub fn score_reviews<'a, I>(reviews: I) -> Score
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut total = 0_usize;
    let mut pos = 0_usize;
    let mut neg = 0_usize;
    let mut nogap = 0_usize;

    for review in reviews {
        total += 1;
        if review.is_positive() {
            pos += 1;
        } else if review.is_negative() {
            neg += 1;
        }
        if !review.is_gap() {
            nogap += 1;
        }
    }

    if total == 0 {
        return Score::Empty;
    }

    // (pos/total * 0.5 + nogap/total * 0.5) * 100 == (pos + nogap) * 100 / (2 * total)
    let score = percent(pos + nogap, 2 * total);
    let gap = total - nogap;

    Score::Computed(ScoreRecord {
        total,
        pos,
        neg,
        nogap,
        gap,
        gap_rate: percent(gap, total),
        score,
        grade: grade_for(score),
    })
}
