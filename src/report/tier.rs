//! Four-bucket severity classification over `cbsScore`.
//!
//! Both the category filter and the card styling go through [`ScoreTier::classify`], so a card's
//! color always agrees with the filter that selects it.

/// Lower bound (inclusive) of the excellent tier.
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the good tier.
pub const GOOD_THRESHOLD: f64 = 60.0;
/// Lower bound (inclusive) of the average tier.
pub const AVERAGE_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreTier {
    /// Boundary values belong to the higher tier. NaN falls through to `Poor`.
    pub fn classify(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            ScoreTier::Excellent
        } else if score >= GOOD_THRESHOLD {
            ScoreTier::Good
        } else if score >= AVERAGE_THRESHOLD {
            ScoreTier::Average
        } else {
            ScoreTier::Poor
        }
    }

    /// Stable style key, also used as the filter category name.
    pub fn class_name(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Average => "average",
            ScoreTier::Poor => "poor",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "🟢",
            ScoreTier::Good => "🟡",
            ScoreTier::Average => "🟠",
            ScoreTier::Poor => "🔴",
        }
    }

    pub fn is_quality(self) -> bool {
        self == ScoreTier::Excellent
    }
}
