//! Agency ratings on one notched scale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A notch on the combined S&P / Moody's / Fitch scale, best first.
///
/// Ordering follows credit quality, so `AAA < BBB < D`. The wire form is the
/// S&P / Fitch symbol (`"BBB+"`); parsing additionally takes Moody's symbols
/// (`"Baa1"`) and treats blank or `UNRATED` input as [`CreditRating::NotRated`].
///
/// ```
/// use bondgate_core::types::{CreditRating, RatingBucket};
///
/// let rating: CreditRating = "Baa2".parse().unwrap();
/// assert_eq!(rating, CreditRating::BBB);
/// assert_eq!(rating.bucket(), RatingBucket::BBB);
/// assert!(rating.is_investment_grade());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "String", into = "&'static str")]
#[allow(missing_docs)]
pub enum CreditRating {
    AAA,
    AAPlus,
    AA,
    AAMinus,
    APlus,
    A,
    AMinus,
    BBBPlus,
    BBB,
    BBBMinus,
    BBPlus,
    BB,
    BBMinus,
    BPlus,
    B,
    BMinus,
    CCCPlus,
    CCC,
    CCCMinus,
    CC,
    C,
    D,
    #[default]
    NotRated,
}

/// `(notch, S&P / Fitch symbol, Moody's symbol)`. Moody's has no C or D notch.
const NOTCHES: [(CreditRating, &str, Option<&str>); 23] = [
    (CreditRating::AAA, "AAA", Some("Aaa")),
    (CreditRating::AAPlus, "AA+", Some("Aa1")),
    (CreditRating::AA, "AA", Some("Aa2")),
    (CreditRating::AAMinus, "AA-", Some("Aa3")),
    (CreditRating::APlus, "A+", Some("A1")),
    (CreditRating::A, "A", Some("A2")),
    (CreditRating::AMinus, "A-", Some("A3")),
    (CreditRating::BBBPlus, "BBB+", Some("Baa1")),
    (CreditRating::BBB, "BBB", Some("Baa2")),
    (CreditRating::BBBMinus, "BBB-", Some("Baa3")),
    (CreditRating::BBPlus, "BB+", Some("Ba1")),
    (CreditRating::BB, "BB", Some("Ba2")),
    (CreditRating::BBMinus, "BB-", Some("Ba3")),
    (CreditRating::BPlus, "B+", Some("B1")),
    (CreditRating::B, "B", Some("B2")),
    (CreditRating::BMinus, "B-", Some("B3")),
    (CreditRating::CCCPlus, "CCC+", Some("Caa1")),
    (CreditRating::CCC, "CCC", Some("Caa2")),
    (CreditRating::CCCMinus, "CCC-", Some("Caa3")),
    (CreditRating::CC, "CC", Some("Ca")),
    (CreditRating::C, "C", None),
    (CreditRating::D, "D", None),
    (CreditRating::NotRated, "NR", None),
];

const UNRATED_ALIASES: [&str; 4] = ["", "NOT RATED", "NOTRATED", "UNRATED"];

impl CreditRating {
    /// BBB- or better.
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        self.bucket().is_investment_grade()
    }

    /// Letter grade used by the per-rating threshold tables.
    #[must_use]
    pub fn bucket(&self) -> RatingBucket {
        use CreditRating as R;
        match self {
            R::AAA => RatingBucket::AAA,
            R::AAPlus | R::AA | R::AAMinus => RatingBucket::AA,
            R::APlus | R::A | R::AMinus => RatingBucket::A,
            R::BBBPlus | R::BBB | R::BBBMinus => RatingBucket::BBB,
            R::BBPlus | R::BB | R::BBMinus => RatingBucket::BB,
            R::BPlus | R::B | R::BMinus => RatingBucket::B,
            R::CCCPlus | R::CCC | R::CCCMinus | R::CC | R::C => RatingBucket::CCC,
            R::D => RatingBucket::Default,
            R::NotRated => RatingBucket::NotRated,
        }
    }

    /// S&P / Fitch symbol, `"NR"` for unrated.
    #[must_use]
    pub fn sp_notation(&self) -> &'static str {
        NOTCHES
            .iter()
            .find(|(notch, ..)| notch == self)
            .map_or("NR", |(_, symbol, _)| *symbol)
    }

    /// Reads an S&P / Fitch symbol (any case) or a Moody's symbol (exact case).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let moodys = NOTCHES
            .iter()
            .find(|(.., symbol)| symbol.is_some_and(|m| m == s));
        if let Some((notch, ..)) = moodys {
            return Some(*notch);
        }

        let upper = s.to_ascii_uppercase();
        if UNRATED_ALIASES.contains(&upper.as_str()) {
            return Some(Self::NotRated);
        }
        NOTCHES
            .iter()
            .find(|(_, symbol, _)| *symbol == upper)
            .map(|(notch, ..)| *notch)
    }
}

impl FromStr for CreditRating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::invalid_rating(s))
    }
}

impl TryFrom<String> for CreditRating {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CreditRating> for &'static str {
    fn from(rating: CreditRating) -> Self {
        rating.sp_notation()
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sp_notation())
    }
}

/// Letter grade with the notch stripped. CC and C fold into CCC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum RatingBucket {
    AAA,
    AA,
    A,
    BBB,
    BB,
    B,
    CCC,
    Default,
    NotRated,
}

impl RatingBucket {
    /// AAA through BBB.
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        *self <= Self::BBB
    }

    /// BB, B or CCC. Defaulted and unrated paper is neither.
    #[must_use]
    pub fn is_speculative(&self) -> bool {
        matches!(self, Self::BB | Self::B | Self::CCC)
    }
}
