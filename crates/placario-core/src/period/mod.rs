//! Rental period taxonomy.
//!
//! A `PeriodKind` classifies a contract's billing interval. The tag set is
//! closed: six canonical tags plus two legacy alias tags ("quinzenal",
//! "mensal") that survive in contracts stored before tag normalization.
//! Aliases validate as members of the set but resolve to no label and no
//! duration -- callers must handle the gap. That asymmetry is a
//! backward-compatibility contract with older stored data, not a bug.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kind of rental period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKind {
    #[serde(rename = "every-two-weeks")]
    EveryTwoWeeks,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "bimonthly")]
    Bimonthly,
    #[serde(rename = "semiannual")]
    Semiannual,
    #[serde(rename = "annual")]
    Annual,
    /// Open-ended period; the contract supplies a manual duration.
    #[serde(rename = "other")]
    Other,
    /// Legacy alias for every-two-weeks in pre-normalization contracts.
    #[serde(rename = "quinzenal")]
    Quinzenal,
    /// Legacy alias for monthly in pre-normalization contracts.
    #[serde(rename = "mensal")]
    Mensal,
}

/// Every tag the system accepts, canonical and legacy.
pub const VALID_TAGS: [&str; 8] = [
    "every-two-weeks",
    "monthly",
    "bimonthly",
    "semiannual",
    "annual",
    "other",
    "quinzenal",
    "mensal",
];

/// Display labels for canonical kinds. Legacy aliases have no entry.
pub const LABELS: [(PeriodKind, &str); 6] = [
    (PeriodKind::EveryTwoWeeks, "Quinzenal"),
    (PeriodKind::Monthly, "Mensal"),
    (PeriodKind::Bimonthly, "Bimestral"),
    (PeriodKind::Semiannual, "Semestral"),
    (PeriodKind::Annual, "Anual"),
    (PeriodKind::Other, "Outro"),
];

/// Fixed day counts. The open-ended kind and legacy aliases have no entry.
pub const DURATIONS: [(PeriodKind, u32); 5] = [
    (PeriodKind::EveryTwoWeeks, 15),
    (PeriodKind::Monthly, 30),
    (PeriodKind::Bimonthly, 60),
    (PeriodKind::Semiannual, 180),
    (PeriodKind::Annual, 365),
];

impl PeriodKind {
    /// Parse a tag. Exact match only -- no normalization, no case folding.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "every-two-weeks" => Some(PeriodKind::EveryTwoWeeks),
            "monthly" => Some(PeriodKind::Monthly),
            "bimonthly" => Some(PeriodKind::Bimonthly),
            "semiannual" => Some(PeriodKind::Semiannual),
            "annual" => Some(PeriodKind::Annual),
            "other" => Some(PeriodKind::Other),
            "quinzenal" => Some(PeriodKind::Quinzenal),
            "mensal" => Some(PeriodKind::Mensal),
            _ => None,
        }
    }

    /// The wire/storage tag.
    pub fn as_tag(self) -> &'static str {
        match self {
            PeriodKind::EveryTwoWeeks => "every-two-weeks",
            PeriodKind::Monthly => "monthly",
            PeriodKind::Bimonthly => "bimonthly",
            PeriodKind::Semiannual => "semiannual",
            PeriodKind::Annual => "annual",
            PeriodKind::Other => "other",
            PeriodKind::Quinzenal => "quinzenal",
            PeriodKind::Mensal => "mensal",
        }
    }

    /// Fixed display label. `None` for legacy aliases.
    pub fn label(self) -> Option<&'static str> {
        match self {
            PeriodKind::EveryTwoWeeks => Some("Quinzenal"),
            PeriodKind::Monthly => Some("Mensal"),
            PeriodKind::Bimonthly => Some("Bimestral"),
            PeriodKind::Semiannual => Some("Semestral"),
            PeriodKind::Annual => Some("Anual"),
            PeriodKind::Other => Some("Outro"),
            PeriodKind::Quinzenal | PeriodKind::Mensal => None,
        }
    }

    /// Fixed day count. `None` for the open-ended kind (caller must supply
    /// a manual duration) and for legacy aliases.
    pub fn duration_days(self) -> Option<u32> {
        match self {
            PeriodKind::EveryTwoWeeks => Some(15),
            PeriodKind::Monthly => Some(30),
            PeriodKind::Bimonthly => Some(60),
            PeriodKind::Semiannual => Some(180),
            PeriodKind::Annual => Some(365),
            PeriodKind::Other => None,
            PeriodKind::Quinzenal | PeriodKind::Mensal => None,
        }
    }

    /// Whether this is a pre-normalization compatibility tag.
    pub fn is_legacy(self) -> bool {
        matches!(self, PeriodKind::Quinzenal | PeriodKind::Mensal)
    }
}

/// True iff `tag` is exactly one of the enumerated kind values,
/// legacy aliases included.
pub fn is_valid_period_kind(tag: &str) -> bool {
    PeriodKind::from_tag(tag).is_some()
}

/// End of a period starting at `start`. `None` where no fixed duration
/// exists (open-ended kind, legacy aliases).
pub fn end_of_period(start: DateTime<Utc>, kind: PeriodKind) -> Option<DateTime<Utc>> {
    kind.duration_days()
        .map(|days| start + Duration::days(i64::from(days)))
}
