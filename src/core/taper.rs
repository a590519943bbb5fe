//! Capacity taper: how much of the usable capacity counts towards certificates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{i18n::Label, quantity::energy::KilowattHours};

/// The taper applies to installations on or after this date.
pub const TAPER_START: NaiveDate = match NaiveDate::from_ymd_opt(2026, 5, 1) {
    Some(date) => date,
    None => panic!("invalid taper start date"),
};

/// Only this much usable capacity creates certificates.
pub const MAX_ELIGIBLE_CAPACITY: KilowattHours = KilowattHours(50.0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaperPhase {
    /// Every eligible kilowatt-hour counts in full.
    Phase1,

    /// Capacity above 14 kWh is down-weighted in bands.
    Phase2,
}

impl TaperPhase {
    #[must_use]
    pub fn at(date: NaiveDate) -> Self {
        if date >= TAPER_START { Self::Phase2 } else { Self::Phase1 }
    }

    pub const fn label(self) -> Label {
        match self {
            Self::Phase1 => {
                Label::new("Phase 1 (before 1 May 2026)", "第一阶段（2026年5月1日之前）")
            }
            Self::Phase2 => Label::new("Phase 2 (from 1 May 2026)", "第二阶段（2026年5月1日起）"),
        }
    }

    /// Human-readable rules of the phase.
    #[must_use]
    pub const fn rules(self) -> &'static [Label] {
        match self {
            Self::Phase1 => &PHASE1_RULES,
            Self::Phase2 => &PHASE2_RULES,
        }
    }

    fn buckets(self, eligible: KilowattHours) -> Vec<Bucket> {
        match self {
            Self::Phase1 => phase1_buckets(eligible),
            Self::Phase2 => phase2_buckets(eligible),
        }
    }
}

const PHASE1_RULES: [Label; 2] = [
    Label::new("0–50 kWh: 100% factor", "0–50 kWh：100% 系数"),
    Label::new(
        ">50 kWh usable: no additional STCs (cap at 50 kWh)",
        ">50 kWh：不再增加补贴（按 50kWh 封顶）",
    ),
];

const PHASE2_RULES: [Label; 4] = [
    Label::new("0–14 kWh: 100% factor", "0–14 kWh：100% 系数"),
    Label::new("14–28 kWh: 60% factor", "14–28 kWh：60% 系数"),
    Label::new("28–50 kWh: 15% factor", "28–50 kWh：15% 系数"),
    Label::new(">50 kWh usable: 0% (no additional STCs)", ">50 kWh：0%（不增加补贴）"),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, derive_more::Display)]
pub enum Band {
    #[serde(rename = "0_50")]
    #[display("0_50")]
    UpTo50,

    #[serde(rename = "0_14")]
    #[display("0_14")]
    UpTo14,

    #[serde(rename = "14_28")]
    #[display("14_28")]
    From14To28,

    #[serde(rename = "28_50")]
    #[display("28_50")]
    From28To50,
}

impl Band {
    pub const fn label(self) -> Label {
        match self {
            Self::UpTo50 => Label::same("0 - 50 kWh"),
            Self::UpTo14 => Label::same("0 - 14 kWh"),
            Self::From14To28 => Label::same("14 - 28 kWh"),
            Self::From28To50 => Label::same("28 - 50 kWh"),
        }
    }
}

/// Contribution of a single capacity band.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Bucket {
    pub band: Band,
    pub capacity: KilowattHours,

    /// Weighting multiplier in `0.0..=1.0`.
    pub rate: f64,

    pub weighted_capacity: KilowattHours,
}

impl Bucket {
    fn new(band: Band, capacity: KilowattHours, rate: f64) -> Self {
        Self { band, capacity, rate, weighted_capacity: capacity * rate }
    }
}

/// Cap the usable capacity to what the program recognises.
pub const fn eligible_capacity(usable: KilowattHours) -> KilowattHours {
    usable.clamp(KilowattHours::ZERO, MAX_ELIGIBLE_CAPACITY)
}

/// Split the usable capacity into rate-weighted buckets.
///
/// Always returns one bucket before the taper start (or for zero capacity) and three afterwards.
pub fn build_buckets(usable: KilowattHours, date: NaiveDate) -> Vec<Bucket> {
    let eligible = eligible_capacity(usable);
    if eligible == KilowattHours::ZERO {
        return vec![Bucket::new(Band::UpTo50, KilowattHours::ZERO, 1.0)];
    }
    TaperPhase::at(date).buckets(eligible)
}

fn phase1_buckets(eligible: KilowattHours) -> Vec<Bucket> {
    vec![Bucket::new(Band::UpTo50, eligible, 1.0)]
}

fn phase2_buckets(eligible: KilowattHours) -> Vec<Bucket> {
    let first = eligible.clamp(KilowattHours::ZERO, KilowattHours(14.0));
    let second = (eligible - KilowattHours(14.0)).clamp(KilowattHours::ZERO, KilowattHours(14.0));
    let third = (eligible - KilowattHours(28.0)).clamp(KilowattHours::ZERO, KilowattHours(22.0));
    vec![
        Bucket::new(Band::UpTo14, first, 1.0),
        Bucket::new(Band::From14To28, second, 0.6),
        Bucket::new(Band::From28To50, third, 0.15),
    ]
}

pub fn sum_weighted_capacity(buckets: &[Bucket]) -> KilowattHours {
    buckets.iter().map(|bucket| bucket.weighted_capacity).sum()
}
