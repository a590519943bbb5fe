//! Proposed STC factor schedule.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{i18n::Label, quantity::certificates::CertificateFactor};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FactorPeriod {
    pub id: &'static str,

    /// Inclusive.
    pub start: NaiveDate,

    /// Inclusive.
    pub end: NaiveDate,

    pub factor: CertificateFactor,
    pub label: Label,
}

impl FactorPeriod {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start <= date) && (date <= self.end)
    }
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date in the factor schedule"),
    }
}

const fn period(
    id: &'static str,
    start: NaiveDate,
    end: NaiveDate,
    factor: f64,
    label: Label,
) -> FactorPeriod {
    FactorPeriod { id, start, end, factor: CertificateFactor(factor), label }
}

/// First supported installation date.
pub const FIRST_DAY: NaiveDate = ymd(2025, 7, 1);

/// Last supported installation date.
pub const LAST_DAY: NaiveDate = ymd(2030, 12, 31);

pub static FACTOR_PERIODS: [FactorPeriod; 11] = [
    period(
        "2025H2",
        FIRST_DAY,
        ymd(2025, 12, 31),
        9.3,
        Label::new("2025 (Jul–Dec)", "2025（7–12月）"),
    ),
    period(
        "2026JanApr",
        ymd(2026, 1, 1),
        ymd(2026, 4, 30),
        8.4,
        Label::new("2026 (Jan–Apr)", "2026（1–4月）"),
    ),
    period(
        "2026MayDec",
        ymd(2026, 5, 1),
        ymd(2026, 12, 31),
        6.8,
        Label::new("2026 (May–Dec)", "2026（5–12月）"),
    ),
    period(
        "2027JanJun",
        ymd(2027, 1, 1),
        ymd(2027, 6, 30),
        5.7,
        Label::new("2027 (Jan–Jun)", "2027（1–6月）"),
    ),
    period(
        "2027JulDec",
        ymd(2027, 7, 1),
        ymd(2027, 12, 31),
        5.2,
        Label::new("2027 (Jul–Dec)", "2027（7–12月）"),
    ),
    period(
        "2028JanJun",
        ymd(2028, 1, 1),
        ymd(2028, 6, 30),
        4.6,
        Label::new("2028 (Jan–Jun)", "2028（1–6月）"),
    ),
    period(
        "2028JulDec",
        ymd(2028, 7, 1),
        ymd(2028, 12, 31),
        4.1,
        Label::new("2028 (Jul–Dec)", "2028（7–12月）"),
    ),
    period(
        "2029JanJun",
        ymd(2029, 1, 1),
        ymd(2029, 6, 30),
        3.6,
        Label::new("2029 (Jan–Jun)", "2029（1–6月）"),
    ),
    period(
        "2029JulDec",
        ymd(2029, 7, 1),
        ymd(2029, 12, 31),
        3.1,
        Label::new("2029 (Jul–Dec)", "2029（7–12月）"),
    ),
    period(
        "2030JanJun",
        ymd(2030, 1, 1),
        ymd(2030, 6, 30),
        2.6,
        Label::new("2030 (Jan–Jun)", "2030（1–6月）"),
    ),
    period(
        "2030JulDec",
        ymd(2030, 7, 1),
        LAST_DAY,
        2.1,
        Label::new("2030 (Jul–Dec)", "2030（7–12月）"),
    ),
];

/// Ordered sequence of factor periods.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct FactorSchedule<'a>(&'a [FactorPeriod]);

impl FactorSchedule<'static> {
    pub const PROPOSED: Self = Self::new(&FACTOR_PERIODS);
}

impl<'a> FactorSchedule<'a> {
    pub const fn new(periods: &'a [FactorPeriod]) -> Self {
        Self(periods)
    }

    #[must_use]
    pub const fn periods(self) -> &'a [FactorPeriod] {
        self.0
    }

    /// Find the first period, in schedule order, that contains the date.
    #[must_use]
    pub fn find(self, date: NaiveDate) -> Option<&'a FactorPeriod> {
        self.0.iter().find(|period| period.contains(date))
    }
}
