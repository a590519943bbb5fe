//! Rebate calculation entry point.

use bon::Builder;
use chrono::NaiveDate;
use serde::Serialize;
use serde_with::SerializeDisplay;

use crate::{
    core::{
        schedule::{FIRST_DAY, FactorPeriod, FactorSchedule, LAST_DAY},
        taper::{
            Band,
            MAX_ELIGIBLE_CAPACITY,
            TaperPhase,
            build_buckets,
            eligible_capacity,
            sum_weighted_capacity,
        },
    },
    i18n::Label,
    quantity::{
        certificates::Certificates,
        currency::{Aud, AudPerCertificate},
        energy::KilowattHours,
    },
};

#[derive(Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum CalculationError {
    #[display("invalid installation date")]
    InvalidDate,

    #[display("usable capacity must be a non-negative number")]
    InvalidCapacity,

    #[display("STC price must be a positive number")]
    InvalidPrice,

    #[display(
        "date {date} is outside supported program factor schedule (supported: {first} to {last})",
        first = FIRST_DAY,
        last = LAST_DAY,
    )]
    OutsideSchedule { date: NaiveDate },
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_installation_date(text: &str) -> Result<NaiveDate, CalculationError> {
    let is_well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !is_well_formed {
        return Err(CalculationError::InvalidDate);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| CalculationError::InvalidDate)
}

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Input {
    /// Calendar date, compared as UTC midnight.
    pub installation_date: NaiveDate,

    pub usable_capacity: KilowattHours,

    #[builder(default = AudPerCertificate::DEFAULT)]
    pub certificate_price: AudPerCertificate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, SerializeDisplay, derive_more::Display)]
pub enum Warning {
    #[display("Only the first 50 kWh of usable capacity can create STCs.")]
    CapacityCapped,
}

impl Warning {
    pub const fn label(self) -> Label {
        match self {
            Self::CapacityCapped => Label::new(
                "Only the first 50 kWh of usable capacity can create STCs.",
                "STC 只按前 50kWh 可用容量计算，超过部分不产生 STC。",
            ),
        }
    }
}

/// Bucket with its own share of the certificates and rebate.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketBreakdown {
    pub band: Band,
    pub label: Label,
    pub capacity: KilowattHours,
    pub rate: f64,
    pub weighted_capacity: KilowattHours,
    pub certificates: Certificates,
    pub rebate: Aud,
}

/// Successful calculation, all the quantities are rounded to hundredths.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Calculation {
    pub phase: TaperPhase,
    pub period: FactorPeriod,
    pub eligible_capacity: KilowattHours,
    pub weighted_capacity: KilowattHours,
    pub certificates: Certificates,
    pub rebate: Aud,
    pub buckets: Vec<BucketBreakdown>,
    pub warnings: Vec<Warning>,
}

pub fn calculate(input: &Input) -> Result<Calculation, CalculationError> {
    let Input { installation_date, usable_capacity, certificate_price } = *input;

    if !usable_capacity.is_finite() || usable_capacity < KilowattHours::ZERO {
        return Err(CalculationError::InvalidCapacity);
    }
    if !certificate_price.is_finite() || certificate_price <= AudPerCertificate::ZERO {
        return Err(CalculationError::InvalidPrice);
    }
    let period = *FactorSchedule::PROPOSED
        .find(installation_date)
        .ok_or(CalculationError::OutsideSchedule { date: installation_date })?;

    let buckets = build_buckets(usable_capacity, installation_date);
    let weighted_capacity = sum_weighted_capacity(&buckets);
    let certificates = weighted_capacity * period.factor;
    let rebate = certificates * certificate_price;
    if !rebate.round_to_hundredths().is_finite() {
        return Err(CalculationError::InvalidPrice);
    }

    let warnings = if usable_capacity > MAX_ELIGIBLE_CAPACITY {
        vec![Warning::CapacityCapped]
    } else {
        Vec::new()
    };

    let buckets = buckets
        .into_iter()
        .map(|bucket| {
            let certificates = bucket.weighted_capacity * period.factor;
            BucketBreakdown {
                band: bucket.band,
                label: bucket.band.label(),
                capacity: bucket.capacity.round_to_hundredths(),
                rate: bucket.rate,
                weighted_capacity: bucket.weighted_capacity.round_to_hundredths(),
                certificates: certificates.round_to_hundredths(),
                rebate: (certificates * certificate_price).round_to_hundredths(),
            }
        })
        .collect();

    Ok(Calculation {
        phase: TaperPhase::at(installation_date),
        period,
        eligible_capacity: eligible_capacity(usable_capacity).round_to_hundredths(),
        weighted_capacity: weighted_capacity.round_to_hundredths(),
        certificates: certificates.round_to_hundredths(),
        rebate: rebate.round_to_hundredths(),
        buckets,
        warnings,
    })
}

/// Rebate for the same battery installed at the start of each schedule period.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: FactorPeriod,
    pub certificates: Certificates,
    pub rebate: Aud,
}

pub fn trend(
    usable_capacity: KilowattHours,
    certificate_price: AudPerCertificate,
) -> Result<Vec<TrendPoint>, CalculationError> {
    FactorSchedule::PROPOSED
        .periods()
        .iter()
        .map(|period| {
            let input = Input::builder()
                .installation_date(period.start)
                .usable_capacity(usable_capacity)
                .certificate_price(certificate_price)
                .build();
            let calculation = calculate(&input)?;
            Ok(TrendPoint {
                period: calculation.period,
                certificates: calculation.certificates,
                rebate: calculation.rebate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::prelude::Result;

    const PRICE: AudPerCertificate = AudPerCertificate(40.0);

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn input(date: NaiveDate, usable: f64) -> Input {
        Input::builder()
            .installation_date(date)
            .usable_capacity(KilowattHours(usable))
            .certificate_price(PRICE)
            .build()
    }

    #[test]
    fn rejects_dates_outside_schedule() {
        for usable in [0.0, 10.0, 60.0] {
            assert_eq!(
                calculate(&input(ymd(2025, 6, 30), usable)),
                Err(CalculationError::OutsideSchedule { date: ymd(2025, 6, 30) }),
            );
        }
        assert!(calculate(&input(ymd(2031, 1, 1), 10.0)).is_err());
    }

    #[test]
    fn outside_schedule_message_names_supported_range() {
        let error = CalculationError::OutsideSchedule { date: ymd(2025, 6, 30) };
        assert!(error.to_string().contains("2025-07-01 to 2030-12-31"));
        assert!(error.to_string().contains("2025-06-30"));
    }

    #[test]
    fn rejects_invalid_capacity() {
        for usable in [-0.01, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                calculate(&input(ymd(2026, 1, 1), usable)),
                Err(CalculationError::InvalidCapacity),
            );
        }
    }

    #[test]
    fn rejects_invalid_price() {
        for price in [0.0, -40.0, f64::NAN, f64::INFINITY] {
            let input = Input {
                certificate_price: AudPerCertificate(price),
                ..input(ymd(2026, 1, 1), 10.0)
            };
            assert_eq!(calculate(&input), Err(CalculationError::InvalidPrice));
        }
    }

    #[test]
    fn rejects_price_overflowing_rebate() {
        let input = Input {
            certificate_price: AudPerCertificate(1e308),
            ..input(ymd(2026, 1, 1), 10.0)
        };
        assert_eq!(calculate(&input), Err(CalculationError::InvalidPrice));
    }

    #[test]
    fn huge_price_with_zero_capacity() -> Result {
        let input = Input {
            certificate_price: AudPerCertificate(1e308),
            ..input(ymd(2026, 1, 1), 0.0)
        };
        assert_eq!(calculate(&input)?.rebate, Aud::ZERO);
        Ok(())
    }

    #[test]
    fn validation_order() {
        let invalid_everything = Input::builder()
            .installation_date(ymd(2020, 1, 1))
            .usable_capacity(KilowattHours(-1.0))
            .certificate_price(AudPerCertificate(0.0))
            .build();
        assert_eq!(calculate(&invalid_everything), Err(CalculationError::InvalidCapacity));

        let invalid_price_and_date =
            Input { usable_capacity: KilowattHours(10.0), ..invalid_everything };
        assert_eq!(calculate(&invalid_price_and_date), Err(CalculationError::InvalidPrice));
    }

    #[test]
    fn parse_date() {
        assert_eq!(parse_installation_date("2026-05-01"), Ok(ymd(2026, 5, 1)));
        assert_eq!(parse_installation_date("2028-02-29"), Ok(ymd(2028, 2, 29)));
    }

    #[test]
    fn parse_invalid_date() {
        for text in [
            "",
            "yesterday",
            "2026-5-1",
            "2026/05/01",
            "2026-05-01T00:00:00Z",
            "2027-02-29",
            "2026-13-01",
            " 2026-05-01",
        ] {
            assert_eq!(parse_installation_date(text), Err(CalculationError::InvalidDate), "{text}");
        }
    }

    #[test]
    fn phase1_capped() {
        let calculation = calculate(&input(ymd(2026, 4, 30), 60.0)).unwrap();
        assert_eq!(calculation.phase, TaperPhase::Phase1);
        assert_eq!(calculation.period.id, "2026JanApr");
        assert_abs_diff_eq!(calculation.period.factor.0, 8.4);
        assert_abs_diff_eq!(calculation.eligible_capacity.0, 50.0);
        assert_abs_diff_eq!(calculation.weighted_capacity.0, 50.0);
        assert_abs_diff_eq!(calculation.certificates.0, 420.0, epsilon = 0.005);
        assert_abs_diff_eq!(calculation.rebate.0, 16800.0, epsilon = 0.005);
        assert_eq!(calculation.warnings, [Warning::CapacityCapped]);
        assert_eq!(calculation.buckets.len(), 1);
        assert_eq!(calculation.buckets[0].band, Band::UpTo50);
    }

    #[test]
    fn phase2_full_taper() {
        let calculation = calculate(&input(ymd(2026, 5, 1), 50.0)).unwrap();
        assert_eq!(calculation.phase, TaperPhase::Phase2);
        assert_abs_diff_eq!(calculation.period.factor.0, 6.8);
        assert_abs_diff_eq!(calculation.weighted_capacity.0, 25.7, epsilon = 0.005);
        assert_abs_diff_eq!(calculation.certificates.0, 174.76, epsilon = 0.005);
        assert_abs_diff_eq!(calculation.rebate.0, 6990.4, epsilon = 0.005);
        assert!(calculation.warnings.is_empty());
        assert_eq!(
            calculation.buckets.iter().map(|bucket| bucket.band).collect_vec(),
            [Band::UpTo14, Band::From14To28, Band::From28To50],
        );
    }

    #[test]
    fn taper_boundary_at_14() {
        let calculation = calculate(&input(ymd(2027, 1, 1), 14.0)).unwrap();
        assert_abs_diff_eq!(calculation.weighted_capacity.0, 14.0);
        assert_eq!(
            calculation.buckets.iter().map(|bucket| bucket.capacity.0).collect_vec(),
            [14.0, 0.0, 0.0],
        );
    }

    #[test]
    fn taper_boundary_at_28() {
        let calculation = calculate(&input(ymd(2027, 1, 1), 28.0)).unwrap();
        assert_abs_diff_eq!(calculation.weighted_capacity.0, 22.4, epsilon = 0.005);
        assert_eq!(
            calculation.buckets.iter().map(|bucket| bucket.capacity.0).collect_vec(),
            [14.0, 14.0, 0.0],
        );
    }

    #[test]
    fn bucket_breakdown() {
        let calculation = calculate(&input(ymd(2027, 1, 1), 38.0)).unwrap();
        let bucket = &calculation.buckets[1];
        assert_eq!(bucket.label.en, "14 - 28 kWh");
        assert_abs_diff_eq!(bucket.rate, 0.6);
        assert_abs_diff_eq!(bucket.weighted_capacity.0, 8.4, epsilon = 0.005);
        assert_abs_diff_eq!(bucket.certificates.0, 47.88, epsilon = 0.005);
        assert_abs_diff_eq!(bucket.rebate.0, 1915.2, epsilon = 0.005);
    }

    #[test]
    fn zero_capacity() {
        let calculation = calculate(&input(ymd(2027, 1, 1), 0.0)).unwrap();
        assert_eq!(calculation.buckets.len(), 1);
        assert_eq!(calculation.certificates, Certificates::ZERO);
        assert_eq!(calculation.rebate, Aud::ZERO);
        assert!(calculation.warnings.is_empty());
    }

    #[test]
    fn negative_zero_capacity() -> Result {
        let calculation = calculate(&input(ymd(2026, 1, 1), -0.0))?;
        assert!(calculation.eligible_capacity.0.is_sign_positive());
        assert!(calculation.buckets[0].capacity.0.is_sign_positive());
        let value = serde_json::to_value(&calculation)?;
        assert_eq!(value["eligible_capacity"].to_string(), "0.0");
        Ok(())
    }

    /// Totals follow the products of the unrounded values, and the bucket shares add up.
    #[test]
    fn totals_are_consistent() {
        for date in [ymd(2025, 7, 1), ymd(2026, 4, 30), ymd(2026, 5, 1), ymd(2030, 12, 31)] {
            for tenths in 0..=800 {
                let usable = f64::from(tenths) / 10.0;
                let calculation = calculate(&input(date, usable)).unwrap();

                let certificates = calculation.weighted_capacity.0 * calculation.period.factor.0;
                assert_abs_diff_eq!(calculation.certificates.0, certificates, epsilon = 0.1);
                assert_abs_diff_eq!(
                    calculation.rebate.0,
                    calculation.certificates.0 * PRICE.0,
                    epsilon = 0.01 * PRICE.0,
                );

                #[allow(clippy::cast_precision_loss)]
                let tolerance = 0.005f64.mul_add((calculation.buckets.len() + 1) as f64, 1e-6);
                let bucket_certificates: Certificates =
                    calculation.buckets.iter().map(|bucket| bucket.certificates).sum();
                let bucket_rebate: Aud =
                    calculation.buckets.iter().map(|bucket| bucket.rebate).sum();
                assert_abs_diff_eq!(
                    bucket_certificates.0,
                    calculation.certificates.0,
                    epsilon = tolerance,
                );
                assert_abs_diff_eq!(bucket_rebate.0, calculation.rebate.0, epsilon = tolerance);
            }
        }
    }

    #[test]
    fn warning_iff_above_cap() {
        for tenths in 0..=1000 {
            let usable = f64::from(tenths) / 10.0;
            let calculation = calculate(&input(ymd(2026, 1, 1), usable)).unwrap();
            if usable > 50.0 {
                assert_eq!(calculation.warnings.len(), 1, "{usable}");
                assert_abs_diff_eq!(calculation.eligible_capacity.0, 50.0);
            } else {
                assert!(calculation.warnings.is_empty(), "{usable}");
                assert_abs_diff_eq!(calculation.eligible_capacity.0, usable, epsilon = 0.005);
            }
        }
    }

    #[test]
    fn rounds_outputs() {
        let calculation = calculate(&input(ymd(2026, 5, 1), 33.333)).unwrap();
        for value in [
            calculation.eligible_capacity.0,
            calculation.weighted_capacity.0,
            calculation.certificates.0,
            calculation.rebate.0,
        ] {
            assert_abs_diff_eq!(value * 100.0, (value * 100.0).round(), epsilon = 1e-6);
        }
    }

    #[test]
    fn idempotent() -> Result {
        let input = input(ymd(2026, 5, 1), 37.5);
        let first = serde_json::to_string(&calculate(&input)?)?;
        let second = serde_json::to_string(&calculate(&input)?)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn serialized_warning_is_the_message() -> Result {
        let calculation = calculate(&input(ymd(2026, 1, 1), 75.0))?;
        let value = serde_json::to_value(&calculation)?;
        assert_eq!(
            value["warnings"][0],
            "Only the first 50 kWh of usable capacity can create STCs.",
        );
        assert_eq!(value["phase"], "phase1");
        assert_eq!(value["period"]["start"], "2026-01-01");
        Ok(())
    }

    #[test]
    fn default_price() {
        let input = Input::builder()
            .installation_date(ymd(2026, 1, 1))
            .usable_capacity(KilowattHours(10.0))
            .build();
        assert_eq!(input.certificate_price, AudPerCertificate(40.0));
    }

    #[test]
    fn trend_follows_schedule() -> Result {
        let points = trend(KilowattHours(20.0), PRICE)?;
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].period.id, "2025H2");
        assert_abs_diff_eq!(points[0].certificates.0, 186.0, epsilon = 0.005);
        assert_eq!(points[2].period.id, "2026MayDec");
        assert_abs_diff_eq!(points[2].certificates.0, (14.0 + 6.0 * 0.6) * 6.8, epsilon = 0.005);
        assert!(points.iter().tuple_windows().all(|(current, next)| next.rebate <= current.rebate));
        Ok(())
    }

    #[test]
    fn trend_propagates_invalid_input() {
        assert_eq!(
            trend(KilowattHours(10.0), AudPerCertificate::ZERO),
            Err(CalculationError::InvalidPrice),
        );
    }
}
