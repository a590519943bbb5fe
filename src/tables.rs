use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    batteries::Battery,
    core::{
        calculator::{Calculation, TrendPoint},
        schedule::FactorPeriod,
        taper::TaperPhase,
    },
    fmt::FormattedPercentage,
    i18n::{Language, messages},
    quantity::currency::Aud,
};

const BAR_WIDTH: usize = 30;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

#[must_use]
pub fn build_summary_table(calculation: &Calculation, language: Language) -> Table {
    let mut table = new_table();
    table
        .add_row(vec![
            Cell::new(messages::ACTIVE_RULE.get(language)),
            Cell::new(format!(
                "{} · {}",
                calculation.phase.label().get(language),
                calculation.period.label.get(language),
            )),
        ])
        .add_row(vec![
            Cell::new(messages::BASE_FACTOR.get(language)),
            Cell::new(calculation.period.factor),
        ])
        .add_row(vec![
            Cell::new(messages::ELIGIBLE_CAPACITY.get(language)),
            Cell::new(calculation.eligible_capacity),
        ])
        .add_row(vec![
            Cell::new(messages::WEIGHTED_CAPACITY.get(language)),
            Cell::new(calculation.weighted_capacity),
        ])
        .add_row(vec![
            Cell::new(messages::CERTIFICATES.get(language)),
            Cell::new(calculation.certificates),
        ])
        .add_row(vec![
            Cell::new(messages::ESTIMATED_REBATE.get(language)).add_attribute(Attribute::Bold),
            Cell::new(calculation.rebate).add_attribute(Attribute::Bold).fg(Color::Green),
        ]);
    for warning in &calculation.warnings {
        table.add_row(vec![
            Cell::new(messages::WARNING.get(language)).fg(Color::DarkYellow),
            Cell::new(warning.label().get(language)).fg(Color::DarkYellow),
        ]);
    }
    table
}

#[must_use]
pub fn build_breakdown_table(calculation: &Calculation, language: Language) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        messages::BAND.get(language),
        messages::CAPACITY.get(language),
        messages::RATE.get(language),
        messages::WEIGHTED_CAPACITY.get(language),
        messages::CERTIFICATES.get(language),
        messages::REBATE.get(language),
    ]);
    for bucket in &calculation.buckets {
        table.add_row(vec![
            Cell::new(bucket.label.get(language)),
            Cell::new(bucket.capacity).set_alignment(CellAlignment::Right),
            Cell::new(FormattedPercentage(bucket.rate)).set_alignment(CellAlignment::Right).fg(
                if bucket.rate >= 1.0 {
                    Color::Green
                } else if bucket.rate >= 0.5 {
                    Color::DarkYellow
                } else {
                    Color::Red
                },
            ),
            Cell::new(bucket.weighted_capacity).set_alignment(CellAlignment::Right),
            Cell::new(bucket.certificates).set_alignment(CellAlignment::Right),
            Cell::new(bucket.rebate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_trend_table(points: &[TrendPoint], language: Language) -> Table {
    let max_rebate = points.iter().map(|point| point.rebate.0).fold(1.0, f64::max);

    let mut table = new_table();
    table.set_header(vec![
        messages::PERIOD.get(language),
        messages::FACTOR.get(language),
        messages::CERTIFICATES.get(language),
        messages::REBATE.get(language),
        "",
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.period.label.get(language)),
            Cell::new(point.period.factor).set_alignment(CellAlignment::Right),
            Cell::new(point.certificates).set_alignment(CellAlignment::Right),
            Cell::new(point.rebate).set_alignment(CellAlignment::Right),
            Cell::new(bar(point.rebate, max_rebate)).fg(Color::Green),
        ]);
    }
    table
}

#[must_use]
pub fn build_schedule_table(periods: &[FactorPeriod], language: Language) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        messages::PERIOD.get(language),
        messages::START.get(language),
        messages::END.get(language),
        messages::FACTOR.get(language),
    ]);
    for period in periods {
        table.add_row(vec![
            Cell::new(period.label.get(language)),
            Cell::new(period.start),
            Cell::new(period.end).add_attribute(Attribute::Dim),
            Cell::new(period.factor).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_rules_table(language: Language) -> Table {
    let mut table = new_table();
    for phase in [TaperPhase::Phase1, TaperPhase::Phase2] {
        table.add_row(vec![
            Cell::new(phase.label().get(language)).add_attribute(Attribute::Bold),
            Cell::new(phase.rules().iter().map(|rule| rule.get(language)).join("\n")),
        ]);
    }
    table
}

#[must_use]
pub fn build_batteries_table(batteries: &[&Battery], language: Language) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        messages::MANUFACTURER.get(language),
        messages::MODEL.get(language),
        messages::USABLE.get(language),
    ]);
    for battery in batteries {
        let usable_capacity = battery.usable_capacity.map_or_else(
            || Cell::new(messages::UNKNOWN.get(language)).add_attribute(Attribute::Dim),
            |capacity| Cell::new(capacity).set_alignment(CellAlignment::Right),
        );
        table.add_row(vec![
            Cell::new(&battery.manufacturer),
            Cell::new(&battery.model),
            usable_capacity,
        ]);
    }
    table
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bar(rebate: Aud, max_rebate: f64) -> String {
    let width = ((rebate.0 / max_rebate) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(width)
}
