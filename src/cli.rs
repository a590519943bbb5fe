mod batteries;
mod capacity;
mod estimate;
mod schedule;
mod trend;

use clap::{Parser, Subcommand};

pub use self::{
    batteries::BatteriesArgs,
    estimate::EstimateArgs,
    schedule::ScheduleArgs,
    trend::TrendArgs,
};
use crate::i18n::Language;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Language of the labels.
    #[clap(
        long,
        value_enum,
        default_value = "en",
        env = "STC_REBATE_LANGUAGE",
        global = true
    )]
    pub language: Language,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: estimate the rebate for a single installation.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Compare the rebate for the same battery across the schedule periods.
    #[clap(name = "trend")]
    Trend(Box<TrendArgs>),

    /// Show the factor schedule and the taper rules.
    #[clap(name = "schedule")]
    Schedule(ScheduleArgs),

    /// Search the battery directory.
    #[clap(name = "batteries")]
    Batteries(Box<BatteriesArgs>),
}
