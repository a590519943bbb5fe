use clap::Parser;

use crate::{
    core::schedule::FactorSchedule,
    i18n::Language,
    prelude::*,
    tables::{build_rules_table, build_schedule_table},
};

#[derive(Parser)]
pub struct ScheduleArgs {
    /// Print the factor schedule as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

impl ScheduleArgs {
    #[instrument(skip_all)]
    pub fn run(&self, language: Language) -> Result {
        let periods = FactorSchedule::PROPOSED.periods();
        info!(len = periods.len(), json = self.json, "rendering the factor schedule");
        if self.json {
            println!("{}", serde_json::to_string_pretty(periods)?);
        } else {
            println!("{}", build_schedule_table(periods, language));
            println!("{}", build_rules_table(language));
        }
        Ok(())
    }
}
