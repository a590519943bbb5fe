use chrono::{NaiveDate, Utc};
use clap::Parser;

use crate::{
    cli::capacity::{CapacityArgs, DirectoryArgs},
    core::calculator::{Input, calculate, parse_installation_date},
    i18n::Language,
    prelude::*,
    quantity::currency::AudPerCertificate,
    tables::{build_breakdown_table, build_summary_table},
};

#[derive(Parser)]
pub struct EstimateArgs {
    /// Installation date, `YYYY-MM-DD`. Defaults to today in UTC.
    #[clap(long = "date", value_parser = parse_installation_date)]
    pub installation_date: Option<NaiveDate>,

    #[clap(flatten)]
    pub capacity: CapacityArgs,

    #[clap(flatten)]
    pub directory: DirectoryArgs,

    #[clap(flatten)]
    pub price: PriceArgs,

    /// Print the calculation as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Parser)]
pub struct PriceArgs {
    /// Certificate price in Australian dollars, excluding GST.
    #[clap(long = "stc-price", default_value = "40", env = "STC_PRICE_AUD")]
    pub certificate_price: AudPerCertificate,
}

impl EstimateArgs {
    #[instrument(skip_all)]
    pub fn run(&self, language: Language) -> Result {
        let input = Input::builder()
            .installation_date(
                self.installation_date.unwrap_or_else(|| Utc::now().date_naive()),
            )
            .usable_capacity(self.capacity.resolve(&self.directory)?)
            .certificate_price(self.price.certificate_price)
            .build();
        info!(
            installation_date = %input.installation_date,
            usable_capacity = ?input.usable_capacity,
            certificate_price = ?input.certificate_price,
            "calculating…"
        );

        let calculation = calculate(&input)?;
        info!(
            phase = ?calculation.phase,
            period = calculation.period.id,
            rebate = ?calculation.rebate,
            "done"
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&calculation)?);
        } else {
            println!("{}", build_summary_table(&calculation, language));
            println!("{}", build_breakdown_table(&calculation, language));
        }
        Ok(())
    }
}
