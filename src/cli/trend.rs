use clap::Parser;

use crate::{
    cli::{
        capacity::{CapacityArgs, DirectoryArgs},
        estimate::PriceArgs,
    },
    core::calculator::trend,
    i18n::Language,
    prelude::*,
    tables::build_trend_table,
};

#[derive(Parser)]
pub struct TrendArgs {
    #[clap(flatten)]
    pub capacity: CapacityArgs,

    #[clap(flatten)]
    pub directory: DirectoryArgs,

    #[clap(flatten)]
    pub price: PriceArgs,

    /// Print the trend as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

impl TrendArgs {
    #[instrument(skip_all)]
    pub fn run(&self, language: Language) -> Result {
        let usable_capacity = self.capacity.resolve(&self.directory)?;
        let points = trend(usable_capacity, self.price.certificate_price)?;
        info!(len = points.len(), usable_capacity = ?usable_capacity, "calculated the trend");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&points)?);
        } else {
            println!("{}", build_trend_table(&points, language));
        }
        Ok(())
    }
}
