#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod batteries;
mod cli;
mod core;
mod fmt;
mod i18n;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    match &args.command {
        Command::Estimate(estimate) => estimate.run(args.language)?,
        Command::Trend(trend) => trend.run(args.language)?,
        Command::Schedule(schedule) => schedule.run(args.language)?,
        Command::Batteries(batteries) => batteries.run(args.language)?,
    }

    info!("done!");
    Ok(())
}
