use std::path::PathBuf;

use clap::Parser;

use crate::{batteries::Directory, prelude::*, quantity::energy::KilowattHours};

/// Where to take the usable capacity from.
#[derive(Parser)]
#[group(required = true, multiple = false)]
pub struct CapacityArgs {
    /// Usable battery capacity in kilowatt-hours.
    #[clap(long = "usable-kwh")]
    pub usable_capacity: Option<KilowattHours>,

    /// Take the usable capacity of the first matching model from the battery directory.
    #[clap(long = "battery", requires = "batteries")]
    pub battery: Option<String>,
}

#[derive(Parser)]
pub struct DirectoryArgs {
    /// Battery directory JSON: an array of `manufacturer`, `model`, and `usable_kwh` records.
    #[clap(long = "batteries", env = "STC_REBATE_BATTERIES")]
    pub batteries: Option<PathBuf>,
}

impl DirectoryArgs {
    pub fn load(&self) -> Result<Directory> {
        let path = self
            .batteries
            .as_deref()
            .context("the battery directory is not set, use `--batteries`")?;
        Directory::from_path(path)
    }
}

impl CapacityArgs {
    #[instrument(skip_all)]
    pub fn resolve(&self, directory: &DirectoryArgs) -> Result<KilowattHours> {
        if let Some(usable_capacity) = self.usable_capacity {
            return Ok(usable_capacity);
        }
        let Some(query) = &self.battery else {
            bail!("either `--usable-kwh` or `--battery` is required");
        };
        let directory = directory.load()?;
        let (battery, usable_capacity) = directory
            .first_known_capacity(query)
            .with_context(|| format!("no battery with a known usable capacity matches `{query}`"))?;
        info!(battery = %battery.label(), usable_capacity = ?usable_capacity, "selected");
        Ok(usable_capacity)
    }
}
