//! Directory of approved battery models.

use std::{fs, path::Path};

use itertools::Itertools;
use serde::Deserialize;

use crate::{prelude::*, quantity::energy::KilowattHours};

#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Battery {
    pub manufacturer: String,
    pub model: String,

    #[serde(rename = "usable_kwh")]
    pub usable_capacity: Option<KilowattHours>,
}

impl Battery {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} — {}", self.manufacturer, self.model)
    }

    fn haystack(&self) -> String {
        normalize(&format!("{} {}", self.manufacturer, self.model))
    }
}

#[must_use]
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Directory(Vec<Battery>);

impl Directory {
    pub const DEFAULT_LIMIT: usize = 25;

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the battery directory `{}`", path.display()))?;
        let directory: Self = serde_json::from_str(&contents).with_context(|| {
            format!("failed to deserialize the battery directory `{}`", path.display())
        })?;
        info!(len = directory.0.len(), "loaded the battery directory");
        Ok(directory)
    }

    /// Find the batteries whose manufacturer and model contain every word of the query.
    ///
    /// An empty query matches everything.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Battery> {
        let query = normalize(query);
        let words = query.split(' ').filter(|word| !word.is_empty()).collect_vec();
        self.0
            .iter()
            .filter(|battery| {
                let haystack = battery.haystack();
                words.iter().all(|word| haystack.contains(word))
            })
            .take(limit)
            .collect()
    }

    /// First matching battery, in directory order, with a known usable capacity.
    #[must_use]
    pub fn first_known_capacity(&self, query: &str) -> Option<(&Battery, KilowattHours)> {
        self.search(query, Self::DEFAULT_LIMIT)
            .into_iter()
            .find_map(|battery| Some((battery, battery.usable_capacity?)))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ").to_lowercase()
}
