use clap::Parser;

use crate::{
    batteries::Directory,
    cli::capacity::DirectoryArgs,
    i18n::{Language, messages},
    prelude::*,
    tables::build_batteries_table,
};

#[derive(Parser)]
pub struct BatteriesArgs {
    /// Words to look for in the manufacturer and model. Lists everything when omitted.
    #[clap(default_value = "")]
    pub query: String,

    #[clap(long, default_value_t = Directory::DEFAULT_LIMIT)]
    pub limit: usize,

    #[clap(flatten)]
    pub directory: DirectoryArgs,
}

impl BatteriesArgs {
    #[instrument(skip_all, fields(query = %self.query))]
    pub fn run(&self, language: Language) -> Result {
        let directory = self.directory.load()?;
        let batteries = directory.search(&self.query, self.limit);
        info!(len = batteries.len(), "found");
        if batteries.is_empty() {
            println!("{}", messages::NO_MATCHES.get(language));
        } else {
            println!("{}", build_batteries_table(&batteries, language));
        }
        Ok(())
    }
}
