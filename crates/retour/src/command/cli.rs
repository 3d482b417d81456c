use clap::Subcommand;
use retour_database::Context;

use super::AppResult;

mod init;
mod prune;
mod record;
mod search;

#[derive(Subcommand, Debug)]
#[command(infer_subcommands = true)]
pub enum Cmd {
    /// Store a finished command in the Retour database.
    Record(record::Cmd),

    /// Search the Retour history database.
    Search(search::Cmd),

    /// Delete history older than the retention period.
    Prune(prune::Cmd),

    /// Print Retour's shell init script.
    #[command()]
    Init(init::Cmd),
}

impl Cmd {
    pub fn run(self, context: &mut Context) -> AppResult<()> {
        // CLI commands block the current thread until they resolve.
        match self {
            Self::Init(init) => init.run(),
            Self::Record(record) => record.run(context),
            Self::Search(search) => search.run(context),
            Self::Prune(prune) => prune.run(context),
        }
    }
}
