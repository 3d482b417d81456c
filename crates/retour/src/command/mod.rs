use clap::Subcommand;
use retour_database::Context;

mod cli;

/// Application result type.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Subcommand)]
#[command(infer_subcommands = true)]
pub enum RetourCmd {
    #[command(flatten)]
    Cli(cli::Cmd),
}

impl RetourCmd {
    pub fn run(self, context: &mut Context) -> AppResult<()> {
        match self {
            Self::Cli(cli) => cli.run(context),
        }
    }
}
