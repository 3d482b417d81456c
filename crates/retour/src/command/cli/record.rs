//! Stores one finished shell command in the retour db.
use clap::Parser;
use log::debug;
use retour_database::{Context, record::model::Record};
use time::OffsetDateTime;

use crate::command::AppResult;

/// Record a command once the shell knows how it exited.
/// For ZSH, this is called from the precmd hook.
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Exit status of the command.
    #[arg(long, short, allow_negative_numbers = true)]
    exit: i64,

    /// Directory the command ran in; defaults to the current directory.
    #[arg(long)]
    cwd: Option<String>,

    /// Unix timestamp the command started at; defaults to now.
    #[arg(long)]
    timestamp: Option<i64>,

    /// The command line as typed.
    #[arg(last = true, required = true)]
    command: Vec<String>,
}

impl Cmd {
    pub fn run(self, context: &mut Context) -> AppResult<()> {
        let command_line = self.command.join(" ");
        if command_line.trim().is_empty() {
            debug!("not recording an empty command line");
            return Ok(());
        }
        if context.config.history.is_excluded(&command_line) {
            debug!("not recording excluded command: {command_line}");
            return Ok(());
        }

        let timestamp = match self.timestamp {
            Some(unix) => OffsetDateTime::from_unix_timestamp(unix)?,
            None => OffsetDateTime::now_utc(),
        };
        let record: Record = Record::capture()
            .command_line(command_line)
            .timestamp(timestamp)
            .cwd(self.cwd.unwrap_or_else(|| context.cwd.clone()))
            .exit_status(self.exit)
            .build()
            .into();

        let id = context.db.save(&record)?;
        debug!("recorded {} as {id}", record.command_line());
        // The shell hook ignores the id, but it is handy when scripting.
        println!("{id}");
        Ok(())
    }
}
