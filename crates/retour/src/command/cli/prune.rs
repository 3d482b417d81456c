use clap::Parser;
use log::info;
use retour_database::Context;
use time::{Duration, OffsetDateTime};

use crate::command::AppResult;

/// Retention used when neither `--days` nor `history.retention_days` is set.
const DEFAULT_RETENTION_DAYS: u32 = 365;

/// Delete records older than the retention period.
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Keep this many days of history instead of `history.retention_days`.
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,
}

impl Cmd {
    pub fn run(self, context: &mut Context) -> AppResult<()> {
        let days = self.retention_days(context);
        let cutoff = OffsetDateTime::now_utc() - Duration::days(i64::from(days));

        let removed = context.db.prune(cutoff)?;
        let remaining = context.db.count()?;
        info!("pruned {removed} records older than {days} days");
        println!("Removed {removed} records, {remaining} remain");
        Ok(())
    }

    fn retention_days(&self, context: &Context) -> u32 {
        self.days
            .or(context.config.history.retention_days)
            .unwrap_or(DEFAULT_RETENTION_DAYS)
    }
}
