use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use log::debug;
use retour_database::{Context, RecordFilters, ResultFilter, TimeRange, record::model::Record};

use crate::command::AppResult;
use app::SessionResult;
use view::Theme;

mod app;
mod duration;
mod editor;
mod event;
mod filter;
mod interactive;
mod tui;
mod view;
mod viewport;

#[derive(Debug, Parser)]
pub struct Cmd {
    /// Run a literal SQL query against the history table and print the commands it returns.
    #[arg(long, short, value_name = "SQL", conflicts_with_all = ["result", "time", "limit", "working_directory"])]
    query: Option<String>,

    /// Only show commands with this result.
    #[arg(long, short, value_enum, default_value_t)]
    result: ResultFilter,

    /// Only show commands run in this period.
    #[arg(long, short, value_enum, default_value_t)]
    time: TimeRange,

    /// Maximum number of commands to load.
    #[arg(long, short)]
    limit: Option<usize>,

    /// Only show commands run in this directory.
    #[arg(long, short = 'w', value_name = "DIR")]
    working_directory: Option<String>,

    /// Text to start the interactive filter with.
    filter: Vec<String>,
}

impl Cmd {
    pub fn run(self, context: &mut Context) -> AppResult<()> {
        if let Some(sql) = &self.query {
            return run_query(context, sql);
        }

        let filters = self.filters(context)?;
        debug!("search with filters {filters:?}");
        let records = context.db.search(&filters)?;
        debug!("search loaded {} records", records.len());

        let query = self.filter.join(" ");
        match interactive::run(records, &query, &Theme::default())? {
            SessionResult::Selected(record) => write_command_out(&record),
            // Nothing selected: the shell widget leaves its buffer untouched.
            SessionResult::Cancelled | SessionResult::Running => std::process::exit(1),
        }
    }

    /// Validate the flags and turn them into database filters.
    fn filters(&self, context: &Context) -> AppResult<RecordFilters> {
        let limit = match self.limit {
            Some(0) => return Err("--limit must be greater than 0".into()),
            Some(limit) => limit,
            None => context.config.search_limit(),
        };
        if let Some(dir) = &self.working_directory {
            if !Path::new(dir).is_dir() {
                return Err(format!("{dir} is not a directory").into());
            }
        }

        Ok(RecordFilters {
            time_range: self.time,
            result: self.result,
            cwd: self.working_directory.clone(),
            limit: Some(limit),
        })
    }
}

/// Print every command returned by a literal query, exiting 1 when there are none.
fn run_query(context: &Context, sql: &str) -> AppResult<()> {
    debug!("literal query: {sql}");
    let records = context.db.query(sql)?;
    debug!("query had {} results", records.len());

    if records.is_empty() {
        std::process::exit(1)
    }
    for record in &records {
        write_command_out(record)?;
    }
    Ok(())
}

/// Write the command line of `record` out to stdout
fn write_command_out(record: &Record) -> AppResult<()> {
    let mut w = io::stdout().lock();
    writeln!(w, "{}", record.command_line())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retour_common::config::{Config, SearchConfig};
    use retour_database::database::sqlite::Sqlite;
    use tempfile::TempDir;

    fn context(dir: &TempDir, config: Config) -> Context {
        Context {
            cwd: dir.path().display().to_string(),
            db: Box::new(Sqlite::open(&dir.path().join("history.db")).unwrap()),
            config,
        }
    }

    fn parse(args: &[&str]) -> Cmd {
        Cmd::try_parse_from(std::iter::once("search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cmd = parse(&[]);
        assert_eq!(cmd.query, None);
        assert_eq!(cmd.result, ResultFilter::All);
        assert_eq!(cmd.time, TimeRange::AllTime);
        assert_eq!(cmd.limit, None);
        assert!(cmd.filter.is_empty());
    }

    #[test]
    fn test_parse_flags() {
        let cmd = parse(&["-r", "failed", "-t", "thelastweek", "-l", "5", "-w", "/tmp", "git", "st"]);
        assert_eq!(cmd.result, ResultFilter::Failed);
        assert_eq!(cmd.time, TimeRange::LastWeek);
        assert_eq!(cmd.limit, Some(5));
        assert_eq!(cmd.working_directory.as_deref(), Some("/tmp"));
        assert_eq!(cmd.filter, vec!["git", "st"]);
    }

    #[test]
    fn test_query_conflicts_with_filters() {
        let parsed = Cmd::try_parse_from(["search", "-q", "SELECT * FROM history", "-l", "5"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_limit_defaults_to_config() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            search: SearchConfig { limit: Some(42) },
            ..Config::default()
        };
        let ctx = context(&dir, config);

        let filters = parse(&[]).filters(&ctx).unwrap();
        assert_eq!(filters.limit, Some(42));

        let filters = parse(&["--limit", "3"]).filters(&ctx).unwrap();
        assert_eq!(filters.limit, Some(3));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, Config::default());
        let err = parse(&["-l", "0"]).filters(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "--limit must be greater than 0");
    }

    #[test]
    fn test_working_directory_must_exist() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, Config::default());

        let missing = dir.path().join("missing");
        let missing = missing.to_str().unwrap();
        let err = parse(&["-w", missing]).filters(&ctx).unwrap_err();
        assert_eq!(err.to_string(), format!("{missing} is not a directory"));

        let present = dir.path().to_str().unwrap();
        let filters = parse(&["-w", present]).filters(&ctx).unwrap();
        assert_eq!(filters.cwd.as_deref(), Some(present));
    }
}
