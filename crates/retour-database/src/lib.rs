use clap::ValueEnum;
use database::{Database, DatabaseError, sqlite::Sqlite};
use retour_common::{config::Config, utils};
use time::{Duration, OffsetDateTime, Time};

pub mod database;
pub mod record;

/// Context object
///
/// * `cwd`: The current working directory of the shell.
/// * `db`: The retour database implementation.
/// * `config`: The loaded retour configuration.
pub struct Context {
    pub cwd: String,
    pub db: Box<dyn Database>,
    pub config: Config,
}

impl Context {
    /// Open the database described by `config` and capture the current directory.
    ///
    /// # Errors
    /// Will return `Err` if the database cannot be opened or initialized.
    pub fn new(config: Config) -> Result<Self, DatabaseError> {
        let db = Sqlite::new(&config)?;
        Ok(Self {
            cwd: utils::get_current_dir(),
            db: Box::new(db),
            config,
        })
    }
}

/// How far back a search should look.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Commands run since midnight (UTC).
    Today,
    /// Commands run since midnight (UTC) of the previous day.
    Yesterday,
    /// Commands run in the last seven days.
    #[value(name = "thelastweek")]
    LastWeek,
    /// Everything.
    #[default]
    #[value(name = "alltime")]
    AllTime,
}

impl TimeRange {
    /// The earliest timestamp included by this range, relative to `now`.
    #[must_use]
    pub fn since(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        let midnight = now.replace_time(Time::MIDNIGHT);
        match self {
            Self::Today => Some(midnight),
            Self::Yesterday => Some(midnight - Duration::days(1)),
            Self::LastWeek => Some(now - Duration::weeks(1)),
            Self::AllTime => None,
        }
    }
}

/// Filter records by how the command exited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ResultFilter {
    #[default]
    All,
    /// Exit status 0 only.
    Success,
    /// Any non-zero exit status.
    Failed,
}

/// Optional filters that can be used for searching for `Record` objects.
#[derive(Default, Clone, Debug)]
pub struct RecordFilters {
    pub time_range: TimeRange,
    pub result: ResultFilter,
    pub cwd: Option<String>,
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(unix: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(unix).unwrap()
    }

    #[test]
    fn test_time_range_since() {
        // 2024-03-10 15:30:00 UTC
        let now = at(1_710_084_600);

        // 2024-03-10 00:00:00 UTC
        assert_eq!(TimeRange::Today.since(now), Some(at(1_710_028_800)));
        // 2024-03-09 00:00:00 UTC
        assert_eq!(TimeRange::Yesterday.since(now), Some(at(1_709_942_400)));
        // 2024-03-03 15:30:00 UTC
        assert_eq!(TimeRange::LastWeek.since(now), Some(at(1_709_479_800)));
        assert_eq!(TimeRange::AllTime.since(now), None);
    }

    #[test]
    fn test_value_names() {
        assert_eq!(
            TimeRange::from_str("thelastweek", false),
            Ok(TimeRange::LastWeek)
        );
        assert_eq!(TimeRange::from_str("alltime", false), Ok(TimeRange::AllTime));
        assert_eq!(ResultFilter::from_str("failed", false), Ok(ResultFilter::Failed));
        assert!(ResultFilter::from_str("broken", false).is_err());
    }
}
