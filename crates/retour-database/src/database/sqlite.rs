use std::{fs, path::Path};

use log::{debug, error};
use query::{Query, SqlString};
use retour_common::config::Config;
use rusqlite::{
    Connection, OpenFlags, OptionalExtension, Row, ToSql, named_params, types::Type,
};
use time::OffsetDateTime;

use crate::{RecordFilters, ResultFilter, record::model::Record};

use super::{Database, DatabaseError};

mod query;

const TABLE: &str = "history";

/// Columns of the history table, in the order every query must return them.
const COLUMNS: [&str; 6] = [
    "id",
    "command",
    "timestamp",
    "working_directory",
    "exit_status",
    "arguments",
];

const SUCCESS: i64 = 0;

/// Sqlite database wrapper using rusqlite
pub struct Sqlite {
    pub conn: Connection,
}

impl Sqlite {
    /// Opens the database file described by `config`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the database file cannot be opened or initialized.
    pub fn new(config: &Config) -> Result<Self, DatabaseError> {
        Self::open(&config.database_file_path())
    }

    /// Opens the database file at `path`, creating the file, any missing parent
    /// directories and the schema as required.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the database file cannot be opened or initialized.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                DatabaseError::new(format!("cannot create {}: {err}", parent.display()))
            })?;
        }
        let conn = get_connection(path)?;
        Ok(Self { conn })
    }

    fn select_records<'a>() -> query::SelectStatement<'a> {
        let mut select = Query::select();
        for column in COLUMNS {
            select.column(column);
        }
        select.from(TABLE);
        select
    }
}

impl Database for Sqlite {
    fn save(&self, record: &Record) -> Result<i64, DatabaseError> {
        let mut insert = Query::insert();
        insert.table(TABLE);
        for column in &COLUMNS[1..] {
            insert.column(column);
        }

        let mut stmt = self.conn.prepare(&insert.to_sql())?;
        let row_id = stmt.insert(named_params! {
            ":command": record.command,
            ":timestamp": record.timestamp.unix_timestamp(),
            ":working_directory": record.cwd,
            ":exit_status": record.exit_status,
            ":arguments": record.arguments,
        })?;
        debug!("saved record {row_id}");
        Ok(row_id)
    }

    fn get(&self, id: i64) -> Result<Option<Record>, DatabaseError> {
        let sql = Self::select_records().r#where("id").to_sql();
        let mut stmt = self.conn.prepare(&sql)?;
        let record = stmt
            .query_row(named_params! { ":id": id }, record_from_row)
            .optional()?;
        Ok(record)
    }

    fn query(&self, sql: &str) -> Result<Vec<Record>, DatabaseError> {
        debug!("literal query: {sql}");
        let mut stmt = self.conn.prepare(sql)?;
        if stmt.column_count() != COLUMNS.len() {
            return Err(DatabaseError::new(format!(
                "query must return the columns {}, got {} columns",
                COLUMNS.join(", "),
                stmt.column_count()
            )));
        }

        let rows = stmt.query_map([], record_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn search(&self, filters: &RecordFilters) -> Result<Vec<Record>, DatabaseError> {
        debug!("search with filters: {filters:?}");
        let since = filters
            .time_range
            .since(OffsetDateTime::now_utc())
            .map(OffsetDateTime::unix_timestamp);

        let mut select = Self::select_records();
        let mut params: Vec<(&str, &dyn ToSql)> = Vec::new();

        if let Some(since) = &since {
            select.compare("timestamp", ">=");
            params.push((":timestamp", since as &dyn ToSql));
        }

        if let Some(cwd) = &filters.cwd {
            select.r#where("working_directory");
            params.push((":working_directory", cwd as &dyn ToSql));
        }

        match filters.result {
            ResultFilter::All => {}
            ResultFilter::Success => {
                select.r#where("exit_status");
                params.push((":exit_status", &SUCCESS as &dyn ToSql));
            }
            ResultFilter::Failed => {
                select.compare("exit_status", "!=");
                params.push((":exit_status", &SUCCESS as &dyn ToSql));
            }
        }

        select.orderby("timestamp", "DESC");
        if let Some(limit) = filters.limit {
            select.limit(limit);
        }

        let mut stmt = self.conn.prepare(&select.to_sql())?;
        let rows = stmt.query_map(params.as_slice(), record_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        debug!("search returned {} records", records.len());
        Ok(records)
    }

    fn count(&self) -> Result<i64, DatabaseError> {
        let sql = Query::select().count("*", "total").from(TABLE).to_sql();
        let total = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(total)
    }

    fn prune(&self, before: OffsetDateTime) -> Result<usize, DatabaseError> {
        let sql = Query::delete()
            .table(TABLE)
            .compare("timestamp", "<")
            .to_sql();
        let removed = self
            .conn
            .execute(&sql, named_params! { ":w_timestamp": before.unix_timestamp() })?;
        debug!("pruned {removed} records before {before}");
        Ok(removed)
    }
}

/// Map a row with the columns in [`COLUMNS`] order into a `Record`.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let unix: i64 = row.get(2)?;
    let timestamp = OffsetDateTime::from_unix_timestamp(unix)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(err)))?;

    Ok(Record::builder()
        .id(row.get(0)?)
        .command(row.get::<_, String>(1)?)
        .timestamp(timestamp)
        .cwd(row.get::<_, Option<String>>(3)?.unwrap_or_default())
        .exit_status(row.get(4)?)
        .arguments(row.get::<_, Option<String>>(5)?.unwrap_or_default())
        .build())
}

/// Attempt to open a connection to `path`.
///
/// Will initially try to open as RW, but if the file does not exist, this method will also
/// take care of creating the new database file before returning the open connection.
/// The schema is (re)applied either way since every statement in it is idempotent.
///
/// * `path`: Full path to the sqlite database file.
fn get_connection(path: &Path) -> Result<Connection, DatabaseError> {
    let connection = match Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE) {
        Ok(connection) => {
            debug!("Opened {}", path.display());
            connection
        }
        Err(err) => {
            debug!("Could not open {}: {err}", path.display());
            let connection = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
            )
            .inspect_err(|err| error!("Error creating database: {err}"))?;
            debug!("Created {}", path.display());
            connection
        }
    };
    initialize_database(&connection)?;
    Ok(connection)
}

/// Sets up the expected retour schema on the database.
///
/// * `conn`: Connection to the retour database.
fn initialize_database(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("initialize_database: create_history");
    let create_history = include_str!("../sql/create/history.sql");
    conn.execute_batch(create_history)
        .inspect_err(|err| error!("Error in initialize_database: {err}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn open_temp() -> (tempfile::TempDir, Sqlite) {
        let dir = tempfile::tempdir().unwrap();
        let db = Sqlite::open(&dir.path().join("nested").join("history.db")).unwrap();
        (dir, db)
    }

    fn record(command: &str, arguments: &str, cwd: &str, exit_status: i64, age: Duration) -> Record {
        Record::builder()
            .timestamp(OffsetDateTime::now_utc() - age)
            .command(command)
            .arguments(arguments)
            .cwd(cwd)
            .exit_status(exit_status)
            .build()
    }

    fn commands(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.command.as_str()).collect()
    }

    fn seed(db: &Sqlite) {
        db.save(&record("ls", "-la", "/home/user", 0, Duration::hours(1)))
            .unwrap();
        db.save(&record("git", "status", "/home/user/project", 0, Duration::hours(30)))
            .unwrap();
        db.save(&record("make", "build", "/home/user/project", 2, Duration::days(3)))
            .unwrap();
        db.save(&record("vim", "main.go", "/home/user/project", 0, Duration::days(30)))
            .unwrap();
    }

    #[test]
    fn test_save_and_get() {
        let (_dir, db) = open_temp();
        let original = record("ls", "-la", "/home/user", 0, Duration::ZERO);

        let id = db.save(&original).unwrap();
        let stored = db.get(id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.command, "ls");
        assert_eq!(stored.arguments, "-la");
        assert_eq!(stored.cwd, "/home/user");
        assert_eq!(stored.exit_status, 0);
        assert_eq!(
            stored.timestamp.unix_timestamp(),
            original.timestamp.unix_timestamp()
        );
        assert_eq!(db.get(id + 100).unwrap(), None);
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        {
            let db = Sqlite::open(&path).unwrap();
            db.save(&record("ls", "", "/", 0, Duration::ZERO)).unwrap();
        }
        let db = Sqlite::open(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_search_newest_first_with_limit() {
        let (_dir, db) = open_temp();
        seed(&db);

        let all = db.search(&RecordFilters::default()).unwrap();
        assert_eq!(commands(&all), vec!["ls", "git", "make", "vim"]);

        let limited = db
            .search(&RecordFilters {
                limit: Some(2),
                ..RecordFilters::default()
            })
            .unwrap();
        assert_eq!(commands(&limited), vec!["ls", "git"]);
    }

    #[test]
    fn test_search_result_filter() {
        let (_dir, db) = open_temp();
        seed(&db);

        let failed = db
            .search(&RecordFilters {
                result: ResultFilter::Failed,
                ..RecordFilters::default()
            })
            .unwrap();
        assert_eq!(commands(&failed), vec!["make"]);

        let success = db
            .search(&RecordFilters {
                result: ResultFilter::Success,
                ..RecordFilters::default()
            })
            .unwrap();
        assert_eq!(commands(&success), vec!["ls", "git", "vim"]);
    }

    #[test]
    fn test_search_cwd_and_time_range() {
        let (_dir, db) = open_temp();
        seed(&db);

        let project = db
            .search(&RecordFilters {
                cwd: Some(String::from("/home/user/project")),
                ..RecordFilters::default()
            })
            .unwrap();
        assert_eq!(commands(&project), vec!["git", "make", "vim"]);

        let last_week = db
            .search(&RecordFilters {
                time_range: crate::TimeRange::LastWeek,
                cwd: Some(String::from("/home/user/project")),
                result: ResultFilter::Success,
                limit: Some(10),
            })
            .unwrap();
        assert_eq!(commands(&last_week), vec!["git"]);
    }

    #[test]
    fn test_literal_query() {
        let (_dir, db) = open_temp();
        seed(&db);

        let records = db
            .query("SELECT * FROM history WHERE command = 'make'")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].arguments, "build");
        assert_eq!(records[0].exit_status, 2);
    }

    #[test]
    fn test_literal_query_errors() {
        let (_dir, db) = open_temp();

        assert!(db.query("SELECT command FROM history").is_err());
        assert!(db.query("SELEKT nonsense").is_err());
        assert!(db.query("DELETE FROM history").is_err());
    }

    #[test]
    fn test_count_and_prune() {
        let (_dir, db) = open_temp();
        seed(&db);
        assert_eq!(db.count().unwrap(), 4);

        let removed = db
            .prune(OffsetDateTime::now_utc() - Duration::days(7))
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(db.count().unwrap(), 3);
        assert_eq!(
            commands(&db.search(&RecordFilters::default()).unwrap()),
            vec!["ls", "git", "make"]
        );
    }
}
