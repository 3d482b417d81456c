use super::{SqlString, push_where};

/// Select rows from an existing table
#[derive(Default, Debug, Clone)]
pub struct SelectStatement<'a> {
    pub from: Vec<&'a str>,
    pub selects: Vec<SelectExpr>,
    pub r#where: Vec<(&'a str, &'a str)>,
    pub limit: Option<usize>,
    pub orderby: Option<(&'a str, &'a str)>,
}

#[derive(Debug, Clone)]
pub struct SelectExpr {
    pub expr: String,
    pub alias: Option<String>,
}

impl SqlString for SelectStatement<'_> {
    /// Convert the [`SelectStatement`] into a runnable SQL string.
    fn to_sql(&self) -> String {
        let mut sql = String::new();
        sql.push_str("SELECT ");
        sql.push_str(
            &self
                .selects
                .iter()
                .map(|select| {
                    if let Some(alias) = &select.alias {
                        format!("{} AS {}", select.expr, alias)
                    } else {
                        select.expr.to_string()
                    }
                })
                .collect::<Vec<String>>()
                .join(", "),
        );
        sql.push_str(" FROM ");
        sql.push_str(&self.from.join(", "));

        push_where(&mut sql, &self.r#where, "");

        if let Some((column, direction)) = &self.orderby {
            sql.push_str(&format!(" ORDER BY {column} {direction}"));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        sql
    }
}

impl<'a> SelectStatement<'a> {
    /// Construct a new [`SelectStatement`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `COUNT(column_name)` AS alias in the selected fields.
    ///
    /// * `column_name`: The name of the column to count. Can be "*" to count all rows.
    /// * `alias`: The alias for the column in the returned rows.
    pub fn count(&mut self, column_name: &'a str, alias: &'a str) -> &mut Self {
        self.selects.push(SelectExpr {
            expr: format!("count({column_name})"),
            alias: Some(alias.to_string()),
        });
        self
    }

    /// Specify the table to select results from.
    pub fn from(&mut self, table_name: &'a str) -> &mut Self {
        self.from.push(table_name);
        self
    }

    /// Specify an equality clause to add to the WHERE section of the query.
    /// NOTE: parameters are added with the name `":${clause}"`
    pub fn r#where(&mut self, clause: &'a str) -> &mut Self {
        self.compare(clause, "=")
    }

    /// Specify a clause comparing `clause` with `operator` (`>=`, `!=`, `LIKE`, ...).
    /// NOTE: parameters are added with the name `":${clause}"`
    pub fn compare(&mut self, clause: &'a str, operator: &'a str) -> &mut Self {
        self.r#where.push((clause, operator));
        self
    }

    /// Specify which column to add to the selection list.
    pub fn column(&mut self, column: &'a str) -> &mut Self {
        self.selects.push(SelectExpr {
            expr: column.to_string(),
            alias: None,
        });
        self
    }

    /// Specify a limit on the maximum number of rows returned.
    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Specify an ORDER BY clause to order the results in the provided direction.
    pub fn orderby(&mut self, column: &'a str, direction: &'a str) -> &mut Self {
        self.orderby = Some((column, direction));
        self
    }
}

#[test]
fn test_to_sql() {
    let query = super::Query::select()
        .column("id")
        .column("command")
        .column("working_directory")
        .column("exit_status")
        .column("timestamp")
        .from("history")
        .compare("timestamp", ">=")
        .r#where("working_directory")
        .compare("exit_status", "!=")
        .compare("command", "LIKE")
        .limit(100)
        .orderby("timestamp", "DESC")
        .to_owned();

    assert_eq!(
        query.to_sql(),
        String::from(concat!(
            "SELECT id, command, working_directory, exit_status, timestamp FROM history ",
            "WHERE timestamp >= :timestamp AND working_directory = :working_directory ",
            "AND exit_status != :exit_status AND command LIKE :command ",
            "ORDER BY timestamp DESC LIMIT 100",
        ))
    );
}

#[test]
fn test_to_sql_count_without_where() {
    let query = super::Query::select()
        .count("*", "total")
        .from("history")
        .to_owned();

    assert_eq!(query.to_sql(), "SELECT count(*) AS total FROM history");
}
