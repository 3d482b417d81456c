use super::{SqlString, push_where};

/// Delete rows from a table
#[derive(Default, Debug, Clone)]
pub struct DeleteStatement<'a> {
    pub table: &'a str,
    pub r#where: Vec<(&'a str, &'a str)>,
}

impl SqlString for DeleteStatement<'_> {
    /// Convert the [`DeleteStatement`] into a runnable SQL string.
    fn to_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);
        push_where(&mut sql, &self.r#where, "w_");
        sql
    }
}

impl<'a> DeleteStatement<'a> {
    /// Construct a new [`DeleteStatement`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the table to delete from.
    pub fn table(&mut self, table_name: &'a str) -> &mut Self {
        self.table = table_name;
        self
    }

    /// Specify a clause comparing `clause` with `operator`.
    ///
    /// Parameters are bound as `:w_{clause}`.
    pub fn compare(&mut self, clause: &'a str, operator: &'a str) -> &mut Self {
        self.r#where.push((clause, operator));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::database::sqlite::query::{Query, SqlString};

    #[test]
    fn test_to_sql_multiple_clauses() {
        let query = Query::delete()
            .table("history")
            .compare("timestamp", "<")
            .compare("exit_status", "!=")
            .to_owned();

        assert_eq!(
            query.to_sql(),
            String::from(
                "DELETE FROM history WHERE timestamp < :w_timestamp AND exit_status != :w_exit_status"
            )
        );
    }

    #[test]
    fn test_to_sql_retention_delete() {
        let query = Query::delete()
            .table("history")
            .compare("timestamp", "<")
            .to_owned();

        assert_eq!(
            query.to_sql(),
            String::from("DELETE FROM history WHERE timestamp < :w_timestamp")
        );
    }

    #[test]
    fn test_to_sql_delete_all() {
        let query = Query::delete().table("temp_data").to_owned();

        assert_eq!(query.to_sql(), String::from("DELETE FROM temp_data"));
    }
}
