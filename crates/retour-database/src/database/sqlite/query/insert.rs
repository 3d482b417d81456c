use super::SqlString;

/// Insert any new rows into an existing table
#[derive(Default, Debug, Clone)]
pub struct InsertStatement<'a> {
    pub columns: Vec<&'a str>,
    pub table: &'a str,
}

impl SqlString for InsertStatement<'_> {
    fn to_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            self.columns
                .iter()
                .map(|col| format!(":{col}"))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

impl<'a> InsertStatement<'a> {
    /// Construct a new [`InsertStatement`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify which table to insert into.
    pub fn table(&mut self, table_name: &'a str) -> &mut Self {
        self.table = table_name;
        self
    }

    /// Specify which column to add to the insertion list.
    pub fn column(&mut self, column: &'a str) -> &mut Self {
        self.columns.push(column);
        self
    }
}
