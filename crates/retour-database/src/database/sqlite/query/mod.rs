use delete::DeleteStatement;
use insert::InsertStatement;
pub use select::SelectStatement;

mod delete;
mod insert;
mod select;

#[derive(Debug, Clone)]
/// Shorthand for constructing any table query
pub struct Query;

impl Query {
    /// Construct a table [`SelectStatement`]
    pub fn select<'a>() -> SelectStatement<'a> {
        SelectStatement::new()
    }

    /// Construct a table [`InsertStatement`]
    pub fn insert<'a>() -> InsertStatement<'a> {
        InsertStatement::new()
    }

    /// Construct a table [`DeleteStatement`]
    pub fn delete<'a>() -> DeleteStatement<'a> {
        DeleteStatement::new()
    }
}

/// Trait for all queries to implement to translate to a runnable SQL string.
pub trait SqlString {
    fn to_sql(&self) -> String;
}

/// Appends a WHERE section joining each `(clause, operator)` pair with AND.
///
/// Every clause binds a named parameter `:{prefix}{clause}`.
fn push_where(sql: &mut String, clauses: &[(&str, &str)], prefix: &str) {
    for (idx, (clause, operator)) in clauses.iter().enumerate() {
        sql.push_str(if idx == 0 { " WHERE " } else { " AND " });
        sql.push_str(&format!("{clause} {operator} :{prefix}{clause}"));
    }
}
