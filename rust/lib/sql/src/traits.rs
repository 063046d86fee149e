use crate::error::SQLError;

/// A dynamically-typed SQL parameter or column value.
///
/// The landing tables only ever store text, integers and reals, so the
/// enum is deliberately small.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<Option<String>> for Value {
    fn from(opt: Option<String>) -> Self {
        opt.map(Value::Text).unwrap_or(Value::Null)
    }
}

impl From<Option<f64>> for Value {
    fn from(opt: Option<f64>) -> Self {
        opt.map(Value::Real).unwrap_or(Value::Null)
    }
}

/// A row returned from a SQL query — column name to value.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a text column value by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get an integer column value by name.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get a real column value by name.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Value::Real(f)) => Some(*f),
            Some(Value::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }
}

/// SQLStore provides a SQL execution interface backed by an embedded database.
pub trait SQLStore: Send + Sync {
    /// Execute a query and return rows.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement (INSERT/UPDATE/DELETE) and return affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_by_name() {
        let row = Row {
            columns: vec![
                ("id".to_string(), Value::Text("abc".to_string())),
                ("count".to_string(), Value::Integer(3)),
                ("lat".to_string(), Value::Real(12.5)),
            ],
        };
        assert_eq!(row.get_str("id"), Some("abc"));
        assert_eq!(row.get_i64("count"), Some(3));
        assert_eq!(row.get_f64("lat"), Some(12.5));
        assert_eq!(row.get("missing"), None);
        // Type mismatch returns None, not a panic.
        assert_eq!(row.get_str("count"), None);
    }

    #[test]
    fn value_from_option() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x".to_string())), Value::Text("x".into()));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some(1.5)), Value::Real(1.5));
    }
}
