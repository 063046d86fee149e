pub mod lead;
pub mod location;
pub mod schema;
pub mod validate;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use landing_sql::{SQLStore, Value};

use crate::geocode::Geocoder;

/// Leads service error type.
#[derive(Debug, Error)]
pub enum LeadsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<LeadsError> for landing_core::ServiceError {
    fn from(e: LeadsError) -> Self {
        match e {
            LeadsError::NotFound(m) => landing_core::ServiceError::NotFound(m),
            LeadsError::Conflict(m) => landing_core::ServiceError::Conflict(m),
            LeadsError::Validation(m) => landing_core::ServiceError::Validation(m),
            LeadsError::Storage(m) => landing_core::ServiceError::Storage(m),
            LeadsError::Internal(m) => landing_core::ServiceError::Internal(m),
        }
    }
}

/// The Leads service. Holds the SQL store and the geocoding client.
pub struct LeadsService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) geocoder: Arc<dyn Geocoder>,
}

impl LeadsService {
    /// Create a new LeadsService, initializing the DB schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Result<Arc<Self>, LeadsError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql, geocoder }))
    }

    // ── Generic CRUD helpers ──

    /// Insert a record as JSON into a table with indexed columns.
    pub(crate) fn insert_record<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
        indexes: &[(&str, Value)],
    ) -> Result<(), LeadsError> {
        let json = serde_json::to_string(record)
            .map_err(|e| LeadsError::Internal(e.to_string()))?;

        let mut cols = vec!["id", "data"];
        let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
        let mut params = vec![Value::Text(id.to_string()), Value::Text(json)];

        for (i, (col, val)) in indexes.iter().enumerate() {
            cols.push(col);
            placeholders.push(format!("?{}", i + 3));
            params.push(val.clone());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", "),
        );

        self.sql.exec(&sql, &params).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint") {
                LeadsError::Conflict(msg)
            } else {
                LeadsError::Storage(msg)
            }
        })?;

        Ok(())
    }

    /// Run a query selecting the `data` column and deserialize every row.
    pub(crate) fn query_records<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, LeadsError> {
        let rows = self
            .sql
            .query(sql, params)
            .map_err(|e| LeadsError::Storage(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| LeadsError::Internal("missing data column".into()))?;
            items.push(
                serde_json::from_str(data).map_err(|e| LeadsError::Internal(e.to_string()))?,
            );
        }
        Ok(items)
    }

    /// Like [`query_records`] but for at-most-one row.
    pub(crate) fn query_record<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, LeadsError> {
        Ok(self.query_records(sql, params)?.into_iter().next())
    }
}
