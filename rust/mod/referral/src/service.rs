use std::sync::Arc;

use thiserror::Error;

use landing_core::{new_id, now_rfc3339};
use landing_sql::{SQLStore, Value};

use crate::model::ReferralHit;

/// Referral service error type.
#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<ReferralError> for landing_core::ServiceError {
    fn from(e: ReferralError) -> Self {
        match e {
            ReferralError::Storage(m) => landing_core::ServiceError::Storage(m),
            ReferralError::Internal(m) => landing_core::ServiceError::Internal(m),
        }
    }
}

/// The Referral service. Appends and reads referral hits.
pub struct ReferralService {
    sql: Arc<dyn SQLStore>,
}

impl ReferralService {
    /// Create a new ReferralService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, ReferralError> {
        init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    /// Append a hit row for a referral code.
    pub fn track(
        &self,
        code: &str,
        user_agent: Option<&str>,
        ip: Option<&str>,
    ) -> Result<ReferralHit, ReferralError> {
        let hit = ReferralHit {
            id: new_id(),
            code: code.to_string(),
            user_agent: user_agent.map(str::to_string),
            ip: ip.map(str::to_string),
            created_at: now_rfc3339(),
        };

        let json = serde_json::to_string(&hit)
            .map_err(|e| ReferralError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO referral_hits (id, code, data, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(hit.id.clone()),
                    Value::Text(hit.code.clone()),
                    Value::Text(json),
                    Value::Text(hit.created_at.clone()),
                ],
            )
            .map_err(|e| ReferralError::Storage(e.to_string()))?;

        tracing::debug!(code, id = %hit.id, "referral hit recorded");
        Ok(hit)
    }

    /// The most recent hit for a code, if any.
    pub fn latest_hit(&self, code: &str) -> Result<Option<ReferralHit>, ReferralError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM referral_hits WHERE code = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT 1",
                &[Value::Text(code.to_string())],
            )
            .map_err(|e| ReferralError::Storage(e.to_string()))?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let data = row
            .get_str("data")
            .ok_or_else(|| ReferralError::Internal("missing data column".into()))?;
        let hit = serde_json::from_str(data)
            .map_err(|e| ReferralError::Internal(e.to_string()))?;
        Ok(Some(hit))
    }
}

/// Initialize the SQLite schema for referral hits.
fn init_schema(sql: &dyn SQLStore) -> Result<(), ReferralError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS referral_hits (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_referral_hits_code ON referral_hits(code, created_at)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| ReferralError::Storage(e.to_string()))?;
    }

    Ok(())
}
