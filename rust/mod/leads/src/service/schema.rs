use landing_sql::SQLStore;

use crate::service::LeadsError;

/// Initialize the SQLite schema for leads and user locations.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), LeadsError> {
    let statements = [
        // Leads table: form submissions, deduplicated by (email, mobile).
        // created_date holds the creation day as YYYY-MM-DD so the admin
        // date filter is a plain equality.
        "CREATE TABLE IF NOT EXISTS leads (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            mobile TEXT NOT NULL,
            email TEXT NOT NULL,
            session_id TEXT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            created_date TEXT NOT NULL
        )",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_leads_contact ON leads(email, mobile)",
        "CREATE INDEX IF NOT EXISTS idx_leads_created_date ON leads(created_date)",

        // User locations: one per browser session grant.
        "CREATE TABLE IF NOT EXISTS user_locations (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL,
            city TEXT,
            lat REAL NOT NULL,
            lon REAL NOT NULL,
            accuracy REAL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_user_locations_session ON user_locations(session_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| LeadsError::Storage(e.to_string()))?;
    }

    Ok(())
}
