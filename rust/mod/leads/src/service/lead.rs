use chrono::NaiveDate;

use landing_core::{new_id, now_rfc3339};
use landing_sql::Value;

use crate::model::{CreateLead, Lead};
use crate::service::{validate, LeadsError, LeadsService};

impl LeadsService {
    /// Submit a new lead.
    ///
    /// Validates field shapes, attaches the resolved city for the session
    /// (when one was stored earlier), and rejects a (email, mobile) pair
    /// that already exists — the existing row is never touched.
    pub fn create_lead(&self, input: CreateLead) -> Result<Lead, LeadsError> {
        validate::validate_lead(&input)?;

        let email = input.email.trim().to_string();
        let mobile = input.mobile.trim().to_string();

        if self.find_lead_by_contact(&email, &mobile)?.is_some() {
            return Err(LeadsError::Conflict(format!(
                "a lead already exists for {} / {}",
                email, mobile
            )));
        }

        let resolved_city = match input.session_id.as_deref() {
            Some(session_id) => self
                .find_location_by_session(session_id)?
                .and_then(|loc| loc.city),
            None => None,
        };

        let now = now_rfc3339();
        let lead = Lead {
            id: new_id(),
            name: input.name.trim().to_string(),
            mobile,
            email,
            location: input
                .location
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            session_id: input.session_id,
            resolved_city,
            created_at: now.clone(),
        };

        self.insert_record(
            "leads",
            &lead.id,
            &lead,
            &[
                ("name", Value::Text(lead.name.clone())),
                ("mobile", Value::Text(lead.mobile.clone())),
                ("email", Value::Text(lead.email.clone())),
                ("session_id", Value::from(lead.session_id.clone())),
                ("created_at", Value::Text(now)),
                ("created_date", Value::Text(today_ymd())),
            ],
        )?;

        Ok(lead)
    }

    /// Find a lead by its (email, mobile) pair.
    pub fn find_lead_by_contact(
        &self,
        email: &str,
        mobile: &str,
    ) -> Result<Option<Lead>, LeadsError> {
        self.query_record(
            "SELECT data FROM leads WHERE email = ?1 AND mobile = ?2",
            &[Value::Text(email.to_string()), Value::Text(mobile.to_string())],
        )
    }

    /// List every lead, newest first.
    pub fn list_leads(&self) -> Result<Vec<Lead>, LeadsError> {
        self.query_records("SELECT data FROM leads ORDER BY created_at DESC", &[])
    }

    /// List leads created on a given day.
    ///
    /// `created_date` accepts flexible day-month-year input like `1-1-2025`
    /// or `01-01-2025`; time of day is ignored.
    pub fn list_leads_by_date(&self, created_date: &str) -> Result<Vec<Lead>, LeadsError> {
        let day = normalize_created_date(created_date)?;
        self.query_records(
            "SELECT data FROM leads WHERE created_date = ?1 ORDER BY created_at DESC",
            &[Value::Text(day)],
        )
    }
}

/// Parse a flexible `d-M-yyyy` string and normalize it to the `YYYY-MM-DD`
/// form stored in the `created_date` column.
pub fn normalize_created_date(input: &str) -> Result<String, LeadsError> {
    NaiveDate::parse_from_str(input.trim(), "%d-%m-%Y")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| {
            LeadsError::Validation(
                "createdDate must be a valid date in DD-MM-YYYY format (e.g. 01-01-2025)".into(),
            )
        })
}

fn today_ymd() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
