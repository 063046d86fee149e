//! Field-level shape checks for submitted lead and location data.
//!
//! Failures carry the offending field name so the client can show the
//! message next to the right input.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{CreateLead, LocationRequest};
use crate::service::LeadsError;

lazy_static! {
    // Letters plus the usual name punctuation, 2-60 chars.
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z .'\-]{1,59}$").unwrap();
    // Optional leading +, then 7-15 digits.
    static ref MOBILE_RE: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap();
    // Free-text city from the form.
    static ref CITY_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z .'\-]{0,79}$").unwrap();
}

/// Validate a lead submission. Collects every failing field into one
/// message, e.g. `mobile: must be 7-15 digits; email: must be a valid email`.
pub fn validate_lead(input: &CreateLead) -> Result<(), LeadsError> {
    let mut problems = Vec::new();

    if !NAME_RE.is_match(input.name.trim()) {
        problems.push("name: must be 2-60 letters, spaces or .'-");
    }
    if !MOBILE_RE.is_match(input.mobile.trim()) {
        problems.push("mobile: must be 7-15 digits with an optional leading +");
    }
    if !EMAIL_RE.is_match(input.email.trim()) {
        problems.push("email: must be a valid email address");
    }
    if let Some(location) = input.location.as_deref() {
        if !location.trim().is_empty() && !CITY_RE.is_match(location.trim()) {
            problems.push("location: must be 1-80 letters, spaces or .'-");
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(LeadsError::Validation(problems.join("; ")))
    }
}

/// Validate a location submission: lat/lon must be present and in range.
pub fn validate_location(input: &LocationRequest) -> Result<(f64, f64), LeadsError> {
    let lat = input
        .lat
        .ok_or_else(|| LeadsError::Validation("lat: is required".into()))?;
    let lon = input
        .lon
        .ok_or_else(|| LeadsError::Validation("lon: is required".into()))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(LeadsError::Validation("lat: must be between -90 and 90".into()));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(LeadsError::Validation("lon: must be between -180 and 180".into()));
    }
    if input.session_id.trim().is_empty() {
        return Err(LeadsError::Validation("sessionId: is required".into()));
    }

    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, mobile: &str, email: &str) -> CreateLead {
        CreateLead {
            name: name.to_string(),
            mobile: mobile.to_string(),
            email: email.to_string(),
            location: None,
            session_id: None,
        }
    }

    #[test]
    fn accepts_well_formed_lead() {
        assert!(validate_lead(&lead("Asha Rao", "+919812345678", "asha@example.com")).is_ok());
        assert!(validate_lead(&lead("J. O'Neil-Smith", "9812345", "j@ex.co")).is_ok());
    }

    #[test]
    fn rejects_bad_name() {
        let err = validate_lead(&lead("A", "9812345678", "a@example.com")).unwrap_err();
        assert!(err.to_string().contains("name:"));
        assert!(validate_lead(&lead("1234", "9812345678", "a@example.com")).is_err());
    }

    #[test]
    fn rejects_bad_mobile() {
        assert!(validate_lead(&lead("Asha", "12345", "a@example.com")).is_err());
        assert!(validate_lead(&lead("Asha", "98-12-345678", "a@example.com")).is_err());
        assert!(validate_lead(&lead("Asha", "9812345678901234", "a@example.com")).is_err());
    }

    #[test]
    fn rejects_bad_email() {
        assert!(validate_lead(&lead("Asha", "9812345678", "not-an-email")).is_err());
        assert!(validate_lead(&lead("Asha", "9812345678", "a@b")).is_err());
    }

    #[test]
    fn collects_all_failing_fields() {
        let err = validate_lead(&lead("", "x", "y")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name:"));
        assert!(msg.contains("mobile:"));
        assert!(msg.contains("email:"));
    }

    #[test]
    fn optional_location_is_checked_when_present() {
        let mut input = lead("Asha", "9812345678", "a@example.com");
        input.location = Some("Pune".to_string());
        assert!(validate_lead(&input).is_ok());

        input.location = Some("<script>".to_string());
        assert!(validate_lead(&input).is_err());

        // Empty string is treated as absent.
        input.location = Some("".to_string());
        assert!(validate_lead(&input).is_ok());
    }

    #[test]
    fn location_request_requires_coordinates() {
        let req = LocationRequest {
            lat: None,
            lon: Some(73.85),
            accuracy: None,
            session_id: "s1".to_string(),
            source: None,
            ts: None,
        };
        assert!(validate_location(&req).is_err());

        let req = LocationRequest {
            lat: Some(118.0),
            lon: Some(73.85),
            accuracy: None,
            session_id: "s1".to_string(),
            source: None,
            ts: None,
        };
        assert!(validate_location(&req).is_err());

        let req = LocationRequest {
            lat: Some(18.52),
            lon: Some(73.85),
            accuracy: Some(25.0),
            session_id: "s1".to_string(),
            source: None,
            ts: None,
        };
        assert_eq!(validate_location(&req).unwrap(), (18.52, 73.85));
    }
}
