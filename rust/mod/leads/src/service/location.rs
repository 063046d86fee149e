use tracing::warn;

use landing_core::{new_id, now_rfc3339};
use landing_sql::Value;

use crate::model::{LocationRequest, UserLocation};
use crate::service::{validate, LeadsError, LeadsService};

impl LeadsService {
    /// Store a browser location for a session, reverse-geocoding it to a
    /// city first.
    ///
    /// A geocoding failure (network, bad status, unparseable body) is
    /// logged and swallowed: the location is stored without a city and the
    /// request still succeeds.
    pub async fn save_location(
        &self,
        input: LocationRequest,
    ) -> Result<UserLocation, LeadsError> {
        let (lat, lon) = validate::validate_location(&input)?;

        let city = match self.geocoder.resolve_city(lat, lon).await {
            Ok(city) => city,
            Err(e) => {
                warn!("geocoding failed for session {}: {}", input.session_id, e);
                None
            }
        };

        let loc = UserLocation {
            id: new_id(),
            city,
            session_id: input.session_id,
            lat,
            lon,
            accuracy: input.accuracy,
            created_at: now_rfc3339(),
        };

        self.insert_record(
            "user_locations",
            &loc.id,
            &loc,
            &[
                ("session_id", Value::Text(loc.session_id.clone())),
                ("city", Value::from(loc.city.clone())),
                ("lat", Value::Real(loc.lat)),
                ("lon", Value::Real(loc.lon)),
                ("accuracy", Value::from(loc.accuracy)),
                ("created_at", Value::Text(loc.created_at.clone())),
            ],
        )?;

        Ok(loc)
    }

    /// Find the most recent stored location for a session.
    pub fn find_location_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<UserLocation>, LeadsError> {
        self.query_record(
            "SELECT data FROM user_locations WHERE session_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT 1",
            &[Value::Text(session_id.to_string())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::geocode::{GeocodeError, Geocoder};
    use landing_sql::SqliteStore;

    /// Always resolves to the same city.
    struct StaticGeocoder(&'static str);

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn resolve_city(&self, _: f64, _: f64) -> Result<Option<String>, GeocodeError> {
            Ok(Some(self.0.to_string()))
        }
    }

    /// Always fails, like an unreachable provider.
    struct BrokenGeocoder;

    #[async_trait]
    impl Geocoder for BrokenGeocoder {
        async fn resolve_city(&self, _: f64, _: f64) -> Result<Option<String>, GeocodeError> {
            Err(GeocodeError::Status(503))
        }
    }

    fn test_service(geocoder: Arc<dyn Geocoder>) -> Arc<LeadsService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        LeadsService::new(sql, geocoder).unwrap()
    }

    fn request(session_id: &str) -> LocationRequest {
        LocationRequest {
            lat: Some(18.52),
            lon: Some(73.85),
            accuracy: Some(25.0),
            session_id: session_id.to_string(),
            source: Some("browser".to_string()),
            ts: Some(1e12),
        }
    }

    #[tokio::test]
    async fn stores_resolved_city() {
        let svc = test_service(Arc::new(StaticGeocoder("Pune")));

        let loc = svc.save_location(request("sess-1")).await.unwrap();
        assert_eq!(loc.city.as_deref(), Some("Pune"));
        assert_eq!(loc.lat, 18.52);
        assert_eq!(loc.accuracy, Some(25.0));

        let found = svc.find_location_by_session("sess-1").unwrap().unwrap();
        assert_eq!(found.id, loc.id);
        assert_eq!(found.city.as_deref(), Some("Pune"));
    }

    #[tokio::test]
    async fn geocode_failure_degrades_to_no_city() {
        let svc = test_service(Arc::new(BrokenGeocoder));

        let loc = svc.save_location(request("sess-1")).await.unwrap();
        assert_eq!(loc.city, None);

        // The row was still persisted.
        assert!(svc.find_location_by_session("sess-1").unwrap().is_some());
    }

    #[tokio::test]
    async fn latest_location_wins_for_a_session() {
        let svc = test_service(Arc::new(StaticGeocoder("Pune")));

        let first = svc.save_location(request("sess-1")).await.unwrap();
        let second = svc.save_location(request("sess-1")).await.unwrap();
        assert_ne!(first.id, second.id);

        let found = svc.find_location_by_session("sess-1").unwrap().unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn unknown_session_finds_nothing() {
        let svc = test_service(Arc::new(StaticGeocoder("Pune")));
        assert!(svc.find_location_by_session("nope").unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_coordinates_are_rejected() {
        let svc = test_service(Arc::new(StaticGeocoder("Pune")));
        let mut req = request("sess-1");
        req.lon = None;
        let err = svc.save_location(req).await.unwrap_err();
        assert!(matches!(err, LeadsError::Validation(_)));
    }
}
