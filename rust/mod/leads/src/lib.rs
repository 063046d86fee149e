//! Leads module — lead capture + browser geolocation.
//!
//! # Resources
//!
//! - **Lead** — a landing-page form submission (name/mobile/email),
//!   deduplicated by (email, mobile)
//! - **UserLocation** — one approximate location per browser session,
//!   reverse-geocoded to a city via OpenCage
//!
//! # Usage
//!
//! ```ignore
//! use leads::{LeadsModule, geocode::DisabledGeocoder};
//!
//! let module = LeadsModule::new(sql, Arc::new(DisabledGeocoder))?;
//! let router = module.routes();
//! ```

pub mod api;
pub mod geocode;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use landing_core::Module;

use crate::geocode::Geocoder;
use crate::service::LeadsService;

/// Leads module implementing the Module trait.
///
/// Holds the LeadsService and provides HTTP routes for lead submission,
/// location submission and the admin read endpoints.
pub struct LeadsModule {
    service: Arc<LeadsService>,
}

impl LeadsModule {
    /// Create a new LeadsModule.
    pub fn new(
        sql: Arc<dyn landing_sql::SQLStore>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Result<Self, landing_core::ServiceError> {
        let service = LeadsService::new(sql, geocoder)
            .map_err(landing_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying LeadsService.
    pub fn service(&self) -> &Arc<LeadsService> {
        &self.service
    }
}

impl Module for LeadsModule {
    fn name(&self) -> &str {
        "leads"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
