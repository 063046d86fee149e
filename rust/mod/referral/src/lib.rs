//! Referral module — append-only tracking of referral-link visits.
//!
//! Writes are gated by a static shared-secret `X-API-KEY` header; reads
//! return the most recent hit for a code.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use landing_core::Module;

use crate::service::ReferralService;

/// Referral module implementing the Module trait.
pub struct ReferralModule {
    service: Arc<ReferralService>,
    api_key: String,
}

impl ReferralModule {
    /// Create a new ReferralModule. `api_key` is the shared secret
    /// required on the write path.
    pub fn new(
        sql: Arc<dyn landing_sql::SQLStore>,
        api_key: String,
    ) -> Result<Self, landing_core::ServiceError> {
        let service = ReferralService::new(sql)
            .map_err(landing_core::ServiceError::from)?;
        Ok(Self { service, api_key })
    }

    /// Get a reference to the underlying ReferralService.
    pub fn service(&self) -> &Arc<ReferralService> {
        &self.service
    }
}

impl Module for ReferralModule {
    fn name(&self) -> &str {
        "referral"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.api_key.clone())
    }
}
