//! Remote collaborators: prediction, aggregate dashboard data, reference
//! catalog and report saving.

pub mod client;
pub mod types;

use std::future::Future;

use crate::dashboard::{MaterialCandidate, RecommendationResult, RequestPayload};
use crate::error::Result;

pub use client::HttpRecommendationService;
pub use types::{DashboardData, DashboardFilter, SaveReportRequest};

/// The recommendation backend as seen by the dashboard.
///
/// Every failure, including an `{error}` body from the service, comes back
/// as `EcoPackError::Remote`. Nothing is retried.
pub trait RecommendationService: Send + Sync {
    /// `POST /predict`
    fn predict(
        &self,
        payload: &RequestPayload,
    ) -> impl Future<Output = Result<RecommendationResult>> + Send;

    /// `GET /dashboard_data` with optional filter parameters
    fn dashboard_data(
        &self,
        filter: &DashboardFilter,
    ) -> impl Future<Output = Result<DashboardData>> + Send;

    /// `GET /materials`
    fn materials(&self) -> impl Future<Output = Result<Vec<MaterialCandidate>>> + Send;

    /// `POST /save-report`; resolves to the service's confirmation message.
    fn save_report(
        &self,
        request: &SaveReportRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}
