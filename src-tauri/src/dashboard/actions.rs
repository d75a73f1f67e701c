//! Async user flows: call the service, then commit through the session.
//!
//! The session lock is only taken after a response arrives, never across an
//! await. Two overlapping predictions both commit; the one that completes
//! last is what the dashboard shows.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinError;
use tracing::info;

use super::session::DashboardSession;
use super::store::DashboardSnapshot;
use super::types::{MaterialCandidate, PredictionForm};
use super::view::{bind_enterprise, DashboardView, EnterpriseView};
use crate::error::{EcoPackError, Result};
use crate::export::{self, DocumentReport, CSV_FILENAME, PDF_FILENAME};
use crate::render::ChartBoard;
use crate::service::{DashboardFilter, RecommendationService, SaveReportRequest};

pub fn lock(session: &Mutex<DashboardSession>) -> MutexGuard<'_, DashboardSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run a prediction and commit it.
///
/// Any service failure is returned as-is and the previous result set stays
/// in place.
pub async fn run_prediction<S: RecommendationService>(
    service: &S,
    session: &Mutex<DashboardSession>,
    form: &PredictionForm,
) -> Result<DashboardView> {
    let payload = form.to_payload();

    match service.predict(&payload).await {
        Ok(result) => lock(session).on_prediction_succeeded(result, payload),
        Err(e) => {
            lock(session).on_prediction_failed(&e);
            Err(e)
        }
    }
}

/// Fetch the reference catalog and install it. Returns the material names.
pub async fn load_catalog<S: RecommendationService>(
    service: &S,
    session: &Mutex<DashboardSession>,
) -> Result<Vec<String>> {
    let catalog: Vec<MaterialCandidate> = service.materials().await?;
    let names = catalog.iter().map(|m| m.material.clone()).collect();
    info!("Loaded {} catalog materials", catalog.len());
    lock(session).on_catalog_loaded(catalog);
    Ok(names)
}

/// Save the current best material under `product_category`.
///
/// Fails with `NoBestMaterialSelected` before any request is made when no
/// prediction has produced a best material.
pub async fn save_report<S: RecommendationService>(
    service: &S,
    session: &Mutex<DashboardSession>,
    product_category: &str,
) -> Result<String> {
    let best = lock(session).best_material()?;
    let request = SaveReportRequest::new(product_category, &best);
    service.save_report(&request).await
}

pub async fn fetch_enterprise<S: RecommendationService>(
    service: &S,
    filter: &DashboardFilter,
) -> Result<EnterpriseView> {
    let data = service.dashboard_data(filter).await?;
    Ok(bind_enterprise(&data))
}

/// Build and write the CSV report into `dir`.
pub fn export_csv(session: &Mutex<DashboardSession>, dir: &Path) -> Result<PathBuf> {
    let csv = export::build_csv(&lock(session).snapshot())?;
    export::write_report(dir, CSV_FILENAME, csv.as_bytes())
        .map_err(|e| EcoPackError::Export(format!("{:#}", e)))
}

/// Snapshot and drawn charts as they are after waiting `settle`.
///
/// Validation happens before the wait so an empty dashboard fails at once.
async fn settled_state(
    session: &Mutex<DashboardSession>,
    settle: Duration,
) -> Result<(DashboardSnapshot, ChartBoard)> {
    if !lock(session).has_result() {
        return Err(EcoPackError::NothingToExport);
    }

    tokio::time::sleep(settle).await;

    let guard = lock(session);
    Ok((guard.snapshot(), guard.charts().clone()))
}

fn export_task_failed(e: JoinError) -> EcoPackError {
    EcoPackError::Export(format!("Export task failed: {}", e))
}

/// Assemble the document report after waiting `settle` for pending draws.
///
/// Charts are rasterized on the blocking pool.
pub async fn build_document_report(
    session: &Mutex<DashboardSession>,
    settle: Duration,
) -> Result<DocumentReport> {
    let (snapshot, charts) = settled_state(session, settle).await?;
    tokio::task::spawn_blocking(move || export::build_document(&snapshot, &charts))
        .await
        .map_err(export_task_failed)?
}

/// Build the document report and write it as a PDF into `dir`.
pub async fn export_pdf(
    session: &Mutex<DashboardSession>,
    dir: &Path,
    settle: Duration,
) -> Result<PathBuf> {
    let (snapshot, charts) = settled_state(session, settle).await?;
    let dir = dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let report = export::build_document(&snapshot, &charts)?;
        let bytes = export::write_pdf(&report);
        export::write_report(&dir, PDF_FILENAME, &bytes)
            .map_err(|e| EcoPackError::Export(format!("{:#}", e)))
    })
    .await
    .map_err(export_task_failed)?
}
