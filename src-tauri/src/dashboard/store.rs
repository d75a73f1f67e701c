use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::analytics::compute_insights;
use super::types::{MaterialCandidate, RecommendationResult, RequestPayload};
use crate::error::{EcoPackError, Result};

/// A result set together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub payload: RequestPayload,
    pub result: RecommendationResult,
}

/// Single slot holding the latest prediction.
///
/// The result and its payload are always replaced together, and the cached
/// best material is recomputed on every replacement so it can never come
/// from an older result set.
#[derive(Debug, Default)]
pub struct ResultStore {
    current: Option<Arc<Prediction>>,
    best: Option<MaterialCandidate>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored prediction wholesale.
    ///
    /// A result with no recommended materials is refused with
    /// `EmptyResultSet` and the previous prediction stays in place.
    pub fn set(
        &mut self,
        result: RecommendationResult,
        payload: RequestPayload,
    ) -> Result<Arc<Prediction>> {
        let insights = compute_insights(&result.recommended)?;

        let prediction = Arc::new(Prediction { payload, result });
        self.current = Some(Arc::clone(&prediction));
        self.best = Some(insights.best_overall);

        info!(
            "Stored prediction: {} recommended, {} rejected",
            prediction.result.recommended.len(),
            prediction.result.rejected.len()
        );
        Ok(prediction)
    }

    /// The current prediction, or `None` before the first one.
    pub fn get(&self) -> Option<Arc<Prediction>> {
        self.current.clone()
    }

    pub fn best_material(&self) -> Option<&MaterialCandidate> {
        self.best.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Process-wide dashboard state: the latest prediction plus the reference
/// catalog used for comparisons.
#[derive(Debug, Default)]
pub struct DashboardState {
    results: ResultStore,
    catalog: Arc<Vec<MaterialCandidate>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn set_prediction(
        &mut self,
        result: RecommendationResult,
        payload: RequestPayload,
    ) -> Result<Arc<Prediction>> {
        self.results.set(result, payload)
    }

    /// Swap in a freshly loaded reference catalog.
    pub fn replace_catalog(&mut self, catalog: Vec<MaterialCandidate>) {
        info!("Reference catalog loaded with {} materials", catalog.len());
        self.catalog = Arc::new(catalog);
    }

    pub fn catalog(&self) -> &[MaterialCandidate] {
        &self.catalog
    }

    /// Immutable view of the state as it is right now.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            prediction: self.results.get(),
            best_material: self.results.best_material().cloned(),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

/// Read-only copy of `DashboardState` handed to views, exports and saves.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub prediction: Option<Arc<Prediction>>,
    pub best_material: Option<MaterialCandidate>,
    pub catalog: Arc<Vec<MaterialCandidate>>,
}

impl DashboardSnapshot {
    pub fn result(&self) -> Option<&RecommendationResult> {
        self.prediction.as_deref().map(|p| &p.result)
    }

    pub fn require_prediction(&self) -> Result<&Prediction> {
        self.prediction
            .as_deref()
            .ok_or(EcoPackError::NoRecommendationYet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::PredictionForm;

    fn payload(category: &str) -> RequestPayload {
        PredictionForm {
            product_category: category.to_string(),
            ..Default::default()
        }
        .to_payload()
    }

    fn result(names: &[(&str, f64)]) -> RecommendationResult {
        RecommendationResult {
            recommended: names
                .iter()
                .map(|(n, eco)| MaterialCandidate::new(n, *eco, 1.0, 1.0))
                .collect(),
            rejected: vec![],
        }
    }

    #[test]
    fn test_empty_store() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert!(store.get().is_none());
        assert!(store.best_material().is_none());
    }

    #[test]
    fn test_set_replaces_pair_and_best() {
        let mut store = ResultStore::new();
        store
            .set(result(&[("Jute", 0.4), ("Cork", 0.9)]), payload("Food"))
            .unwrap();
        assert_eq!(store.best_material().unwrap().material, "Cork");

        store
            .set(result(&[("Hemp", 0.7)]), payload("Cosmetics"))
            .unwrap();
        let current = store.get().unwrap();
        assert_eq!(current.payload.product_category, "Cosmetics");
        assert_eq!(current.result.recommended[0].material, "Hemp");
        assert_eq!(store.best_material().unwrap().material, "Hemp");
    }

    #[test]
    fn test_empty_result_keeps_previous() {
        let mut store = ResultStore::new();
        store.set(result(&[("Jute", 0.4)]), payload("Food")).unwrap();
        let before = store.get();

        let err = store.set(result(&[]), payload("Toys")).unwrap_err();
        assert_eq!(err, EcoPackError::EmptyResultSet);
        assert_eq!(store.get(), before);
        assert_eq!(store.best_material().unwrap().material, "Jute");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = DashboardState::new();
        state.set_prediction(result(&[("Jute", 0.4)]), payload("Food")).unwrap();
        state.replace_catalog(vec![MaterialCandidate::new("Glass", 0.1, 5.0, 9.0)]);

        let snapshot = state.snapshot();
        state.set_prediction(result(&[("Cork", 0.8)]), payload("Food")).unwrap();
        state.replace_catalog(vec![]);

        assert_eq!(snapshot.result().unwrap().recommended[0].material, "Jute");
        assert_eq!(snapshot.best_material.as_ref().unwrap().material, "Jute");
        assert_eq!(snapshot.catalog.len(), 1);
    }

    #[test]
    fn test_require_prediction_before_first_run() {
        let snapshot = DashboardState::new().snapshot();
        assert_eq!(
            snapshot.require_prediction().unwrap_err(),
            EcoPackError::NoRecommendationYet
        );
    }
}
