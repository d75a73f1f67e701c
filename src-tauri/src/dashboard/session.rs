//! Explicit state transitions for the dashboard.
//!
//! `DashboardSession` owns the single mutable store, the comparison
//! selector and the chart board. Adapters call one transition per user or
//! network event and render the view it returns.

use tracing::warn;

use super::comparison::{ComparisonSelector, ComparisonView};
use super::rejection::DEFAULT_DISPLAY_LIMIT;
use super::store::{DashboardSnapshot, DashboardState};
use super::types::{MaterialCandidate, RecommendationResult, RequestPayload};
use super::view::{bind_dashboard, eco_overview_chart, profile_radar, DashboardView};
use crate::error::{EcoPackError, Result};
use crate::render::{ChartBoard, ChartSlot};

#[derive(Debug)]
pub struct DashboardSession {
    state: DashboardState,
    comparisons: ComparisonSelector,
    charts: ChartBoard,
    rejected_limit: usize,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_LIMIT)
    }
}

impl DashboardSession {
    pub fn new(rejected_limit: usize) -> Self {
        Self {
            state: DashboardState::new(),
            comparisons: ComparisonSelector::new(),
            charts: ChartBoard::new(),
            rejected_limit,
        }
    }

    /// Commit a successful prediction and redraw every result view.
    ///
    /// Earlier comparisons belong to the previous result set and are
    /// dropped; the AI comparison slot shows the new top material's radar.
    /// An empty recommended list is refused and nothing changes.
    pub fn on_prediction_succeeded(
        &mut self,
        result: RecommendationResult,
        payload: RequestPayload,
    ) -> Result<DashboardView> {
        let prediction = self.state.set_prediction(result, payload)?;
        let recommended = &prediction.result.recommended;

        self.comparisons.clear();
        self.charts = ChartBoard::new();
        self.charts
            .draw(ChartSlot::EcoOverview, eco_overview_chart(recommended));
        self.charts
            .draw(ChartSlot::AiComparison, profile_radar(&recommended[0]));

        self.view()
    }

    /// A failed prediction never touches state.
    pub fn on_prediction_failed(&self, error: &EcoPackError) {
        warn!("Prediction failed, keeping previous results: {}", error);
    }

    pub fn on_catalog_loaded(&mut self, catalog: Vec<MaterialCandidate>) {
        self.state.replace_catalog(catalog);
    }

    /// AI-vs-AI comparison. `None` means the view did not change.
    pub fn on_comparison_selected(&mut self, name: &str) -> Option<ComparisonView> {
        let snapshot = self.state.snapshot();
        let view = self
            .comparisons
            .select_recommended(snapshot.result(), name)?
            .clone();
        self.charts.draw(view.source.slot(), view.chart());
        Some(view)
    }

    /// AI-vs-catalog comparison. `Ok(None)` means the view did not change.
    pub fn on_catalog_comparison_selected(&mut self, name: &str) -> Result<Option<ComparisonView>> {
        let snapshot = self.state.snapshot();
        let selected = self
            .comparisons
            .select_catalog(snapshot.result(), &snapshot.catalog, name)?
            .cloned();
        if let Some(view) = &selected {
            self.charts.draw(view.source.slot(), view.chart());
        }
        Ok(selected)
    }

    /// Current view model; `NoRecommendationYet` before any prediction.
    pub fn view(&self) -> Result<DashboardView> {
        bind_dashboard(&self.state.snapshot(), &self.charts, self.rejected_limit)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.snapshot()
    }

    pub fn charts(&self) -> &ChartBoard {
        &self.charts
    }

    pub fn comparisons(&self) -> &ComparisonSelector {
        &self.comparisons
    }

    /// Best material for the save action.
    pub fn best_material(&self) -> Result<MaterialCandidate> {
        self.state
            .results()
            .best_material()
            .cloned()
            .ok_or(EcoPackError::NoBestMaterialSelected)
    }

    pub fn has_result(&self) -> bool {
        !self.state.results().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::PredictionForm;
    use crate::render::ChartKind;

    fn payload() -> RequestPayload {
        PredictionForm::default().to_payload()
    }

    fn result(names: &[&str]) -> RecommendationResult {
        RecommendationResult {
            recommended: names
                .iter()
                .enumerate()
                .map(|(i, n)| MaterialCandidate::new(n, 0.5 + i as f64 / 10.0, 1.0 + i as f64, 2.0))
                .collect(),
            rejected: vec![],
        }
    }

    #[test]
    fn test_prediction_draws_overview_and_radar() {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(result(&["Jute", "Cork"]), payload())
            .unwrap();

        assert!(session.charts().is_drawn(ChartSlot::EcoOverview));
        assert_eq!(
            session.charts().get(ChartSlot::AiComparison).unwrap().kind,
            ChartKind::Radar
        );
        assert!(!session.charts().is_drawn(ChartSlot::CatalogComparison));
        assert_eq!(session.best_material().unwrap().material, "Cork");
    }

    #[test]
    fn test_comparison_replaces_radar_with_line() {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(result(&["Jute", "Cork"]), payload())
            .unwrap();

        let view = session.on_comparison_selected("Cork").unwrap();
        assert_eq!(view.baseline, "Jute");
        let spec = session.charts().get(ChartSlot::AiComparison).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.series.len(), 2);
    }

    #[test]
    fn test_unknown_catalog_name_leaves_views() {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(result(&["Jute", "Cork"]), payload())
            .unwrap();
        session.on_catalog_loaded(vec![MaterialCandidate::new("Glass", 0.1, 9.0, 7.0)]);
        session.on_catalog_comparison_selected("Glass").unwrap();
        let before = session.view().unwrap();

        let outcome = session.on_catalog_comparison_selected("Styrofoam").unwrap();
        assert!(outcome.is_none());
        assert_eq!(session.view().unwrap(), before);
    }

    #[test]
    fn test_new_prediction_drops_old_comparisons() {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(result(&["Jute", "Cork"]), payload())
            .unwrap();
        session.on_catalog_loaded(vec![MaterialCandidate::new("Glass", 0.1, 9.0, 7.0)]);
        session.on_catalog_comparison_selected("Glass").unwrap();
        session.on_comparison_selected("Cork");

        session
            .on_prediction_succeeded(result(&["Hemp"]), payload())
            .unwrap();
        assert!(session.comparisons().catalog().is_none());
        assert!(session.comparisons().recommended().is_none());
        assert!(!session.charts().is_drawn(ChartSlot::CatalogComparison));
        assert_eq!(
            session.charts().get(ChartSlot::AiComparison).unwrap().kind,
            ChartKind::Radar
        );
    }

    #[test]
    fn test_empty_prediction_rejected_without_change() {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(result(&["Jute"]), payload())
            .unwrap();
        let before = session.snapshot();

        let err = session
            .on_prediction_succeeded(result(&[]), payload())
            .unwrap_err();
        assert_eq!(err, EcoPackError::EmptyResultSet);
        assert_eq!(session.snapshot(), before);
        assert!(session.charts().is_drawn(ChartSlot::EcoOverview));
    }

    #[test]
    fn test_save_needs_best_material() {
        let session = DashboardSession::default();
        assert_eq!(
            session.best_material().unwrap_err(),
            EcoPackError::NoBestMaterialSelected
        );
        assert!(!session.has_result());
    }
}
