use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use tempfile::TempDir;

use ecopack_tauri::config::AppConfig;
use ecopack_tauri::dashboard::{
    actions, build_document_report, MaterialCandidate, PredictionForm, Reasons,
    RecommendationResult, RequestPayload,
};
use ecopack_tauri::export::{CSV_FILENAME, PDF_FILENAME};
use ecopack_tauri::service::{
    DashboardData, DashboardFilter, RecommendationService, SaveReportRequest,
};
use ecopack_tauri::{AppState, EcoPackError, Result};

#[derive(Default)]
struct FakeService {
    predictions: Mutex<VecDeque<Result<RecommendationResult>>>,
    payloads: Mutex<Vec<RequestPayload>>,
    catalog: Vec<MaterialCandidate>,
    saved: Mutex<Vec<SaveReportRequest>>,
    filters: Mutex<Vec<DashboardFilter>>,
}

impl FakeService {
    fn with_predictions(predictions: Vec<Result<RecommendationResult>>) -> Self {
        Self {
            predictions: Mutex::new(predictions.into()),
            catalog: vec![
                MaterialCandidate::new("Glass", 0.95, 9.1, 7.0),
                MaterialCandidate::new("Aluminium", 0.9, 8.2, 6.4),
            ],
            ..Default::default()
        }
    }
}

impl RecommendationService for FakeService {
    async fn predict(&self, payload: &RequestPayload) -> Result<RecommendationResult> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.predictions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EcoPackError::Remote("no scripted response".into())))
    }

    async fn dashboard_data(&self, filter: &DashboardFilter) -> Result<DashboardData> {
        self.filters.lock().unwrap().push(filter.clone());
        Ok(DashboardData {
            total_reports: Some(3),
            top_material: Some("Bagasse".into()),
            cost_savings: Some(1250.5),
            materials: vec!["Bagasse".into(), "Cork".into()],
            material_counts: vec![2.0, 1.0],
            ..Default::default()
        })
    }

    async fn materials(&self) -> Result<Vec<MaterialCandidate>> {
        Ok(self.catalog.clone())
    }

    async fn save_report(&self, request: &SaveReportRequest) -> Result<String> {
        self.saved.lock().unwrap().push(request.clone());
        Ok("Report saved successfully".into())
    }
}

fn result() -> RecommendationResult {
    RecommendationResult {
        recommended: vec![
            MaterialCandidate::new("Bagasse", 0.42, 1.1, 3.2),
            MaterialCandidate::new("Cork", 0.81, 1.4, 4.5),
        ],
        rejected: vec![MaterialCandidate {
            reasons: Some(Reasons::Many(vec!["low strength".into(), "high cost".into()])),
            ..MaterialCandidate::new("PVC", 0.0, 0.0, 0.0)
        }],
    }
}

fn form() -> PredictionForm {
    PredictionForm {
        product_category: "Electronics".into(),
        strength_score: "Medium".into(),
        weight_capacity_kg: "5".into(),
        biodegradability_score: "High".into(),
        recyclability_percent: "70".into(),
        moisture_resistance: "low".into(),
        heat_resistance: "Unknown".into(),
        weights: None,
    }
}

fn app(dir: &TempDir, service: FakeService) -> AppState<FakeService> {
    let config = AppConfig {
        settle_delay_ms: 0,
        export_dir: Some(dir.path().join("exports")),
        ..Default::default()
    };
    AppState::new(config, service, dir.path().join("state.db"))
}

fn export_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join("exports").join(name)
}

#[tokio::test]
async fn test_csv_export_after_prediction() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));

    state.predict(&form()).await.unwrap();
    let path = state.export_csv().unwrap();
    assert_eq!(path, export_path(&dir, CSV_FILENAME));

    let csv = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        csv,
        "=== AI RECOMMENDED MATERIALS ===\n\
         Rank,Material,Eco Score,CO2,Cost\n\
         1,Bagasse,0.42,1.1,3.2\n\
         2,Cork,0.81,1.4,4.5\n\
         \n\
         === REJECTED MATERIALS ===\n\
         Material,Reasons\n\
         PVC,\"low strength, high cost\"\n"
    );
}

#[tokio::test]
async fn test_payload_levels_are_normalized() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));
    state.predict(&form()).await.unwrap();

    let payloads = state.service.payloads.lock().unwrap();
    let payload = &payloads[0];
    assert_eq!(payload.strength_score, 6);
    assert_eq!(payload.biodegradability_score, 9);
    assert_eq!(payload.moisture_resistance, 3);
    assert_eq!(payload.heat_resistance, 3);
    assert_eq!(payload.weight_capacity_kg, 5.0);
}

#[tokio::test]
async fn test_remote_error_leaves_state_untouched() {
    let dir = TempDir::new().unwrap();
    let state = app(
        &dir,
        FakeService::with_predictions(vec![
            Ok(result()),
            Err(EcoPackError::Remote("Invalid input".into())),
        ]),
    );

    state.predict(&form()).await.unwrap();
    let before = actions::lock(&state.dashboard).snapshot();
    let view_before = state.view().unwrap();

    let err = state.predict(&form()).await.unwrap_err();
    assert_eq!(err, EcoPackError::Remote("Invalid input".into()));
    assert_eq!(actions::lock(&state.dashboard).snapshot(), before);
    assert_eq!(state.view().unwrap(), view_before);
}

#[tokio::test]
async fn test_first_prediction_failure_keeps_dashboard_empty() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![]));

    assert!(matches!(state.predict(&form()).await, Err(EcoPackError::Remote(_))));
    assert_eq!(state.view().unwrap_err(), EcoPackError::NoRecommendationYet);
    assert!(state.cached_recommendations().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_catalog_name_is_silent_noop() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));

    let names = state.load_catalog().await.unwrap();
    assert_eq!(names, vec!["Glass", "Aluminium"]);
    state.predict(&form()).await.unwrap();

    let view = state.compare_catalog("Glass").unwrap().unwrap();
    assert_eq!(view.baseline, "Bagasse");
    let before = state.view().unwrap();

    assert_eq!(state.compare_catalog("Styrofoam").unwrap(), None);
    assert_eq!(state.view().unwrap(), before);
}

#[tokio::test]
async fn test_catalog_comparison_before_prediction() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![]));
    state.load_catalog().await.unwrap();

    assert_eq!(
        state.compare_catalog("Glass").unwrap_err(),
        EcoPackError::NoRecommendationYet
    );
    assert!(state.compare_ai("Glass").is_none());
}

#[tokio::test]
async fn test_document_pages_follow_drawn_charts() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));
    state.load_catalog().await.unwrap();
    state.predict(&form()).await.unwrap();

    let report = build_document_report(&state.dashboard, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(
        report.headings(),
        vec!["CO2 vs Cost Comparison", "AI Material Comparison"]
    );

    state.compare_catalog("Aluminium").unwrap();
    let report = build_document_report(&state.dashboard, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.pages[1].heading, "Comparison With Database Material");

    let path = state.export_pdf().await.unwrap();
    assert_eq!(path, export_path(&dir, PDF_FILENAME));
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[tokio::test]
async fn test_exports_need_a_result() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![]));

    assert_eq!(state.export_csv().unwrap_err(), EcoPackError::NothingToExport);
    assert_eq!(state.export_pdf().await.unwrap_err(), EcoPackError::NothingToExport);
    assert!(!dir.path().join("exports").exists());
}

#[tokio::test]
async fn test_save_report_uses_best_material() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));

    assert_eq!(
        state.save_report("Electronics").await.unwrap_err(),
        EcoPackError::NoBestMaterialSelected
    );
    assert!(state.service.saved.lock().unwrap().is_empty());

    state.predict(&form()).await.unwrap();
    let message = state.save_report("Food").await.unwrap();
    assert_eq!(message, "Report saved successfully");

    let saved = state.service.saved.lock().unwrap();
    assert_eq!(saved[0].selected_material, "Cork");
    assert_eq!(saved[0].product_category, "Food");
    assert_eq!(saved[0].eco_score, 0.81);
}

#[tokio::test]
async fn test_prediction_is_cached_for_other_pages() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![Ok(result())]));
    state.predict(&form()).await.unwrap();

    let cached = state.cached_recommendations().await.unwrap().unwrap();
    let names: Vec<_> = cached.value.iter().map(|m| m.material.as_str()).collect();
    assert_eq!(names, vec!["Bagasse", "Cork"]);
}

#[tokio::test]
async fn test_enterprise_filter_is_forwarded() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![]));

    let filter = DashboardFilter::Material { name: "Cork".into() };
    let view = state.enterprise(&filter).await.unwrap();
    assert_eq!(view.total_reports, "3");
    assert_eq!(view.cost_savings, "₹ 1250.5");
    assert_eq!(view.avg_eco, "-");
    assert_eq!(view.material_share.categories, vec!["Bagasse", "Cork"]);
    assert_eq!(state.service.filters.lock().unwrap()[0], filter);
}

#[tokio::test]
async fn test_theme_round_trips_through_cache() {
    let dir = TempDir::new().unwrap();
    let state = app(&dir, FakeService::with_predictions(vec![]));
    assert_eq!(state.cached_theme().await.unwrap(), None);

    state.cache_theme("dark".into()).await.unwrap();
    assert_eq!(state.cached_theme().await.unwrap().as_deref(), Some("dark"));
}

#[tokio::test]
async fn test_unopenable_cache_is_an_error_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        settle_delay_ms: 0,
        ..Default::default()
    };
    let service = FakeService::with_predictions(vec![Ok(result())]);
    let state = AppState::new(config, service, dir.path().to_path_buf());

    // Prediction still succeeds when the cache write fails.
    state.predict(&form()).await.unwrap();
    assert!(matches!(
        state.cached_recommendations().await,
        Err(EcoPackError::Cache(_))
    ));
}
