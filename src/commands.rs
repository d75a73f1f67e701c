use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct GetPreferenceArgs {
    key: String,
}

#[derive(Serialize)]
struct SetPreferenceArgs {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct PredictArgs {
    form: PredictionForm,
}

#[derive(Serialize)]
struct CompareArgs {
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveReportArgs {
    product_category: String,
}

#[derive(Serialize)]
struct EnterpriseArgs {
    filter: Option<DashboardFilter>,
}

// -- Types matching backend structs --

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoreWeights {
    pub cost: f64,
    pub co2: f64,
}

/// Raw form values; the backend normalizes levels and numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionForm {
    pub product_category: String,
    pub strength_score: String,
    pub weight_capacity_kg: String,
    pub biodegradability_score: String,
    pub recyclability_percent: String,
    pub moisture_resistance: String,
    pub heat_resistance: String,
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    Doughnut,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub material: String,
    pub eco_score: f64,
    pub predicted_co2: f64,
    pub predicted_cost: f64,
    pub lowest_cost: bool,
    pub lowest_co2: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Kpis {
    pub avg_eco: f64,
    pub avg_co2: f64,
    pub avg_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InsightView {
    pub lowest_co2: String,
    pub lowest_cost: String,
    pub best_overall: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardCharts {
    pub eco_overview: Option<ChartSpec>,
    pub catalog_comparison: Option<ChartSpec>,
    pub ai_comparison: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardView {
    pub product_category: String,
    pub rows: Vec<TableRow>,
    pub kpis: Kpis,
    pub insights: InsightView,
    pub ai_reason: String,
    pub rejected: Vec<String>,
    pub compare_options: Vec<String>,
    pub catalog_options: Vec<String>,
    pub charts: DashboardCharts,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComparisonSeries {
    pub label: String,
    pub values: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComparisonView {
    pub source: String,
    pub baseline: String,
    pub target: String,
    pub categories: Vec<String>,
    pub series: [ComparisonSeries; 2],
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnterpriseView {
    pub total_reports: String,
    pub top_material: String,
    pub avg_eco: String,
    pub avg_co2: String,
    pub avg_cost: String,
    pub co2_reduction: String,
    pub cost_savings: String,
    pub better_than_plastic: String,
    pub material_share: ChartSpec,
    pub cumulative_savings: ChartSpec,
    pub trend: ChartSpec,
    pub category_share: ChartSpec,
}

/// Filter for the enterprise dashboard. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardFilter {
    All,
    Material {
        name: String,
    },
    DateRange {
        start: Option<String>,
        end: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaterialCandidate {
    pub material: String,
    #[serde(default)]
    pub eco_score: f64,
    #[serde(default)]
    pub predicted_co2: f64,
    #[serde(default)]
    pub predicted_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CachedRecommendations {
    pub value: Vec<MaterialCandidate>,
    pub updated_at: String,
}

// -- Typed invoke helpers --

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

async fn call<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> Result<T, String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, args).await.map(|_| ()).map_err(js_error)
}

fn no_args() -> serde_json::Value {
    serde_json::json!({})
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    call("get_preference", &GetPreferenceArgs { key: key.to_string() }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    call_unit(
        "set_preference",
        &SetPreferenceArgs {
            key: key.to_string(),
            value: value.to_string(),
        },
    )
    .await
}

pub async fn predict(form: PredictionForm) -> Result<DashboardView, String> {
    call("predict", &PredictArgs { form }).await
}

pub async fn get_dashboard_view() -> Result<DashboardView, String> {
    call("get_dashboard_view", &no_args()).await
}

pub async fn load_catalog() -> Result<Vec<String>, String> {
    call("load_catalog", &no_args()).await
}

pub async fn compare_ai_material(name: &str) -> Result<Option<ComparisonView>, String> {
    call("compare_ai_material", &CompareArgs { name: name.to_string() }).await
}

pub async fn compare_catalog_material(name: &str) -> Result<Option<ComparisonView>, String> {
    call("compare_catalog_material", &CompareArgs { name: name.to_string() }).await
}

pub async fn save_report(product_category: &str) -> Result<String, String> {
    call(
        "save_report",
        &SaveReportArgs {
            product_category: product_category.to_string(),
        },
    )
    .await
}

/// Returns the path of the written file.
pub async fn export_csv() -> Result<String, String> {
    call("export_csv", &no_args()).await
}

/// Returns the path of the written file.
pub async fn export_pdf() -> Result<String, String> {
    call("export_pdf", &no_args()).await
}

pub async fn get_enterprise_dashboard(filter: Option<DashboardFilter>) -> Result<EnterpriseView, String> {
    call("get_enterprise_dashboard", &EnterpriseArgs { filter }).await
}

pub async fn load_cached_recommendations() -> Result<Option<CachedRecommendations>, String> {
    call("load_cached_recommendations", &no_args()).await
}
