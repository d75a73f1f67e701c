use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboard::MaterialCandidate;

/// Aggregate metrics served by `/dashboard_data`. Displayed as-is, never
/// recomputed locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardData {
    pub total_reports: Option<u64>,
    pub top_material: Option<String>,
    pub avg_eco: Option<f64>,
    pub avg_co2: Option<f64>,
    pub avg_cost: Option<f64>,
    pub co2_reduction: Option<f64>,
    pub cost_savings: Option<f64>,
    pub better_than_plastic: Option<f64>,
    pub materials: Vec<String>,
    pub material_counts: Vec<f64>,
    pub cumulative_cost: Vec<f64>,
    pub cumulative_co2: Vec<f64>,
    pub eco_trend: Vec<f64>,
    pub co2_trend: Vec<f64>,
    pub cost_trend: Vec<f64>,
    pub categories: Vec<String>,
    pub category_counts: Vec<f64>,
}

/// Narrowing applied to the aggregate dashboard query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardFilter {
    #[default]
    All,
    Material {
        name: String,
    },
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DashboardFilter {
    /// Query-string pairs for `/dashboard_data`. Open date bounds are sent
    /// as empty values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let date = |d: &Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        match self {
            DashboardFilter::All => vec![],
            DashboardFilter::Material { name } => vec![("material", name.clone())],
            DashboardFilter::DateRange { start, end } => {
                vec![("start", date(start)), ("end", date(end))]
            }
        }
    }
}

/// Body of `POST /save-report`, built from the cached best material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveReportRequest {
    pub product_category: String,
    pub selected_material: String,
    pub eco_score: f64,
    pub predicted_co2: f64,
    pub predicted_cost: f64,
}

impl SaveReportRequest {
    pub fn new(product_category: &str, best: &MaterialCandidate) -> Self {
        Self {
            product_category: product_category.to_string(),
            selected_material: best.material.clone(),
            eco_score: best.eco_score,
            predicted_co2: best.predicted_co2,
            predicted_cost: best.predicted_cost,
        }
    }
}
