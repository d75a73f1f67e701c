//! View models handed to the frontend.
//!
//! Binding is pure: the same snapshot and chart board always produce the
//! same view, and nothing here mutates state.

use serde::{Deserialize, Serialize};

use super::analytics::{
    compute_insights, compute_kpis, flag_minimum, ComparisonSeries, Insights, Kpis,
    COMPARISON_CATEGORIES,
};
use super::rejection::render_rejections;
use super::store::DashboardSnapshot;
use super::types::{MaterialCandidate, Metric};
use crate::error::Result;
use crate::render::{ChartBoard, ChartKind, ChartSlot, ChartSpec};
use crate::service::DashboardData;

/// One row of the ranked results table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRow {
    /// 1-based position in the service's ranking
    pub rank: usize,
    pub material: String,
    pub eco_score: f64,
    pub predicted_co2: f64,
    pub predicted_cost: f64,
    pub lowest_cost: bool,
    pub lowest_co2: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightView {
    pub lowest_co2: String,
    pub lowest_cost: String,
    pub best_overall: String,
}

impl From<&Insights> for InsightView {
    fn from(insights: &Insights) -> Self {
        Self {
            lowest_co2: format!(
                "{} ({})",
                insights.lowest_co2.material, insights.lowest_co2.predicted_co2
            ),
            lowest_cost: format!(
                "{} ({})",
                insights.lowest_cost.material, insights.lowest_cost.predicted_cost
            ),
            best_overall: format!(
                "{} (Eco: {})",
                insights.best_overall.material, insights.best_overall.eco_score
            ),
        }
    }
}

/// Charts currently drawn in each exportable slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardCharts {
    pub eco_overview: Option<ChartSpec>,
    pub catalog_comparison: Option<ChartSpec>,
    pub ai_comparison: Option<ChartSpec>,
}

impl From<&ChartBoard> for DashboardCharts {
    fn from(board: &ChartBoard) -> Self {
        Self {
            eco_overview: board.get(ChartSlot::EcoOverview).cloned(),
            catalog_comparison: board.get(ChartSlot::CatalogComparison).cloned(),
            ai_comparison: board.get(ChartSlot::AiComparison).cloned(),
        }
    }
}

/// Everything the recommendation page renders for one state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub product_category: String,
    pub rows: Vec<TableRow>,
    pub kpis: Kpis,
    pub insights: InsightView,
    pub ai_reason: String,
    pub rejected: Vec<String>,
    /// Names offered in the AI-vs-AI comparison picker
    pub compare_options: Vec<String>,
    /// Names offered in the catalog comparison picker
    pub catalog_options: Vec<String>,
    pub charts: DashboardCharts,
}

/// Bind the current prediction, catalog and drawn charts into a view.
/// Fails with `NoRecommendationYet` before the first prediction.
pub fn bind_dashboard(
    snapshot: &DashboardSnapshot,
    charts: &ChartBoard,
    rejected_limit: usize,
) -> Result<DashboardView> {
    let prediction = snapshot.require_prediction()?;
    let recommended = &prediction.result.recommended;
    let insights = compute_insights(recommended)?;

    Ok(DashboardView {
        product_category: prediction.payload.product_category.clone(),
        rows: table_rows(recommended)?,
        kpis: compute_kpis(recommended)?,
        insights: InsightView::from(&insights),
        ai_reason: ai_reason(&recommended[0]),
        rejected: render_rejections(&prediction.result.rejected, rejected_limit),
        compare_options: recommended.iter().map(|m| m.material.clone()).collect(),
        catalog_options: snapshot.catalog.iter().map(|m| m.material.clone()).collect(),
        charts: DashboardCharts::from(charts),
    })
}

pub fn table_rows(materials: &[MaterialCandidate]) -> Result<Vec<TableRow>> {
    let cheapest = flag_minimum(materials, Metric::Cost)?;
    let cleanest = flag_minimum(materials, Metric::Co2)?;

    Ok(materials
        .iter()
        .enumerate()
        .map(|(i, m)| TableRow {
            rank: i + 1,
            material: m.material.clone(),
            eco_score: m.eco_score,
            predicted_co2: m.predicted_co2,
            predicted_cost: m.predicted_cost,
            lowest_cost: cheapest[i],
            lowest_co2: cleanest[i],
        })
        .collect())
}

pub fn ai_reason(best: &MaterialCandidate) -> String {
    format!(
        "{} is recommended as the most sustainable option with Eco Score {}, CO₂ {}, and Cost Index {}.",
        best.material, best.eco_score, best.predicted_co2, best.predicted_cost
    )
}

/// CO₂ and cost bars across the ranked set.
pub fn eco_overview_chart(materials: &[MaterialCandidate]) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Bar,
        "CO₂ vs Cost",
        materials.iter().map(|m| m.material.clone()).collect(),
    )
    .with_series(
        "CO₂ Emissions",
        materials.iter().map(|m| m.predicted_co2).collect(),
    )
    .with_series("Cost", materials.iter().map(|m| m.predicted_cost).collect())
}

/// Radar profile of a single material.
pub fn profile_radar(material: &MaterialCandidate) -> ChartSpec {
    let series = ComparisonSeries::of(material);
    ChartSpec::new(ChartKind::Radar, "AI Material Profile", COMPARISON_CATEGORIES.to_vec())
        .with_series(&series.label, series.values.to_vec())
}

/// Two-series chart over `COMPARISON_CATEGORIES`.
pub fn comparison_chart(kind: ChartKind, title: &str, series: &[ComparisonSeries; 2]) -> ChartSpec {
    series.iter().fold(
        ChartSpec::new(kind, title, COMPARISON_CATEGORIES.to_vec()),
        |spec, s| spec.with_series(&s.label, s.values.to_vec()),
    )
}

/// KPI strings and charts for the enterprise page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

const MISSING: &str = "-";

pub fn bind_enterprise(data: &DashboardData) -> EnterpriseView {
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string());

    EnterpriseView {
        total_reports: data
            .total_reports
            .map(|n| n.to_string())
            .unwrap_or_else(|| MISSING.to_string()),
        top_material: data
            .top_material
            .clone()
            .unwrap_or_else(|| MISSING.to_string()),
        avg_eco: number(data.avg_eco),
        avg_co2: number(data.avg_co2),
        avg_cost: number(data.avg_cost),
        co2_reduction: number(data.co2_reduction),
        cost_savings: data
            .cost_savings
            .map(|v| format!("₹ {}", v))
            .unwrap_or_else(|| MISSING.to_string()),
        better_than_plastic: data
            .better_than_plastic
            .map(|v| format!("{}%", v))
            .unwrap_or_else(|| MISSING.to_string()),
        material_share: ChartSpec::new(ChartKind::Doughnut, "Materials Chosen", data.materials.clone())
            .with_series("Reports", data.material_counts.clone()),
        cumulative_savings: ChartSpec::new(
            ChartKind::Line,
            "Cumulative Impact",
            report_labels(data.cumulative_cost.len()),
        )
        .with_series("Cumulative INR Saved", data.cumulative_cost.clone())
        .with_series("Cumulative CO₂ Avoided", data.cumulative_co2.clone()),
        trend: ChartSpec::new(ChartKind::Line, "Report Trend", report_labels(data.eco_trend.len()))
            .with_series("Eco Score", data.eco_trend.clone())
            .with_series("CO₂", data.co2_trend.clone())
            .with_series("Cost", data.cost_trend.clone()),
        category_share: ChartSpec::new(ChartKind::Pie, "Product Categories", data.categories.clone())
            .with_series("Reports", data.category_counts.clone()),
    }
}

fn report_labels(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Report {}", i)).collect()
}
