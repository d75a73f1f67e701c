//! Two-material comparisons against the current top recommendation.
//!
//! Both entry points resolve a name by exact match. A name that is not in
//! the searched set leaves the previous comparison in place.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::analytics::{build_comparison_series, ComparisonSeries, COMPARISON_CATEGORIES};
use super::types::{MaterialCandidate, RecommendationResult};
use super::view::comparison_chart;
use crate::error::{EcoPackError, Result};
use crate::render::{ChartKind, ChartSlot, ChartSpec};

/// Where the compared material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonSource {
    Recommended,
    Catalog,
}

impl ComparisonSource {
    /// The exportable chart slot this comparison is drawn into.
    pub fn slot(self) -> ChartSlot {
        match self {
            ComparisonSource::Recommended => ChartSlot::AiComparison,
            ComparisonSource::Catalog => ChartSlot::CatalogComparison,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonView {
    pub source: ComparisonSource,
    /// Always the top-ranked recommended material
    pub baseline: String,
    pub target: String,
    pub categories: Vec<String>,
    pub series: [ComparisonSeries; 2],
}

impl ComparisonView {
    fn new(source: ComparisonSource, baseline: &MaterialCandidate, target: &MaterialCandidate) -> Self {
        Self {
            source,
            baseline: baseline.material.clone(),
            target: target.material.clone(),
            categories: COMPARISON_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            series: build_comparison_series(baseline, target),
        }
    }

    pub fn chart(&self) -> ChartSpec {
        match self.source {
            ComparisonSource::Recommended => {
                comparison_chart(ChartKind::Line, "AI Material Comparison", &self.series)
            }
            ComparisonSource::Catalog => {
                comparison_chart(ChartKind::Bar, "Comparison With Database Material", &self.series)
            }
        }
    }
}

/// Exact-name lookup. Misses report `NoMatchFound`.
pub fn resolve<'a>(materials: &'a [MaterialCandidate], name: &str) -> Result<&'a MaterialCandidate> {
    materials
        .iter()
        .find(|m| m.material == name)
        .ok_or_else(|| EcoPackError::NoMatchFound(name.to_string()))
}

/// Holds the latest comparison for each source.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelector {
    recommended: Option<ComparisonView>,
    catalog: Option<ComparisonView>,
}

impl ComparisonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the top recommendation with another recommended material.
    ///
    /// Returns the new view, or `None` when `name` is not in the current
    /// recommended set (or there is no result yet); the previous view is
    /// kept in that case.
    pub fn select_recommended(
        &mut self,
        result: Option<&RecommendationResult>,
        name: &str,
    ) -> Option<&ComparisonView> {
        let recommended = result.map(|r| r.recommended.as_slice()).unwrap_or(&[]);
        let Some(baseline) = recommended.first() else {
            debug!("AI comparison for '{}' ignored: no recommendations", name);
            return None;
        };

        match resolve(recommended, name) {
            Ok(target) => {
                info!("Comparing {} against {}", target.material, baseline.material);
                self.recommended = Some(ComparisonView::new(
                    ComparisonSource::Recommended,
                    baseline,
                    target,
                ));
                self.recommended.as_ref()
            }
            Err(e) => {
                debug!("AI comparison unchanged: {}", e);
                None
            }
        }
    }

    /// Compare the top recommendation with a reference-catalog material.
    ///
    /// Fails with `NoRecommendationYet` before the first prediction. An
    /// unknown catalog name is a no-op returning `Ok(None)`.
    pub fn select_catalog(
        &mut self,
        result: Option<&RecommendationResult>,
        catalog: &[MaterialCandidate],
        name: &str,
    ) -> Result<Option<&ComparisonView>> {
        let baseline = result
            .and_then(RecommendationResult::top)
            .ok_or(EcoPackError::NoRecommendationYet)?;

        match resolve(catalog, name) {
            Ok(target) => {
                info!(
                    "Comparing catalog material {} against {}",
                    target.material, baseline.material
                );
                self.catalog = Some(ComparisonView::new(ComparisonSource::Catalog, baseline, target));
                Ok(self.catalog.as_ref())
            }
            Err(e) => {
                debug!("Catalog comparison unchanged: {}", e);
                Ok(None)
            }
        }
    }

    pub fn recommended(&self) -> Option<&ComparisonView> {
        self.recommended.as_ref()
    }

    pub fn catalog(&self) -> Option<&ComparisonView> {
        self.catalog.as_ref()
    }

    /// Drop both comparisons; used when a new result set replaces the old.
    pub fn clear(&mut self) {
        self.recommended = None;
        self.catalog = None;
    }
}
