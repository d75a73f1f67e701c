use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::cache::{CachedEntry, LocalStateCache};
use crate::config::AppConfig;
use crate::dashboard::{
    self, actions, ComparisonView, DashboardSession, DashboardView, EnterpriseView,
    MaterialCandidate, PredictionForm,
};
use crate::error::{EcoPackError, Result};
use crate::service::{DashboardFilter, HttpRecommendationService, RecommendationService};

/// Everything the command layer needs, shared across invocations.
pub struct AppState<S = HttpRecommendationService> {
    pub dashboard: Mutex<DashboardSession>,
    pub service: S,
    pub config: AppConfig,
    pub cache_path: PathBuf,
}

impl<S: RecommendationService> AppState<S> {
    pub fn new(config: AppConfig, service: S, cache_path: PathBuf) -> Self {
        Self {
            dashboard: Mutex::new(DashboardSession::new(config.rejected_display_limit)),
            service,
            config,
            cache_path,
        }
    }

    /// Open the cache and run `op` on the blocking pool.
    async fn with_cache<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&LocalStateCache) -> Result<T> + Send + 'static,
    {
        let path = self.cache_path.clone();
        tokio::task::spawn_blocking(move || op(&LocalStateCache::new(&path)?))
            .await
            .map_err(|e| EcoPackError::Cache(format!("Cache task failed: {}", e)))?
    }

    /// Predict, commit, and remember the recommended list for other pages.
    /// A cache failure is logged; the prediction itself still succeeds.
    pub async fn predict(&self, form: &PredictionForm) -> Result<DashboardView> {
        let view = dashboard::run_prediction(&self.service, &self.dashboard, form).await?;

        let recommended = actions::lock(&self.dashboard)
            .snapshot()
            .result()
            .map(|r| r.recommended.clone())
            .unwrap_or_default();
        let stored = self
            .with_cache(move |c| c.put_recommendations(&recommended))
            .await;
        if let Err(e) = stored {
            warn!("Failed to cache recommendations: {}", e);
        }
        Ok(view)
    }

    pub fn view(&self) -> Result<DashboardView> {
        actions::lock(&self.dashboard).view()
    }

    pub async fn load_catalog(&self) -> Result<Vec<String>> {
        dashboard::load_catalog(&self.service, &self.dashboard).await
    }

    pub fn compare_ai(&self, name: &str) -> Option<ComparisonView> {
        actions::lock(&self.dashboard).on_comparison_selected(name)
    }

    pub fn compare_catalog(&self, name: &str) -> Result<Option<ComparisonView>> {
        actions::lock(&self.dashboard).on_catalog_comparison_selected(name)
    }

    pub async fn save_report(&self, product_category: &str) -> Result<String> {
        dashboard::save_report(&self.service, &self.dashboard, product_category).await
    }

    pub fn export_csv(&self) -> Result<PathBuf> {
        dashboard::export_csv(&self.dashboard, &self.config.export_dir())
    }

    pub async fn export_pdf(&self) -> Result<PathBuf> {
        dashboard::export_pdf(
            &self.dashboard,
            &self.config.export_dir(),
            self.config.settle_delay(),
        )
        .await
    }

    pub async fn enterprise(&self, filter: &DashboardFilter) -> Result<EnterpriseView> {
        dashboard::fetch_enterprise(&self.service, filter).await
    }

    pub async fn cached_recommendations(
        &self,
    ) -> Result<Option<CachedEntry<Vec<MaterialCandidate>>>> {
        self.with_cache(|c| c.get_recommendations()).await
    }

    pub async fn cached_theme(&self) -> Result<Option<String>> {
        self.with_cache(|c| c.get_theme()).await
    }

    pub async fn cache_theme(&self, theme: String) -> Result<()> {
        self.with_cache(move |c| c.put_theme(&theme)).await
    }
}
