use tauri::State;

use crate::cache::CachedEntry;
use crate::dashboard::{EnterpriseView, MaterialCandidate};
use crate::service::DashboardFilter;
use crate::state::AppState;

#[tauri::command]
pub async fn get_enterprise_dashboard(
    state: State<'_, AppState>,
    filter: Option<DashboardFilter>,
) -> Result<EnterpriseView, String> {
    let filter = filter.unwrap_or_default();
    Ok(state.enterprise(&filter).await?)
}

/// Recommended list cached by the last successful prediction.
#[tauri::command]
pub async fn load_cached_recommendations(
    state: State<'_, AppState>,
) -> Result<Option<CachedEntry<Vec<MaterialCandidate>>>, String> {
    Ok(state.cached_recommendations().await?)
}
