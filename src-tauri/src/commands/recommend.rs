use tauri::State;
use tracing::info;

use crate::dashboard::{ComparisonView, DashboardView, PredictionForm};
use crate::state::AppState;

#[tauri::command]
pub async fn predict(state: State<'_, AppState>, form: PredictionForm) -> Result<DashboardView, String> {
    info!("Prediction requested for '{}'", form.product_category);
    Ok(state.predict(&form).await?)
}

/// Current dashboard view; errors before the first prediction.
#[tauri::command]
pub fn get_dashboard_view(state: State<'_, AppState>) -> Result<DashboardView, String> {
    Ok(state.view()?)
}

#[tauri::command]
pub async fn load_catalog(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    Ok(state.load_catalog().await?)
}

/// `None` means the selection matched nothing and the view is unchanged.
#[tauri::command]
pub fn compare_ai_material(
    state: State<'_, AppState>,
    name: String,
) -> Result<Option<ComparisonView>, String> {
    Ok(state.compare_ai(&name))
}

#[tauri::command]
pub fn compare_catalog_material(
    state: State<'_, AppState>,
    name: String,
) -> Result<Option<ComparisonView>, String> {
    Ok(state.compare_catalog(&name)?)
}
