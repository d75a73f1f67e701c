use tauri::State;
use tracing::info;

use crate::state::AppState;

#[tauri::command]
pub async fn save_report(
    state: State<'_, AppState>,
    product_category: String,
) -> Result<String, String> {
    Ok(state.save_report(&product_category).await?)
}

/// Write the CSV report and return its path.
#[tauri::command]
pub fn export_csv(state: State<'_, AppState>) -> Result<String, String> {
    let path = state.export_csv()?;
    info!("CSV report written to {:?}", path);
    Ok(path.to_string_lossy().to_string())
}

/// Write the PDF report and return its path.
#[tauri::command]
pub async fn export_pdf(state: State<'_, AppState>) -> Result<String, String> {
    let path = state.export_pdf().await?;
    info!("PDF report written to {:?}", path);
    Ok(path.to_string_lossy().to_string())
}
