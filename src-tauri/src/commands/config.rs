use tauri::{AppHandle, State};
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::cache::THEME_KEY;
use crate::state::AppState;

const PREFERENCES_STORE: &str = "preferences.json";

#[tauri::command]
pub async fn get_preference(
    app: AppHandle,
    state: State<'_, AppState>,
    key: String,
) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    let value = store.get(&key).and_then(|v| v.as_str().map(|s| s.to_string()));

    // The theme is mirrored in the local state cache.
    if value.is_none() && key == THEME_KEY {
        return Ok(state.cached_theme().await?);
    }
    Ok(value)
}

#[tauri::command]
pub async fn set_preference(
    app: AppHandle,
    state: State<'_, AppState>,
    key: String,
    value: String,
) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key.as_str(), serde_json::json!(value));

    if key == THEME_KEY {
        if let Err(e) = state.cache_theme(value).await {
            warn!("Failed to cache theme: {}", e);
        }
    }

    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}
