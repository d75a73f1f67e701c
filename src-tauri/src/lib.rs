pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod render;
pub mod service;
pub mod state;

#[cfg(feature = "desktop")]
mod commands;

pub use error::{EcoPackError, Result};
pub use state::AppState;

/// Install the global tracing subscriber (`RUST_LOG`, default `info`).
/// Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

#[cfg(feature = "desktop")]
pub fn run() {
    use tauri::Manager;
    use tracing::{info, warn};

    init_tracing();

    let config = config::AppConfig::load().unwrap_or_else(|e| {
        warn!("{}; falling back to default configuration", e);
        config::AppConfig::default()
    });
    info!("Using recommendation service at {}", config.service_url);

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::config::get_preference,
            commands::config::set_preference,
            commands::recommend::predict,
            commands::recommend::get_dashboard_view,
            commands::recommend::load_catalog,
            commands::recommend::compare_ai_material,
            commands::recommend::compare_catalog_material,
            commands::reports::save_report,
            commands::reports::export_csv,
            commands::reports::export_pdf,
            commands::enterprise::get_enterprise_dashboard,
            commands::enterprise::load_cached_recommendations,
        ])
        .setup(move |app| {
            let data_dir = app.path().app_data_dir()?;
            std::fs::create_dir_all(&data_dir)?;

            let service = service::HttpRecommendationService::new(&config)?;
            app.manage(AppState::new(config, service, data_dir.join("ecopack.db")));
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
