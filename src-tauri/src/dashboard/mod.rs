//! Recommendation-results pipeline for the EcoPack dashboard.
//!
//! Holds the latest AI result set, derives analytics from it and binds the
//! views and exports the frontend renders.
//!
//! # Architecture
//!
//! - **Store**: one slot with the latest result and the payload that produced it
//! - **Analytics**: pure reductions (KPIs, insights, minimum flags, comparison pairs)
//! - **Session**: explicit transitions (`on_prediction_succeeded`, `on_comparison_selected`)
//! - **Actions**: async flows that call the remote service and commit results
//!
//! # Example
//!
//! ```ignore
//! use ecopack_tauri::dashboard::{DashboardSession, PredictionForm};
//!
//! let mut session = DashboardSession::default();
//! let result = service.predict(&form.to_payload()).await?;
//! let view = session.on_prediction_succeeded(result, form.to_payload())?;
//! println!("{}", view.ai_reason);
//! ```

pub mod actions;
pub mod analytics;
pub mod comparison;
pub mod rejection;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use actions::{
    build_document_report, export_csv, export_pdf, fetch_enterprise, load_catalog, run_prediction,
    save_report,
};
pub use analytics::{
    build_comparison_series, compute_insights, compute_kpis, flag_minimum, min_of,
    ComparisonSeries, Insights, Kpis, COMPARISON_CATEGORIES,
};
pub use comparison::{ComparisonSelector, ComparisonSource, ComparisonView};
pub use rejection::{
    format_reasons, format_rejections, render_rejections, FormattedRejection,
    DEFAULT_DISPLAY_LIMIT, NO_REASON, NO_REJECTIONS,
};
pub use session::DashboardSession;
pub use store::{DashboardSnapshot, DashboardState, Prediction, ResultStore};
pub use types::{
    level_to_score, Level, MaterialCandidate, Metric, PredictionForm, Reasons,
    RecommendationResult, RequestPayload, ScoreWeights,
};
pub use view::{bind_dashboard, bind_enterprise, DashboardView, EnterpriseView, TableRow};
