use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use super::types::{DashboardData, DashboardFilter, SaveReportRequest};
use super::RecommendationService;
use crate::config::AppConfig;
use crate::dashboard::{MaterialCandidate, RecommendationResult, RequestPayload};
use crate::error::{EcoPackError, Result};

const USER_AGENT: &str = "EcoPack/1.0";

/// Bodies either carry the expected payload or a service-reported error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Failure { error: String },
    Success(T),
}

#[derive(Debug, Deserialize)]
struct SaveConfirmation {
    #[serde(default)]
    message: String,
}

/// Talks to the recommendation service over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpRecommendationService {
    client: reqwest::Client,
    base: Url,
}

impl HttpRecommendationService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| EcoPackError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: base_url(&config.service_url)?,
        })
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| EcoPackError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    async fn read_body(&self, response: reqwest::Response, url: &Url) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EcoPackError::Remote(format!("Failed to read response from {}: {}", url, e)))?;

        if !status.is_success() {
            warn!("{} returned {}", url, status);
            return Err(EcoPackError::Remote(status_message(status, &body)));
        }
        Ok(body)
    }

    async fn get(&self, url: Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await?;
        self.read_body(response, &url).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<String> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        self.read_body(response, &url).await
    }
}

impl RecommendationService for HttpRecommendationService {
    async fn predict(&self, payload: &RequestPayload) -> Result<RecommendationResult> {
        let url = self.endpoint("predict")?;
        info!("Requesting prediction for '{}'", payload.product_category);
        let body = self.post(url, payload).await?;
        decode_prediction(&body)
    }

    async fn dashboard_data(&self, filter: &DashboardFilter) -> Result<DashboardData> {
        let mut url = self.endpoint("dashboard_data")?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let body = self.get(url).await?;
        decode_dashboard(&body)
    }

    async fn materials(&self) -> Result<Vec<MaterialCandidate>> {
        let url = self.endpoint("materials")?;
        let body = self.get(url).await?;
        decode_materials(&body)
    }

    async fn save_report(&self, request: &SaveReportRequest) -> Result<String> {
        let url = self.endpoint("save-report")?;
        info!("Saving report for {}", request.selected_material);
        let body = self.post(url, request).await?;
        decode_save(&body)
    }
}

/// Base URLs always end in `/` so endpoint joins keep any path prefix.
fn base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw)
        .map_err(|e| EcoPackError::Config(format!("Invalid service_url '{}': {}", raw, e)))
}

fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(Envelope::Failure { error }) => error,
        _ => format!(
            "Service error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| EcoPackError::Remote(format!("Malformed {} response: {}", what, e)))?;
    match envelope {
        Envelope::Success(value) => Ok(value),
        Envelope::Failure { error } => Err(EcoPackError::Remote(error)),
    }
}

pub fn decode_prediction(body: &str) -> Result<RecommendationResult> {
    decode(body, "prediction")
}

pub fn decode_dashboard(body: &str) -> Result<DashboardData> {
    decode(body, "dashboard")
}

pub fn decode_materials(body: &str) -> Result<Vec<MaterialCandidate>> {
    decode(body, "materials")
}

pub fn decode_save(body: &str) -> Result<String> {
    decode::<SaveConfirmation>(body, "save").map(|c| c.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let config = AppConfig {
            service_url: "https://eco.example.com/api".into(),
            ..Default::default()
        };
        let service = HttpRecommendationService::new(&config).unwrap();
        assert_eq!(
            service.endpoint("save-report").unwrap().as_str(),
            "https://eco.example.com/api/save-report"
        );
    }

    #[test]
    fn test_decode_prediction() {
        let body = r#"{
            "recommended_materials": [
                {"material": "Bagasse", "eco_score": 0.412, "predicted_co2": 1.2, "predicted_cost": 3.4}
            ],
            "rejected_materials": [
                {"material": "PVC", "reasons": ["low strength", "high cost"]}
            ]
        }"#;
        let result = decode_prediction(body).unwrap();
        assert_eq!(result.recommended[0].material, "Bagasse");
        assert_eq!(result.rejected[0].material, "PVC");
    }

    #[test]
    fn test_error_envelope_is_remote() {
        let err = decode_prediction(r#"{"error": "Missing field: strength_score"}"#).unwrap_err();
        assert_eq!(err, EcoPackError::Remote("Missing field: strength_score".into()));

        let err = decode_materials(r#"{"error": "No materials in database"}"#).unwrap_err();
        assert!(matches!(err, EcoPackError::Remote(_)));
    }

    #[test]
    fn test_malformed_body_is_remote() {
        assert!(matches!(
            decode_materials("<html>oops</html>"),
            Err(EcoPackError::Remote(_))
        ));
    }

    #[test]
    fn test_decode_materials_and_save() {
        let materials = decode_materials(
            r#"[{"material": "Glass", "predicted_co2": 9.1, "predicted_cost": 7.0, "eco_score": 0.95}]"#,
        )
        .unwrap();
        assert_eq!(materials[0].eco_score, 0.95);

        let message = decode_save(r#"{"message": "Report saved successfully"}"#).unwrap();
        assert_eq!(message, "Report saved successfully");
    }

    #[test]
    fn test_status_message_prefers_error_body() {
        let msg = status_message(reqwest::StatusCode::BAD_REQUEST, r#"{"error": "Invalid input"}"#);
        assert_eq!(msg, "Invalid input");

        let msg = status_message(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(msg, "Service error: 502 Bad Gateway");
    }
}
