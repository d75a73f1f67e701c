//! Core data model for recommendation results and prediction requests.
//!
//! Field names follow the prediction service's snake_case JSON so the same
//! types deserialize straight off the wire and serialize to the frontend.

use serde::{Deserialize, Serialize};

/// Score used for any level label that is missing or unrecognized.
pub const DEFAULT_LEVEL_SCORE: u8 = 3;

/// One recommended or rejected packaging material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialCandidate {
    /// Unique label within a result set
    pub material: String,
    /// Higher is better
    #[serde(default)]
    pub eco_score: f64,
    /// Lower is better
    #[serde(default)]
    pub predicted_co2: f64,
    /// Lower is better
    #[serde(default)]
    pub predicted_cost: f64,
    /// Only present on rejected candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Reasons>,
}

impl MaterialCandidate {
    pub fn new(material: &str, eco_score: f64, predicted_co2: f64, predicted_cost: f64) -> Self {
        Self {
            material: material.to_string(),
            eco_score,
            predicted_co2,
            predicted_cost,
            reasons: None,
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::EcoScore => self.eco_score,
            Metric::Co2 => self.predicted_co2,
            Metric::Cost => self.predicted_cost,
        }
    }
}

/// Rejection reasons arrive either as one string or as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reasons {
    One(String),
    Many(Vec<String>),
}

/// The three scored dimensions of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    EcoScore,
    Co2,
    Cost,
}

/// Ranked output of one prediction call.
///
/// `recommended` keeps the service's rank order; index 0 is the top pick
/// and the display rank is `index + 1`. The client never re-sorts it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    #[serde(rename = "recommended_materials", default)]
    pub recommended: Vec<MaterialCandidate>,
    #[serde(rename = "rejected_materials", default)]
    pub rejected: Vec<MaterialCandidate>,
}

impl RecommendationResult {
    pub fn top(&self) -> Option<&MaterialCandidate> {
        self.recommended.first()
    }
}

/// Qualitative requirement level picked in the request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Parse a form label. Surrounding whitespace and case are ignored.
    pub fn parse(label: &str) -> Option<Level> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Level::Low),
            "medium" => Some(Level::Medium),
            "high" => Some(Level::High),
            _ => None,
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Level::Low => 3,
            Level::Medium => 6,
            Level::High => 9,
        }
    }
}

/// Map a level label onto the service's numeric scale, defaulting to 3.
pub fn level_to_score(label: &str) -> u8 {
    Level::parse(label)
        .map(Level::score)
        .unwrap_or(DEFAULT_LEVEL_SCORE)
}

/// Optional objective weights understood by the prediction service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub cost: f64,
    pub co2: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { cost: 1.0, co2: 1.0 }
    }
}

/// Raw request form exactly as the user typed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionForm {
    pub product_category: String,
    pub strength_score: String,
    pub weight_capacity_kg: String,
    pub biodegradability_score: String,
    pub recyclability_percent: String,
    pub moisture_resistance: String,
    pub heat_resistance: String,
    pub weights: Option<ScoreWeights>,
}

impl PredictionForm {
    /// Normalize into the payload sent to `/predict`.
    pub fn to_payload(&self) -> RequestPayload {
        RequestPayload {
            product_category: self.product_category.trim().to_string(),
            strength_score: level_to_score(&self.strength_score),
            weight_capacity_kg: parse_number(&self.weight_capacity_kg),
            biodegradability_score: level_to_score(&self.biodegradability_score),
            recyclability_percent: parse_number(&self.recyclability_percent),
            moisture_resistance: level_to_score(&self.moisture_resistance),
            heat_resistance: level_to_score(&self.heat_resistance),
            weights: self.weights,
        }
    }
}

/// Blank or unparsable numeric input counts as zero.
fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Normalized request sent to the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestPayload {
    pub product_category: String,
    pub strength_score: u8,
    pub weight_capacity_kg: f64,
    pub biodegradability_score: u8,
    pub recyclability_percent: f64,
    pub moisture_resistance: u8,
    pub heat_resistance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(strength: &str) -> PredictionForm {
        PredictionForm {
            product_category: " Food ".to_string(),
            strength_score: strength.to_string(),
            weight_capacity_kg: "12.5".to_string(),
            biodegradability_score: "High".to_string(),
            recyclability_percent: "80".to_string(),
            moisture_resistance: "Low".to_string(),
            heat_resistance: String::new(),
            weights: None,
        }
    }

    #[test]
    fn test_medium_maps_to_six() {
        let payload = form("Medium").to_payload();
        assert_eq!(payload.strength_score, 6);
        assert_eq!(payload.biodegradability_score, 9);
        assert_eq!(payload.moisture_resistance, 3);
        assert_eq!(payload.product_category, "Food");
        assert_eq!(payload.weight_capacity_kg, 12.5);
        assert_eq!(payload.recyclability_percent, 80.0);
    }

    #[test]
    fn test_unknown_level_defaults_to_three() {
        assert_eq!(form("Unknown").to_payload().strength_score, 3);
        // Missing value
        assert_eq!(form("").to_payload().heat_resistance, 3);
    }

    #[test]
    fn test_level_parse_is_lenient() {
        assert_eq!(level_to_score("  high "), 9);
        assert_eq!(level_to_score("MEDIUM"), 6);
        assert_eq!(Level::parse("Mediumish"), None);
    }

    #[test]
    fn test_invalid_numbers_become_zero() {
        let mut f = form("Low");
        f.weight_capacity_kg = "heavy".to_string();
        f.recyclability_percent = "NaN".to_string();
        let payload = f.to_payload();
        assert_eq!(payload.weight_capacity_kg, 0.0);
        assert_eq!(payload.recyclability_percent, 0.0);
    }

    #[test]
    fn test_payload_serializes_without_weights() {
        let json = serde_json::to_value(form("High").to_payload()).unwrap();
        assert_eq!(json["strength_score"], 9);
        assert!(json.get("weights").is_none());
    }

    #[test]
    fn test_result_deserializes_wire_names() {
        let json = r#"{
            "recommended_materials": [
                {"material": "Bagasse", "eco_score": 0.42, "predicted_co2": 1.1, "predicted_cost": 3.2, "confidence": 88}
            ],
            "rejected_materials": [
                {"material": "PVC", "reasons": ["low strength", "high cost"]},
                {"material": "Foam", "reasons": "not recyclable"},
                {"material": "Glass"}
            ]
        }"#;
        let result: RecommendationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.recommended.len(), 1);
        assert_eq!(result.top().unwrap().material, "Bagasse");
        assert_eq!(
            result.rejected[0].reasons,
            Some(Reasons::Many(vec!["low strength".into(), "high cost".into()]))
        );
        assert_eq!(result.rejected[1].reasons, Some(Reasons::One("not recyclable".into())));
        assert_eq!(result.rejected[2].reasons, None);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result: RecommendationResult = serde_json::from_str("{}").unwrap();
        assert!(result.recommended.is_empty());
        assert!(result.rejected.is_empty());
    }
}
