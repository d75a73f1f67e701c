use super::require_result;
use crate::dashboard::{format_rejections, DashboardSnapshot};
use crate::error::Result;

pub const RECOMMENDED_HEADER: &str = "=== AI RECOMMENDED MATERIALS ===";
pub const REJECTED_HEADER: &str = "=== REJECTED MATERIALS ===";

/// Full CSV report for the current result set.
///
/// Every rejected entry is listed; the on-screen cap does not apply here.
pub fn build_csv(snapshot: &DashboardSnapshot) -> Result<String> {
    let result = require_result(snapshot)?;

    let mut csv = String::new();
    csv.push_str(RECOMMENDED_HEADER);
    csv.push('\n');
    csv.push_str("Rank,Material,Eco Score,CO2,Cost\n");
    for (index, m) in result.recommended.iter().enumerate() {
        let line = [
            (index + 1).to_string(),
            m.material.clone(),
            m.eco_score.to_string(),
            m.predicted_co2.to_string(),
            m.predicted_cost.to_string(),
        ]
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv.push('\n');
    csv.push_str(REJECTED_HEADER);
    csv.push('\n');
    csv.push_str("Material,Reasons\n");

    let rejections = format_rejections(&result.rejected);
    if rejections.is_empty() {
        csv.push_str("None,None\n");
    }
    for rejection in rejections {
        csv.push_str(&escape_csv(&rejection.material));
        csv.push(',');
        csv.push_str(&escape_csv(&rejection.reasons));
        csv.push('\n');
    }

    Ok(csv)
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{
        DashboardState, MaterialCandidate, PredictionForm, Reasons, RecommendationResult,
    };
    use crate::error::EcoPackError;

    fn snapshot(rejected: Vec<MaterialCandidate>) -> DashboardSnapshot {
        let mut state = DashboardState::new();
        state
            .set_prediction(
                RecommendationResult {
                    recommended: vec![
                        MaterialCandidate::new("Bagasse", 0.42, 1.1, 3.0),
                        MaterialCandidate::new("Cork, natural", 0.81, 1.4, 4.5),
                    ],
                    rejected,
                },
                PredictionForm::default().to_payload(),
            )
            .unwrap();
        state.snapshot()
    }

    #[test]
    fn test_layout_without_rejections() {
        let csv = build_csv(&snapshot(vec![])).unwrap();
        let expected = "=== AI RECOMMENDED MATERIALS ===\n\
                        Rank,Material,Eco Score,CO2,Cost\n\
                        1,Bagasse,0.42,1.1,3\n\
                        2,\"Cork, natural\",0.81,1.4,4.5\n\
                        \n\
                        === REJECTED MATERIALS ===\n\
                        Material,Reasons\n\
                        None,None\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_rejected_reasons_are_quoted() {
        let pvc = MaterialCandidate {
            reasons: Some(Reasons::Many(vec!["low strength".into(), "high cost".into()])),
            ..MaterialCandidate::new("PVC", 0.0, 0.0, 0.0)
        };
        let glass = MaterialCandidate::new("Glass", 0.0, 0.0, 0.0);

        let csv = build_csv(&snapshot(vec![pvc, glass])).unwrap();
        assert!(csv.ends_with("Material,Reasons\nPVC,\"low strength, high cost\"\nGlass,No reason provided\n"));
    }

    #[test]
    fn test_nothing_to_export() {
        let empty = DashboardState::new().snapshot();
        assert_eq!(build_csv(&empty).unwrap_err(), EcoPackError::NothingToExport);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
