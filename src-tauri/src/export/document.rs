use tracing::debug;

use super::require_result;
use crate::dashboard::view::ai_reason;
use crate::dashboard::{format_rejections, DashboardSnapshot};
use crate::error::Result;
use crate::render::{ChartCapture, ChartImage, ChartSlot};

pub const REPORT_TITLE: &str = "EcoPack AI Report";

/// One chart page of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    pub slot: ChartSlot,
    pub heading: String,
    pub image: ChartImage,
}

/// Title page text plus one page per captured chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub title: String,
    pub summary: Vec<String>,
    pub pages: Vec<ReportPage>,
}

impl DocumentReport {
    pub fn headings(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.heading.as_str()).collect()
    }
}

/// Assemble the document from a snapshot and whatever charts are drawn.
///
/// Slots that were never drawn produce no page at all.
pub fn build_document<C: ChartCapture + ?Sized>(
    snapshot: &DashboardSnapshot,
    capture: &C,
) -> Result<DocumentReport> {
    let result = require_result(snapshot)?;

    let mut summary = vec![ai_reason(&result.recommended[0]), String::new()];
    summary.push("AI Recommended Materials:".to_string());
    summary.extend(result.recommended.iter().enumerate().map(|(i, m)| {
        format!(
            "{}. {} | Eco: {} | CO2: {} | Cost: {}",
            i + 1,
            m.material,
            m.eco_score,
            m.predicted_co2,
            m.predicted_cost
        )
    }));
    summary.push(String::new());
    summary.push("Rejected Materials:".to_string());

    let rejections = format_rejections(&result.rejected);
    if rejections.is_empty() {
        summary.push("None".to_string());
    }
    summary.extend(rejections.iter().map(|r| r.line()));

    let mut pages = Vec::new();
    for slot in ChartSlot::EXPORT_ORDER {
        match capture.capture(slot)? {
            Some(image) => pages.push(ReportPage {
                slot,
                heading: slot.heading().to_string(),
                image,
            }),
            None => debug!("Skipping {:?}: not drawn", slot),
        }
    }

    Ok(DocumentReport {
        title: REPORT_TITLE.to_string(),
        summary,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardSession, MaterialCandidate, PredictionForm, RecommendationResult};
    use crate::error::EcoPackError;

    fn session() -> DashboardSession {
        let mut session = DashboardSession::default();
        session
            .on_prediction_succeeded(
                RecommendationResult {
                    recommended: vec![
                        MaterialCandidate::new("Bagasse", 0.42, 1.1, 3.2),
                        MaterialCandidate::new("Cork", 0.81, 1.4, 4.5),
                    ],
                    rejected: vec![],
                },
                PredictionForm::default().to_payload(),
            )
            .unwrap();
        session
    }

    #[test]
    fn test_pages_follow_drawn_slots() {
        let mut session = session();
        let doc = build_document(&session.snapshot(), session.charts()).unwrap();
        assert_eq!(doc.headings(), vec!["CO2 vs Cost Comparison", "AI Material Comparison"]);

        session.on_catalog_loaded(vec![MaterialCandidate::new("Glass", 0.1, 9.0, 7.0)]);
        session.on_catalog_comparison_selected("Glass").unwrap();
        let doc = build_document(&session.snapshot(), session.charts()).unwrap();
        assert_eq!(
            doc.headings(),
            vec![
                "CO2 vs Cost Comparison",
                "Comparison With Database Material",
                "AI Material Comparison"
            ]
        );
    }

    #[test]
    fn test_summary_lines() {
        let session = session();
        let doc = build_document(&session.snapshot(), session.charts()).unwrap();
        assert_eq!(doc.title, "EcoPack AI Report");
        assert!(doc.summary[0].starts_with("Bagasse is recommended"));
        assert!(doc
            .summary
            .contains(&"1. Bagasse | Eco: 0.42 | CO2: 1.1 | Cost: 3.2".to_string()));
        assert_eq!(doc.summary.last().unwrap(), "None");
    }

    #[test]
    fn test_requires_result() {
        let session = DashboardSession::default();
        assert_eq!(
            build_document(&session.snapshot(), session.charts()).unwrap_err(),
            EcoPackError::NothingToExport
        );
    }
}
