use serde::{Deserialize, Serialize};

use super::types::{MaterialCandidate, Reasons};

/// Shown when a rejected candidate carries no usable reason.
pub const NO_REASON: &str = "No reason provided";
/// Single entry shown when nothing was rejected.
pub const NO_REJECTIONS: &str = "No rejected materials";
/// How many rejected entries the dashboard lists.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// A rejected candidate with its reasons collapsed into one string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedRejection {
    pub material: String,
    pub reasons: String,
}

impl FormattedRejection {
    /// `"<material>: <reasons>"`
    pub fn line(&self) -> String {
        format!("{}: {}", self.material, self.reasons)
    }
}

/// Collapse heterogeneous reasons into one display string.
/// List entries are joined with `", "`; blank entries are skipped.
pub fn format_reasons(reasons: Option<&Reasons>) -> String {
    let joined = match reasons {
        Some(Reasons::One(text)) => text.trim().to_string(),
        Some(Reasons::Many(items)) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    };

    if joined.is_empty() {
        NO_REASON.to_string()
    } else {
        joined
    }
}

/// Format every rejected candidate, keeping input order.
pub fn format_rejections(rejected: &[MaterialCandidate]) -> Vec<FormattedRejection> {
    rejected
        .iter()
        .map(|r| FormattedRejection {
            material: r.material.clone(),
            reasons: format_reasons(r.reasons.as_ref()),
        })
        .collect()
}

/// Display lines for the rejected list: at most `limit` entries, or the
/// single placeholder when nothing was rejected. Truncation only affects
/// what is shown; the result set itself is untouched.
pub fn render_rejections(rejected: &[MaterialCandidate], limit: usize) -> Vec<String> {
    if rejected.is_empty() {
        return vec![NO_REJECTIONS.to_string()];
    }
    format_rejections(&rejected[..rejected.len().min(limit)])
        .iter()
        .map(FormattedRejection::line)
        .collect()
}
