//! Report exports built from a dashboard snapshot.
//!
//! Both formats fail with `NothingToExport` before the first prediction.
//! Files are written atomically into the export directory under fixed names.

pub mod csv;
pub mod document;
pub mod pdf;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::info;

use crate::dashboard::{DashboardSnapshot, RecommendationResult};
use crate::error::{EcoPackError, Result};

pub use self::csv::build_csv;
pub use document::{build_document, DocumentReport, ReportPage, REPORT_TITLE};
pub use pdf::write_pdf;

pub const CSV_FILENAME: &str = "EcoPack_AI_Full_Report.csv";
pub const PDF_FILENAME: &str = "EcoPack_AI_Full_Report.pdf";

fn require_result(snapshot: &DashboardSnapshot) -> Result<&RecommendationResult> {
    snapshot
        .result()
        .filter(|r| !r.recommended.is_empty())
        .ok_or(EcoPackError::NothingToExport)
}

/// Write `bytes` to `dir/name` through a temp file in the same directory,
/// replacing any earlier export of the same name.
pub fn write_report(dir: &Path, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;
    let target = dir.join(name);

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {:?}", dir))?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(&target)
        .with_context(|| format!("Failed to write {:?}", target))?;

    info!("Exported {} bytes to {:?}", bytes.len(), target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("reports");

        let path = write_report(&nested, CSV_FILENAME, b"first").unwrap();
        assert_eq!(path, nested.join(CSV_FILENAME));
        write_report(&nested, CSV_FILENAME, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(&nested).unwrap().count(), 1);
    }
}
