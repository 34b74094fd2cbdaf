//! Plain-text document export.
//!
//! Renders an assembled narrative into a banner-framed text document and
//! writes it to disk. The timestamp is injected so rendering stays
//! deterministic under test.

use crate::assembler::Narrative;
use crate::error::Result;
use chrono::{DateTime, Local};
use log::info;
use std::path::Path;

const BANNER: &str = "====================== SECTION 7: SAR NARRATIVE ======================";
const RULE: &str = "===================================================================";
const FOOTER: &str = "Generated by SAR Narrative Generator";

/// Renders the exported document: header with case number and timestamp,
/// sections joined by blank lines in assembly order, closing rule and footer.
pub fn render_document(
    narrative: &Narrative,
    case_number: &str,
    generated_at: DateTime<Local>,
) -> String {
    format!(
        "SAR Narrative - Case {}\nGenerated on: {}\n\n{}\n\n{}\n\n{}\n{}",
        case_number,
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        BANNER,
        narrative.full_text(),
        RULE,
        FOOTER
    )
}

/// Renders with the current local time and writes the document to `path`.
pub fn write_document(path: &Path, narrative: &Narrative, case_number: &str) -> Result<()> {
    let document = render_document(narrative, case_number, Local::now());
    std::fs::write(path, document)?;
    info!("Exported SAR narrative to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{assemble, SectionSchema};
    use crate::schema::CaseBundle;
    use chrono::TimeZone;

    #[test]
    fn test_render_document_framing() {
        let mut bundle = CaseBundle::default();
        bundle.case_data.case_number = "2024-001".to_string();
        let narrative = assemble(&bundle, SectionSchema::Modern);
        let generated_at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        let document = render_document(&narrative, "2024-001", generated_at);
        assert!(document.starts_with("SAR Narrative - Case 2024-001\n"));
        assert!(document.contains("Generated on: 2024-03-01 09:30:00"));
        assert!(document.contains(BANNER));
        assert!(document.ends_with(FOOTER));

        // narrative body sits between banner and closing rule
        let banner_pos = document.find(BANNER).unwrap();
        let body_pos = document.find("U.S. Bank National Association").unwrap();
        let rule_pos = document.rfind(RULE).unwrap();
        assert!(banner_pos < body_pos && body_pos < rule_pos);
    }

    #[test]
    fn test_write_document_round_trip() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Legacy);
        let dir = std::env::temp_dir();
        let path = dir.join("sar_narrative_export_test.txt");

        write_document(&path, &narrative, "2024-099").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Case 2024-099"));
        std::fs::remove_file(&path).ok();
    }
}
