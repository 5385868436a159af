use crate::error::Error;
use crate::session::SimilarityReport;
use crate::similarity::PairScore;

mod document;
mod spreadsheet;

/// Output forms the renderer produces on demand. Rendering is a pure read
/// of session state; nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// XLSX workbook with header row/column of filenames.
    Spreadsheet,
    /// Printable paginated PDF with a bar indicator per cell.
    Document,
    /// Plain CSV twin of the spreadsheet.
    Csv,
}

pub fn render(report: &SimilarityReport, format: ExportFormat) -> Result<Vec<u8>, Error> {
    match format {
        ExportFormat::Spreadsheet => spreadsheet::render_xlsx(report),
        ExportFormat::Document => document::render_pdf(report),
        ExportFormat::Csv => spreadsheet::render_csv(report),
    }
}

/// Cell text shared by every output form.
pub(crate) fn score_text(score: PairScore) -> String {
    match score {
        PairScore::Percent(pct) => pct.to_string(),
        PairScore::Unavailable => "n/a".to_string(),
    }
}
