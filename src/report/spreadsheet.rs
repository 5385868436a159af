use super::score_text;
use crate::error::Error;
use crate::session::SimilarityReport;
use crate::similarity::PairScore;
use rust_xlsxwriter::{Format, Workbook};

/// Render the matrix as an XLSX workbook: one bold header row of
/// filenames, one bold header column, integer percentage cells, "n/a"
/// for unavailable pairs.
pub fn render_xlsx(report: &SimilarityReport) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Similarity")?;

    let header_format = Format::new().set_bold();

    worksheet.write_string_with_format(0, 0, "File", &header_format)?;
    for (col, name) in report.files.iter().enumerate() {
        worksheet.write_string_with_format(0, (col + 1) as u16, name, &header_format)?;
    }

    for (row, name) in report.files.iter().enumerate() {
        let sheet_row = (row + 1) as u32;
        worksheet.write_string_with_format(sheet_row, 0, name, &header_format)?;

        for col in 0..report.files.len() {
            let sheet_col = (col + 1) as u16;
            match report.matrix.get(row, col) {
                PairScore::Percent(pct) => {
                    worksheet.write_number(sheet_row, sheet_col, pct as f64)?;
                }
                PairScore::Unavailable => {
                    worksheet.write_string(sheet_row, sheet_col, "n/a")?;
                }
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// CSV twin of the spreadsheet, same grid without formatting.
pub fn render_csv(report: &SimilarityReport) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = Vec::with_capacity(report.files.len() + 1);
    header.push("File".to_string());
    header.extend(report.files.iter().cloned());
    writer.write_record(&header)?;

    for (row, name) in report.files.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(report.files.len() + 1);
        record.push(name.clone());
        for col in 0..report.files.len() {
            record.push(score_text(report.matrix.get(row, col)));
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|err| Error::Report(err.to_string()))
}
