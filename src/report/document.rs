use super::score_text;
use crate::error::Error;
use crate::session::SimilarityReport;
use crate::similarity::PairScore;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

// A4 landscape, everything in millimetres.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const LABEL_WIDTH: f32 = 55.0;
const ROW_HEIGHT: f32 = 9.0;
const BAR_HEIGHT: f32 = 2.2;
const LABEL_CHARS: usize = 30;

/// Render the matrix as a printable paginated PDF: the same grid as the
/// spreadsheet, each cell carrying a filled bar proportional to its
/// percentage. Unavailable cells print "n/a" and no bar.
pub fn render_pdf(report: &SimilarityReport) -> Result<Vec<u8>, Error> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Document similarity report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "grid",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| Error::Report(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| Error::Report(err.to_string()))?;

    let columns = report.files.len();
    let cell_width = (PAGE_WIDTH - 2.0 * MARGIN - LABEL_WIDTH) / columns as f32;

    // Rows available under the title and column-header band on each page.
    let grid_top = PAGE_HEIGHT - MARGIN - 14.0;
    let rows_per_page = ((grid_top - MARGIN - ROW_HEIGHT) / ROW_HEIGHT).floor() as usize;
    let rows_per_page = rows_per_page.max(1);

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    let total_rows = report.files.len();
    let page_count = total_rows.div_ceil(rows_per_page);

    for page_index in 0..page_count {
        if page_index > 0 {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "grid");
            layer = doc.get_page(page).get_layer(new_layer);
        }

        draw_page_header(&layer, &bold, page_index + 1);
        draw_column_headers(&layer, &font, &report.files, cell_width, grid_top);

        let first_row = page_index * rows_per_page;
        let last_row = (first_row + rows_per_page).min(total_rows);
        for row in first_row..last_row {
            let row_top = grid_top - ROW_HEIGHT * (row - first_row + 1) as f32;
            draw_row(&layer, &font, report, row, cell_width, row_top);
        }
    }

    doc.save_to_bytes().map_err(|err| Error::Report(err.to_string()))
}

fn draw_page_header(layer: &PdfLayerReference, bold: &IndirectFontRef, page_number: usize) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.use_text(
        "Document similarity matrix",
        13.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - MARGIN),
        bold,
    );
    layer.use_text(
        format!("page {}", page_number),
        8.0,
        Mm(PAGE_WIDTH - MARGIN - 15.0),
        Mm(PAGE_HEIGHT - MARGIN),
        bold,
    );
}

fn draw_column_headers(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    files: &[String],
    cell_width: f32,
    grid_top: f32,
) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for (col, name) in files.iter().enumerate() {
        let x = MARGIN + LABEL_WIDTH + cell_width * col as f32;
        let label = truncate_label(name, column_chars(cell_width));
        layer.use_text(label, 6.5, Mm(x), Mm(grid_top + 2.0), font);
    }
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    report: &SimilarityReport,
    row: usize,
    cell_width: f32,
    row_top: f32,
) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.use_text(
        truncate_label(&report.files[row], LABEL_CHARS),
        7.5,
        Mm(MARGIN),
        Mm(row_top + 3.5),
        font,
    );

    for col in 0..report.files.len() {
        let score = report.matrix.get(row, col);
        let x = MARGIN + LABEL_WIDTH + cell_width * col as f32;

        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.use_text(score_text(score), 7.0, Mm(x), Mm(row_top + 4.5), font);

        if let PairScore::Percent(pct) = score {
            let bar_span = (cell_width - 2.0).max(1.0);
            let bar_width = bar_span * pct as f32 / 100.0;
            if bar_width > 0.0 {
                layer.set_fill_color(bar_color(pct));
                let bar = Rect::new(
                    Mm(x),
                    Mm(row_top + 1.0),
                    Mm(x + bar_width),
                    Mm(row_top + 1.0 + BAR_HEIGHT),
                )
                .with_mode(PaintMode::Fill);
                layer.add_rect(bar);
            }
        }
    }
}

/// High overlap is what the reader is scanning for, so the bar shifts
/// from blue toward red as the percentage climbs.
fn bar_color(pct: u8) -> Color {
    if pct >= 80 {
        Color::Rgb(Rgb::new(0.80, 0.22, 0.20, None))
    } else if pct >= 50 {
        Color::Rgb(Rgb::new(0.85, 0.60, 0.15, None))
    } else {
        Color::Rgb(Rgb::new(0.25, 0.45, 0.75, None))
    }
}

fn column_chars(cell_width: f32) -> usize {
    // Rough fit for 6.5pt Helvetica; at least a few characters per column.
    ((cell_width / 1.6) as usize).max(4)
}

fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
