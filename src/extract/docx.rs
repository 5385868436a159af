use crate::error::Error;
use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

/// Extract paragraph text in document order. Runs carry the text; images,
/// shapes and other embedded objects are skipped. Table cell paragraphs
/// are included since they are document text too.
pub fn extract(name: &str, bytes: &[u8]) -> Result<String, Error> {
    let package = read_docx(bytes).map_err(|err| Error::CorruptDocument {
        name: name.to_string(),
        detail: err.to_string(),
    })?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &package.document.children {
        collect_child_text(child, &mut paragraphs);
    }

    Ok(paragraphs.join("\n"))
}

fn collect_child_text(child: &DocumentChild, paragraphs: &mut Vec<String>) {
    match child {
        DocumentChild::Paragraph(paragraph) => {
            if let Some(text) = paragraph_text(paragraph.as_ref()) {
                paragraphs.push(text);
            }
        }
        DocumentChild::Table(table) => collect_table_text(table.as_ref(), paragraphs),
        _ => {}
    }
}

fn paragraph_text(paragraph: &Paragraph) -> Option<String> {
    let mut buffer = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            append_run_text(run.as_ref(), &mut buffer);
        }
    }

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn collect_table_text(table: &Table, paragraphs: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => {
                        if let Some(text) = paragraph_text(paragraph) {
                            paragraphs.push(text);
                        }
                    }
                    TableCellContent::Table(inner) => collect_table_text(inner, paragraphs),
                    _ => {}
                }
            }
        }
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Break(_) => buffer.push('\n'),
            RunChild::Tab(_) => buffer.push('\t'),
            // Drawings, shapes, field chars etc. carry no comparable text.
            _ => {}
        }
    }
}
