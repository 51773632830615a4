use super::document::{self, ReportDocument};
use super::{ReportError, ReportRow};
use std::fmt::Debug;

/// First-sheet-only view handed to spreadsheet encoders. Backends receive
/// the already-flattened record rows and never consult the match list.
#[derive(Debug)]
pub struct Worksheet<'a> {
    pub name: &'static str,
    pub header: &'a [&'static str],
    pub rows: &'a [ReportRow],
}

/// Spreadsheet binary layout seam. An xlsx encoder plugs in here; the crate
/// ships a tab-separated implementation as the built-in interchange form.
pub trait SpreadsheetBackend: Debug {
    fn extension(&self) -> &'static str;
    fn content_type(&self) -> &'static str;
    fn encode(&self, sheet: &Worksheet<'_>) -> Result<Vec<u8>, ReportError>;
}

/// Paginated-document binary layout seam, fed from the document model. A PDF
/// encoder plugs in here.
pub trait DocumentBackend: Debug {
    fn extension(&self) -> &'static str;
    fn content_type(&self) -> &'static str;
    fn encode(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

/// Single worksheet encoded as tab-separated values, which desktop
/// spreadsheet tools open natively.
#[derive(Debug, Default)]
pub struct TsvWorkbook;

impl SpreadsheetBackend for TsvWorkbook {
    fn extension(&self) -> &'static str {
        "tsv"
    }

    fn content_type(&self) -> &'static str {
        "text/tab-separated-values"
    }

    fn encode(&self, sheet: &Worksheet<'_>) -> Result<Vec<u8>, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Vec::new());

        writer
            .write_record(sheet.header)
            .map_err(|err| ReportError::Encode(err.to_string()))?;
        for row in sheet.rows {
            writer
                .write_record(&row.cells())
                .map_err(|err| ReportError::Encode(err.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|err| ReportError::Encode(err.to_string()))
    }
}

/// Plain-text paginated rendering: a title page header, then one page per
/// match, pages separated by a form feed.
#[derive(Debug, Default)]
pub struct PlainTextDocument;

impl DocumentBackend for PlainTextDocument {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn encode(&self, doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut pages = Vec::with_capacity(doc.sections.len() + 1);
        pages.push(format!("{}\nGenerated {}\n", doc.title, doc.generated_on));

        for section in &doc.sections {
            pages.push(document::render_section(section));
        }

        Ok(pages.join("\u{c}\n").into_bytes())
    }
}
