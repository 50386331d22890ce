use super::{FilledReport, ReportExporter};
use crate::error::ReportError;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 6.0;
/// Approximate Helvetica glyph advance at `BODY_SIZE`, in mm.
const CHAR_WIDTH: f32 = 1.9;
const LAYER: &str = "Report";

/// A4 portrait, Helvetica, header row repeated on every page.
pub struct PdfExporter;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl ReportExporter for PdfExporter {
    fn export(&self, report: &FilledReport) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(report.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_error)?,
        };
        let columns = column_layout(&report.widths);

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - MARGIN;
        current.use_text(report.title.as_str(), TITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.bold);
        y -= LINE_HEIGHT * 1.5;
        if let Some(subtitle) = &report.subtitle {
            current.use_text(subtitle.as_str(), SUBTITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.regular);
            y -= LINE_HEIGHT;
        }
        current.use_text(
            format!("Generated {}", report.generated_at),
            BODY_SIZE - 2.0,
            Mm(MARGIN),
            Mm(y),
            &fonts.regular,
        );
        y -= LINE_HEIGHT * 1.5;
        write_row(&current, &columns, &report.headers, y, &fonts.bold);
        y -= LINE_HEIGHT;

        for row in &report.rows {
            if y < MARGIN {
                current = new_page(&doc);
                y = PAGE_HEIGHT - MARGIN;
                write_row(&current, &columns, &report.headers, y, &fonts.bold);
                y -= LINE_HEIGHT;
            }
            write_row(&current, &columns, row, y, &fonts.regular);
            y -= LINE_HEIGHT;
        }

        doc.save_to_bytes().map_err(render_error)
    }
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    doc.get_page(page).get_layer(layer)
}

/// (x offset, width) per column in mm.
fn column_layout(widths: &[f32]) -> Vec<(f32, f32)> {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let mut x = MARGIN;
    widths
        .iter()
        .map(|w| {
            let width = w * usable;
            let col = (x, width);
            x += width;
            col
        })
        .collect()
}

fn write_row(layer: &PdfLayerReference, columns: &[(f32, f32)], cells: &[String], y: f32, font: &IndirectFontRef) {
    for ((x, width), cell) in columns.iter().zip(cells) {
        layer.use_text(fit(cell, *width), BODY_SIZE, Mm(*x), Mm(y), font);
    }
}

/// Truncates text that would overflow its column.
fn fit(text: &str, width: f32) -> String {
    let max = ((width - 1.0) / CHAR_WIDTH).floor().max(1.0) as usize;
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn render_error(e: printpdf::Error) -> ReportError {
    ReportError::Render {
        format: "pdf",
        message: e.to_string(),
    }
}
