use super::{FilledReport, ReportExporter};
use crate::error::ReportError;
use std::fmt::Write;

/// Printable width of an A4 page with 2cm margins, in twips.
const TABLE_WIDTH: f32 = 9638.0;

/// RTF 1.x document with a title block and a bordered table; readable by word processors.
pub struct RtfExporter;

impl ReportExporter for RtfExporter {
    fn export(&self, report: &FilledReport) -> Result<Vec<u8>, ReportError> {
        let mut out = String::new();
        write_document(&mut out, report).map_err(|e| ReportError::Render {
            format: "rtf",
            message: e.to_string(),
        })?;
        Ok(out.into_bytes())
    }
}

fn write_document(out: &mut String, report: &FilledReport) -> std::fmt::Result {
    out.push_str("{\\rtf1\\ansi\\ansicpg1252\\deff0{\\fonttbl{\\f0\\fswiss Helvetica;}}\n");
    out.push_str("\\paperw11906\\paperh16838\\margl1134\\margr1134\\margt1134\\margb1134\n");
    writeln!(out, "{{\\pard\\qc\\b\\fs32 {}\\b0\\par}}", escape(&report.title))?;
    if let Some(subtitle) = &report.subtitle {
        writeln!(out, "{{\\pard\\qc\\fs22 {}\\par}}", escape(subtitle))?;
    }
    writeln!(out, "{{\\pard\\qc\\fs16 Generated {}\\par}}", escape(&report.generated_at))?;
    out.push_str("\\pard\\par\n");

    let edges = cell_edges(&report.widths);
    write_row(out, &edges, &report.headers, true)?;
    for row in &report.rows {
        write_row(out, &edges, row, false)?;
    }
    out.push_str("\\pard\\par}\n");
    Ok(())
}

fn write_row(out: &mut String, edges: &[u32], cells: &[String], bold: bool) -> std::fmt::Result {
    out.push_str("\\trowd\\trgaph108");
    for edge in edges {
        write!(
            out,
            "\\clbrdrt\\brdrs\\clbrdrl\\brdrs\\clbrdrb\\brdrs\\clbrdrr\\brdrs\\cellx{}",
            edge
        )?;
    }
    out.push('\n');
    for cell in cells {
        if bold {
            write!(out, "\\pard\\intbl\\fs20\\b {}\\b0\\cell ", escape(cell))?;
        } else {
            write!(out, "\\pard\\intbl\\fs20 {}\\cell ", escape(cell))?;
        }
    }
    out.push_str("\\row\n");
    Ok(())
}

/// Right edge of each cell in twips.
fn cell_edges(widths: &[f32]) -> Vec<u32> {
    let mut acc = 0.0;
    widths
        .iter()
        .map(|w| {
            acc += w * TABLE_WIDTH;
            acc.round() as u32
        })
        .collect()
}

/// Escapes control characters and encodes non-ASCII as `\uN?` (UTF-16 code units, signed).
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\line "),
            '\t' => out.push_str("\\tab "),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_ascii() => {}
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{}?", *unit as i16);
                }
            }
        }
    }
    out
}
