//! Report engine: load a template, compile it against the student fields, fill it with rows, export.

mod fill;
mod html;
mod pdf;
mod rtf;
mod template;

pub use fill::FilledReport;
pub use html::HtmlExporter;
pub use pdf::PdfExporter;
pub use rtf::RtfExporter;
pub use template::{ColumnSpec, CompiledColumn, CompiledReport, ReportTemplate};

use crate::error::ReportError;
use serde::Serialize;
use std::str::FromStr;

/// Output formats. Each has a fixed output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Rtf,
    Html,
}

impl ReportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdfReport.pdf",
            ReportFormat::Rtf => "wordReport.rtf",
            ReportFormat::Html => "HTMLReport.html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Rtf => "application/rtf",
            ReportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Rtf => "rtf",
            ReportFormat::Html => "html",
        }
    }

    pub fn exporter(self) -> Box<dyn ReportExporter> {
        match self {
            ReportFormat::Pdf => Box::new(PdfExporter),
            ReportFormat::Rtf => Box::new(RtfExporter),
            ReportFormat::Html => Box::new(HtmlExporter),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    /// `word` is accepted for RTF, as in the `/exportWord` route.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "rtf" | "word" => Ok(ReportFormat::Rtf),
            "html" | "htm" => Ok(ReportFormat::Html),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serializes a filled report to bytes.
pub trait ReportExporter: Send + Sync {
    fn export(&self, report: &FilledReport) -> Result<Vec<u8>, ReportError>;
}
