//! Report template: JSON layout definition and its compiled form.

use super::fill::FilledReport;
use crate::error::ReportError;
use crate::model::{Student, StudentField};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportTemplate {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    #[serde(default)]
    pub header: Option<String>,
    /// Relative width weight; defaults to 1.
    #[serde(default)]
    pub width: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct CompiledColumn {
    pub field: StudentField,
    pub header: String,
    /// Fraction of the printable width, columns sum to 1.
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct CompiledReport {
    pub title: String,
    pub subtitle: Option<String>,
    pub columns: Vec<CompiledColumn>,
}

impl ReportTemplate {
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ReportError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ReportError::TemplateParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve fields, default headers and normalize widths.
    pub fn compile(&self) -> Result<CompiledReport, ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::Compile("template has no columns".into()));
        }
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let field = StudentField::from_property(&column.field)
                .ok_or_else(|| ReportError::Compile(format!("unknown field '{}'", column.field)))?;
            if !seen.insert(field) {
                return Err(ReportError::Compile(format!("duplicate field '{}'", column.field)));
            }
            let width = column.width.unwrap_or(1.0);
            if !width.is_finite() || width <= 0.0 {
                return Err(ReportError::Compile(format!(
                    "column '{}' width must be positive",
                    column.field
                )));
            }
            let header = column
                .header
                .clone()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| field.property().to_string());
            columns.push(CompiledColumn { field, header, width });
        }
        let total: f32 = columns.iter().map(|c| c.width).sum();
        for c in &mut columns {
            c.width /= total;
        }
        Ok(CompiledReport {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            columns,
        })
    }
}

impl CompiledReport {
    pub fn fill(&self, students: &[Student]) -> FilledReport {
        FilledReport::new(self, students)
    }
}
