use super::template::CompiledReport;
use crate::model::Student;
use chrono::Utc;
use serde::Serialize;

/// A compiled template bound to data: every cell is display text.
#[derive(Debug, Clone, Serialize)]
pub struct FilledReport {
    pub title: String,
    pub subtitle: Option<String>,
    pub headers: Vec<String>,
    pub widths: Vec<f32>,
    pub rows: Vec<Vec<String>>,
    pub generated_at: String,
}

impl FilledReport {
    pub fn new(report: &CompiledReport, students: &[Student]) -> Self {
        let rows = students
            .iter()
            .map(|s| report.columns.iter().map(|c| c.field.display(s)).collect())
            .collect();
        FilledReport {
            title: report.title.clone(),
            subtitle: report.subtitle.clone(),
            headers: report.columns.iter().map(|c| c.header.clone()).collect(),
            widths: report.columns.iter().map(|c| c.width).collect(),
            rows,
            generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
