//! Report export: first page of students → template → rendered file.

use crate::config::ReportSettings;
use crate::error::{AppError, ReportError};
use crate::page::PageRequest;
use crate::report::{ReportFormat, ReportTemplate};
use crate::store::StudentRepository;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows bound to a report: the first page only.
pub const REPORT_PAGE_SIZE: u32 = 10;

/// What an export wrote.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub format: ReportFormat,
    pub content_type: &'static str,
    pub path: String,
    pub rows: usize,
    pub bytes: usize,
}

#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn StudentRepository>,
    settings: Arc<ReportSettings>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn StudentRepository>, settings: ReportSettings) -> Self {
        ReportService {
            repository,
            settings: Arc::new(settings),
        }
    }

    pub fn output_path(&self, format: ReportFormat) -> PathBuf {
        self.settings.output_dir.join(format.file_name())
    }

    /// Render the report in `format` and replace the format's output file.
    pub async fn export(&self, format: ReportFormat) -> Result<ExportOutcome, AppError> {
        let page = self
            .repository
            .find_all(&PageRequest::new(0, REPORT_PAGE_SIZE))
            .await?;
        let students = page.content;
        let template_path = self.settings.template_path.clone();
        tracing::debug!(%format, rows = students.len(), template = %template_path.display(), "rendering student report");

        let (bytes, rows) = tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, usize), ReportError> {
            let compiled = ReportTemplate::load(&template_path)?.compile()?;
            let filled = compiled.fill(&students);
            let bytes = format.exporter().export(&filled)?;
            Ok((bytes, filled.row_count()))
        })
        .await
        .map_err(|e| ReportError::Task(e.to_string()))??;

        let path = self.output_path(format);
        write_atomically(&path, &bytes).await?;
        tracing::info!(%format, path = %path.display(), rows, bytes = bytes.len(), "student report written");
        Ok(ExportOutcome {
            format,
            content_type: format.content_type(),
            path: path.display().to_string(),
            rows,
            bytes: bytes.len(),
        })
    }
}

/// Write to a unique sibling temp file, then rename over `path`. Concurrent writers never leave a torn file.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let output_error = |source| ReportError::Output {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    tokio::fs::create_dir_all(dir).await.map_err(output_error)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".into());
    let tmp = dir.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));
    tokio::fs::write(&tmp, bytes).await.map_err(output_error)?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(output_error(e));
    }
    Ok(())
}
