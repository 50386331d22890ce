use super::{FilledReport, ReportExporter};
use crate::error::ReportError;
use handlebars::{handlebars_helper, Handlebars};

const LAYOUT_NAME: &str = "report";
const LAYOUT: &str = include_str!("../../templates/report.html.hbs");

handlebars_helper!(percent: |w: f64| format!("{:.1}", w * 100.0));

/// Standalone HTML page rendered through a handlebars layout. Cell text is HTML-escaped.
pub struct HtmlExporter;

impl HtmlExporter {
    fn registry() -> Result<Handlebars<'static>, ReportError> {
        let mut registry = Handlebars::new();
        registry.register_helper("percent", Box::new(percent));
        registry
            .register_template_string(LAYOUT_NAME, LAYOUT)
            .map_err(|e| render_error(e.to_string()))?;
        Ok(registry)
    }
}

impl ReportExporter for HtmlExporter {
    fn export(&self, report: &FilledReport) -> Result<Vec<u8>, ReportError> {
        let html = Self::registry()?
            .render(LAYOUT_NAME, report)
            .map_err(|e| render_error(e.to_string()))?;
        Ok(html.into_bytes())
    }
}

fn render_error(message: String) -> ReportError {
    ReportError::Render { format: "html", message }
}
