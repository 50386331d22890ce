//! Response header helpers: client notification alerts and pagination links.

use crate::error::ConfigError;
use crate::page::Page;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Builds `X-<app>-alert`, `X-<app>-error` and `X-<app>-params` headers for a fixed application name.
#[derive(Clone, Debug)]
pub struct HeaderAlerts {
    app_name: String,
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl HeaderAlerts {
    pub fn new(app_name: &str) -> Result<Self, ConfigError> {
        let name = |suffix: &str| {
            HeaderName::from_bytes(format!("x-{}-{}", app_name, suffix).as_bytes())
                .map_err(|_| ConfigError::InvalidAlertPrefix(app_name.to_string()))
        };
        if app_name.is_empty() {
            return Err(ConfigError::InvalidAlertPrefix(app_name.to_string()));
        }
        Ok(HeaderAlerts {
            app_name: app_name.to_string(),
            alert: name("alert")?,
            error: name("error")?,
            params: name("params")?,
        })
    }

    pub fn alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, self.alert.clone(), message);
        insert(&mut headers, self.params.clone(), param);
        headers
    }

    pub fn entity_creation(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.created", self.app_name, entity), param)
    }

    pub fn entity_update(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.updated", self.app_name, entity), param)
    }

    pub fn entity_deletion(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.deleted", self.app_name, entity), param)
    }

    /// The default message is logged only; clients translate `error.<key>`.
    pub fn failure(&self, entity: &str, error_key: &str, default_message: &str) -> HeaderMap {
        tracing::debug!(entity, error_key, "entity processing failed: {}", default_message);
        let mut headers = HeaderMap::new();
        insert(&mut headers, self.error.clone(), &format!("error.{}", error_key));
        insert(&mut headers, self.params.clone(), entity);
        headers
    }
}

/// Header values that are not visible ASCII are dropped rather than failing the response.
fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => tracing::warn!(header = %name, "skipping non-ascii header value"),
    }
}

/// `X-Total-Count` plus an RFC 5988 `Link` header with next/prev (when they exist), last and first.
pub fn pagination_headers<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_elements),
    );
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(base_url, u64::from(page.number) + 1, page.size, "next"));
    }
    if page.has_previous() {
        links.push(link(base_url, u64::from(page.number) - 1, page.size, "prev"));
    }
    let last = page.total_pages().saturating_sub(1);
    links.push(link(base_url, last, page.size, "last"));
    links.push(link(base_url, 0, page.size, "first"));
    insert(&mut headers, axum::http::header::LINK, &links.join(","));
    headers
}

fn link(base_url: &str, page: u64, size: u32, rel: &str) -> String {
    format!("<{}?page={}&size={}>; rel=\"{}\"", base_url, page, size, rel)
}
