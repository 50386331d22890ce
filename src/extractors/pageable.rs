//! Extract a `PageRequest` from `page`, `size` and repeatable `sort` query parameters.

use crate::error::AppError;
use crate::model::StudentField;
use crate::page::{Direction, PageRequest, SortOrder, DEFAULT_PAGE_SIZE};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// `?page=0&size=20&sort=name,desc&sort=id`. Unparseable page or size fall back to defaults;
/// unknown sort properties are rejected.
#[derive(Clone, Debug)]
pub struct Pageable(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pageable
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(format!("invalid query: {}", e)))?;
        parse_pairs(&pairs).map(Pageable)
    }
}

fn parse_pairs(pairs: &[(String, String)]) -> Result<PageRequest, AppError> {
    let mut page = 0u32;
    let mut size = DEFAULT_PAGE_SIZE;
    let mut sort = Vec::new();
    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = value.trim().parse().unwrap_or(0),
            "size" => size = value.trim().parse().unwrap_or(DEFAULT_PAGE_SIZE),
            "sort" => sort.extend(parse_sort(value)?),
            _ => {}
        }
    }
    let mut request = PageRequest::new(page, size);
    request.sort = sort;
    Ok(request)
}

/// `a,b,desc` sorts by a and b descending; a trailing `asc`/`desc` applies to every listed property.
fn parse_sort(value: &str) -> Result<Vec<SortOrder>, AppError> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    let direction = match parts.last().map(|p| p.to_ascii_lowercase()) {
        Some(d) if d == "desc" => {
            parts.pop();
            Direction::Desc
        }
        Some(d) if d == "asc" => {
            parts.pop();
            Direction::Asc
        }
        _ => Direction::Asc,
    };
    parts
        .into_iter()
        .map(|p| {
            StudentField::from_property(p)
                .map(|field| SortOrder { field, direction })
                .ok_or_else(|| AppError::BadRequest(format!("unknown sort property: {}", p)))
        })
        .collect()
}
