//! Student CRUD handlers: create, update, list, read, delete.

use crate::error::AppError;
use crate::extractors::{JsonPayload, Pageable};
use crate::model::Student;
use crate::response::pagination_headers;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

pub const ENTITY_NAME: &str = "student";
pub const STUDENTS_BASE_URL: &str = "/api/students";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn assigned_id(student: &Student) -> Result<i64, AppError> {
    student
        .id
        .ok_or_else(|| AppError::Internal("store returned a student without id".into()))
}

/// POST /api/students. 400 with failure headers and no body when the payload already has an id.
pub async fn create_student(
    State(state): State<AppState>,
    JsonPayload(student): JsonPayload<Student>,
) -> Result<Response, AppError> {
    tracing::debug!(?student, "REST request to save Student");
    if student.id.is_some() {
        let headers = state
            .alerts
            .failure(ENTITY_NAME, "idexists", "A new student cannot already have an ID");
        return Ok((StatusCode::BAD_REQUEST, headers).into_response());
    }
    let result = state.students.save(&student).await?;
    let id = assigned_id(&result)?;
    let mut headers = state.alerts.entity_creation(ENTITY_NAME, &id.to_string());
    let location = HeaderValue::from_str(&format!("{}/{}", STUDENTS_BASE_URL, id))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    headers.insert(header::LOCATION, location);
    Ok((StatusCode::CREATED, headers, Json(result)).into_response())
}

/// PUT /api/students. Without an id this is a create.
pub async fn update_student(
    State(state): State<AppState>,
    JsonPayload(student): JsonPayload<Student>,
) -> Result<Response, AppError> {
    tracing::debug!(?student, "REST request to update Student");
    if student.id.is_none() {
        return create_student(State(state), JsonPayload(student)).await;
    }
    let result = state.students.save(&student).await?;
    let id = assigned_id(&result)?;
    let headers = state.alerts.entity_update(ENTITY_NAME, &id.to_string());
    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

/// GET /api/students. Body is the page content; totals and links travel in headers.
pub async fn list_students(
    State(state): State<AppState>,
    Pageable(request): Pageable,
) -> Result<Response, AppError> {
    tracing::debug!(page = request.page, size = request.size, "REST request to get a page of Students");
    let page = state.students.find_all(&request).await?;
    let headers = pagination_headers(&page, STUDENTS_BASE_URL);
    Ok((StatusCode::OK, headers, Json(page.content)).into_response())
}

/// GET /api/students/:id. 404 with an empty body when absent.
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "REST request to get Student");
    Ok(match state.students.find_one(id).await? {
        Some(student) => (StatusCode::OK, Json(student)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// DELETE /api/students/:id. Succeeds whether or not the row existed.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "REST request to delete Student");
    state.students.delete(id).await?;
    let headers = state.alerts.entity_deletion(ENTITY_NAME, &id.to_string());
    Ok((StatusCode::OK, headers).into_response())
}
