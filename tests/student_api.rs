use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use student_report::{app_router, AppState, HeaderAlerts, InMemoryStudentRepository, ReportSettings};
use tower::ServiceExt;

fn app(output_dir: &Path) -> Router {
    let settings = ReportSettings {
        template_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/student_report.json"),
        output_dir: output_dir.to_path_buf(),
    };
    let alerts = HeaderAlerts::new("studentReportApp").expect("valid prefix");
    app_router(AppState::new(Arc::new(InMemoryStudentRepository::new()), settings, alerts))
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("route executes")
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json payload")
}

fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

async fn create(app: &Router, body: Value) -> Value {
    let response = send(app, json_request(Method::POST, "/api/students", &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json_body(response).await
}

#[tokio::test]
async fn create_fetch_delete_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(&app, json_request(Method::POST, "/api/students", &json!({"name": "Ada"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(header_str(&response, "location"), Some("/api/students/1"));
    assert_eq!(
        header_str(&response, "x-studentreportapp-alert"),
        Some("studentReportApp.student.created")
    );
    assert_eq!(header_str(&response, "x-studentreportapp-params"), Some("1"));
    let created = read_json_body(response).await;
    assert_eq!(created["id"], json!(1));

    let response = send(&app, get("/api/students/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["name"], json!("Ada"));

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri("/api/students/1")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, "x-studentreportapp-alert"),
        Some("studentReportApp.student.deleted")
    );

    let response = send(&app, get("/api/students/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn create_with_id_is_rejected_without_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(
        &app,
        json_request(Method::POST, "/api/students", &json!({"id": 5, "name": "Ada"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "x-studentreportapp-error"), Some("error.idexists"));
    assert_eq!(header_str(&response, "x-studentreportapp-params"), Some("student"));
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, get("/api/students")).await;
    assert_eq!(header_str(&response, "x-total-count"), Some("0"));
}

#[tokio::test]
async fn update_without_id_behaves_like_create() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(&app, json_request(Method::PUT, "/api/students", &json!({"name": "Grace"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(header_str(&response, "location"), Some("/api/students/1"));
    let body = read_json_body(response).await;
    assert_eq!(body, json!({"id": 1, "name": "Grace", "email": null, "birthDate": null}));
}

#[tokio::test]
async fn update_with_id_replaces_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    create(&app, json!({"name": "Ada"})).await;

    let response = send(
        &app,
        json_request(
            Method::PUT,
            "/api/students",
            &json!({"id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "birthDate": "1815-12-10"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, "x-studentreportapp-alert"),
        Some("studentReportApp.student.updated")
    );
    assert_eq!(read_json_body(response).await["email"], json!("ada@example.com"));

    let fetched = read_json_body(send(&app, get("/api/students/1")).await).await;
    assert_eq!(fetched["name"], json!("Ada Lovelace"));
    assert_eq!(fetched["birthDate"], json!("1815-12-10"));
}

#[tokio::test]
async fn upsert_with_unknown_id_is_stored_and_later_creates_skip_it() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(&app, json_request(Method::PUT, "/api/students", &json!({"id": 9, "name": "Edsger"}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let next = create(&app, json!({"name": "Barbara"})).await;
    assert_eq!(next["id"], json!(10));
}

#[tokio::test]
async fn invalid_payloads_are_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(&app, json_request(Method::POST, "/api/students", &json!({"name": "  "}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json_body(response).await["error"]["code"], json!("validation_error"));

    let response = send(
        &app,
        json_request(Method::POST, "/api/students", &json!({"name": "Ada", "email": "nope"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn undecodable_bodies_answer_with_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let response = send(&app, json_request(Method::POST, "/api/students", &json!({}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(header_str(&response, "content-type"), Some("application/json"));
    let body = read_json_body(response).await;
    assert_eq!(body["error"]["code"], json!("validation_error"));
    assert!(body["error"]["message"].as_str().unwrap().contains("name"));

    let malformed = Request::builder()
        .method(Method::PUT)
        .uri("/api/students")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let response = send(&app, malformed).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json_body(response).await["error"]["code"], json!("bad_request"));
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    let response = send(&app, get("/api/students/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_paged_with_total_and_links() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    for i in 1..=7 {
        create(&app, json!({"name": format!("Student {i}")})).await;
    }

    let response = send(&app, get("/api/students?page=1&size=3")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-total-count"), Some("7"));
    let link = header_str(&response, "link").unwrap().to_string();
    assert!(link.contains("</api/students?page=2&size=3>; rel=\"next\""));
    assert!(link.contains("</api/students?page=0&size=3>; rel=\"prev\""));
    assert!(link.contains("</api/students?page=2&size=3>; rel=\"last\""));
    let body = read_json_body(response).await;
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![4, 5, 6]);

    let response = send(&app, get("/api/students?page=2&size=3")).await;
    let link = header_str(&response, "link").unwrap().to_string();
    assert!(!link.contains("rel=\"next\""));
    assert_eq!(read_json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_honours_sort_and_rejects_unknown_properties() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    for name in ["Bob", "Carol", "Alice"] {
        create(&app, json!({"name": name})).await;
    }

    let body = read_json_body(send(&app, get("/api/students?sort=name,desc")).await).await;
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Carol", "Bob", "Alice"]);

    let response = send(&app, get("/api/students?sort=grade")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_routes_write_each_format() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    for i in 1..=12 {
        create(&app, json!({"name": format!("Student {i}"), "email": format!("s{i}@example.com")})).await;
    }

    let cases = [
        ("/api/exportPDF", "pdfReport.pdf", "pdf", &b"%PDF"[..]),
        ("/api/exportWord", "wordReport.rtf", "rtf", &b"{\\rtf1"[..]),
        ("/api/exportHTML", "HTMLReport.html", "html", &b"<!DOCTYPE html>"[..]),
    ];
    for (uri, file, format, magic) in cases {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let outcome = read_json_body(response).await;
        assert_eq!(outcome["format"], json!(format));
        assert_eq!(outcome["rows"], json!(10));
        let written = std::fs::read(dir.path().join(file)).expect("report file written");
        assert!(written.starts_with(magic), "{file} has wrong signature");
        assert_eq!(outcome["bytes"], json!(written.len()));
    }

    let html = std::fs::read_to_string(dir.path().join("HTMLReport.html")).unwrap();
    assert!(html.contains("Student 10"));
    assert!(!html.contains("Student 11"));
}

#[tokio::test]
async fn parameterized_export_and_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    create(&app, json!({"name": "Ada"})).await;

    let response = send(&app, get("/api/export/word")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(dir.path().join("wordReport.rtf").exists());

    let response = send(&app, get("/api/export/xlsx")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn broken_template_surfaces_as_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("broken.json");
    std::fs::write(&template, r#"{"title":"t","columns":[{"field":"grade"}]}"#).unwrap();
    let settings = ReportSettings {
        template_path: template,
        output_dir: dir.path().join("out"),
    };
    let alerts = HeaderAlerts::new("studentReportApp").unwrap();
    let app = app_router(AppState::new(Arc::new(InMemoryStudentRepository::new()), settings, alerts));

    let response = send(&app, get("/api/exportPDF")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["error"]["code"], json!("report_error"));
    assert!(!dir.path().join("out/pdfReport.pdf").exists());
}

#[tokio::test]
async fn health_routes_report_status() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    let health = read_json_body(send(&app, get("/health")).await).await;
    assert_eq!(health, json!({"status": "ok"}));
    let response = send(&app, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let version = read_json_body(send(&app, get("/version")).await).await;
    assert_eq!(version["name"], json!("student-report"));
}
