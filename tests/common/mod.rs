//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use std::io::Cursor;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use docdesk_server::config::Config;
use docdesk_server::convert::{build_docx, build_pdf, write_docx, PageSize};
use docdesk_server::state::AppState;

pub const BOUNDARY: &str = "docdesk-test-boundary";

/// Fresh state and the router built on it
pub fn test_app() -> (AppState, Router) {
    test_app_with(Config::default())
}

pub fn test_app_with(config: Config) -> (AppState, Router) {
    let state = AppState::new(config);
    let app = docdesk_server::app(state.clone());
    (state, app)
}

pub fn pdf_bytes(text: &str) -> Vec<u8> {
    build_pdf(PageSize::Letter, &[text.to_string()]).unwrap()
}

pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let page: Vec<String> = paragraphs.iter().map(|p| p.to_string()).collect();
    let mut buf = Cursor::new(Vec::new());
    write_docx(build_docx(&[page]), &mut buf).unwrap();
    buf.into_inner()
}

/// Content type and body of a multipart form with one `files` part per file
pub fn multipart_body(files: &[(&str, Vec<u8>)]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, data) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub async fn send(app: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn upload(app: &Router, uri: &str, files: Vec<(&str, Vec<u8>)>) -> Response<Body> {
    let (content_type, body) = multipart_body(&files);
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Body of a GET request as text
pub async fn page(app: &Router, uri: &str) -> String {
    body_text(send(app, Method::GET, uri).await).await
}

pub fn location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}
