use common_http_errors::ApiError;
use axum::response::IntoResponse;
use axum::http::StatusCode;
use http_body_util::BodyExt;

#[test]
fn bad_request_variant() {
    let err = ApiError::BadRequest { code: "invalid_something", message: None };
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "invalid_something");
}

#[test]
fn not_found_variant() {
    let err = ApiError::NotFound { code: "missing_resource", message: None };
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "missing_resource");
}

#[test]
fn conflict_variant() {
    let err = ApiError::conflict("duplicate_name", "already taken");
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "duplicate_name");
}

#[test]
fn internal_variant() {
    let err = ApiError::internal("boom");
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "internal_error");
}

#[tokio::test]
async fn body_carries_code_and_message() {
    let resp = ApiError::bad_request("invalid_price", "price cannot be negative").into_response();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("\"code\":\"invalid_price\""), "body was: {text}");
    assert!(text.contains("price cannot be negative"), "body was: {text}");
}

#[tokio::test]
async fn message_omitted_when_absent() {
    let resp = ApiError::NotFound { code: "missing_resource", message: None }.into_response();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("message"), "body was: {text}");
}
