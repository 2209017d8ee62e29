#![forbid(unsafe_code)]

use poem::error::{MethodNotAllowedError, NotFoundError, ParsePathError};
use poem_openapi::error::ParseParamError;
use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use poem_openapi::Object;
use thiserror::Error;

// Error details returned to callers.
pub const NAME_EMPTY_MSG         : &str = "Name cannot be empty";
pub const NOT_FOUND_MSG          : &str = "Not Found";
pub const METHOD_NOT_ALLOWED_MSG : &str = "Method Not Allowed";

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("hello_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),
}

// ***************************************************************************
//                              Error Responses
// ***************************************************************************
/// The body of every error response.
#[derive(Object, Debug)]
pub struct ErrorDetail
{
    /// Human readable reason for the failure.
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: &str) -> Self {
        Self {detail: detail.to_string()}
    }
}

// ---------------------------------------------------------------------------
// not_found:
// ---------------------------------------------------------------------------
/** Render routing misses with the same body shape the endpoints use. */
pub async fn not_found(_: NotFoundError) -> Response {
    detail_response(StatusCode::NOT_FOUND, NOT_FOUND_MSG)
}

// ---------------------------------------------------------------------------
// method_not_allowed:
// ---------------------------------------------------------------------------
pub async fn method_not_allowed(_: MethodNotAllowedError) -> Response {
    detail_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MSG)
}

// ---------------------------------------------------------------------------
// bad_path:
// ---------------------------------------------------------------------------
/** Path segments that poem cannot decode, such as invalid utf-8. */
pub async fn bad_path(e: ParsePathError) -> Response {
    detail_response(StatusCode::BAD_REQUEST, &e.to_string())
}

// ---------------------------------------------------------------------------
// bad_param:
// ---------------------------------------------------------------------------
pub async fn bad_param(e: ParseParamError) -> Response {
    detail_response(StatusCode::BAD_REQUEST, &e.to_string())
}

fn detail_response(status: StatusCode, detail: &str) -> Response {
    Json(serde_json::json!({ "detail": detail }))
        .with_status(status)
        .into_response()
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_body() {
        let resp = not_found(NotFoundError).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = resp.into_body().into_json().await.unwrap();
        assert_eq!(body["detail"], NOT_FOUND_MSG);
    }

    #[tokio::test]
    async fn method_not_allowed_body() {
        let resp = method_not_allowed(MethodNotAllowedError).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = resp.into_body().into_json().await.unwrap();
        assert_eq!(body["detail"], METHOD_NOT_ALLOWED_MSG);
    }

    #[tokio::test]
    async fn bad_path_body() {
        let resp = bad_path(ParsePathError).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.into_body().into_json().await.unwrap();
        assert_eq!(body["detail"], ParsePathError.to_string());
    }

    #[test]
    fn error_messages() {
        let e = Errors::TOMLParseError("/tmp/x.toml".to_string());
        assert_eq!(e.to_string(), "Unable to parse TOML file: /tmp/x.toml");
    }
}
