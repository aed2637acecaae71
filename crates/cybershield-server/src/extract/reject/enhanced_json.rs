//! JSON extractor with improved error handling.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, OptionalFromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Maximum allowed JSON payload size in bytes (1MB).
pub(crate) const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// JSON extractor and response.
///
/// Rejections become `400` responses describing what was wrong with the
/// body. As an `Option<Json<T>>` argument, client errors such as a missing
/// body yield `None`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T, S> OptionalFromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequest<S>>::from_request(req, state).await {
            Ok(json) => Ok(Some(json)),
            Err(error) => match error.kind() {
                ErrorKind::InternalServerError => Err(error),
                _ => Ok(None),
            },
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(format!(
                    "JSON deserialization failed: {}",
                    sanitize_error_message(&err.body_text())
                )),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(format!(
                    "JSON parsing failed: {}",
                    sanitize_error_message(&err.body_text())
                )),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_context("Request must have Content-Type header set to 'application/json'"),
            JsonRejection::BytesRejection(err) => {
                let message = err.body_text();
                if message.contains("length limit") {
                    ErrorKind::BadRequest
                        .with_message("Request body too large")
                        .with_context(format!(
                            "Request body exceeds maximum allowed size of {} bytes",
                            MAX_JSON_PAYLOAD_SIZE
                        ))
                } else {
                    ErrorKind::BadRequest
                        .with_message("Failed to read request body")
                        .with_context(sanitize_error_message(&message))
                }
            }
            other => ErrorKind::InternalServerError
                .with_message("Request processing failed")
                .with_context(format!("Unexpected JSON rejection: {}", other.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Echo {
        value: u32,
    }

    async fn echo(Json(body): Json<Echo>) -> Json<Echo> {
        Json(body)
    }

    async fn maybe(body: Option<Json<Echo>>) -> Json<bool> {
        Json(body.is_some())
    }

    fn server() -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/echo", post(echo))
            .route("/maybe", post(maybe));
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn valid_body_is_extracted() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/echo").json(&serde_json::json!({"value": 7})).await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({"value": 7}));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_type_is_bad_request() -> anyhow::Result<()> {
        let server = server()?;
        let response = server
            .post("/echo")
            .json(&serde_json::json!({"value": "seven"}))
            .await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"], "Invalid request data format");
        Ok(())
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/echo").text("{\"value\": 1}").await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn optional_body_may_be_absent() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/maybe").await;
        response.assert_status_ok();
        response.assert_json(&false);
        Ok(())
    }
}
