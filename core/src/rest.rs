// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic code for REST handlers.
//!
//! All services should implement an `app` function in this module that returns the `Router` for the
//! application.
//!
//! Every API should be put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This
//! may seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API should define a `route` method that
//! returns the HTTP method and the API path under test.  All integration tests within the module
//! then rely on `route` to obtain this information, ensuring that they all test the desired API.
//!
//! It is also useful for the tests in this layer to define a `TestContext` in a `testutils` module
//! that allows interacting with the database layer directly, using simplified types.
//!
//! Errors are rendered as an `ErrorResponse` whose `detail` is empty by default.  Routers must be
//! wrapped with a `ResponseMapper` so that the detail can be exposed when running in debug mode.

use crate::driver::DriverError;
use crate::model::ModelError;
use async_trait::async_trait;
use axum::body::{Body, HttpBody};
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::header::AsHeaderName;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Indicates that the request collides with an entity that already exists.
    #[error("{0}")]
    AlreadyExists(String),

    /// Catch-all error type for unexpected storage errors.
    #[error("{0}")]
    BackendError(String),

    /// Catch-all error type for all other unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates an error in the contents of the request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,

    /// Indicates that an access token could not be minted.
    #[error("{0}")]
    TokenError(String),

    /// Indicates an authentication problem.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Indicates that the requested authentication provider does not exist.
    #[error("{0}")]
    UnknownProvider(String),

    /// Indicates that a remote service could not be reached.
    #[error("{0}")]
    Unavailable(String),
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::AlreadyExists(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::PayloadNotEmpty => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RestError::UnknownProvider(_) => StatusCode::BAD_REQUEST,
            RestError::Unavailable(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Returns the stable, translatable title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            RestError::AlreadyExists(_) => "err.duplicate_key",
            RestError::BackendError(_) => "err.repo_ops",
            RestError::InternalError(_) => "err.generic",
            RestError::InvalidRequest(_) => "err.invalid_data",
            RestError::NotFound(_) => "err.not_found",
            RestError::PayloadNotEmpty => "err.invalid_data",
            RestError::TokenError(_) => "err.jwt_generation",
            RestError::Unauthorized(_) => "err.unauthorized",
            RestError::UnknownProvider(_) => "err.wrong_auth_provider",
            RestError::Unavailable(_) => "err.network",
        }
    }
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(msg) => RestError::AlreadyExists(msg),
            DriverError::BackendError(msg) => RestError::BackendError(msg),
            DriverError::InternalError(msg) => RestError::InternalError(msg),
            DriverError::InvalidInput(msg) => RestError::InvalidRequest(msg),
            DriverError::NotFound(msg) => RestError::NotFound(msg),
            DriverError::TokenError(msg) => RestError::TokenError(msg),
            DriverError::Unauthorized(msg) => RestError::Unauthorized(msg),
            e @ DriverError::UnknownProvider(_) => RestError::UnknownProvider(e.to_string()),
            DriverError::Unavailable(msg) => RestError::Unavailable(msg),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut headers = HeaderMap::new();
        if let RestError::Unauthorized(_) = self {
            headers.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        let error = ErrorResponse {
            title: self.title().to_owned(),
            detail: self.to_string(),
            status: status.as_u16(),
        };
        if status.is_server_error() {
            warn!("Request failed with status {}: {}", error.status, error.detail);
        }

        let public = ErrorResponse { detail: String::new(), ..error.clone() };
        let mut response = (status, headers, Json(public)).into_response();
        response.extensions_mut().insert(error);
        response
    }
}

/// Result type for this module.
pub type RestResult<T> = Result<T, RestError>;

/// Representation of the details of an error response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Stable identifier of the error kind.
    pub title: String,

    /// Textual representation of the error.  Only populated in debug mode.
    pub detail: String,

    /// HTTP status code of the response.
    pub status: u16,
}

/// Post-processor for the responses of a router that decides how much detail error responses
/// expose to the client.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseMapper {
    /// Whether error responses should carry the details of the underlying error.
    debug: bool,
}

impl ResponseMapper {
    /// Creates a new mapper that exposes error details only if `debug` is true.
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Wraps all routes of `router`, including its fallback, with this mapper.
    pub fn attach(self, router: Router) -> Router {
        router.layer(axum::middleware::map_response_with_state(self, render_response))
    }
}

/// Rewrites the body of error responses generated by `RestError` to include their detail when
/// `mapper` is in debug mode.
async fn render_response(State(mapper): State<ResponseMapper>, mut response: Response) -> Response {
    let Some(error) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    if !mapper.debug {
        return response;
    }

    let body = match serde_json::to_vec(&error) {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to serialize error response: {}", e);
            return response;
        }
    };
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that we
/// don't care about.  This future-proofs the service.
pub struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// A request body extractor for JSON payloads that reports any decoding problem as a
/// `RestError::InvalidRequest`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(e) => Err(RestError::InvalidRequest(e.body_text())),
        }
    }
}

/// A request body extractor for URL-encoded forms that reports any decoding problem as a
/// `RestError::InvalidRequest`.
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(FormBody(value)),
            Err(e) => Err(RestError::InvalidRequest(e.body_text())),
        }
    }
}

/// Handler for requests that do not match any route.
pub async fn not_found_fallback() -> RestError {
    RestError::NotFound("No route matches the request".to_owned())
}

/// Extracts the header `name` from `headers` and ensures it has at most one value.
pub fn get_unique_header<K: AsHeaderName + Copy>(
    headers: &HeaderMap,
    name: K,
) -> RestResult<Option<&HeaderValue>> {
    let mut iter = headers.get_all(name).iter();
    let value = iter.next();
    if iter.next().is_some() {
        return Err(RestError::InvalidRequest(format!(
            "Header {} cannot have more than one value",
            name.as_str()
        )));
    }
    Ok(value)
}

/// Common test code for the REST server.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use axum::http::{self, HeaderName};
    use serde::Serialize;
    use std::fmt;
    use tower::util::ServiceExt;

    /// Maximum body size for testing purposes.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Builder for a single request to the API server.
    #[must_use]
    pub struct OneShotBuilder {
        /// The router for the app being tested.
        app: Router,

        /// Builder for the request that will be sent to the app.
        builder: http::request::Builder,
    }

    impl OneShotBuilder {
        /// Creates a new request against a given `method`/`uri` pair served by an `app` router.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Adds bearer authentication to the request.
        pub fn with_bearer_auth<T>(mut self, token: T) -> Self
        where
            T: fmt::Display,
        {
            let value = format!("Bearer {}", token);
            self.builder = self.builder.header(header::AUTHORIZATION, value);
            self
        }

        /// Sets the header `name` to `value` in the outgoing request.
        pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            self.builder = self.builder.header(name, value);
            self
        }

        /// Finishes building the request and sends it with an empty payload.
        pub async fn send_empty(self) -> ResponseChecker {
            let request = self.builder.body(Body::empty()).unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a text payload.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            let request = self
                .builder
                .header(header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .body(Body::from(text.into()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a form encoded in the
        /// body as the payload.
        pub async fn send_form<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                .body(Body::from(serde_urlencoded::to_string(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a JSON payload.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }
    }

    /// Validator for the outcome of a request sent by a `OneShotBuilder`.
    #[must_use]
    pub struct ResponseChecker {
        /// Actual response that we received from the app.
        response: Response,

        /// Expected HTTP status code in the response above.
        exp_status: StatusCode,
    }

    impl From<Response> for ResponseChecker {
        fn from(response: Response) -> Self {
            Self { response, exp_status: StatusCode::OK }
        }
    }

    impl ResponseChecker {
        /// Sets the expected exit HTTP status to `status`.
        pub fn expect_status(mut self, status: StatusCode) -> Self {
            self.exp_status = status;
            self
        }

        /// Performs common validation operations on the response.
        pub fn verify(&self) {
            assert_eq!(self.exp_status, self.response.status());
        }

        /// Finishes checking the response and expects it to contain an empty body.
        pub async fn expect_empty(self) {
            self.verify();

            let body = axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let body = String::from_utf8(body.to_vec()).unwrap();
            assert!(body.is_empty(), "Body not empty; got {}", body);
        }

        /// Finishes checking the response and expects its body to be an `ErrorResponse` with the
        /// given `exp_title` and with a detail that matches `exp_re`.  An empty `exp_re` means that
        /// the detail must be empty.
        pub async fn expect_error(self, exp_title: &str, exp_re: &str) {
            self.verify();

            let body = axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let response: ErrorResponse = match serde_json::from_slice(&body) {
                Ok(response) => response,
                Err(e) => {
                    let body = String::from_utf8(body.to_vec()).unwrap();
                    panic!("Invalid error response due to {}; content was {}", e, body);
                }
            };
            assert_eq!(exp_title, response.title, "Unexpected title in {:?}", response);
            assert_eq!(self.exp_status.as_u16(), response.status);
            if exp_re.is_empty() {
                assert!(response.detail.is_empty(), "Response detail '{:?}' is not empty", response);
            } else {
                let re = regex::Regex::new(exp_re).unwrap();
                assert!(
                    re.is_match(&response.detail),
                    "Response detail '{:?}' does not match re '{}'",
                    response,
                    exp_re
                );
            }
        }

        /// Finishes checking the response and expects it to contain a valid JSON object of
        /// type `T`.
        pub async fn expect_json<T: DeserializeOwned>(self) -> T {
            self.verify();

            let body = axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            serde_json::from_slice::<T>(&body).unwrap()
        }

        /// Finishes checking the response and returns the response itself for out of band
        /// validation of properties not supported by the `ResponseChecker`.
        pub async fn take_response(self) -> Response {
            self.verify();

            self.response
        }
    }

    /// Generates a test to verify that an API that expects JSON fails when it gets something else.
    ///
    /// The `app` must expose error details.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
                    .expect_error("err.invalid_data", "Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
                    .expect_error("err.invalid_data", "expected ident")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_json;

    /// Generates a test to verify that an API that does not expect a payload fails as necessary.
    ///
    /// The `app` must expose error details.
    #[macro_export]
    macro_rules! test_payload_must_be_empty {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_empty() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("should not be here")
                    .await
                    .expect_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE)
                    .expect_error("err.invalid_data", "should be empty")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_empty;

    /// Generates a test to verify that an API that expects a form in its body fails when it gets
    /// something else.
    ///
    /// The `app` must expose error details.
    #[macro_export]
    macro_rules! test_payload_must_be_form {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_form() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("this is not a form")
                    .await
                    .expect_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
                    .expect_error("err.invalid_data", "Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .send_text("this is not a form")
                    .await
                    .expect_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
                    .expect_error("err.invalid_data", "missing field")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_form;
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use axum::http;
    use axum::routing::{get, post};

    #[derive(Deserialize, Serialize)]
    struct Payload {
        value: u32,
    }

    /// Builds a router that exercises the error handling and extractors of this module.
    fn app(debug: bool) -> Router {
        let router = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route("/fail", get(|| async { RestError::BackendError("disk on fire".to_owned()) }))
            .route("/denied", get(|| async { RestError::Unauthorized("bad token".to_owned()) }))
            .route("/empty", post(|_: EmptyBody| async { StatusCode::NO_CONTENT }))
            .route("/json", post(|JsonBody(p): JsonBody<Payload>| async move { Json(p) }))
            .route("/form", post(|FormBody(p): FormBody<Payload>| async move { Json(p) }))
            .fallback(not_found_fallback);
        ResponseMapper::new(debug).attach(router)
    }

    #[test]
    fn test_status_and_title() {
        for (err, status, title) in [
            (RestError::AlreadyExists(String::new()), 422, "err.duplicate_key"),
            (RestError::BackendError(String::new()), 500, "err.repo_ops"),
            (RestError::InternalError(String::new()), 500, "err.generic"),
            (RestError::InvalidRequest(String::new()), 422, "err.invalid_data"),
            (RestError::NotFound(String::new()), 404, "err.not_found"),
            (RestError::PayloadNotEmpty, 413, "err.invalid_data"),
            (RestError::TokenError(String::new()), 500, "err.jwt_generation"),
            (RestError::Unauthorized(String::new()), 401, "err.unauthorized"),
            (RestError::UnknownProvider(String::new()), 400, "err.wrong_auth_provider"),
            (RestError::Unavailable(String::new()), 504, "err.network"),
        ] {
            assert_eq!(status, err.status().as_u16());
            assert_eq!(title, err.title());
        }
    }

    #[test]
    fn test_from_driver_error() {
        assert_eq!(
            RestError::AlreadyExists("dup".to_owned()),
            RestError::from(DriverError::AlreadyExists("dup".to_owned()))
        );
        assert_eq!(
            RestError::InvalidRequest("bad".to_owned()),
            RestError::from(DriverError::InvalidInput("bad".to_owned()))
        );
        assert_eq!(
            RestError::UnknownProvider("Unknown authentication provider foo".to_owned()),
            RestError::from(DriverError::UnknownProvider("foo".to_owned()))
        );
        assert_eq!(
            RestError::TokenError("cannot sign".to_owned()),
            RestError::from(DriverError::TokenError("cannot sign".to_owned()))
        );
        assert_eq!(
            RestError::Unavailable("timeout".to_owned()),
            RestError::from(DriverError::Unavailable("timeout".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_success_untouched() {
        let response = OneShotBuilder::new(app(true), (http::Method::GET, "/ok"))
            .send_empty()
            .await
            .take_response()
            .await;
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(b"fine", body.as_ref());
    }

    #[tokio::test]
    async fn test_error_detail_hidden_without_debug() {
        OneShotBuilder::new(app(false), (http::Method::GET, "/fail"))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("err.repo_ops", "")
            .await;
    }

    #[tokio::test]
    async fn test_error_detail_shown_with_debug() {
        OneShotBuilder::new(app(true), (http::Method::GET, "/fail"))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("err.repo_ops", "^disk on fire$")
            .await;
    }

    #[tokio::test]
    async fn test_unauthorized_sets_challenge() {
        let response = OneShotBuilder::new(app(false), (http::Method::GET, "/denied"))
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .take_response()
            .await;
        assert_eq!("Bearer", response.headers().get(header::WWW_AUTHENTICATE).unwrap());
    }

    #[tokio::test]
    async fn test_fallback_not_found() {
        OneShotBuilder::new(app(true), (http::Method::GET, "/does-not-exist"))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("err.not_found", "No route")
            .await;
    }

    #[tokio::test]
    async fn test_json_body_ok() {
        let response = OneShotBuilder::new(app(true), (http::Method::POST, "/json"))
            .send_json(Payload { value: 5 })
            .await
            .expect_json::<Payload>()
            .await;
        assert_eq!(5, response.value);
    }

    #[tokio::test]
    async fn test_json_body_invalid_type() {
        OneShotBuilder::new(app(true), (http::Method::POST, "/json"))
            .send_json(serde_json::json!({"value": "five"}))
            .await
            .expect_status(StatusCode::UNPROCESSABLE_ENTITY)
            .expect_error("err.invalid_data", "invalid type")
            .await;
    }

    #[tokio::test]
    async fn test_form_body_ok() {
        let response = OneShotBuilder::new(app(true), (http::Method::POST, "/form"))
            .send_form(Payload { value: 7 })
            .await
            .expect_json::<Payload>()
            .await;
        assert_eq!(7, response.value);
    }

    test_payload_must_be_empty!(app(true), (http::Method::POST, "/empty"));

    test_payload_must_be_json!(app(true), (http::Method::POST, "/json"));

    test_payload_must_be_form!(app(true), (http::Method::POST, "/form"));

    #[test]
    fn test_get_unique_header_missing() {
        let mut headers = HeaderMap::new();
        headers.append("ignore-me", "ignored".parse().unwrap());
        assert!(get_unique_header(&headers, "the-header").unwrap().is_none());
    }

    #[test]
    fn test_get_unique_header_one() {
        let mut headers = HeaderMap::new();
        headers.append("ignore-me", "ignored".parse().unwrap());
        headers.append("the-header", "foo".parse().unwrap());
        assert_eq!(b"foo", get_unique_header(&headers, "the-header").unwrap().unwrap().as_bytes());
    }

    #[test]
    fn test_get_unique_header_many() {
        let mut headers = HeaderMap::new();
        headers.append("the-header", "foo".parse().unwrap());
        headers.append("ignore-me", "ignored".parse().unwrap());
        headers.append("The-Header", "bar".parse().unwrap());
        assert_eq!(
            RestError::InvalidRequest(
                "Header the-header cannot have more than one value".to_owned()
            ),
            get_unique_header(&headers, "the-header").unwrap_err()
        );
    }
}
