//! Stateless HTTP request builder and response parser for the myFlix API.
//!
//! # Design
//! `MyflixClient` holds the base URL and a handle to the credential provider;
//! it keeps nothing between calls. Each operation has a `build_*` method
//! producing an `HttpRequest`. Responses go through one of two parsers:
//! `parse_raw` for the onboarding calls (register, login) and
//! `parse_unwrapped` for everything behind authentication.
//!
//! Authenticated builders read the username and token at build time. Missing
//! values are written as the literal `null`, so a logged-out client still
//! produces a request (`/users/null`, `Bearer null`) and lets the server
//! reject it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::FavoriteMovie;

/// Substituted for a username or token the provider does not have.
const MISSING_CREDENTIAL: &str = "null";

/// Synchronous, stateless client for the myFlix API.
#[derive(Clone)]
pub struct MyflixClient {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl fmt::Debug for MyflixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MyflixClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MyflixClient {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::new(&config.base_url, credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- onboarding ---------------------------------------------------------

    pub fn build_register_user<B>(&self, details: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("users"),
            headers: vec![content_type()],
            body: Some(to_json(details)?),
        })
    }

    pub fn build_login_user<B>(&self, details: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url("login"),
            headers: vec![content_type()],
            body: Some(to_json(details)?),
        })
    }

    // -- catalog ------------------------------------------------------------

    pub fn build_list_movies(&self) -> HttpRequest {
        self.authorized(HttpMethod::Get, self.url("movies"))
    }

    pub fn build_get_movie(&self, title: &str) -> HttpRequest {
        self.authorized(HttpMethod::Get, self.url(&format!("movies/{title}")))
    }

    pub fn build_get_director(&self, name: &str) -> HttpRequest {
        self.authorized(HttpMethod::Get, self.url(&format!("movies/director/{name}")))
    }

    pub fn build_get_genre(&self, name: &str) -> HttpRequest {
        self.authorized(HttpMethod::Get, self.url(&format!("movies/genre/{name}")))
    }

    // -- account ------------------------------------------------------------

    pub fn build_get_user(&self) -> HttpRequest {
        let path = self.user_url("");
        self.authorized(HttpMethod::Get, path)
    }

    pub fn build_get_favorite_movies(&self, movie_id: &str) -> HttpRequest {
        let path = self.user_url(&format!("/movies/{movie_id}"));
        self.authorized(HttpMethod::Get, path)
    }

    pub fn build_add_favorite_movie(&self, movie_id: &str) -> Result<HttpRequest, ApiError> {
        let path = self.user_url(&format!("/movies/{movie_id}"));
        let body = FavoriteMovie {
            favorite_movie: movie_id.to_string(),
        };
        let mut req = self.authorized(HttpMethod::Post, path);
        req.headers.push(content_type());
        req.body = Some(to_json(&body)?);
        Ok(req)
    }

    pub fn build_edit_user<B>(&self, updated: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let path = self.user_url("");
        let mut req = self.authorized(HttpMethod::Put, path);
        req.headers.push(content_type());
        req.body = Some(to_json(updated)?);
        Ok(req)
    }

    pub fn build_delete_user(&self) -> HttpRequest {
        let path = self.user_url("");
        self.authorized(HttpMethod::Delete, path)
    }

    pub fn build_delete_favorite_movie(&self, movie_id: &str) -> HttpRequest {
        let path = self.user_url(&format!("/movies/{movie_id}"));
        self.authorized(HttpMethod::Delete, path)
    }

    // -- parsing ------------------------------------------------------------

    /// Body of a successful response exactly as the server sent it. An empty
    /// body parses to `null`.
    pub fn parse_raw(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        decode_body(&response.body)
    }

    /// Body of a successful response, with falsy bodies replaced by `{}`.
    pub fn parse_unwrapped(&self, response: HttpResponse) -> Result<Value, ApiError> {
        self.parse_raw(response).map(unwrap_body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn user_url(&self, suffix: &str) -> String {
        let username = self
            .credentials
            .username()
            .unwrap_or_else(|| MISSING_CREDENTIAL.to_string());
        self.url(&format!("users/{username}{suffix}"))
    }

    fn authorized(&self, method: HttpMethod, path: String) -> HttpRequest {
        let token = self
            .credentials
            .token()
            .unwrap_or_else(|| MISSING_CREDENTIAL.to_string());
        HttpRequest {
            method,
            path,
            headers: vec![("Authorization".to_string(), format!("Bearer {token}"))],
            body: None,
        }
    }
}

/// Replace a falsy JSON value (`null`, `false`, `0`, `""`) with an empty
/// object; pass anything else through untouched.
pub fn unwrap_body(body: Value) -> Value {
    if is_falsy(&body) {
        Value::Object(Map::new())
    } else {
        body
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode_body(body: &str) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map any non-2xx status to `ApiError::Server`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}
