//! Async facade: one method per myFlix endpoint.
//!
//! Each method builds a request with `MyflixClient`, hands it to the
//! `Transport`, and parses the answer. Any failure along the way is logged
//! through `ApiError::report` before it reaches the caller.
//!
//! Methods taking a payload serialize it before returning their future, so
//! the future never borrows the payload.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::client::MyflixClient;
use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

type Parser = fn(&MyflixClient, HttpResponse) -> Result<Value, ApiError>;

/// Asynchronous client for the myFlix API.
///
/// Cheap to clone; clones share the transport's connection pool and the
/// credential provider.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    requests: MyflixClient,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_transport(config, credentials, ReqwestTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
        transport: T,
    ) -> Self {
        Self {
            requests: MyflixClient::from_config(config, credentials),
            transport,
        }
    }

    /// The request builder backing this client.
    pub fn requests(&self) -> &MyflixClient {
        &self.requests
    }

    /// `POST /users`. Returns the server's body without unwrapping.
    pub fn register_user<B>(
        &self,
        details: &B,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send + '_
    where
        B: Serialize + ?Sized,
    {
        let request = self.requests.build_register_user(details);
        log_payload(&request);
        self.dispatch(request, MyflixClient::parse_raw)
    }

    /// `POST /login`. Returns the server's body without unwrapping.
    pub fn login_user<B>(
        &self,
        details: &B,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send + '_
    where
        B: Serialize + ?Sized,
    {
        let request = self.requests.build_login_user(details);
        log_payload(&request);
        self.dispatch(request, MyflixClient::parse_raw)
    }

    pub async fn list_movies(&self) -> Result<Value, ApiError> {
        let request = self.requests.build_list_movies();
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn get_movie(&self, title: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_get_movie(title);
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn get_director(&self, name: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_get_director(name);
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn get_genre(&self, name: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_get_genre(name);
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn get_user(&self) -> Result<Value, ApiError> {
        let request = self.requests.build_get_user();
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn get_favorite_movies(&self, movie_id: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_get_favorite_movies(movie_id);
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn add_favorite_movie(&self, movie_id: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_add_favorite_movie(movie_id);
        self.dispatch(request, MyflixClient::parse_unwrapped).await
    }

    pub fn edit_user<B>(
        &self,
        updated: &B,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send + '_
    where
        B: Serialize + ?Sized,
    {
        let request = self.requests.build_edit_user(updated);
        self.dispatch(request, MyflixClient::parse_unwrapped)
    }

    pub async fn delete_user(&self) -> Result<Value, ApiError> {
        let request = self.requests.build_delete_user();
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    pub async fn delete_favorite_movie(&self, movie_id: &str) -> Result<Value, ApiError> {
        let request = self.requests.build_delete_favorite_movie(movie_id);
        self.dispatch(Ok(request), MyflixClient::parse_unwrapped).await
    }

    async fn dispatch(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: Parser,
    ) -> Result<Value, ApiError> {
        let outcome = match request {
            Ok(request) => {
                tracing::debug!(method = %request.method, path = %request.path, "sending request");
                match self.transport.execute(request).await {
                    Ok(response) => parse(&self.requests, response),
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        };
        outcome.map_err(ApiError::report)
    }
}

fn log_payload(request: &Result<HttpRequest, ApiError>) {
    if let Ok(HttpRequest {
        path,
        body: Some(body),
        ..
    }) = request
    {
        tracing::debug!(%path, payload = %body, "submitting user details");
    }
}
