//! Client for the myFlix movie catalog API.
//!
//! # Overview
//! Registration, login, movie lookups, favorites, and profile CRUD, each
//! mapped to exactly one HTTP request.
//!
//! # Design
//! - `MyflixClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `ApiClient` pairs it with a `Transport` (reqwest by default) to run the
//!   round-trip asynchronously.
//! - Credentials come from an injected `CredentialProvider`, read at the
//!   moment each request is built.
//! - Failures are structured (`ApiError::Network`, `ApiError::Server`) but
//!   all display the same fixed message.

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use client::{unwrap_body, MyflixClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use credentials::{CredentialProvider, CredentialStore, StaticCredentials, TOKEN_KEY, USER_KEY};
pub use error::{ApiError, FAILURE_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{FavoriteMovie, LoginDetails, UserDetails};
