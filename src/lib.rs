//! # goodreads-api - Goodreads REST API client for Rust
//!
//! A Rust client for the Goodreads book-catalog web service. This library
//! wraps the service's REST endpoints (books, authors, shelves, reviews,
//! groups, social graph) behind typed async functions, handles the OAuth 1.0a
//! three-legged handshake for endpoints requiring user authorization, and
//! normalizes the service's XML responses into plain [`serde_json::Value`]
//! trees.
//!
//! ## Features
//!
//! - One async function per remote operation, each a single request/response
//!   round trip
//! - OAuth 1.0a (HMAC-SHA1) signed GET/POST/DELETE for authenticated
//!   endpoints, with the signer behind a swappable [`OAuthProvider`] trait
//! - XML responses normalized to nested JSON values: attributes merged into
//!   elements, singleton children collapsed to scalars, repeated children
//!   collected into arrays
//! - Robust error handling with detailed error types
//!
//! ## Basic Usage
//!
//! ```no_run
//! use goodreads_api::{Credentials, Goodreads};
//!
//! # async fn run() -> Result<(), goodreads_api::GoodreadsError> {
//! let client = Goodreads::new(Credentials::new("API_KEY", "API_SECRET"))?;
//!
//! let author = client.get_author_info("175417").await?;
//! println!("author name: {}", author["name"]);
//!
//! let shelves = client.get_users_shelves("12345").await?;
//! println!("shelves: {}", shelves);
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentication
//!
//! Endpoints that act on behalf of a user require the OAuth handshake:
//!
//! ```no_run
//! use goodreads_api::{Credentials, Goodreads};
//!
//! # async fn run() -> Result<(), goodreads_api::GoodreadsError> {
//! let mut client = Goodreads::with_callback(
//!     Credentials::new("API_KEY", "API_SECRET"),
//!     "https://example.com/callback",
//! )?;
//!
//! // Send the user to this URL to grant access
//! let authorize_url = client.get_request_token().await?;
//! println!("visit: {}", authorize_url);
//!
//! // After the user granted access
//! client.get_access_token().await?;
//! client.follow_author("175417").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod oauth;
pub mod request;
pub mod transport;
pub mod xml;

// Re-export main types for convenience
pub use api::{Credentials, Goodreads};
pub use client::Config;
pub use error::{GoodreadsError, Result};
pub use oauth::{OAuthClient, OAuthCredentials, OAuthProvider, OAuthSession, TokenPair};
pub use request::{Params, RequestBuilder, RequestDescriptor};
pub use transport::{execute, HttpTransport, Transport, Verb, RESPONSE_ROOT};
pub use xml::parse_xml;

// Re-export serde_json's value type for convenience
pub use serde_json::Value;
