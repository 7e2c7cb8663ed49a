use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::client::create_http_client;
use crate::error::{GoodreadsError, Result};
use crate::request::RequestDescriptor;
use crate::xml::parse_xml;

/// Fixed root element wrapping every XML response of the service
pub const RESPONSE_ROOT: &str = "GoodreadsResponse";

/// Transport verb an endpoint dispatches through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    OAuthGet,
    OAuthPost,
    OAuthDelete,
}

/// The layer performing the actual network call for one request descriptor.
///
/// Each operation is a single round trip resolving with the raw response
/// body; there are no retries and no timeout beyond the HTTP client defaults.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Unauthenticated GET
    async fn get(&self, req: &RequestDescriptor) -> Result<String>;

    /// OAuth-signed GET
    async fn oauth_get(&self, req: &RequestDescriptor) -> Result<String>;

    /// OAuth-signed POST; parameters travel in the query string, not a body
    async fn oauth_post(&self, req: &RequestDescriptor) -> Result<String>;

    /// OAuth-signed DELETE
    async fn oauth_delete(&self, req: &RequestDescriptor) -> Result<String>;
}

/// Default [`Transport`] over the crate's HTTP client; signing is delegated
/// to the [`crate::OAuthProvider`] carried by the descriptor's credentials.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: create_http_client(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, req: &RequestDescriptor) -> Result<String> {
        let url = request_url(req)?;
        tracing::debug!(url = %url, "dispatching GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GoodreadsError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn oauth_get(&self, req: &RequestDescriptor) -> Result<String> {
        let (provider, token, secret) = signing_parts(req)?;
        let url = request_url(req)?;
        provider.signed_get(url.as_str(), token, secret).await
    }

    async fn oauth_post(&self, req: &RequestDescriptor) -> Result<String> {
        let (provider, token, secret) = signing_parts(req)?;
        let url = request_url(req)?;
        provider.signed_post(url.as_str(), token, secret).await
    }

    async fn oauth_delete(&self, req: &RequestDescriptor) -> Result<String> {
        let (provider, token, secret) = signing_parts(req)?;
        let url = request_url(req)?;
        provider.signed_delete(url.as_str(), token, secret).await
    }
}

/// Serialize the descriptor's query parameters onto its path
fn request_url(req: &RequestDescriptor) -> Result<Url> {
    let mut url = Url::parse(req.path())?;
    for (key, value) in req.query_params() {
        url.query_pairs_mut().append_pair(key, value);
    }
    Ok(url)
}

/// Extract the signer and access token pair, failing before any network I/O
/// when the descriptor is not fully authenticated
fn signing_parts(
    req: &RequestDescriptor,
) -> Result<(&dyn crate::oauth::OAuthProvider, &str, &str)> {
    let credentials = req.oauth().ok_or(GoodreadsError::NotAuthenticated)?;
    let (token, secret) = req
        .access_token()
        .ok_or(GoodreadsError::NotAuthenticated)?;
    Ok((credentials.provider.as_ref(), token, secret))
}

/// Dispatch a descriptor through the given transport verb, normalize the XML
/// body and unwrap it.
///
/// A top-level `<error>` payload is surfaced as [`GoodreadsError::Api`] for
/// every verb. Otherwise the tree under [`RESPONSE_ROOT`] is returned, further
/// narrowed to the descriptor's response key when one is set. Missing keys
/// yield `Value::Null`.
pub async fn execute(
    transport: &dyn Transport,
    verb: Verb,
    req: RequestDescriptor,
) -> Result<Value> {
    let body = match verb {
        Verb::Get => transport.get(&req).await?,
        Verb::OAuthGet => transport.oauth_get(&req).await?,
        Verb::OAuthPost => transport.oauth_post(&req).await?,
        Verb::OAuthDelete => transport.oauth_delete(&req).await?,
    };

    let doc = parse_xml(&body)?;
    if let Some(error) = doc.get("error") {
        return Err(GoodreadsError::api(error.clone()));
    }

    let mut payload = match doc {
        Value::Object(mut map) => map.remove(RESPONSE_ROOT).unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if !req.response_key().is_empty() {
        payload = match payload {
            Value::Object(mut map) => map.remove(req.response_key()).unwrap_or(Value::Null),
            _ => Value::Null,
        };
    }
    Ok(payload)
}
