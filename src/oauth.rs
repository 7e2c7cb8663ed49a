use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use url::{form_urlencoded, Url};
use uuid::Uuid;

use crate::client::{create_http_client, Config};
use crate::error::{GoodreadsError, Result};

type HmacSha1 = Hmac<Sha1>;

const OAUTH_VERSION: &str = "1.0";
const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// RFC 3986 unreserved characters; everything else is percent-encoded
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// An OAuth 1.0a token/secret pair (request token or access token)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        TokenPair {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

/// Capability interface over an OAuth 1.0a signer/transport.
///
/// Any compliant implementation satisfies the handshake and signed-request
/// needs of this crate; [`OAuthClient`] is the default HMAC-SHA1 one.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Step 1 of the handshake: obtain a request token
    async fn request_token(&self) -> Result<TokenPair>;

    /// Step 2 of the handshake: exchange the request token for an access token
    async fn access_token(&self, request: &TokenPair) -> Result<TokenPair>;

    /// Signed GET returning the raw response body
    async fn signed_get(&self, url: &str, token: &str, secret: &str) -> Result<String>;

    /// Signed POST returning the raw response body; no body payload is sent
    async fn signed_post(&self, url: &str, token: &str, secret: &str) -> Result<String>;

    /// Signed DELETE returning the raw response body
    async fn signed_delete(&self, url: &str, token: &str, secret: &str) -> Result<String>;
}

/// Credentials a [`crate::RequestDescriptor`] carries for signed dispatch:
/// the access token pair plus a handle to the session's signer.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub provider: Arc<dyn OAuthProvider>,
}

// Implement Debug manually to avoid exposing the token secret
impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Default [`OAuthProvider`]: HMAC-SHA1 signing over the crate's HTTP client,
/// bound to the service's fixed request-token and access-token endpoints.
pub struct OAuthClient {
    client: Client,
    consumer_key: String,
    consumer_secret: String,
    request_token_url: String,
    access_token_url: String,
    callback_url: Option<String>,
}

impl OAuthClient {
    pub fn new(config: &Config, key: &str, secret: &str, callback_url: Option<&str>) -> Self {
        let base = config.base_url();
        OAuthClient {
            client: create_http_client(),
            consumer_key: key.to_string(),
            consumer_secret: secret.to_string(),
            request_token_url: format!("{}/oauth/request_token", base),
            access_token_url: format!("{}/oauth/access_token", base),
            callback_url: callback_url.map(str::to_string),
        }
    }

    async fn signed(
        &self,
        method: Method,
        url: &str,
        token: &str,
        secret: &str,
    ) -> Result<String> {
        let url = Url::parse(url)?;
        let auth = authorization_header(
            method.as_str(),
            &url,
            &[],
            &self.consumer_key,
            &self.consumer_secret,
            Some((token, secret)),
        )?;

        tracing::debug!(method = %method, url = %url, "dispatching signed request");
        let response = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
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

    async fn token_exchange(
        &self,
        url: &str,
        extra: &[(String, String)],
        token: Option<(&str, &str)>,
        function: &'static str,
    ) -> Result<TokenPair> {
        let url = Url::parse(url)?;
        let auth = authorization_header(
            "POST",
            &url,
            extra,
            &self.consumer_key,
            &self.consumer_secret,
            token,
        )?;

        tracing::debug!(url = %url, "dispatching token exchange");
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GoodreadsError::OAuth {
                function,
                message: body,
            });
        }
        parse_token_response(&body, function)
    }
}

#[async_trait]
impl OAuthProvider for OAuthClient {
    async fn request_token(&self) -> Result<TokenPair> {
        let callback = self
            .callback_url
            .clone()
            .unwrap_or_else(|| "oob".to_string());
        let extra = [("oauth_callback".to_string(), callback)];
        self.token_exchange(&self.request_token_url, &extra, None, "request_token")
            .await
    }

    async fn access_token(&self, request: &TokenPair) -> Result<TokenPair> {
        let extra = [("oauth_verifier".to_string(), "1".to_string())];
        self.token_exchange(
            &self.access_token_url,
            &extra,
            Some((&request.token, &request.secret)),
            "access_token",
        )
        .await
    }

    async fn signed_get(&self, url: &str, token: &str, secret: &str) -> Result<String> {
        self.signed(Method::GET, url, token, secret).await
    }

    async fn signed_post(&self, url: &str, token: &str, secret: &str) -> Result<String> {
        self.signed(Method::POST, url, token, secret).await
    }

    async fn signed_delete(&self, url: &str, token: &str, secret: &str) -> Result<String> {
        self.signed(Method::DELETE, url, token, secret).await
    }
}

// Implement Debug manually to avoid exposing the consumer secret
impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("request_token_url", &self.request_token_url)
            .field("access_token_url", &self.access_token_url)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// OAuth 1.0a three-legged handshake state for one client instance.
///
/// Lifecycle: `Unconfigured` until [`OAuthSession::init_with`], then the
/// request token is stored by [`OAuthSession::get_request_token`] (ephemeral,
/// overwritten by each new handshake attempt) and the access token by
/// [`OAuthSession::get_access_token`] (kept for the session's lifetime).
/// Handshake steps take `&mut self`; callers serialize them per instance.
pub struct OAuthSession {
    base_url: String,
    callback_url: Option<String>,
    provider: Option<Arc<dyn OAuthProvider>>,
    request_token: Option<TokenPair>,
    access_token: Option<TokenPair>,
}

impl OAuthSession {
    pub fn new(base_url: impl Into<String>) -> Self {
        OAuthSession {
            base_url: base_url.into(),
            callback_url: None,
            provider: None,
            request_token: None,
            access_token: None,
        }
    }

    /// Bind a signer to the session. Emits a warning when no callback URL is
    /// supplied: the handshake still proceeds but the authorization step
    /// cannot redirect back to the caller.
    pub fn init_with(&mut self, provider: Arc<dyn OAuthProvider>, callback_url: Option<&str>) {
        if callback_url.is_none() {
            tracing::warn!("init_oauth(): you have passed no callback URL");
        }
        self.callback_url = callback_url.map(str::to_string);
        self.provider = Some(provider);
    }

    /// Whether the access-token exchange has completed
    pub fn authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Run step 1 of the handshake and return the user-facing authorization URL
    pub async fn get_request_token(&mut self) -> Result<String> {
        let provider = self.provider.as_ref().ok_or(GoodreadsError::NoOAuth {
            function: "get_request_token",
        })?;

        let token = provider
            .request_token()
            .await
            .map_err(|e| GoodreadsError::OAuth {
                function: "get_request_token",
                message: e.to_string(),
            })?;

        let url = format!(
            "{}/oauth/authorize?oauth_token={}&oauth_callback={}",
            self.base_url,
            token.token,
            self.callback_url.as_deref().unwrap_or("")
        );
        self.request_token = Some(token);
        Ok(url)
    }

    /// Run step 2 of the handshake; afterwards the session is authenticated.
    /// Provider failures keep only the first line of the raw error payload.
    pub async fn get_access_token(&mut self) -> Result<()> {
        let request = self
            .request_token
            .clone()
            .ok_or(GoodreadsError::NoRequestToken)?;
        let provider = self
            .provider
            .as_ref()
            .ok_or(GoodreadsError::NoRequestToken)?;

        let token = provider
            .access_token(&request)
            .await
            .map_err(|e| GoodreadsError::OAuth {
                function: "get_access_token",
                message: first_line(&e.to_string()),
            })?;

        self.access_token = Some(token);
        Ok(())
    }

    /// Credentials for a signed request; `None` until authenticated
    pub fn auth_options(&self) -> Option<OAuthCredentials> {
        let provider = self.provider.clone()?;
        let access = self.access_token.as_ref()?;
        Some(OAuthCredentials {
            access_token: Some(access.token.clone()),
            access_token_secret: Some(access.secret.clone()),
            provider,
        })
    }
}

impl std::fmt::Debug for OAuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSession")
            .field("base_url", &self.base_url)
            .field("callback_url", &self.callback_url)
            .field("configured", &self.provider.is_some())
            .field("request_token", &self.request_token.is_some())
            .field("authenticated", &self.authenticated())
            .finish()
    }
}

fn oauth_encode(s: &str) -> String {
    utf8_percent_encode(s, UNRESERVED).to_string()
}

fn nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_string()
}

/// Build the OAuth 1.0a signature base string: method, base URL and the
/// sorted, percent-encoded parameter string joined with `&`
fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        oauth_encode(base_url.as_str()),
        oauth_encode(&normalized)
    )
}

fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        oauth_encode(consumer_secret),
        oauth_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|_| GoodreadsError::Other("invalid HMAC key".to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Assemble the `Authorization: OAuth ...` header for one request.
/// `extra` carries step-specific protocol parameters such as
/// `oauth_callback` or `oauth_verifier`; query parameters already present on
/// the URL are included in the signature but stay on the URL.
fn authorization_header(
    method: &str,
    url: &Url,
    extra: &[(String, String)],
    consumer_key: &str,
    consumer_secret: &str,
    token: Option<(&str, &str)>,
) -> Result<String> {
    let mut oauth_params: Vec<(String, String)> = vec![
        (
            "oauth_consumer_key".to_string(),
            consumer_key.to_string(),
        ),
        ("oauth_nonce".to_string(), nonce()),
        (
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        ),
        ("oauth_timestamp".to_string(), timestamp().to_string()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ];
    if let Some((token, _)) = token {
        oauth_params.push(("oauth_token".to_string(), token.to_string()));
    }
    oauth_params.extend(extra.iter().cloned());

    let mut all = oauth_params.clone();
    for (key, value) in url.query_pairs() {
        all.push((key.into_owned(), value.into_owned()));
    }

    let base = signature_base_string(method, url, &all);
    let token_secret = token.map(|(_, secret)| secret).unwrap_or("");
    let signature = sign(&base, consumer_secret, token_secret)?;
    oauth_params.push(("oauth_signature".to_string(), signature));

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, oauth_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {}", fields))
}

fn parse_token_response(body: &str, function: &'static str) -> Result<TokenPair> {
    let mut token = None;
    let mut secret = None;
    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }
    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair { token, secret }),
        _ => Err(GoodreadsError::OAuth {
            function,
            message: format!("malformed token response: {}", body),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_encode_unreserved() {
        assert_eq!(oauth_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(oauth_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(oauth_encode("http://x/y"), "http%3A%2F%2Fx%2Fy");
    }

    #[test]
    fn test_signature_base_string_sorts_and_strips_query() {
        let url = Url::parse("https://goodreads.com/shelf/list.xml?b=2&a=1").unwrap();
        let params = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        let base = signature_base_string("get", &url, &params);
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fgoodreads.com%2Fshelf%2Flist.xml&a%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_sign_produces_base64_hmac_sha1() {
        // HMAC-SHA1 digests are 20 bytes, so the base64 form is 28 chars
        let signature = sign("base", "consumer", "token").unwrap();
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn test_authorization_header_fields() {
        let url = Url::parse("https://goodreads.com/author_followings?id=1").unwrap();
        let header =
            authorization_header("POST", &url, &[], "key", "secret", Some(("tok", "toksec")))
                .unwrap();
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"key\""));
        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.contains("oauth_signature=\""));
        assert!(header.contains("oauth_nonce=\""));
        // URL query parameters are signed but never move into the header
        assert!(!header.contains("id=\"1\""));
    }

    #[test]
    fn test_parse_token_response() {
        let pair = parse_token_response(
            "oauth_token=abc&oauth_token_secret=def&extra=1",
            "request_token",
        )
        .unwrap();
        assert_eq!(pair, TokenPair::new("abc", "def"));
    }

    #[test]
    fn test_parse_token_response_malformed() {
        let result = parse_token_response("oauth_token=abc", "request_token");
        assert!(result.is_err());
    }

    #[test]
    fn test_first_line_truncation() {
        assert_eq!(first_line("top line\nstack trace\nmore"), "top line");
        assert_eq!(first_line("single"), "single");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_session_starts_unconfigured() {
        let session = OAuthSession::new("https://goodreads.com");
        assert!(!session.authenticated());
        assert!(session.auth_options().is_none());
    }

    #[tokio::test]
    async fn test_request_token_requires_init() {
        let mut session = OAuthSession::new("https://goodreads.com");
        let error = session.get_request_token().await.unwrap_err();
        assert!(matches!(error, GoodreadsError::NoOAuth { .. }));
    }

    #[tokio::test]
    async fn test_access_token_requires_request_token() {
        let mut session = OAuthSession::new("https://goodreads.com");
        let error = session.get_access_token().await.unwrap_err();
        assert!(matches!(error, GoodreadsError::NoRequestToken));
    }
}
