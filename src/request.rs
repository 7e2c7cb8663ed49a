use std::collections::HashMap;

use crate::oauth::OAuthCredentials;

/// Params is a convenience type for query parameters passed with API requests.
pub type Params = HashMap<String, String>;

/// Immutable description of one outbound API call: path, query parameters,
/// port, optional OAuth credentials and optional response-unwrap key.
/// Built once per call via [`RequestDescriptor::builder`] and discarded after
/// dispatch.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    path: String,
    port: u16,
    query_params: Params,
    response_key: String,
    credentials: Option<OAuthCredentials>,
}

impl RequestDescriptor {
    /// Start building a new request descriptor
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Absolute URL of the remote endpoint, without the query string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Port the request targets (defaults to 80)
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Query parameters to serialize onto the URL
    pub fn query_params(&self) -> &Params {
        &self.query_params
    }

    /// Top-level key to unwrap from the parsed response (empty when unset)
    pub fn response_key(&self) -> &str {
        &self.response_key
    }

    /// OAuth credentials attached via [`RequestBuilder::with_oauth`]
    pub fn oauth(&self) -> Option<&OAuthCredentials> {
        self.credentials.as_ref()
    }

    /// Access token and secret, present only when both were supplied
    pub fn access_token(&self) -> Option<(&str, &str)> {
        let credentials = self.credentials.as_ref()?;
        match (
            credentials.access_token.as_deref(),
            credentials.access_token_secret.as_deref(),
        ) {
            (Some(token), Some(secret)) => Some((token, secret)),
            _ => None,
        }
    }
}

/// Fluent builder for [`RequestDescriptor`]
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    path: Option<String>,
    port: Option<u16>,
    query_params: Option<Params>,
    response_key: Option<String>,
    credentials: Option<OAuthCredentials>,
}

impl RequestBuilder {
    /// Set the absolute URL of the remote endpoint
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the target port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the query parameters
    pub fn with_query_params(mut self, query_params: Params) -> Self {
        self.query_params = Some(query_params);
        self
    }

    /// Attach OAuth credentials for the signed transport operations
    pub fn with_oauth(mut self, credentials: OAuthCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Name a top-level response key to unwrap from the parsed payload
    pub fn with_response_key(mut self, response_key: impl Into<String>) -> Self {
        self.response_key = Some(response_key.into());
        self
    }

    /// Finalize the descriptor. The path is not validated and may be empty.
    pub fn build(self) -> RequestDescriptor {
        RequestDescriptor {
            path: self.path.unwrap_or_default(),
            port: self.port.unwrap_or(80),
            query_params: self.query_params.unwrap_or_default(),
            response_key: self.response_key.unwrap_or_default(),
            credentials: self.credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let req = RequestDescriptor::builder().build();
        assert_eq!(req.path(), "");
        assert_eq!(req.port(), 80);
        assert!(req.query_params().is_empty());
        assert_eq!(req.response_key(), "");
        assert!(req.oauth().is_none());
        assert!(req.access_token().is_none());
    }

    #[test]
    fn test_query_params_round_trip() {
        let mut params = Params::new();
        params.insert("a".to_string(), "1".to_string());
        params.insert("b".to_string(), "x".to_string());

        // Unrelated setters must not touch the query parameters
        let req = RequestDescriptor::builder()
            .with_path("https://goodreads.com/author/show/1")
            .with_port(443)
            .with_query_params(params.clone())
            .build();

        assert_eq!(req.query_params(), &params);
        assert_eq!(req.query_params().len(), 2);
        assert_eq!(req.query_params().get("a").map(String::as_str), Some("1"));
        assert_eq!(req.query_params().get("b").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_builder_setters() {
        let req = RequestDescriptor::builder()
            .with_path("https://goodreads.com/shelf/list.xml")
            .with_port(8080)
            .with_response_key("shelves")
            .build();

        assert_eq!(req.path(), "https://goodreads.com/shelf/list.xml");
        assert_eq!(req.port(), 8080);
        assert_eq!(req.response_key(), "shelves");
    }
}
