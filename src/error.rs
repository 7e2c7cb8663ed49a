use serde_json::Value;
use thiserror::Error;

/// Main error type for Goodreads API operations
#[derive(Debug, Error)]
pub enum GoodreadsError {
    /// Client was constructed without an API key or secret
    #[error("Goodreads(): please pass your API key and secret")]
    MissingCredentials,

    /// A required endpoint argument was not supplied
    #[error("{function}(): you have not passed {parameter}")]
    MissingParameter {
        function: &'static str,
        parameter: &'static str,
    },

    /// OAuth was never initialized for this client
    #[error("{function}(): you need an OAuth connection for this request")]
    NoOAuth { function: &'static str },

    /// The access-token exchange was attempted without a request token
    #[error("no request token found, call get_request_token() first")]
    NoRequestToken,

    /// An authenticated endpoint was called before the handshake completed
    #[error("not authenticated, call get_access_token() first")]
    NotAuthenticated,

    /// Failure during the request-token or access-token exchange
    #[error("{function}(): OAuth provider error: {message}")]
    OAuth {
        function: &'static str,
        message: String,
    },

    /// Error payload returned by the Goodreads API itself
    #[error("API returned the following error: {message}")]
    Api { message: String, payload: Value },

    /// Non-success HTTP status with the raw response body
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Malformed XML in a response body
    #[error("error parsing XML response: {0}")]
    Xml(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for GoodreadsError {
    fn from(e: quick_xml::Error) -> Self {
        GoodreadsError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for GoodreadsError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        GoodreadsError::Xml(e.to_string())
    }
}

impl GoodreadsError {
    /// Create a missing-parameter error naming the endpoint method and argument
    pub fn missing_parameter(function: &'static str, parameter: &'static str) -> Self {
        GoodreadsError::MissingParameter {
            function,
            parameter,
        }
    }

    /// Create an API error from a normalized `<error>` payload
    pub fn api(payload: Value) -> Self {
        let message = match payload.as_str() {
            Some(s) => s.to_string(),
            None => payload.to_string(),
        };
        GoodreadsError::Api { message, payload }
    }

    /// Check if this error is a missing-parameter error
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, GoodreadsError::MissingParameter { .. })
    }

    /// Check if this error is a not-authenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, GoodreadsError::NotAuthenticated)
    }

    /// Get the HTTP status code if this is a transport-level HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GoodreadsError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Goodreads API operations
pub type Result<T> = std::result::Result<T, GoodreadsError>;
