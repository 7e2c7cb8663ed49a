use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use goodreads_api::{
    Config, Credentials, Goodreads, GoodreadsError, OAuthProvider, RequestDescriptor, Result,
    TokenPair, Transport,
};

/// Transport double returning a canned body and recording every dispatch
struct MockTransport {
    body: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    fn new(body: &str) -> Arc<Self> {
        Arc::new(MockTransport {
            body: body.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, verb: &str, req: &RequestDescriptor) {
        let mut query: Vec<String> = req
            .query_params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        query.sort();
        self.calls
            .lock()
            .unwrap()
            .push((verb.to_string(), format!("{}?{}", req.path(), query.join("&"))));
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, req: &RequestDescriptor) -> Result<String> {
        self.record("GET", req);
        Ok(self.body.clone())
    }

    async fn oauth_get(&self, req: &RequestDescriptor) -> Result<String> {
        self.record("OAUTH-GET", req);
        Ok(self.body.clone())
    }

    async fn oauth_post(&self, req: &RequestDescriptor) -> Result<String> {
        self.record("OAUTH-POST", req);
        Ok(self.body.clone())
    }

    async fn oauth_delete(&self, req: &RequestDescriptor) -> Result<String> {
        self.record("OAUTH-DELETE", req);
        Ok(self.body.clone())
    }
}

/// Provider double that completes the handshake with fixed tokens
struct MockProvider;

#[async_trait]
impl OAuthProvider for MockProvider {
    async fn request_token(&self) -> Result<TokenPair> {
        Ok(TokenPair::new("reqtoken", "reqsecret"))
    }

    async fn access_token(&self, _request: &TokenPair) -> Result<TokenPair> {
        Ok(TokenPair::new("acctoken", "accsecret"))
    }

    async fn signed_get(&self, _url: &str, _token: &str, _secret: &str) -> Result<String> {
        Ok("<GoodreadsResponse></GoodreadsResponse>".to_string())
    }

    async fn signed_post(&self, _url: &str, _token: &str, _secret: &str) -> Result<String> {
        Ok("<GoodreadsResponse></GoodreadsResponse>".to_string())
    }

    async fn signed_delete(&self, _url: &str, _token: &str, _secret: &str) -> Result<String> {
        Ok("<GoodreadsResponse></GoodreadsResponse>".to_string())
    }
}

fn client_with(transport: Arc<MockTransport>) -> Goodreads {
    Goodreads::with_transport(
        Credentials::new("API_KEY", "API_SECRET"),
        Config::default(),
        transport,
    )
    .expect("client construction")
}

async fn authenticated_client(transport: Arc<MockTransport>) -> Goodreads {
    let mut client = client_with(transport);
    client.init_oauth_with(Arc::new(MockProvider), Some("https://example.com/cb"));
    client.get_request_token().await.expect("request token");
    client.get_access_token().await.expect("access token");
    client
}

const AUTHOR_XML: &str =
    "<GoodreadsResponse><author><id>175417</id><name>X</name></author></GoodreadsResponse>";

#[tokio::test]
async fn author_info_resolves_to_unwrapped_object() {
    let transport = MockTransport::new(AUTHOR_XML);
    let client = client_with(transport.clone());

    let author = client.get_author_info("175417").await.unwrap();
    assert_eq!(author, json!({"id": "175417", "name": "X"}));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "GET");
    assert_eq!(
        calls[0].1,
        "https://goodreads.com/author/show/175417?format=xml&key=API_KEY"
    );
}

#[tokio::test]
async fn shelves_endpoint_unwraps_response_key() {
    let transport = MockTransport::new(
        "<GoodreadsResponse><shelves><user_shelf>to-read</user_shelf></shelves></GoodreadsResponse>",
    );
    let client = client_with(transport);

    let shelves = client.get_users_shelves("12345").await.unwrap();
    assert_eq!(shelves, json!({"user_shelf": "to-read"}));
}

#[tokio::test]
async fn missing_parameter_names_function_and_parameter() {
    let transport = MockTransport::new(AUTHOR_XML);
    let client = client_with(transport.clone());

    let error = client.get_author_info("").await.unwrap_err();
    let message = error.to_string();
    assert!(message.contains("get_author_info"), "{}", message);
    assert!(message.contains("author_id"), "{}", message);

    // Validation fails before any network dispatch
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn missing_parameters_checked_across_endpoints() {
    let transport = MockTransport::new(AUTHOR_XML);
    let client = client_with(transport);

    assert!(client
        .get_books_by_author("", None)
        .await
        .unwrap_err()
        .is_missing_parameter());
    assert!(client
        .get_users_shelves("")
        .await
        .unwrap_err()
        .is_missing_parameter());
    assert!(client
        .search_groups("", None)
        .await
        .unwrap_err()
        .is_missing_parameter());
    assert!(client
        .get_users_review_for_book("1", "")
        .await
        .unwrap_err()
        .is_missing_parameter());
}

#[tokio::test]
async fn authenticated_endpoints_reject_before_handshake() {
    // The mock would happily return a valid payload; the check must fire first
    let transport = MockTransport::new(AUTHOR_XML);
    let client = client_with(transport.clone());

    assert!(client
        .follow_author("175417")
        .await
        .unwrap_err()
        .is_not_authenticated());
    assert!(client
        .add_book_to_shelf("50", "to-read")
        .await
        .unwrap_err()
        .is_not_authenticated());
    assert!(client
        .delete_review("99")
        .await
        .unwrap_err()
        .is_not_authenticated());
    assert!(client
        .get_notifications(None)
        .await
        .unwrap_err()
        .is_not_authenticated());

    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn authenticated_endpoint_succeeds_after_handshake() {
    let transport = MockTransport::new(
        "<GoodreadsResponse><author_following id=\"7\"/></GoodreadsResponse>",
    );
    let client = authenticated_client(transport.clone()).await;

    let result = client.follow_author("175417").await.unwrap();
    assert_eq!(result, json!({"author_following": {"id": "7"}}));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "OAUTH-POST");
    assert_eq!(
        calls[0].1,
        "https://goodreads.com/author_followings?format=xml&id=175417"
    );
}

#[tokio::test]
async fn delete_verb_returns_payload_uniformly() {
    let transport =
        MockTransport::new("<GoodreadsResponse><status>removed</status></GoodreadsResponse>");
    let client = authenticated_client(transport.clone()).await;

    let result = client.delete_review("99").await.unwrap();
    assert_eq!(result, json!({"status": "removed"}));
    assert_eq!(transport.calls()[0].0, "OAUTH-DELETE");
}

#[tokio::test]
async fn read_endpoint_is_idempotent_against_unchanged_backend() {
    let transport = MockTransport::new(
        "<GoodreadsResponse><review><id>9</id><rating>5</rating></review></GoodreadsResponse>",
    );
    let client = client_with(transport);

    let first = client.get_review("9", None).await.unwrap();
    let second = client.get_review("9", None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn api_error_payload_is_surfaced() {
    let transport = MockTransport::new("<error>book not found</error>");
    let client = client_with(transport);

    let error = client.get_review("9", None).await.unwrap_err();
    match error {
        GoodreadsError::Api { message, .. } => assert_eq!(message, "book not found"),
        other => panic!("expected GoodreadsError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn api_error_payload_is_surfaced_on_signed_verbs_too() {
    let transport = MockTransport::new("<error>not allowed</error>");
    let client = authenticated_client(transport).await;

    let error = client.join_group("1").await.unwrap_err();
    assert!(matches!(error, GoodreadsError::Api { .. }));
}

#[tokio::test]
async fn malformed_xml_is_a_parse_error() {
    let transport = MockTransport::new("<html>service is down");
    let client = client_with(transport);

    let error = client.get_recent_reviews().await.unwrap_err();
    assert!(matches!(error, GoodreadsError::Xml(_)));
}

#[tokio::test]
async fn optional_page_parameter_is_forwarded() {
    let transport = MockTransport::new("<GoodreadsResponse><books/></GoodreadsResponse>");
    let client = client_with(transport.clone());

    client.get_books_by_author("175417", Some(3)).await.unwrap();
    assert_eq!(
        transport.calls()[0].1,
        "https://goodreads.com/author/list/175417?format=xml&key=API_KEY&page=3"
    );
}
