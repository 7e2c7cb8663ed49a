use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::client::Config;
use crate::error::{GoodreadsError, Result};
use crate::oauth::{OAuthClient, OAuthCredentials, OAuthProvider, OAuthSession};
use crate::request::{Params, RequestDescriptor};
use crate::transport::{execute, HttpTransport, Transport, Verb};

/// API key and secret issued by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Goodreads API client.
///
/// Read-only endpoints work with just the API key; endpoints marked as
/// requiring authentication need the OAuth 1.0a handshake to have completed
/// first ([`Goodreads::init_oauth`], [`Goodreads::get_request_token`],
/// user authorization, [`Goodreads::get_access_token`]).
pub struct Goodreads {
    config: Config,
    key: String,
    secret: String,
    session: OAuthSession,
    transport: Arc<dyn Transport>,
}

impl Goodreads {
    /// Create a client with the default configuration.
    /// Fails when the key or secret is empty.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, Config::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(credentials: Credentials, config: Config) -> Result<Self> {
        Self::with_transport(credentials, config, Arc::new(HttpTransport::new()))
    }

    /// Create a client and initialize OAuth with the given callback URL
    pub fn with_callback(credentials: Credentials, callback_url: &str) -> Result<Self> {
        let mut client = Self::new(credentials)?;
        client.init_oauth(Some(callback_url));
        Ok(client)
    }

    /// Create a client with a custom [`Transport`] implementation
    pub fn with_transport(
        credentials: Credentials,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if credentials.key.is_empty() || credentials.secret.is_empty() {
            return Err(GoodreadsError::MissingCredentials);
        }
        let session = OAuthSession::new(config.base_url());
        Ok(Goodreads {
            config,
            key: credentials.key,
            secret: credentials.secret,
            session,
            transport,
        })
    }

    /// Initialize the OAuth session with the default HMAC-SHA1 signer
    pub fn init_oauth(&mut self, callback_url: Option<&str>) {
        let provider = Arc::new(OAuthClient::new(
            &self.config,
            &self.key,
            &self.secret,
            callback_url,
        ));
        self.session.init_with(provider, callback_url);
    }

    /// Initialize the OAuth session with a custom [`OAuthProvider`]
    pub fn init_oauth_with(
        &mut self,
        provider: Arc<dyn OAuthProvider>,
        callback_url: Option<&str>,
    ) {
        self.session.init_with(provider, callback_url);
    }

    /// Run step 1 of the handshake and return the authorization URL the user
    /// must visit
    pub async fn get_request_token(&mut self) -> Result<String> {
        self.session.get_request_token().await
    }

    /// Run step 2 of the handshake after the user granted access
    pub async fn get_access_token(&mut self) -> Result<()> {
        self.session.get_access_token().await
    }

    /// Whether the OAuth handshake has completed
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn auth_options(&self) -> Result<OAuthCredentials> {
        self.session
            .auth_options()
            .ok_or(GoodreadsError::NotAuthenticated)
    }

    // ----- authors -----

    /// Fetch info about an author
    pub async fn get_author_info(&self, author_id: &str) -> Result<Value> {
        required(author_id, "get_author_info", "author_id")?;

        let options = params([("key", &self.key), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/author/show/{}", author_id)))
            .with_query_params(options)
            .with_response_key("author")
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List books by the given author, optionally paginated
    pub async fn get_books_by_author(&self, author_id: &str, page: Option<u32>) -> Result<Value> {
        required(author_id, "get_books_by_author", "author_id")?;

        let mut options = params([("format", "xml"), ("key", &self.key)]);
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/author/list/{}", author_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List all series by the given author
    pub async fn get_all_series_by_author(&self, author_id: &str) -> Result<Value> {
        required(author_id, "get_all_series_by_author", "author_id")?;

        let options = params([("id", author_id), ("key", &self.key), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/series/list"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Look up an author by name
    pub async fn search_authors(&self, author_name: &str) -> Result<Value> {
        required(author_name, "search_authors", "author_name")?;

        let options = params([("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/api/author_url/{}", author_name)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Follow an author. Requires authentication.
    pub async fn follow_author(&self, author_id: &str) -> Result<Value> {
        required(author_id, "follow_author", "author_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", author_id), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/author_followings"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// Unfollow an author. Requires authentication.
    pub async fn unfollow_author(&self, author_id: &str) -> Result<Value> {
        required(author_id, "unfollow_author", "author_id")?;
        let auth = self.auth_options()?;

        let options = params([("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/author_followings/{}", author_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthDelete, req).await
    }

    /// Show an author-following relationship. Requires authentication.
    pub async fn show_following(&self, following_id: &str) -> Result<Value> {
        required(following_id, "show_following", "author_following_id")?;
        let auth = self.auth_options()?;

        let options = params([("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/author_followings/{}", following_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    // ----- users & social graph -----

    /// Fetch info about a user
    pub async fn get_user_info(&self, user_id: &str) -> Result<Value> {
        required(user_id, "get_user_info", "user_id")?;

        let options = params([("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/user/show/{}.xml", user_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List who a user follows. Requires authentication.
    pub async fn get_user_followings(&self, user_id: &str) -> Result<Value> {
        required(user_id, "get_user_followings", "user_id")?;
        let auth = self.auth_options()?;

        let options = params([("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/user/{}/following.xml", user_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// Follow a user. Requires authentication.
    pub async fn follow_user(&self, user_id: &str) -> Result<Value> {
        required(user_id, "follow_user", "user_id")?;
        let auth = self.auth_options()?;

        let options = params([("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/user/{}/followers", user_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// List pending friend requests. Requires authentication.
    pub async fn get_friend_requests(&self, page: Option<u32>) -> Result<Value> {
        let auth = self.auth_options()?;

        let mut options = Params::new();
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/friend/requests.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// Answer a friend recommendation with `"y"` or `"n"`.
    /// Requires authentication.
    pub async fn answer_friend_recommendation(
        &self,
        recommendation_id: &str,
        response: &str,
    ) -> Result<Value> {
        required(
            recommendation_id,
            "answer_friend_recommendation",
            "recommendation_id",
        )?;
        required(response, "answer_friend_recommendation", "response")?;
        let auth = self.auth_options()?;

        let options = params([("id", recommendation_id), ("response", response)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/friend/confirm_recommendation.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// Answer a friend request with `"y"` or `"n"`. Requires authentication.
    pub async fn answer_friend_request(&self, request_id: &str, response: &str) -> Result<Value> {
        required(request_id, "answer_friend_request", "request_id")?;
        required(response, "answer_friend_request", "response")?;
        let auth = self.auth_options()?;

        let options = params([("id", request_id), ("response", response)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/friend/confirm_request.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// Send a friend request to a user. Requires authentication.
    pub async fn add_friend(&self, user_id: &str) -> Result<Value> {
        required(user_id, "add_friend", "user_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", user_id)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/friend/add_as_friend.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// List the authenticated user's notifications. Requires authentication.
    pub async fn get_notifications(&self, page: Option<u32>) -> Result<Value> {
        let auth = self.auth_options()?;

        let mut options = Params::new();
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/notifications.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    // ----- shelves & owned books -----

    /// List a user's shelves
    pub async fn get_users_shelves(&self, user_id: &str) -> Result<Value> {
        required(user_id, "get_users_shelves", "user_id")?;

        let options = params([("user_id", user_id), ("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/shelf/list.xml"))
            .with_query_params(options)
            .with_response_key("shelves")
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Add a book to one of the authenticated user's shelves.
    /// Requires authentication.
    pub async fn add_book_to_shelf(&self, book_id: &str, shelf: &str) -> Result<Value> {
        required(book_id, "add_book_to_shelf", "book_id")?;
        required(shelf, "add_book_to_shelf", "shelf_name")?;
        let auth = self.auth_options()?;

        let options = params([("book_id", book_id), ("name", shelf)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/shelf/add_to_shelf.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// Add several books to several shelves in one call.
    /// Requires authentication.
    pub async fn add_books_to_shelves(
        &self,
        book_ids: &[&str],
        shelves: &[&str],
    ) -> Result<Value> {
        if book_ids.is_empty() {
            return Err(GoodreadsError::missing_parameter(
                "add_books_to_shelves",
                "book_ids",
            ));
        }
        if shelves.is_empty() {
            return Err(GoodreadsError::missing_parameter(
                "add_books_to_shelves",
                "shelves",
            ));
        }
        let auth = self.auth_options()?;

        let book_ids = book_ids.join(",");
        let shelves = shelves.join(",");
        let options = params([("bookids", book_ids.as_str()), ("shelves", shelves.as_str())]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/shelf/add_books_to_shelves.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// List books on one of a user's shelves. Requires authentication.
    pub async fn get_books_on_user_shelf(
        &self,
        user_id: &str,
        shelf: &str,
        query_options: Option<Params>,
    ) -> Result<Value> {
        required(user_id, "get_books_on_user_shelf", "user_id")?;
        required(shelf, "get_books_on_user_shelf", "shelf_name")?;
        let auth = self.auth_options()?;

        let mut options = params([
            ("id", user_id),
            ("shelf", shelf),
            ("key", &self.key),
            ("format", "xml"),
        ]);
        if let Some(extra) = query_options {
            options.extend(extra);
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/review/list"))
            .with_query_params(options)
            .with_response_key("reviews")
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// List books owned by a user. Requires authentication.
    pub async fn get_owned_books(&self, user_id: &str, page: Option<u32>) -> Result<Value> {
        required(user_id, "get_owned_books", "user_id")?;
        let auth = self.auth_options()?;

        let mut options = params([("format", "xml"), ("id", user_id)]);
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/owned_books/user"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// Delete an owned book. Requires authentication.
    pub async fn delete_owned_book(&self, book_id: &str) -> Result<Value> {
        required(book_id, "delete_owned_book", "book_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", book_id), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/owned_books/destroy/{}", book_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    // ----- groups -----

    /// Join a group. Requires authentication.
    pub async fn join_group(&self, group_id: &str) -> Result<Value> {
        required(group_id, "join_group", "group_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", group_id)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/group/join"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// List a user's groups
    pub async fn get_groups(&self, user_id: &str, sort: Option<&str>) -> Result<Value> {
        required(user_id, "get_groups", "user_id")?;

        let mut options = params([("key", &self.key)]);
        if let Some(sort) = sort {
            options.insert("sort".to_string(), sort.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/group/list/{}.xml", user_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List members of a group, with optional sort/page/query filters
    pub async fn get_group_members(
        &self,
        group_id: &str,
        query_options: Option<Params>,
    ) -> Result<Value> {
        required(group_id, "get_group_members", "group_id")?;

        let mut options = params([("key", &self.key)]);
        if let Some(extra) = query_options {
            options.extend(extra);
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/group/members/{}.xml", group_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Search groups matching a query
    pub async fn search_groups(&self, query: &str, page: Option<u32>) -> Result<Value> {
        required(query, "search_groups", "search_query")?;

        let mut options = params([("key", &self.key), ("q", query)]);
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/group/search.xml"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Fetch info about a group, with optional sort/order filters
    pub async fn get_group_info(
        &self,
        group_id: &str,
        query_options: Option<Params>,
    ) -> Result<Value> {
        required(group_id, "get_group_info", "group_id")?;

        let mut options = params([("key", &self.key)]);
        if let Some(extra) = query_options {
            options.extend(extra);
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/group/show/{}.xml", group_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    // ----- reviews, comments & ratings -----

    /// List recent reviews across the site
    pub async fn get_recent_reviews(&self) -> Result<Value> {
        let options = params([("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/review/recent_reviews.xml"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Fetch a review, optionally paging through its comments
    pub async fn get_review(&self, review_id: &str, page: Option<u32>) -> Result<Value> {
        required(review_id, "get_review", "review_id")?;

        let mut options = params([("id", review_id), ("key", &self.key)]);
        if let Some(page) = page {
            options.insert("page".to_string(), page.to_string());
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/review/show.xml"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Fetch a user's review for a book
    pub async fn get_users_review_for_book(&self, user_id: &str, book_id: &str) -> Result<Value> {
        required(user_id, "get_users_review_for_book", "user_id")?;
        required(book_id, "get_users_review_for_book", "book_id")?;

        let options = params([("user_id", user_id), ("book_id", book_id), ("key", &self.key)]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/review/show_by_user_and_book.xml"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Delete a review. Requires authentication.
    pub async fn delete_review(&self, review_id: &str) -> Result<Value> {
        required(review_id, "delete_review", "review_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", review_id), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/review/destroy"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthDelete, req).await
    }

    /// Create a comment on a resource. Requires authentication.
    pub async fn create_comment(
        &self,
        comment_type: &str,
        resource_id: &str,
        comment: &str,
    ) -> Result<Value> {
        required(comment_type, "create_comment", "comment_type")?;
        required(resource_id, "create_comment", "resource_id")?;
        required(comment, "create_comment", "comment")?;
        let auth = self.auth_options()?;

        let options = params([
            ("type", comment_type),
            ("id", resource_id),
            ("comment", comment),
        ]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/comment.xml"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    /// Remove the authenticated user's rating of a resource.
    /// Requires authentication.
    pub async fn unlike_resource(&self, resource_id: &str) -> Result<Value> {
        required(resource_id, "unlike_resource", "resource_id")?;
        let auth = self.auth_options()?;

        let options = params([("id", resource_id), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/rating"))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthPost, req).await
    }

    // ----- statuses, recommendations & events -----

    /// Fetch a read status
    pub async fn get_read_status(&self, status_id: &str) -> Result<Value> {
        required(status_id, "get_read_status", "status_id")?;

        let options = params([("key", &self.key), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/read_statuses/{}", status_id)))
            .with_query_params(options)
            .with_response_key("read_status")
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// Fetch a recommendation. Requires authentication.
    pub async fn get_recommendation(&self, recommendation_id: &str) -> Result<Value> {
        required(recommendation_id, "get_recommendation", "recommendation_id")?;
        let auth = self.auth_options()?;

        let options = params([("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/recommendations/{}", recommendation_id)))
            .with_query_params(options)
            .with_oauth(auth)
            .build();
        execute(self.transport.as_ref(), Verb::OAuthGet, req).await
    }

    /// Fetch a user status update
    pub async fn get_user_status(&self, status_id: &str) -> Result<Value> {
        required(status_id, "get_user_status", "status_id")?;

        let options = params([("key", &self.key), ("format", "xml")]);
        let req = RequestDescriptor::builder()
            .with_path(self.url(&format!("/user_status/show/{}", status_id)))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List recent status updates across the site
    pub async fn get_recent_statuses(&self) -> Result<Value> {
        let req = RequestDescriptor::builder()
            .with_path(self.url("/user_status/index.xml"))
            .with_response_key("updates")
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    /// List upcoming events, with optional location filters
    pub async fn get_events(&self, query_options: Option<Params>) -> Result<Value> {
        let mut options = params([("key", &self.key)]);
        if let Some(extra) = query_options {
            options.extend(extra);
        }
        let req = RequestDescriptor::builder()
            .with_path(self.url("/event/index.xml"))
            .with_query_params(options)
            .with_response_key("events")
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }

    // ----- search -----

    /// Search books. `query_options` takes `q` (query), `page` and `field`
    /// (`title`, `author` or `all`).
    pub async fn search_books(&self, query_options: Params) -> Result<Value> {
        let mut options = params([("key", &self.key)]);
        options.extend(query_options);
        let req = RequestDescriptor::builder()
            .with_path(self.url("/search/index.xml"))
            .with_query_params(options)
            .build();
        execute(self.transport.as_ref(), Verb::Get, req).await
    }
}

impl std::fmt::Debug for Goodreads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Goodreads")
            .field("config", &self.config)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("session", &self.session)
            .finish()
    }
}

fn required(value: &str, function: &'static str, parameter: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(GoodreadsError::missing_parameter(function, parameter));
    }
    Ok(())
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_requires_credentials() {
        let error = Goodreads::new(Credentials::new("", "")).unwrap_err();
        assert!(matches!(error, GoodreadsError::MissingCredentials));

        let error = Goodreads::new(Credentials::new("key", "")).unwrap_err();
        assert!(matches!(error, GoodreadsError::MissingCredentials));

        assert!(Goodreads::new(Credentials::new("key", "secret")).is_ok());
    }

    #[test]
    fn test_with_callback_initializes_oauth() {
        let client =
            Goodreads::with_callback(Credentials::new("key", "secret"), "https://example.com/cb")
                .unwrap();
        // OAuth is initialized but the handshake has not run yet
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_params_helper() {
        let options = params([("key", "abc"), ("format", "xml")]);
        assert_eq!(options.len(), 2);
        assert_eq!(options.get("format").map(String::as_str), Some("xml"));
    }
}
