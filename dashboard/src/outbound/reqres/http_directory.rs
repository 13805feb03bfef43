//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL construction, the API key
//! header, timeout and HTTP error mapping, and JSON decoding into domain
//! records.

use std::time::Duration;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{CreatedDto, SingleUserDto, UpdatedDto, UserPageDto};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};

const API_KEY_HEADER: &str = "x-api-key";
const USERS_SEGMENT: &str = "users";

/// Errors raised while constructing [`ReqresUserDirectory`].
#[derive(Debug, Error)]
pub enum ReqresClientError {
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("base URL {url} cannot be used for API requests")]
    InvalidBaseUrl {
        /// Offending URL.
        url: Url,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// User directory that speaks the reqres REST API.
///
/// Every request carries the `x-api-key` header and a JSON content type.
pub struct ReqresUserDirectory {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl ReqresUserDirectory {
    /// Build an adapter rooted at `base_url` (for example
    /// `https://reqres.in/api`) with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot hold a path or the reqwest
    /// client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReqresClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ReqresClientError::InvalidBaseUrl { url: base_url });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn user_endpoint(&self, id: UserId) -> Url {
        self.endpoint(&[USERS_SEGMENT, &id.to_string()])
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, UserDirectoryError> {
        let response = request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "user directory responded");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl UserDirectory for ReqresUserDirectory {
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserDirectoryError> {
        let mut url = self.endpoint(&[USERS_SEGMENT]);
        request.apply_to(&mut url);
        let body = self.execute(self.client.get(url)).await?;
        let page: UserPageDto = decode(&body, "user page")?;
        Ok(page.map(User::from))
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserDirectoryError> {
        let body = self.execute(self.client.get(self.user_endpoint(id))).await?;
        let single: SingleUserDto = decode(&body, "user")?;
        Ok(single.data.into())
    }

    async fn create_user(&self, user: &NewUser) -> Result<Option<UserId>, UserDirectoryError> {
        let request = self.client.post(self.endpoint(&[USERS_SEGMENT])).json(user);
        let body = self.execute(request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let created: CreatedDto = decode(&body, "created user")?;
        Ok(created.into_user_id())
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, UserDirectoryError> {
        let request = self.client.put(self.user_endpoint(id)).json(patch);
        let body = self.execute(request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(UpdatedDto::default().into_user(id));
        }
        let updated: UpdatedDto = decode(&body, "updated user")?;
        Ok(updated.into_user(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserDirectoryError> {
        self.execute(self.client.delete(self.user_endpoint(id)))
            .await
            .map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, UserDirectoryError> {
    serde_json::from_slice(body)
        .map_err(|error| UserDirectoryError::decode(format!("invalid {what} payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => UserDirectoryError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UserDirectoryError::timeout(message)
        }
        _ => UserDirectoryError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
