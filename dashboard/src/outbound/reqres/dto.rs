//! DTOs for decoding reqres-style JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records in one pass.

use pagination::Page;
use serde::Deserialize;

use crate::domain::{User, UserId};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) email: String,
    #[serde(default)]
    pub(super) first_name: String,
    #[serde(default)]
    pub(super) last_name: String,
    #[serde(default)]
    pub(super) avatar: Option<String>,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: UserId::new(value.id),
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            avatar: value.avatar,
        }
    }
}

/// `GET /users/{id}` envelope.
#[derive(Debug, Deserialize)]
pub(super) struct SingleUserDto {
    pub(super) data: UserDto,
}

/// `GET /users` envelope.
pub(super) type UserPageDto = Page<UserDto>;

/// Identifier echoed by `POST /users`; reqres returns it as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CreatedIdDto {
    Number(u64),
    Text(String),
}

impl CreatedIdDto {
    fn into_user_id(self) -> Option<UserId> {
        match self {
            Self::Number(raw) => Some(UserId::new(raw)),
            Self::Text(raw) => raw.trim().parse().ok().map(UserId::new),
        }
    }
}

/// `POST /users` response.
#[derive(Debug, Default, Deserialize)]
pub(super) struct CreatedDto {
    #[serde(default)]
    pub(super) id: Option<CreatedIdDto>,
}

impl CreatedDto {
    pub(super) fn into_user_id(self) -> Option<UserId> {
        self.id.and_then(CreatedIdDto::into_user_id)
    }
}

/// `PUT /users/{id}` response: whichever fields the directory echoes back.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UpdatedDto {
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) first_name: Option<String>,
    #[serde(default)]
    pub(super) last_name: Option<String>,
    #[serde(default)]
    pub(super) avatar: Option<String>,
}

impl UpdatedDto {
    /// Merge over a blank record with `id`.
    pub(super) fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            avatar: self.avatar,
        }
    }
}
