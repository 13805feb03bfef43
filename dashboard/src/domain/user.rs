//! User records managed from the dashboard.
//!
//! Records mirror the remote directory's wire shape (`snake_case`), so the
//! same types serialise into durable session storage and request bodies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric user identifier assigned by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User record as listed by the directory.
///
/// # Examples
/// ```
/// use dashboard::domain::{NewUser, User, UserId};
///
/// let user = User::from_new(UserId::new(7), NewUser::new("ada@example.com", "Ada", "Lovelace"));
/// assert_eq!(user.display_name(), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory identifier.
    pub id: UserId,
    /// Contact address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar URL, when the directory provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Attach an identifier to a new record.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            email,
            first_name,
            last_name,
        } = new_user;
        Self {
            id,
            email,
            first_name,
            last_name,
            avatar: None,
        }
    }

    /// Record with the given id and blank fields; base for merging partial
    /// update responses.
    pub fn blank(id: UserId) -> Self {
        Self {
            id,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: None,
        }
    }

    /// `"first last"`, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Overwrite every field present in `patch`.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name.clone_from(last_name);
        }
    }
}

/// User record without an identifier, as submitted by the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Contact address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl NewUser {
    /// Build a record from its parts.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// New contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

impl From<NewUser> for UserPatch {
    fn from(value: NewUser) -> Self {
        Self {
            email: Some(value.email),
            first_name: Some(value.first_name),
            last_name: Some(value.last_name),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_directory_record_with_avatar() {
        let user: User = serde_json::from_value(json!({
            "id": 2,
            "email": "janet.weaver@reqres.in",
            "first_name": "Janet",
            "last_name": "Weaver",
            "avatar": "https://reqres.in/img/faces/2-image.jpg"
        }))
        .expect("decode user");
        assert_eq!(user.id, UserId::new(2));
        assert_eq!(user.display_name(), "Janet Weaver");
        assert!(user.avatar.is_some());
    }

    #[rstest]
    fn patch_overwrites_only_present_fields() {
        let mut user = User::from_new(UserId::new(1), NewUser::new("a@b.com", "Ada", "Lovelace"));
        let patch = UserPatch {
            last_name: Some("Byron".to_owned()),
            ..UserPatch::default()
        };
        user.apply(&patch);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Byron");
        assert_eq!(user.email, "a@b.com");
    }

    #[rstest]
    fn empty_patch_serialises_to_empty_object() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).expect("serialise"), json!({}));
    }

    #[rstest]
    fn blank_record_keeps_id() {
        let user = User::blank(UserId::new(9));
        assert_eq!(user.id.get(), 9);
        assert_eq!(user.display_name(), "");
    }
}
