//! User records.

use crate::filter::FilterSpec;
use crate::record::{Fields, Record};
use crate::{FieldValue, RecordId, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            other => Err(RosterError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            other => Err(RosterError::Validation(format!("Unknown status: {other}"))),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Create-form payload for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Update-form payload for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

const USER_FIELDS: &[&str] = &["id", "name", "email", "role", "status", "createdAt", "avatar"];

impl User {
    fn validate(&self) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::Validation("User name must not be empty".into()));
        }
        validate_email(&self.email)
    }
}

/// Minimal shape check: a non-empty local part and domain around one `@`.
pub(crate) fn validate_email(email: &str) -> Result<(), RosterError> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(RosterError::Validation(format!(
            "Invalid email address: {email:?}"
        ))),
    }
}

impl Fields for User {
    fn field_names(&self) -> &'static [&'static str] {
        USER_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.0.clone())),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "role" => Some(FieldValue::from(self.role.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
            "avatar" => self.avatar.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

impl Record for User {
    type Draft = UserDraft;
    type Patch = UserPatch;

    const LABEL: &'static str = "User";
    const PLURAL: &'static str = "Users";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }

    fn default_filter() -> FilterSpec {
        FilterSpec::sorted_by("name")
    }

    fn from_draft(
        id: RecordId,
        created_at: DateTime<Utc>,
        draft: UserDraft,
    ) -> Result<Self, RosterError> {
        let user = Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            created_at,
            avatar: None,
        };
        user.validate()?;
        Ok(user)
    }

    fn apply_patch(&mut self, patch: UserPatch) -> Result<(), RosterError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(email) = patch.email {
            next.email = email;
        }
        if let Some(role) = patch.role {
            next.role = role;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}
