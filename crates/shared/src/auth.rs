//! Authentication types for JWT access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full control, including dimension management.
    Owner,
    /// Manages dimensions and approves expense reports.
    Admin,
    /// Approves expense reports.
    Approver,
    /// Approves and books expense reports.
    Accountant,
    /// Files expense reports.
    Submitter,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Approver => "approver",
            Self::Accountant => "accountant",
            Self::Submitter => "submitter",
            Self::Viewer => "viewer",
        }
    }

    /// Parses a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "approver" => Some(Self::Approver),
            "accountant" => Some(Self::Accountant),
            "submitter" => Some(Self::Submitter),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Returns true if the role may manage accounting dimensions.
    #[must_use]
    pub const fn can_manage_dimensions(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Returns true if the role may approve expense reports.
    #[must_use]
    pub const fn can_approve(&self) -> bool {
        matches!(
            self,
            Self::Owner | Self::Admin | Self::Approver | Self::Accountant
        )
    }

    /// Returns true if the role may create or edit expense reports.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !matches!(self, Self::Viewer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the parsed role, if it is a known one.
    #[must_use]
    pub fn user_role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }
}
