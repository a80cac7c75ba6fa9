//! Request DTOs for the user service API
//!
//! Defines the structure of outgoing HTTP request bodies.

use serde::Serialize;

use super::UserId;

/// Request body for `POST /users/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Request body for `POST /users/auth/logout`
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// Partial update body for `PUT /users/{id}`
///
/// Carries exactly one changed field; the others are skipped on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<u32>,
}

impl UserPatch {
    pub fn campaign_flags(flags: u32) -> Self {
        Self {
            campaign_flags: Some(flags),
            ..Self::default()
        }
    }

    pub fn avatar(avatar: u32) -> Self {
        Self {
            avatar: Some(avatar),
            ..Self::default()
        }
    }

    pub fn signature(signature: impl Into<String>) -> Self {
        Self {
            signature: Some(signature.into()),
            ..Self::default()
        }
    }

    pub fn title(title: u32) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }
}
