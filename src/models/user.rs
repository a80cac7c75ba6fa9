//! User Model
//!
//! Local snapshot of a user record owned by the user service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned by the user service.
pub type UserId = u32;

// == User ==
/// Deserialized snapshot of a server-side user.
///
/// Only the fields this client mutates are typed; everything else the
/// service sends is kept in `extra` and sent back untouched by a full update.
/// Typed fields missing (or null) in the service's body stay `None` and are
/// left out again on the way back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_flags: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<u32>,
    /// Fields not interpreted by this client
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a bare snapshot for the given id.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
