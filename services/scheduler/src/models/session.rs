//! Session record, roster entries and the session payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient_string_list;

/// One player's participation in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub email: String,
    #[serde(default)]
    pub joined: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub cancel_reason: String,
}

impl RosterEntry {
    /// An entry for a player who has been listed but has not answered yet
    pub fn listed(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            joined: false,
            cancelled: false,
            cancel_reason: String::new(),
        }
    }
}

/// Session entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub sport: String,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_by: String,
    pub required_players: Option<i32>,
    pub team1: Vec<String>,
    pub team2: Vec<String>,
    #[serde(rename = "playerEmails")]
    pub roster: Vec<RosterEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A session together with the roster entries that were cancelled
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledSession {
    #[serde(flatten)]
    pub session: Session,
    pub cancelled_players: Vec<RosterEntry>,
}

/// Response for roster changes: a status line plus the updated session
#[derive(Debug, Clone, Serialize)]
pub struct SessionMessage {
    pub message: &'static str,
    pub session: Session,
}

/// Body for creating or editing a session.
///
/// Every field is optional on the wire so missing values surface as
/// validation errors from the service rather than as extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub player_emails: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub required_players: Option<i32>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub team1: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub team2: Vec<String>,
}

/// Body for joining a session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub player_email: String,
}

/// Body for cancelling participation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub player_email: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query string for listing a player's sessions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerQuery {
    #[serde(default)]
    pub email: String,
}
