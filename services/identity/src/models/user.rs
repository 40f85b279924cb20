//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Player,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Player => "player",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "player" => Ok(Role::Player),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User entity. Never serialized as a whole: the hash and reset token stay
/// inside the service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh, unverified account
    pub fn new(
        fullname: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            fullname: fullname.into(),
            email: email.into(),
            password_hash,
            role,
            is_verified: false,
            reset_token: None,
            reset_token_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> PublicProfile {
        PublicProfile {
            fullname: self.fullname.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// What a successful login reveals about the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub fullname: String,
    pub email: String,
    pub role: Role,
}

/// Entry of the player directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub is_verified: bool,
}

impl From<&User> for PlayerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub email: String,
    /// Verification forms post the code either as text or as a number
    #[serde(default, deserialize_with = "code_text")]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
}

fn code_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCode {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Text(text)) => text.trim().to_string(),
        Some(RawCode::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Player.to_string(), "player");
        assert!("root".parse::<Role>().is_err());
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
    }

    #[test]
    fn test_verify_request_accepts_text_or_number() {
        let text: VerifyEmailRequest =
            serde_json::from_value(json!({ "email": "a@x.com", "code": " 123456 " })).unwrap();
        assert_eq!(text.code, "123456");

        let number: VerifyEmailRequest =
            serde_json::from_value(json!({ "email": "a@x.com", "code": 654321 })).unwrap();
        assert_eq!(number.code, "654321");

        let missing: VerifyEmailRequest =
            serde_json::from_value(json!({ "email": "a@x.com" })).unwrap();
        assert!(missing.code.is_empty());
    }

    #[test]
    fn test_player_summary_shape() {
        let user = User::new("Ann", "a@x.com", "hash".into(), Role::Player, Utc::now());
        let json = serde_json::to_value(PlayerSummary::from(&user)).unwrap();

        assert_eq!(json["fullname"], "Ann");
        assert_eq!(json["isVerified"], false);
        assert!(json.get("passwordHash").is_none());
    }
}
