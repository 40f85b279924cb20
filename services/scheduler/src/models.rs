//! Records and request payloads for the scheduler service

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub mod session;
pub mod sport;

pub use session::{
    CancelRequest, CancelledSession, JoinRequest, PlayerQuery, RosterEntry, Session, SessionInput,
    SessionMessage,
};
pub use sport::{Sport, SportInput, SportStatus};

/// Parse a record id taken from a path or body.
///
/// Anything that is not a UUID cannot name a stored record, so callers
/// treat `None` as "not found".
pub fn parse_record_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Accept any JSON value where a list of strings is expected.
///
/// Arrays keep their string members; absent fields, `null` and other
/// shapes become an empty list.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(&id.to_string()), Some(id));
        assert_eq!(parse_record_id(&format!(" {} ", id)), Some(id));
        assert_eq!(parse_record_id("64b7f0c2e4b0a1a2b3c4d5e6"), None);
    }
}
