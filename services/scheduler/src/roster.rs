//! Roster state transitions
//!
//! Pure functions over a session's roster. Each entry moves through
//! `Listed -> Joined` and may be cancelled from either state; nothing here
//! leaves `Cancelled`. Lookups match the email exactly and resolve to the
//! first matching entry. Persistence is the caller's job.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::RosterEntry;

/// Why a roster transition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Player not listed for this session")]
    NotListed,
    #[error("Already joined")]
    AlreadyJoined,
    #[error("Player not in session")]
    NotInRoster,
}

/// Observable participation state of a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participation {
    Listed,
    Joined,
    Cancelled,
}

impl RosterEntry {
    pub fn participation(&self) -> Participation {
        if self.cancelled {
            Participation::Cancelled
        } else if self.joined {
            Participation::Joined
        } else {
            Participation::Listed
        }
    }
}

/// Build a fresh roster with every email in the `Listed` state.
///
/// Repeated emails are collapsed onto their first occurrence.
pub fn initialize<I, S>(emails: I) -> Vec<RosterEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    emails
        .into_iter()
        .map(Into::into)
        .filter(|email| seen.insert(email.clone()))
        .map(RosterEntry::listed)
        .collect()
}

/// Mark the player as joined
pub fn join<'a>(roster: &'a mut [RosterEntry], email: &str) -> Result<&'a RosterEntry, RosterError> {
    let entry = find_mut(roster, email).ok_or(RosterError::NotListed)?;
    if entry.joined {
        return Err(RosterError::AlreadyJoined);
    }

    entry.joined = true;
    Ok(entry)
}

/// Mark the player as cancelled, whether or not they had joined.
///
/// Cancelling again only replaces the reason.
pub fn cancel<'a>(
    roster: &'a mut [RosterEntry],
    email: &str,
    reason: Option<&str>,
) -> Result<&'a RosterEntry, RosterError> {
    let entry = find_mut(roster, email).ok_or(RosterError::NotInRoster)?;

    entry.cancelled = true;
    entry.cancel_reason = reason.unwrap_or_default().to_string();
    Ok(entry)
}

/// Replace a roster with a new email list, carrying over the state of
/// players present in both. Players missing from the new list are dropped.
pub fn rebuild<I, S>(old: &[RosterEntry], emails: I) -> Vec<RosterEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    initialize(emails)
        .into_iter()
        .map(|fresh| match find(old, &fresh.email) {
            Some(previous) => RosterEntry {
                email: fresh.email,
                joined: previous.joined,
                cancelled: previous.cancelled,
                cancel_reason: previous.cancel_reason.clone(),
            },
            None => fresh,
        })
        .collect()
}

pub fn find<'a>(roster: &'a [RosterEntry], email: &str) -> Option<&'a RosterEntry> {
    roster.iter().find(|entry| entry.email == email)
}

fn find_mut<'a>(roster: &'a mut [RosterEntry], email: &str) -> Option<&'a mut RosterEntry> {
    roster.iter_mut().find(|entry| entry.email == email)
}

/// Entries whose player has cancelled, in roster order
pub fn cancelled_entries(roster: &[RosterEntry]) -> Vec<RosterEntry> {
    roster.iter().filter(|entry| entry.cancelled).cloned().collect()
}
