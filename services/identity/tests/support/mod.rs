//! Test doubles shared by the identity suites

#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use identity::{
    AccountSettings, IdentityService,
    clock::Clock,
    codes::MemoryCodeStore,
    mailer::{MailError, Mailer},
    repositories::MemoryUserRepository,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records every message instead of delivering it; can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailer {
    pub fn fail_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentMail {
        self.sent().pop().expect("no mail was sent")
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Other("relay unavailable".to_string()));
        }

        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub type TestService =
    IdentityService<MemoryUserRepository, MemoryCodeStore, RecordingMailer, ManualClock>;

pub struct Harness {
    pub service: TestService,
    pub users: MemoryUserRepository,
    pub codes: MemoryCodeStore,
    pub mailer: RecordingMailer,
    pub clock: ManualClock,
}

pub fn harness() -> Harness {
    let users = MemoryUserRepository::new();
    let codes = MemoryCodeStore::new();
    let mailer = RecordingMailer::default();
    let clock = ManualClock::new();

    let settings = AccountSettings {
        public_base_url: "https://sports.example.com".to_string(),
        ..AccountSettings::default()
    };

    Harness {
        service: IdentityService::new(
            users.clone(),
            codes.clone(),
            mailer.clone(),
            clock.clone(),
            settings,
        ),
        users,
        codes,
        mailer,
        clock,
    }
}

/// Six-digit code from a verification email body
pub fn code_from(html: &str) -> String {
    html.split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 6)
        .expect("no six-digit code in mail")
        .to_string()
}

/// Reset token from a reset email body
pub fn token_from(html: &str) -> String {
    let start = html.find("token=").expect("no token in mail") + "token=".len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}

/// Reset link from a reset email body, with HTML escaping undone
pub fn link_from(html: &str) -> String {
    let start = html.find("href=\"").expect("no link in mail") + "href=\"".len();
    let end = html[start..].find('"').expect("unterminated link") + start;
    html[start..end].replace("&amp;", "&")
}
