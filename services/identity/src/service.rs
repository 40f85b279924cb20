//! Account flows: signup, email verification, login and password reset

use chrono::TimeDelta;
use rand::{Rng, RngCore};
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use crate::{
    clock::Clock,
    codes::CodeStore,
    config::IdentityConfig,
    error::{IdentityError, IdentityResult},
    mailer::Mailer,
    models::{
        ForgotPasswordRequest, LoginRequest, PlayerSummary, PublicProfile, ResetPasswordRequest,
        Role, SignupRequest, User, VerifyEmailRequest,
    },
    password::{hash_password, verify_password},
    store::UserStore,
    templates,
    validation::{validate_email, validate_fullname, validate_password},
};

const RESET_TOKEN_BYTES: usize = 32;

/// Tunables of the account flows
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Base URL that reset links point at
    pub public_base_url: String,
    pub verification_code_ttl: Duration,
    pub reset_token_ttl: TimeDelta,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            verification_code_ttl: Duration::from_secs(24 * 60 * 60),
            reset_token_ttl: TimeDelta::minutes(15),
        }
    }
}

impl From<&IdentityConfig> for AccountSettings {
    fn from(config: &IdentityConfig) -> Self {
        let reset_token_ttl = TimeDelta::from_std(config.reset_token_ttl())
            .unwrap_or(AccountSettings::default().reset_token_ttl);

        Self {
            public_base_url: config.public_base_url.clone(),
            verification_code_ttl: config.verification_code_ttl(),
            reset_token_ttl,
        }
    }
}

#[derive(Clone)]
pub struct IdentityService<U, C, M, K> {
    users: U,
    codes: C,
    mailer: M,
    clock: K,
    settings: AccountSettings,
}

impl<U, C, M, K> IdentityService<U, C, M, K>
where
    U: UserStore,
    C: CodeStore,
    M: Mailer,
    K: Clock,
{
    pub fn new(users: U, codes: C, mailer: M, clock: K, settings: AccountSettings) -> Self {
        Self {
            users,
            codes,
            mailer,
            clock,
            settings,
        }
    }

    /// Register an unverified player and email them a verification code
    pub async fn signup(&self, request: SignupRequest) -> IdentityResult<()> {
        let email = request.email.trim().to_string();
        validate_fullname(&request.fullname).map_err(IdentityError::Validation)?;
        validate_email(&email).map_err(IdentityError::Validation)?;
        validate_password(&request.password).map_err(IdentityError::Validation)?;

        if self.users.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Signup refused, email already registered");
            return Err(IdentityError::EmailTaken);
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| IdentityError::Hashing(e.to_string()))?;
        let user = User::new(
            request.fullname.trim(),
            email.clone(),
            password_hash,
            Role::Player,
            self.clock.now(),
        );
        self.users.insert(&user).await?;

        // Without a delivered code the account could never be verified.
        if let Err(e) = self.send_verification(&user).await {
            self.discard_signup(&user).await;
            return Err(e);
        }

        info!(user_id = %user.id, email = %email, "User signed up, verification pending");
        Ok(())
    }

    async fn send_verification(&self, user: &User) -> IdentityResult<()> {
        let code = verification_code();
        self.codes
            .put(&user.email, &code, self.settings.verification_code_ttl)
            .await?;

        let html = templates::render_verification_html(&user.fullname, &code);
        if let Err(e) = self
            .mailer
            .send(&user.email, templates::VERIFICATION_SUBJECT, &html)
            .await
        {
            error!(email = %user.email, "Failed to send verification email: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    async fn discard_signup(&self, user: &User) {
        if let Err(e) = self.codes.remove(&user.email).await {
            warn!(email = %user.email, "Failed to drop pending verification code: {}", e);
        }

        match self.users.delete(user.id).await {
            Ok(_) => info!(user_id = %user.id, email = %user.email, "Signup rolled back"),
            Err(e) => error!(user_id = %user.id, "Failed to roll back signup: {}", e),
        }
    }

    /// Consume the pending code for `email` and mark the account verified
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> IdentityResult<()> {
        let email = request.email.trim();
        let Some(expected) = self.codes.get(email).await? else {
            return Err(IdentityError::NoCodeFound);
        };

        if expected != request.code {
            warn!(email = %email, "Wrong verification code");
            return Err(IdentityError::InvalidCode);
        }

        let Some(mut user) = self.users.find_by_email(email).await? else {
            self.codes.remove(email).await?;
            return Err(IdentityError::UserNotFound);
        };

        user.is_verified = true;
        user.updated_at = self.clock.now();
        if !self.users.save(&user).await? {
            self.codes.remove(email).await?;
            return Err(IdentityError::UserNotFound);
        }
        self.codes.remove(email).await?;

        info!(user_id = %user.id, email = %email, "Email verified");
        Ok(())
    }

    /// Check credentials. No session or token is issued.
    pub async fn login(&self, request: LoginRequest) -> IdentityResult<PublicProfile> {
        let email = request.email.trim();
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        if !user.is_verified {
            return Err(IdentityError::NotVerified);
        }

        let matches = verify_password(&request.password, &user.password_hash)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;
        if !matches {
            warn!(email = %email, "Login refused, incorrect password");
            return Err(IdentityError::IncorrectPassword);
        }

        info!(user_id = %user.id, email = %email, "User logged in");
        Ok(user.profile())
    }

    /// Issue a reset token and email the reset link
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> IdentityResult<()> {
        let email = request.email.trim();
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        let token = reset_token();
        let now = self.clock.now();
        user.reset_token = Some(token.clone());
        user.reset_token_expiry = Some(now + self.settings.reset_token_ttl);
        user.updated_at = now;
        if !self.users.save(&user).await? {
            return Err(IdentityError::UserNotFound);
        }

        let link = templates::reset_link(&self.settings.public_base_url, &token, email);
        let html = templates::render_reset_html(&link, self.settings.reset_token_ttl.num_minutes());
        if let Err(e) = self
            .mailer
            .send(email, templates::RESET_SUBJECT, &html)
            .await
        {
            error!(email = %email, "Failed to send reset email: {}", e);
            return Err(e.into());
        }

        info!(user_id = %user.id, email = %email, "Password reset requested");
        Ok(())
    }

    /// Replace the password when `token` matches the stored, unexpired token
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> IdentityResult<()> {
        let email = request.email.trim();
        validate_password(&request.new_password).map_err(IdentityError::Validation)?;

        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::InvalidOrExpiredToken)?;

        let now = self.clock.now();
        let valid = match (&user.reset_token, user.reset_token_expiry) {
            (Some(stored), Some(expiry)) => {
                expiry > now && !request.token.is_empty() && tokens_match(stored, &request.token)
            }
            _ => false,
        };
        if !valid {
            warn!(email = %email, "Password reset refused, invalid or expired token");
            return Err(IdentityError::InvalidOrExpiredToken);
        }

        user.password_hash = hash_password(&request.new_password)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;
        user.reset_token = None;
        user.reset_token_expiry = None;
        user.updated_at = now;
        if !self.users.save(&user).await? {
            return Err(IdentityError::InvalidOrExpiredToken);
        }

        info!(user_id = %user.id, email = %email, "Password reset");
        Ok(())
    }

    /// Every account with the player role
    pub async fn list_players(&self) -> IdentityResult<Vec<PlayerSummary>> {
        let players = self.users.list_by_role(Role::Player).await?;
        Ok(players.iter().map(PlayerSummary::from).collect())
    }
}

/// Six-digit numeric code
fn verification_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

/// 32 random bytes, hex encoded
fn reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn tokens_match(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_is_six_digits() {
        for _ in 0..100 {
            let code = verification_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_reset_token_is_64_hex_chars() {
        let token = reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, reset_token());
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("abc", "abc"));
        assert!(!tokens_match("abc", "abd"));
        assert!(!tokens_match("abc", "abcd"));
    }

    #[test]
    fn test_settings_from_config() {
        let config = IdentityConfig {
            host: "0.0.0.0".into(),
            port: 3000,
            public_base_url: "https://sports.example.com".into(),
            verification_code_ttl_secs: 60,
            reset_token_ttl_secs: 600,
        };

        let settings = AccountSettings::from(&config);
        assert_eq!(settings.reset_token_ttl, TimeDelta::minutes(10));
        assert_eq!(settings.verification_code_ttl, Duration::from_secs(60));
        assert_eq!(settings.public_base_url, "https://sports.example.com");

        let out_of_range = IdentityConfig {
            reset_token_ttl_secs: u64::MAX,
            ..config
        };
        assert_eq!(
            AccountSettings::from(&out_of_range).reset_token_ttl,
            TimeDelta::minutes(15)
        );
    }
}
