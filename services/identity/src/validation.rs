//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate full name
pub fn validate_fullname(fullname: &str) -> Result<(), String> {
    let fullname = fullname.trim();
    if fullname.is_empty() {
        return Err("Full name is required".to_string());
    }

    if fullname.chars().count() > 100 {
        return Err("Full name must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

    match regex {
        Some(regex) if regex.is_match(email) => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();
    if length < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if length > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullname() {
        assert!(validate_fullname("Ann Lee").is_ok());
        assert!(validate_fullname("   ").is_err());
        assert!(validate_fullname(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert_eq!(validate_email("").unwrap_err(), "Email is required");
        assert_eq!(validate_email("a@x").unwrap_err(), "Invalid email format");
        assert!(validate_email("no-at-sign.com").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"p".repeat(128)).is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
        assert_eq!(validate_password("").unwrap_err(), "Password is required");
    }
}
