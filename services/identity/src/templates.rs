//! Email bodies for the account flows

use url::form_urlencoded;

pub const VERIFICATION_SUBJECT: &str = "Sport Scheduler: Email Verification";
pub const RESET_SUBJECT: &str = "Password Reset - Sport Scheduler";

/// Link the reset email points at. Query values are form-urlencoded.
pub fn reset_link(base_url: &str, token: &str, email: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .append_pair("email", email)
        .finish();

    format!(
        "{}/reset-password.html?{}",
        base_url.trim_end_matches('/'),
        query
    )
}

pub fn render_verification_html(fullname: &str, code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Email Verification</title>
</head>
<body style="font-family: Arial, sans-serif; color: #374151;">
    <div style="max-width: 560px; margin: 0 auto; padding: 24px;">
        <h2>Welcome to Sport Scheduler, {fullname}!</h2>
        <p>To complete your registration, please use the verification code below:</p>
        <h3 style="background-color: #f2f2f2; padding: 10px; display: inline-block;">{code}</h3>
        <p>If you did not sign up, you can ignore this email.</p>
    </div>
</body>
</html>"#,
        fullname = escape_html(fullname),
        code = code,
    )
}

pub fn render_reset_html(link: &str, valid_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Password Reset</title>
</head>
<body style="font-family: Arial, sans-serif; color: #374151;">
    <div style="max-width: 560px; margin: 0 auto; padding: 24px;">
        <h2>Password reset</h2>
        <p>You requested a password reset. Click the button below to set a new password:</p>
        <a href="{link}" style="background: #00b09b; padding: 10px 20px; color: #fff; text-decoration: none; border-radius: 5px;">Reset Password</a>
        <p>This link is valid for {valid_minutes} minutes.</p>
    </div>
</body>
</html>"#,
        link = escape_html(link),
        valid_minutes = valid_minutes,
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
