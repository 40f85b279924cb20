//! Data models for the identity service

pub mod user;

pub use user::{
    ForgotPasswordRequest, LoginRequest, PlayerSummary, PublicProfile, ResetPasswordRequest, Role,
    SignupRequest, User, VerifyEmailRequest,
};
