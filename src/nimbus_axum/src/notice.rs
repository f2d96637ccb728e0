use serde::Deserialize;

/// One-line status messages carried across redirects as a short code in the
/// query string, e.g. `/login?success=registered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Registered,
    EmailVerified,
    InvalidVerificationToken,
    PasswordChanged,
    ResetTokenExpired,
    ResetTokenInvalid,
}

impl Notice {
    pub fn code(&self) -> &'static str {
        match self {
            Notice::Registered => "registered",
            Notice::EmailVerified => "email-verified",
            Notice::InvalidVerificationToken => "invalid-token",
            Notice::PasswordChanged => "password-changed",
            Notice::ResetTokenExpired => "token-expired",
            Notice::ResetTokenInvalid => "token-invalid",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            Notice::Registered,
            Notice::EmailVerified,
            Notice::InvalidVerificationToken,
            Notice::PasswordChanged,
            Notice::ResetTokenExpired,
            Notice::ResetTokenInvalid,
        ]
        .into_iter()
        .find(|notice| notice.code() == code)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Registered => "Account created! Check your email to verify it.",
            Notice::EmailVerified => "Email verified successfully!",
            Notice::InvalidVerificationToken => "Invalid token.",
            Notice::PasswordChanged => "Password changed successfully!",
            Notice::ResetTokenExpired => "Token expired. Request a new link.",
            Notice::ResetTokenInvalid => "Invalid token. Request a new link.",
        }
    }

    pub fn success(self) -> String {
        format!("success={}", self.code())
    }

    pub fn error(self) -> String {
        format!("error={}", self.code())
    }
}

/// `?success=...&error=...` as read back by the page the redirect lands on.
/// Unknown codes are dropped rather than echoed.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl NoticeQuery {
    pub fn success_message(&self) -> Option<&'static str> {
        self.success.as_deref().and_then(Notice::from_code).map(|n| n.message())
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_deref().and_then(Notice::from_code).map(|n| n.message())
    }
}
