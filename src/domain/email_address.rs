use std::fmt;

use validator::ValidateEmail;

/// Email address
#[derive(Debug, Clone)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse email address
    pub fn parse(email: String) -> Result<EmailAddress, String> {
        if ValidateEmail::validate_email(&email) {
            Ok(Self(email))
        } else {
            Err(format!("{email} is not a valid email address"))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
