// Field checks shared by the user-entry forms

use regex::Regex;
use std::sync::LazyLock;

use crate::identity::IdentityError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.as_ref().is_some_and(|re| re.is_match(email))
}

/// Team-member entry: name and email must be present and the email well formed
pub fn require_name_and_email(name: &str, email: &str) -> Result<(), IdentityError> {
    require_fields(
        name,
        email,
        "Please provide name and email for the new team member.",
    )
}

/// Signup from the login dialog
pub fn require_signup_fields(name: &str, email: &str) -> Result<(), IdentityError> {
    require_fields(name, email, "Please enter your name and email to sign up.")
}

fn require_fields(name: &str, email: &str, missing: &str) -> Result<(), IdentityError> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(IdentityError::validation(missing));
    }
    if !is_valid_email(email) {
        return Err(IdentityError::validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

pub fn require_matching_passwords(password: &str, confirm: &str) -> Result<(), IdentityError> {
    if password.is_empty() {
        return Err(IdentityError::validation("Password cannot be empty."));
    }
    if password != confirm {
        return Err(IdentityError::validation(
            "Please make sure your passwords match.",
        ));
    }
    Ok(())
}
