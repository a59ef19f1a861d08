//! Registration and login input rules.
//!
//! A user is identified by a username, an email, or both. Usernames are
//! trimmed; emails are trimmed and lower-cased before storage and lookup.
//! The role is derived from the identifier and is never user-settable.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Accepted email shape.
const EMAIL_PATTERN: &str = r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Identifiers that receive the `Admin` role at registration.
const ADMIN_IDENTIFIERS: &[&str] = &["admin", "admin@example.com"];

/// Message shared by every login failure so callers cannot tell which half
/// of the credentials was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

/// Validated, normalized registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

/// Trim a username; blank becomes `None`.
pub fn normalize_username(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trim and lower-case an email; blank becomes `None`.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Check the shape of an already-normalized email.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::validation("Please enter a valid email address"))
    }
}

/// The only password rule is presence.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::validation("Password is required"));
    }
    Ok(())
}

/// Role for a newly registered user, keyed on the username, else the email.
pub fn derive_role(username: Option<&str>, email: Option<&str>) -> Role {
    match username.or(email) {
        Some(id) if ADMIN_IDENTIFIERS.contains(&id.to_lowercase().as_str()) => Role::Admin,
        _ => Role::User,
    }
}

/// Normalize and validate a registration request.
pub fn prepare_registration(
    username: Option<&str>,
    email: Option<&str>,
    password: &str,
) -> Result<NewIdentity, CoreError> {
    let username = normalize_username(username);
    let email = normalize_email(email);

    if username.is_none() && email.is_none() {
        return Err(CoreError::validation(
            "Username or Email is required to sign up",
        ));
    }
    validate_password(password)?;
    if let Some(email) = &email {
        validate_email(email)?;
    }

    let role = derive_role(username.as_deref(), email.as_deref());
    Ok(NewIdentity {
        username,
        email,
        role,
    })
}

/// Pick the login identifier out of the accepted request fields.
///
/// `identifier` wins, then `username`, then `email`. The result is trimmed;
/// lookup then tries it as a username before trying it as an email.
pub fn login_identifier(
    identifier: Option<&str>,
    username: Option<&str>,
    email: Option<&str>,
) -> Option<String> {
    [identifier, username, email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(normalize_username(Some("  alice ")), Some("alice".into()));
        assert_eq!(normalize_username(Some("   ")), None);
        assert_eq!(normalize_username(None), None);
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email(Some(" Alice@Example.COM ")),
            Some("alice@example.com".into())
        );
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b-c@mail.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("alice@localhost").is_err());
    }

    #[test]
    fn registration_needs_an_identifier() {
        let err = prepare_registration(Some(" "), None, "pw").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn registration_needs_a_password() {
        let err = prepare_registration(Some("alice"), None, "").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Password is required");
    }

    #[test]
    fn registration_rejects_bad_email() {
        assert!(prepare_registration(None, Some("nope"), "pw").is_err());
    }

    #[test]
    fn registration_with_email_only() {
        let identity = prepare_registration(None, Some("Bob@Example.com"), "pw").unwrap();
        assert_eq!(identity.username, None);
        assert_eq!(identity.email.as_deref(), Some("bob@example.com"));
        assert_eq!(identity.role, Role::User);
    }

    #[test]
    fn admin_role_is_derived() {
        assert_eq!(derive_role(Some("Admin"), None), Role::Admin);
        assert_eq!(derive_role(None, Some("admin@example.com")), Role::Admin);
        assert_eq!(derive_role(Some("alice"), Some("admin@example.com")), Role::User);
        assert_eq!(derive_role(Some("administrator"), None), Role::User);
    }

    #[test]
    fn login_identifier_precedence() {
        assert_eq!(
            login_identifier(Some("id"), Some("user"), Some("mail")),
            Some("id".into())
        );
        assert_eq!(
            login_identifier(None, Some(" user "), Some("mail")),
            Some("user".into())
        );
        assert_eq!(login_identifier(None, Some(""), Some("mail")), Some("mail".into()));
        assert_eq!(login_identifier(None, None, None), None);
    }
}
