//! User accounts as stored in the `Users` table.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `password` holds the bcrypt hash, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// A user about to be created. The store assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Whether a string looks like a plausible email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("alex@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.co.uk"));
        assert!(is_valid_email("user_99%x@mail-host.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("one-letter@tld.x"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn user_json_roundtrip() {
        let user = User {
            id: 3,
            email: "alex@example.com".into(),
            name: "Alex".into(),
            password: "$2b$12$abcdefghijklmnopqrstuv".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.email, "alex@example.com");
        assert_eq!(parsed.password, user.password);
    }
}
