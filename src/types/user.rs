//! User and organization login types
//!
//! Both organizations and users are addressed by a login on GitHub; the wrapper
//! keeps the two call sites from mixing them with free-form strings.

use serde::{Deserialize, Serialize};

/// GitHub login of a user or organization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Login(String);

impl Login {
    pub fn new(login: String) -> Self {
        Self(login)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Profile page on github.com
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.0)
    }
}

impl std::fmt::Display for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Login {
    fn from(s: &str) -> Self {
        Login::new(s.to_string())
    }
}

impl From<String> for Login {
    fn from(s: String) -> Self {
        Login::new(s)
    }
}

impl PartialEq<str> for Login {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Login {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
