//! HTTP Basic credentials for the gateway API
//!
//! The gateway authenticates every call with the merchant's public id as the
//! user name and the API secret as the password.

use base64::{engine::general_purpose, Engine as _};
use std::fmt;

/// Merchant credentials with a precomputed `Authorization` header value
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    login: String,
    password: String,
    header: String,
}

impl BasicAuth {
    /// Encode `login` and `password` into a Basic authorization value
    pub fn new(login: &str, password: &str) -> Self {
        let credentials = general_purpose::STANDARD.encode(format!("{login}:{password}"));
        Self {
            login: login.to_string(),
            password: password.to_string(),
            header: format!("Basic {credentials}"),
        }
    }

    /// User name part of the credentials
    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("login", &self.login)
            .field("header", &"<redacted>")
            .finish()
    }
}
