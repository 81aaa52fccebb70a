use serde::{Deserialize, Serialize};

/// JWT claims carried by a bearer token.
///
/// Tokens are issued by the login service (out of scope here); this crate
/// only defines the shape so the API can verify and the tests can mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's e-mail address.
    pub sub: String,
    pub name: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp.
    pub iat: i64,
}
