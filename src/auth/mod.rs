use sha2::{Digest, Sha256};

/// Header carrying the shared write secret
pub const WRITE_TOKEN_HEADER: &str = "x-app-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Unauthorized,
}

impl Authorization {
    pub fn is_authorized(self) -> bool {
        matches!(self, Authorization::Authorized)
    }
}

/// Authorized iff `supplied` is non-empty and exactly equals `secret`.
///
/// Both sides are hashed first so the comparison does not short-circuit on the
/// first differing byte of the secret.
pub fn check_write_token(supplied: Option<&str>, secret: &str) -> Authorization {
    match supplied {
        Some(token) if !token.is_empty() && !secret.is_empty() => {
            if Sha256::digest(token.as_bytes()) == Sha256::digest(secret.as_bytes()) {
                Authorization::Authorized
            } else {
                Authorization::Unauthorized
            }
        }
        _ => Authorization::Unauthorized,
    }
}
