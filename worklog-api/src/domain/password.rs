use base64::prelude::*;
use sha2::{Digest, Sha256};

/// A salted SHA-256 password digest, stored as `salt:digest` (both base64).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn hash(password: &str) -> Self {
        let salt = uuid::Uuid::new_v4();
        Self::with_salt(salt.as_bytes(), password)
    }

    fn with_salt(salt: &[u8], password: &str) -> Self {
        let salt_b64 = BASE64_STANDARD.encode(salt);
        let digest_b64 = BASE64_STANDARD.encode(digest(salt, password));
        Self(format!("{salt_b64}:{digest_b64}"))
    }

    /// Wrap a value previously produced by [`PasswordHash::hash`].
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn verify(&self, password: &str) -> bool {
        let Some((salt_b64, _)) = self.0.split_once(':') else {
            return false;
        };
        let Ok(salt) = BASE64_STANDARD.decode(salt_b64) else {
            return false;
        };

        Self::with_salt(&salt, password) == *self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}
