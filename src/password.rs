// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.
//!
//! Stored form: `{salt_b64}${digest_b64}` where
//! `digest = HMAC-SHA256(key = pepper, salt || password)` and the salt is 16
//! random bytes per user. Verification is constant-time.

use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub struct PasswordHasher {
    pepper: Vec<u8>,
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = Uuid::new_v4().into_bytes();
        let digest = self.mac(&salt, password)?.finalize().into_bytes();
        Ok(format!(
            "{}${}",
            Base64::encode_string(&salt),
            Base64::encode_string(&digest)
        ))
    }

    /// Check `password` against a stored hash. Unparseable hashes never match.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(digest)) = (Base64::decode_vec(salt_b64), Base64::decode_vec(digest_b64))
        else {
            return false;
        };

        match self.mac(&salt, password) {
            Ok(mac) => mac.verify_slice(&digest).is_ok(),
            Err(_) => false,
        }
    }

    fn mac(&self, salt: &[u8], password: &str) -> Result<HmacSha256, PasswordError> {
        let mut mac = HmacSha256::new_from_slice(&self.pepper)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        mac.update(salt);
        mac.update(password.as_bytes());
        Ok(mac)
    }
}
