// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification (HS256).
//!
//! Tokens are stateless: nothing is stored server-side, a token is valid as
//! long as its signature matches the process secret, it has not expired, and
//! it names the configured issuer.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::TokenError;

/// Process-wide signing secret. Debug output is redacted.
#[derive(Clone)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self(Arc::from(bytes.as_ref()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Token settings shared by the issuer and the verifier.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: SigningSecret,
    /// Lifetime of an issued token, in hours.
    pub ttl_hours: i64,
    /// Value of the `iss` claim.
    pub issuer: String,
}

/// Mints session tokens at login.
pub struct TokenIssuer {
    key: EncodingKey,
    ttl_hours: i64,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl_hours: config.ttl_hours,
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a token expiring `ttl_hours` from now.
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = TimeDelta::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::Signing(format!("ttl of {}h is out of range", self.ttl_hours))
            })?;

        let claims = Claims {
            user_id,
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Checks session tokens on protected requests.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` and return its claims.
    ///
    /// Checks, in order: structure, signature, expiry, issuer. Any input,
    /// however malformed, yields a [`TokenError`] rather than a panic.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const TTL_HOURS: i64 = 2;

    fn config(secret: &str, issuer: &str) -> TokenConfig {
        TokenConfig {
            secret: SigningSecret::new(secret),
            ttl_hours: TTL_HOURS,
            issuer: issuer.to_string(),
        }
    }

    fn pair() -> (TokenIssuer, TokenVerifier) {
        let cfg = config("test-secret", "forum");
        (TokenIssuer::new(&cfg), TokenVerifier::new(&cfg))
    }

    #[test]
    fn issued_token_verifies_with_claims() {
        let (issuer, verifier) = pair();
        let before = Utc::now().timestamp();

        let token = issuer.issue(42, "alice").unwrap();
        let claims = verifier.verify(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "forum");

        let ttl = TTL_HOURS * 3600;
        assert!(claims.exp >= before + ttl - 1);
        assert!(claims.exp <= Utc::now().timestamp() + ttl + 1);
    }

    #[test]
    fn expiry_is_exactly_ttl_hours_after_issue() {
        let (issuer, verifier) = pair();
        let now = Utc::now();

        let token = issuer.issue_at(1, "carol", now).unwrap();
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.exp, now.timestamp() + TTL_HOURS * 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let (issuer, verifier) = pair();
        let issued_at = Utc::now() - TimeDelta::hours(TTL_HOURS) - TimeDelta::seconds(5);

        let token = issuer.issue_at(42, "alice", issued_at).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let (_, verifier) = pair();
        let forger = TokenIssuer::new(&config("other-secret", "forum"));

        let token = forger.issue(42, "alice").unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(42, "alice").unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"user_id":1,"username":"admin","exp":{},"iss":"forum"}}"#,
                Utc::now().timestamp() + 3600
            )
            .as_bytes(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(verifier.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn other_algorithm_is_rejected_as_bad_signature() {
        let (_, verifier) = pair();
        let claims = Claims {
            user_id: 42,
            username: "alice".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iss: "forum".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn unknown_or_none_algorithm_is_malformed() {
        let (_, verifier) = pair();
        let payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"user_id":1,"username":"admin","exp":{},"iss":"forum"}}"#,
                Utc::now().timestamp() + 3600
            )
            .as_bytes(),
        );

        for alg in ["none", "HS999"] {
            let header = URL_SAFE_NO_PAD.encode(format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#));
            let token = format!("{header}.{payload}.");
            assert_eq!(verifier.verify(&token), Err(TokenError::Malformed), "{alg}");
        }
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let (_, verifier) = pair();
        let other = TokenIssuer::new(&config("test-secret", "someone-else"));

        let token = other.issue(42, "alice").unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidIssuer));
    }

    #[test]
    fn garbage_is_malformed_not_a_panic() {
        let (_, verifier) = pair();
        for garbage in [
            "",
            "not-a-jwt-token",
            "a.b.c",
            "...",
            "\u{0}\u{1}\u{2}",
            "Bearer abc",
        ] {
            assert_eq!(
                verifier.verify(garbage),
                Err(TokenError::Malformed),
                "{garbage:?}"
            );
        }
    }

    #[test]
    fn out_of_range_ttl_fails_to_sign() {
        let mut cfg = config("test-secret", "forum");
        cfg.ttl_hours = i64::MAX;
        let issuer = TokenIssuer::new(&cfg);

        assert!(matches!(issuer.issue(1, "x"), Err(TokenError::Signing(_))));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SigningSecret::new("hunter2");
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}
