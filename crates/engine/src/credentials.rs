//! Password hashing and bearer tokens.
//!
//! Passwords are stored as Argon2id PHC strings with a random salt. Tokens are
//! HS256 JWTs whose `sub` claim is the user's email.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use std::sync::LazyLock;

use crate::{EngineError, ResultEngine};

pub(crate) const INVALID_TOKEN: &str = "Invalid or expired token";

/// Plaintext behind [`DECOY_HASH`]. Never matches a real account.
const DECOY_PASSWORD: &str = "holocron-decoy-password";

/// Checked when the login email is unknown, so that every failed login costs
/// one Argon2 verification.
static DECOY_HASH: LazyLock<String> =
    LazyLock::new(|| argon2_hash(DECOY_PASSWORD).unwrap_or_default());

#[cfg(test)]
pub(crate) static VERIFIED_PASSWORDS: std::sync::Mutex<Vec<String>> =
    std::sync::Mutex::new(Vec::new());

fn argon2_hash(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Credentials(err.to_string()))
}

fn argon2_verify(password: &str, stored: &str) -> bool {
    #[cfg(test)]
    if let Ok(mut verified) = VERIFIED_PASSWORDS.lock() {
        verified.push(password.to_string());
    }

    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hashes `password` with a fresh salt, off the async worker threads.
pub(crate) async fn hash_password(password: &str) -> ResultEngine<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || argon2_hash(&password))
        .await
        .map_err(|err| EngineError::Credentials(err.to_string()))?
}

/// Checks `password` against `stored`, or against the decoy hash when there
/// is no stored hash. Always `false` in the latter case.
///
/// Also `false` for a wrong password and for an unparsable stored hash.
pub(crate) async fn verify_password(password: &str, stored: Option<&str>) -> ResultEngine<bool> {
    let password = password.to_string();
    let stored = stored.map(str::to_string);
    tokio::task::spawn_blocking(move || match stored {
        Some(stored) => argon2_verify(&password, &stored),
        None => {
            argon2_verify(&password, &DECOY_HASH);
            false
        }
    })
    .await
    .map_err(|err| EngineError::Credentials(err.to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Who a verified token belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Signs and verifies bearer tokens with a shared secret.
pub(crate) struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub(crate) fn new(secret: &str, ttl: Duration) -> ResultEngine<Self> {
        if secret.is_empty() {
            return Err(EngineError::Configuration(
                "token secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub(crate) fn issue(&self, email: &str) -> ResultEngine<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| EngineError::Credentials(err.to_string()))
    }

    pub(crate) fn verify(&self, token: &str) -> ResultEngine<Identity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|err| {
            tracing::debug!("rejected bearer token: {err}");
            EngineError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

        Ok(Identity {
            email: data.claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn password_hash_is_salted_and_verifiable() {
        let first = hash_password("pw1").await.unwrap();
        let second = hash_password("pw1").await.unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("pw1"));
        assert!(verify_password("pw1", Some(&first)).await.unwrap());
        assert!(verify_password("pw1", Some(&second)).await.unwrap());
        assert!(!verify_password("wrong", Some(&first)).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_never_verifies() {
        assert!(!verify_password("pw1", Some("not-a-phc-string")).await.unwrap());
    }

    #[tokio::test]
    async fn missing_hash_still_runs_a_verification() {
        assert!(!verify_password(DECOY_PASSWORD, None).await.unwrap());
        assert!(!verify_password("decoy-check-input", None).await.unwrap());

        let verified = VERIFIED_PASSWORDS.lock().unwrap();
        assert!(verified.iter().any(|p| p == "decoy-check-input"));
    }

    #[test]
    fn decoy_hash_is_a_valid_phc_string() {
        assert!(PasswordHash::new(&DECOY_HASH).is_ok());
    }

    #[test]
    fn token_carries_email() {
        let keys = TokenKeys::new("secret", Duration::minutes(15)).unwrap();
        let token = keys.issue("a@x.com").unwrap();

        assert_eq!(keys.verify(&token).unwrap().email, "a@x.com");
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let ours = TokenKeys::new("secret", Duration::minutes(15)).unwrap();
        let theirs = TokenKeys::new("other", Duration::minutes(15)).unwrap();
        let token = theirs.issue("a@x.com").unwrap();

        assert_eq!(
            ours.verify(&token),
            Err(EngineError::Unauthorized(INVALID_TOKEN.to_string()))
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("secret", Duration::seconds(-120)).unwrap();
        let token = keys.issue("a@x.com").unwrap();

        assert!(matches!(
            keys.verify(&token),
            Err(EngineError::Unauthorized(_))
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let keys = TokenKeys::new("secret", Duration::minutes(15)).unwrap();
        assert!(matches!(
            keys.verify("definitely.not.a-jwt"),
            Err(EngineError::Unauthorized(_))
        ));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(
            TokenKeys::new("", Duration::minutes(15)),
            Err(EngineError::Configuration(_))
        ));
    }
}
