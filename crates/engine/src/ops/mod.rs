use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine, credentials::TokenKeys};

mod catalog;
mod favorites;
mod users;

pub use catalog::CatalogKind;
pub use favorites::Favorites;

/// Default lifetime of an issued bearer token, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 900;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    tokens: TokenKeys,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Trims `value` and rejects it when nothing is left.
fn require_text<'a>(value: Option<&'a str>, message: &str) -> ResultEngine<&'a str> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::Validation(message.to_string()))
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    token_secret: Option<String>,
    token_ttl: Duration,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            token_secret: None,
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Secret used to sign and verify bearer tokens (required).
    pub fn token_secret(mut self, secret: impl Into<String>) -> EngineBuilder {
        self.token_secret = Some(secret.into());
        self
    }

    /// How long an issued token stays valid.
    pub fn token_ttl(mut self, ttl: Duration) -> EngineBuilder {
        self.token_ttl = ttl;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let secret = self.token_secret.ok_or_else(|| {
            EngineError::Configuration("token secret is required".to_string())
        })?;

        Ok(Engine {
            database: self.database,
            tokens: TokenKeys::new(&secret, self.token_ttl)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text(Some("  a@x.com "), "msg"), Ok("a@x.com"));
        assert_eq!(
            require_text(Some("   "), "msg"),
            Err(EngineError::Validation("msg".to_string()))
        );
        assert_eq!(
            require_text(None, "msg"),
            Err(EngineError::Validation("msg".to_string()))
        );
    }

    #[tokio::test]
    async fn build_without_secret_fails() {
        let result = Engine::builder().build().await;
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }
}
