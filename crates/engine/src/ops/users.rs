use sea_orm::{ActiveValue, QueryFilter, QueryOrder, SqlErr, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine,
    credentials::{self, Identity},
    users::{self, User},
};

use super::{Engine, require_text, with_tx};

const MISSING_CREDENTIALS: &str = "Email and password are required";
const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Passwords are not trimmed, only checked for presence.
fn require_password(password: Option<&str>) -> ResultEngine<&str> {
    password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| EngineError::Validation(MISSING_CREDENTIALS.to_string()))
}

impl Engine {
    /// Creates an active user and returns its id.
    ///
    /// The email is compared case-sensitively. Only the salted hash of the
    /// password is stored.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> ResultEngine<i32> {
        let email = require_text(email, MISSING_CREDENTIALS)?.to_string();
        let password = require_password(password)?;
        let hash = credentials::hash_password(password).await?;

        let id = with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(email.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::Conflict(USER_EXISTS.to_string()));
            }

            let user = users::ActiveModel {
                email: ActiveValue::Set(email.clone()),
                password: ActiveValue::Set(hash),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            }
            .insert(&db_tx)
            .await
            .map_err(|err| match err.sql_err() {
                // Lost a race with a concurrent signup for the same email.
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    EngineError::Conflict(USER_EXISTS.to_string())
                }
                _ => EngineError::Database(err),
            })?;
            Ok::<_, EngineError>(user.id)
        })?;

        tracing::info!("registered user {id}");
        Ok(id)
    }

    /// Checks the credentials and issues a bearer token for the user.
    ///
    /// Unknown email, wrong password and inactive account all produce the
    /// same error.
    pub async fn authenticate(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> ResultEngine<String> {
        let email = require_text(email, MISSING_CREDENTIALS)?;
        let password = require_password(password)?;

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;

        let stored = user.as_ref().map(|u| u.password.as_str());
        let matched = credentials::verify_password(password, stored).await?;

        match user {
            Some(user) if matched && user.is_active => self.tokens.issue(&user.email),
            _ => {
                tracing::warn!("failed login attempt");
                Err(EngineError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    /// Resolves a bearer token to the identity it was issued for.
    pub fn verify_token(&self, token: &str) -> ResultEngine<Identity> {
        self.tokens.verify(token)
    }

    /// All users, by id.
    pub async fn users(&self) -> ResultEngine<Vec<User>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Users listed under `/users/favorites`.
    ///
    /// Kept as the plain user list; expanded favorites live in
    /// [`Engine::user_favorites`].
    pub async fn users_with_favorites(&self) -> ResultEngine<Vec<User>> {
        self.users().await
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;
    use crate::credentials::VERIFIED_PASSWORDS;

    async fn engine_with_db() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder()
            .database(db)
            .token_secret("test-secret")
            .build()
            .await
            .unwrap()
    }

    fn was_verified(password: &str) -> bool {
        VERIFIED_PASSWORDS
            .lock()
            .unwrap()
            .iter()
            .any(|p| p == password)
    }

    #[tokio::test]
    async fn every_failed_login_checks_a_password_hash() {
        let engine = engine_with_db().await;
        engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

        let wrong_password = engine
            .authenticate(Some("a@x.com"), Some("wrong-for-known-email"))
            .await
            .unwrap_err();
        let unknown_email = engine
            .authenticate(Some("nobody@x.com"), Some("any-for-unknown-email"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, unknown_email);
        assert!(was_verified("wrong-for-known-email"));
        assert!(was_verified("any-for-unknown-email"));
    }
}
