//! Favorite sets: one `(user, entity)` membership table per catalog kind.
//!
//! A pair is either absent or present. Adding a present pair leaves it
//! present (no duplicate row); removing an absent pair is an error.

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Person, Planet, ResultEngine, Vehicle, favorite_people, favorite_planets,
    favorite_vehicles, people, planets, users, vehicles,
};

use super::{CatalogKind, Engine, with_tx};

const USER_ID_REQUIRED: &str = "User ID is required";

/// The expanded favorites of one user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Favorites {
    pub people: Vec<Person>,
    pub planets: Vec<Planet>,
    pub vehicles: Vec<Vehicle>,
}

/// Generates the add/remove/list operations for one favorite join table.
macro_rules! impl_favorite_set {
    (
        $add_fn:ident,
        $insert_fn:ident,
        $remove_fn:ident,
        $list_fn:ident,
        $find_target:ident,
        $join:ident,
        $target:ident,
        $target_col:ident,
        $model:ty,
        $kind:expr
    ) => {
        async fn $add_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: i32,
            target_id: i32,
        ) -> ResultEngine<String> {
            let target = self.$find_target(db, target_id).await?;

            let present = $join::Entity::find_by_id((user_id, target_id))
                .one(db)
                .await?
                .is_some();
            if !present {
                self.$insert_fn(db, user_id, target_id).await?;
            }

            Ok(target.name)
        }

        async fn $insert_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: i32,
            target_id: i32,
        ) -> ResultEngine<()> {
            let inserted = $join::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                $target_col: ActiveValue::Set(target_id),
            }
            .insert(db)
            .await;

            match inserted {
                Ok(_) => Ok(()),
                Err(err) => {
                    // A concurrent add of the same pair got there first.
                    let present = $join::Entity::find_by_id((user_id, target_id))
                        .one(db)
                        .await?
                        .is_some();
                    if present { Ok(()) } else { Err(err.into()) }
                }
            }
        }

        async fn $remove_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: i32,
            target_id: i32,
        ) -> ResultEngine<String> {
            let target = self.$find_target(db, target_id).await?;

            let removed = $join::Entity::delete_by_id((user_id, target_id))
                .exec(db)
                .await?
                .rows_affected;
            if removed == 0 {
                return Err(EngineError::NotFavorited(format!(
                    "{} not in user's favorites",
                    $kind.label()
                )));
            }

            Ok(target.name)
        }

        async fn $list_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: i32,
        ) -> ResultEngine<Vec<$model>> {
            let ids: Vec<i32> = $join::Entity::find()
                .filter($join::Column::UserId.eq(user_id))
                .all(db)
                .await?
                .into_iter()
                .map(|row| row.$target_col)
                .collect();

            $target::Entity::find()
                .filter($target::Column::Id.is_in(ids))
                .order_by_asc($target::Column::Id)
                .all(db)
                .await
                .map_err(Into::into)
        }
    };
}

impl Engine {
    impl_favorite_set!(
        add_person,
        insert_person_favorite,
        remove_person,
        favorite_people_of,
        find_person,
        favorite_people,
        people,
        person_id,
        Person,
        CatalogKind::Person
    );

    impl_favorite_set!(
        add_planet,
        insert_planet_favorite,
        remove_planet,
        favorite_planets_of,
        find_planet,
        favorite_planets,
        planets,
        planet_id,
        Planet,
        CatalogKind::Planet
    );

    impl_favorite_set!(
        add_vehicle,
        insert_vehicle_favorite,
        remove_vehicle,
        favorite_vehicles_of,
        find_vehicle,
        favorite_vehicles,
        vehicles,
        vehicle_id,
        Vehicle,
        CatalogKind::Vehicle
    );

    async fn require_user(&self, db: &DatabaseTransaction, user_id: i32) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(user_id).one(db).await?.is_some();
        if !exists {
            return Err(EngineError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Adds `target_id` to the user's favorites of `kind` and returns the
    /// entity name.
    ///
    /// The user is looked up before the entity, so when both are missing the
    /// error is about the user. Adding an existing favorite succeeds without
    /// creating a second row.
    pub async fn add_favorite(
        &self,
        user_id: Option<i32>,
        kind: CatalogKind,
        target_id: i32,
    ) -> ResultEngine<String> {
        let user_id =
            user_id.ok_or_else(|| EngineError::Validation(USER_ID_REQUIRED.to_string()))?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            match kind {
                CatalogKind::Person => self.add_person(&db_tx, user_id, target_id).await,
                CatalogKind::Planet => self.add_planet(&db_tx, user_id, target_id).await,
                CatalogKind::Vehicle => self.add_vehicle(&db_tx, user_id, target_id).await,
            }
        })
    }

    /// Removes `target_id` from the user's favorites of `kind` and returns
    /// the entity name.
    ///
    /// Same validation order as [`Engine::add_favorite`]; fails with
    /// [`EngineError::NotFavorited`] when the pair is absent.
    pub async fn remove_favorite(
        &self,
        user_id: Option<i32>,
        kind: CatalogKind,
        target_id: i32,
    ) -> ResultEngine<String> {
        let user_id =
            user_id.ok_or_else(|| EngineError::Validation(USER_ID_REQUIRED.to_string()))?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            match kind {
                CatalogKind::Person => self.remove_person(&db_tx, user_id, target_id).await,
                CatalogKind::Planet => self.remove_planet(&db_tx, user_id, target_id).await,
                CatalogKind::Vehicle => self.remove_vehicle(&db_tx, user_id, target_id).await,
            }
        })
    }

    /// The favorites of a single user, expanded.
    pub async fn user_favorites(&self, user_id: i32) -> ResultEngine<Favorites> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            Ok::<_, EngineError>(Favorites {
                people: self.favorite_people_of(&db_tx, user_id).await?,
                planets: self.favorite_planets_of(&db_tx, user_id).await?,
                vehicles: self.favorite_vehicles_of(&db_tx, user_id).await?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;

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

    #[tokio::test]
    async fn inserting_an_existing_pair_is_accepted() {
        let engine = engine_with_db().await;
        let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

        let db_tx = engine.database.begin().await.unwrap();
        engine.insert_planet_favorite(&db_tx, user, 1).await.unwrap();
        engine.insert_planet_favorite(&db_tx, user, 1).await.unwrap();
        db_tx.commit().await.unwrap();

        let favorites = engine.user_favorites(user).await.unwrap();
        assert_eq!(favorites.planets.len(), 1);
        assert_eq!(favorites.planets[0].name, "Tatooine");
    }

    #[tokio::test]
    async fn insert_failure_for_a_missing_pair_is_reported() {
        let engine = engine_with_db().await;
        let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

        let db_tx = engine.database.begin().await.unwrap();
        let err = engine
            .insert_vehicle_favorite(&db_tx, user + 100, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Database(_)));
    }
}
