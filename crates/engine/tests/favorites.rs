use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{CatalogKind, Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .token_secret("test-secret")
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn count_rows(db: &DatabaseConnection, table: &str, user_id: i32) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table} WHERE user_id = ?"),
            vec![user_id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn adding_twice_keeps_a_single_row() {
    let (engine, db) = engine_with_db().await;
    let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

    let first = engine
        .add_favorite(Some(user), CatalogKind::Planet, 1)
        .await
        .unwrap();
    let second = engine
        .add_favorite(Some(user), CatalogKind::Planet, 1)
        .await
        .unwrap();

    assert_eq!(first, "Tatooine");
    assert_eq!(second, "Tatooine");
    assert_eq!(count_rows(&db, "favorite_planets", user).await, 1);
}

#[tokio::test]
async fn add_then_remove_restores_previous_set() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();
    engine
        .add_favorite(Some(user), CatalogKind::Person, 2)
        .await
        .unwrap();
    let before = engine.user_favorites(user).await.unwrap();

    engine
        .add_favorite(Some(user), CatalogKind::Person, 1)
        .await
        .unwrap();
    let removed = engine
        .remove_favorite(Some(user), CatalogKind::Person, 1)
        .await
        .unwrap();

    assert_eq!(removed, "Luke Skywalker");
    assert_eq!(engine.user_favorites(user).await.unwrap(), before);
}

#[tokio::test]
async fn removing_a_non_favorite_is_an_error() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

    let err = engine
        .remove_favorite(Some(user), CatalogKind::Planet, 3)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::NotFavorited("Planet not in user's favorites".to_string())
    );
}

#[tokio::test]
async fn missing_user_id_is_a_validation_error() {
    let (engine, _db) = engine_with_db().await;

    let add = engine
        .add_favorite(None, CatalogKind::Planet, 1)
        .await
        .unwrap_err();
    let remove = engine
        .remove_favorite(None, CatalogKind::Person, 1)
        .await
        .unwrap_err();

    let expected = EngineError::Validation("User ID is required".to_string());
    assert_eq!(add, expected);
    assert_eq!(remove, expected);
}

#[tokio::test]
async fn user_is_checked_before_entity() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .add_favorite(Some(42), CatalogKind::Planet, 999)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("User not found".to_string()));

    let err = engine
        .remove_favorite(Some(42), CatalogKind::Vehicle, 999)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
    let (engine, db) = engine_with_db().await;
    let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();

    let err = engine
        .add_favorite(Some(user), CatalogKind::Planet, 999)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("Planet not found".to_string()));

    let err = engine
        .remove_favorite(Some(user), CatalogKind::Person, 999)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("Person not found".to_string()));

    assert_eq!(count_rows(&db, "favorite_planets", user).await, 0);
}

#[tokio::test]
async fn favorite_sets_are_independent_per_kind_and_user() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();
    let bob = engine.register(Some("b@x.com"), Some("pw2")).await.unwrap();

    engine
        .add_favorite(Some(alice), CatalogKind::Person, 1)
        .await
        .unwrap();
    engine
        .add_favorite(Some(alice), CatalogKind::Planet, 1)
        .await
        .unwrap();
    engine
        .add_favorite(Some(alice), CatalogKind::Vehicle, 4)
        .await
        .unwrap();
    engine
        .add_favorite(Some(bob), CatalogKind::Planet, 2)
        .await
        .unwrap();

    let favorites = engine.user_favorites(alice).await.unwrap();
    let names = |v: &[engine::Person]| v.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&favorites.people), vec!["Luke Skywalker"]);
    assert_eq!(favorites.planets.len(), 1);
    assert_eq!(favorites.planets[0].name, "Tatooine");
    assert_eq!(favorites.vehicles.len(), 1);
    assert_eq!(favorites.vehicles[0].name, "TIE/LN starfighter");

    let bob_favorites = engine.user_favorites(bob).await.unwrap();
    assert!(bob_favorites.people.is_empty());
    assert_eq!(bob_favorites.planets[0].name, "Alderaan");

    // A planet favorite does not make the same id a person favorite.
    let err = engine
        .remove_favorite(Some(bob), CatalogKind::Person, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFavorited(_)));
}

#[tokio::test]
async fn favorites_of_unknown_user_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.user_favorites(7).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}

#[tokio::test]
async fn users_with_favorites_lists_plain_users() {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register(Some("a@x.com"), Some("pw1")).await.unwrap();
    engine
        .add_favorite(Some(user), CatalogKind::Planet, 1)
        .await
        .unwrap();

    let users = engine.users_with_favorites().await.unwrap();
    assert_eq!(users, engine.users().await.unwrap());
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "a@x.com");
}
