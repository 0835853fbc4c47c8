//! `POST`/`DELETE /favorite/<kind>/{id}?user_id=`.

use api_types::{Message, favorite::FavoriteQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::CatalogKind;

use crate::{ServerError, server::ServerState};

/// `None` when `user_id` is absent or blank; the engine turns that into a
/// validation error.
fn parse_user_id(query: &FavoriteQuery) -> Result<Option<i32>, ServerError> {
    match query.user_id.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::Generic("User ID must be an integer".to_string())),
    }
}

async fn add(
    state: ServerState,
    query: FavoriteQuery,
    kind: CatalogKind,
    id: i32,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    let user_id = parse_user_id(&query)?;
    let name = state.engine.add_favorite(user_id, kind, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(Message::new(format!(
            "{} {name} added to favorites.",
            kind.label()
        ))),
    ))
}

async fn remove(
    state: ServerState,
    query: FavoriteQuery,
    kind: CatalogKind,
    id: i32,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    let user_id = parse_user_id(&query)?;
    let name = state.engine.remove_favorite(user_id, kind, id).await?;
    Ok((
        StatusCode::OK,
        Json(Message::new(format!(
            "{} {name} removed from favorites.",
            kind.label()
        ))),
    ))
}

macro_rules! favorite_handlers {
    ($add_fn:ident, $remove_fn:ident, $kind:expr) => {
        pub async fn $add_fn(
            State(state): State<ServerState>,
            Path(id): Path<i32>,
            Query(query): Query<FavoriteQuery>,
        ) -> Result<(StatusCode, Json<Message>), ServerError> {
            add(state, query, $kind, id).await
        }

        pub async fn $remove_fn(
            State(state): State<ServerState>,
            Path(id): Path<i32>,
            Query(query): Query<FavoriteQuery>,
        ) -> Result<(StatusCode, Json<Message>), ServerError> {
            remove(state, query, $kind, id).await
        }
    };
}

favorite_handlers!(add_person, remove_person, CatalogKind::Person);
favorite_handlers!(add_planet, remove_planet, CatalogKind::Planet);
favorite_handlers!(add_vehicle, remove_vehicle, CatalogKind::Vehicle);
