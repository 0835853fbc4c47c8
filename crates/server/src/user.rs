//! User listings.

use api_types::{favorite::FavoritesView, user::UserView};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::User;

use crate::{
    ServerError,
    catalog::{person_view, planet_view, vehicle_view},
    server::ServerState,
};

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        is_active: user.is_active,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.users().await?;
    Ok(Json(users.into_iter().map(user_view).collect()))
}

/// `/users/favorites` answers with the plain user list; per-user favorites
/// are served by [`favorites`].
pub async fn with_favorites(
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.users_with_favorites().await?;
    Ok(Json(users.into_iter().map(user_view).collect()))
}

pub async fn favorites(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<FavoritesView>, ServerError> {
    let favorites = state.engine.user_favorites(id).await?;
    Ok(Json(FavoritesView {
        people: favorites.people.into_iter().map(person_view).collect(),
        planets: favorites.planets.into_iter().map(planet_view).collect(),
        vehicles: favorites.vehicles.into_iter().map(vehicle_view).collect(),
    }))
}
