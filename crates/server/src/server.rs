use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{ServerError, auth, catalog, favorites, user};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Rejects the request unless it carries a valid `Authorization: Bearer`
/// token. The verified [`engine::Identity`] is stored in the request
/// extensions.
async fn require_bearer(
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(EngineError::Unauthorized("Missing bearer token".to_string()).into());
    };

    let identity = state.engine.verify_token(bearer.token())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/private", get(auth::private))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/people", get(catalog::people))
        .route("/people/{id}", get(catalog::person))
        .route("/planets", get(catalog::planets))
        .route("/planets/{id}", get(catalog::planet))
        .route("/vehicles", get(catalog::vehicles))
        .route("/vehicles/{id}", get(catalog::vehicle))
        .route("/users", get(user::list))
        .route("/users/favorites", get(user::with_favorites))
        .route("/users/{id}/favorites", get(user::favorites))
        .route(
            "/favorite/people/{id}",
            post(favorites::add_person).delete(favorites::remove_person),
        )
        .route(
            "/favorite/planet/{id}",
            post(favorites::add_planet).delete(favorites::remove_planet),
        )
        .route(
            "/favorite/vehicle/{id}",
            post(favorites::add_vehicle).delete(favorites::remove_vehicle),
        )
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
