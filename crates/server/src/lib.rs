use api_types::Message;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod auth;
mod catalog;
mod favorites;
mod server;
mod user;

pub enum ServerError {
    Engine(EngineError),
    /// Malformed request input that never reaches the engine.
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) | EngineError::Conflict(_) => StatusCode::BAD_REQUEST,
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::NotFound(_) | EngineError::NotFavorited(_) => StatusCode::NOT_FOUND,
        EngineError::Credentials(_)
        | EngineError::Configuration(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        err @ (EngineError::Credentials(_) | EngineError::Configuration(_)) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Message { message })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: EngineError) -> StatusCode {
        ServerError::from(err).into_response().status()
    }

    #[test]
    fn validation_and_conflict_map_to_400() {
        assert_eq!(
            status_of(EngineError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::Conflict("x".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(
            status_of(EngineError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn not_found_and_not_favorited_map_to_404() {
        assert_eq!(
            status_of(EngineError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EngineError::NotFavorited("x".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn backend_failures_map_to_500() {
        assert_eq!(
            status_of(EngineError::Credentials("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(EngineError::Database(sea_orm::DbErr::Custom(
                "boom".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_hidden() {
        let message = message_for_engine_error(EngineError::Credentials("salt".to_string()));
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
