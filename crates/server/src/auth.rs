//! Signup, login and the token-protected `/private` endpoint.

use api_types::auth::{Credentials, LoginResponse, PrivateResponse, SignupResponse};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::Identity;

use crate::{ServerError, server::ServerState};

/// A missing or unreadable body is treated like a body with no fields, so
/// the client gets the usual "required" message.
fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Credentials {
    match payload {
        Ok(Json(credentials)) => credentials,
        Err(rejection) => {
            tracing::debug!("unreadable credentials body: {rejection}");
            Credentials::default()
        }
    }
}

pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ServerError> {
    let payload = credentials(payload);
    let id = state
        .engine
        .register(payload.email.as_deref(), payload.password.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id,
            message: "User created successfully".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
    let payload = credentials(payload);
    let access_token = state
        .engine
        .authenticate(payload.email.as_deref(), payload.password.as_deref())
        .await?;

    Ok(Json(LoginResponse { access_token }))
}

pub async fn private(Extension(identity): Extension<Identity>) -> Json<PrivateResponse> {
    let message = format!("Welcome, {}!", identity.email);
    Json(PrivateResponse {
        email: identity.email,
        message,
    })
}
