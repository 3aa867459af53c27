use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::{NuevoUsuario, Usuario},
    state::AppState,
};

/// Return every stored user
pub async fn list_usuarios(
    State(state): State<AppState>,
) -> Result<Json<Vec<Usuario>>, AppError> {
    let usuarios = state.store.list_usuarios().await?;
    debug!("Returning {} usuarios", usuarios.len());
    Ok(Json(usuarios))
}

/// Validate the body, persist it and echo back the stored record.
///
/// A body that is not JSON at all is reported through `AppError` like any
/// other failure.
pub async fn create_usuario(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Usuario>), AppError> {
    let Json(body) = body.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

    let nuevo = NuevoUsuario::from_json(&body)?;
    let usuario = state.store.insert_usuario(nuevo).await?;

    info!("Created usuario {} (User_id {})", usuario.id, usuario.user_id);
    Ok((StatusCode::CREATED, Json(usuario)))
}
