use axum::{extract::State, Json};
use tracing::debug;

use crate::{error::AppError, models::Ubicacion, state::AppState};

/// Return every stored location as-is; coordinate clean-up is left to clients
pub async fn list_ubicaciones(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ubicacion>>, AppError> {
    let ubicaciones = state.store.list_ubicaciones().await?;
    debug!("Returning {} ubicaciones", ubicaciones.len());
    Ok(Json(ubicaciones))
}
