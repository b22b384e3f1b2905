use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use tracing::info;

use crate::backend::domain::commands::edit_access::UnlockEditCommand;
use crate::backend::io::rest::{ApiError, ApiResult};
use crate::backend::AppState;
use shared::{UnlockEditRequest, UnlockEditResponse};

/// Create the edit access API router
pub fn router() -> Router<AppState> {
    Router::new().route("/unlock", post(unlock_edit))
}

/// Check the edit password. A wrong password is a normal answer, not an error.
pub async fn unlock_edit(
    State(state): State<AppState>,
    payload: Result<Json<UnlockEditRequest>, JsonRejection>,
) -> ApiResult<UnlockEditResponse> {
    let Json(request) = payload?;
    info!("POST /unlock");

    if request.password.trim().is_empty() {
        return Err(ApiError::bad_request("Password cannot be empty"));
    }

    let result = state.edit_access_service.unlock(UnlockEditCommand {
        password: request.password,
    });

    Ok(Json(UnlockEditResponse {
        success: result.success,
        message: result.message,
    }))
}
