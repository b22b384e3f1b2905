//! # REST API for Monthly Bill Records
//!
//! Load, list, save and delete months, plus drafting a new month.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use tracing::info;

use crate::backend::domain::commands::bills::{DeleteBillCommand, SaveBillCommand};
use crate::backend::io::rest::mappers::BillMapper;
use crate::backend::io::rest::{ApiResult, MonthQuery};
use crate::backend::AppState;
use shared::{AllMonthsResponse, BillRecord, DeleteBillResponse, SaveBillResponse};

/// Create a router for bill record APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(get_bill))
        .route("/latest", get(get_latest_bill))
        .route("/all-months", get(list_months))
        .route("/save", post(save_bill))
        .route("/delete", delete(delete_bill))
        .route("/new-month", get(draft_new_month))
}

/// Get the record stored under one month
pub async fn get_bill(State(state): State<AppState>, Query(query): Query<MonthQuery>) -> ApiResult<BillRecord> {
    info!("GET /data - month: {:?}", query.month);

    let record = state.bill_service.get_bill(query.month()).await?;
    Ok(Json(BillMapper::to_dto(record)))
}

/// Get the most recently saved record
pub async fn get_latest_bill(State(state): State<AppState>) -> ApiResult<BillRecord> {
    info!("GET /latest");

    let record = state.bill_service.get_latest_bill().await?;
    Ok(Json(BillMapper::to_dto(record)))
}

/// Meta of every stored month
pub async fn list_months(State(state): State<AppState>) -> ApiResult<AllMonthsResponse> {
    info!("GET /all-months");

    let months = state.bill_service.list_months().await?;
    Ok(Json(BillMapper::months_to_dto(months)))
}

/// Store a full record; the server assigns the timestamp
pub async fn save_bill(
    State(state): State<AppState>,
    payload: Result<Json<BillRecord>, JsonRejection>,
) -> ApiResult<SaveBillResponse> {
    let Json(request) = payload?;
    info!(
        "POST /save - month: '{}', {} members",
        request.meta.month,
        request.users.len()
    );

    let command = SaveBillCommand {
        record: BillMapper::to_domain(request),
    };
    let result = state.bill_service.save_bill(command).await?;
    Ok(Json(BillMapper::to_save_response(result)))
}

/// Delete one month
pub async fn delete_bill(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<DeleteBillResponse> {
    info!("DELETE /delete - month: {:?}", query.month);

    let command = DeleteBillCommand {
        month: query.month().to_string(),
    };
    let result = state.bill_service.delete_bill(command).await?;
    Ok(Json(BillMapper::to_delete_response(result)))
}

/// Unsaved draft for a new month
pub async fn draft_new_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<BillRecord> {
    info!("GET /new-month - month: {:?}", query.month);

    let draft = state.bill_service.draft_new_month(query.month()).await?;
    Ok(Json(BillMapper::to_dto(draft)))
}
