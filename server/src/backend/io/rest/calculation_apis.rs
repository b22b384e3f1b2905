//! # REST API for Charge Calculation
//!
//! The calculator never fails, so the only errors here come from loading a
//! stored month or from an unreadable body.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::backend::io::rest::mappers::BillMapper;
use crate::backend::io::rest::{ApiResult, MonthQuery};
use crate::backend::AppState;
use shared::{BillRecord, BillSummary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/summary", get(get_summary))
}

/// Charges for a record that has not necessarily been saved
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<BillRecord>, JsonRejection>,
) -> ApiResult<BillSummary> {
    let Json(request) = payload?;
    info!("POST /calculate - month: '{}'", request.meta.month);

    let record = BillMapper::to_domain(request);
    let breakdown = state.calculator.calculate(&record);
    Ok(Json(BillMapper::summary_to_dto(record.meta.month, breakdown)))
}

/// Charges for a stored month
pub async fn get_summary(State(state): State<AppState>, Query(query): Query<MonthQuery>) -> ApiResult<BillSummary> {
    info!("GET /summary - month: {:?}", query.month);

    let record = state.bill_service.get_bill(query.month()).await?;
    let breakdown = state.calculator.calculate(&record);
    Ok(Json(BillMapper::summary_to_dto(record.meta.month, breakdown)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{app_state, send};
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn setup_test_app() -> (TestEnvironment, Router) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let state = app_state(env.bill_storage());
        let app = router()
            .merge(crate::backend::io::rest::bill_apis::router())
            .with_state(state);
        (env, app)
    }

    #[tokio::test]
    async fn test_calculate_two_member_bill() {
        let (_env, app) = setup_test_app().await;
        let body = json!({
            "meta": { "month": "MAR", "billAmount": 500, "totalUnit": 50, "extraMoney": 50 },
            "users": [
                { "name": "A", "new": 30, "old": 20, "water": 2 },
                { "name": "B", "new": 35, "old": 25, "water": 3 }
            ]
        });

        let (status, summary) = send(&app, Method::POST, "/calculate", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let summary: BillSummary = serde_json::from_value(summary).unwrap();
        assert_eq!(summary.month, "MAR");
        assert_eq!(summary.rupees_per_unit, 9.0);
        assert_eq!(summary.total_unit_diff, 20.0);
        assert_eq!(summary.unit_for_water, 30.0);
        assert_eq!(summary.water_head_rate, 54.0);
        assert_eq!(summary.members[0].charge, 198);
        assert_eq!(summary.members[1].charge, 252);
        assert_eq!(summary.total_collected, 450);
        assert_eq!(summary.grand_total, 500.0);
        assert_eq!(summary.surplus, 0.0);
    }

    #[tokio::test]
    async fn test_calculate_with_zero_units_does_not_fail() {
        let (_env, app) = setup_test_app().await;
        let body = json!({
            "meta": { "billAmount": 800 },
            "users": [{ "name": "A", "new": 10, "old": 0 }]
        });

        let (status, summary) = send(&app, Method::POST, "/calculate", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["rupeesPerUnit"], json!(0.0));
        assert_eq!(summary["waterHeadRate"], json!(0.0));
        assert_eq!(summary["members"][0]["charge"], json!(0));
        assert_eq!(summary["surplus"], json!(-800.0));
    }

    #[tokio::test]
    async fn test_summary_of_stored_month() {
        let (_env, app) = setup_test_app().await;
        let body = json!({
            "meta": { "month": "JAN", "billAmount": 1000, "totalUnit": 100, "extraMoney": 0 },
            "users": [{ "name": "A", "new": 110, "old": 100, "water": 1 }]
        });
        send(&app, Method::POST, "/save", Some(body)).await;

        let (status, summary) = send(&app, Method::GET, "/summary?month=JAN", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["month"], "JAN");
        assert_eq!(summary["rupeesPerUnit"], json!(10.0));
        assert_eq!(summary["unitForWater"], json!(90.0));
        assert_eq!(summary["waterHeadRate"], json!(900.0));
        assert_eq!(summary["members"][0]["charge"], json!(1000));
        assert_eq!(summary["surplus"], json!(0.0));
    }

    #[tokio::test]
    async fn test_summary_of_unknown_month() {
        let (_env, app) = setup_test_app().await;

        let (status, _) = send(&app, Method::GET, "/summary?month=DEC", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/summary", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
