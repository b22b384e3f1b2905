//! # REST API Interface Layer
//!
//! HTTP endpoints for the bill splitter. Handlers only translate: query
//! strings and JSON bodies become domain commands, domain results become the
//! DTOs from the `shared` crate, and domain errors become status codes.
//!
//! ## Endpoints
//!
//! - `GET /data?month=` one stored month
//! - `GET /latest` the most recently saved month
//! - `GET /all-months` meta of every stored month
//! - `POST /save` store a full record
//! - `DELETE /delete?month=` remove a month
//! - `GET /new-month?month=` unsaved draft seeded from the latest month
//! - `POST /calculate` charges for a posted record
//! - `GET /summary?month=` charges for a stored month
//! - `POST /unlock` check the edit password

pub mod bill_apis;
pub mod calculation_apis;
pub mod edit_access_apis;
pub mod error;
pub mod mappers;

pub use error::{ApiError, ApiResult};

use serde::Deserialize;

/// Query string carrying a month key. Absent and blank are both rejected by
/// the bill service.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    pub fn month(&self) -> &str {
        self.month.as_deref().unwrap_or_default()
    }
}
