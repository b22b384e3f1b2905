use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod lenient;

/// Month-level bill information, keyed uniquely by `month`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillMeta {
    /// Month key, e.g. "MAR-2025". Empty when the client omitted it.
    #[serde(default)]
    pub month: String,
    /// Total amount owed on the electricity bill
    #[serde(default, deserialize_with = "lenient::number")]
    pub bill_amount: f64,
    /// Total electricity units billed
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_unit: f64,
    /// Credit or adjustment already in hand, may be 0
    #[serde(default, deserialize_with = "lenient::number")]
    pub extra_money: f64,
    /// Save time in epoch milliseconds, assigned by the server
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::timestamp"
    )]
    pub timestamp: Option<i64>,
}

/// One household member's meter readings for a month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberReading {
    #[serde(default)]
    pub name: String,
    /// Current meter reading
    #[serde(rename = "new", default, deserialize_with = "lenient::number")]
    pub new_reading: f64,
    /// Previous meter reading
    #[serde(rename = "old", default, deserialize_with = "lenient::number")]
    pub old_reading: f64,
    /// Water-usage weight, fractional values allowed
    #[serde(default, deserialize_with = "lenient::number")]
    pub water: f64,
}

/// A stored month: meta plus the ordered member readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    #[serde(default)]
    pub meta: BillMeta,
    #[serde(default)]
    pub users: Vec<MemberReading>,
}

/// Response for GET /all-months: month key to meta, ordered by key
pub type AllMonthsResponse = BTreeMap<String, BillMeta>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBillResponse {
    pub month: String,
    pub timestamp: i64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBillResponse {
    pub month: String,
    /// False when there was nothing stored under the month
    pub deleted: bool,
    pub success_message: String,
}

/// Charge computed for a single member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCharge {
    pub index: usize,
    pub name: String,
    pub unit_diff: f64,
    /// Whole-currency charge, no sub-units
    pub charge: i64,
}

/// Derived figures for one bill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub month: String,
    pub rupees_per_unit: f64,
    pub total_unit_diff: f64,
    pub total_water_weight: f64,
    pub unit_for_water: f64,
    pub water_head_rate: f64,
    pub members: Vec<MemberCharge>,
    /// Sum of member charges
    pub total_collected: i64,
    /// Member charges plus extra money
    pub grand_total: f64,
    /// Grand total minus bill amount; nonzero means drift or a data error
    pub surplus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockEditRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockEditResponse {
    pub success: bool,
    pub message: String,
}

/// Body of every non-2xx JSON response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
