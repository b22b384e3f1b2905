//! Seeding a new month from the previous one.
//!
//! The new month copies the roster of the most recently saved record, in the
//! same order, and starts every member's `old` reading at last month's `new`
//! reading for the member at the same position. Matching is positional: if
//! the roster was reordered last month, readings follow the positions, not
//! the names.

use crate::backend::domain::models::bill::{DomainBillMeta, DomainBillRecord, DomainMemberReading};

/// Roster used when no month has been saved yet
pub const DEFAULT_ROSTER: [&str; 7] = ["SHUBHAM", "KUNAL", "RUPAM", "SABIR", "SAMIR", "SUDIP", "ANGSHU"];

pub fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect()
}

/// Build an unsaved record for `month` carried over from `previous`
pub fn roll_over(month: &str, previous: &DomainBillRecord) -> DomainBillRecord {
    let users = previous
        .users
        .iter()
        .map(|user| DomainMemberReading {
            name: user.name.clone(),
            new_reading: 0.0,
            old_reading: user.new_reading,
            water: 0.0,
        })
        .collect();

    DomainBillRecord {
        meta: empty_meta(month),
        users,
    }
}

/// Build an unsaved record for `month` with zeroed readings for each name
pub fn from_roster(month: &str, roster: &[String]) -> DomainBillRecord {
    DomainBillRecord {
        meta: empty_meta(month),
        users: roster
            .iter()
            .map(|name| DomainMemberReading::new(name.clone(), 0.0, 0.0, 0.0))
            .collect(),
    }
}

fn empty_meta(month: &str) -> DomainBillMeta {
    DomainBillMeta {
        month: month.trim().to_string(),
        bill_amount: 0.0,
        total_unit: 0.0,
        extra_money: 0.0,
        timestamp: None,
    }
}
