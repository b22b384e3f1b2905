//! # Storage Traits
//!
//! This module defines the storage abstraction the domain layer depends on,
//! so the bill store can be a JSON file today and a document database
//! tomorrow without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::backend::domain::models::bill::{DomainBillMeta, DomainBillRecord};

/// Trait defining the interface for monthly bill storage operations
///
/// Records are keyed by month. Every write replaces the whole record; there
/// are no partial updates and no concurrency control beyond last-writer-wins.
#[async_trait]
pub trait BillStorage: Send + Sync {
    /// Retrieve the record stored under `month`
    async fn get_bill(&self, month: &str) -> Result<Option<DomainBillRecord>>;

    /// Retrieve the record with the greatest save timestamp.
    /// Records that were never timestamped are not candidates.
    async fn get_latest_bill(&self) -> Result<Option<DomainBillRecord>>;

    /// Meta of every stored month, ordered by month key
    async fn list_months(&self) -> Result<BTreeMap<String, DomainBillMeta>>;

    /// Store `record` under its month, replacing any previous record.
    /// Assigns a save timestamp greater than any existing one and returns
    /// the record as stored.
    async fn put_bill(&self, record: &DomainBillRecord) -> Result<DomainBillRecord>;

    /// Remove the record stored under `month`.
    /// Returns true if a record was found and deleted, false otherwise
    async fn delete_bill(&self, month: &str) -> Result<bool>;
}
