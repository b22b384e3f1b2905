//! Bill service: the persistence-facing operations on monthly records.
//!
//! Wraps a [`BillStorage`] implementation with month-key normalization,
//! save-time validation and new-month drafting.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::backend::domain::commands::bills::{
    DeleteBillCommand, DeleteBillResult, SaveBillCommand, SaveBillResult,
};
use crate::backend::domain::models::bill::{BillValidationError, DomainBillMeta, DomainBillRecord};
use crate::backend::domain::rollover;
use crate::backend::storage::BillStorage;

#[derive(Debug, thiserror::Error)]
pub enum BillServiceError {
    #[error("Month '{0}' not found")]
    NotFound(String),
    #[error("No saved months yet")]
    NoRecords,
    #[error(transparent)]
    Validation(#[from] BillValidationError),
    #[error("Storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for BillServiceError {
    fn from(err: anyhow::Error) -> Self {
        error!("Bill storage failure: {:#}", err);
        BillServiceError::Storage(err)
    }
}

pub type BillServiceResult<T> = Result<T, BillServiceError>;

#[derive(Clone)]
pub struct BillService {
    storage: Arc<dyn BillStorage>,
    default_roster: Vec<String>,
}

impl BillService {
    pub fn new(storage: Arc<dyn BillStorage>, default_roster: Vec<String>) -> Self {
        Self {
            storage,
            default_roster,
        }
    }

    /// Fetch the record for one month
    pub async fn get_bill(&self, month: &str) -> BillServiceResult<DomainBillRecord> {
        let month = normalize_month(month)?;
        info!("Loading bill for '{}'", month);

        self.storage
            .get_bill(&month)
            .await?
            .ok_or(BillServiceError::NotFound(month))
    }

    /// Fetch the most recently saved record
    pub async fn get_latest_bill(&self) -> BillServiceResult<DomainBillRecord> {
        let latest = self.storage.get_latest_bill().await?;
        match &latest {
            Some(record) => info!("Latest bill is '{}'", record.meta.month),
            None => info!("No timestamped bill stored yet"),
        }
        latest.ok_or(BillServiceError::NoRecords)
    }

    /// Meta of every stored month, for the month picker
    pub async fn list_months(&self) -> BillServiceResult<BTreeMap<String, DomainBillMeta>> {
        let months = self.storage.list_months().await?;
        info!("Listed {} stored months", months.len());
        Ok(months)
    }

    /// Validate and store a full record, replacing any previous one
    pub async fn save_bill(&self, command: SaveBillCommand) -> BillServiceResult<SaveBillResult> {
        let mut record = command.record;
        record.meta.month = record.meta.month.trim().to_string();
        for user in &mut record.users {
            user.name = user.name.trim().to_string();
        }

        if let Err(e) = record.validate() {
            warn!("Rejected bill save: {}", e);
            return Err(e.into());
        }

        let stored = self.storage.put_bill(&record).await?;
        let success_message = format!("Bill for {} saved successfully", stored.meta.month);
        info!("{} ({} members)", success_message, stored.users.len());

        Ok(SaveBillResult {
            record: stored,
            success_message,
        })
    }

    /// Remove a month. Deleting a month that was never stored is not an error.
    pub async fn delete_bill(&self, command: DeleteBillCommand) -> BillServiceResult<DeleteBillResult> {
        let month = normalize_month(&command.month)?;
        let deleted = self.storage.delete_bill(&month).await?;

        let success_message = if deleted {
            format!("Bill for {} deleted", month)
        } else {
            format!("No bill stored for {}", month)
        };
        info!("{}", success_message);

        Ok(DeleteBillResult {
            month,
            deleted,
            success_message,
        })
    }

    /// Build an unsaved record for a new month.
    ///
    /// The roster and starting readings come from the latest saved record;
    /// when nothing has been saved yet the default roster is used. Storage
    /// failures are returned, not papered over with the default roster.
    pub async fn draft_new_month(&self, month: &str) -> BillServiceResult<DomainBillRecord> {
        let month = normalize_month(month)?;

        match self.storage.get_latest_bill().await? {
            Some(previous) => {
                info!(
                    "Drafting '{}' from '{}' ({} members)",
                    month,
                    previous.meta.month,
                    previous.users.len()
                );
                Ok(rollover::roll_over(&month, &previous))
            }
            None => {
                info!("Drafting '{}' from the default roster", month);
                Ok(rollover::from_roster(&month, &self.default_roster))
            }
        }
    }
}

fn normalize_month(month: &str) -> Result<String, BillValidationError> {
    let month = month.trim();
    if month.is_empty() {
        return Err(BillValidationError::MissingMonth);
    }
    Ok(month.to_string())
}
