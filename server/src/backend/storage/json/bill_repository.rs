//! # JSON Bill Repository
//!
//! Keeps every month's record in `bills.json`, a single JSON object keyed by
//! month. Each write rewrites the whole document through a temp file and an
//! atomic rename. Read-modify-write cycles are serialized inside the process
//! so that saving two different months concurrently keeps both.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::connection::JsonConnection;
use crate::backend::domain::models::bill::{DomainBillMeta, DomainBillRecord, DomainMemberReading};
use crate::backend::storage::traits::BillStorage;

/// On-disk shape of a month's meta
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaDocument {
    #[serde(default)]
    month: String,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    bill_amount: f64,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    total_unit: f64,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    extra_money: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "shared::lenient::timestamp"
    )]
    timestamp: Option<i64>,
}

/// On-disk shape of a member row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemberDocument {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    new: f64,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    old: f64,
    #[serde(default, deserialize_with = "shared::lenient::number")]
    water: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BillDocument {
    #[serde(default)]
    meta: MetaDocument,
    #[serde(default)]
    users: Vec<MemberDocument>,
}

impl From<&DomainBillRecord> for BillDocument {
    fn from(record: &DomainBillRecord) -> Self {
        BillDocument {
            meta: MetaDocument {
                month: record.meta.month.clone(),
                bill_amount: record.meta.bill_amount,
                total_unit: record.meta.total_unit,
                extra_money: record.meta.extra_money,
                timestamp: record.meta.timestamp,
            },
            users: record
                .users
                .iter()
                .map(|u| MemberDocument {
                    name: u.name.clone(),
                    new: u.new_reading,
                    old: u.old_reading,
                    water: u.water,
                })
                .collect(),
        }
    }
}

impl BillDocument {
    /// The map key is authoritative for the month, whatever the meta says
    fn into_domain(self, month: &str) -> DomainBillRecord {
        DomainBillRecord {
            meta: meta_into_domain(self.meta, month),
            users: self
                .users
                .into_iter()
                .map(|u| DomainMemberReading {
                    name: u.name,
                    new_reading: u.new,
                    old_reading: u.old,
                    water: u.water,
                })
                .collect(),
        }
    }
}

fn meta_into_domain(meta: MetaDocument, month: &str) -> DomainBillMeta {
    DomainBillMeta {
        month: month.to_string(),
        bill_amount: meta.bill_amount,
        total_unit: meta.total_unit,
        extra_money: meta.extra_money,
        timestamp: meta.timestamp,
    }
}

type BillDocuments = BTreeMap<String, BillDocument>;

/// JSON-file-backed bill repository
#[derive(Clone)]
pub struct BillRepository {
    connection: JsonConnection,
    write_lock: Arc<Mutex<()>>,
}

impl BillRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the whole store; a missing or empty file is an empty store
    async fn read_documents(&self) -> Result<BillDocuments> {
        let path = self.connection.bills_file_path();

        let exists = fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check bills file {}", path.display()))?;
        if !exists {
            debug!("Bills file {:?} does not exist yet", path);
            return Ok(BillDocuments::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read bills file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(BillDocuments::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse bills file {}", path.display()))
    }

    /// Replace the whole store atomically
    async fn write_documents(&self, documents: &BillDocuments) -> Result<()> {
        let path = self.connection.bills_file_path();
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(self.connection.base_directory())
            .await
            .context("Failed to create data directory")?;

        let content = serde_json::to_string_pretty(documents)?;
        fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} bill records to {:?}", documents.len(), path);
        Ok(())
    }

    /// Next save timestamp: now, unless the clock has not moved past the newest record
    fn next_timestamp(documents: &BillDocuments) -> i64 {
        let now = Utc::now().timestamp_millis();
        match documents.values().filter_map(|d| d.meta.timestamp).max() {
            Some(latest) if latest >= now => latest + 1,
            _ => now,
        }
    }
}

#[async_trait]
impl BillStorage for BillRepository {
    async fn get_bill(&self, month: &str) -> Result<Option<DomainBillRecord>> {
        let mut documents = self.read_documents().await?;
        Ok(documents.remove(month).map(|doc| doc.into_domain(month)))
    }

    async fn get_latest_bill(&self) -> Result<Option<DomainBillRecord>> {
        let documents = self.read_documents().await?;

        let latest = documents
            .into_iter()
            .filter_map(|(month, doc)| doc.meta.timestamp.map(|ts| (ts, month, doc)))
            .max_by_key(|(ts, _, _)| *ts);

        Ok(latest.map(|(_, month, doc)| doc.into_domain(&month)))
    }

    async fn list_months(&self) -> Result<BTreeMap<String, DomainBillMeta>> {
        let documents = self.read_documents().await?;

        Ok(documents
            .into_iter()
            .map(|(month, doc)| {
                let meta = meta_into_domain(doc.meta, &month);
                (month, meta)
            })
            .collect())
    }

    async fn put_bill(&self, record: &DomainBillRecord) -> Result<DomainBillRecord> {
        let month = record.month().trim().to_string();
        if month.is_empty() {
            bail!("Cannot store a bill without a month");
        }

        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;

        let mut stored = record.clone();
        stored.meta.month = month.clone();
        stored.meta.timestamp = Some(Self::next_timestamp(&documents));

        documents.insert(month.clone(), BillDocument::from(&stored));
        self.write_documents(&documents).await?;

        info!(
            "Stored bill for '{}' with {} members (timestamp {:?})",
            month,
            stored.users.len(),
            stored.meta.timestamp
        );
        Ok(stored)
    }

    async fn delete_bill(&self, month: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;

        if documents.remove(month).is_none() {
            debug!("No bill stored for '{}', nothing to delete", month);
            return Ok(false);
        }

        self.write_documents(&documents).await?;
        info!("Deleted bill for '{}'", month);
        Ok(true)
    }
}
