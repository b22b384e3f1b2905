//! Test utilities for storage-backed tests
//!
//! Every environment lives in its own temporary directory that is removed
//! when the environment is dropped, even if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::bill_repository::BillRepository;
use super::connection::JsonConnection;
use crate::backend::storage::traits::BillStorage;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("bill_splitter_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn bill_repository(&self) -> BillRepository {
        BillRepository::new(self.connection.clone())
    }

    pub fn bill_storage(&self) -> Arc<dyn BillStorage> {
        Arc::new(self.bill_repository())
    }

    /// Seed the store with raw file content
    pub fn write_bills_file(&self, content: &str) {
        std::fs::write(self.connection.bills_file_path(), content).expect("Failed to seed bills file");
    }
}
