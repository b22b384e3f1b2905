//! # Domain Module
//!
//! Contains the business logic for splitting a household electricity bill.
//!
//! Nothing in here knows about HTTP or about the on-disk format. Services
//! receive domain types, talk to storage through the [`BillStorage`] trait
//! and hand domain types back to the IO layer.
//!
//! ## Module Organization
//!
//! - **models**: Bill records, member readings and save-time validation
//! - **calculator**: Per-member charge allocation and reconciliation figures
//! - **rollover**: Drafting a new month from the previous one
//! - **bill_service**: Load, list, save and delete monthly records
//! - **edit_access_service**: Password check guarding edit mode
//! - **session**: In-memory view/edit state for one open record
//! - **commands**: Service input and result types
//!
//! ## Business Rules
//!
//! - A record is identified by its month key; saving replaces it wholesale
//! - Every save gets a timestamp strictly greater than any stored one
//! - The "latest" record is the one with the greatest timestamp
//! - Charges are whole currency units; the surplus shows any rounding drift
//!
//! [`BillStorage`]: crate::backend::storage::BillStorage

pub mod bill_service;
pub mod calculator;
pub mod commands;
pub mod edit_access_service;
pub mod models;
pub mod rollover;
pub mod session;

pub use bill_service::{BillService, BillServiceError, BillServiceResult};
pub use calculator::{BillBreakdown, BillCalculator, MemberAllocation};
pub use edit_access_service::{EditAccessService, EditAuthorizer, SharedPasswordAuthorizer};
pub use session::{MemberField, MetaField, SessionError, SessionState};
