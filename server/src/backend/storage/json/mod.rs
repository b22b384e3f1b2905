//! # JSON Storage Module
//!
//! File-based storage for bill records.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── bills.json    ← month key → { meta, users }
//! ```
//!
//! ## Format
//!
//! ```json
//! {
//!   "MAR": {
//!     "meta": { "month": "MAR", "billAmount": 500, "totalUnit": 50, "extraMoney": 50, "timestamp": 1710000000000 },
//!     "users": [ { "name": "SHUBHAM", "new": 30, "old": 20, "water": 2 } ]
//!   }
//! }
//! ```

pub mod bill_repository;
pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use bill_repository::BillRepository;
pub use connection::JsonConnection;
