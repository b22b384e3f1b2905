//! # Storage Module
//!
//! Handles persistence of monthly bill records.
//!
//! The domain layer only sees the [`BillStorage`] trait. The shipped
//! implementation keeps every month in a single JSON document on disk and
//! writes it atomically (temp file, then rename), so a failed save never
//! leaves a half-written store behind.

pub mod json;
pub mod traits;

pub use json::{BillRepository, JsonConnection};
pub use traits::BillStorage;
