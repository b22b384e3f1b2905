//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain.
//!
//! Requests arrive as JSON or query strings, are mapped to domain commands,
//! and the results are mapped back to the DTOs in the `shared` crate. Domain
//! errors are translated to status codes with a `{ error, code }` body.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum handlers grouped per concern, each with its own router
//! - **Serialization**: Serde DTOs from the `shared` crate
//! - **State Management**: Services injected through `State<AppState>`

pub mod rest;

pub use rest::*;
