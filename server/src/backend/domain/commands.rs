//! Domain-level command and result types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs from the
//! `shared` crate to these internal types.

pub mod bills {
    use crate::backend::domain::models::bill::DomainBillRecord;

    /// Input for saving a month. The record replaces whatever is stored.
    #[derive(Debug, Clone)]
    pub struct SaveBillCommand {
        pub record: DomainBillRecord,
    }

    /// Result of saving a month
    #[derive(Debug, Clone)]
    pub struct SaveBillResult {
        /// The record as stored, timestamp included
        pub record: DomainBillRecord,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBillCommand {
        pub month: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBillResult {
        pub month: String,
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod edit_access {
    /// Input for unlocking edit mode
    #[derive(Debug, Clone)]
    pub struct UnlockEditCommand {
        pub password: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct UnlockEditResult {
        pub success: bool,
        pub message: String,
    }
}
