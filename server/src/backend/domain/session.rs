//! # Edit Session State
//!
//! The record currently on screen and whether it may be edited. A presentation
//! layer owns one `SessionState` per open form and passes it around
//! explicitly; nothing here is global.
//!
//! Edits only touch the in-memory record. Nothing is persisted until the
//! caller takes [`SessionState::record_to_save`] to the bill service, and
//! cancelling an edit restores the record as it was when editing started.

use crate::backend::domain::calculator::{BillBreakdown, BillCalculator};
use crate::backend::domain::edit_access_service::EditAuthorizer;
use crate::backend::domain::models::bill::DomainBillRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    Name,
    Water,
    New,
    Old,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Month,
    BillAmount,
    TotalUnit,
    ExtraMoney,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Wrong password")]
    AccessDenied,
    #[error("Record is read-only until edit mode is unlocked")]
    ReadOnly,
    #[error("No member at position {}", .0 + 1)]
    NoSuchMember(usize),
}

#[derive(Debug, Clone)]
pub struct SessionState {
    record: DomainBillRecord,
    edit_mode: bool,
    /// Record as it was when editing began, restored on cancel
    snapshot: DomainBillRecord,
}

impl SessionState {
    /// Open a stored record read-only
    pub fn view(record: DomainBillRecord) -> Self {
        Self {
            snapshot: record.clone(),
            record,
            edit_mode: false,
        }
    }

    /// Open a freshly drafted month; it starts out editable
    pub fn new_month(draft: DomainBillRecord) -> Self {
        Self {
            snapshot: draft.clone(),
            record: draft,
            edit_mode: true,
        }
    }

    pub fn record(&self) -> &DomainBillRecord {
        &self.record
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Enter edit mode if the authorizer accepts `secret`
    pub fn request_edit(&mut self, authorizer: &dyn EditAuthorizer, secret: &str) -> Result<(), SessionError> {
        if self.edit_mode {
            return Ok(());
        }
        if !authorizer.authorize(secret) {
            return Err(SessionError::AccessDenied);
        }
        self.snapshot = self.record.clone();
        self.edit_mode = true;
        Ok(())
    }

    /// Leave edit mode and throw away unsaved changes
    pub fn cancel_edit(&mut self) {
        self.record = self.snapshot.clone();
        self.edit_mode = false;
    }

    /// Apply raw form input to one member field.
    ///
    /// Names are trimmed. Numeric input that does not parse to a finite
    /// number is ignored and the previous value stays.
    pub fn update_member(&mut self, index: usize, field: MemberField, raw: &str) -> Result<(), SessionError> {
        self.ensure_editing()?;
        let user = self
            .record
            .users
            .get_mut(index)
            .ok_or(SessionError::NoSuchMember(index))?;

        match field {
            MemberField::Name => user.name = raw.trim().to_string(),
            MemberField::Water => set_parsed(&mut user.water, raw),
            MemberField::New => set_parsed(&mut user.new_reading, raw),
            MemberField::Old => set_parsed(&mut user.old_reading, raw),
        }
        Ok(())
    }

    /// Apply raw form input to one meta field
    pub fn update_meta(&mut self, field: MetaField, raw: &str) -> Result<(), SessionError> {
        self.ensure_editing()?;
        let meta = &mut self.record.meta;

        match field {
            MetaField::Month => meta.month = raw.trim().to_string(),
            MetaField::BillAmount => set_parsed(&mut meta.bill_amount, raw),
            MetaField::TotalUnit => set_parsed(&mut meta.total_unit, raw),
            MetaField::ExtraMoney => set_parsed(&mut meta.extra_money, raw),
        }
        Ok(())
    }

    /// Recompute every derived figure from the current record
    pub fn summary(&self, calculator: &BillCalculator) -> BillBreakdown {
        calculator.calculate(&self.record)
    }

    /// The record to hand to the bill service
    pub fn record_to_save(&self) -> Result<DomainBillRecord, SessionError> {
        self.ensure_editing()?;
        Ok(self.record.clone())
    }

    /// Adopt the record as stored after a successful save; editing continues
    pub fn mark_saved(&mut self, stored: DomainBillRecord) {
        self.snapshot = stored.clone();
        self.record = stored;
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(SessionError::ReadOnly)
        }
    }
}

fn set_parsed(target: &mut f64, raw: &str) {
    if let Ok(value) = raw.trim().parse::<f64>() {
        if value.is_finite() {
            *target = value;
        }
    }
}
