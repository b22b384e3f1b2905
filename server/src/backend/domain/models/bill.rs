/// Month-level bill data as the domain sees it: every number already filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainBillMeta {
    pub month: String,
    pub bill_amount: f64,
    pub total_unit: f64,
    pub extra_money: f64,
    /// Epoch milliseconds of the last save; `None` until persisted
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainMemberReading {
    pub name: String,
    pub new_reading: f64,
    pub old_reading: f64,
    pub water: f64,
}

impl DomainMemberReading {
    pub fn new(name: impl Into<String>, new_reading: f64, old_reading: f64, water: f64) -> Self {
        Self {
            name: name.into(),
            new_reading,
            old_reading,
            water,
        }
    }

    /// Units consumed this month. Negative when the readings are swapped.
    pub fn unit_diff(&self) -> f64 {
        self.new_reading - self.old_reading
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainBillRecord {
    pub meta: DomainBillMeta,
    /// Display order; rollover relies on it
    pub users: Vec<DomainMemberReading>,
}

impl DomainBillRecord {
    pub fn month(&self) -> &str {
        &self.meta.month
    }

    /// Check the fields a save cannot do without
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.meta.month.trim().is_empty() {
            return Err(BillValidationError::MissingMonth);
        }

        if let Some(index) = self.users.iter().position(|u| u.name.trim().is_empty()) {
            return Err(BillValidationError::EmptyMemberName { index });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BillValidationError {
    #[error("Missing month in meta")]
    MissingMonth,
    #[error("Member at position {} has an empty name", .index + 1)]
    EmptyMemberName { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: &str, names: &[&str]) -> DomainBillRecord {
        DomainBillRecord {
            meta: DomainBillMeta {
                month: month.to_string(),
                ..Default::default()
            },
            users: names
                .iter()
                .map(|n| DomainMemberReading::new(*n, 0.0, 0.0, 0.0))
                .collect(),
        }
    }

    #[test]
    fn test_unit_diff_may_be_negative() {
        let reading = DomainMemberReading::new("SAMIR", 90.0, 100.0, 1.0);
        assert_eq!(reading.unit_diff(), -10.0);
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        assert_eq!(record("JAN", &["SHUBHAM", "KUNAL"]).validate(), Ok(()));
        assert_eq!(record("JAN", &[]).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_month() {
        assert_eq!(record("", &["SHUBHAM"]).validate(), Err(BillValidationError::MissingMonth));
        assert_eq!(record("   ", &["SHUBHAM"]).validate(), Err(BillValidationError::MissingMonth));
    }

    #[test]
    fn test_validate_rejects_blank_member_name() {
        let err = record("JAN", &["SHUBHAM", "  "]).validate().unwrap_err();
        assert_eq!(err, BillValidationError::EmptyMemberName { index: 1 });
        assert_eq!(err.to_string(), "Member at position 2 has an empty name");
    }
}
