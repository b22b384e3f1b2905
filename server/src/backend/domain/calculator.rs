//! # Bill Allocation Calculator
//!
//! Turns a month's meter readings and bill totals into a per-member charge.
//!
//! ## Algorithm
//!
//! 1. `unit_diff = new - old` for every member (negative values are allowed)
//! 2. `rupees_per_unit = round1((bill_amount - extra_money) / total_unit)`, 0 when no units were billed
//! 3. `unit_for_water = total_unit - Σ unit_diff` are the units nobody's meter recorded
//! 4. `water_head_rate = round2(unit_for_water * rupees_per_unit / Σ water)`, 0 when nobody uses water
//! 5. `charge = round(unit_diff * rupees_per_unit + water * water_head_rate)`
//!
//! The reconciliation figures (`grand_total`, `surplus`) are reported as-is.
//! A nonzero surplus means rounding drift or a data entry mistake, and the
//! person looking at the bill needs to see it.
//!
//! The calculator never fails. Degenerate input produces numbers, possibly
//! meaningless ones.

use rust_decimal::prelude::*;

use crate::backend::domain::models::bill::DomainBillRecord;

/// Charge for one member, in roster order
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAllocation {
    pub index: usize,
    pub name: String,
    pub unit_diff: f64,
    pub charge: i64,
}

/// Everything derived from a bill record
#[derive(Debug, Clone, PartialEq)]
pub struct BillBreakdown {
    pub rupees_per_unit: f64,
    pub total_unit_diff: f64,
    pub total_water_weight: f64,
    pub unit_for_water: f64,
    pub water_head_rate: f64,
    pub members: Vec<MemberAllocation>,
    pub total_collected: i64,
    pub grand_total: f64,
    pub surplus: f64,
}

/// Stateless calculator service
#[derive(Debug, Clone, Default)]
pub struct BillCalculator;

impl BillCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full breakdown for a record
    pub fn calculate(&self, record: &DomainBillRecord) -> BillBreakdown {
        let meta = &record.meta;

        let total_unit_diff: f64 = record.users.iter().map(|u| u.unit_diff()).sum();
        let total_water_weight: f64 = record.users.iter().map(|u| u.water).sum();

        let rupees_per_unit = if meta.total_unit != 0.0 {
            round_to_places((meta.bill_amount - meta.extra_money) / meta.total_unit, 1)
        } else {
            0.0
        };

        let unit_for_water = meta.total_unit - total_unit_diff;

        let water_head_rate = if total_water_weight > 0.0 {
            round_to_places(unit_for_water * rupees_per_unit / total_water_weight, 2)
        } else {
            0.0
        };

        let members: Vec<MemberAllocation> = record
            .users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let unit_diff = user.unit_diff();
                MemberAllocation {
                    index,
                    name: user.name.clone(),
                    unit_diff,
                    charge: round_half_up(unit_diff * rupees_per_unit + user.water * water_head_rate),
                }
            })
            .collect();

        // Absurd readings saturate at i64::MAX per charge, so the total must too
        let total_collected = members.iter().fold(0i64, |acc, m| acc.saturating_add(m.charge));
        let grand_total = total_collected as f64 + meta.extra_money;
        let surplus = grand_total - meta.bill_amount;

        BillBreakdown {
            rupees_per_unit,
            total_unit_diff,
            total_water_weight,
            unit_for_water,
            water_head_rate,
            members,
            total_collected,
            grand_total,
            surplus,
        }
    }
}

/// Round the exact decimal value of `value` to `places` decimals, ties away
/// from zero. 2.05 is stored as 2.0499..., so it rounds to 2.0.
///
/// Values outside the decimal range are returned unchanged; at that
/// magnitude an f64 has no fractional digits left anyway.
fn round_to_places(value: f64, places: u32) -> f64 {
    let rounded = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value);
    // + 0.0 turns -0.0 into 0.0
    rounded + 0.0
}

/// Round to the nearest integer, ties toward positive infinity
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::bill::{DomainBillMeta, DomainMemberReading};

    fn record(bill_amount: f64, total_unit: f64, extra_money: f64, users: Vec<DomainMemberReading>) -> DomainBillRecord {
        DomainBillRecord {
            meta: DomainBillMeta {
                month: "TEST".to_string(),
                bill_amount,
                total_unit,
                extra_money,
                timestamp: None,
            },
            users,
        }
    }

    #[test]
    fn test_single_member_absorbs_all_water_units() {
        let record = record(1000.0, 100.0, 0.0, vec![DomainMemberReading::new("SHUBHAM", 110.0, 100.0, 1.0)]);

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 10.0);
        assert_eq!(breakdown.total_unit_diff, 10.0);
        assert_eq!(breakdown.unit_for_water, 90.0);
        assert_eq!(breakdown.water_head_rate, 900.0);
        assert_eq!(breakdown.members[0].unit_diff, 10.0);
        assert_eq!(breakdown.members[0].charge, 1000);
        assert_eq!(breakdown.total_collected, 1000);
        assert_eq!(breakdown.grand_total, 1000.0);
        assert_eq!(breakdown.surplus, 0.0);
    }

    #[test]
    fn test_two_members_with_extra_money() {
        let record = record(
            500.0,
            50.0,
            50.0,
            vec![
                DomainMemberReading::new("A", 30.0, 20.0, 2.0),
                DomainMemberReading::new("B", 35.0, 25.0, 3.0),
            ],
        );

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 9.0);
        assert_eq!(breakdown.total_unit_diff, 20.0);
        assert_eq!(breakdown.total_water_weight, 5.0);
        assert_eq!(breakdown.unit_for_water, 30.0);
        assert_eq!(breakdown.water_head_rate, 54.0);
        assert_eq!(breakdown.members[0].charge, 198);
        assert_eq!(breakdown.members[1].charge, 252);
        assert_eq!(breakdown.total_collected, 450);
        assert_eq!(breakdown.grand_total, 500.0);
        assert_eq!(breakdown.surplus, 0.0);
    }

    #[test]
    fn test_zero_total_unit_gives_zero_rate() {
        let record = record(800.0, 0.0, 0.0, vec![DomainMemberReading::new("A", 10.0, 0.0, 1.0)]);

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 0.0);
        assert_eq!(breakdown.water_head_rate, 0.0);
        assert_eq!(breakdown.members[0].charge, 0);
        assert_eq!(breakdown.surplus, -800.0);
    }

    #[test]
    fn test_zero_water_weight_gives_zero_head_rate() {
        let record = record(
            100.0,
            10.0,
            0.0,
            vec![DomainMemberReading::new("A", 5.0, 0.0, 0.0)],
        );

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 10.0);
        assert_eq!(breakdown.unit_for_water, 5.0);
        assert_eq!(breakdown.water_head_rate, 0.0);
        assert_eq!(breakdown.members[0].charge, 50);
        // Units nobody paid for show up as a shortfall
        assert_eq!(breakdown.surplus, -50.0);
    }

    #[test]
    fn test_empty_roster() {
        let record = record(300.0, 30.0, 0.0, vec![]);

        let breakdown = BillCalculator::new().calculate(&record);

        assert!(breakdown.members.is_empty());
        assert_eq!(breakdown.total_unit_diff, 0.0);
        assert_eq!(breakdown.total_water_weight, 0.0);
        assert_eq!(breakdown.unit_for_water, 30.0);
        assert_eq!(breakdown.water_head_rate, 0.0);
        assert_eq!(breakdown.total_collected, 0);
        assert_eq!(breakdown.surplus, -300.0);
    }

    #[test]
    fn test_negative_unit_diff_does_not_panic() {
        let record = record(
            200.0,
            20.0,
            0.0,
            vec![
                DomainMemberReading::new("A", 10.0, 30.0, 1.0),
                DomainMemberReading::new("B", 40.0, 10.0, 1.0),
            ],
        );

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.members[0].unit_diff, -20.0);
        assert_eq!(breakdown.total_unit_diff, 10.0);
        assert_eq!(breakdown.unit_for_water, 10.0);
        assert_eq!(breakdown.water_head_rate, 50.0);
        assert_eq!(breakdown.members[0].charge, -150);
        assert_eq!(breakdown.members[1].charge, 350);
        assert_eq!(breakdown.surplus, 0.0);
    }

    #[test]
    fn test_rate_rounds_to_one_decimal() {
        let record = record(1000.0, 3.0, 0.0, vec![DomainMemberReading::new("A", 3.0, 0.0, 0.0)]);

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 333.3);
        assert_eq!(breakdown.members[0].charge, 1000);
        assert_eq!(breakdown.grand_total, 1000.0);
    }

    #[test]
    fn test_head_rate_rounds_to_two_decimals() {
        // unit_for_water = 10, rate = 1.0, weight = 3 -> 3.333.. -> 3.33
        let record = record(
            20.0,
            20.0,
            0.0,
            vec![
                DomainMemberReading::new("A", 5.0, 0.0, 1.0),
                DomainMemberReading::new("B", 5.0, 0.0, 2.0),
            ],
        );

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 1.0);
        assert_eq!(breakdown.water_head_rate, 3.33);
        assert_eq!(breakdown.members[0].charge, 8); // 5 + 3.33
        assert_eq!(breakdown.members[1].charge, 12); // 5 + 6.66
        assert_eq!(breakdown.total_collected, 20);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let record = record(
            1234.0,
            117.0,
            12.5,
            vec![
                DomainMemberReading::new("A", 140.0, 101.0, 1.5),
                DomainMemberReading::new("B", 77.0, 40.0, 2.0),
                DomainMemberReading::new("C", 300.0, 280.0, 0.5),
            ],
        );
        let calculator = BillCalculator::new();

        assert_eq!(calculator.calculate(&record), calculator.calculate(&record));
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to_places(0.25, 1), 0.3);
        assert_eq!(round_to_places(9.04, 1), 9.0);
        assert_eq!(round_to_places(-0.04, 1), 0.0);
        assert!(round_to_places(-0.04, 1).is_sign_positive());
        assert_eq!(round_to_places(54.0, 2), 54.0);
        assert_eq!(round_to_places(1.125, 2), 1.13);
        assert_eq!(round_to_places(f64::MAX, 1), f64::MAX);
    }

    #[test]
    fn test_round_to_places_uses_stored_decimal_value() {
        // Neither 2.05 nor 3.55 is representable; both are stored just below the tie
        assert_eq!(round_to_places(205.0 / 100.0, 1), 2.0);
        assert_eq!(round_to_places(142.0 / 40.0, 1), 3.5);
        assert_eq!(round_to_places(-205.0 / 100.0, 1), -2.0);
        assert_eq!(round_to_places(1.005, 2), 1.0);
    }

    #[test]
    fn test_rate_that_is_not_an_exact_tie() {
        let record = record(205.0, 100.0, 0.0, vec![DomainMemberReading::new("A", 100.0, 0.0, 0.0)]);

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.rupees_per_unit, 2.0);
        assert_eq!(breakdown.members[0].charge, 200);
        assert_eq!(breakdown.surplus, -5.0);
    }

    #[test]
    fn test_huge_readings_saturate_instead_of_overflowing() {
        let record = record(
            1.0,
            1.0,
            0.0,
            vec![
                DomainMemberReading::new("A", 1e19, 0.0, 0.0),
                DomainMemberReading::new("B", 1e19, 0.0, 0.0),
            ],
        );

        let breakdown = BillCalculator::new().calculate(&record);

        assert_eq!(breakdown.members[0].charge, i64::MAX);
        assert_eq!(breakdown.members[1].charge, i64::MAX);
        assert_eq!(breakdown.total_collected, i64::MAX);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }
}
