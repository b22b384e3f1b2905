use std::collections::BTreeMap;

use crate::backend::domain::calculator::{BillBreakdown, MemberAllocation};
use crate::backend::domain::commands::bills::{DeleteBillResult, SaveBillResult};
use crate::backend::domain::models::bill::{DomainBillMeta, DomainBillRecord, DomainMemberReading};
use shared::{
    AllMonthsResponse, BillMeta, BillRecord, BillSummary, DeleteBillResponse, MemberCharge, MemberReading,
    SaveBillResponse,
};

pub struct BillMapper;

impl BillMapper {
    /// Convert shared BillRecord DTO to domain DomainBillRecord
    pub fn to_domain(dto: BillRecord) -> DomainBillRecord {
        DomainBillRecord {
            meta: Self::meta_to_domain(dto.meta),
            users: dto.users.into_iter().map(Self::member_to_domain).collect(),
        }
    }

    pub fn meta_to_domain(dto: BillMeta) -> DomainBillMeta {
        DomainBillMeta {
            month: dto.month,
            bill_amount: dto.bill_amount,
            total_unit: dto.total_unit,
            extra_money: dto.extra_money,
            timestamp: dto.timestamp,
        }
    }

    pub fn member_to_domain(dto: MemberReading) -> DomainMemberReading {
        DomainMemberReading {
            name: dto.name,
            new_reading: dto.new_reading,
            old_reading: dto.old_reading,
            water: dto.water,
        }
    }

    /// Convert domain DomainBillRecord to shared BillRecord DTO
    pub fn to_dto(domain: DomainBillRecord) -> BillRecord {
        BillRecord {
            meta: Self::meta_to_dto(domain.meta),
            users: domain.users.into_iter().map(Self::member_to_dto).collect(),
        }
    }

    pub fn meta_to_dto(domain: DomainBillMeta) -> BillMeta {
        BillMeta {
            month: domain.month,
            bill_amount: domain.bill_amount,
            total_unit: domain.total_unit,
            extra_money: domain.extra_money,
            timestamp: domain.timestamp,
        }
    }

    pub fn member_to_dto(domain: DomainMemberReading) -> MemberReading {
        MemberReading {
            name: domain.name,
            new_reading: domain.new_reading,
            old_reading: domain.old_reading,
            water: domain.water,
        }
    }

    pub fn months_to_dto(domain: BTreeMap<String, DomainBillMeta>) -> AllMonthsResponse {
        domain
            .into_iter()
            .map(|(month, meta)| (month, Self::meta_to_dto(meta)))
            .collect()
    }

    pub fn to_save_response(result: SaveBillResult) -> SaveBillResponse {
        SaveBillResponse {
            // Stored records always carry a timestamp
            timestamp: result.record.meta.timestamp.unwrap_or_default(),
            month: result.record.meta.month,
            success_message: result.success_message,
        }
    }

    pub fn to_delete_response(result: DeleteBillResult) -> DeleteBillResponse {
        DeleteBillResponse {
            month: result.month,
            deleted: result.deleted,
            success_message: result.success_message,
        }
    }

    pub fn summary_to_dto(month: String, breakdown: BillBreakdown) -> BillSummary {
        BillSummary {
            month,
            rupees_per_unit: breakdown.rupees_per_unit,
            total_unit_diff: breakdown.total_unit_diff,
            total_water_weight: breakdown.total_water_weight,
            unit_for_water: breakdown.unit_for_water,
            water_head_rate: breakdown.water_head_rate,
            members: breakdown.members.into_iter().map(Self::allocation_to_dto).collect(),
            total_collected: breakdown.total_collected,
            grand_total: breakdown.grand_total,
            surplus: breakdown.surplus,
        }
    }

    fn allocation_to_dto(allocation: MemberAllocation) -> MemberCharge {
        MemberCharge {
            index: allocation.index,
            name: allocation.name,
            unit_diff: allocation.unit_diff,
            charge: allocation.charge,
        }
    }
}
