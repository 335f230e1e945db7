//! Hard reserve entity <-> model mapper

use prio_core::entities::HardReserveEntry;

use crate::models::HardReserveModel;

/// Convert HardReserveModel to HardReserveEntry entity
impl From<HardReserveModel> for HardReserveEntry {
    fn from(model: HardReserveModel) -> Self {
        HardReserveEntry {
            id: model.id,
            item_name: model.item_name,
            note: model.note,
            created_at: model.created_at,
        }
    }
}
