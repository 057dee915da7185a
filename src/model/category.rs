use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Leave categories, each with an independent allotted/used counter pair.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveCategory {
    Annual,
    Sick,
    Maternity,
    Paternity,
    Emergency,
}

impl LeaveCategory {
    pub const ALL: [LeaveCategory; 5] = [
        LeaveCategory::Annual,
        LeaveCategory::Sick,
        LeaveCategory::Maternity,
        LeaveCategory::Paternity,
        LeaveCategory::Emergency,
    ];

    /// Standard per-cycle allotment used to seed a new balance.
    pub fn standard_allotment(self) -> u32 {
        match self {
            LeaveCategory::Annual => 21,
            LeaveCategory::Sick => 14,
            LeaveCategory::Maternity => 90,
            LeaveCategory::Paternity => 10,
            LeaveCategory::Emergency => 7,
        }
    }
}
