use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Actor role, carried explicitly on the user record and in the
/// authenticated identity tuple. Never inferred from id naming.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Employee,
    Supervisor,
    Hod,
    Hr,
}
