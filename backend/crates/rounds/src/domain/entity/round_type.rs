//! Round Type Entity

use kernel::id::RoundTypeId;

/// Category of patrol round (`tipo_ronda`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundType {
    pub id: RoundTypeId,
    pub name: String,
}
