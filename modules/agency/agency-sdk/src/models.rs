use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal projection of an agency row, as exposed to other modules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencySummary {
    pub id: Uuid,
    pub name: String,
}
