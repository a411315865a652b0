//! Entity to domain model mappers.

use crate::domain::model::{BranchBridge, EmployeeRecord};

use super::entity::{branch, employee};

impl From<employee::Model> for EmployeeRecord {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            branch_id: model.branch_id,
            user_id: model.user_id,
        }
    }
}

impl From<branch::Model> for BranchBridge {
    fn from(model: branch::Model) -> Self {
        Self {
            branch_id: model.id,
            customer_id: model.customer_id,
            agency_id: model.agency_id,
            division_id: model.division_id,
            inspector_user_id: model.inspector_user_id,
        }
    }
}
