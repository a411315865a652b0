//! `SeaORM` entities for the hierarchy tables read by the access-control
//! core. The rows themselves are owned and mutated by the CRUD services.

pub use branch::Entity as BranchEntity;
pub use customer::Entity as CustomerEntity;
pub use employee::Entity as EmployeeEntity;

/// Customer entity module.
pub mod customer {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    /// Customer entity for the `customers` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        /// The tenant-admin user owning this customer.
        pub owner_user_id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::branch::Entity")]
        Branches,
        #[sea_orm(has_many = "super::employee::Entity")]
        Employees,
    }

    impl Related<super::branch::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Branches.def()
        }
    }

    impl Related<super::employee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Employees.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Branch entity module.
pub mod branch {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    /// Branch entity for the `branches` table.
    ///
    /// `agency_id` and `division_id` bridge into the external agency
    /// plugin; `inspector_user_id` references an external employee. All
    /// three are nullable; `branches` doubles as the bridge table for the
    /// agency and division relation configs.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "branches")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub name: String,
        pub agency_id: Option<Uuid>,
        pub division_id: Option<Uuid>,
        pub inspector_user_id: Option<Uuid>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(has_many = "super::employee::Entity")]
        Employees,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::employee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Employees.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Employee entity module.
pub mod employee {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    /// Employee entity for the `employees` table. Bridges 1:1 to a
    /// platform user via `user_id`.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "employees")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub branch_id: Uuid,
        #[sea_orm(unique)]
        pub user_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(
            belongs_to = "super::branch::Entity",
            from = "Column::BranchId",
            to = "super::branch::Column::Id"
        )]
        Branch,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::branch::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Branch.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
