//! Initial migration for the customer / branch / employee tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create customers table
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::OwnerUserId).uuid().not_null())
                    .col(ColumnDef::new(Customers::Name).text().not_null())
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customers_owner_user")
                    .table(Customers::Table)
                    .col(Customers::OwnerUserId)
                    .to_owned(),
            )
            .await?;

        // Create branches table; agency_id / division_id / inspector_user_id
        // bridge into the external agency plugin and stay nullable.
        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Branches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Branches::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Branches::Name).text().not_null())
                    .col(ColumnDef::new(Branches::AgencyId).uuid())
                    .col(ColumnDef::new(Branches::DivisionId).uuid())
                    .col(ColumnDef::new(Branches::InspectorUserId).uuid())
                    .col(
                        ColumnDef::new(Branches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Branches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branches_customer")
                            .from(Branches::Table, Branches::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branches_customer")
                    .table(Branches::Table)
                    .col(Branches::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Employees::BranchId).uuid().not_null())
                    .col(
                        ColumnDef::new(Employees::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_customer")
                            .from(Employees::Table, Employees::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_branch")
                            .from(Employees::Table, Employees::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_customer")
                    .table(Employees::Table)
                    .col(Employees::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_branch")
                    .table(Employees::Table)
                    .col(Employees::BranchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    OwnerUserId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Branches {
    Table,
    Id,
    CustomerId,
    Name,
    AgencyId,
    DivisionId,
    InspectorUserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    CustomerId,
    BranchId,
    UserId,
    CreatedAt,
    UpdatedAt,
}
