//! Migration: Create users table.
//!
//! Nested address, geo and company records are flattened into nullable
//! columns. The `has_*` flags record whether the nested record itself was
//! present, independently of its fields.
//!
//! Rows are keyed by their `position` in the fetched collection. The user
//! `id` is indexed but not unique, so any collection the API returns can be
//! stored as-is.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Position)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Id).big_integer().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::Website).string().null())
                    .col(
                        ColumnDef::new(Users::HasAddress)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::AddressStreet).string().null())
                    .col(ColumnDef::new(Users::AddressSuite).string().null())
                    .col(ColumnDef::new(Users::AddressCity).string().null())
                    .col(ColumnDef::new(Users::AddressZipcode).string().null())
                    .col(
                        ColumnDef::new(Users::HasGeo)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::GeoLat).string().null())
                    .col(ColumnDef::new(Users::GeoLng).string().null())
                    .col(
                        ColumnDef::new(Users::HasCompany)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CompanyName).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_id")
                    .table(Users::Table)
                    .col(Users::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Position,
    Id,
    Name,
    Username,
    Email,
    Phone,
    Website,
    HasAddress,
    AddressStreet,
    AddressSuite,
    AddressCity,
    AddressZipcode,
    HasGeo,
    GeoLat,
    GeoLng,
    HasCompany,
    CompanyName,
}
