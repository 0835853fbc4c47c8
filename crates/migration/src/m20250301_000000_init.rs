//! Initial schema.
//!
//! - `users`: accounts (email + password hash)
//! - `people`, `planets`, `vehicles`: read-only catalog
//! - `favorite_people`, `favorite_planets`, `favorite_vehicles`: one join
//!   table per catalog kind, keyed by `(user_id, <kind>_id)`

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden, Clone, Copy)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Password,
    IsActive,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum People {
    Table,
    Id,
    Name,
    BirthYear,
    Gender,
    Height,
    SkinColor,
    HairColor,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Planets {
    Table,
    Id,
    Name,
    Climate,
    Population,
    OrbitalPeriod,
    RotationPeriod,
    Diameter,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Vehicles {
    Table,
    Id,
    Name,
    VehicleClass,
    Length,
    Crew,
    MaxAtmospheringSpeed,
    CargoCapacity,
}

#[derive(Iden, Clone, Copy)]
enum FavoritePeople {
    Table,
    UserId,
    PersonId,
}

#[derive(Iden, Clone, Copy)]
enum FavoritePlanets {
    Table,
    UserId,
    PlanetId,
}

#[derive(Iden, Clone, Copy)]
enum FavoriteVehicles {
    Table,
    UserId,
    VehicleId,
}

/// Builds a `(user_id, target_id)` join table with cascading foreign keys on
/// both sides. The composite primary key doubles as the `user_id` index.
fn favorite_table(
    table: impl IntoIden + Copy + 'static,
    user_col: impl IntoIden + Copy + 'static,
    target_col: impl IntoIden + Copy + 'static,
    target_table: impl IntoIden + Copy + 'static,
    target_id: impl IntoIden + Copy + 'static,
    fk_prefix: &str,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(user_col).integer().not_null())
        .col(ColumnDef::new(target_col).integer().not_null())
        .primary_key(Index::create().col(user_col).col(target_col))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk-{fk_prefix}-user_id"))
                .from(table, user_col)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk-{fk_prefix}-target_id"))
                .from(table, target_col)
                .to(target_table, target_id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Catalog
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::Name).string_len(250).not_null())
                    .col(ColumnDef::new(People::BirthYear).double().not_null())
                    .col(ColumnDef::new(People::Gender).string_len(250).not_null())
                    .col(ColumnDef::new(People::Height).string_len(250).not_null())
                    .col(ColumnDef::new(People::SkinColor).string_len(250).not_null())
                    .col(ColumnDef::new(People::HairColor).string_len(250).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Planets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Planets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Planets::Name).string_len(250).not_null())
                    .col(ColumnDef::new(Planets::Climate).string_len(250).not_null())
                    .col(ColumnDef::new(Planets::Population).big_integer().not_null())
                    .col(ColumnDef::new(Planets::OrbitalPeriod).integer().not_null())
                    .col(ColumnDef::new(Planets::RotationPeriod).integer().not_null())
                    .col(ColumnDef::new(Planets::Diameter).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Name).string_len(250).not_null())
                    .col(
                        ColumnDef::new(Vehicles::VehicleClass)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicles::Length).double().not_null())
                    .col(ColumnDef::new(Vehicles::Crew).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicles::MaxAtmospheringSpeed)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicles::CargoCapacity).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Favorites
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(favorite_table(
                FavoritePeople::Table,
                FavoritePeople::UserId,
                FavoritePeople::PersonId,
                People::Table,
                People::Id,
                "favorite_people",
            ))
            .await?;

        manager
            .create_table(favorite_table(
                FavoritePlanets::Table,
                FavoritePlanets::UserId,
                FavoritePlanets::PlanetId,
                Planets::Table,
                Planets::Id,
                "favorite_planets",
            ))
            .await?;

        manager
            .create_table(favorite_table(
                FavoriteVehicles::Table,
                FavoriteVehicles::UserId,
                FavoriteVehicles::VehicleId,
                Vehicles::Table,
                Vehicles::Id,
                "favorite_vehicles",
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteVehicles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoritePlanets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoritePeople::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Planets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
