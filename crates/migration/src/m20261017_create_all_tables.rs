use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create properties table
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::Title).string().not_null())
                    .col(ColumnDef::new(Properties::Type).string().not_null())
                    .col(ColumnDef::new(Properties::Location).string().not_null())
                    .col(
                        ColumnDef::new(Properties::Status)
                            .string_len(20)
                            .not_null()
                            .default("AVAILABLE"),
                    )
                    .col(
                        ColumnDef::new(Properties::NightlyPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Properties::MaxGuests).integer().not_null())
                    .col(ColumnDef::new(Properties::Description).text())
                    .col(ColumnDef::new(Properties::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Properties::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create reservations table, a property can't be dropped while it has any
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::PropertyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::GuestName)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::GuestEmail)
                            .string_len(180)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::CheckIn).date().not_null())
                    .col(ColumnDef::new(Reservations::CheckOut).date().not_null())
                    .col(
                        ColumnDef::new(Reservations::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::CreatedAt).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservations-property_id")
                            .from(Reservations::Table, Reservations::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
    Title,
    Type,
    Location,
    Status,
    NightlyPrice,
    MaxGuests,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reservations {
    Table,
    Id,
    PropertyId,
    GuestName,
    GuestEmail,
    CheckIn,
    CheckOut,
    TotalPrice,
    Status,
    CreatedAt,
}
