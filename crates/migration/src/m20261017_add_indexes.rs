use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Overlap lookups filter on the property first, then on the date bounds
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_property_id_dates")
                    .table(Reservations::Table)
                    .col(Reservations::PropertyId)
                    .col(Reservations::CheckIn)
                    .col(Reservations::CheckOut)
                    .to_owned(),
            )
            .await?;

        // The location filter is `lower(location) LIKE '%...%'`, which only a
        // trigram index on the same expression can serve
        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm;")
                .await?;
            db.execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_properties_location_trgm
                 ON properties USING gin (lower(location) gin_trgm_ops);",
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reservations_property_id_dates")
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared("DROP INDEX IF EXISTS idx_properties_location_trgm;")
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Reservations {
    Table,
    PropertyId,
    CheckIn,
    CheckOut,
}
