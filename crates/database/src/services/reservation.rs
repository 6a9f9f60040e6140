use crate::{
    entities::{properties, reservations},
    error::{Result, ServiceError},
    services::property::PropertyService,
};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use models::{ReservationStatus, Stay, fits_price_column};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

/// A booking request for a single property
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub property_id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

pub struct ReservationService;

impl ReservationService {
    /// Books a stay at a property.
    ///
    /// The whole check-then-insert sequence runs in one transaction holding a
    /// row lock on the property, so two overlapping requests for the same
    /// property can't both be accepted. Returns the reservation together
    /// with its property.
    pub async fn create_reservation(
        db: &DatabaseConnection,
        request: NewReservation,
    ) -> Result<(reservations::Model, properties::Model)> {
        let txn = db.begin().await?;

        let property = Self::find_property_for_update(&txn, request.property_id)
            .await?
            .ok_or(ServiceError::PropertyNotFound(request.property_id))?;

        let stay = Stay::new(request.check_in, request.check_out).map_err(|e| {
            debug!("Rejected reservation for property {}: {e}", property.id);
            ServiceError::InvalidDateRange
        })?;

        let total_price = stay
            .total_price(property.nightly_price)
            .filter(|total| fits_price_column(*total))
            .ok_or(ServiceError::TotalPriceTooLarge)?;

        let conflicts = Self::find_overlapping(&txn, property.id, &stay).await?;
        if !conflicts.is_empty() {
            warn!(
                "Booking conflict for property {} on {stay}: {} existing reservation(s)",
                property.id,
                conflicts.len()
            );
            return Err(ServiceError::BookingConflict);
        }

        let reservation = reservations::ActiveModel {
            property_id: Set(property.id),
            guest_name: Set(request.guest_name),
            guest_email: Set(request.guest_email),
            check_in: Set(stay.check_in()),
            check_out: Set(stay.check_out()),
            total_price: Set(total_price),
            status: Set(ReservationStatus::Booked),
            created_at: Set(Utc::now().date_naive()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Created reservation {} for property {} on {stay} ({} nights, total {})",
            reservation.id,
            property.id,
            stay.nights(),
            reservation.total_price
        );
        Ok((reservation, property))
    }

    /// Booked reservations of a property whose dates touch the given stay.
    ///
    /// Both ends are inclusive, matching `Stay::overlaps`.
    pub async fn find_overlapping<C: ConnectionTrait>(
        db: &C,
        property_id: i64,
        stay: &Stay,
    ) -> std::result::Result<Vec<reservations::Model>, DbErr> {
        reservations::Entity::find()
            .filter(reservations::Column::PropertyId.eq(property_id))
            .filter(reservations::Column::Status.eq(ReservationStatus::Booked))
            .filter(reservations::Column::CheckOut.gte(stay.check_in()))
            .filter(reservations::Column::CheckIn.lte(stay.check_out()))
            .order_by_asc(reservations::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_property_id<C: ConnectionTrait>(
        db: &C,
        property_id: i64,
    ) -> std::result::Result<Vec<reservations::Model>, DbErr> {
        reservations::Entity::find()
            .filter(reservations::Column::PropertyId.eq(property_id))
            .order_by_asc(reservations::Column::Id)
            .all(db)
            .await
    }

    /// All reservations of an existing property, in booking order
    pub async fn list_by_property(
        db: &DatabaseConnection,
        property_id: i64,
    ) -> Result<(properties::Model, Vec<reservations::Model>)> {
        let property = PropertyService::get(db, property_id).await?;
        let reservations = Self::find_by_property_id(db, property_id).await?;

        Ok((property, reservations))
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<(reservations::Model, properties::Model)> {
        let (reservation, property) = reservations::Entity::find_by_id(id)
            .find_also_related(properties::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::ReservationNotFound(id))?;

        let property = property.ok_or(ServiceError::PropertyNotFound(reservation.property_id))?;
        Ok((reservation, property))
    }

    /// Reads the property and locks its row until the transaction ends
    async fn find_property_for_update(
        txn: &DatabaseTransaction,
        id: i64,
    ) -> std::result::Result<Option<properties::Model>, DbErr> {
        let mut query = properties::Entity::find_by_id(id);

        // SQLite has no row locks, its writers are serialized anyway
        if txn.get_database_backend() != DbBackend::Sqlite {
            query = query.lock_exclusive();
        }

        query.one(txn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::property::PropertyInput, testing::setup_db};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn request(property_id: i64, check_in: &str, check_out: &str) -> NewReservation {
        NewReservation {
            property_id,
            guest_name: "Maria Silva".to_string(),
            guest_email: "maria@example.com".to_string(),
            check_in: date(check_in),
            check_out: date(check_out),
        }
    }

    async fn create_property(db: &DatabaseConnection, nightly_price: Decimal) -> i64 {
        PropertyService::create(
            db,
            PropertyInput {
                title: "Beach house".to_string(),
                property_type: "House".to_string(),
                location: "Porto Seguro".to_string(),
                nightly_price,
                max_guests: 4,
                description: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_reservation() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;

        let (reservation, property) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-10", "2024-01-15"),
        )
        .await
        .unwrap();

        assert_eq!(reservation.property_id, property_id);
        assert_eq!(property.id, property_id);
        assert_eq!(property.title, "Beach house");
        assert_eq!(reservation.status, ReservationStatus::Booked);
        assert_eq!(reservation.total_price, Decimal::from(500));
        assert_eq!(reservation.check_in, date("2024-01-10"));
        assert_eq!(reservation.check_out, date("2024-01-15"));
        assert_eq!(reservation.created_at, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_total_price_for_various_stay_lengths() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(120)).await;

        let cases = [
            ("2024-02-01", "2024-02-02", 120),
            ("2024-03-01", "2024-03-03", 240),
            ("2024-04-01", "2024-05-01", 3600),
        ];
        for (check_in, check_out, expected) in cases {
            let (reservation, _) = ReservationService::create_reservation(
                &db,
                request(property_id, check_in, check_out),
            )
            .await
            .unwrap();
            assert_eq!(reservation.total_price, Decimal::from(expected));
        }
    }

    #[tokio::test]
    async fn test_unknown_property() {
        let db = setup_db().await;

        let result =
            ReservationService::create_reservation(&db, request(99, "2024-01-10", "2024-01-15"))
                .await;
        assert!(matches!(result, Err(ServiceError::PropertyNotFound(99))));
    }

    #[tokio::test]
    async fn test_check_out_must_follow_check_in() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;

        for (check_in, check_out) in [("2024-01-10", "2024-01-10"), ("2024-01-10", "2024-01-05")] {
            let result = ReservationService::create_reservation(
                &db,
                request(property_id, check_in, check_out),
            )
            .await;
            assert!(matches!(result, Err(ServiceError::InvalidDateRange)));
        }

        let (_, reservations) = ReservationService::list_by_property(&db, property_id)
            .await
            .unwrap();
        assert!(reservations.is_empty());
    }

    #[tokio::test]
    async fn test_total_price_must_fit_price_column() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(10_000_000)).await;

        let result = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-01", "2024-01-11"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::TotalPriceTooLarge)));

        let (reservation, _) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-02-01", "2024-02-10"),
        )
        .await
        .unwrap();
        assert_eq!(reservation.total_price, Decimal::from(90_000_000));
    }

    #[tokio::test]
    async fn test_unknown_property_is_reported_before_bad_dates() {
        let db = setup_db().await;

        let result =
            ReservationService::create_reservation(&db, request(5, "2024-01-10", "2024-01-01"))
                .await;
        assert!(matches!(result, Err(ServiceError::PropertyNotFound(5))));
    }

    #[tokio::test]
    async fn test_back_to_back_booking_conflicts() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;
        ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-10", "2024-01-15"),
        )
        .await
        .unwrap();

        // Check-in on the previous guest's check-out day is rejected
        let result = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-15", "2024-01-20"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::BookingConflict)));

        let result = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-05", "2024-01-10"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::BookingConflict)));
    }

    #[tokio::test]
    async fn test_next_free_day_succeeds() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;
        ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-10", "2024-01-15"),
        )
        .await
        .unwrap();

        let (reservation, _) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-16", "2024-01-20"),
        )
        .await
        .unwrap();
        assert_eq!(reservation.total_price, Decimal::from(400));
    }

    #[tokio::test]
    async fn test_conflicts_are_per_property() {
        let db = setup_db().await;
        let first = create_property(&db, Decimal::from(100)).await;
        let second = create_property(&db, Decimal::from(80)).await;

        ReservationService::create_reservation(&db, request(first, "2024-01-10", "2024-01-15"))
            .await
            .unwrap();
        let (reservation, _) = ReservationService::create_reservation(
            &db,
            request(second, "2024-01-10", "2024-01-15"),
        )
        .await
        .unwrap();

        assert_eq!(reservation.property_id, second);
    }

    #[tokio::test]
    async fn test_find_overlapping() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;
        let (january, _) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-10", "2024-01-15"),
        )
        .await
        .unwrap();
        let (february, _) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-02-10", "2024-02-15"),
        )
        .await
        .unwrap();

        let stay = Stay::new(date("2024-01-15"), date("2024-02-10")).unwrap();
        let overlapping = ReservationService::find_overlapping(&db, property_id, &stay)
            .await
            .unwrap();
        let ids: Vec<_> = overlapping.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![january.id, february.id]);

        let stay = Stay::new(date("2024-01-16"), date("2024-02-09")).unwrap();
        assert!(
            ReservationService::find_overlapping(&db, property_id, &stay)
                .await
                .unwrap()
                .is_empty()
        );
    }

    // The test pool has a single connection, so this covers the
    // check-then-insert sequence but not the row lock itself. See
    // `test_row_lock_serializes_bookings_on_postgres` for that.
    #[tokio::test]
    async fn test_concurrent_overlapping_requests_book_once() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;

        let (first, second) = tokio::join!(
            ReservationService::create_reservation(
                &db,
                request(property_id, "2024-01-10", "2024-01-15")
            ),
            ReservationService::create_reservation(
                &db,
                request(property_id, "2024-01-12", "2024-01-18")
            ),
        );

        let results = [first, second];
        let booked = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::BookingConflict)))
            .count();
        assert_eq!((booked, conflicts), (1, 1));

        let (_, reservations) = ReservationService::list_by_property(&db, property_id)
            .await
            .unwrap();
        assert_eq!(reservations.len(), 1);
    }

    /// Runs against a scratch PostgreSQL database given in `TEST_DATABASE_URL`,
    /// e.g. `cargo test -p database -- --ignored`. All its tables are dropped.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "needs a scratch PostgreSQL database in TEST_DATABASE_URL"]
    async fn test_row_lock_serializes_bookings_on_postgres() {
        use migration::{Migrator, MigratorTrait};
        use sea_orm::{ConnectOptions, Database};

        let url = std::env::var("TEST_DATABASE_URL").unwrap();
        let mut options = ConnectOptions::new(url);
        options.max_connections(8).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::fresh(&db).await.unwrap();

        let property_id = create_property(&db, Decimal::from(100)).await;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                let check_in = format!("2024-01-{:02}", 10 + i);
                tokio::spawn(async move {
                    ReservationService::create_reservation(
                        &db,
                        request(property_id, &check_in, "2024-01-25"),
                    )
                    .await
                })
            })
            .collect();

        let mut booked = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => booked += 1,
                Err(ServiceError::BookingConflict) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(booked, 1);

        let reservations = ReservationService::find_by_property_id(&db, property_id)
            .await
            .unwrap();
        assert_eq!(reservations.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_property() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;

        let (property, reservations) = ReservationService::list_by_property(&db, property_id)
            .await
            .unwrap();
        assert_eq!(property.id, property_id);
        assert!(reservations.is_empty());

        for (check_in, check_out) in [("2024-03-01", "2024-03-05"), ("2024-01-01", "2024-01-05")]
        {
            ReservationService::create_reservation(
                &db,
                request(property_id, check_in, check_out),
            )
            .await
            .unwrap();
        }

        let (_, reservations) = ReservationService::list_by_property(&db, property_id)
            .await
            .unwrap();
        let check_ins: Vec<_> = reservations.iter().map(|r| r.check_in).collect();
        assert_eq!(check_ins, vec![date("2024-03-01"), date("2024-01-01")]);

        assert!(matches!(
            ReservationService::list_by_property(&db, property_id + 1).await,
            Err(ServiceError::PropertyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = setup_db().await;
        let property_id = create_property(&db, Decimal::from(100)).await;
        let (created, _) = ReservationService::create_reservation(
            &db,
            request(property_id, "2024-01-10", "2024-01-12"),
        )
        .await
        .unwrap();

        let (found, property) = ReservationService::find_by_id(&db, created.id)
            .await
            .unwrap();
        assert_eq!(found, created);
        assert_eq!(property.id, property_id);

        assert!(matches!(
            ReservationService::find_by_id(&db, created.id + 1).await,
            Err(ServiceError::ReservationNotFound(_))
        ));
    }
}
