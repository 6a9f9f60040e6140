use crate::{
    entities::{properties, reservations},
    error::{Result, ServiceError},
};
use chrono::Utc;
use log::info;
use models::PropertyStatus;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};

/// Mutable fields of a property, shared by create and update
#[derive(Debug, Clone)]
pub struct PropertyInput {
    pub title: String,
    pub property_type: String,
    pub location: String,
    pub nightly_price: Decimal,
    pub max_guests: i32,
    pub description: Option<String>,
}

pub struct PropertyService;

impl PropertyService {
    pub async fn create(
        db: &DatabaseConnection,
        input: PropertyInput,
    ) -> Result<properties::Model> {
        let now = Utc::now().naive_utc();

        let property = properties::ActiveModel {
            title: Set(input.title),
            r#type: Set(input.property_type),
            location: Set(input.location),
            status: Set(PropertyStatus::Available),
            nightly_price: Set(input.nightly_price),
            max_guests: Set(input.max_guests),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created property {} ({})", property.id, property.title);
        Ok(property)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<properties::Model>> {
        Ok(properties::Entity::find_by_id(id).one(db).await?)
    }

    /// Like `find_by_id`, but a missing property is an error
    pub async fn get<C: ConnectionTrait>(db: &C, id: i64) -> Result<properties::Model> {
        Self::find_by_id(db, id)
            .await?
            .ok_or(ServiceError::PropertyNotFound(id))
    }

    pub async fn exists<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
        let count = properties::Entity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }

    /// Overwrites every mutable field; status and creation time are kept
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: PropertyInput,
    ) -> Result<properties::Model> {
        let existing = Self::get(db, id).await?;

        let mut property: properties::ActiveModel = existing.into();
        property.title = Set(input.title);
        property.r#type = Set(input.property_type);
        property.location = Set(input.location);
        property.nightly_price = Set(input.nightly_price);
        property.max_guests = Set(input.max_guests);
        property.description = Set(input.description);
        property.updated_at = Set(Utc::now().naive_utc());

        let property = property.update(db).await?;

        info!("Updated property {}", property.id);
        Ok(property)
    }

    /// Deletes a property that has no reservations
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<()> {
        let txn = db.begin().await?;

        if !Self::exists(&txn, id).await? {
            return Err(ServiceError::PropertyNotFound(id));
        }

        let reservation_count = reservations::Entity::find()
            .filter(reservations::Column::PropertyId.eq(id))
            .count(&txn)
            .await?;
        if reservation_count > 0 {
            return Err(ServiceError::PropertyHasReservations(id));
        }

        properties::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted property {id}");
        Ok(())
    }

    /// Query properties with pagination and an optional location filter.
    ///
    /// `page` is 0-based. The location filter is a case-insensitive
    /// substring match; a blank filter lists everything.
    pub async fn list_paginated(
        db: &DatabaseConnection,
        location: Option<&str>,
        page: u64,
        size: u64,
    ) -> Result<(Vec<properties::Model>, u64)> {
        let mut query = properties::Entity::find();

        if let Some(location) = location
            && !location.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like(&location.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(properties::Column::Location)))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        let total_items = query.clone().count(db).await?;

        // An offset past what SQL can express can only be an empty page
        let offset = page.checked_mul(size).and_then(|o| i64::try_from(o).ok());
        if offset.is_none() {
            return Ok((Vec::new(), total_items));
        }

        let paginator = query
            .order_by_asc(properties::Column::Id)
            .paginate(db, size);
        let properties = paginator.fetch_page(page).await?;

        Ok((properties, total_items))
    }
}

const LIKE_ESCAPE: char = '!';

/// Makes `%` and `_` in user input match literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
