use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Represents whether a property can currently be rented
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    /// Open for reservations
    #[default]
    Available,
    /// Registered, but not being rented out
    Inactive,
    /// Blocked for maintenance or a similar problem
    Blocked,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for PropertyStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "PropertyStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::String(sea_orm::sea_query::StringLen::N(20))
    }
}

#[cfg(feature = "database")]
impl From<PropertyStatus> for Value {
    fn from(status: PropertyStatus) -> Self {
        Value::String(Some(Box::new(status.as_str().to_owned())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for PropertyStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e: strum::ParseError| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to read PropertyStatus from {val:?}: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for PropertyStatus {
    fn null() -> Value {
        Value::String(None)
    }
}
