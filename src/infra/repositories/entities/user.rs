//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::provider_profile::Entity")]
    ProviderProfile,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::provider_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderProfile.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Fallible: an unknown user_type string in the store is surfaced as a
/// validation error instead of being coerced to a default.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            user_type: UserType::try_from(model.user_type.as_str())?,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
