use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the patients table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Patient
impl From<Model> for crate::models::Patient {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            address: model.address,
            phone: model.phone,
            email: model.email,
            created_at: model.created_at.into(),
        }
    }
}

// The id and created_at are assigned by column defaults
impl From<crate::models::CreatePatient> for ActiveModel {
    fn from(input: crate::models::CreatePatient) -> Self {
        ActiveModel {
            id: NotSet,
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            address: Set(input.address),
            phone: Set(input.phone),
            email: Set(input.email),
            created_at: NotSet,
        }
    }
}
