use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            available: model.available,
            owner_id: model.owner_id,
            request_id: model.request_id,
        }
    }
}

impl ActiveModel {
    pub fn for_owner(owner_id: i64, input: crate::models::CreateItem) -> Self {
        ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            available: Set(input.available),
            owner_id: Set(owner_id),
            request_id: Set(input.request_id),
            ..Default::default()
        }
    }
}
