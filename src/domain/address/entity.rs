use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub full_name: String,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub street_address: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub delivery_instructions: Option<String>,
    pub customer_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::customer::entity::Entity",
        from = "Column::CustomerId",
        to = "crate::domain::customer::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<crate::domain::customer::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
