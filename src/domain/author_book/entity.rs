use sea_orm::entity::prelude::*;

/// Unique pairing of one author with one book.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "author_books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub author_id: Uuid,
    pub book_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::author::entity::Entity",
        from = "Column::AuthorId",
        to = "crate::domain::author::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "crate::domain::book::entity::Entity",
        from = "Column::BookId",
        to = "crate::domain::book::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<crate::domain::author::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<crate::domain::book::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
