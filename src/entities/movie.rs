use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// ISO-8601 civil datetime, e.g. `2023-03-02T00:00:00`.
    pub date: String,
    pub score: f64,
    pub genre: String,
    #[sea_orm(column_type = "Text")]
    pub overview: String,
    #[sea_orm(column_type = "Text")]
    pub crew: String,
    pub orig_title: String,
    pub status: String,
    pub orig_lang: String,
    pub budget: f64,
    pub revenue: f64,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
