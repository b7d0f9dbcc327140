use crate::data::models::schema::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = categories)]
#[diesel(primary_key(category_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = categories)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
}
