use crate::data::database::Database;
use crate::data::models::category::{Category, NewCategory, UpdateCategory};
use crate::data::repos::traits::repository::{CategoryRepository, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct CategoryRepo {
    db: Database,
}

impl CategoryRepo {
    pub fn new(db: Database) -> Self {
        CategoryRepo { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepo {
    async fn get_by_slug(&self, slug_query: &str) -> Result<Option<Category>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, slug};

        let mut conn = self.db.get_connection().await?;

        categories
            .filter(slug.eq(slug_query))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
    }
}

#[async_trait]
impl Repository for CategoryRepo {
    type Id = i32;
    type Item = Category;
    type NewItem = NewCategory;
    type UpdateForm = UpdateCategory;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, name};

        let mut conn = self.db.get_connection().await?;

        categories
            .order(name.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = self.db.get_connection().await?;

        categories
            .filter(category_id.eq(id))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(categories)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                categories
                    .filter(category_id.eq(new_id))
                    .select(Category::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(categories.filter(category_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                categories
                    .filter(category_id.eq(id))
                    .select(Category::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(categories.filter(category_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
