use crate::data::database::Database;
use crate::data::models::discount::{Discount, NewDiscount, UpdateDiscount};
use crate::data::repos::traits::repository::{DiscountRepository, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct DiscountRepo {
    db: Database,
}

impl DiscountRepo {
    pub fn new(db: Database) -> Self {
        DiscountRepo { db }
    }
}

#[async_trait]
impl DiscountRepository for DiscountRepo {
    async fn get_by_code(&self, code_query: &str) -> Result<Option<Discount>, result::Error> {
        use crate::data::models::schema::discounts::dsl::{code, discounts};

        let mut conn = self.db.get_connection().await?;

        discounts
            .filter(code.eq(code_query))
            .select(Discount::as_select())
            .first(&mut conn)
            .await
            .optional()
    }
}

#[async_trait]
impl Repository for DiscountRepo {
    type Id = i32;
    type Item = Discount;
    type NewItem = NewDiscount;
    type UpdateForm = UpdateDiscount;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error> {
        use crate::data::models::schema::discounts::dsl::{discount_id, discounts};

        let mut conn = self.db.get_connection().await?;

        discounts
            .order(discount_id.asc())
            .select(Discount::as_select())
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::discounts::dsl::{discount_id, discounts};

        let mut conn = self.db.get_connection().await?;

        discounts
            .filter(discount_id.eq(id))
            .select(Discount::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::discounts::dsl::{discount_id, discounts};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(discounts)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                discounts
                    .filter(discount_id.eq(new_id))
                    .select(Discount::as_select())
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
        use crate::data::models::schema::discounts::dsl::{discount_id, discounts};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(discounts.filter(discount_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                discounts
                    .filter(discount_id.eq(id))
                    .select(Discount::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::discounts::dsl::{discount_id, discounts};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(discounts.filter(discount_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
