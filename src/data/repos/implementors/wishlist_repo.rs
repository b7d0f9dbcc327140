use crate::data::database::Database;
use crate::data::models::product::Product;
use crate::data::models::wishlist_item::{NewWishlistItem, WishlistItem};
use crate::data::repos::traits::wishlist_repository::WishlistRepository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct WishlistRepo {
    db: Database,
}

impl WishlistRepo {
    pub fn new(db: Database) -> Self {
        WishlistRepo { db }
    }
}

#[async_trait]
impl WishlistRepository for WishlistRepo {
    async fn get_all(&self) -> Result<Vec<(WishlistItem, Product)>, result::Error> {
        use crate::data::models::schema::products::dsl::products;
        use crate::data::models::schema::wishlist_items::dsl::{wishlist_item_id, wishlist_items};

        let mut conn = self.db.get_connection().await?;

        wishlist_items
            .inner_join(products)
            .order(wishlist_item_id.asc())
            .select((WishlistItem::as_select(), Product::as_select()))
            .load(&mut conn)
            .await
    }

    async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<(WishlistItem, Product)>, result::Error> {
        use crate::data::models::schema::products::dsl::products;
        use crate::data::models::schema::wishlist_items::dsl::{wishlist_item_id, wishlist_items};

        let mut conn = self.db.get_connection().await?;

        wishlist_items
            .inner_join(products)
            .filter(wishlist_item_id.eq(id))
            .select((WishlistItem::as_select(), Product::as_select()))
            .first(&mut conn)
            .await
            .optional()
    }

    async fn get_by_user_id(
        &self,
        user_id_query: i32,
    ) -> Result<Vec<(WishlistItem, Product)>, result::Error> {
        use crate::data::models::schema::products::dsl::products;
        use crate::data::models::schema::wishlist_items::dsl::{
            user_id, wishlist_item_id, wishlist_items,
        };

        let mut conn = self.db.get_connection().await?;

        wishlist_items
            .inner_join(products)
            .filter(user_id.eq(user_id_query))
            .order(wishlist_item_id.asc())
            .select((WishlistItem::as_select(), Product::as_select()))
            .load(&mut conn)
            .await
    }

    async fn add(&self, item: NewWishlistItem) -> Result<WishlistItem, result::Error> {
        use crate::data::models::schema::wishlist_items::dsl::{wishlist_item_id, wishlist_items};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(wishlist_items)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                wishlist_items
                    .filter(wishlist_item_id.eq(new_id))
                    .select(WishlistItem::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        use crate::data::models::schema::wishlist_items::dsl::{wishlist_item_id, wishlist_items};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(wishlist_items.filter(wishlist_item_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
