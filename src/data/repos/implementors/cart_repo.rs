use crate::data::database::Database;
use crate::data::models::cart_item::{CartItem, CartLine, NewCartItem};
use crate::data::models::product::Product;
use crate::data::models::schema::{cart_items, products};
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::errors::CartRepoError;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

pub struct CartRepo {
    db: Database,
}

impl CartRepo {
    pub fn new(db: Database) -> Self {
        CartRepo { db }
    }
}

/// Locks the product row and checks the requested quantity against its stock.
async fn lock_product_with_stock(
    conn: &mut AsyncMysqlConnection,
    product_id: i32,
    quantity: i32,
) -> Result<Product, CartRepoError> {
    let product = products::table
        .filter(products::product_id.eq(product_id))
        .for_update()
        .select(Product::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or(CartRepoError::ProductNotFound)?;

    if !product.has_stock_for(quantity) {
        return Err(CartRepoError::InsufficientStock {
            product: product.name,
            available: product.stock,
        });
    }

    Ok(product)
}

async fn find_line(
    conn: &mut AsyncMysqlConnection,
    user_id: i32,
    product_id: i32,
) -> Result<Option<CartItem>, result::Error> {
    cart_items::table
        .filter(cart_items::user_id.eq(user_id))
        .filter(cart_items::product_id.eq(product_id))
        .for_update()
        .select(CartItem::as_select())
        .first(conn)
        .await
        .optional()
}

async fn set_quantity(
    conn: &mut AsyncMysqlConnection,
    cart_item_id: i32,
    quantity: i32,
) -> Result<CartItem, result::Error> {
    diesel::update(cart_items::table.filter(cart_items::cart_item_id.eq(cart_item_id)))
        .set(cart_items::quantity.eq(quantity))
        .execute(conn)
        .await?;

    cart_items::table
        .filter(cart_items::cart_item_id.eq(cart_item_id))
        .select(CartItem::as_select())
        .first(conn)
        .await
}

#[async_trait]
impl CartRepository for CartRepo {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<CartLine>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        cart_items::table
            .inner_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::cart_item_id.asc())
            .select((CartItem::as_select(), Product::as_select()))
            .load(&mut conn)
            .await
    }

    async fn get_all(&self) -> Result<Vec<CartLine>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        cart_items::table
            .inner_join(products::table)
            .order((cart_items::user_id.asc(), cart_items::cart_item_id.asc()))
            .select((CartItem::as_select(), Product::as_select()))
            .load(&mut conn)
            .await
    }

    async fn get_by_id(&self, cart_item_id: i32) -> Result<Option<CartItem>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        cart_items::table
            .filter(cart_items::cart_item_id.eq(cart_item_id))
            .select(CartItem::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn upsert(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, bool), CartRepoError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                lock_product_with_stock(connection, product_id, quantity).await?;

                if let Some(line) = find_line(connection, user_id, product_id).await? {
                    let updated = set_quantity(connection, line.cart_item_id, quantity).await?;
                    return Ok((updated, false));
                }

                diesel::insert_into(cart_items::table)
                    .values(&NewCartItem {
                        user_id,
                        product_id,
                        quantity,
                    })
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                let created = cart_items::table
                    .filter(cart_items::cart_item_id.eq(new_id))
                    .select(CartItem::as_select())
                    .first(connection)
                    .await?;

                Ok((created, true))
            }
            .scope_boxed()
        })
        .await
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, CartRepoError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                lock_product_with_stock(connection, product_id, quantity).await?;

                let line = find_line(connection, user_id, product_id)
                    .await?
                    .ok_or(CartRepoError::CartItemNotFound)?;

                if quantity == 0 {
                    diesel::delete(
                        cart_items::table.filter(cart_items::cart_item_id.eq(line.cart_item_id)),
                    )
                    .execute(connection)
                    .await?;
                    return Ok(None);
                }

                let updated = set_quantity(connection, line.cart_item_id, quantity).await?;
                Ok(Some(updated))
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, cart_item_id: i32) -> Result<bool, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let affected =
            diesel::delete(cart_items::table.filter(cart_items::cart_item_id.eq(cart_item_id)))
                .execute(&mut conn)
                .await?;

        Ok(affected > 0)
    }
}
