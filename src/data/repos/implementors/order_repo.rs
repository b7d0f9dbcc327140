use crate::data::database::Database;
use crate::data::models::cart_item::{CartItem, CartLine};
use crate::data::models::checkout::plan_checkout;
use crate::data::models::discount::Discount;
use crate::data::models::order::{NewOrder, Order, OrderDetails, OrderStatus, UpdateOrder};
use crate::data::models::order_item::{NewOrderItem, OrderItem};
use crate::data::models::product::Product;
use crate::data::models::schema::{
    addresses, cart_items, discounts, order_items, orders, products, shipments,
};
use crate::data::repos::traits::order_repository::OrderRepository;
use crate::data::repos::errors::OrderRepoError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;

pub struct OrderRepo {
    db: Database,
}

impl OrderRepo {
    pub fn new(db: Database) -> Self {
        OrderRepo { db }
    }
}

/// Pairs each order with its items and their products.
async fn attach_items(
    conn: &mut AsyncMysqlConnection,
    orders_list: Vec<Order>,
) -> Result<Vec<OrderDetails>, result::Error> {
    if orders_list.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = orders_list.iter().map(|o| o.order_id).collect();

    let items_data: Vec<(OrderItem, Product)> = order_items::table
        .inner_join(products::table)
        .filter(order_items::order_id.eq_any(ids))
        .order(order_items::order_item_id.asc())
        .select((OrderItem::as_select(), Product::as_select()))
        .load(conn)
        .await?;

    let mut map: HashMap<i32, Vec<(OrderItem, Product)>> = HashMap::new();

    for item in items_data {
        map.entry(item.0.order_id).or_default().push(item);
    }

    Ok(orders_list
        .into_iter()
        .map(|order| {
            let items = map.remove(&order.order_id).unwrap_or_default();
            OrderDetails { order, items }
        })
        .collect())
}

async fn lock_order(
    conn: &mut AsyncMysqlConnection,
    order_id: i32,
) -> Result<Order, OrderRepoError> {
    orders::table
        .filter(orders::order_id.eq(order_id))
        .for_update()
        .select(Order::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or(OrderRepoError::OrderNotFound)
}

async fn restock_items(conn: &mut AsyncMysqlConnection, order_id: i32) -> Result<(), result::Error> {
    let items: Vec<OrderItem> = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .select(OrderItem::as_select())
        .load(conn)
        .await?;

    for item in items {
        diesel::update(products::table.filter(products::product_id.eq(item.product_id)))
            .set(products::stock.eq(products::stock + item.quantity))
            .execute(conn)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl OrderRepository for OrderRepo {
    async fn get_all(&self) -> Result<Vec<OrderDetails>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let list = orders::table
            .order(orders::order_id.desc())
            .select(Order::as_select())
            .load(&mut conn)
            .await?;

        attach_items(&mut conn, list).await
    }

    async fn get_by_id(&self, order_id: i32) -> Result<Option<OrderDetails>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let Some(order) = orders::table
            .filter(orders::order_id.eq(order_id))
            .select(Order::as_select())
            .first(&mut conn)
            .await
            .optional()?
        else {
            return Ok(None);
        };

        Ok(attach_items(&mut conn, vec![order]).await?.pop())
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<OrderDetails>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let list = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::order_id.desc())
            .select(Order::as_select())
            .load(&mut conn)
            .await?;

        attach_items(&mut conn, list).await
    }

    async fn update(
        &self,
        order_id: i32,
        form: UpdateOrder,
    ) -> Result<Option<Order>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                match diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                    .set(&form)
                    .execute(connection)
                    .await
                {
                    // Empty changeset
                    Ok(_) | Err(result::Error::QueryBuilderError(_)) => {}
                    Err(e) => return Err(e),
                }

                orders::table
                    .filter(orders::order_id.eq(order_id))
                    .select(Order::as_select())
                    .first(connection)
                    .await
                    .optional()
            }
            .scope_boxed()
        })
        .await
    }

    async fn place_order(
        &self,
        user_id: i32,
        address_id: i32,
        discount_code: Option<String>,
        now: NaiveDateTime,
    ) -> Result<OrderDetails, OrderRepoError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let lines: Vec<CartLine> = cart_items::table
                    .inner_join(products::table)
                    .filter(cart_items::user_id.eq(user_id))
                    .order(cart_items::cart_item_id.asc())
                    .for_update()
                    .select((CartItem::as_select(), Product::as_select()))
                    .load(connection)
                    .await?;

                if lines.is_empty() {
                    return Err(OrderRepoError::EmptyCart);
                }

                let discount = match discount_code.as_deref() {
                    Some(code) => Some(
                        discounts::table
                            .filter(discounts::code.eq(code))
                            .for_update()
                            .select(Discount::as_select())
                            .first(connection)
                            .await
                            .optional()?
                            .ok_or(OrderRepoError::DiscountNotFound)?,
                    ),
                    None => None,
                };

                let plan = plan_checkout(&lines, discount.as_ref(), now)?;

                let owns_address = addresses::table
                    .filter(addresses::address_id.eq(address_id))
                    .filter(addresses::user_id.eq(user_id))
                    .select(addresses::address_id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if owns_address.is_none() {
                    return Err(OrderRepoError::AddressNotFound);
                }

                if let Some(discount_id) = plan.discount_id {
                    let claimed = diesel::update(
                        discounts::table
                            .filter(discounts::discount_id.eq(discount_id))
                            .filter(
                                discounts::max_usage.is_null().or(discounts::usage_count
                                    .nullable()
                                    .lt(discounts::max_usage)),
                            ),
                    )
                    .set(discounts::usage_count.eq(discounts::usage_count + 1))
                    .execute(connection)
                    .await?;

                    if claimed == 0 {
                        return Err(OrderRepoError::DiscountExhausted);
                    }
                }

                for ((_, product), planned) in lines.iter().zip(&plan.items) {
                    let taken = diesel::update(
                        products::table
                            .filter(products::product_id.eq(planned.product_id))
                            .filter(products::stock.ge(planned.quantity)),
                    )
                    .set(products::stock.eq(products::stock - planned.quantity))
                    .execute(connection)
                    .await?;

                    if taken == 0 {
                        return Err(OrderRepoError::InsufficientStock {
                            product: product.name.clone(),
                        });
                    }
                }

                diesel::insert_into(orders::table)
                    .values(&NewOrder {
                        user_id,
                        address_id,
                        discount_id: plan.discount_id,
                        total: plan.total.clone(),
                        status: OrderStatus::Pending.as_str().to_string(),
                    })
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                let new_items: Vec<NewOrderItem> = plan
                    .items
                    .iter()
                    .map(|planned| NewOrderItem {
                        order_id: new_id,
                        product_id: planned.product_id,
                        quantity: planned.quantity,
                        price: planned.price.clone(),
                    })
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&new_items)
                    .execute(connection)
                    .await?;

                diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
                    .execute(connection)
                    .await?;

                let order = orders::table
                    .filter(orders::order_id.eq(new_id))
                    .select(Order::as_select())
                    .first(connection)
                    .await?;

                let mut details = attach_items(connection, vec![order]).await?;
                details.pop().ok_or(OrderRepoError::OrderNotFound)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_with_restock(&self, order_id: i32) -> Result<(), OrderRepoError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let order = lock_order(connection, order_id).await?;
                // Cancellation already returned the stock
                if order.status() != Some(OrderStatus::Cancelled) {
                    restock_items(connection, order_id).await?;
                }

                diesel::delete(shipments::table.filter(shipments::order_id.eq(order_id)))
                    .execute(connection)
                    .await?;
                diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                    .execute(connection)
                    .await?;
                diesel::delete(orders::table.filter(orders::order_id.eq(order_id)))
                    .execute(connection)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn cancel_with_restock(
        &self,
        order_id: i32,
        address_id: Option<i32>,
    ) -> Result<Order, OrderRepoError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let order = lock_order(connection, order_id).await?;

                let allowed = order
                    .status()
                    .is_some_and(|s| s != OrderStatus::Cancelled && s.can_transition_to(OrderStatus::Cancelled));
                if !allowed {
                    return Err(OrderRepoError::InvalidStatusTransition {
                        from: order.status,
                        to: OrderStatus::Cancelled.as_str().to_string(),
                    });
                }

                if let Some(address_id) = address_id {
                    let exists = addresses::table
                        .filter(addresses::address_id.eq(address_id))
                        .select(addresses::address_id)
                        .first::<i32>(connection)
                        .await
                        .optional()?;
                    if exists.is_none() {
                        return Err(OrderRepoError::AddressNotFound);
                    }
                }

                restock_items(connection, order_id).await?;

                diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                    .set(&UpdateOrder {
                        address_id,
                        status: Some(OrderStatus::Cancelled.as_str().to_string()),
                    })
                    .execute(connection)
                    .await?;

                let cancelled = orders::table
                    .filter(orders::order_id.eq(order_id))
                    .select(Order::as_select())
                    .first(connection)
                    .await?;

                Ok(cancelled)
            }
            .scope_boxed()
        })
        .await
    }
}
