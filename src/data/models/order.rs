use crate::data::models::address::Address;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Address, foreign_key = address_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub discount_id: Option<i32>,
    pub total: BigDecimal,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub address_id: i32,
    pub discount_id: Option<i32>,
    pub total: BigDecimal,
    pub status: String,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = orders)]
pub struct UpdateOrder {
    pub address_id: Option<i32>,
    pub status: Option<String>,
}

/// An order with its lines and the products they reference.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<(OrderItem, Product)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Completed and cancelled orders are final.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Cancelled)
                | (Accepted, Completed)
                | (Accepted, Cancelled)
        ) || *self == next
    }
}

impl FromStr for OrderStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "ACCEPTED" => Ok(OrderStatus::Accepted),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err("Unknown order status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_states_do_not_move() {
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
