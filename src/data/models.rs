pub mod address;
pub mod cart_item;
pub mod category;
pub mod checkout;
pub mod discount;
pub mod order;
pub mod order_item;
pub mod product;
pub mod schema;
pub mod shipment;
pub mod user;
pub mod wishlist_item;
