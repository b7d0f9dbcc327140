pub mod address_controller;
pub mod auth_controller;
pub mod cart_controller;
pub mod category_controller;
pub mod discount_controller;
pub mod dto;
pub mod order_controller;
pub mod product_controller;
pub mod shipping_controller;
pub mod user_controller;
pub mod wishlist_controller;
