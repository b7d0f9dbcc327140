pub mod address_service;
pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod city_cache;
pub mod discount_service;
pub mod errors;
pub mod mailer;
pub mod media;
pub mod order_service;
pub mod product_service;
pub mod rate_client;
pub mod shipping_service;
pub mod user_service;
pub mod wishlist_service;
