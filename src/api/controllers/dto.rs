pub mod address_dto;
pub mod auth_dto;
pub mod cart_dto;
pub mod category_dto;
pub mod discount_dto;
pub mod order_dto;
pub mod product_dto;
pub mod shipping_dto;
pub mod user_dto;
pub mod wishlist_dto;
