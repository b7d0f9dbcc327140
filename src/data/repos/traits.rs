pub mod cart_repository;
pub mod order_repository;
pub mod repository;
pub mod wishlist_repository;
