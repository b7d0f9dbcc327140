use crate::api::config::Config;
use crate::data::database::Database;
use crate::data::repos::implementors::{
    address_repo::AddressRepo, cart_repo::CartRepo, category_repo::CategoryRepo,
    discount_repo::DiscountRepo, order_repo::OrderRepo, product_repo::ProductRepo,
    shipment_repo::ShipmentRepo, user_repo::UserRepo, wishlist_repo::WishlistRepo,
};
use crate::data::repos::memory::{
    MemoryAddressRepo, MemoryCartRepo, MemoryCategoryRepo, MemoryDiscountRepo, MemoryOrderRepo,
    MemoryProductRepo, MemoryShipmentRepo, MemoryStore, MemoryUserRepo, MemoryWishlistRepo,
};
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::order_repository::OrderRepository;
use crate::data::repos::traits::repository::{
    AddressRepository, CategoryRepository, DiscountRepository, ProductRepository,
    ShipmentRepository, UserRepository,
};
use crate::data::repos::traits::wishlist_repository::WishlistRepository;
use crate::security::jwt::JwtService;
use crate::services::address_service::AddressService;
use crate::services::auth_service::AuthService;
use crate::services::cart_service::CartService;
use crate::services::category_service::CategoryService;
use crate::services::city_cache::CityCache;
use crate::services::discount_service::DiscountService;
use crate::services::mailer::Mailer;
use crate::services::media::MediaStorage;
use crate::services::order_service::OrderService;
use crate::services::product_service::ProductService;
use crate::services::rate_client::ShippingRateClient;
use crate::services::shipping_service::ShippingService;
use crate::services::user_service::UserService;
use crate::services::wishlist_service::WishlistService;
use std::sync::Arc;

/// One repository per domain, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub discounts: Arc<dyn DiscountRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub shipments: Arc<dyn ShipmentRepository>,
    pub wishlists: Arc<dyn WishlistRepository>,
}

impl Repositories {
    pub fn mysql(db: &Database) -> Self {
        Repositories {
            users: Arc::new(UserRepo::new(db.clone())),
            addresses: Arc::new(AddressRepo::new(db.clone())),
            categories: Arc::new(CategoryRepo::new(db.clone())),
            products: Arc::new(ProductRepo::new(db.clone())),
            discounts: Arc::new(DiscountRepo::new(db.clone())),
            carts: Arc::new(CartRepo::new(db.clone())),
            orders: Arc::new(OrderRepo::new(db.clone())),
            shipments: Arc::new(ShipmentRepo::new(db.clone())),
            wishlists: Arc::new(WishlistRepo::new(db.clone())),
        }
    }

    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Repositories {
            users: Arc::new(MemoryUserRepo::new(store.clone())),
            addresses: Arc::new(MemoryAddressRepo::new(store.clone())),
            categories: Arc::new(MemoryCategoryRepo::new(store.clone())),
            products: Arc::new(MemoryProductRepo::new(store.clone())),
            discounts: Arc::new(MemoryDiscountRepo::new(store.clone())),
            carts: Arc::new(MemoryCartRepo::new(store.clone())),
            orders: Arc::new(MemoryOrderRepo::new(store.clone())),
            shipments: Arc::new(MemoryShipmentRepo::new(store.clone())),
            wishlists: Arc::new(MemoryWishlistRepo::new(store)),
        }
    }
}

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: JwtService,
    pub addresses: Arc<AddressService>,
    pub auth: Arc<AuthService>,
    pub carts: Arc<CartService>,
    pub categories: Arc<CategoryService>,
    pub discounts: Arc<DiscountService>,
    pub orders: Arc<OrderService>,
    pub products: Arc<ProductService>,
    pub shipping: Arc<ShippingService>,
    pub users: Arc<UserService>,
    pub wishlists: Arc<WishlistService>,
}

impl AppState {
    pub fn new(
        config: Config,
        repos: Repositories,
        rates: Arc<dyn ShippingRateClient>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let jwt = JwtService::from_config(&config);
        let shipping = &config.shipping;

        AppState {
            addresses: Arc::new(AddressService::new(repos.addresses.clone())),
            auth: Arc::new(AuthService::new(
                repos.users.clone(),
                jwt.clone(),
                mailer,
                config.client_url.clone(),
                config.admin_email.clone(),
            )),
            carts: Arc::new(CartService::new(repos.carts.clone(), repos.products.clone())),
            categories: Arc::new(CategoryService::new(repos.categories.clone())),
            discounts: Arc::new(DiscountService::new(repos.discounts.clone())),
            orders: Arc::new(OrderService::new(repos.orders.clone())),
            products: Arc::new(ProductService::new(
                repos.products.clone(),
                repos.categories.clone(),
                MediaStorage::new(&config.upload_dir),
            )),
            shipping: Arc::new(ShippingService::new(
                repos.orders.clone(),
                repos.addresses.clone(),
                repos.shipments.clone(),
                rates,
                CityCache::new(shipping.city_cache_ttl, shipping.city_cache_capacity),
                shipping.origin_city_id.clone(),
            )),
            users: Arc::new(UserService::new(repos.users.clone())),
            wishlists: Arc::new(WishlistService::new(repos.wishlists, repos.products)),
            jwt,
            config: Arc::new(config),
        }
    }

    /// `{PUBLIC_BASE_URL}/images/{file}` for a stored image.
    pub fn image_url(&self, file_name: &str) -> String {
        format!(
            "{}/images/{}",
            self.config.public_base_url.trim_end_matches('/'),
            file_name
        )
    }
}
