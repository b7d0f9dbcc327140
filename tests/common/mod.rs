#![allow(dead_code)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use storefront_lib::api::config::Config;
use storefront_lib::api::state::{AppState, Repositories};
use storefront_lib::data::models::address::{Address, NewAddress};
use storefront_lib::data::models::discount::{Discount, NewDiscount};
use storefront_lib::data::models::user::User;
use storefront_lib::data::repos::memory::MemoryStore;
use storefront_lib::services::auth_service::RegisterUser;
use storefront_lib::services::mailer::{EmailMessage, MailError, Mailer};
use storefront_lib::services::product_service::CreateProduct;
use storefront_lib::services::rate_client::{
    City, CostRequest, CostValue, CourierCosts, RateApiError, ServiceCost, ShippingRateClient,
};

pub const PASSWORD: &str = "Secret1!";

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Rate API stand-in that answers from fixed data and counts calls.
#[derive(Default)]
pub struct FakeRates {
    pub cities: Vec<City>,
    pub services: Vec<ServiceCost>,
    pub city_calls: AtomicUsize,
    pub cost_requests: Mutex<Vec<CostRequest>>,
}

impl FakeRates {
    pub fn standard() -> Self {
        FakeRates {
            cities: vec![
                City {
                    city_id: "151".to_string(),
                    city_name: "Jakarta Barat".to_string(),
                    province: "DKI Jakarta".to_string(),
                },
                City {
                    city_id: "23".to_string(),
                    city_name: "Bandung".to_string(),
                    province: "Jawa Barat".to_string(),
                },
            ],
            services: vec![service("OKE", 18_000, "2-3"), service("REG", 22_000, "1-2")],
            ..FakeRates::default()
        }
    }

    pub fn city_calls(&self) -> usize {
        self.city_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CostRequest> {
        self.cost_requests.lock().unwrap().last().cloned()
    }
}

pub fn service(name: &str, value: i64, etd: &str) -> ServiceCost {
    ServiceCost {
        service: name.to_string(),
        description: String::new(),
        cost: vec![CostValue {
            value,
            etd: etd.to_string(),
        }],
    }
}

#[async_trait]
impl ShippingRateClient for FakeRates {
    async fn search_cities(&self, _city_name: &str) -> Result<Vec<City>, RateApiError> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.cities.clone())
    }

    async fn get_costs(&self, request: &CostRequest) -> Result<Vec<CourierCosts>, RateApiError> {
        self.cost_requests.lock().unwrap().push(request.clone());
        Ok(vec![CourierCosts {
            code: request.courier.clone(),
            name: request.courier.to_uppercase(),
            costs: self.services.clone(),
        }])
    }
}

/// Keeps every message instead of sending it.
#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl CapturingMailer {
    pub fn last(&self) -> Option<EmailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub rates: Arc<FakeRates>,
    pub mailer: Arc<CapturingMailer>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rates(FakeRates::standard())
    }

    pub fn with_rates(rates: FakeRates) -> Self {
        let rates = Arc::new(rates);
        let mailer = Arc::new(CapturingMailer::default());
        let state = AppState::new(
            Config::for_tests(),
            Repositories::in_memory(MemoryStore::new()),
            rates.clone(),
            mailer.clone(),
        );

        TestApp {
            state,
            rates,
            mailer,
        }
    }

    pub async fn user(&self, name: &str, email: &str) -> User {
        self.state
            .auth
            .register(RegisterUser {
                name: name.to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to register user")
    }

    pub async fn admin(&self) -> User {
        self.user("Admin", "admin@example.com").await
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state.jwt.generate_token(user).expect("Failed to sign token")
    }

    pub async fn category(&self, name: &str) -> i32 {
        self.state
            .categories
            .create(name)
            .await
            .expect("Failed to create category")
            .category_id
    }

    pub async fn product(&self, category_id: i32, name: &str, price: &str, stock: i32) -> i32 {
        self.state
            .products
            .create(CreateProduct {
                category_id,
                name: name.to_string(),
                description: None,
                price: dec(price),
                weight: dec("0.5"),
                stock,
            })
            .await
            .expect("Failed to create product")
            .product
            .product_id
    }

    pub async fn stock_of(&self, product_id: i32) -> i32 {
        self.state
            .products
            .get_by_id(product_id)
            .await
            .expect("Product missing")
            .product
            .stock
    }

    pub async fn address(&self, user_id: i32) -> Address {
        self.address_in(user_id, "Bandung", "Jawa Barat").await
    }

    pub async fn address_in(&self, user_id: i32, city: &str, state: &str) -> Address {
        self.state
            .addresses
            .create(NewAddress {
                user_id,
                address1: "Jl. Merdeka 10".to_string(),
                address2: None,
                city: city.to_string(),
                state: state.to_string(),
                country: "Indonesia".to_string(),
                postal_code: "40111".to_string(),
                phone: "08123456789".to_string(),
                address_type: "HOME".to_string(),
            })
            .await
            .expect("Failed to create address")
    }

    pub async fn discount(&self, code: &str, max_usage: Option<i32>) -> Discount {
        self.state
            .discounts
            .create(NewDiscount {
                code: code.to_string(),
                description: None,
                discount_type: "PERCENTAGE".to_string(),
                value: dec("10"),
                min_purchase: None,
                max_discount: None,
                expires_at: None,
                max_usage,
            })
            .await
            .expect("Failed to create discount")
    }

    pub async fn add_to_cart(&self, user_id: i32, product_id: i32, quantity: i32) {
        self.state
            .carts
            .add_or_update(user_id, product_id, quantity)
            .await
            .expect("Failed to add to cart");
    }
}

/// A buyer with an address and a cart of 2 x A (100) and 1 x B (50).
pub struct CheckoutFixture {
    pub buyer: User,
    pub address: Address,
    pub product_a: i32,
    pub product_b: i32,
}

pub async fn checkout_fixture(app: &TestApp) -> CheckoutFixture {
    let buyer = app.user("Budi", "budi@example.com").await;
    let address = app.address(buyer.user_id).await;
    let category = app.category("Apparel").await;
    let product_a = app.product(category, "Canvas Tote", "100", 5).await;
    let product_b = app.product(category, "Enamel Pin", "50", 1).await;
    app.add_to_cart(buyer.user_id, product_a, 2).await;
    app.add_to_cart(buyer.user_id, product_b, 1).await;

    CheckoutFixture {
        buyer,
        address,
        product_a,
        product_b,
    }
}
