//! In-process repositories backed by one shared [`MemoryStore`].
//!
//! They mirror the MySQL implementors closely enough to drive the services
//! in tests: unique keys and foreign keys raise the same diesel error kinds,
//! and every multi-step operation runs under a single lock so it either
//! fully applies or leaves the store untouched.

use crate::data::models::address::{Address, NewAddress, UpdateAddress};
use crate::data::models::cart_item::{CartItem, CartLine};
use crate::data::models::category::{Category, NewCategory, UpdateCategory};
use crate::data::models::checkout::plan_checkout;
use crate::data::models::discount::{Discount, NewDiscount, UpdateDiscount};
use crate::data::models::order::{Order, OrderDetails, OrderStatus, UpdateOrder};
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::{
    NewProduct, NewProductImage, Product, ProductImage, UpdateProduct,
};
use crate::data::models::shipment::{NewShipment, Shipment, UpdateShipment};
use crate::data::models::user::{NewUser, ResetTokenChange, UpdateUser, User};
use crate::data::models::wishlist_item::{NewWishlistItem, WishlistItem};
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::order_repository::OrderRepository;
use crate::data::repos::traits::repository::{
    AddressRepository, CategoryRepository, DiscountRepository, ProductRepository, Repository,
    ShipmentRepository, UserRepository,
};
use crate::data::repos::traits::wishlist_repository::WishlistRepository;
use crate::data::repos::errors::{CartRepoError, OrderRepoError};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::result::{self, DatabaseErrorKind};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| pred(*row)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(*row)).cloned().collect()
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(pred)
    }

    fn retain(&mut self, keep: impl Fn(&T) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    addresses: Table<Address>,
    categories: Table<Category>,
    products: Table<Product>,
    product_images: Table<ProductImage>,
    cart_items: Table<CartItem>,
    discounts: Table<Discount>,
    orders: Table<Order>,
    order_items: Table<OrderItem>,
    shipments: Table<Shipment>,
    wishlist_items: Table<WishlistItem>,
}

impl Tables {
    fn order_details(&self, order: Order) -> OrderDetails {
        let items = self
            .order_items
            .filter(|item| item.order_id == order.order_id)
            .into_iter()
            .filter_map(|item| {
                let product = self.products.get(item.product_id)?;
                Some((item, product))
            })
            .collect();
        OrderDetails { order, items }
    }

    fn cart_lines(&self, pred: impl Fn(&CartItem) -> bool) -> Vec<CartLine> {
        self.cart_items
            .filter(pred)
            .into_iter()
            .filter_map(|item| {
                let product = self.products.get(item.product_id)?;
                Some((item, product))
            })
            .collect()
    }

    fn wishlist_rows(&self, pred: impl Fn(&WishlistItem) -> bool) -> Vec<(WishlistItem, Product)> {
        self.wishlist_items
            .filter(pred)
            .into_iter()
            .filter_map(|item| {
                let product = self.products.get(item.product_id)?;
                Some((item, product))
            })
            .collect()
    }

    fn restock(&mut self, order_id: i32) {
        for item in self.order_items.filter(|item| item.order_id == order_id) {
            if let Some(product) = self.products.rows.get_mut(&item.product_id) {
                product.stock += item.quantity;
            }
        }
    }
}

/// Shared state behind every in-memory repository.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryStore::default())
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn unique_violation(key: &str) -> result::Error {
    result::Error::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new(format!("Duplicate entry for key '{key}'")),
    )
}

fn foreign_key_violation(constraint: &str) -> result::Error {
    result::Error::DatabaseError(
        DatabaseErrorKind::ForeignKeyViolation,
        Box::new(format!("Foreign key constraint fails: {constraint}")),
    )
}

macro_rules! memory_repo {
    ($name:ident) => {
        pub struct $name {
            store: Arc<MemoryStore>,
        }

        impl $name {
            pub fn new(store: Arc<MemoryStore>) -> Self {
                $name { store }
            }
        }
    };
}

memory_repo!(MemoryUserRepo);
memory_repo!(MemoryAddressRepo);
memory_repo!(MemoryCategoryRepo);
memory_repo!(MemoryProductRepo);
memory_repo!(MemoryDiscountRepo);
memory_repo!(MemoryShipmentRepo);
memory_repo!(MemoryCartRepo);
memory_repo!(MemoryOrderRepo);
memory_repo!(MemoryWishlistRepo);

#[async_trait]
impl Repository for MemoryUserRepo {
    type Id = i32;
    type Item = User;
    type NewItem = NewUser;
    type UpdateForm = UpdateUser;

    async fn get_all(&self) -> Result<Vec<User>, result::Error> {
        Ok(self.store.lock().users.all())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, result::Error> {
        Ok(self.store.lock().users.get(id))
    }

    async fn add(&self, item: NewUser) -> Result<User, result::Error> {
        let mut tables = self.store.lock();
        if tables.users.any(|u| u.email == item.email) {
            return Err(unique_violation("users.email"));
        }
        let stamp = now();
        Ok(tables.users.insert_with(|user_id| User {
            user_id,
            name: item.name,
            email: item.email,
            password_hash: item.password_hash,
            role: item.role,
            reset_token: None,
            reset_token_expiry: None,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(&self, id: i32, form: UpdateUser) -> Result<Option<User>, result::Error> {
        let mut tables = self.store.lock();
        if let Some(email) = &form.email {
            if tables.users.any(|u| &u.email == email && u.user_id != id) {
                return Err(unique_violation("users.email"));
            }
        }
        let Some(user) = tables.users.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = form.name {
            user.name = name;
        }
        if let Some(email) = form.email {
            user.email = email;
        }
        if let Some(password_hash) = form.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = form.role {
            user.role = role;
        }
        user.updated_at = Some(now());
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        let mut tables = self.store.lock();
        if tables.orders.any(|o| o.user_id == id) {
            return Err(foreign_key_violation("orders.user_id"));
        }
        if tables.users.rows.remove(&id).is_none() {
            return Ok(false);
        }
        tables.addresses.retain(|a| a.user_id != id);
        tables.cart_items.retain(|c| c.user_id != id);
        tables.wishlist_items.retain(|w| w.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, result::Error> {
        Ok(self.store.lock().users.find(|u| u.email == email))
    }

    async fn set_reset_token(
        &self,
        user_id: i32,
        change: ResetTokenChange,
    ) -> Result<(), result::Error> {
        if let Some(user) = self.store.lock().users.rows.get_mut(&user_id) {
            user.reset_token = change.reset_token;
            user.reset_token_expiry = change.reset_token_expiry;
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for MemoryAddressRepo {
    type Id = i32;
    type Item = Address;
    type NewItem = NewAddress;
    type UpdateForm = UpdateAddress;

    async fn get_all(&self) -> Result<Vec<Address>, result::Error> {
        Ok(self.store.lock().addresses.all())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Address>, result::Error> {
        Ok(self.store.lock().addresses.get(id))
    }

    async fn add(&self, item: NewAddress) -> Result<Address, result::Error> {
        let mut tables = self.store.lock();
        if tables.users.get(item.user_id).is_none() {
            return Err(foreign_key_violation("addresses.user_id"));
        }
        let stamp = now();
        Ok(tables.addresses.insert_with(|address_id| Address {
            address_id,
            user_id: item.user_id,
            address1: item.address1,
            address2: item.address2,
            city: item.city,
            state: item.state,
            country: item.country,
            postal_code: item.postal_code,
            phone: item.phone,
            address_type: item.address_type,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(&self, id: i32, form: UpdateAddress) -> Result<Option<Address>, result::Error> {
        let mut tables = self.store.lock();
        let Some(address) = tables.addresses.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = form.address1 {
            address.address1 = v;
        }
        if let Some(v) = form.address2 {
            address.address2 = Some(v);
        }
        if let Some(v) = form.city {
            address.city = v;
        }
        if let Some(v) = form.state {
            address.state = v;
        }
        if let Some(v) = form.country {
            address.country = v;
        }
        if let Some(v) = form.postal_code {
            address.postal_code = v;
        }
        if let Some(v) = form.phone {
            address.phone = v;
        }
        if let Some(v) = form.address_type {
            address.address_type = v;
        }
        address.updated_at = Some(now());
        Ok(Some(address.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        let mut tables = self.store.lock();
        if tables.orders.any(|o| o.address_id == id) {
            return Err(foreign_key_violation("orders.address_id"));
        }
        Ok(tables.addresses.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl AddressRepository for MemoryAddressRepo {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Address>, result::Error> {
        Ok(self.store.lock().addresses.filter(|a| a.user_id == user_id))
    }
}

#[async_trait]
impl Repository for MemoryCategoryRepo {
    type Id = i32;
    type Item = Category;
    type NewItem = NewCategory;
    type UpdateForm = UpdateCategory;

    async fn get_all(&self) -> Result<Vec<Category>, result::Error> {
        let mut list = self.store.lock().categories.all();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Category>, result::Error> {
        Ok(self.store.lock().categories.get(id))
    }

    async fn add(&self, item: NewCategory) -> Result<Category, result::Error> {
        let mut tables = self.store.lock();
        if tables.categories.any(|c| c.slug == item.slug) {
            return Err(unique_violation("categories.slug"));
        }
        let stamp = now();
        Ok(tables.categories.insert_with(|category_id| Category {
            category_id,
            name: item.name,
            slug: item.slug,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(
        &self,
        id: i32,
        form: UpdateCategory,
    ) -> Result<Option<Category>, result::Error> {
        let mut tables = self.store.lock();
        if let Some(slug) = &form.slug {
            if tables.categories.any(|c| &c.slug == slug && c.category_id != id) {
                return Err(unique_violation("categories.slug"));
            }
        }
        let Some(category) = tables.categories.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = form.name {
            category.name = name;
        }
        if let Some(slug) = form.slug {
            category.slug = slug;
        }
        category.updated_at = Some(now());
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        let mut tables = self.store.lock();
        if tables.products.any(|p| p.category_id == id) {
            return Err(foreign_key_violation("products.category_id"));
        }
        Ok(tables.categories.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepo {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, result::Error> {
        Ok(self.store.lock().categories.find(|c| c.slug == slug))
    }
}

#[async_trait]
impl Repository for MemoryProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem = NewProduct;
    type UpdateForm = UpdateProduct;

    async fn get_all(&self) -> Result<Vec<Product>, result::Error> {
        Ok(self.store.lock().products.all())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, result::Error> {
        Ok(self.store.lock().products.get(id))
    }

    async fn add(&self, item: NewProduct) -> Result<Product, result::Error> {
        let mut tables = self.store.lock();
        if tables.categories.get(item.category_id).is_none() {
            return Err(foreign_key_violation("products.category_id"));
        }
        if tables.products.any(|p| p.slug == item.slug) {
            return Err(unique_violation("products.slug"));
        }
        let stamp = now();
        Ok(tables.products.insert_with(|product_id| Product {
            product_id,
            category_id: item.category_id,
            name: item.name,
            slug: item.slug,
            description: item.description,
            price: item.price,
            weight: item.weight,
            stock: item.stock,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(&self, id: i32, form: UpdateProduct) -> Result<Option<Product>, result::Error> {
        let mut tables = self.store.lock();
        if let Some(slug) = &form.slug {
            if tables.products.any(|p| &p.slug == slug && p.product_id != id) {
                return Err(unique_violation("products.slug"));
            }
        }
        if let Some(category_id) = form.category_id {
            if tables.categories.get(category_id).is_none() {
                return Err(foreign_key_violation("products.category_id"));
            }
        }
        let Some(product) = tables.products.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = form.category_id {
            product.category_id = v;
        }
        if let Some(v) = form.name {
            product.name = v;
        }
        if let Some(v) = form.slug {
            product.slug = v;
        }
        if let Some(v) = form.description {
            product.description = Some(v);
        }
        if let Some(v) = form.price {
            product.price = v;
        }
        if let Some(v) = form.weight {
            product.weight = v;
        }
        if let Some(v) = form.stock {
            product.stock = v;
        }
        product.updated_at = Some(now());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        let mut tables = self.store.lock();
        if tables.order_items.any(|i| i.product_id == id) {
            return Err(foreign_key_violation("order_items.product_id"));
        }
        if tables.products.rows.remove(&id).is_none() {
            return Ok(false);
        }
        tables.product_images.retain(|i| i.product_id != id);
        tables.cart_items.retain(|c| c.product_id != id);
        tables.wishlist_items.retain(|w| w.product_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepo {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, result::Error> {
        Ok(self.store.lock().products.find(|p| p.slug == slug))
    }

    async fn get_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, result::Error> {
        Ok(self
            .store
            .lock()
            .products
            .filter(|p| p.category_id == category_id))
    }

    async fn get_images(&self, product_id: i32) -> Result<Vec<ProductImage>, result::Error> {
        let mut images = self
            .store
            .lock()
            .product_images
            .filter(|i| i.product_id == product_id);
        images.sort_by_key(|i| (!i.is_primary, i.image_id));
        Ok(images)
    }

    async fn replace_images(
        &self,
        product_id: i32,
        images: Vec<NewProductImage>,
    ) -> Result<Vec<ProductImage>, result::Error> {
        let mut tables = self.store.lock();
        if tables.products.get(product_id).is_none() {
            return Err(foreign_key_violation("product_images.product_id"));
        }
        tables.product_images.retain(|i| i.product_id != product_id);
        let stamp = now();
        let mut stored: Vec<ProductImage> = images
            .into_iter()
            .map(|image| {
                tables.product_images.insert_with(|image_id| ProductImage {
                    image_id,
                    product_id: image.product_id,
                    image: image.image,
                    is_primary: image.is_primary,
                    created_at: Some(stamp),
                })
            })
            .collect();
        stored.sort_by_key(|i| (!i.is_primary, i.image_id));
        Ok(stored)
    }
}

#[async_trait]
impl Repository for MemoryDiscountRepo {
    type Id = i32;
    type Item = Discount;
    type NewItem = NewDiscount;
    type UpdateForm = UpdateDiscount;

    async fn get_all(&self) -> Result<Vec<Discount>, result::Error> {
        Ok(self.store.lock().discounts.all())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Discount>, result::Error> {
        Ok(self.store.lock().discounts.get(id))
    }

    async fn add(&self, item: NewDiscount) -> Result<Discount, result::Error> {
        let mut tables = self.store.lock();
        if tables.discounts.any(|d| d.code == item.code) {
            return Err(unique_violation("discounts.code"));
        }
        let stamp = now();
        Ok(tables.discounts.insert_with(|discount_id| Discount {
            discount_id,
            code: item.code,
            description: item.description,
            discount_type: item.discount_type,
            value: item.value,
            min_purchase: item.min_purchase,
            max_discount: item.max_discount,
            expires_at: item.expires_at,
            usage_count: 0,
            max_usage: item.max_usage,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(
        &self,
        id: i32,
        form: UpdateDiscount,
    ) -> Result<Option<Discount>, result::Error> {
        let mut tables = self.store.lock();
        if let Some(code) = &form.code {
            if tables.discounts.any(|d| &d.code == code && d.discount_id != id) {
                return Err(unique_violation("discounts.code"));
            }
        }
        let Some(discount) = tables.discounts.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = form.code {
            discount.code = v;
        }
        if let Some(v) = form.description {
            discount.description = Some(v);
        }
        if let Some(v) = form.discount_type {
            discount.discount_type = v;
        }
        if let Some(v) = form.value {
            discount.value = v;
        }
        if let Some(v) = form.min_purchase {
            discount.min_purchase = Some(v);
        }
        if let Some(v) = form.max_discount {
            discount.max_discount = Some(v);
        }
        if let Some(v) = form.expires_at {
            discount.expires_at = Some(v);
        }
        if let Some(v) = form.max_usage {
            discount.max_usage = Some(v);
        }
        discount.updated_at = Some(now());
        Ok(Some(discount.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        let mut tables = self.store.lock();
        if tables.discounts.rows.remove(&id).is_none() {
            return Ok(false);
        }
        for order in tables.orders.rows.values_mut() {
            if order.discount_id == Some(id) {
                order.discount_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl DiscountRepository for MemoryDiscountRepo {
    async fn get_by_code(&self, code: &str) -> Result<Option<Discount>, result::Error> {
        Ok(self.store.lock().discounts.find(|d| d.code == code))
    }
}

#[async_trait]
impl Repository for MemoryShipmentRepo {
    type Id = i32;
    type Item = Shipment;
    type NewItem = NewShipment;
    type UpdateForm = UpdateShipment;

    async fn get_all(&self) -> Result<Vec<Shipment>, result::Error> {
        Ok(self.store.lock().shipments.all())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Shipment>, result::Error> {
        Ok(self.store.lock().shipments.get(id))
    }

    async fn add(&self, item: NewShipment) -> Result<Shipment, result::Error> {
        let mut tables = self.store.lock();
        if tables.orders.get(item.order_id).is_none() {
            return Err(foreign_key_violation("shipments.order_id"));
        }
        if tables.shipments.any(|s| s.order_id == item.order_id) {
            return Err(unique_violation("shipments.order_id"));
        }
        let stamp = now();
        Ok(tables.shipments.insert_with(|shipment_id| Shipment {
            shipment_id,
            order_id: item.order_id,
            origin_city: item.origin_city,
            destination_city: item.destination_city,
            weight: item.weight,
            courier: item.courier,
            service: item.service,
            cost: item.cost,
            etd: item.etd,
            status: item.status,
            tracking_number: None,
            shipped_at: None,
            delivered_at: None,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        }))
    }

    async fn update(
        &self,
        id: i32,
        form: UpdateShipment,
    ) -> Result<Option<Shipment>, result::Error> {
        let mut tables = self.store.lock();
        let Some(shipment) = tables.shipments.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = form.status {
            shipment.status = v;
        }
        if let Some(v) = form.tracking_number {
            shipment.tracking_number = Some(v);
        }
        if let Some(v) = form.shipped_at {
            shipment.shipped_at = Some(v);
        }
        if let Some(v) = form.delivered_at {
            shipment.delivered_at = Some(v);
        }
        shipment.updated_at = Some(now());
        Ok(Some(shipment.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, result::Error> {
        Ok(self.store.lock().shipments.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl ShipmentRepository for MemoryShipmentRepo {
    async fn get_by_order_id(&self, order_id: i32) -> Result<Option<Shipment>, result::Error> {
        Ok(self.store.lock().shipments.find(|s| s.order_id == order_id))
    }
}

impl MemoryCartRepo {
    fn checked_product(
        tables: &Tables,
        product_id: i32,
        quantity: i32,
    ) -> Result<Product, CartRepoError> {
        let product = tables
            .products
            .get(product_id)
            .ok_or(CartRepoError::ProductNotFound)?;
        if !product.has_stock_for(quantity) {
            return Err(CartRepoError::InsufficientStock {
                product: product.name,
                available: product.stock,
            });
        }
        Ok(product)
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepo {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<CartLine>, result::Error> {
        Ok(self.store.lock().cart_lines(|c| c.user_id == user_id))
    }

    async fn get_all(&self) -> Result<Vec<CartLine>, result::Error> {
        let mut lines = self.store.lock().cart_lines(|_| true);
        lines.sort_by_key(|(item, _)| (item.user_id, item.cart_item_id));
        Ok(lines)
    }

    async fn get_by_id(&self, cart_item_id: i32) -> Result<Option<CartItem>, result::Error> {
        Ok(self.store.lock().cart_items.get(cart_item_id))
    }

    async fn upsert(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, bool), CartRepoError> {
        let mut tables = self.store.lock();
        Self::checked_product(&tables, product_id, quantity)?;
        if tables.users.get(user_id).is_none() {
            return Err(foreign_key_violation("cart_items.user_id").into());
        }

        let stamp = now();
        let existing = tables
            .cart_items
            .rows
            .values_mut()
            .find(|c| c.user_id == user_id && c.product_id == product_id);
        if let Some(line) = existing {
            line.quantity = quantity;
            line.updated_at = Some(stamp);
            return Ok((line.clone(), false));
        }

        let created = tables.cart_items.insert_with(|cart_item_id| CartItem {
            cart_item_id,
            user_id,
            product_id,
            quantity,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        });
        Ok((created, true))
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, CartRepoError> {
        let mut tables = self.store.lock();
        Self::checked_product(&tables, product_id, quantity)?;

        let line = tables
            .cart_items
            .find(|c| c.user_id == user_id && c.product_id == product_id)
            .ok_or(CartRepoError::CartItemNotFound)?;

        if quantity == 0 {
            tables.cart_items.rows.remove(&line.cart_item_id);
            return Ok(None);
        }

        let Some(stored) = tables.cart_items.rows.get_mut(&line.cart_item_id) else {
            return Err(CartRepoError::CartItemNotFound);
        };
        stored.quantity = quantity;
        stored.updated_at = Some(now());
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, cart_item_id: i32) -> Result<bool, result::Error> {
        Ok(self
            .store
            .lock()
            .cart_items
            .rows
            .remove(&cart_item_id)
            .is_some())
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepo {
    async fn get_all(&self) -> Result<Vec<OrderDetails>, result::Error> {
        let tables = self.store.lock();
        Ok(tables
            .orders
            .all()
            .into_iter()
            .rev()
            .map(|order| tables.order_details(order))
            .collect())
    }

    async fn get_by_id(&self, order_id: i32) -> Result<Option<OrderDetails>, result::Error> {
        let tables = self.store.lock();
        Ok(tables
            .orders
            .get(order_id)
            .map(|order| tables.order_details(order)))
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<OrderDetails>, result::Error> {
        let tables = self.store.lock();
        Ok(tables
            .orders
            .filter(|o| o.user_id == user_id)
            .into_iter()
            .rev()
            .map(|order| tables.order_details(order))
            .collect())
    }

    async fn update(&self, order_id: i32, form: UpdateOrder) -> Result<Option<Order>, result::Error> {
        let mut tables = self.store.lock();
        if let Some(address_id) = form.address_id {
            if tables.addresses.get(address_id).is_none() {
                return Err(foreign_key_violation("orders.address_id"));
            }
        }
        let Some(order) = tables.orders.rows.get_mut(&order_id) else {
            return Ok(None);
        };
        if let Some(v) = form.address_id {
            order.address_id = v;
        }
        if let Some(v) = form.status {
            order.status = v;
        }
        order.updated_at = Some(now());
        Ok(Some(order.clone()))
    }

    async fn place_order(
        &self,
        user_id: i32,
        address_id: i32,
        discount_code: Option<String>,
        at: NaiveDateTime,
    ) -> Result<OrderDetails, OrderRepoError> {
        let mut tables = self.store.lock();

        let lines = tables.cart_lines(|c| c.user_id == user_id);
        if lines.is_empty() {
            return Err(OrderRepoError::EmptyCart);
        }

        let discount = match discount_code.as_deref() {
            Some(code) => Some(
                tables
                    .discounts
                    .find(|d| d.code == code)
                    .ok_or(OrderRepoError::DiscountNotFound)?,
            ),
            None => None,
        };

        // Every check happens before the first write.
        let plan = plan_checkout(&lines, discount.as_ref(), at)?;

        if !tables
            .addresses
            .any(|a| a.address_id == address_id && a.user_id == user_id)
        {
            return Err(OrderRepoError::AddressNotFound);
        }

        if let Some(discount_id) = plan.discount_id {
            if let Some(discount) = tables.discounts.rows.get_mut(&discount_id) {
                discount.usage_count += 1;
            }
        }

        for planned in &plan.items {
            if let Some(product) = tables.products.rows.get_mut(&planned.product_id) {
                product.stock -= planned.quantity;
            }
        }

        let stamp = now();
        let order = tables.orders.insert_with(|order_id| Order {
            order_id,
            user_id,
            address_id,
            discount_id: plan.discount_id,
            total: plan.total.clone(),
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: Some(stamp),
            updated_at: Some(stamp),
        });

        for planned in &plan.items {
            tables.order_items.insert_with(|order_item_id| OrderItem {
                order_item_id,
                order_id: order.order_id,
                product_id: planned.product_id,
                quantity: planned.quantity,
                price: planned.price.clone(),
                created_at: Some(stamp),
            });
        }

        tables.cart_items.retain(|c| c.user_id != user_id);

        Ok(tables.order_details(order))
    }

    async fn delete_with_restock(&self, order_id: i32) -> Result<(), OrderRepoError> {
        let mut tables = self.store.lock();
        let order = tables
            .orders
            .get(order_id)
            .ok_or(OrderRepoError::OrderNotFound)?;
        if order.status() != Some(OrderStatus::Cancelled) {
            tables.restock(order_id);
        }
        tables.shipments.retain(|s| s.order_id != order_id);
        tables.order_items.retain(|i| i.order_id != order_id);
        tables.orders.rows.remove(&order_id);
        Ok(())
    }

    async fn cancel_with_restock(
        &self,
        order_id: i32,
        address_id: Option<i32>,
    ) -> Result<Order, OrderRepoError> {
        let mut tables = self.store.lock();
        let order = tables
            .orders
            .get(order_id)
            .ok_or(OrderRepoError::OrderNotFound)?;

        let allowed = order.status().is_some_and(|s| {
            s != OrderStatus::Cancelled && s.can_transition_to(OrderStatus::Cancelled)
        });
        if !allowed {
            return Err(OrderRepoError::InvalidStatusTransition {
                from: order.status,
                to: OrderStatus::Cancelled.as_str().to_string(),
            });
        }

        if let Some(address_id) = address_id {
            if tables.addresses.get(address_id).is_none() {
                return Err(OrderRepoError::AddressNotFound);
            }
        }

        tables.restock(order_id);
        let Some(stored) = tables.orders.rows.get_mut(&order_id) else {
            return Err(OrderRepoError::OrderNotFound);
        };
        if let Some(address_id) = address_id {
            stored.address_id = address_id;
        }
        stored.status = OrderStatus::Cancelled.as_str().to_string();
        stored.updated_at = Some(now());
        Ok(stored.clone())
    }
}

#[async_trait]
impl WishlistRepository for MemoryWishlistRepo {
    async fn get_all(&self) -> Result<Vec<(WishlistItem, Product)>, result::Error> {
        Ok(self.store.lock().wishlist_rows(|_| true))
    }

    async fn get_by_id(
        &self,
        wishlist_item_id: i32,
    ) -> Result<Option<(WishlistItem, Product)>, result::Error> {
        Ok(self
            .store
            .lock()
            .wishlist_rows(|w| w.wishlist_item_id == wishlist_item_id)
            .pop())
    }

    async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<(WishlistItem, Product)>, result::Error> {
        Ok(self.store.lock().wishlist_rows(|w| w.user_id == user_id))
    }

    async fn add(&self, item: NewWishlistItem) -> Result<WishlistItem, result::Error> {
        let mut tables = self.store.lock();
        if tables.products.get(item.product_id).is_none() {
            return Err(foreign_key_violation("wishlist_items.product_id"));
        }
        if tables.users.get(item.user_id).is_none() {
            return Err(foreign_key_violation("wishlist_items.user_id"));
        }
        if tables
            .wishlist_items
            .any(|w| w.user_id == item.user_id && w.product_id == item.product_id)
        {
            return Err(unique_violation("wishlist_items_user_product"));
        }
        let stamp = now();
        Ok(tables.wishlist_items.insert_with(|wishlist_item_id| WishlistItem {
            wishlist_item_id,
            user_id: item.user_id,
            product_id: item.product_id,
            created_at: Some(stamp),
        }))
    }

    async fn delete(&self, wishlist_item_id: i32) -> Result<bool, result::Error> {
        Ok(self
            .store
            .lock()
            .wishlist_items
            .rows
            .remove(&wishlist_item_id)
            .is_some())
    }
}
