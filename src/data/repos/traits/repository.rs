use crate::data::models::address::{Address, NewAddress, UpdateAddress};
use crate::data::models::category::{Category, NewCategory, UpdateCategory};
use crate::data::models::discount::{Discount, NewDiscount, UpdateDiscount};
use crate::data::models::product::{
    NewProduct, NewProductImage, Product, ProductImage, UpdateProduct,
};
use crate::data::models::shipment::{NewShipment, Shipment, UpdateShipment};
use crate::data::models::user::{NewUser, ResetTokenChange, UpdateUser, User};
use async_trait::async_trait;
use diesel::result;

/// Plain CRUD over one table.
#[async_trait]
pub trait Repository: Send + Sync {
    type Id: Copy + Send + Sync + 'static;
    type Item: Send;
    type NewItem: Send + 'static;
    type UpdateForm: Send + 'static;

    async fn get_all(&self) -> Result<Vec<Self::Item>, result::Error>;
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;
    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error>;
    /// Returns `None` when no row has the given id.
    async fn update(
        &self,
        id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error>;
    /// Returns `false` when no row has the given id.
    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error>;
}

#[async_trait]
pub trait UserRepository:
    Repository<Id = i32, Item = User, NewItem = NewUser, UpdateForm = UpdateUser>
{
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, result::Error>;
    async fn set_reset_token(
        &self,
        user_id: i32,
        change: ResetTokenChange,
    ) -> Result<(), result::Error>;
}

#[async_trait]
pub trait AddressRepository:
    Repository<Id = i32, Item = Address, NewItem = NewAddress, UpdateForm = UpdateAddress>
{
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Address>, result::Error>;
}

#[async_trait]
pub trait CategoryRepository:
    Repository<Id = i32, Item = Category, NewItem = NewCategory, UpdateForm = UpdateCategory>
{
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, result::Error>;
}

#[async_trait]
pub trait ProductRepository:
    Repository<Id = i32, Item = Product, NewItem = NewProduct, UpdateForm = UpdateProduct>
{
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, result::Error>;
    async fn get_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, result::Error>;
    async fn get_images(&self, product_id: i32) -> Result<Vec<ProductImage>, result::Error>;
    /// Swaps the whole image set of a product in one transaction.
    async fn replace_images(
        &self,
        product_id: i32,
        images: Vec<NewProductImage>,
    ) -> Result<Vec<ProductImage>, result::Error>;
}

#[async_trait]
pub trait DiscountRepository:
    Repository<Id = i32, Item = Discount, NewItem = NewDiscount, UpdateForm = UpdateDiscount>
{
    async fn get_by_code(&self, code: &str) -> Result<Option<Discount>, result::Error>;
}

#[async_trait]
pub trait ShipmentRepository:
    Repository<Id = i32, Item = Shipment, NewItem = NewShipment, UpdateForm = UpdateShipment>
{
    async fn get_by_order_id(&self, order_id: i32) -> Result<Option<Shipment>, result::Error>;
}
