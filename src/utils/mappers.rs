use crate::api::controllers::dto::address_dto::{CreateAddressRequest, UpdateAddressRequest};
use crate::api::controllers::dto::auth_dto::RegisterRequest;
use crate::api::controllers::dto::discount_dto::{CreateDiscountRequest, UpdateDiscountRequest};
use crate::api::controllers::dto::order_dto::PlaceOrderRequest;
use crate::api::controllers::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use crate::api::controllers::dto::user_dto::UpdateUserRequest;
use crate::data::models::address::{NewAddress, UpdateAddress};
use crate::data::models::discount::{NewDiscount, UpdateDiscount};
use crate::services::auth_service::RegisterUser;
use crate::services::order_service::PlaceOrder;
use crate::services::product_service::{ChangeProduct, CreateProduct};
use crate::services::user_service::ChangeUser;

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Blank optional text is stored as NULL.
fn trimmed_opt(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|v| !v.is_empty())
}

pub fn new_address(user_id: i32, dto: CreateAddressRequest) -> NewAddress {
    NewAddress {
        user_id,
        address1: trimmed(dto.address1),
        address2: trimmed_opt(dto.address2),
        city: trimmed(dto.city),
        state: trimmed(dto.state),
        country: trimmed(dto.country),
        postal_code: trimmed(dto.postal_code),
        phone: trimmed(dto.phone),
        address_type: dto.address_type,
    }
}

impl From<UpdateAddressRequest> for UpdateAddress {
    fn from(dto: UpdateAddressRequest) -> Self {
        UpdateAddress {
            address1: dto.address1.map(trimmed),
            address2: trimmed_opt(dto.address2),
            city: dto.city.map(trimmed),
            state: dto.state.map(trimmed),
            country: dto.country.map(trimmed),
            postal_code: dto.postal_code.map(trimmed),
            phone: dto.phone.map(trimmed),
            address_type: dto.address_type,
        }
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(dto: RegisterRequest) -> Self {
        RegisterUser {
            name: dto.name,
            email: dto.email,
            password: dto.password,
        }
    }
}

impl From<UpdateUserRequest> for ChangeUser {
    fn from(dto: UpdateUserRequest) -> Self {
        ChangeUser {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: dto.role,
        }
    }
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(dto: CreateProductRequest) -> Self {
        CreateProduct {
            category_id: dto.category_id,
            name: dto.name,
            description: trimmed_opt(dto.description),
            price: dto.price,
            weight: dto.weight,
            stock: dto.stock,
        }
    }
}

impl From<UpdateProductRequest> for ChangeProduct {
    fn from(dto: UpdateProductRequest) -> Self {
        ChangeProduct {
            category_id: dto.category_id,
            name: dto.name,
            description: trimmed_opt(dto.description),
            price: dto.price,
            weight: dto.weight,
            stock: dto.stock,
        }
    }
}

impl From<CreateDiscountRequest> for NewDiscount {
    fn from(dto: CreateDiscountRequest) -> Self {
        NewDiscount {
            code: dto.code,
            description: trimmed_opt(dto.description),
            discount_type: dto.discount_type,
            value: dto.value,
            min_purchase: dto.min_purchase,
            max_discount: dto.max_discount,
            expires_at: dto.expires_at,
            max_usage: dto.max_usage,
        }
    }
}

impl From<UpdateDiscountRequest> for UpdateDiscount {
    fn from(dto: UpdateDiscountRequest) -> Self {
        UpdateDiscount {
            code: dto.code,
            description: trimmed_opt(dto.description),
            discount_type: dto.discount_type,
            value: dto.value,
            min_purchase: dto.min_purchase,
            max_discount: dto.max_discount,
            expires_at: dto.expires_at,
            max_usage: dto.max_usage,
        }
    }
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(dto: PlaceOrderRequest) -> Self {
        PlaceOrder {
            address_id: dto.address_id,
            discount_code: dto.discount_code,
        }
    }
}
