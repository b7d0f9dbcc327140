use crate::data::models::address::{Address, AddressType, NewAddress, UpdateAddress};
use crate::data::repos::traits::repository::AddressRepository;
use crate::services::errors::{AddressServiceError, is_foreign_key_violation};
use std::sync::Arc;

pub struct AddressService {
    repo: Arc<dyn AddressRepository>,
}

fn check_address_type(value: &str) -> Result<String, AddressServiceError> {
    value
        .parse::<AddressType>()
        .map(|t| t.as_str().to_string())
        .map_err(|_| {
            AddressServiceError::InvalidInput(format!("Unknown address type: {value}"))
        })
}

impl AddressService {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        AddressService { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Address>, AddressServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, address_id: i32) -> Result<Address, AddressServiceError> {
        self.repo
            .get_by_id(address_id)
            .await?
            .ok_or(AddressServiceError::AddressNotFound)
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Address>, AddressServiceError> {
        Ok(self.repo.get_by_user_id(user_id).await?)
    }

    pub async fn create(&self, mut address: NewAddress) -> Result<Address, AddressServiceError> {
        address.address_type = check_address_type(&address.address_type)?;

        let created = self.repo.add(address).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                AddressServiceError::InvalidInput("User does not exist".to_string())
            } else {
                e.into()
            }
        })?;

        tracing::info!(address_id = created.address_id, user_id = created.user_id, "Address created");
        Ok(created)
    }

    pub async fn update(
        &self,
        address_id: i32,
        mut form: UpdateAddress,
    ) -> Result<Address, AddressServiceError> {
        if let Some(kind) = form.address_type.as_deref() {
            form.address_type = Some(check_address_type(kind)?);
        }

        self.repo
            .update(address_id, form)
            .await?
            .ok_or(AddressServiceError::AddressNotFound)
    }

    pub async fn delete(&self, address_id: i32) -> Result<(), AddressServiceError> {
        match self.repo.delete(address_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AddressServiceError::AddressNotFound),
            Err(e) if is_foreign_key_violation(&e) => Err(AddressServiceError::AddressInUse),
            Err(e) => Err(e.into()),
        }
    }
}
