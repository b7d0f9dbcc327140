use crate::data::models::discount::{Discount, DiscountType, NewDiscount, UpdateDiscount};
use crate::data::repos::traits::repository::DiscountRepository;
use crate::services::errors::{DiscountServiceError, is_foreign_key_violation, is_unique_violation};
use bigdecimal::{BigDecimal, Zero};
use diesel::result;
use std::sync::Arc;

pub struct DiscountService {
    repo: Arc<dyn DiscountRepository>,
}

fn invalid(message: &str) -> DiscountServiceError {
    DiscountServiceError::InvalidInput(message.to_string())
}

fn parse_type(value: &str) -> Result<DiscountType, DiscountServiceError> {
    value
        .parse()
        .map_err(|_| DiscountServiceError::InvalidInput(format!("Unknown discount type: {value}")))
}

/// Rules shared by create and update, checked on the merged values.
fn check_rules(
    kind: DiscountType,
    value: &BigDecimal,
    min_purchase: Option<&BigDecimal>,
    max_discount: Option<&BigDecimal>,
    max_usage: Option<i32>,
) -> Result<(), DiscountServiceError> {
    match kind {
        DiscountType::Percentage => {
            if *value <= BigDecimal::zero() || *value > BigDecimal::from(100) {
                return Err(invalid("Percentage discount must be between 0 and 100"));
            }
        }
        DiscountType::Fixed => {
            if *value <= BigDecimal::zero() {
                return Err(invalid("Fixed discount must be greater than zero"));
            }
        }
    }

    if min_purchase.is_some_and(|m| *m < BigDecimal::zero()) {
        return Err(invalid("Minimum purchase cannot be negative"));
    }
    if max_discount.is_some_and(|m| *m <= BigDecimal::zero()) {
        return Err(invalid("Maximum discount must be greater than zero"));
    }
    if max_usage.is_some_and(|m| m <= 0) {
        return Err(invalid("Maximum usage must be greater than zero"));
    }

    Ok(())
}

fn on_write_error(e: result::Error) -> DiscountServiceError {
    if is_unique_violation(&e) {
        DiscountServiceError::DuplicateCode
    } else {
        e.into()
    }
}

impl DiscountService {
    pub fn new(repo: Arc<dyn DiscountRepository>) -> Self {
        DiscountService { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Discount>, DiscountServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, discount_id: i32) -> Result<Discount, DiscountServiceError> {
        self.repo
            .get_by_id(discount_id)
            .await?
            .ok_or(DiscountServiceError::DiscountNotFound)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Discount, DiscountServiceError> {
        self.repo
            .get_by_code(code.trim())
            .await?
            .ok_or(DiscountServiceError::DiscountNotFound)
    }

    pub async fn create(&self, mut discount: NewDiscount) -> Result<Discount, DiscountServiceError> {
        discount.code = discount.code.trim().to_string();
        if discount.code.is_empty() {
            return Err(invalid("Discount code is required"));
        }

        let kind = parse_type(&discount.discount_type)?;
        check_rules(
            kind,
            &discount.value,
            discount.min_purchase.as_ref(),
            discount.max_discount.as_ref(),
            discount.max_usage,
        )?;
        discount.discount_type = kind.as_str().to_string();

        let created = self.repo.add(discount).await.map_err(on_write_error)?;

        tracing::info!(discount_id = created.discount_id, code = %created.code, "Discount created");
        Ok(created)
    }

    pub async fn update(
        &self,
        discount_id: i32,
        mut form: UpdateDiscount,
    ) -> Result<Discount, DiscountServiceError> {
        let current = self.get_by_id(discount_id).await?;

        if let Some(code) = form.code.as_mut() {
            *code = code.trim().to_string();
            if code.is_empty() {
                return Err(invalid("Discount code is required"));
            }
        }

        let kind = match form.discount_type.as_deref() {
            Some(value) => parse_type(value)?,
            None => current.kind(),
        };
        form.discount_type = form.discount_type.map(|_| kind.as_str().to_string());

        check_rules(
            kind,
            form.value.as_ref().unwrap_or(&current.value),
            form.min_purchase.as_ref().or(current.min_purchase.as_ref()),
            form.max_discount.as_ref().or(current.max_discount.as_ref()),
            form.max_usage.or(current.max_usage),
        )?;

        self.repo
            .update(discount_id, form)
            .await
            .map_err(on_write_error)?
            .ok_or(DiscountServiceError::DiscountNotFound)
    }

    pub async fn delete(&self, discount_id: i32) -> Result<(), DiscountServiceError> {
        match self.repo.delete(discount_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DiscountServiceError::DiscountNotFound),
            Err(e) if is_foreign_key_violation(&e) => Err(DiscountServiceError::DiscountInUse),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_must_be_within_bounds() {
        let over = check_rules(DiscountType::Percentage, &BigDecimal::from(101), None, None, None);
        assert!(matches!(over, Err(DiscountServiceError::InvalidInput(_))));

        let full = check_rules(DiscountType::Percentage, &BigDecimal::from(100), None, None, None);
        assert!(full.is_ok());
    }

    #[test]
    fn fixed_must_be_positive() {
        let zero = check_rules(DiscountType::Fixed, &BigDecimal::zero(), None, None, None);
        assert!(matches!(zero, Err(DiscountServiceError::InvalidInput(_))));
    }

    #[test]
    fn usage_limit_must_be_positive() {
        let result = check_rules(DiscountType::Fixed, &BigDecimal::from(5), None, None, Some(0));
        assert!(matches!(result, Err(DiscountServiceError::InvalidInput(_))));
    }
}
