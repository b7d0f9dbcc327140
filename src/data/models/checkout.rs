use crate::data::models::cart_item::CartLine;
use crate::data::models::discount::Discount;
use crate::data::repos::errors::OrderRepoError;
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;

/// Result of pricing a cart before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub total: BigDecimal,
    pub discount_id: Option<i32>,
    pub items: Vec<PlannedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedItem {
    pub product_id: i32,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// Prices the cart lines and applies the discount rules.
///
/// Checks run in a fixed order: empty cart, then the discount (expiry,
/// usage, minimum purchase), then stock for each line. Both repository
/// implementations call this with rows they have already locked, so the
/// result is only valid inside that same transaction.
pub fn plan_checkout(
    lines: &[CartLine],
    discount: Option<&Discount>,
    now: NaiveDateTime,
) -> Result<CheckoutPlan, OrderRepoError> {
    if lines.is_empty() {
        return Err(OrderRepoError::EmptyCart);
    }

    let subtotal = lines
        .iter()
        .fold(BigDecimal::zero(), |acc, (item, product)| {
            acc + &product.price * BigDecimal::from(item.quantity)
        });

    let (discount_amount, discount_id) = match discount {
        Some(discount) => {
            if discount.is_expired(now) {
                return Err(OrderRepoError::DiscountExpired);
            }
            if discount.is_exhausted() {
                return Err(OrderRepoError::DiscountExhausted);
            }
            if !discount.meets_minimum(&subtotal) {
                return Err(OrderRepoError::MinimumPurchaseNotMet {
                    minimum: discount.min_purchase.clone().unwrap_or_default(),
                });
            }
            (discount.amount_for(&subtotal), Some(discount.discount_id))
        }
        None => (BigDecimal::zero(), None),
    };

    let mut items = Vec::with_capacity(lines.len());
    for (item, product) in lines {
        if !product.has_stock_for(item.quantity) {
            return Err(OrderRepoError::InsufficientStock {
                product: product.name.clone(),
            });
        }
        items.push(PlannedItem {
            product_id: product.product_id,
            quantity: item.quantity,
            price: product.price.clone(),
        });
    }

    let total = &subtotal - &discount_amount;

    Ok(CheckoutPlan {
        subtotal,
        discount_amount,
        total,
        discount_id,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::cart_item::CartItem;
    use crate::data::models::discount::DiscountType;
    use crate::data::models::product::Product;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn line(product_id: i32, name: &str, price: &str, stock: i32, quantity: i32) -> CartLine {
        (
            CartItem {
                cart_item_id: product_id,
                user_id: 1,
                product_id,
                quantity,
                created_at: None,
                updated_at: None,
            },
            Product {
                product_id,
                category_id: 1,
                name: name.to_string(),
                slug: name.to_lowercase(),
                description: None,
                price: dec(price),
                weight: dec("1"),
                stock,
                created_at: None,
                updated_at: None,
            },
        )
    }

    fn save10() -> Discount {
        Discount {
            discount_id: 7,
            code: "SAVE10".to_string(),
            description: None,
            discount_type: DiscountType::Percentage.as_str().to_string(),
            value: dec("10"),
            min_purchase: None,
            max_discount: None,
            expires_at: None,
            usage_count: 0,
            max_usage: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn cart() -> Vec<CartLine> {
        vec![line(1, "A", "100", 5, 2), line(2, "B", "50", 1, 1)]
    }

    #[test]
    fn plain_cart_totals_250() {
        let plan = plan_checkout(&cart(), None, now()).unwrap();
        assert_eq!(plan.total, dec("250"));
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.discount_id, None);
    }

    #[test]
    fn percentage_code_totals_225() {
        let discount = save10();
        let plan = plan_checkout(&cart(), Some(&discount), now()).unwrap();
        assert_eq!(plan.discount_amount, dec("25"));
        assert_eq!(plan.total, dec("225"));
        assert_eq!(plan.discount_id, Some(7));
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(
            plan_checkout(&[], None, now()),
            Err(OrderRepoError::EmptyCart)
        ));
    }

    #[test]
    fn over_stock_line_names_the_product() {
        let lines = vec![line(1, "A", "100", 5, 2), line(2, "B", "50", 1, 3)];
        match plan_checkout(&lines, None, now()) {
            Err(OrderRepoError::InsufficientStock { product }) => assert_eq!(product, "B"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn expired_and_exhausted_codes() {
        let mut expired = save10();
        expired.expires_at = Some(now() - chrono::Duration::hours(1));
        assert!(matches!(
            plan_checkout(&cart(), Some(&expired), now()),
            Err(OrderRepoError::DiscountExpired)
        ));

        let mut exhausted = save10();
        exhausted.max_usage = Some(3);
        exhausted.usage_count = 3;
        assert!(matches!(
            plan_checkout(&cart(), Some(&exhausted), now()),
            Err(OrderRepoError::DiscountExhausted)
        ));
    }

    #[test]
    fn fixed_discount_larger_than_subtotal_floors_at_zero() {
        let mut fixed = save10();
        fixed.discount_type = DiscountType::Fixed.as_str().to_string();
        fixed.value = dec("30");
        let lines = vec![line(1, "A", "20", 5, 1)];

        let plan = plan_checkout(&lines, Some(&fixed), now()).unwrap();
        assert_eq!(plan.discount_amount, dec("20"));
        assert_eq!(plan.total, dec("0"));
    }

    #[test]
    fn minimum_purchase_is_enforced() {
        let mut discount = save10();
        discount.min_purchase = Some(dec("300"));
        match plan_checkout(&cart(), Some(&discount), now()) {
            Err(OrderRepoError::MinimumPurchaseNotMet { minimum }) => {
                assert_eq!(minimum, dec("300"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
