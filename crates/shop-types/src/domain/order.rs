use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Reference to a product by id. Line items never hold the live product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    pub id: i64,
}

/// One (product, quantity) entry of an order, with the unit price captured
/// at order-creation time. The captured price is what keeps historical
/// orders stable when the catalog changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product: ProductRef,
    pub quantity: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

impl OrderLineItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Cart input to order creation; resolved against the catalog and then
/// discarded, never persisted on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub quantity: u32,
}

/// An order ready to persist: line items with captured prices and the total
/// computed from them. The repository assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub email: String,
    pub payment_successful: bool,
    pub items: Vec<OrderLineItem>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(
        email: String,
        payment_successful: bool,
        items: Vec<OrderLineItem>,
    ) -> Result<Self, ValidationError> {
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email));
        }
        if items.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        for it in &items {
            if it.quantity == 0 {
                return Err(ValidationError::ZeroQuantity {
                    product_id: it.product.id,
                });
            }
        }
        let total_price = items.iter().map(OrderLineItem::line_total).sum();
        Ok(Self {
            email,
            payment_successful,
            items,
            total_price,
            created_at: Utc::now(),
        })
    }
}

/// A persisted order. `total_price` is fixed at creation and never
/// recomputed from live product state.
///
/// Field renames follow the service's public wire format, including the
/// `paymentSuccessFul` spelling it has always used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub email: String,
    #[serde(rename = "paymentSuccessFul")]
    pub payment_successful: bool,
    #[serde(rename = "shoppingCartItemsList")]
    pub items: Vec<OrderLineItem>,
    #[serde(rename = "orderTotalPrice")]
    pub total_price: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_new(id: i64, new: NewOrder) -> Self {
        Self {
            id,
            email: new.email,
            payment_successful: new.payment_successful,
            items: new.items,
            total_price: new.total_price,
            created_at: new.created_at,
        }
    }
}
