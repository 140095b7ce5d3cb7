pub mod order;
pub mod product;

/// Domain pre-condition failures. Kept as an enumerable set so the HTTP
/// layer can map every variant to a client error.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
    #[error("quantity must be > 0 for product {product_id}")]
    ZeroQuantity { product_id: i64 },
    #[error("order must contain at least one cart item")]
    EmptyCart,
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}
