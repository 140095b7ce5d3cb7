use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A catalog product. Ids are assigned by the repository on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// A product waiting for an id; the only way to build one is through the
/// validating constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: String, price: f64) -> Result<Self, ValidationError> {
        check_price(price)?;
        Ok(Self { name, price })
    }
}

/// Prices must be finite and non-negative. NaN fails the `>= 0` test too.
pub fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive_prices() {
        assert!(NewProduct::new("pen".into(), 0.0).is_ok());
        let p = NewProduct::new("pen".into(), 2.3).unwrap();
        assert_eq!(p.price, 2.3);
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        assert!(matches!(
            NewProduct::new("pen".into(), -1.0),
            Err(ValidationError::InvalidPrice(_))
        ));
        assert!(NewProduct::new("pen".into(), f64::NAN).is_err());
        assert!(NewProduct::new("pen".into(), f64::INFINITY).is_err());
    }
}
