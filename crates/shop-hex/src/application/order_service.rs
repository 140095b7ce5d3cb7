use crate::errors::AppError;
use shop_types::domain::order::{CartItem, NewOrder, Order, OrderLineItem, ProductRef};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;

/// The order engine. Reads the product store once, at creation time, to
/// capture unit prices; a persisted order is never reconciled against the
/// catalog again.
pub struct OrderService<R: ProductRepository + OrderRepository> {
    repo: R,
}

impl<R: ProductRepository + OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(
        &self,
        email: String,
        payment_successful: bool,
        cart: Vec<CartItem>,
    ) -> Result<Order, AppError> {
        let mut items = Vec::with_capacity(cart.len());
        for cart_item in cart {
            let product = self
                .repo
                .get_product(cart_item.product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("product {}", cart_item.product_id)))?;
            // Snapshot: copy the current price into the line item.
            items.push(OrderLineItem {
                product: ProductRef { id: product.id },
                quantity: cart_item.quantity,
                unit_price: product.price,
            });
        }
        let draft = NewOrder::new(email, payment_successful, items)?;
        let order = self.repo.create_order(draft).await?;
        tracing::info!(order_id = order.id, total = order.total_price, "order created");
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        match self.repo.get_order(id).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list_orders().await?)
    }
}
