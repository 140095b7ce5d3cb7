use axum::{
    extract::{Path, State},
    routing::get,
    serve, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::errors::AppError;
use shop_types::domain::order::{CartItem, Order, ProductRef};
use shop_types::domain::product::Product;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct AppState<R>
where
    R: ProductRepository + OrderRepository,
{
    pub products: Arc<ProductService<R>>,
    pub orders: Arc<OrderService<R>>,
}

impl<R> Clone for AppState<R>
where
    R: ProductRepository + OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            products: self.products.clone(),
            orders: self.orders.clone(),
        }
    }
}

pub struct HttpServer<R>
where
    R: ProductRepository + OrderRepository,
{
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

#[derive(Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
}

/// Order input: cart items carry a product reference and a quantity;
/// prices come from the catalog, never from the client.
#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub email: String,
    #[serde(rename = "paymentSuccessFul")]
    pub payment_successful: bool,
    #[serde(rename = "shoppingCartItemsList")]
    pub items: Vec<CartItemRequest>,
}

#[derive(Deserialize)]
pub struct CartItemRequest {
    pub quantity: u32,
    pub product: ProductRef,
}

impl<R> HttpServer<R>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    pub async fn new(
        products: ProductService<R>,
        orders: OrderService<R>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState {
                products: Arc::new(products),
                orders: Arc::new(orders),
            },
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let products = get(list_products::<R>).post(create_product::<R>);
        let orders = get(list_orders::<R>).post(create_order::<R>);
        // Collection routes answer with and without the trailing slash;
        // existing clients send both forms.
        let app = Router::new()
            .route("/health", get(health))
            .route("/products", products.clone())
            .route("/products/", products)
            .route(
                "/products/{id}",
                get(get_product::<R>)
                    .put(update_product::<R>)
                    .delete(delete_product::<R>),
            )
            .route("/orders", orders.clone())
            .route("/orders/", orders)
            .route("/orders/{id}", get(get_order::<R>))
            .layer(trace_layer)
            .with_state(self.state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn list_products<R>(State(state): State<AppState<R>>) -> Result<Json<Vec<Product>>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let list = state.products.list_products().await?;
    Ok(Json(list))
}

async fn create_product<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let product = state
        .products
        .create_product(payload.name, payload.price)
        .await?;
    Ok(Json(product))
}

async fn get_product<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let product = state.products.get_product(id).await?;
    Ok(Json(product))
}

async fn update_product<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let product = state
        .products
        .update_product(id, payload.name, payload.price)
        .await?;
    Ok(Json(product))
}

async fn delete_product<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    state.products.delete_product(id).await?;
    Ok(Json(serde_json::json!({})))
}

async fn create_order<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let cart: Vec<CartItem> = payload
        .items
        .into_iter()
        .map(|it| CartItem {
            product_id: it.product.id,
            quantity: it.quantity,
        })
        .collect();
    let order = state
        .orders
        .create_order(payload.email, payload.payment_successful, cart)
        .await?;
    Ok(Json(order))
}

async fn get_order<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let order = state.orders.get_order(id).await?;
    Ok(Json(order))
}

async fn list_orders<R>(State(state): State<AppState<R>>) -> Result<Json<Vec<Order>>, AppError>
where
    R: ProductRepository + OrderRepository + Send + Sync + 'static,
{
    let list = state.orders.list_orders().await?;
    Ok(Json(list))
}
