//! End-to-end tests for Shelfview.
//!
//! Each test starts a [`FakeCatalog`], an in-process axum server speaking the
//! same REST shape as the real catalog service, and drives a
//! [`CatalogController`](shelfview_catalog::CatalogController) over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelfview-integration-tests
//! ```
//!
//! No external services are needed; the fake binds to `127.0.0.1:0`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{Json, Router};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use shelfview_catalog::CatalogConfig;

/// How `GET /products` answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Return the stored products.
    #[default]
    Ok,
    /// Return `500 Internal Server Error`.
    ServerError,
    /// Return `200` with a body that is not a product array.
    Malformed,
}

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Value>,
    fetch_mode: FetchMode,
    failing_ids: HashSet<String>,
    delete_requests: Vec<String>,
}

type SharedState = Arc<Mutex<FakeState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// String form of a product's `id`, whether it was sent as a number or a string.
fn id_of(product: &Value) -> Option<String> {
    match product.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build one product in wire format.
#[must_use]
pub fn product(id: i64, title: &str, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "category": category,
        "price": price,
        "image": format!("https://images.example.com/{id}.jpg"),
    })
}

/// Seven products over three categories, enough for two pages.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        product(1, "Backpack", "men's clothing", 109.95),
        product(2, "Slim Fit T-Shirt", "men's clothing", 22.3),
        product(3, "Cotton Jacket", "men's clothing", 55.99),
        product(4, "Gold Bracelet", "jewelery", 695.0),
        product(5, "Silver Ring", "jewelery", 168.0),
        product(6, "Portable Hard Drive", "electronics", 64.0),
        product(7, "Solid State Drive", "electronics", 109.0),
    ]
}

/// In-process catalog service.
///
/// Serves `GET {prefix}/products` and `DELETE {prefix}/products/{id}`. The
/// server task is aborted on drop.
pub struct FakeCatalog {
    base_url: Url,
    state: SharedState,
    task: JoinHandle<()>,
}

impl FakeCatalog {
    /// Start a fake serving `products` at the root path.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(products: Vec<Value>) -> Self {
        Self::start_under("", products).await
    }

    /// Start a fake serving `products` under `prefix` (for example `/api`).
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_under(prefix: &str, products: Vec<Value>) -> Self {
        let state: SharedState = Arc::new(Mutex::new(FakeState {
            products,
            ..FakeState::default()
        }));

        let routes = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", axum::routing::delete(delete_product))
            .with_state(Arc::clone(&state));
        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Failed to read local address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}{prefix}"))
            .expect("Failed to build fake catalog URL");

        Self {
            base_url,
            state,
            task,
        }
    }

    /// Base URL to hand to the client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this fake.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(self.base_url.clone())
    }

    /// Change how `GET /products` answers.
    pub fn set_fetch_mode(&self, mode: FetchMode) {
        lock(&self.state).fetch_mode = mode;
    }

    /// Make `DELETE` for `id` answer `500`.
    pub fn fail_delete(&self, id: &str) {
        lock(&self.state).failing_ids.insert(id.to_string());
    }

    /// Ids received by `DELETE`, decoded, in arrival order.
    #[must_use]
    pub fn delete_requests(&self) -> Vec<String> {
        lock(&self.state).delete_requests.clone()
    }

    /// Ids still stored on the server.
    #[must_use]
    pub fn remaining_ids(&self) -> Vec<String> {
        lock(&self.state).products.iter().filter_map(id_of).collect()
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn list_products(State(state): State<SharedState>) -> Response {
    let state = lock(&state);
    match state.fetch_mode {
        FetchMode::Ok => Json(state.products.clone()).into_response(),
        FetchMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "catalog offline").into_response()
        }
        FetchMode::Malformed => Json(json!({ "products": "soon" })).into_response(),
    }
}

async fn delete_product(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = lock(&state);
    state.delete_requests.push(id.clone());

    if state.failing_ids.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "delete refused").into_response();
    }

    let position = state
        .products
        .iter()
        .position(|p| id_of(p).as_deref() == Some(id.as_str()));
    match position {
        Some(index) => Json(state.products.remove(index)).into_response(),
        None => (StatusCode::NOT_FOUND, "no such product").into_response(),
    }
}

/// Configuration pointing at a local port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_config() -> CatalogConfig {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}")).expect("Failed to build URL");
    CatalogConfig::new(url)
}
