//! Remote catalog service client.
//!
//! The controller only talks to the catalog through [`RemoteCatalogClient`],
//! which covers the two operations the list screen needs: fetch every product
//! and delete one by id. [`HttpCatalogClient`] is the production
//! implementation over `reqwest`.
//!
//! No retries happen here. A failed call is reported once as a
//! [`TransportError`] and the caller decides what to do with it.

mod http;

use std::future::Future;

use thiserror::Error;

use shelfview_core::{Product, ProductId};

pub use http::HttpCatalogClient;

/// Errors that can occur when talking to the catalog service.
///
/// All variants are the same kind of failure to the controller; they differ
/// only in the detail they carry for logs.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("Catalog service returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Response body was not a product list.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Operations the list controller needs from the catalog service.
pub trait RemoteCatalogClient: Send + Sync {
    /// Retrieve the full catalog.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, TransportError>> + Send;

    /// Delete one product. `Ok` means the service confirmed the removal.
    fn delete_by_id(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
