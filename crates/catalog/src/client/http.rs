//! HTTP implementation of the catalog client.
//!
//! Talks to a plain REST collection:
//! - `GET {base}/products` returns a JSON array of products
//! - `DELETE {base}/products/{id}` removes one product; any body is ignored

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::instrument;
use url::Url;

use shelfview_core::{Product, ProductId};

use super::{RemoteCatalogClient, TransportError};
use crate::config::CatalogConfig;

/// Longest response body kept in a [`TransportError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// Catalog client over HTTP.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Get the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// URL of the product collection.
    fn products_url(&self) -> Result<Url, TransportError> {
        self.url_with_segments(&["products"])
    }

    /// URL of a single product. The id is percent-encoded as one segment.
    fn product_url(&self, id: &ProductId) -> Result<Url, TransportError> {
        self.url_with_segments(&["products", id.as_str()])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-success response into a status error.
    async fn status_error(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let mut message = response.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| message.is_char_boundary(i))
                .unwrap_or(0);
            message.truncate(cut);
        }
        TransportError::Status { status, message }
    }
}

impl RemoteCatalogClient for HttpCatalogClient {
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    async fn fetch_all(&self) -> Result<Vec<Product>, TransportError> {
        let url = self.products_url()?;
        let response = self.inner.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let products: Vec<Product> =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_by_id(&self, id: &ProductId) -> Result<(), TransportError> {
        let url = self.product_url(id)?;
        let response = self.inner.client.delete(url).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::status_error(response).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> HttpCatalogClient {
        let config = CatalogConfig::new(Url::parse(base).unwrap());
        HttpCatalogClient::new(&config).unwrap()
    }

    #[test]
    fn test_products_url_from_root() {
        let client = client_for("http://localhost:3000");
        assert_eq!(
            client.products_url().unwrap().as_str(),
            "http://localhost:3000/products"
        );
    }

    #[test]
    fn test_products_url_keeps_base_path() {
        let client = client_for("http://localhost:3000/api/");
        assert_eq!(
            client.products_url().unwrap().as_str(),
            "http://localhost:3000/api/products"
        );
    }

    #[test]
    fn test_product_url_encodes_id() {
        let client = client_for("http://localhost:3000");
        let url = client.product_url(&ProductId::new("a/b c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/products/a%2Fb%20c");
    }

    #[test]
    fn test_product_url_numeric_id() {
        let client = client_for("http://localhost:3000");
        let url = client.product_url(&ProductId::from(42)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/products/42");
    }
}
