//! Product list controller.
//!
//! [`CatalogController`] owns the raw product collection and the
//! [`ViewParameters`](shelfview_core::ViewParameters) for one session. It
//! loads the catalog once through a [`RemoteCatalogClient`], re-derives the
//! visible page on every parameter change, and forwards deletes to the
//! service before touching the local list.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Loading --ok--> Ready <--(params / remove)
//!                                  |
//!                                  +--error--> FetchFailed
//! ```
//!
//! # Concurrency
//!
//! The controller is `Clone`; clones share state. The state lock is never
//! held across a network call, so parameter changes proceed while a delete
//! is in flight. A local removal happens only after the service confirms,
//! which makes concurrent removes of different ids commute and repeated
//! removes of the same id harmless.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfview_catalog::{CatalogConfig, CatalogController, HttpCatalogClient};
//!
//! let client = HttpCatalogClient::new(&CatalogConfig::from_env()?)?;
//! let controller = CatalogController::new(client);
//!
//! controller.initialize().await;
//! controller.set_category("electronics").await;
//! let view = controller.next_page().await;
//! ```

mod state;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::instrument;

use shelfview_core::{Product, ProductId, SortOption, ViewParameters};

use crate::client::RemoteCatalogClient;
use crate::navigation::{Navigator, NoopNavigator};
use crate::notice::Notice;

pub use state::{CatalogView, LoadOutcome, LoadState, RemoveOutcome};

use state::ControllerState;

/// Client-side controller for the product list.
pub struct CatalogController<C, N = NoopNavigator> {
    inner: Arc<ControllerInner<C, N>>,
}

struct ControllerInner<C, N> {
    client: C,
    navigator: N,
    state: RwLock<ControllerState>,
}

impl<C, N> Clone for CatalogController<C, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: RemoteCatalogClient> CatalogController<C> {
    /// Create a controller without a detail screen.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_navigator(client, NoopNavigator)
    }
}

impl<C: RemoteCatalogClient, N: Navigator> CatalogController<C, N> {
    /// Create a controller that opens details through `navigator`.
    #[must_use]
    pub fn with_navigator(client: C, navigator: N) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                client,
                navigator,
                state: RwLock::new(ControllerState::default()),
            }),
        }
    }

    // =========================================================================
    // Loading and mutation
    // =========================================================================

    /// Fetch the catalog and make it the source of truth.
    ///
    /// A failure leaves an empty list in [`LoadState::FetchFailed`] and queues
    /// a [`Notice::FetchFailed`]. Calling this again starts a new load; the
    /// result of any older load still in flight is discarded. Deletes confirmed
    /// while the fetch is in flight stay deleted.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> LoadOutcome {
        let generation = self.inner.state.write().await.begin_load();

        let result = self.inner.client.fetch_all().await;

        let mut state = self.inner.state.write().await;
        let outcome = match result {
            Ok(products) => state.finish_load(generation, products),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load catalog");
                state.fail_load(generation, e.to_string())
            }
        };

        match outcome {
            LoadOutcome::Loaded { count } => tracing::info!(count, "Catalog loaded"),
            LoadOutcome::Superseded => tracing::debug!("Discarded superseded catalog load"),
            LoadOutcome::Failed => {}
        }
        outcome
    }

    /// Delete a product remotely, then locally once the service confirms.
    ///
    /// On failure the local list is left exactly as it was and a
    /// [`Notice::DeleteFailed`] is queued.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&self, id: &ProductId) -> RemoveOutcome {
        let result = self.inner.client.delete_by_id(id).await;

        let mut state = self.inner.state.write().await;
        match result {
            Ok(()) => {
                let outcome = state.confirm_remove(id);
                match outcome {
                    RemoveOutcome::Removed => tracing::info!("Product deleted"),
                    _ => tracing::debug!("Delete confirmed for product no longer listed"),
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete product");
                state.reject_remove(id, e.to_string())
            }
        }
    }

    // =========================================================================
    // View parameters
    // =========================================================================

    /// Set the title search term. The page number is kept, then clamped.
    pub async fn set_search_term(&self, term: impl Into<String>) -> CatalogView {
        let mut state = self.inner.state.write().await;
        state.set_search_term(term.into());
        state.snapshot()
    }

    /// Select a category; empty selects all. The page number is kept, then clamped.
    pub async fn set_category(&self, category: impl Into<String>) -> CatalogView {
        let mut state = self.inner.state.write().await;
        state.set_category(category.into());
        state.snapshot()
    }

    /// Change the sort order. The page number is kept, then clamped.
    pub async fn set_sort(&self, option: SortOption) -> CatalogView {
        let mut state = self.inner.state.write().await;
        state.set_sort(option);
        state.snapshot()
    }

    /// Jump to page `page`, clamped to the available pages.
    pub async fn go_to_page(&self, page: usize) -> CatalogView {
        let mut state = self.inner.state.write().await;
        state.go_to_page(page);
        state.snapshot()
    }

    /// Move one page forward, stopping at the last page.
    pub async fn next_page(&self) -> CatalogView {
        let mut state = self.inner.state.write().await;
        let target = state.current_page().saturating_add(1);
        state.go_to_page(target);
        state.snapshot()
    }

    /// Move one page back, stopping at the first page.
    pub async fn previous_page(&self) -> CatalogView {
        let mut state = self.inner.state.write().await;
        let target = state.current_page().saturating_sub(1);
        state.go_to_page(target);
        state.snapshot()
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Current page and pagination metadata.
    pub async fn view(&self) -> CatalogView {
        self.inner.state.read().await.snapshot()
    }

    /// Current view parameters.
    pub async fn params(&self) -> ViewParameters {
        self.inner.state.read().await.params.clone()
    }

    /// Current lifecycle state.
    pub async fn load_state(&self) -> LoadState {
        self.inner.state.read().await.load_state
    }

    /// Copy of the raw collection, in fetch order minus removals.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.state.read().await.raw.clone()
    }

    /// Drain queued notices, oldest first.
    pub async fn take_notices(&self) -> Vec<Notice> {
        self.inner.state.write().await.take_notices()
    }

    /// Open the detail view for a listed product.
    ///
    /// Returns `false`, without calling the navigator, if `id` is not in the
    /// loaded catalog.
    pub async fn open_detail(&self, id: &ProductId) -> bool {
        let listed = self
            .inner
            .state
            .read()
            .await
            .raw
            .iter()
            .any(|p| p.id == *id);
        if listed {
            self.inner.navigator.open_detail(id);
        }
        listed
    }
}
