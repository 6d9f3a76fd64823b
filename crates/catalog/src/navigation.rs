//! Hand-off to the product detail screen.
//!
//! The list controller does not render details. It passes the id to a
//! [`Navigator`] and is done with it.

use shelfview_core::ProductId;

/// Receives the id of a product whose detail view should open.
pub trait Navigator: Send + Sync {
    /// Open the detail view for `id`.
    fn open_detail(&self, id: &ProductId);
}

/// Route path of a product detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRoute(String);

impl DetailRoute {
    /// Route prefix used by the detail screen.
    pub const PREFIX: &'static str = "/Description";

    /// Route for one product.
    #[must_use]
    pub fn for_product(id: &ProductId) -> Self {
        Self(format!("{}/{id}", Self::PREFIX))
    }

    /// Returns the route as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DetailRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Navigator that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn open_detail(&self, _id: &ProductId) {}
}
