//! Operator notifications raised by the controller.
//!
//! Notices replace blocking alerts: the controller queues them and keeps
//! going, and the presentation layer drains the queue whenever it redraws.

use core::fmt;

use serde::Serialize;

use shelfview_core::ProductId;

/// Something the operator should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The catalog could not be loaded; the list is empty.
    FetchFailed {
        /// Transport error text.
        message: String,
    },
    /// The catalog service confirmed a delete.
    Deleted {
        /// Removed product.
        id: ProductId,
    },
    /// A delete was rejected or never reached the service.
    DeleteFailed {
        /// Product that is still listed.
        id: ProductId,
        /// Transport error text.
        message: String,
    },
}

impl Notice {
    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. } | Self::DeleteFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { message } => write!(f, "Could not load products: {message}"),
            Self::Deleted { .. } => write!(f, "Product successfully deleted."),
            Self::DeleteFailed { id, message } => {
                write!(f, "Could not delete product {id}: {message}")
            }
        }
    }
}
