//! Core types for Shelfview.
//!
//! This module provides the product record and the parameters that shape the
//! derived list view.

pub mod id;
pub mod params;
pub mod product;

pub use id::ProductId;
pub use params::{PAGE_SIZE, SortOption, SortOptionError, ViewParameters};
pub use product::Product;
