//! Shelfview Core - Product types and the catalog view pipeline.
//!
//! This crate provides the pieces shared by every Shelfview component:
//! - `catalog` - Remote catalog client and the list controller
//! - `cli` - Terminal front end for browsing and deleting products
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async runtime. The view pipeline is a function of the raw
//! product collection and the current [`ViewParameters`], so it can be tested
//! without a catalog service.
//!
//! # Modules
//!
//! - [`types`] - Product records, identifiers, and view parameters
//! - [`pipeline`] - Filter, search, sort, and paginate a product collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pipeline;
pub mod types;

pub use pipeline::{DerivedView, derive};
pub use types::*;
