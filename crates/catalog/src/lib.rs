//! Shelfview Catalog library.
//!
//! This crate connects the pure view pipeline from `shelfview-core` to a
//! remote catalog service:
//! - [`client`] - `RemoteCatalogClient` trait and its HTTP implementation
//! - [`controller`] - Session state, parameter updates, and delete handling
//! - [`notice`] - Non-blocking operator notifications
//! - [`navigation`] - Hand-off to the product detail screen
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod controller;
pub mod navigation;
pub mod notice;

pub use client::{HttpCatalogClient, RemoteCatalogClient, TransportError};
pub use config::{CatalogConfig, ConfigError};
pub use controller::{CatalogController, CatalogView, LoadOutcome, LoadState, RemoveOutcome};
pub use navigation::{DetailRoute, Navigator, NoopNavigator};
pub use notice::Notice;
