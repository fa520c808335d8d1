//! Product showroom: server-side product page binding, shared site
//! fragments and the contact form relay for a corporate catalogue site.

pub mod binder;
pub mod config;
pub mod dom;
pub mod error;
pub mod fragments;
pub mod models;
pub mod relay;
pub mod server;
pub mod showroom;
pub mod sources;
pub mod traits;

pub use binder::{ProductView, fetch_product, resolve_product_id};
pub use config::SiteConfig;
pub use error::{FetchError, RelayError};
pub use models::ProductDescription;
pub use server::{AppState, build_router};
pub use showroom::Showroom;
