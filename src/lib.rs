//! Lapbytes catalog browser: fetches paginated laptop listings, renders them
//! as cards in a page model and handles load-more, cart and wishlist clicks.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod models;
pub mod templates;
pub mod terminal;
pub mod util;

pub use catalog::{CatalogBrowser, Page};
pub use error::CatalogError;
