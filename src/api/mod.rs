// Catalog API fetch layer
pub mod client;
pub mod error;
pub mod products;

pub use client::ApiClient;
pub use error::{FetchError, LOAD_FAILED_MESSAGE};
pub use products::{fetch_page, fetch_product, product_endpoint, products_endpoint};
