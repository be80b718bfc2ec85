use serde::Deserialize;

use super::{client::ApiClient, error::FetchError};
use crate::models::Product;

pub const PRODUCTS_PATH: &str = "/api/products";
pub const PRODUCT_PATH: &str = "/api/product";

/// Body of `GET /api/products/{limit}/{page}`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `/api/products/{page_size}/{page}`
pub fn products_endpoint(page_size: u32, page: u32) -> String {
    format!("{}/{}/{}", PRODUCTS_PATH, page_size, page)
}

pub fn product_endpoint(id: i64) -> String {
    format!("{}/{}", PRODUCT_PATH, id)
}

/// Fetch one page of products in server order.
///
/// A `null` or missing `products` field yields an empty page.
pub async fn fetch_page(api: &ApiClient, page: u32, page_size: u32) -> Result<Vec<Product>, FetchError> {
    let envelope: ProductsEnvelope = api.get_json(&products_endpoint(page_size, page)).await?;
    let products = envelope.products.unwrap_or_default();
    tracing::debug!(page, page_size, returned = products.len(), "Fetched product page");
    Ok(products)
}

/// Fetch a single product for the detail view.
pub async fn fetch_product(api: &ApiClient, id: i64) -> Result<Product, FetchError> {
    api.get_json(&product_endpoint(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(products_endpoint(6, 1), "/api/products/6/1");
        assert_eq!(products_endpoint(6, 12), "/api/products/6/12");
        assert_eq!(product_endpoint(7), "/api/product/7");
    }

    #[test]
    fn test_envelope_null_products() {
        let env: ProductsEnvelope =
            serde_json::from_str(r#"{"products": null, "message": "request successful"}"#).unwrap();
        assert!(env.products.is_none());

        let env: ProductsEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(env.products.is_none());
    }

    #[test]
    fn test_envelope_keeps_server_order() {
        let env: ProductsEnvelope =
            serde_json::from_str(r#"{"products": [{"id": 3}, {"id": 1}, {"id": 2}]}"#).unwrap();
        let ids: Vec<_> = env.products.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    }
}
