use serde::{Deserialize, Serialize};

use crate::models::product::Product;

/// Presentation model for one grid card, with every display default applied.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CardView {
    pub id: Option<i64>,
    /// Value of the `data-product-id` attribute; empty when the product has no id.
    pub id_attr: String,
    pub href: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub in_stock: bool,
    pub image_url: String,
    pub has_image: bool,
    pub cpu: String,
    pub ram: String,
    pub storage: String,
}

impl CardView {
    pub fn stock_label(&self) -> &'static str {
        if self.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }

    pub fn cart_label(&self) -> &'static str {
        if self.in_stock {
            "Add to Cart"
        } else {
            "Out of Stock"
        }
    }
}

impl From<&Product> for CardView {
    fn from(p: &Product) -> Self {
        let image_url = p.image().unwrap_or("").to_string();
        CardView {
            id: p.id,
            id_attr: p.id.map(|id| id.to_string()).unwrap_or_default(),
            href: p.detail_path().unwrap_or_default(),
            name: p.display_name().to_string(),
            brand: p.display_brand().to_string(),
            price: p.price_label(),
            in_stock: p.in_stock(),
            has_image: !image_url.is_empty(),
            image_url,
            cpu: p.cpu_label(),
            ram: p.ram_label(),
            storage: p.storage_label(),
        }
    }
}
