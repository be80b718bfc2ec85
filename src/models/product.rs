use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::util::{format_price, format_quantity};

pub const UNNAMED_PRODUCT: &str = "Unnamed Laptop";
pub const NO_STORAGE: &str = "N/A";

/// A laptop as delivered by the catalog API.
///
/// Every field is optional: the grid renders whatever arrives and falls back
/// to display defaults for the rest. Values of the wrong type are read
/// leniently (`"16"` as a number, `1` as a flag) and otherwise dropped, so one
/// odd field never fails the whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub operating_system: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub operating_system_version: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_in_stock: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cpu_maker: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cpu_generation: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cpu_model: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ram_size: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub ssd: Option<bool>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ssd_size: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub hdd: Option<bool>,
    #[serde(deserialize_with = "lenient_f64")]
    pub hdd_size: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub screen_size: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub year_of_manufacture: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_gpu: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub gpu_model: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gpu_manufacturer: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_integrated_gpu: Option<bool>,
}

/// Strings as-is, numbers and flags as their text, and the backend's
/// nullable-column shape `{"String": "...", "Valid": bool}`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(column) => match (column.get("String"), column.get("Valid")) {
            (Some(Value::String(s)), Some(Value::Bool(true))) => Some(s.clone()),
            _ => None,
        },
        Value::Null | Value::Array(_) => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Product {
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or(UNNAMED_PRODUCT)
    }

    pub fn display_brand(&self) -> &str {
        non_empty(&self.brand).unwrap_or("")
    }

    pub fn in_stock(&self) -> bool {
        self.is_in_stock.unwrap_or(false)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    pub fn price_label(&self) -> String {
        format_price(self.price.unwrap_or(0.0))
    }

    pub fn cpu_label(&self) -> String {
        let maker = non_empty(&self.cpu_maker).unwrap_or("");
        let generation = non_empty(&self.cpu_generation).unwrap_or("");
        format!("{} {}", maker, generation).trim().to_string()
    }

    pub fn ram_label(&self) -> String {
        format!("{}GB", format_quantity(self.ram_size.unwrap_or(0.0)))
    }

    /// Solid-state wins over spinning disk; neither flag set means `N/A`.
    pub fn storage_label(&self) -> String {
        if self.ssd.unwrap_or(false) {
            format!("{}GB SSD", format_quantity(self.ssd_size.unwrap_or(0.0)))
        } else if self.hdd.unwrap_or(false) {
            format!("{}GB HDD", format_quantity(self.hdd_size.unwrap_or(0.0)))
        } else {
            NO_STORAGE.to_string()
        }
    }

    /// Navigation target of the product detail view.
    pub fn detail_path(&self) -> Option<String> {
        self.id.map(|id| format!("/product/{}", id))
    }
}
