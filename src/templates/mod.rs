// Markup fragments written into the page model
pub mod card_template;
pub mod catalog_template;
pub mod error_template;
pub mod load_more_template;
pub mod no_products_template;

pub use card_template::CardTemplate;
pub use catalog_template::CatalogTemplate;
pub use error_template::ErrorTemplate;
pub use load_more_template::LoadMoreTemplate;
pub use no_products_template::NoProductsTemplate;
