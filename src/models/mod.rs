pub mod card_view;
pub mod product;

pub use card_view::CardView;
pub use product::Product;
