use askama::Template;

#[derive(Template, Default)]
#[template(path = "no_products.html")]
pub struct NoProductsTemplate;
