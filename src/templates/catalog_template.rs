use askama::Template;

/// Whole widget: the grid container followed by the load-more control.
#[derive(Template)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate<'a> {
    pub nodes: Vec<&'a str>,
    pub has_load_more: bool,
    pub load_more: String,
}
