use askama::Template;

#[derive(Template)]
#[template(path = "load_more.html")]
pub struct LoadMoreTemplate<'a> {
    pub label: &'a str,
    pub disabled: bool,
    pub visible: bool,
}
