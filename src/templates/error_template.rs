use askama::Template;

/// Error block with the "Try Again" control.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}
