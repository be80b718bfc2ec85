use askama::Template;
use crate::models::CardView;

#[derive(Template)]
#[template(path = "card.html")]
pub struct CardTemplate<'a> {
    pub card: &'a CardView,
}
