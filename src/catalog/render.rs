use askama::Template;

use super::page::{CardNode, GridNode, Page};
use super::pagination::{LoadMode, PaginationState};
use crate::models::{CardView, Product};
use crate::templates::{CardTemplate, ErrorTemplate, NoProductsTemplate};

/// What a render did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Empty result in replace mode: the "no products" block is shown.
    Placeholder,
    /// Empty result in append mode: nothing changed.
    Unchanged,
    Replaced(usize),
    Appended(usize),
}

pub fn render_card(product: &Product) -> Result<CardNode, askama::Error> {
    let view = CardView::from(product);
    let markup = CardTemplate { card: &view }.render()?;
    Ok(CardNode { view, markup })
}

pub fn render_no_products() -> Result<GridNode, askama::Error> {
    Ok(GridNode::NoProducts(NoProductsTemplate.render()?))
}

pub fn render_error(message: &str) -> Result<GridNode, askama::Error> {
    Ok(GridNode::Error(ErrorTemplate { message }.render()?))
}

/// Write `products` into the page grid.
///
/// Only a non-empty result touches the has-more flag and the control's
/// visibility.
pub fn render(
    page: &mut Page,
    state: &mut PaginationState,
    products: &[Product],
    mode: LoadMode,
) -> Result<RenderOutcome, askama::Error> {
    if products.is_empty() {
        return match mode {
            LoadMode::Replace => {
                page.grid.replace(vec![render_no_products()?]);
                Ok(RenderOutcome::Placeholder)
            }
            LoadMode::Append => Ok(RenderOutcome::Unchanged),
        };
    }

    let cards = products
        .iter()
        .map(|p| render_card(p).map(GridNode::Card))
        .collect::<Result<Vec<_>, _>>()?;
    let count = cards.len();

    let outcome = match mode {
        LoadMode::Replace => {
            page.grid.replace(cards);
            RenderOutcome::Replaced(count)
        }
        LoadMode::Append => {
            page.grid.clear_errors();
            page.grid.append(cards);
            RenderOutcome::Appended(count)
        }
    };

    state.update_has_more(count);
    page.sync_has_more(state.has_more());
    Ok(outcome)
}
