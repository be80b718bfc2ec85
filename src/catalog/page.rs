//! In-memory page model the widget writes into: the product grid, the
//! load-more control and the cart counter shown elsewhere on the page.

use askama::Template;

use crate::models::CardView;
use crate::templates::{CatalogTemplate, LoadMoreTemplate};

pub const LOAD_MORE_LABEL: &str = "Load More";
pub const LOADING_LABEL: &str = "Loading...";

/// One child of the grid container.
#[derive(Debug, Clone, PartialEq)]
pub enum GridNode {
    Card(CardNode),
    /// "No laptops found" block.
    NoProducts(String),
    /// Error block with the retry control.
    Error(String),
}

impl GridNode {
    pub fn markup(&self) -> &str {
        match self {
            GridNode::Card(card) => &card.markup,
            GridNode::NoProducts(markup) | GridNode::Error(markup) => markup,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub view: CardView,
    pub markup: String,
}

impl CardNode {
    pub fn product_id(&self) -> Option<i64> {
        self.view.id
    }

    pub fn in_stock(&self) -> bool {
        self.view.in_stock
    }
}

/// The `.products-grid` container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    nodes: Vec<GridNode>,
}

impl Grid {
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn replace(&mut self, nodes: Vec<GridNode>) {
        self.nodes = nodes;
    }

    pub fn append(&mut self, nodes: Vec<GridNode>) {
        self.nodes.extend(nodes);
    }

    /// Drop error blocks left over from an earlier failed load.
    pub fn clear_errors(&mut self) {
        self.nodes.retain(|n| !matches!(n, GridNode::Error(_)));
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardNode> {
        self.nodes.iter().filter_map(|n| match n {
            GridNode::Card(card) => Some(card),
            _ => None,
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    pub fn find_card(&self, product_id: i64) -> Option<&CardNode> {
        self.cards().find(|c| c.product_id() == Some(product_id))
    }

    pub fn shows_no_products(&self) -> bool {
        matches!(self.nodes.as_slice(), [GridNode::NoProducts(_)])
    }

    pub fn error_message_shown(&self) -> bool {
        self.nodes.iter().any(|n| matches!(n, GridNode::Error(_)))
    }

    pub fn to_html(&self) -> String {
        self.nodes.iter().map(GridNode::markup).collect()
    }
}

/// Where the load-more control lives in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPlacement {
    /// Shipped with the page shell.
    Existing,
    /// Created at bootstrap, right after the grid.
    AfterGrid,
}

/// The "Load More" button.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMoreControl {
    placement: ControlPlacement,
    disabled: bool,
    visible: bool,
    label: &'static str,
}

impl LoadMoreControl {
    pub fn new(placement: ControlPlacement) -> Self {
        Self {
            placement,
            disabled: false,
            visible: true,
            label: LOAD_MORE_LABEL,
        }
    }

    pub fn placement(&self) -> ControlPlacement {
        self.placement
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.disabled = busy;
        self.label = if busy { LOADING_LABEL } else { LOAD_MORE_LABEL };
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn to_html(&self) -> Result<String, askama::Error> {
        LoadMoreTemplate {
            label: self.label,
            disabled: self.disabled,
            visible: self.visible,
        }
        .render()
    }
}

/// The `.cart-count` badge. Holds raw text like the element it mirrors.
#[derive(Debug, Clone, PartialEq)]
pub struct CartCounter {
    text: String,
}

impl Default for CartCounter {
    fn default() -> Self {
        Self { text: "0".to_string() }
    }
}

impl CartCounter {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current value; unparsable text counts as zero.
    pub fn count(&self) -> i64 {
        self.text.trim().parse().unwrap_or(0)
    }

    pub fn increment(&mut self) -> i64 {
        let next = self.count().saturating_add(1);
        self.text = next.to_string();
        next
    }
}

/// Everything the widget touches on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub grid: Grid,
    pub load_more: Option<LoadMoreControl>,
    pub cart: Option<CartCounter>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A shell with a grid and a cart counter but no load-more control.
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            load_more: None,
            cart: Some(CartCounter::default()),
        }
    }

    /// Shell markup already contains a load-more control.
    pub fn with_load_more(mut self) -> Self {
        self.load_more = Some(LoadMoreControl::new(ControlPlacement::Existing));
        self
    }

    pub fn with_cart(mut self, cart: Option<CartCounter>) -> Self {
        self.cart = cart;
        self
    }

    /// Create the load-more control after the grid unless the page has one.
    /// Returns true if it was created.
    pub fn ensure_load_more(&mut self) -> bool {
        if self.load_more.is_some() {
            return false;
        }
        self.load_more = Some(LoadMoreControl::new(ControlPlacement::AfterGrid));
        true
    }

    pub fn sync_busy(&mut self, busy: bool) {
        if let Some(control) = self.load_more.as_mut() {
            control.set_busy(busy);
        }
    }

    pub fn sync_has_more(&mut self, has_more: bool) {
        if let Some(control) = self.load_more.as_mut() {
            control.set_visible(has_more);
        }
    }

    pub fn cart_count(&self) -> Option<i64> {
        self.cart.as_ref().map(CartCounter::count)
    }

    /// Markup of the grid container followed by the load-more control.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        let load_more = match &self.load_more {
            Some(control) => control.to_html()?,
            None => String::new(),
        };
        CatalogTemplate {
            nodes: self.grid.nodes().iter().map(GridNode::markup).collect(),
            has_load_more: self.load_more.is_some(),
            load_more,
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_counter_parses_text() {
        let mut cart = CartCounter::with_text("4");
        assert_eq!(cart.increment(), 5);
        assert_eq!(cart.text(), "5");

        let mut cart = CartCounter::with_text("n/a");
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.increment(), 1);
    }

    #[test]
    fn test_control_busy_state() {
        let mut control = LoadMoreControl::new(ControlPlacement::AfterGrid);
        assert_eq!(control.label(), "Load More");
        assert!(!control.is_disabled());
        control.set_busy(true);
        assert_eq!(control.label(), "Loading...");
        assert!(control.is_disabled());
        control.set_busy(false);
        assert_eq!(control.label(), "Load More");
        assert!(!control.is_disabled());
    }

    #[test]
    fn test_ensure_load_more_reuses_existing() {
        let mut page = Page::new().with_load_more();
        assert!(!page.ensure_load_more());
        assert_eq!(page.load_more.as_ref().map(|c| c.placement()), Some(ControlPlacement::Existing));

        let mut page = Page::new();
        assert!(page.ensure_load_more());
        assert_eq!(page.load_more.as_ref().map(|c| c.placement()), Some(ControlPlacement::AfterGrid));
        assert!(!page.ensure_load_more());
    }

    #[test]
    fn test_control_markup_reflects_state() {
        let mut control = LoadMoreControl::new(ControlPlacement::AfterGrid);
        control.set_busy(true);
        control.set_visible(false);
        let html = control.to_html().unwrap();
        assert!(html.contains("load-more-btn"));
        assert!(html.contains("Loading..."));
        assert!(html.contains(" disabled"));
        assert!(html.contains("display: none;"));
    }

    #[test]
    fn test_page_html_places_control_after_grid() {
        let mut page = Page::new();
        page.ensure_load_more();
        let html = page.to_html().unwrap();
        let grid_at = html.find("products-grid").unwrap();
        let control_at = html.find("load-more-container").unwrap();
        assert!(grid_at < control_at);
    }
}
