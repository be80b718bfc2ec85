//! Delegated grid events.
//!
//! Rendered markup carries `data-action` and `data-product-id` attributes; a
//! single listener on the grid turns a click into a [`GridEvent`] and the
//! browser dispatches on the parsed [`Action`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenProduct,
    AddToCart,
    ToggleWishlist,
    Retry,
    LoadMore,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::OpenProduct => "open-product",
            Action::AddToCart => "add-to-cart",
            Action::ToggleWishlist => "toggle-wishlist",
            Action::Retry => "retry",
            Action::LoadMore => "load-more",
        }
    }

    pub fn needs_product(&self) -> bool {
        matches!(self, Action::OpenProduct | Action::AddToCart | Action::ToggleWishlist)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open-product" => Ok(Action::OpenProduct),
            "add-to-cart" => Ok(Action::AddToCart),
            "toggle-wishlist" => Ok(Action::ToggleWishlist),
            "retry" => Ok(Action::Retry),
            "load-more" => Ok(Action::LoadMore),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action {0} needs a product id")]
    MissingProductId(Action),

    #[error("Invalid product id: {0}")]
    InvalidProductId(String),
}

/// Attribute values of the element that was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEvent {
    pub action: String,
    pub product_id: Option<String>,
}

impl GridEvent {
    pub fn new(action: impl Into<String>, product_id: Option<&str>) -> Self {
        Self {
            action: action.into(),
            product_id: product_id.map(str::to_string),
        }
    }

    pub fn for_product(action: Action, product_id: i64) -> Self {
        Self::new(action.as_str(), Some(&product_id.to_string()))
    }

    pub fn plain(action: Action) -> Self {
        Self::new(action.as_str(), None)
    }

    /// Resolve the attributes into an action and, where one is required, the
    /// product it targets.
    pub fn parse(&self) -> Result<(Action, Option<i64>), ActionError> {
        let action: Action = self.action.parse()?;
        if !action.needs_product() {
            return Ok((action, None));
        }
        let raw = self
            .product_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let Some(raw) = raw else {
            return Err(ActionError::MissingProductId(action));
        };
        let product_id = raw
            .parse::<i64>()
            .map_err(|_| ActionError::InvalidProductId(raw.to_string()))?;
        Ok((action, Some(product_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_roundtrip_markup_attributes() {
        for action in [
            Action::OpenProduct,
            Action::AddToCart,
            Action::ToggleWishlist,
            Action::Retry,
            Action::LoadMore,
        ] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_parse_product_event() {
        let event = GridEvent::new("add-to-cart", Some(" 12 "));
        assert_eq!(event.parse().unwrap(), (Action::AddToCart, Some(12)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            GridEvent::new("buy-now", Some("1")).parse(),
            Err(ActionError::UnknownAction("buy-now".into()))
        );
        assert_eq!(
            GridEvent::new("add-to-cart", Some("")).parse(),
            Err(ActionError::MissingProductId(Action::AddToCart))
        );
        assert_eq!(
            GridEvent::new("open-product", Some("abc")).parse(),
            Err(ActionError::InvalidProductId("abc".into()))
        );
    }

    #[test]
    fn test_plain_actions_need_no_product() {
        assert_eq!(GridEvent::plain(Action::Retry).parse().unwrap(), (Action::Retry, None));
        assert_eq!(GridEvent::plain(Action::LoadMore).parse().unwrap(), (Action::LoadMore, None));
    }

    #[test]
    fn test_plain_actions_ignore_stray_product_id() {
        assert_eq!(GridEvent::new("retry", Some("x")).parse(), Ok((Action::Retry, None)));
        assert_eq!(GridEvent::new("load-more", Some("7")).parse(), Ok((Action::LoadMore, None)));
    }
}
