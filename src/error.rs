use thiserror::Error;

use crate::api::FetchError;
use crate::catalog::actions::ActionError;

/// Anything that can go wrong while the widget loads or handles an event.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Action(#[from] ActionError),
}
