//! The catalog browser widget: pagination state, page model, render layer,
//! delegated actions and the orchestrator tying them together.

pub mod actions;
pub mod browser;
pub mod page;
pub mod pagination;
pub mod render;

pub use actions::{Action, ActionError, GridEvent};
pub use browser::{CatalogBrowser, Effect, LoadOutcome};
pub use page::{CardNode, CartCounter, ControlPlacement, Grid, GridNode, LoadMoreControl, Page};
pub use pagination::{FetchRequest, FetchTicket, LoadMode, PaginationState, PAGE_SIZE};
pub use render::{render, RenderOutcome};
