use super::actions::{Action, GridEvent};
use super::page::Page;
use super::pagination::{FetchRequest, FetchTicket, LoadMode, PaginationState};
use super::render::{render, render_error, RenderOutcome};
use crate::api::{fetch_page, fetch_product, ApiClient, FetchError, LOAD_FAILED_MESSAGE};
use crate::error::CatalogError;
use crate::models::Product;

/// Result of one load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Load-more short-circuited (busy, or no more pages).
    Skipped,
    /// A later dispatch superseded this one; nothing was applied.
    Stale,
    Rendered(RenderOutcome),
    /// The error block is on the page.
    Failed(CatalogError),
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered(_))
    }
}

/// Observable effect of a dispatched grid event.
#[derive(Debug)]
pub enum Effect {
    /// Go to the detail view of product `id` at `href`.
    Navigate { id: i64, href: String },
    /// Cart badge now shows this count.
    CartUpdated(i64),
    Loaded(LoadOutcome),
    /// Out-of-stock or unknown card, or no cart badge on the page.
    Ignored,
    /// Wired into the markup but deliberately does nothing yet.
    NotImplemented(Action),
}

/// The catalog widget: owns the page model and the pagination state and
/// drives both from API results and grid events.
pub struct CatalogBrowser {
    api: ApiClient,
    state: PaginationState,
    page: Page,
}

impl CatalogBrowser {
    pub fn new(api: ApiClient, page: Page) -> Self {
        Self::with_state(api, page, PaginationState::default())
    }

    pub fn with_state(api: ApiClient, page: Page, state: PaginationState) -> Self {
        Self { api, state, page }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Reuse the page's load-more control or create one after the grid.
    /// Returns true if a control was created.
    pub fn bootstrap(&mut self) -> bool {
        let created = self.page.ensure_load_more();
        tracing::debug!(created, "Load-more control wired");
        created
    }

    /// Bootstrap, then run the initial load unconditionally.
    pub async fn start(&mut self) -> LoadOutcome {
        self.bootstrap();
        self.load_initial().await
    }

    pub fn begin_initial_load(&mut self) -> FetchTicket {
        let ticket = self.state.begin_initial();
        self.page.sync_busy(true);
        ticket
    }

    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        let ticket = self.state.begin_load_more()?;
        self.page.sync_busy(true);
        Some(ticket)
    }

    pub async fn fetch(&self, request: FetchRequest) -> Result<Vec<Product>, FetchError> {
        fetch_page(&self.api, request.page, request.page_size).await
    }

    /// Apply a completed fetch. Results of superseded dispatches are dropped,
    /// failures included.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<Vec<Product>, FetchError>) -> LoadOutcome {
        let request = ticket.release();
        self.page.sync_busy(self.state.is_busy());

        if !self.state.is_current(&request) {
            tracing::warn!(
                page = request.page,
                generation = request.generation,
                latest = self.state.generation(),
                "Dropping stale catalog response"
            );
            return LoadOutcome::Stale;
        }

        let products = match result {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(page = request.page, error = %e, "Catalog page failed to load");
                self.show_error(e.user_message(), request.mode);
                return LoadOutcome::Failed(e.into());
            }
        };

        match render(&mut self.page, &mut self.state, &products, request.mode) {
            Ok(outcome) => {
                self.state.commit(&request);
                tracing::info!(
                    page = request.page,
                    returned = products.len(),
                    has_more = self.state.has_more(),
                    "Catalog page rendered"
                );
                LoadOutcome::Rendered(outcome)
            }
            Err(e) => {
                tracing::error!(%e, "Template render error");
                self.show_error(LOAD_FAILED_MESSAGE, request.mode);
                LoadOutcome::Failed(e.into())
            }
        }
    }

    /// Fetch page 1 and replace the grid.
    pub async fn load_initial(&mut self) -> LoadOutcome {
        let ticket = self.begin_initial_load();
        let result = self.fetch(ticket.request()).await;
        self.finish(ticket, result)
    }

    /// Fetch the next page and append it, unless busy or out of pages.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(ticket) = self.begin_load_more() else {
            tracing::debug!(
                busy = self.state.is_busy(),
                has_more = self.state.has_more(),
                "Load more skipped"
            );
            return LoadOutcome::Skipped;
        };
        let result = self.fetch(ticket.request()).await;
        self.finish(ticket, result)
    }

    /// Initial-load failures take over the grid; load-more failures keep the
    /// cards and add the error block after them.
    fn show_error(&mut self, message: &str, mode: LoadMode) {
        let node = match render_error(message) {
            Ok(node) => node,
            Err(e) => {
                tracing::error!(%e, "Template render error");
                return;
            }
        };
        match mode {
            LoadMode::Replace => self.page.grid.replace(vec![node]),
            LoadMode::Append => {
                self.page.grid.clear_errors();
                self.page.grid.append(vec![node]);
            }
        }
    }

    /// Single entry point for clicks delegated from the grid.
    pub async fn dispatch(&mut self, event: &GridEvent) -> Result<Effect, CatalogError> {
        let (action, product_id) = event.parse()?;
        tracing::debug!(%action, ?product_id, "Grid event");
        let effect = match (action, product_id) {
            (Action::OpenProduct, Some(id)) => self.open_product(id),
            (Action::AddToCart, Some(id)) => self.add_to_cart(id),
            (Action::ToggleWishlist, Some(id)) => self.toggle_wishlist(id),
            (Action::Retry, _) => Effect::Loaded(self.load_initial().await),
            (Action::LoadMore, _) => Effect::Loaded(self.load_more().await),
            // parse() guarantees product actions carry an id
            (_, None) => Effect::Ignored,
        };
        Ok(effect)
    }

    pub fn open_product(&self, product_id: i64) -> Effect {
        Effect::Navigate {
            id: product_id,
            href: format!("/product/{}", product_id),
        }
    }

    /// Bump the cart badge by one. Disabled (out-of-stock) buttons do nothing.
    pub fn add_to_cart(&mut self, product_id: i64) -> Effect {
        let in_stock = self
            .page
            .grid
            .find_card(product_id)
            .map(|card| card.in_stock())
            .unwrap_or(false);
        if !in_stock {
            return Effect::Ignored;
        }
        match self.page.cart.as_mut() {
            Some(cart) => Effect::CartUpdated(cart.increment()),
            None => Effect::Ignored,
        }
    }

    /// Wishlist storage does not exist yet.
    pub fn toggle_wishlist(&self, product_id: i64) -> Effect {
        tracing::debug!(product_id, "Wishlist toggle is not implemented");
        Effect::NotImplemented(Action::ToggleWishlist)
    }

    /// Full record for the product detail view.
    pub async fn product_detail(&self, product_id: i64) -> Result<Product, FetchError> {
        fetch_product(&self.api, product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> CatalogBrowser {
        // Never contacted: these tests only use the synchronous begin/finish path
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let mut browser = CatalogBrowser::new(api, Page::new());
        browser.bootstrap();
        browser
    }

    fn laptop(id: i64, in_stock: bool) -> Product {
        Product {
            id: Some(id),
            is_in_stock: Some(in_stock),
            ..Default::default()
        }
    }

    fn full_page(start: i64) -> Vec<Product> {
        (start..start + 6).map(|id| laptop(id, true)).collect()
    }

    #[test]
    fn test_control_reflects_busy() {
        let mut b = browser();
        let ticket = b.begin_initial_load();
        let control = b.page().load_more.as_ref().unwrap();
        assert!(control.is_disabled());
        assert_eq!(control.label(), "Loading...");
        b.finish(ticket, Ok(full_page(1)));
        let control = b.page().load_more.as_ref().unwrap();
        assert!(!control.is_disabled());
        assert_eq!(control.label(), "Load More");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut b = browser();
        let first = b.begin_initial_load();
        let second = b.begin_initial_load();

        let outcome = b.finish(second, Ok(full_page(1)));
        assert!(outcome.is_rendered());
        assert!(b.state().is_busy());

        let outcome = b.finish(first, Ok(vec![laptop(99, true)]));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(b.page().grid.card_count(), 6);
        assert!(b.page().grid.find_card(99).is_none());
        assert!(!b.state().is_busy());
        assert!(!b.page().load_more.as_ref().unwrap().is_disabled());
    }

    #[test]
    fn test_stale_failure_shows_no_error() {
        let mut b = browser();
        let first = b.begin_initial_load();
        let second = b.begin_initial_load();
        b.finish(second, Ok(full_page(1)));
        let outcome = b.finish(first, Err(FetchError::Status(500)));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert!(!b.page().grid.error_message_shown());
    }

    #[test]
    fn test_initial_reload_supersedes_load_more() {
        let mut b = browser();
        let t = b.begin_initial_load();
        b.finish(t, Ok(full_page(1)));

        let more = b.begin_load_more().expect("should dispatch");
        let reload = b.begin_initial_load();
        b.finish(reload, Ok(full_page(1)));
        let outcome = b.finish(more, Ok(full_page(7)));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(b.page().grid.card_count(), 6);
        assert_eq!(b.state().current_page(), 1);
    }

    #[test]
    fn test_load_more_failure_keeps_cards_and_counters() {
        let mut b = browser();
        let t = b.begin_initial_load();
        b.finish(t, Ok(full_page(1)));

        let t = b.begin_load_more().unwrap();
        let outcome = b.finish(t, Err(FetchError::Network("reset".into())));
        assert!(matches!(outcome, LoadOutcome::Failed(CatalogError::Fetch(_))));
        assert_eq!(b.page().grid.card_count(), 6);
        assert!(b.page().grid.error_message_shown());
        assert_eq!(b.state().current_page(), 1);
        assert!(b.state().has_more());
    }

    #[test]
    fn test_failed_retry_restarts_paging_from_first_page() {
        let mut b = browser();
        let t = b.begin_initial_load();
        b.finish(t, Ok(full_page(1)));
        for start in [7, 13] {
            let t = b.begin_load_more().unwrap();
            b.finish(t, Ok(full_page(start)));
        }
        assert_eq!(b.state().current_page(), 3);

        let t = b.begin_initial_load();
        let outcome = b.finish(t, Err(FetchError::Status(500)));
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(b.page().grid.card_count(), 0);
        assert_eq!(b.state().current_page(), 1);

        let next = b.begin_load_more().expect("should dispatch");
        assert_eq!(next.request().page, 2);
    }

    #[test]
    fn test_add_to_cart_counts_each_click() {
        let mut b = browser();
        let t = b.begin_initial_load();
        b.finish(t, Ok(vec![laptop(1, true), laptop(2, false)]));

        assert!(matches!(b.add_to_cart(1), Effect::CartUpdated(1)));
        assert!(matches!(b.add_to_cart(1), Effect::CartUpdated(2)));
        assert!(matches!(b.add_to_cart(2), Effect::Ignored));
        assert!(matches!(b.add_to_cart(404), Effect::Ignored));
        assert_eq!(b.page().cart_count(), Some(2));
    }

    #[test]
    fn test_add_to_cart_without_badge() {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let mut b = CatalogBrowser::new(api, Page::new().with_cart(None));
        let t = b.begin_initial_load();
        b.finish(t, Ok(vec![laptop(1, true)]));
        assert!(matches!(b.add_to_cart(1), Effect::Ignored));
    }

    #[tokio::test]
    async fn test_dispatch_product_actions() {
        let mut b = browser();
        let t = b.begin_initial_load();
        b.finish(t, Ok(vec![laptop(5, true)]));

        let effect = b.dispatch(&GridEvent::for_product(Action::OpenProduct, 5)).await.unwrap();
        assert!(matches!(effect, Effect::Navigate { id: 5, ref href } if href == "/product/5"));

        let effect = b.dispatch(&GridEvent::for_product(Action::ToggleWishlist, 5)).await.unwrap();
        assert!(matches!(effect, Effect::NotImplemented(Action::ToggleWishlist)));
        assert_eq!(b.page().grid.card_count(), 1);

        let err = b.dispatch(&GridEvent::new("explode", None)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Action(_)));
    }
}
