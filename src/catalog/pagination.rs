use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Products requested per page.
pub const PAGE_SIZE: u32 = 6;

/// How a fetched page is written into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Discard the grid content (initial load, retry).
    Replace,
    /// Add cards after the existing ones (load more).
    Append,
}

/// One dispatched page request. `generation` identifies the dispatch; only
/// the latest generation may be applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub page_size: u32,
    pub mode: LoadMode,
    pub generation: u64,
}

/// Keeps the busy flag raised for as long as it lives.
#[derive(Debug)]
struct BusyGuard(Arc<AtomicUsize>);

impl BusyGuard {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        BusyGuard(Arc::clone(counter))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// An in-flight request. Dropping it, finished or not, lowers the busy flag.
#[derive(Debug)]
pub struct FetchTicket {
    request: FetchRequest,
    _busy: BusyGuard,
}

impl FetchTicket {
    pub fn request(&self) -> FetchRequest {
        self.request
    }

    /// Ends the in-flight period and hands back the request description.
    pub fn release(self) -> FetchRequest {
        self.request
    }
}

/// Page counter, busy and has-more flags, and the dispatch generation.
#[derive(Debug)]
pub struct PaginationState {
    current_page: u32,
    page_size: u32,
    has_more: bool,
    generation: u64,
    in_flight: Arc<AtomicUsize>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            has_more: true,
            generation: 0,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while at least one request is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Reset to page 1 and dispatch a request for it. Never refused, even
    /// while busy.
    pub fn begin_initial(&mut self) -> FetchTicket {
        self.current_page = 1;
        self.dispatch(1, LoadMode::Replace)
    }

    /// Dispatch a request for the next page, or `None` while busy or once the
    /// last page has been seen.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.is_busy() || !self.has_more {
            return None;
        }
        Some(self.dispatch(self.current_page.saturating_add(1), LoadMode::Append))
    }

    fn dispatch(&mut self, page: u32, mode: LoadMode) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            request: FetchRequest {
                page,
                page_size: self.page_size,
                mode,
                generation: self.generation,
            },
            _busy: BusyGuard::acquire(&self.in_flight),
        }
    }

    /// Whether `request` is the latest dispatch.
    pub fn is_current(&self, request: &FetchRequest) -> bool {
        request.generation == self.generation
    }

    /// Record that `request` was fetched and applied.
    pub fn commit(&mut self, request: &FetchRequest) {
        self.current_page = request.page;
    }

    /// A full page suggests there may be more; a short one marks the end.
    pub fn update_has_more(&mut self, returned: usize) {
        self.has_more = returned >= self.page_size as usize;
    }
}
