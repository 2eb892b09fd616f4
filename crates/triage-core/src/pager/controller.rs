//! Incremental fetch controller.
//!
//! A [`Pager`] loads the first page of a filtered query, then extends the
//! accumulated list one page at a time. Requests may overlap: every request
//! takes a sequence number, and a response is applied only if no request was
//! issued after it. Older responses are dropped without touching state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::query::{FilterSpec, Filters, PageRequest};
use crate::traits::PageSource;

use super::Accumulator;

/// Where the pager stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerStatus {
    Idle,
    LoadingFirst,
    LoadingMore,
    /// The last applied request failed with this message.
    Error(String),
}

/// What a load call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied.
    Applied,
    /// The request failed and the failure was applied.
    Failed,
    /// A newer request or a close superseded this one; state is untouched.
    Discarded,
    /// Nothing was requested.
    Skipped,
}

/// Client-side controller accumulating pages from a [`PageSource`].
///
/// Clones share state. The pager is meant for a single consumer issuing
/// calls, but tolerates those calls' responses completing in any order.
pub struct Pager<S: PageSource> {
    inner: Arc<PagerInner<S>>,
}

struct PagerInner<S: PageSource> {
    source: S,
    page_size: u32,
    state: Mutex<PagerState<S::Item>>,
}

struct PagerState<T> {
    items: Accumulator<T>,
    next_cursor: Option<String>,
    status: PagerStatus,
    seq: u64,
    active: bool,
    filters: Filters,
    spec: FilterSpec,
}

impl<T> PagerState<T> {
    fn is_current(&self, seq: u64) -> bool {
        self.active && self.seq == seq
    }
}

impl<S: PageSource> Clone for Pager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PageSource> Pager<S> {
    /// Create an idle pager with no filters. Nothing is fetched until
    /// [`Pager::load_first`] or [`Pager::set_filters`] is called.
    pub fn new(source: S, page_size: u32) -> Self {
        Self::with_filters(source, Filters::default(), page_size)
    }

    /// Create an idle pager with initial filters.
    pub fn with_filters(source: S, filters: Filters, page_size: u32) -> Self {
        let spec = filters.normalize();
        Self {
            inner: Arc::new(PagerInner {
                source,
                page_size: PageRequest::clamp(i64::from(page_size)),
                state: Mutex::new(PagerState {
                    items: Accumulator::new(),
                    next_cursor: None,
                    status: PagerStatus::Idle,
                    seq: 0,
                    active: true,
                    filters,
                    spec,
                }),
            }),
        }
    }

    /// Access the page source.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    fn lock(&self) -> MutexGuard<'_, PagerState<S::Item>> {
        // State is only ever replaced field by field, so it stays usable even
        // if a holder panicked.
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Discard the accumulated list and fetch the first page.
    ///
    /// Valid in any state; supersedes every request issued before it.
    pub async fn load_first(&self) -> FetchOutcome {
        let (seq, filters) = {
            let mut state = self.lock();
            if !state.active {
                return FetchOutcome::Skipped;
            }
            state.items.clear();
            state.next_cursor = None;
            state.status = PagerStatus::LoadingFirst;
            state.seq += 1;
            (state.seq, state.filters.clone())
        };

        debug!(seq, "loading first page");
        let request = PageRequest::first(self.inner.page_size);
        let result = self.inner.source.fetch_page(&filters, &request).await;

        let mut state = self.lock();
        if !state.is_current(seq) {
            trace!(seq, latest = state.seq, "discarding stale first page");
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                state.items.reset(page.data);
                state.next_cursor = page.next_cursor;
                state.status = PagerStatus::Idle;
                debug!(
                    seq,
                    items = state.items.len(),
                    has_more = state.next_cursor.is_some(),
                    "first page applied"
                );
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(seq, error = %e, "failed to load first page");
                state.items.clear();
                state.next_cursor = None;
                state.status = PagerStatus::Error(format!("Failed to fetch data: {}", e));
                FetchOutcome::Failed
            }
        }
    }

    /// Same as [`Pager::load_first`].
    pub async fn refresh(&self) -> FetchOutcome {
        self.load_first().await
    }

    /// Fetch the page after the current cursor and merge it.
    ///
    /// Does nothing while a load is in flight or when there is no next page.
    /// A failure keeps everything accumulated so far.
    pub async fn load_more(&self) -> FetchOutcome {
        let (seq, filters, cursor) = {
            let mut state = self.lock();
            if !state.active
                || matches!(
                    state.status,
                    PagerStatus::LoadingFirst | PagerStatus::LoadingMore
                )
            {
                return FetchOutcome::Skipped;
            }
            let Some(cursor) = state.next_cursor.clone() else {
                return FetchOutcome::Skipped;
            };
            state.status = PagerStatus::LoadingMore;
            state.seq += 1;
            (state.seq, state.filters.clone(), cursor)
        };

        debug!(seq, %cursor, "loading next page");
        let request = PageRequest::after(cursor, self.inner.page_size);
        let result = self.inner.source.fetch_page(&filters, &request).await;

        let mut state = self.lock();
        if !state.is_current(seq) {
            trace!(seq, latest = state.seq, "discarding stale page");
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                let received = page.data.len();
                let added = state.items.merge(page.data);
                if added < received {
                    debug!(seq, duplicates = received - added, "dropped repeated items");
                }
                state.next_cursor = page.next_cursor;
                state.status = PagerStatus::Idle;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(seq, error = %e, "failed to load next page");
                state.status = PagerStatus::Error(format!("Failed to fetch more data: {}", e));
                FetchOutcome::Failed
            }
        }
    }

    /// Switch to new filters.
    ///
    /// When the filters normalize differently from the current ones, or
    /// nothing has been fetched yet, the accumulated list is discarded and
    /// the first page is loaded. Equivalent filters on a loaded pager are a
    /// no-op.
    pub async fn set_filters(&self, filters: Filters) -> FetchOutcome {
        {
            let mut state = self.lock();
            let spec = filters.normalize();
            if spec == state.spec && state.seq > 0 {
                state.filters = filters;
                return FetchOutcome::Skipped;
            }
            state.filters = filters;
            state.spec = spec;
        }
        self.load_first().await
    }

    /// Tear the pager down. Responses still in flight are discarded and
    /// later load calls do nothing.
    pub fn close(&self) {
        let mut state = self.lock();
        state.active = false;
        debug!("pager closed");
    }

    pub fn is_closed(&self) -> bool {
        !self.lock().active
    }

    /// Snapshot of the accumulated items.
    pub fn items(&self) -> Vec<S::Item> {
        self.lock().items.items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn status(&self) -> PagerStatus {
        self.lock().status.clone()
    }

    /// Message of the last applied failure, if the pager is in error.
    pub fn error(&self) -> Option<String> {
        match &self.lock().status {
            PagerStatus::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.lock().status,
            PagerStatus::LoadingFirst | PagerStatus::LoadingMore
        )
    }

    /// Returns true if another page can be loaded.
    pub fn has_more(&self) -> bool {
        self.lock().next_cursor.is_some()
    }

    pub fn next_cursor(&self) -> Option<String> {
        self.lock().next_cursor.clone()
    }

    pub fn filters(&self) -> Filters {
        self.lock().filters.clone()
    }
}

impl<S: PageSource> std::fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Pager")
            .field("page_size", &self.inner.page_size)
            .field("status", &state.status)
            .field("items", &state.items.len())
            .field("next_cursor", &state.next_cursor)
            .field("seq", &state.seq)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TransportError};
    use crate::query::Page;
    use crate::traits::Keyed;
    use crate::Result;
    use async_trait::async_trait;
    use tokio::sync::{mpsc, oneshot};

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl Keyed for Item {
        fn key(&self) -> &str {
            &self.0
        }
    }

    /// A fetch the test has to answer by hand.
    struct Call {
        filters: Filters,
        request: PageRequest,
        reply: oneshot::Sender<Result<Page<Item>>>,
    }

    impl Call {
        fn ok(self, keys: &[&str], next: Option<&str>) {
            let page = Page {
                data: keys.iter().map(|k| Item(k.to_string())).collect(),
                next_cursor: next.map(str::to_string),
            };
            let _ = self.reply.send(Ok(page));
        }

        fn fail(self, message: &str) {
            let _ = self.reply.send(Err(Error::Transport(TransportError::Connection {
                message: message.to_string(),
            })));
        }
    }

    /// Page source whose responses are released by the test, in any order.
    struct GatedSource {
        calls: mpsc::UnboundedSender<Call>,
    }

    #[async_trait]
    impl PageSource for GatedSource {
        type Item = Item;

        async fn fetch_page(&self, filters: &Filters, request: &PageRequest) -> Result<Page<Item>> {
            let (reply, rx) = oneshot::channel();
            let call = Call {
                filters: filters.clone(),
                request: request.clone(),
                reply,
            };
            if self.calls.send(call).is_err() {
                return Err(TransportError::Connection {
                    message: "test harness gone".to_string(),
                }
                .into());
            }
            rx.await.unwrap_or_else(|_| Err(TransportError::Timeout.into()))
        }
    }

    fn gated(page_size: u32) -> (Pager<GatedSource>, mpsc::UnboundedReceiver<Call>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Pager::new(GatedSource { calls: tx }, page_size), rx)
    }

    async fn next_call(rx: &mut mpsc::UnboundedReceiver<Call>) -> Call {
        rx.recv().await.expect("a fetch should have been issued")
    }

    fn keys(pager: &Pager<GatedSource>) -> Vec<String> {
        pager.items().into_iter().map(|i| i.0).collect()
    }

    /// Load a first page of `keys` with the given cursor.
    async fn primed(
        first: &[&str],
        next: Option<&str>,
    ) -> (Pager<GatedSource>, mpsc::UnboundedReceiver<Call>) {
        let (pager, mut rx) = gated(2);
        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        next_call(&mut rx).await.ok(first, next);
        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        (pager, rx)
    }

    #[tokio::test]
    async fn first_page_is_applied() {
        let (pager, mut rx) = gated(2);
        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });

        let call = next_call(&mut rx).await;
        assert_eq!(call.request, PageRequest::first(2));
        assert_eq!(pager.status(), PagerStatus::LoadingFirst);
        call.ok(&["a", "b"], Some("b"));

        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(keys(&pager), vec!["a", "b"]);
        assert_eq!(pager.status(), PagerStatus::Idle);
        assert!(pager.has_more());
        assert_eq!(pager.next_cursor().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn load_more_merges_without_duplicates() {
        let (pager, mut rx) = primed(&["a", "b"], Some("b")).await;

        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_more().await }
        });
        let call = next_call(&mut rx).await;
        assert_eq!(call.request, PageRequest::after("b", 2));
        assert_eq!(pager.status(), PagerStatus::LoadingMore);
        call.ok(&["b", "c"], None);

        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(keys(&pager), vec!["a", "b", "c"]);
        assert!(!pager.has_more());
    }

    #[tokio::test]
    async fn load_more_without_cursor_is_noop() {
        let (pager, mut rx) = primed(&["a"], None).await;

        assert_eq!(pager.load_more().await, FetchOutcome::Skipped);
        assert!(rx.try_recv().is_err());
        assert_eq!(keys(&pager), vec!["a"]);
        assert_eq!(pager.status(), PagerStatus::Idle);
    }

    #[tokio::test]
    async fn load_more_while_loading_is_noop() {
        let (pager, mut rx) = gated(2);
        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        let call = next_call(&mut rx).await;

        assert_eq!(pager.load_more().await, FetchOutcome::Skipped);
        assert!(rx.try_recv().is_err());

        call.ok(&["a"], Some("a"));
        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
    }

    #[tokio::test]
    async fn first_page_failure_clears_state() {
        let (pager, mut rx) = primed(&["a", "b"], Some("b")).await;

        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.refresh().await }
        });
        let call = next_call(&mut rx).await;
        assert!(pager.is_empty());
        call.fail("connection reset");

        assert_eq!(task.await.unwrap(), FetchOutcome::Failed);
        assert!(pager.is_empty());
        assert!(!pager.has_more());
        let message = pager.error().unwrap();
        assert!(message.contains("connection reset"), "{}", message);
    }

    #[tokio::test]
    async fn next_page_failure_keeps_progress() {
        let (pager, mut rx) = primed(&["a", "b"], Some("b")).await;

        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_more().await }
        });
        next_call(&mut rx).await.fail("boom");

        assert_eq!(task.await.unwrap(), FetchOutcome::Failed);
        assert_eq!(keys(&pager), vec!["a", "b"]);
        assert_eq!(pager.next_cursor().as_deref(), Some("b"));
        assert!(matches!(pager.status(), PagerStatus::Error(_)));

        // A failed page can be retried.
        let retry = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_more().await }
        });
        next_call(&mut rx).await.ok(&["c"], None);
        assert_eq!(retry.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(keys(&pager), vec!["a", "b", "c"]);
        assert_eq!(pager.error(), None);
    }

    #[tokio::test]
    async fn superseded_first_page_is_discarded() {
        let (pager, mut rx) = gated(2);

        let old = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        let old_call = next_call(&mut rx).await;

        let new = tokio::spawn({
            let pager = pager.clone();
            async move { pager.set_filters(Filters::new().with_platform("reddit")).await }
        });
        let new_call = next_call(&mut rx).await;
        assert_eq!(new_call.filters.platform.as_deref(), Some("reddit"));

        new_call.ok(&["r1"], None);
        assert_eq!(new.await.unwrap(), FetchOutcome::Applied);

        old_call.ok(&["a", "b"], Some("b"));
        assert_eq!(old.await.unwrap(), FetchOutcome::Discarded);

        assert_eq!(keys(&pager), vec!["r1"]);
        assert!(!pager.has_more());
        assert_eq!(pager.status(), PagerStatus::Idle);
    }

    #[tokio::test]
    async fn superseded_failure_is_discarded() {
        let (pager, mut rx) = gated(2);

        let old = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        let old_call = next_call(&mut rx).await;

        let new = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        next_call(&mut rx).await.ok(&["a"], Some("a"));
        assert_eq!(new.await.unwrap(), FetchOutcome::Applied);

        old_call.fail("late failure");
        assert_eq!(old.await.unwrap(), FetchOutcome::Discarded);
        assert_eq!(pager.status(), PagerStatus::Idle);
        assert_eq!(keys(&pager), vec!["a"]);
    }

    #[tokio::test]
    async fn reload_supersedes_in_flight_load_more() {
        let (pager, mut rx) = primed(&["a", "b"], Some("b")).await;

        let more = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_more().await }
        });
        let more_call = next_call(&mut rx).await;

        let reload = tokio::spawn({
            let pager = pager.clone();
            async move { pager.refresh().await }
        });
        let reload_call = next_call(&mut rx).await;
        assert_eq!(reload_call.request.cursor, None);

        reload_call.ok(&["x", "y"], Some("y"));
        assert_eq!(reload.await.unwrap(), FetchOutcome::Applied);

        more_call.ok(&["c", "d"], None);
        assert_eq!(more.await.unwrap(), FetchOutcome::Discarded);

        assert_eq!(keys(&pager), vec!["x", "y"]);
        assert_eq!(pager.next_cursor().as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn close_discards_in_flight_response() {
        let (pager, mut rx) = gated(2);
        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.load_first().await }
        });
        let call = next_call(&mut rx).await;

        pager.close();
        call.ok(&["a"], Some("a"));

        assert_eq!(task.await.unwrap(), FetchOutcome::Discarded);
        assert!(pager.is_empty());
        assert!(pager.is_closed());

        assert_eq!(pager.load_first().await, FetchOutcome::Skipped);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn equivalent_filters_do_not_reload() {
        let (pager, mut rx) = primed(&["a"], None).await;

        let outcome = pager
            .set_filters(Filters::new().with_platform(" ALL ").with_tag("  "))
            .await;
        assert_eq!(outcome, FetchOutcome::Skipped);
        assert!(rx.try_recv().is_err());
        assert_eq!(keys(&pager), vec!["a"]);
    }

    #[tokio::test]
    async fn filter_change_resets_before_response() {
        let (pager, mut rx) = primed(&["a", "b"], Some("b")).await;

        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.set_filters(Filters::new().with_tag("spam")).await }
        });
        let call = next_call(&mut rx).await;
        assert_eq!(call.filters.tags, vec!["spam".to_string()]);
        assert!(pager.is_empty());
        assert!(!pager.has_more());
        assert_eq!(pager.status(), PagerStatus::LoadingFirst);

        call.ok(&["s1"], None);
        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(keys(&pager), vec!["s1"]);
    }

    #[tokio::test]
    async fn filters_on_fresh_pager_start_first_load() {
        let (pager, mut rx) = gated(2);
        let task = tokio::spawn({
            let pager = pager.clone();
            async move { pager.set_filters(Filters::new()).await }
        });

        let call = next_call(&mut rx).await;
        assert_eq!(call.request, PageRequest::first(2));
        call.ok(&["a"], None);

        assert_eq!(task.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(keys(&pager), vec!["a"]);
    }
}
