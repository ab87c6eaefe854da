// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use log::{debug, warn};
use tokio::sync::watch;

use crate::{
    api::{Backend, SearchHit},
    config::Settings,
    shell::{Route, Shell},
    timer::Debouncer,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchState {
    pub(crate) query: String,
    pub(crate) results: Vec<SearchHit>,
    pub(crate) panel_visible: bool,
    /// A search for `query` is scheduled or in flight.
    pub(crate) pending: bool,
}

struct Inner<B, N> {
    backend: B,
    shell: N,
    state: watch::Sender<SearchState>,
}

impl<B: Backend, N> Inner<B, N> {
    /// Responses are applied in arrival order; a slow earlier request can
    /// overwrite the results of a faster later one.
    async fn run(&self, query: String) {
        debug!("Searching for {:?}", query);
        let outcome = match self.backend.search(&query).await {
            Ok(envelope) => envelope.into_data("search"),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(hits) => {
                debug!("Search for {:?} returned {} results", query, hits.len());
                self.state.send_modify(|state| {
                    state.panel_visible = !hits.is_empty();
                    state.results = hits;
                    if state.query == query {
                        state.pending = false;
                    }
                });
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", query, e);
                self.state.send_modify(|state| {
                    state.results.clear();
                    state.panel_visible = false;
                    if state.query == query {
                        state.pending = false;
                    }
                });
            }
        }
    }
}

/// Debounced free-text search feeding a result panel.
pub(crate) struct SearchCoordinator<B, N> {
    inner: Arc<Inner<B, N>>,
    debounce: Debouncer,
    blur: Debouncer,
    interval: Duration,
    grace: Duration,
}

impl<B, N> SearchCoordinator<B, N>
where
    B: Backend + 'static,
    N: Shell + 'static,
{
    pub(crate) fn new(backend: B, shell: N, settings: &Settings) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                backend,
                shell,
                state,
            }),
            debounce: Debouncer::new(),
            blur: Debouncer::new(),
            interval: settings.search_debounce(),
            grace: settings.blur_grace(),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    pub(crate) fn on_query_change(&mut self, text: &str) {
        self.debounce.cancel();
        let query = text.to_owned();
        let empty = query.trim().is_empty();

        self.inner.state.send_modify(|state| {
            state.query = query.clone();
            if empty {
                state.results.clear();
                state.panel_visible = false;
                state.pending = false;
            } else {
                state.pending = true;
            }
        });

        if !empty {
            let inner = Arc::clone(&self.inner);
            self.debounce
                .schedule(self.interval, async move { inner.run(query).await });
        }
    }

    pub(crate) fn on_focus(&mut self) {
        self.blur.cancel();
        self.inner.state.send_modify(|state| {
            if !state.query.trim().is_empty() {
                state.panel_visible = true;
            }
        });
    }

    /// Hides the panel once the grace period passes, leaving time for a click
    /// on a result to land first.
    pub(crate) fn on_blur(&mut self) {
        let inner = Arc::clone(&self.inner);
        self.blur.schedule(self.grace, async move {
            inner.state.send_modify(|state| state.panel_visible = false);
        });
    }

    /// Opens the result with `id` if it is currently on screen.
    pub(crate) fn select(&mut self, id: i64) -> bool {
        let on_screen = {
            let state = self.inner.state.borrow();
            state.panel_visible && state.results.iter().any(|hit| hit.id == id)
        };
        if !on_screen {
            debug!("Result {} is not on screen; ignoring selection", id);
            return false;
        }

        self.debounce.cancel();
        self.blur.cancel();
        self.inner.state.send_modify(|state| {
            state.query.clear();
            state.results.clear();
            state.panel_visible = false;
            state.pending = false;
        });
        self.inner.shell.navigate(Route::Post(id));
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::time;

    use super::*;
    use crate::testing::{hit, FakeBackend, RecordingShell};

    type Coordinator = SearchCoordinator<Arc<FakeBackend>, Arc<RecordingShell>>;

    fn coordinator(backend: FakeBackend) -> (Coordinator, Arc<FakeBackend>, Arc<RecordingShell>) {
        let backend = Arc::new(backend);
        let shell = Arc::new(RecordingShell::default());
        let settings = Settings::new("http://forum.test/api/".parse().unwrap());
        (
            SearchCoordinator::new(Arc::clone(&backend), Arc::clone(&shell), &settings),
            backend,
            shell,
        )
    }

    async fn settle() {
        time::sleep(Duration::from_millis(400)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bursts_collapse_into_one_search() {
        let (mut search, backend, _) = coordinator(FakeBackend::default());

        search.on_query_change("a");
        time::sleep(Duration::from_millis(100)).await;
        search.on_query_change("ab");
        time::sleep(Duration::from_millis(100)).await;
        search.on_query_change("abc");
        settle().await;

        assert_eq!(backend.queries(), vec!["abc".to_owned()]);
        let state = search.state();
        assert_eq!(state.results, vec![hit(1, "abc")]);
        assert!(state.panel_visible);
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_sent_before_the_quiet_interval() {
        let (mut search, backend, _) = coordinator(FakeBackend::default());

        search.on_query_change("exam");
        time::sleep(Duration::from_millis(299)).await;

        assert!(backend.queries().is_empty());
        assert!(search.state().pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_sends_nothing() {
        let (mut search, backend, _) = coordinator(FakeBackend::default());

        search.on_query_change("");
        settle().await;

        assert!(backend.queries().is_empty());
        assert_eq!(search.state(), SearchState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_cancels_pending_search_and_hides_results() {
        let (mut search, backend, _) = coordinator(FakeBackend::default());
        search.on_query_change("exam");
        settle().await;
        assert!(search.state().panel_visible);

        search.on_query_change("exams");
        search.on_query_change("");
        settle().await;

        assert_eq!(backend.queries(), vec!["exam".to_owned()]);
        let state = search.state();
        assert!(state.results.is_empty());
        assert!(!state.panel_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_clears_results() {
        let (mut search, backend, _) = coordinator(FakeBackend::default().failing_search());

        search.on_query_change("exam");
        settle().await;

        assert_eq!(backend.queries().len(), 1);
        let state = search.state();
        assert!(state.results.is_empty());
        assert!(!state.panel_visible);
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_within_blur_grace_still_navigates() {
        let (mut search, _, shell) = coordinator(FakeBackend::default());
        search.on_query_change("exam");
        settle().await;

        search.on_blur();
        assert!(search.select(1));

        assert_eq!(shell.routes(), vec![Route::Post(1)]);
        let state = search.state();
        assert!(state.query.is_empty());
        assert!(!state.panel_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_hides_after_blur_grace() {
        let (mut search, _, shell) = coordinator(FakeBackend::default());
        search.on_query_change("exam");
        settle().await;

        search.on_blur();
        time::sleep(Duration::from_millis(150)).await;
        assert!(search.state().panel_visible);
        time::sleep(Duration::from_millis(100)).await;
        assert!(!search.state().panel_visible);

        assert!(!search.select(1));
        assert!(shell.routes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_reveals_existing_query_and_cancels_blur() {
        let (mut search, _, _) = coordinator(FakeBackend::default());
        search.on_query_change("exam");
        settle().await;

        search.on_blur();
        time::sleep(Duration::from_millis(250)).await;
        assert!(!search.state().panel_visible);

        search.on_focus();
        assert!(search.state().panel_visible);

        search.on_blur();
        search.on_focus();
        time::sleep(Duration::from_millis(250)).await;
        assert!(search.state().panel_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_the_search_settle() {
        let (mut search, _, _) = coordinator(FakeBackend::default());
        let mut updates = search.subscribe();

        search.on_query_change("exam");
        let state = updates.wait_for(|state| !state.pending).await.unwrap().clone();

        assert_eq!(state.results, vec![hit(1, "exam")]);
    }
}
