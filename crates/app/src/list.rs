//! Loading/refreshing/data/error state of one screen-owned collection.
//!
//! A screen owns one [`ListStateMachine`] and drives it with `load` (on
//! mount and on every focus), `refresh` (pull-to-refresh) and
//! `reload_after_mutation`. Every call refetches the whole collection;
//! local state is never patched in place.
//!
//! Overlapping loads are allowed and are not cancelled. With the default
//! [`StalePolicy::LastWriteWins`] whichever response arrives last is kept,
//! even if it belongs to the older request. [`StalePolicy::DiscardSuperseded`]
//! tags each load with a generation and drops responses from loads that a
//! newer one has superseded.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use roster_client::ClientError;

/// Lifecycle phase of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Refreshing,
    Loaded,
    Failed,
}

/// What happens to a response whose load has been superseded by a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Apply it anyway; the last response to arrive wins.
    #[default]
    LastWriteWins,
    /// Drop it; only the newest load may change the state.
    DiscardSuperseded,
}

/// Whether a completed load changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Superseded,
}

#[derive(Debug, Default)]
struct Inner<C> {
    phase: ListPhase,
    items: C,
    last_error: Option<String>,
    refreshing: bool,
    /// Generation of the most recently started load.
    issued: u64,
}

pub struct ListStateMachine<C> {
    name: &'static str,
    policy: StalePolicy,
    inner: Mutex<Inner<C>>,
}

impl<C: Default> ListStateMachine<C> {
    /// * `name` - label used in log lines, e.g. `"tasks"`.
    pub fn new(name: &'static str) -> Self {
        Self::with_policy(name, StalePolicy::default())
    }

    pub fn with_policy(name: &'static str, policy: StalePolicy) -> Self {
        Self {
            name,
            policy,
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl<C> ListStateMachine<C> {
    fn lock(&self) -> MutexGuard<'_, Inner<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn phase(&self) -> ListPhase {
        self.lock().phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Borrow the current collection for the duration of `f`.
    pub fn with_items<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.lock().items)
    }

    pub fn items(&self) -> C
    where
        C: Clone,
    {
        self.lock().items.clone()
    }

    /// Fetch the collection and store it.
    ///
    /// On failure the error is logged, the phase becomes `Failed` and the
    /// previous items stay in place. Returns `Superseded` when the response
    /// was dropped under [`StalePolicy::DiscardSuperseded`].
    pub async fn load<F, Fut>(&self, fetch: F) -> Result<LoadOutcome, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ClientError>>,
    {
        self.run(ListPhase::Loading, fetch).await
    }

    /// Pull-to-refresh: same as [`load`](Self::load) but raises the
    /// refreshing flag, which is lowered again whatever the outcome.
    pub async fn refresh<F, Fut>(&self, fetch: F) -> Result<LoadOutcome, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ClientError>>,
    {
        self.lock().refreshing = true;
        let result = self.run(ListPhase::Refreshing, fetch).await;
        self.lock().refreshing = false;
        result
    }

    /// Resynchronize after a create, update, delete or completion by
    /// refetching everything.
    pub async fn reload_after_mutation<F, Fut>(&self, fetch: F) -> Result<LoadOutcome, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ClientError>>,
    {
        self.load(fetch).await
    }

    async fn run<F, Fut>(&self, phase: ListPhase, fetch: F) -> Result<LoadOutcome, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ClientError>>,
    {
        let generation = {
            let mut inner = self.lock();
            inner.issued += 1;
            inner.phase = phase;
            inner.issued
        };

        let result = fetch().await;

        let mut inner = self.lock();
        if self.policy == StalePolicy::DiscardSuperseded && generation != inner.issued {
            tracing::debug!(
                list = self.name,
                generation,
                latest = inner.issued,
                "Dropping superseded response"
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(items) => {
                inner.items = items;
                inner.phase = ListPhase::Loaded;
                inner.last_error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                tracing::error!(list = self.name, error = %e, "Failed to load list");
                inner.phase = ListPhase::Failed;
                inner.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use tokio::sync::oneshot;

    fn offline() -> ClientError {
        ClientError::Unreachable("connection refused".into())
    }

    #[tokio::test]
    async fn starts_idle_and_loads() {
        let list = ListStateMachine::<Vec<i32>>::new("numbers");
        assert_eq!(list.phase(), ListPhase::Idle);

        let outcome = list.load(|| async { Ok(vec![1, 2, 3]) }).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(list.phase(), ListPhase::Loaded);
        assert_eq!(list.items(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn failure_keeps_previous_items() {
        let list = ListStateMachine::<Vec<i32>>::new("numbers");
        list.load(|| async { Ok(vec![1]) }).await.unwrap();

        let result = list.load(|| async { Err(offline()) }).await;

        assert_matches!(result, Err(ClientError::Unreachable(_)));
        assert_eq!(list.phase(), ListPhase::Failed);
        assert_eq!(list.items(), vec![1]);
        assert!(list.last_error().is_some());

        list.load(|| async { Ok(vec![2]) }).await.unwrap();
        assert_eq!(list.last_error(), None);
    }

    #[tokio::test]
    async fn refresh_flag_is_lowered_on_failure() {
        let list = ListStateMachine::<Vec<i32>>::new("numbers");
        let (tx, rx) = oneshot::channel::<Result<Vec<i32>, ClientError>>();

        let refresh = list.refresh(|| async move { rx.await.unwrap_or_else(|_| Err(offline())) });
        let observe = async {
            tokio::task::yield_now().await;
            assert!(list.is_refreshing());
            assert_eq!(list.phase(), ListPhase::Refreshing);
            let _ = tx.send(Err(offline()));
        };
        let (result, ()) = tokio::join!(refresh, observe);

        assert!(result.is_err());
        assert!(!list.is_refreshing());
        assert_eq!(list.phase(), ListPhase::Failed);
    }

    #[tokio::test]
    async fn reload_after_mutation_refetches() {
        let list = ListStateMachine::<Vec<i32>>::new("numbers");
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(vec![n as i32])
        };

        list.load(fetch).await.unwrap();
        list.reload_after_mutation(fetch).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(list.items(), vec![2]);
    }

    /// Start an older and a newer load, let the newer one finish first,
    /// then release the older one. Returns the outcome of the older load.
    async fn older_response_arrives_last(list: &ListStateMachine<Vec<i32>>) -> LoadOutcome {
        let (old_tx, old_rx) = oneshot::channel::<Vec<i32>>();
        let (new_tx, new_rx) = oneshot::channel::<Vec<i32>>();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        let older = list.load(|| async move { old_rx.await.map_err(|_| offline()) });
        let newer = async {
            let outcome = list
                .load(|| async move { new_rx.await.map_err(|_| offline()) })
                .await;
            let _ = done_tx.send(());
            outcome
        };
        let driver = async move {
            let _ = new_tx.send(vec![2]);
            let _ = done_rx.await;
            let _ = old_tx.send(vec![1]);
        };

        let (older, newer, ()) = tokio::join!(older, newer, driver);
        assert_eq!(newer.unwrap(), LoadOutcome::Applied);
        older.unwrap()
    }

    #[tokio::test]
    async fn last_write_wins_by_default() {
        let list = ListStateMachine::<Vec<i32>>::new("numbers");

        let outcome = older_response_arrives_last(&list).await;

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(list.items(), vec![1]);
    }

    #[tokio::test]
    async fn discard_superseded_keeps_newest() {
        let list = ListStateMachine::<Vec<i32>>::with_policy("numbers", StalePolicy::DiscardSuperseded);

        let outcome = older_response_arrives_last(&list).await;

        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(list.items(), vec![2]);
        assert_eq!(list.phase(), ListPhase::Loaded);
    }
}
