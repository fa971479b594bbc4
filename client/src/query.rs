//! Query lifecycle for presentation layers.
//!
//! A governance query is either still loading, failed with a message, or
//! ready with a value. Derived values are only computed once every input is
//! ready; a missing input is never replaced by zero.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use alloy_primitives::U256;
use ballot_governance::QuorumCalculator;
use ballot_types::{Decimal, ParticipationParameters, ProposalRef};
use tokio::sync::watch;
use tokio::task::AbortHandle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Loading => QueryState::Loading,
            Self::Failed(message) => QueryState::Failed(message),
            Self::Ready(value) => QueryState::Ready(f(value)),
        }
    }

    /// Combine two states. A failure wins over loading.
    pub fn zip<U>(self, other: QueryState<U>) -> QueryState<(T, U)> {
        match (self, other) {
            (Self::Failed(message), _) | (_, QueryState::Failed(message)) => {
                QueryState::Failed(message)
            }
            (Self::Ready(a), QueryState::Ready(b)) => QueryState::Ready((a, b)),
            _ => QueryState::Loading,
        }
    }
}

/// Quorum for `proposal`, available only once both inputs are.
pub fn quorum_state(
    calculator: &QuorumCalculator,
    params: &QueryState<ParticipationParameters>,
    thresholds: &QueryState<Vec<Decimal>>,
    proposal: &ProposalRef,
) -> QueryState<U256> {
    match params.clone().zip(thresholds.clone()) {
        QueryState::Ready((params, thresholds)) => QueryState::from_result(
            calculator.compute_quorum(proposal, &params, &thresholds),
        ),
        QueryState::Failed(message) => QueryState::Failed(message),
        QueryState::Loading => QueryState::Loading,
    }
}

/// A query running on the tokio runtime, observable through its state.
pub struct QueryHandle<T> {
    state: Arc<watch::Sender<QueryState<T>>>,
    abort: AbortHandle,
}

impl<T> QueryHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn `query`; the handle starts in [`QueryState::Loading`].
    pub fn spawn<F, E>(query: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (tx, _rx) = watch::channel(QueryState::Loading);
        let state = Arc::new(tx);
        let task = tokio::spawn(async move { QueryState::from_result(query.await) });
        let abort = task.abort_handle();

        let publisher = Arc::clone(&state);
        tokio::spawn(async move {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => QueryState::Failed("cancelled".into()),
                Err(e) => QueryState::Failed(format!("query task failed: {e}")),
            };
            settle(&publisher, outcome);
        });

        Self { state, abort }
    }

    /// Current state.
    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    /// Wait until the query is no longer loading.
    pub async fn settled(&self) -> QueryState<T> {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => QueryState::Failed("query dropped".into()),
        };
        settled
    }

    /// Abort the query. A query that already settled keeps its result.
    pub fn cancel(&self) {
        self.abort.abort();
        settle(&self.state, QueryState::Failed("cancelled".into()));
    }
}

/// Publish `outcome` unless the state already settled.
fn settle<T>(state: &watch::Sender<QueryState<T>>, outcome: QueryState<T>) {
    let mut outcome = Some(outcome);
    state.send_if_modified(|current| {
        if !current.is_loading() {
            return false;
        }
        if let Some(outcome) = outcome.take() {
            *current = outcome;
        }
        true
    });
}
