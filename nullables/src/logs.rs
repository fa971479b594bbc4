//! Nullable log source: serve canned logs per event name and record queries.

use alloy_primitives::{B256, U256};
use async_trait::async_trait;
use ballot_chain::{ChainError, EventFilter, LogSource, RawLog};
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded `fetch_events` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogQuery {
    pub chain_id: u64,
    pub event_name: String,
    pub filter: EventFilter,
}

/// A log source backed by an in-memory map from event name to logs.
///
/// Like a node, it applies the proposal filter to the first indexed topic.
/// Names with no logs yield an empty result.
pub struct NullLogSource {
    logs: Mutex<HashMap<String, Vec<RawLog>>>,
    failure: Mutex<Option<ChainError>>,
    queries: Mutex<Vec<LogQuery>>,
}

impl NullLogSource {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_logs(self, event_name: &str, logs: Vec<RawLog>) -> Self {
        self.set_logs(event_name, logs);
        self
    }

    /// Replace the logs served for `event_name`.
    pub fn set_logs(&self, event_name: &str, logs: Vec<RawLog>) {
        self.logs
            .lock()
            .unwrap()
            .insert(event_name.to_string(), logs);
    }

    /// Make every subsequent query fail with `error`.
    pub fn fail_with(&self, error: ChainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// All queries received so far.
    pub fn queries(&self) -> Vec<LogQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for NullLogSource {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(log: &RawLog, filter: &EventFilter) -> bool {
    match filter.proposal_id {
        Some(id) => log.topics.get(1) == Some(&B256::from(U256::from(id))),
        None => true,
    }
}

#[async_trait]
impl LogSource for NullLogSource {
    async fn fetch_events(
        &self,
        chain_id: u64,
        event_name: &str,
        filter: &EventFilter,
    ) -> Result<Vec<RawLog>, ChainError> {
        self.queries.lock().unwrap().push(LogQuery {
            chain_id,
            event_name: event_name.to_string(),
            filter: filter.clone(),
        });
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .get(event_name)
            .map(|logs| {
                logs.iter()
                    .filter(|log| matches_filter(log, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
