//! Publishes detail-view state to consumers as fetch cycles start and settle.
//!
//! Consumers subscribe to a `watch` channel of [`DetailState`]. Starting a
//! load for a new ticker cancels the previous cycle first; a cancelled cycle
//! never publishes, so the last ticker requested always wins.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::aggregator::{total_failure, DetailAggregator};
use crate::config::DetailConfig;
use crate::model::AggregationResult;

/// What the detail view should currently render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    /// Ticker of the most recent load request.
    pub ticker: Option<String>,
    pub loading: bool,
    /// Snapshot for `ticker`, replaced wholesale on each completed cycle.
    pub result: Option<Arc<AggregationResult>>,
}

impl DetailState {
    /// Advisory message attached to the current result, if any.
    pub fn notice(&self) -> Option<&str> {
        self.result.as_ref()?.notice.as_deref()
    }
}

struct Cycle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives fetch cycles for the detail view and publishes their results.
///
/// `load` and `close` must be called from within a tokio runtime.
pub struct DetailLoader {
    aggregator: Arc<DetailAggregator>,
    credential: Option<String>,
    state: Arc<watch::Sender<DetailState>>,
    current: Mutex<Option<Cycle>>,
}

impl DetailLoader {
    pub fn new(config: &DetailConfig) -> Self {
        Self::with_aggregator(
            DetailAggregator::with_base_url(&config.base_url),
            config.api_key.clone(),
        )
    }

    pub fn with_aggregator(aggregator: DetailAggregator, credential: Option<String>) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            aggregator: Arc::new(aggregator),
            credential,
            state: Arc::new(state),
            current: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// A copy of the latest published state.
    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Starts a fetch cycle for `ticker`, cancelling any cycle in flight.
    ///
    /// Publishes a loading state immediately, then the result once every
    /// query has settled.
    pub fn load(&self, ticker: &str) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = current.take() {
            previous.cancel.cancel();
        }

        // The old token is cancelled before this write, so the stale cycle's
        // guarded publish can no longer succeed.
        self.state.send_replace(DetailState {
            ticker: Some(ticker.to_string()),
            loading: true,
            result: None,
        });

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_cycle(
            Arc::clone(&self.aggregator),
            ticker.to_string(),
            self.credential.clone(),
            cancel.clone(),
            Arc::clone(&self.state),
        ));
        *current = Some(Cycle { cancel, handle });
    }

    /// Cancels the cycle in flight, if any, without publishing anything.
    pub fn close(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cycle) = current.take() {
            cycle.cancel.cancel();
            cycle.handle.abort();
        }
    }
}

impl Drop for DetailLoader {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_cycle(
    aggregator: Arc<DetailAggregator>,
    ticker: String,
    credential: Option<String>,
    cancel: CancellationToken,
    state: Arc<watch::Sender<DetailState>>,
) {
    let cycle = {
        let ticker = ticker.clone();
        let cancel = cancel.clone();
        async move {
            aggregator
                .aggregate(&ticker, credential.as_deref(), &cancel)
                .await
        }
    };
    settle_cycle(ticker, cancel, state, cycle).await;
}

/// Drives `cycle` to completion and publishes its outcome.
///
/// The cycle runs as its own task so that a panic inside it is contained and
/// published as a total failure.
async fn settle_cycle<F>(
    ticker: String,
    cancel: CancellationToken,
    state: Arc<watch::Sender<DetailState>>,
    cycle: F,
) where
    F: Future<Output = Option<AggregationResult>> + Send + 'static,
{
    let result = match tokio::spawn(cycle).await {
        Ok(Some(result)) => result,
        Ok(None) => return,
        Err(_) if cancel.is_cancelled() => return,
        Err(e) => {
            tracing::error!(ticker = %ticker, "detail fetch cycle failed: {}", e);
            total_failure(&ticker)
        }
    };

    if !publish(&state, &cancel, result) {
        tracing::debug!(ticker = %ticker, "dropping result of superseded cycle");
    }
}

/// Installs `result` unless `cancel` has fired. The check runs under the
/// channel's write lock.
fn publish(
    state: &watch::Sender<DetailState>,
    cancel: &CancellationToken,
    result: AggregationResult,
) -> bool {
    state.send_if_modified(|current| {
        if cancel.is_cancelled() {
            return false;
        }
        current.loading = false;
        current.result = Some(Arc::new(result));
        true
    })
}
