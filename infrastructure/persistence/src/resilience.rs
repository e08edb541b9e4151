//! Circuit breaker, timeout and retry around any `FranchiseGateway`.
//!
//! Only infrastructure faults (`RepositoryError::is_transient`) count against the breaker and
//! trigger retries. Reads are retried; writes are not, since a write that timed out may
//! already have been applied.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use parking_lot::Mutex;
use tokio::time::Instant;

use business::domain::errors::RepositoryError;
use business::domain::franchise::gateway::FranchiseGateway;
use business::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};

#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    /// Failure percentage (0-100) over the sliding window that opens the circuit.
    pub failure_rate_threshold: f32,
    pub sliding_window_size: usize,
    /// Calls recorded before the failure rate is evaluated.
    pub minimum_calls: usize,
    pub wait_in_open_state: Duration,
    /// Total attempts for a read, first call included.
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub timeout: Duration,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50.0,
            sliding_window_size: 10,
            minimum_calls: 5,
            wait_in_open_state: Duration::from_secs(10),
            max_attempts: 3,
            retry_backoff: Duration::from_millis(100),
            timeout: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "CLOSED"),
            CircuitState::Open => write!(f, "OPEN"),
            CircuitState::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// Snapshot of the breaker for monitoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitMetrics {
    pub state: CircuitState,
    /// `None` until the window holds the minimum number of calls.
    pub failure_rate: Option<f32>,
    pub buffered_calls: usize,
    pub failed_calls: usize,
}

struct BreakerState {
    state: CircuitState,
    /// `true` marks a failed call. Newest at the back.
    outcomes: VecDeque<bool>,
    opened_at: Option<Instant>,
    /// Start of the half-open trial. A trial older than the call timeout was cancelled.
    trial_started: Option<Instant>,
}

/// Count-based circuit breaker.
pub struct CircuitBreaker {
    config: ResilienceConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(config: ResilienceConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                outcomes: VecDeque::new(),
                opened_at: None,
                trial_started: None,
            }),
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    pub fn metrics(&self) -> CircuitMetrics {
        let inner = self.inner.lock();
        let buffered_calls = inner.outcomes.len();
        let failed_calls = inner.outcomes.iter().filter(|f| **f).count();
        let failure_rate = (buffered_calls >= self.config.minimum_calls && buffered_calls > 0)
            .then(|| failed_calls as f32 * 100.0 / buffered_calls as f32);
        CircuitMetrics {
            state: inner.state,
            failure_rate,
            buffered_calls,
            failed_calls,
        }
    }

    /// Fails fast with `Unavailable` while open; lets a single trial call through once the
    /// open-state wait has elapsed.
    fn acquire(&self, operation: &str) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open => {
                let waited = inner
                    .opened_at
                    .is_some_and(|at| at.elapsed() >= self.config.wait_in_open_state);
                if !waited {
                    tracing::warn!(operation, "storage circuit is open, rejecting call");
                    return Err(RepositoryError::Unavailable);
                }
                tracing::info!(operation, "storage circuit half-open, allowing trial call");
                inner.state = CircuitState::HalfOpen;
                inner.trial_started = Some(Instant::now());
                Ok(())
            }
            CircuitState::HalfOpen => {
                let in_flight = inner
                    .trial_started
                    .is_some_and(|at| at.elapsed() < self.config.timeout);
                if in_flight {
                    tracing::warn!(operation, "storage circuit trial in flight, rejecting call");
                    return Err(RepositoryError::Unavailable);
                }
                inner.trial_started = Some(Instant::now());
                Ok(())
            }
        }
    }

    /// Records an outcome and returns the state it leaves the breaker in.
    fn record(&self, failed: bool) -> CircuitState {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::HalfOpen => {
                inner.trial_started = None;
                if failed {
                    tracing::warn!("storage circuit trial failed, reopening");
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                } else {
                    tracing::info!("storage circuit closed");
                    inner.state = CircuitState::Closed;
                    inner.outcomes.clear();
                    inner.opened_at = None;
                }
            }
            CircuitState::Closed => {
                inner.outcomes.push_back(failed);
                while inner.outcomes.len() > self.config.sliding_window_size {
                    inner.outcomes.pop_front();
                }
                if inner.outcomes.len() < self.config.minimum_calls {
                    return inner.state;
                }
                let failures = inner.outcomes.iter().filter(|f| **f).count();
                let rate = failures as f32 * 100.0 / inner.outcomes.len() as f32;
                if rate >= self.config.failure_rate_threshold {
                    tracing::error!(failure_rate = rate, "storage circuit opened");
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    inner.outcomes.clear();
                }
            }
            CircuitState::Open => {}
        }
        inner.state
    }
}

/// Decorator applying the resilience policy to every call of the wrapped gateway.
pub struct ResilientFranchiseGateway {
    inner: Arc<dyn FranchiseGateway>,
    breaker: CircuitBreaker,
    config: ResilienceConfig,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Retry {
    Enabled,
    Disabled,
}

impl ResilientFranchiseGateway {
    pub fn new(inner: Arc<dyn FranchiseGateway>, config: ResilienceConfig) -> Self {
        Self {
            inner,
            breaker: CircuitBreaker::new(config.clone()),
            config,
        }
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    pub fn circuit_metrics(&self) -> CircuitMetrics {
        self.breaker.metrics()
    }

    async fn call<T, F, Fut>(
        &self,
        operation: &'static str,
        retry: Retry,
        call: F,
    ) -> Result<T, RepositoryError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        let attempts = match retry {
            Retry::Enabled => self.config.max_attempts.max(1),
            Retry::Disabled => 1,
        };

        let mut attempt = 1;
        loop {
            self.breaker.acquire(operation)?;

            let outcome = tokio::time::timeout(self.config.timeout, call())
                .await
                .unwrap_or(Err(RepositoryError::Timeout));

            match outcome {
                Err(error) if error.is_transient() => {
                    let state = self.breaker.record(true);
                    if attempt >= attempts || state != CircuitState::Closed {
                        tracing::error!(operation, attempt, %error, %state, "storage call failed");
                        return Err(error);
                    }
                    tracing::warn!(operation, attempt, %error, "storage call failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff).await;
                    attempt += 1;
                }
                other => {
                    self.breaker.record(false);
                    return other;
                }
            }
        }
    }
}

#[async_trait]
impl FranchiseGateway for ResilientFranchiseGateway {
    async fn save_new(&self, franchise: &Franchise) -> Result<Franchise, RepositoryError> {
        self.call("save_new", Retry::Disabled, || self.inner.save_new(franchise))
            .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Franchise>, RepositoryError> {
        self.call("find_by_name", Retry::Enabled, || self.inner.find_by_name(name))
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, RepositoryError> {
        self.call("find_by_id", Retry::Enabled, || self.inner.find_by_id(id))
            .await
    }

    async fn append_branch(
        &self,
        franchise_id: &str,
        branch: &Branch,
    ) -> Result<Franchise, RepositoryError> {
        self.call("append_branch", Retry::Disabled, || {
            self.inner.append_branch(franchise_id, branch)
        })
        .await
    }

    async fn append_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product: &Product,
    ) -> Result<Franchise, RepositoryError> {
        self.call("append_product", Retry::Disabled, || {
            self.inner.append_product(franchise_id, branch_id, product)
        })
        .await
    }

    async fn remove_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.call("remove_product", Retry::Disabled, || {
            self.inner.remove_product(franchise_id, branch_id, product_id)
        })
        .await
    }

    async fn set_product_stock(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: i32,
    ) -> Result<Franchise, RepositoryError> {
        self.call("set_product_stock", Retry::Disabled, || {
            self.inner
                .set_product_stock(franchise_id, branch_id, product_id, stock)
        })
        .await
    }

    async fn rename_franchise(
        &self,
        franchise_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.call("rename_franchise", Retry::Disabled, || {
            self.inner.rename_franchise(franchise_id, new_name)
        })
        .await
    }

    async fn rename_branch(
        &self,
        franchise_id: &str,
        branch_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.call("rename_branch", Retry::Disabled, || {
            self.inner.rename_branch(franchise_id, branch_id, new_name)
        })
        .await
    }

    async fn rename_product(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        new_name: &str,
    ) -> Result<Franchise, RepositoryError> {
        self.call("rename_product", Retry::Disabled, || {
            self.inner
                .rename_product(franchise_id, branch_id, product_id, new_name)
        })
        .await
    }

    async fn stream_max_stock_per_branch(
        &self,
        franchise_id: &str,
    ) -> Result<BoxStream<'static, BranchProductResult>, RepositoryError> {
        self.call("stream_max_stock_per_branch", Retry::Enabled, || {
            self.inner.stream_max_stock_per_branch(franchise_id)
        })
        .await
    }
}
