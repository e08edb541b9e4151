use std::sync::Arc;

use poem_openapi::{Object, OpenApi, payload::Json};

use persistence::resilience::{CircuitState, ResilientFranchiseGateway};

use crate::api::tags::ApiTags;

#[derive(Debug, Clone, Object)]
pub struct CircuitBreakerStateResponse {
    /// CLOSED, OPEN or HALF_OPEN
    pub state: String,
    pub description: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CircuitBreakerMetricsResponse {
    pub state: String,
    /// Percentage of failed calls in the window, absent until enough calls were recorded
    pub failure_rate: Option<f32>,
    pub buffered_calls: u64,
    pub failed_calls: u64,
    pub successful_calls: u64,
}

/// Monitoring of the storage circuit breaker
pub struct ResilienceApi {
    gateway: Arc<ResilientFranchiseGateway>,
}

impl ResilienceApi {
    pub fn new(gateway: Arc<ResilientFranchiseGateway>) -> Self {
        Self { gateway }
    }
}

fn describe(state: CircuitState) -> &'static str {
    match state {
        CircuitState::Closed => "storage calls are processed normally",
        CircuitState::Open => "storage calls are rejected until the open-state wait elapses",
        CircuitState::HalfOpen => "a trial call decides whether the circuit closes again",
    }
}

#[OpenApi(prefix_path = "/api")]
impl ResilienceApi {
    /// Circuit breaker state
    #[oai(path = "/resilience/circuit-breaker", method = "get", tag = "ApiTags::Monitoring")]
    async fn circuit_breaker_state(&self) -> Json<CircuitBreakerStateResponse> {
        let state = self.gateway.circuit_state();
        Json(CircuitBreakerStateResponse {
            state: state.to_string(),
            description: describe(state).to_string(),
        })
    }

    /// Circuit breaker window metrics
    #[oai(
        path = "/resilience/circuit-breaker/metrics",
        method = "get",
        tag = "ApiTags::Monitoring"
    )]
    async fn circuit_breaker_metrics(&self) -> Json<CircuitBreakerMetricsResponse> {
        let metrics = self.gateway.circuit_metrics();
        Json(CircuitBreakerMetricsResponse {
            state: metrics.state.to_string(),
            failure_rate: metrics.failure_rate,
            buffered_calls: metrics.buffered_calls as u64,
            failed_calls: metrics.failed_calls as u64,
            successful_calls: (metrics.buffered_calls - metrics.failed_calls) as u64,
        })
    }
}
