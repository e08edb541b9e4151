use std::env;
use std::str::FromStr;
use std::time::Duration;

use persistence::resilience::ResilienceConfig;

/// Load the storage resilience policy from environment variables
///
/// Environment variables (unset or unparsable values fall back to the default):
/// - RESILIENCE_FAILURE_RATE_THRESHOLD: percent of failed calls that opens the circuit (50)
/// - RESILIENCE_SLIDING_WINDOW_SIZE: calls kept in the window (10)
/// - RESILIENCE_MINIMUM_CALLS: calls before the rate is evaluated (5)
/// - RESILIENCE_OPEN_STATE_WAIT_MS: time spent open before a trial call (10000)
/// - RESILIENCE_MAX_ATTEMPTS: attempts for read operations (3)
/// - RESILIENCE_RETRY_BACKOFF_MS: pause between read attempts (100)
/// - RESILIENCE_TIMEOUT_MS: per-call timeout (2000)
///
/// The combined settings are then checked by `reconcile`.
pub fn from_env() -> ResilienceConfig {
    let defaults = ResilienceConfig::default();
    reconcile(ResilienceConfig {
        failure_rate_threshold: var_or(
            "RESILIENCE_FAILURE_RATE_THRESHOLD",
            defaults.failure_rate_threshold,
        ),
        sliding_window_size: var_or("RESILIENCE_SLIDING_WINDOW_SIZE", defaults.sliding_window_size),
        minimum_calls: var_or("RESILIENCE_MINIMUM_CALLS", defaults.minimum_calls),
        wait_in_open_state: millis_or("RESILIENCE_OPEN_STATE_WAIT_MS", defaults.wait_in_open_state),
        max_attempts: var_or("RESILIENCE_MAX_ATTEMPTS", defaults.max_attempts),
        retry_backoff: millis_or("RESILIENCE_RETRY_BACKOFF_MS", defaults.retry_backoff),
        timeout: millis_or("RESILIENCE_TIMEOUT_MS", defaults.timeout),
    })
}

/// Clamps settings that would keep the breaker from ever opening or fail every call.
fn reconcile(mut config: ResilienceConfig) -> ResilienceConfig {
    let defaults = ResilienceConfig::default();
    if config.sliding_window_size == 0 {
        tracing::warn!(
            default = defaults.sliding_window_size,
            "RESILIENCE_SLIDING_WINDOW_SIZE is zero, using default"
        );
        config.sliding_window_size = defaults.sliding_window_size;
    }
    if config.minimum_calls > config.sliding_window_size {
        tracing::warn!(
            minimum_calls = config.minimum_calls,
            sliding_window_size = config.sliding_window_size,
            "RESILIENCE_MINIMUM_CALLS exceeds the window, clamping to the window size"
        );
        config.minimum_calls = config.sliding_window_size;
    }
    if config.timeout.is_zero() {
        tracing::warn!(
            default_ms = defaults.timeout.as_millis() as u64,
            "RESILIENCE_TIMEOUT_MS is zero, every call would time out; using default"
        );
        config.timeout = defaults.timeout;
    }
    config
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok().as_deref(), default)
}

fn millis_or(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    match raw.map(|value| value.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!(value = raw, "ignoring unparsable resilience setting");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_present_values() {
        assert_eq!(parse_or(Some(" 7 "), 3u32), 7);
        assert_eq!(parse_or(Some("75.5"), 50.0f32), 75.5);
    }

    #[test]
    fn should_clamp_minimum_calls_to_window() {
        let config = reconcile(ResilienceConfig {
            sliding_window_size: 4,
            minimum_calls: 20,
            ..ResilienceConfig::default()
        });

        assert_eq!(config.minimum_calls, 4);
        assert_eq!(config.sliding_window_size, 4);
    }

    #[test]
    fn should_replace_zero_timeout_and_window() {
        let config = reconcile(ResilienceConfig {
            sliding_window_size: 0,
            timeout: Duration::ZERO,
            ..ResilienceConfig::default()
        });

        assert_eq!(config.sliding_window_size, 10);
        assert_eq!(config.minimum_calls, 5);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn should_keep_consistent_settings() {
        let config = reconcile(ResilienceConfig::default());

        assert_eq!(config.minimum_calls, 5);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn should_fall_back_to_default() {
        assert_eq!(parse_or(None, 10usize), 10);
        assert_eq!(parse_or(Some("ten"), 10usize), 10);
    }
}
