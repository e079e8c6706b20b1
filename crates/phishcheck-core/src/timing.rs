//! Minimum display duration for the loading state.

use std::time::Duration;
use tokio::time::Instant;

/// Sleeps until `floor` has elapsed since `start`. Returns how long it slept;
/// zero when the floor was already reached.
pub async fn ensure_minimum_duration(start: Instant, floor: Duration) -> Duration {
    let remaining = floor.saturating_sub(start.elapsed());
    if remaining.is_zero() {
        return Duration::ZERO;
    }
    tokio::time::sleep(remaining).await;
    remaining
}
