use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Requests per minute allowed against each upstream provider.
pub const MAPBOX_PER_MINUTE: u32 = 300;
pub const OPEN_CHARGE_MAP_PER_MINUTE: u32 = 60;
pub const TOMTOM_PER_MINUTE: u32 = 120;

pub fn per_minute_limiter(per_minute: u32) -> Limiter {
    let quota = Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Serializes calls to one provider: at most one request in flight, and
/// no more than the provider's quota per minute.
#[derive(Clone)]
pub struct ProviderGate {
    name: &'static str,
    turn: Arc<Mutex<()>>,
    limiter: Limiter,
}

impl ProviderGate {
    pub fn new(name: &'static str, per_minute: u32) -> Self {
        Self {
            name,
            turn: Arc::new(Mutex::new(())),
            limiter: per_minute_limiter(per_minute),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Waits for this provider's turn. The call slot is released when the
    /// returned guard drops.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        let guard = self.turn.lock().await;
        if self.limiter.check().is_err() {
            log::debug!("[{}] waiting for rate limiter", self.name);
            self.limiter.until_ready().await;
        }
        guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn gate_allows_one_caller_at_a_time() {
        let gate = ProviderGate::new("test", 600);
        let first = gate.enter().await;

        let other = gate.clone();
        let waiter = tokio::spawn(async move {
            let _slot = other.enter().await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("second caller should get its turn")
            .expect("task should not panic");
    }
}
