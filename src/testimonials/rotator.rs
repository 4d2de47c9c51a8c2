//! Testimonial rotator: cyclic auto-advance with a permanent manual override.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::RotatorError;

/// Default time between automatic advances.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Carousel state: which testimonial is shown and whether it auto-advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestimonialRotator {
    active_index: usize,
    auto_advance: bool,
    #[serde(skip)]
    count: usize,
}

impl TestimonialRotator {
    pub fn new(count: usize) -> Result<Self, RotatorError> {
        if count == 0 {
            return Err(RotatorError::Empty);
        }
        Ok(Self {
            active_index: 0,
            auto_advance: true,
            count,
        })
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Timer transition. A no-op once auto-advance is off.
    /// Returns whether the index moved.
    pub fn tick(&mut self) -> bool {
        if !self.auto_advance {
            return false;
        }
        self.active_index = (self.active_index + 1) % self.count;
        true
    }

    /// Manual selection. Disables auto-advance for good.
    pub fn select(&mut self, index: usize) -> Result<(), RotatorError> {
        if index >= self.count {
            return Err(RotatorError::OutOfRange {
                index,
                count: self.count,
            });
        }
        self.active_index = index;
        self.auto_advance = false;
        Ok(())
    }
}

/// A rotator shared between the routes and its ticker.
///
/// At most one ticker may drive it at a time.
#[derive(Debug)]
pub struct SharedRotator {
    state: RwLock<TestimonialRotator>,
    ticker_claimed: AtomicBool,
}

impl SharedRotator {
    pub fn new(rotator: TestimonialRotator) -> Self {
        Self {
            state: RwLock::new(rotator),
            ticker_claimed: AtomicBool::new(false),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, TestimonialRotator> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, TestimonialRotator> {
        self.state.write().await
    }

    /// Whether a `RotationTicker` currently holds this rotator.
    pub fn has_ticker(&self) -> bool {
        self.ticker_claimed.load(Ordering::Acquire)
    }
}

/// Owns the background ticker task. Dropping it stops the task and frees
/// the rotator for a new ticker.
pub struct RotationTicker {
    handle: JoinHandle<()>,
    rotator: Arc<SharedRotator>,
}

impl RotationTicker {
    /// Whether the ticker task has exited (auto-advance turned off).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RotationTicker {
    fn drop(&mut self) {
        self.handle.abort();
        self.rotator.ticker_claimed.store(false, Ordering::Release);
    }
}

/// Spawn the ticker driving `rotator` every `interval`.
///
/// Fails with `RotatorError::TickerRunning` while another `RotationTicker`
/// for the same rotator is alive. The task exits on its own after a tick
/// finds auto-advance disabled.
pub fn spawn_rotation_ticker(
    rotator: Arc<SharedRotator>,
    interval: Duration,
) -> Result<RotationTicker, RotatorError> {
    if rotator.ticker_claimed.swap(true, Ordering::AcqRel) {
        return Err(RotatorError::TickerRunning);
    }

    let shared = Arc::clone(&rotator);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut state = shared.write().await;
            if !state.tick() {
                info!("Testimonial auto-advance disabled, stopping ticker");
                break;
            }
            debug!(active_index = state.active_index(), "Testimonial advanced");
        }
    });
    Ok(RotationTicker { handle, rotator })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_with_auto_advance() {
        let r = TestimonialRotator::new(5).unwrap();
        assert_eq!(r.active_index(), 0);
        assert!(r.auto_advance());
    }

    #[test]
    fn empty_list_rejected() {
        assert_eq!(TestimonialRotator::new(0), Err(RotatorError::Empty));
    }

    #[test]
    fn tick_wraps_around() {
        let mut r = TestimonialRotator::new(3).unwrap();
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                r.tick();
                r.active_index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn select_disables_auto_advance_for_good() {
        let mut r = TestimonialRotator::new(5).unwrap();
        r.tick();
        r.select(2).unwrap();
        assert_eq!(r.active_index(), 2);
        assert!(!r.auto_advance());

        for _ in 0..10 {
            assert!(!r.tick());
        }
        assert_eq!(r.active_index(), 2);

        r.select(4).unwrap();
        assert_eq!(r.active_index(), 4);
        assert!(!r.auto_advance());
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut r = TestimonialRotator::new(5).unwrap();
        assert_eq!(
            r.select(5),
            Err(RotatorError::OutOfRange { index: 5, count: 5 })
        );
        assert_eq!(r.active_index(), 0);
        assert!(r.auto_advance());
    }

    #[test]
    fn serializes_state_only() {
        let r = TestimonialRotator::new(5).unwrap();
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"active_index": 0, "auto_advance": true})
        );
    }

    fn shared(count: usize) -> Arc<SharedRotator> {
        Arc::new(SharedRotator::new(TestimonialRotator::new(count).unwrap()))
    }

    /// Let the ticker task observe the advanced clock.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_advances_until_selected() {
        let rotator = shared(5);
        let ticker = spawn_rotation_ticker(Arc::clone(&rotator), Duration::from_secs(5)).unwrap();
        settle().await;

        for expected in [1, 2, 3] {
            tokio::time::advance(Duration::from_secs(5)).await;
            settle().await;
            assert_eq!(rotator.read().await.active_index(), expected);
        }

        rotator.write().await.select(1).unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert!(ticker.is_finished());

        tokio::time::advance(Duration::from_secs(20)).await;
        settle().await;
        assert_eq!(rotator.read().await.active_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_ticker_stops_rotation() {
        let rotator = shared(5);
        let ticker = spawn_rotation_ticker(Arc::clone(&rotator), Duration::from_secs(5)).unwrap();
        settle().await;
        drop(ticker);

        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(rotator.read().await.active_index(), 0);
    }

    #[tokio::test]
    async fn only_one_ticker_per_rotator() {
        let rotator = shared(5);
        let first = spawn_rotation_ticker(Arc::clone(&rotator), Duration::from_secs(5)).unwrap();
        assert!(rotator.has_ticker());

        let second = spawn_rotation_ticker(Arc::clone(&rotator), Duration::from_secs(5));
        assert!(matches!(second, Err(RotatorError::TickerRunning)));

        drop(first);
        assert!(!rotator.has_ticker());
        let _again = spawn_rotation_ticker(Arc::clone(&rotator), Duration::from_secs(5)).unwrap();
        assert!(rotator.has_ticker());
    }
}
