//! Environment abstraction for deterministic testing.
//!
//! Decouples protocol logic from system resources (wall-clock time, entropy,
//! timers). Production code uses [`SystemEnv`]; tests use [`FixedEnv`] with a
//! seeded RNG and a frozen clock so identifier generation, expiry stamping,
//! and countdown behavior are reproducible.

use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::{DateTime, Utc};
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Abstract environment providing time and randomness.
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - `now_utc()` reflects real wall-clock UTC in production (expiry stamps
///   are computed from it)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Sleep for the given duration.
    ///
    /// This is the only async method in the trait, and only driver code
    /// (the countdown timer) should await it.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Fill the buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Production environment: OS entropy, system clock, tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create the production environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        rand::rngs::OsRng.fill_bytes(buffer);
    }
}

/// Deterministic environment for tests and simulation.
///
/// Randomness comes from a seeded `StdRng`, the clock only moves when a
/// test calls [`FixedEnv::advance`], and `sleep` returns immediately.
#[derive(Debug, Clone)]
pub struct FixedEnv {
    rng: Arc<Mutex<StdRng>>,
    now_utc: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedEnv {
    /// Create a deterministic environment from an RNG seed.
    ///
    /// The clock starts at the Unix epoch; use [`FixedEnv::with_time`] to
    /// pin a specific instant.
    pub fn new(seed: u64) -> Self {
        Self::with_time(seed, DateTime::UNIX_EPOCH)
    }

    /// Create a deterministic environment with a pinned clock.
    pub fn with_time(seed: u64, now_utc: DateTime<Utc>) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
            now_utc: Arc::new(Mutex::new(now_utc)),
        }
    }

    /// Move the virtual clock forward. Visible to all clones.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn advance(&self, delta: chrono::TimeDelta) {
        let mut now = self.now_utc.lock().expect("Mutex poisoned");
        *now += delta;
    }
}

impl Environment for FixedEnv {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now_utc.lock().expect("Mutex poisoned")
    }

    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock). This is acceptable for test/simulation code.
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().expect("Mutex poisoned").fill_bytes(buffer);
    }
}
