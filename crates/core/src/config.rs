//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! services, so request paths never consult the environment. The only tunable
//! the core carries is the simulated-latency profile: the data service mimics
//! a remote backend by sleeping before each operation, and tests switch the
//! whole profile off with [`LatencyProfile::zero`].

use std::time::Duration;

/// Per-operation-class artificial delays.
///
/// The defaults reproduce the delays of the simulated network the system was
/// modelled on: collection listings are the slowest calls, single-record
/// fetches the fastest. This is a test seam, not a correctness requirement:
/// nothing in the service depends on the sleeps actually happening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Listing a whole collection.
    pub list: Duration,
    /// Fetching a single record by id.
    pub fetch: Duration,
    /// Creating or updating a record.
    pub mutate: Duration,
    /// Deleting a record.
    pub remove: Duration,
    /// Computing dashboard statistics.
    pub stats: Duration,
    /// Logging in.
    pub login: Duration,
    /// Logging out.
    pub logout: Duration,
}

impl LatencyProfile {
    /// No artificial delay anywhere. The profile used by every test.
    pub const fn zero() -> Self {
        Self {
            list: Duration::ZERO,
            fetch: Duration::ZERO,
            mutate: Duration::ZERO,
            remove: Duration::ZERO,
            stats: Duration::ZERO,
            login: Duration::ZERO,
            logout: Duration::ZERO,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(1000),
            fetch: Duration::from_millis(500),
            mutate: Duration::from_millis(1000),
            remove: Duration::from_millis(800),
            stats: Duration::from_millis(800),
            login: Duration::from_millis(1000),
            logout: Duration::from_millis(500),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    latency: LatencyProfile,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with the given latency profile.
    pub fn new(latency: LatencyProfile) -> Self {
        Self { latency }
    }

    /// The configuration used by tests and the CLI: no simulated latency.
    pub fn instant() -> Self {
        Self::new(LatencyProfile::zero())
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }
}
