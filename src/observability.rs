use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Session store activity counters
#[derive(Debug, Default)]
pub struct SessionMetrics {
    pub logins: AtomicU64,
    pub failed_logins: AtomicU64,
    pub logouts: AtomicU64,
    pub signups: AtomicU64,
    pub rejected_signups: AtomicU64,
    pub agency_switches: AtomicU64,
    pub profile_updates: AtomicU64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_login(&self) {
        self.logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_login(&self) {
        self.failed_logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_logout(&self) {
        self.logouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signup(&self) {
        self.signups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_signup(&self) {
        self.rejected_signups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_agency_switch(&self) {
        self.agency_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_profile_update(&self) {
        self.profile_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> SessionStats {
        SessionStats {
            logins: self.logins.load(Ordering::Relaxed),
            failed_logins: self.failed_logins.load(Ordering::Relaxed),
            logouts: self.logouts.load(Ordering::Relaxed),
            signups: self.signups.load(Ordering::Relaxed),
            rejected_signups: self.rejected_signups.load(Ordering::Relaxed),
            agency_switches: self.agency_switches.load(Ordering::Relaxed),
            profile_updates: self.profile_updates.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Session metrics: logins={}, failed_logins={}, logouts={}, signups={}, rejected_signups={}, agency_switches={}, profile_updates={}",
            stats.logins,
            stats.failed_logins,
            stats.logouts,
            stats.signups,
            stats.rejected_signups,
            stats.agency_switches,
            stats.profile_updates
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SessionStats {
    pub logins: u64,
    pub failed_logins: u64,
    pub logouts: u64,
    pub signups: u64,
    pub rejected_signups: u64,
    pub agency_switches: u64,
    pub profile_updates: u64,
}

/// Time an operation and log its duration when finished
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = SessionMetrics::new();
        metrics.record_login();
        metrics.record_login();
        metrics.record_rejected_signup();

        let stats = metrics.get_stats();
        assert_eq!(stats.logins, 2);
        assert_eq!(stats.rejected_signups, 1);
        assert_eq!(stats.signups, 0);
    }
}
