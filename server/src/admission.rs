//! Admission control for concurrent sessions.
//!
//! The active-session count is the only mutable state shared between
//! sessions. A slot is claimed with a single atomic check-and-increment before
//! the session task is spawned, and released by the [`SessionPermit`] the task
//! owns, whichever way the task ends.

use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default cap on concurrently active sessions.
pub const MAX_CLIENTS: usize = 3;

#[derive(Debug, Clone)]
pub struct AdmissionController {
    active: Arc<AtomicUsize>,
    max_sessions: usize,
}

impl AdmissionController {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            max_sessions,
        }
    }

    /// Claims a session slot, or returns `None` when the cap is reached.
    pub fn try_admit(&self) -> Option<SessionPermit> {
        let max = self.max_sessions;
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .ok()
            .map(|previous| {
                debug!("Session slot claimed ({}/{})", previous + 1, max);
                SessionPermit {
                    active: Arc::clone(&self.active),
                }
            })
    }

    /// Number of sessions currently holding a slot.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

impl Default for AdmissionController {
    fn default() -> Self {
        Self::new(MAX_CLIENTS)
    }
}

/// A claimed session slot, released on drop.
#[derive(Debug)]
pub struct SessionPermit {
    active: Arc<AtomicUsize>,
}

impl Drop for SessionPermit {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_cap() {
        let admission = AdmissionController::new(3);

        let permits: Vec<_> = (0..3).map(|_| admission.try_admit()).collect();
        assert!(permits.iter().all(Option::is_some));
        assert_eq!(admission.active(), 3);

        assert!(admission.try_admit().is_none());
        assert_eq!(admission.active(), 3);
    }

    #[test]
    fn test_dropping_permit_frees_slot() {
        let admission = AdmissionController::new(1);

        let permit = admission.try_admit().unwrap();
        assert!(admission.try_admit().is_none());

        drop(permit);
        assert_eq!(admission.active(), 0);
        assert!(admission.try_admit().is_some());
    }

    #[test]
    fn test_default_cap() {
        let admission = AdmissionController::default();
        assert_eq!(admission.max_sessions(), MAX_CLIENTS);
        assert_eq!(admission.active(), 0);
    }

    #[test]
    fn test_zero_cap_rejects_everything() {
        let admission = AdmissionController::new(0);
        assert!(admission.try_admit().is_none());
    }

    #[test]
    fn test_concurrent_admission_never_exceeds_cap() {
        let admission = AdmissionController::new(3);
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let admission = admission.clone();
                let peak = Arc::clone(&peak);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        if let Some(permit) = admission.try_admit() {
                            peak.fetch_max(admission.active(), Ordering::AcqRel);
                            drop(permit);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(peak.load(Ordering::Acquire) <= 3);
        assert_eq!(admission.active(), 0);
    }
}
