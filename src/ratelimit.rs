//! Per-username sliding-window budget for OPRF evaluations.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::errors::{Error, Result};

/// Sliding-window request counter keyed by username.
///
/// The map lives under a single mutex so that check-and-record is atomic
/// per call; each username's timestamp list stays ordered by insertion.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    window_ms: u64,
    max_requests: usize,
    entries: Mutex<HashMap<String, VecDeque<u64>>>,
}

impl SlidingWindowLimiter {
    /// A limiter admitting `max_requests` per username per `window_ms`.
    pub fn new(window_ms: u64, max_requests: usize) -> Self {
        Self {
            window_ms,
            max_requests,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or deny a request at `now_ms`.
    ///
    /// Timestamps older than `now_ms - window_ms` are dropped first. A
    /// saturated window denies with [`Error::RateLimited`] and records
    /// nothing; an admitted request records `now_ms` before returning.
    pub fn check_and_record(&self, username: &str, now_ms: u64) -> Result<()> {
        let mut entries = self.entries.lock().expect("limiter mutex should not be poisoned");
        let timestamps = entries.entry(username.to_owned()).or_default();
        Self::trim(timestamps, now_ms, self.window_ms);
        if timestamps.len() >= self.max_requests {
            return Err(Error::RateLimited);
        }
        timestamps.push_back(now_ms);
        Ok(())
    }

    /// Drop usernames whose window has fully drained, to bound memory.
    pub fn purge(&self, now_ms: u64) {
        let mut entries = self.entries.lock().expect("limiter mutex should not be poisoned");
        entries.retain(|_, timestamps| {
            Self::trim(timestamps, now_ms, self.window_ms);
            !timestamps.is_empty()
        });
    }

    fn trim(timestamps: &mut VecDeque<u64>, now_ms: u64, window_ms: u64) {
        let cutoff = now_ms.saturating_sub(window_ms);
        while timestamps.front().map_or(false, |&ts| ts < cutoff) {
            timestamps.pop_front();
        }
    }
}
