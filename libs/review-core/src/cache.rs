//! Caller-owned cache of built schedules.
//!
//! The core holds no state of its own; an adapter that wants to serve
//! due-date filters without rebuilding keeps one of these per process and
//! keys it however it identifies learners.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::schedule::ReviewSchedule;

/// A schedule together with the time it was built.
#[derive(Debug, Clone)]
pub struct CachedSchedule {
    pub built_at: DateTime<Utc>,
    pub entries: Vec<ReviewSchedule>,
}

/// Bounded map from a caller key to its most recent schedule.
#[derive(Debug)]
pub struct ScheduleCache<K> {
    capacity: usize,
    entries: HashMap<K, CachedSchedule>,
}

impl<K: Eq + Hash + Clone> ScheduleCache<K> {
    /// Create a cache holding at most `capacity` schedules (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
        }
    }

    /// Store a schedule, replacing any previous one for the key. When full,
    /// the entry built longest ago is evicted.
    pub fn insert(&mut self, key: K, entries: Vec<ReviewSchedule>, built_at: DateTime<Utc>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, cached)| cached.built_at)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, CachedSchedule { built_at, entries });
    }

    pub fn get(&self, key: &K) -> Option<&CachedSchedule> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<CachedSchedule> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
