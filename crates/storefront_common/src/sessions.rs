//! In-memory session maps with idle expiry and a capacity bound.
//!
//! Booking wizards and carts are created by anonymous requests, so the maps
//! holding them must not grow without limit. Every access records the time;
//! entries idle for longer than the TTL are treated as gone and swept when
//! a new session is inserted.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use storefront_config::SessionConfig;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Session limit of {0} reached, try again later")]
pub struct SessionLimitReached(pub usize);

#[derive(Debug)]
struct Entry<T> {
    value: T,
    last_seen: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionMap<K, T> {
    entries: HashMap<K, Entry<T>>,
    ttl: Duration,
    capacity: usize,
}

impl<K: Eq + Hash, T> SessionMap<K, T> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity,
        }
    }

    /// Reads `[sessions]`; non-positive values fall back to the defaults.
    pub fn from_config(config: Option<&SessionConfig>) -> Self {
        let ttl_minutes = match config.and_then(|c| c.ttl_minutes) {
            Some(minutes) if minutes > 0 => minutes,
            Some(minutes) => {
                warn!("Ignoring session ttl_minutes {}, using {}", minutes, DEFAULT_SESSION_TTL_MINUTES);
                DEFAULT_SESSION_TTL_MINUTES
            }
            None => DEFAULT_SESSION_TTL_MINUTES,
        };
        let capacity = config
            .and_then(|c| c.max_sessions)
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_SESSIONS);
        Self::new(Duration::minutes(ttl_minutes), capacity)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries, expired ones included until the next sweep.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expired(&self, entry: &Entry<T>, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.ttl
    }

    /// Drops every expired entry and returns how many were dropped.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.last_seen <= ttl);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!("Swept {} idle sessions, {} left", dropped, self.entries.len());
        }
        dropped
    }

    /// Stores a new session. Expired entries are swept first; a full map
    /// refuses the insert.
    pub fn insert(&mut self, key: K, value: T, now: DateTime<Utc>) -> Result<(), SessionLimitReached> {
        self.sweep(now);
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            warn!("Session limit of {} reached", self.capacity);
            return Err(SessionLimitReached(self.capacity));
        }
        self.entries.insert(
            key,
            Entry {
                value,
                last_seen: now,
            },
        );
        Ok(())
    }

    /// Returns the live session and marks it as seen at `now`.
    pub fn get_mut(&mut self, key: &K, now: DateTime<Utc>) -> Option<&mut T> {
        if self
            .entries
            .get(key)
            .is_some_and(|entry| self.expired(entry, now))
        {
            self.entries.remove(key);
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        entry.last_seen = now;
        Some(&mut entry.value)
    }

    pub fn get(&mut self, key: &K, now: DateTime<Utc>) -> Option<&T> {
        self.get_mut(key, now).map(|value| &*value)
    }

    /// Removes a live session. Expired entries count as missing.
    pub fn remove(&mut self, key: &K, now: DateTime<Utc>) -> Option<T> {
        let entry = self.entries.remove(key)?;
        (!self.expired(&entry, now)).then_some(entry.value)
    }
}
