// ============================
// weather-backend-lib/src/auth/refresh_store.rs
// ============================
//! In-memory refresh token bookkeeping.
//!
//! Maps opaque refresh tokens to the subject they were issued for. Nothing
//! survives a restart. Entries expire after a fixed TTL and are dropped by
//! [`RefreshStore::purge_expired`].
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use metrics::{counter, gauge};
use tokio::task::JoinHandle;

use super::token_generator::new_refresh_token;
use crate::metrics::{REFRESH_TOKENS_ACTIVE, REFRESH_TOKENS_PURGED};

#[derive(Debug, Clone)]
struct RefreshEntry {
    subject: String,
    /// `None` when the TTL does not fit in an `Instant`
    expires_at: Option<Instant>,
}

impl RefreshEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Concurrency-safe map of refresh token -> subject
#[derive(Debug)]
pub struct RefreshStore {
    tokens: DashMap<String, RefreshEntry>,
    ttl: Duration,
}

impl RefreshStore {
    /// Create an empty store whose tokens live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Generate a fresh token for `subject` and remember it
    pub fn issue(&self, subject: &str) -> String {
        let token = new_refresh_token();
        let entry = RefreshEntry {
            subject: subject.to_string(),
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.tokens.insert(token.clone(), entry);
        gauge!(REFRESH_TOKENS_ACTIVE).set(self.tokens.len() as f64);
        token
    }

    /// Subject the token was issued for, `None` when unknown or expired.
    /// A successful lookup leaves the entry untouched.
    pub fn lookup(&self, token: &str) -> Option<String> {
        let entry = self.tokens.get(token)?;
        if entry.is_expired(Instant::now()) {
            tracing::debug!("refresh token presented after expiry");
            return None;
        }
        Some(entry.subject.clone())
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.tokens.len();
        self.tokens.retain(|_, entry| !entry.is_expired(now));
        let after = self.tokens.len();
        let removed = before.saturating_sub(after);

        if removed > 0 {
            counter!(REFRESH_TOKENS_PURGED).increment(removed as u64);
        }
        gauge!(REFRESH_TOKENS_ACTIVE).set(after as f64);
        removed
    }

    /// Number of stored tokens, expired ones included until purged
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Run [`purge_expired`](Self::purge_expired) every `every` on the tokio runtime
    pub fn spawn_purge_task(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = self.purge_expired();
                if removed > 0 {
                    tracing::info!(removed, remaining = self.len(), "purged expired refresh tokens");
                }
            }
        })
    }
}
