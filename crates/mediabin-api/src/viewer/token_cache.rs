//! Short-lived single-use access tokens for the viewer content endpoint.
//!
//! The dispatch page mints a token when it renders; the viewer page spends
//! it on its one content fetch moments later. Entries therefore live for a
//! few seconds at most, and a background sweeper evicts the ones an
//! abandoned page never spends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

struct CacheEntry {
    media_id: String,
    expires_at: Instant,
}

/// In-process cache of viewer access tokens.
///
/// All map access goes through a plain mutex; every critical section is a
/// handful of map operations, so the lock is never held across an await.
pub struct TokenCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    cancel: CancellationToken,
}

impl TokenCache {
    /// Create the cache and start its background sweeper.
    ///
    /// The sweeper holds only a weak reference and stops on its own when the
    /// cache is dropped or [`shutdown`](Self::shutdown) is called.
    pub fn start(ttl: Duration, sweep_interval: Duration) -> Arc<Self> {
        let cache = Arc::new(TokenCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
            cancel: CancellationToken::new(),
        });

        tokio::spawn(run_sweeper(Arc::downgrade(&cache), sweep_interval));

        cache
    }

    /// Associate `token` with `media_id` for the configured TTL.
    ///
    /// Re-inserting an existing token replaces the entry and restarts its
    /// lifetime.
    pub fn put(&self, token: &str, media_id: &str) {
        let entry = CacheEntry {
            media_id: media_id.to_string(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries
            .lock()
            .expect("token cache mutex poisoned")
            .insert(token.to_string(), entry);
    }

    /// Take the media identifier for `token`, consuming the entry.
    ///
    /// Returns `None` for unknown or expired tokens. The entry is removed
    /// either way, so a second resolve of the same token always misses.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let mut entries = self.entries.lock().expect("token cache mutex poisoned");
        match entries.remove(token) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.media_id),
            _ => None,
        }
    }

    /// Whether `token` is present in the cache.
    ///
    /// Presence only: an entry past its TTL that the sweeper has not yet
    /// evicted still counts. Never consumes the entry.
    pub fn is_valid(&self, token: &str) -> bool {
        self.entries
            .lock()
            .expect("token cache mutex poisoned")
            .contains_key(token)
    }

    /// Stop the background sweeper.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn sweep(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("token cache mutex poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = entries.len(), "Swept expired tokens");
        }
    }
}

impl Drop for TokenCache {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_sweeper(cache: Weak<TokenCache>, sweep_interval: Duration) {
    let cancel = match cache.upgrade() {
        Some(cache) => cache.cancel.clone(),
        None => return,
    };
    let mut interval = tokio::time::interval(sweep_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                match cache.upgrade() {
                    Some(cache) => cache.sweep(),
                    None => break,
                }
            }
        }
    }
}
