use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A forwarded query waiting for its upstream reply.
#[derive(Debug, Clone, Copy)]
pub struct PendingQuery {
    pub client: SocketAddr,
    pub created: Instant,
}

/// Forwarded queries keyed by transaction id.
///
/// Entries older than `ttl` are never delivered and are purged by the
/// sweeper. At most `max_entries` queries are in flight.
#[derive(Debug)]
pub struct PendingRequests {
    entries: DashMap<u16, PendingQuery>,
    ttl: Duration,
    max_entries: usize,
}

impl PendingRequests {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(max_entries.min(1024)),
            ttl,
            max_entries,
        }
    }

    /// Records `client` as waiting on `id`. Returns false when the table is
    /// full; a live entry with the same id is replaced.
    pub fn register(&self, id: u16, client: SocketAddr) -> bool {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&id) {
            return false;
        }

        let query = PendingQuery {
            client,
            created: Instant::now(),
        };
        if let Some(previous) = self.entries.insert(id, query) {
            if previous.client != client {
                warn!(
                    id = id,
                    previous = %previous.client,
                    client = %client,
                    "Transaction id reused while pending; earlier client will not get a reply"
                );
            }
        }
        true
    }

    /// Removes and returns the entry for `id` unless it has expired.
    pub fn take(&self, id: u16) -> Option<PendingQuery> {
        let (_, query) = self.entries.remove(&id)?;
        if query.created.elapsed() >= self.ttl {
            debug!(id = id, client = %query.client, "Upstream reply arrived after expiry");
            return None;
        }
        Some(query)
    }

    pub fn remove(&self, id: u16) {
        self.entries.remove(&id);
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, query| query.created.elapsed() < ttl);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Purges expired entries every `every` until the task is aborted.
pub fn spawn_expiry_sweeper(pending: Arc<PendingRequests>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let purged = pending.purge_expired();
            if purged > 0 {
                debug!(purged = purged, remaining = pending.len(), "Expired pending queries");
            }
        }
    })
}
