use std::time::{Duration, Instant};

use crossbeam_skiplist::SkipMap;

use crate::client::{WriteClient, WriteFuture, WriteOptions};

#[derive(Debug, Clone)]
struct StoredValue {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

/// Concurrent in-memory key-value store with per-key expiry. Serves as the
/// local write target and as the backing map of the test server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: SkipMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero `ttl` keeps the value forever.
    pub fn put(&self, key: String, value: Vec<u8>, ttl: Duration) {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };
        self.inner.insert(key, StoredValue { value, expires_at });
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.inner.get(key)?;
        let stored = entry.value();
        match stored.expires_at {
            Some(at) if Instant::now() >= at => None,
            _ => Some(stored.value.clone()),
        }
    }

    /// Number of stored keys, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drops expired keys and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        for entry in self.inner.iter() {
            if matches!(entry.value().expires_at, Some(at) if now >= at) && entry.remove() {
                removed += 1;
            }
        }
        removed
    }
}

impl WriteClient for MemoryStore {
    fn write<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        options: &'a WriteOptions,
        _deadline: tokio::time::Instant,
    ) -> WriteFuture<'a> {
        Box::pin(async move {
            self.put(key.to_string(), value.to_vec(), options.ttl);
            Ok(())
        })
    }
}
