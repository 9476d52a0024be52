//! Session form cache
//!
//! Transient server-side cache of the last-submitted form data, keyed by
//! session id and form name, so a rejected submission can repopulate the
//! form. Entries are cleared on successful acceptance and expire after an
//! hour via the periodic cleanup task.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

const ENTRY_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
struct CachedForm {
    data: serde_json::Value,
    stored_at: DateTime<Utc>,
}

/// Session-scoped form data cache
pub struct FormCache {
    entries: Arc<RwLock<HashMap<(String, String), CachedForm>>>,
}

impl FormCache {
    /// Create a new, empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Remember the submitted data for a (session, form) pair.
    pub async fn store(&self, session_id: &str, form_name: &str, data: serde_json::Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            (session_id.to_string(), form_name.to_string()),
            CachedForm {
                data,
                stored_at: Utc::now(),
            },
        );
    }

    /// The last-submitted data for a (session, form) pair, if any.
    pub async fn get(&self, session_id: &str, form_name: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read().await;
        entries
            .get(&(session_id.to_string(), form_name.to_string()))
            .map(|entry| entry.data.clone())
    }

    /// Forget the cached data for a (session, form) pair. Called on
    /// successful acceptance.
    pub async fn clear(&self, session_id: &str, form_name: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(&(session_id.to_string(), form_name.to_string()));
    }

    /// Drop expired entries (should be called periodically).
    pub async fn cleanup(&self) {
        let cutoff = Utc::now() - Duration::minutes(ENTRY_TTL_MINUTES);
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at > cutoff);
    }
}

impl Default for FormCache {
    fn default() -> Self {
        Self::new()
    }
}
