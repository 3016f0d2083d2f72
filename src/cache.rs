use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::client::{ApiError, GovernanceApi};
use crate::models::proposal::Proposal;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Default)]
struct Entries {
    map: HashMap<String, Proposal>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
}

/// Process-wide `id -> Proposal` map. Each write replaces the whole entry.
///
/// Holds at most `capacity` proposals; inserting past that evicts the
/// oldest insert.
#[derive(Clone)]
pub struct ProposalCache {
    entries: Arc<RwLock<Entries>>,
    capacity: usize,
}

impl Default for ProposalCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ProposalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn set(&self, id: &str, proposal: Proposal) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.map.insert(id.to_string(), proposal).is_some() {
            entries.order.retain(|k| k != id);
        }
        entries.order.push_back(id.to_string());
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.map.remove(&oldest);
                log::debug!("Evicted proposal {oldest} from cache");
            }
        }
    }

    /// Replace an entry that is still cached; evicted ids stay evicted.
    pub fn refresh(&self, id: &str, proposal: Proposal) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        match entries.map.get_mut(id) {
            Some(slot) => {
                *slot = proposal;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<Proposal> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.map.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.map.contains_key(id)
    }

    /// Cached ids, oldest first.
    pub fn ids(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read-through lookup: serve from the cache, else fetch and remember the hit.
    ///
    /// Only a proposal whose own id equals `id` is remembered, so aliases
    /// of the same proposal never become cache keys.
    pub async fn get_or_fetch(
        &self,
        id: &str,
        api: &dyn GovernanceApi,
    ) -> Result<Option<Proposal>, ApiError> {
        if let Some(p) = self.get(id) {
            return Ok(Some(p));
        }
        let fetched = api.get_proposal(id).await?;
        match &fetched {
            Some(p) if p.id == id => self.set(id, p.clone()),
            Some(p) => log::debug!("Not caching proposal {} requested as {id:?}", p.id),
            None => {}
        }
        Ok(fetched)
    }
}
