// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-respawn FIFO waiting lists

use rc_core::{Conflict, HolderId, QueueEntry, QueueEntryRecord, ResourceCode};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Default)]
pub struct QueueManager {
    queues: BTreeMap<ResourceCode, VecDeque<QueueEntry>>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the back of the respawn's line, returning the 1-based position
    pub fn enqueue(&mut self, entry: QueueEntry) -> Result<usize, Conflict> {
        if self.contains(&entry.holder, &entry.resource) {
            return Err(Conflict::AlreadyQueued {
                resource: entry.resource,
            });
        }
        let queue = self.queues.entry(entry.resource.clone()).or_default();
        queue.push_back(entry);
        Ok(queue.len())
    }

    /// Re-insert a persisted entry at the back, skipping duplicates
    pub fn restore(&mut self, entry: QueueEntry) -> bool {
        self.enqueue(entry).is_ok()
    }

    /// Remove the holder from the respawn's line
    pub fn remove(&mut self, holder: &HolderId, resource: &ResourceCode) -> Option<QueueEntry> {
        let queue = self.queues.get_mut(resource)?;
        let index = queue.iter().position(|e| &e.holder == holder)?;
        let entry = queue.remove(index);
        if queue.is_empty() {
            self.queues.remove(resource);
        }
        entry
    }

    /// Take the first holder in line
    pub fn pop_head(&mut self, resource: &ResourceCode) -> Option<QueueEntry> {
        let queue = self.queues.get_mut(resource)?;
        let entry = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(resource);
        }
        entry
    }

    pub fn peek_head(&self, resource: &ResourceCode) -> Option<&QueueEntry> {
        self.queues.get(resource).and_then(|q| q.front())
    }

    /// 1-based place of the holder in line
    pub fn position(&self, holder: &HolderId, resource: &ResourceCode) -> Option<usize> {
        self.queues
            .get(resource)?
            .iter()
            .position(|e| &e.holder == holder)
            .map(|i| i + 1)
    }

    pub fn contains(&self, holder: &HolderId, resource: &ResourceCode) -> bool {
        self.position(holder, resource).is_some()
    }

    /// Entries for one respawn in FIFO order
    pub fn entries(&self, resource: &ResourceCode) -> impl Iterator<Item = &QueueEntry> {
        self.queues.get(resource).into_iter().flatten()
    }

    /// First holder in line for every respawn with a queue
    pub fn heads(&self) -> BTreeMap<ResourceCode, &QueueEntry> {
        self.queues
            .iter()
            .filter_map(|(r, q)| q.front().map(|e| (r.clone(), e)))
            .collect()
    }

    /// Total waiting entries across all respawns
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn clear(&mut self) {
        self.queues.clear();
    }

    /// Every entry, grouped by respawn and in FIFO order within each
    pub fn records(&self) -> Vec<QueueEntryRecord> {
        self.queues
            .values()
            .flatten()
            .map(QueueEntryRecord::from)
            .collect()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
