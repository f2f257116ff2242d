//! Instance registry.
//!
//! The slot map is published through [`ArcSwap`]: the audio thread looks slots
//! up without taking a lock, while create/destroy build a new map under the
//! writer lock and swap it in.

use crate::slot::Slot;
use ampslot_core::InstanceId;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

type SlotMap = BTreeMap<InstanceId, Arc<Slot>>;

pub(crate) struct InstanceRegistry {
    slots: ArcSwap<SlotMap>,
    writer: Mutex<()>,
    next_id: AtomicU32,
}

impl InstanceRegistry {
    pub(crate) fn new() -> Self {
        Self {
            slots: ArcSwap::from_pointee(SlotMap::new()),
            writer: Mutex::new(()),
            next_id: AtomicU32::new(0),
        }
    }

    /// Allocate the next id and insert an empty slot for it.
    pub(crate) fn create(&self) -> InstanceId {
        let _writer = self.writer.lock();
        let id = InstanceId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let mut next = SlotMap::clone(&self.slots.load());
        next.insert(id, Arc::new(Slot::new()));
        self.slots.store(Arc::new(next));
        id
    }

    /// Unpublish `id`. The removed slot is returned so the caller can release
    /// its engine on the current thread.
    pub(crate) fn remove(&self, id: InstanceId) -> Option<Arc<Slot>> {
        let _writer = self.writer.lock();
        let current = self.slots.load_full();
        if !current.contains_key(&id) {
            return None;
        }

        let mut next = SlotMap::clone(&current);
        let removed = next.remove(&id);
        self.slots.store(Arc::new(next));
        removed
    }

    pub(crate) fn get(&self, id: InstanceId) -> Option<Arc<Slot>> {
        self.slots.load().get(&id).cloned()
    }

    /// Lock-free lookup for the audio thread. Does not touch reference counts
    /// of the slot itself.
    #[inline]
    pub(crate) fn with_slot<R>(&self, id: InstanceId, f: impl FnOnce(&Slot) -> R) -> Option<R> {
        let slots = self.slots.load();
        slots.get(&id).map(|slot| f(slot))
    }

    /// Current map, for iterating on a control thread.
    pub(crate) fn snapshot(&self) -> Arc<SlotMap> {
        self.slots.load_full()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.load().len()
    }

    pub(crate) fn ids(&self) -> Vec<InstanceId> {
        self.slots.load().keys().copied().collect()
    }
}
