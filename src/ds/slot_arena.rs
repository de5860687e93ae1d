//! Slot arena with free-slot recycling.
//!
//! Nodes of the recency/frequency lists live here and are addressed by
//! [`SlotId`] instead of pointers. A vacant slot stores the index of the next
//! vacant slot, so the free chain costs no memory beyond the slots themselves
//! and churn (insert/evict cycles) never grows the backing `Vec` past the
//! high-water mark of live entries.

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    /// Link to the next vacant slot, `None` at the end of the chain.
    Vacant(Option<usize>),
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    next_vacant: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            next_vacant: None,
            len: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if there is one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        if let Some(idx) = self.next_vacant {
            if let Some(&Slot::Vacant(next)) = self.slots.get(idx) {
                self.next_vacant = next;
                self.slots[idx] = Slot::Occupied(value);
                return SlotId(idx);
            }
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    /// Takes the value out of `id`. `None` for stale or out-of-range ids.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let Slot::Occupied(_) = slot else {
            return None;
        };
        match std::mem::replace(slot, Slot::Vacant(self.next_vacant)) {
            Slot::Occupied(value) => {
                self.next_vacant = Some(id.0);
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant(_) => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Slot::Occupied(_)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever allocated (live + vacant).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every value. Ids handed out before are stale afterwards.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_vacant = None;
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
