//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, enabling
//! stable handles and O(1) splice/move operations without raw pointers.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (top) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail (bottom)
//! ```
//!
//! ## Operations
//! - `move_to_front(id)`: detach + attach to head
//! - `move_before(id, anchor)`: detach + splice directly in front of `anchor`
//! - `remove(id)`: detach + free slot in arena
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back`: O(1)
//! - `move_to_front` / `move_before`: O(1)
//! - `iter`, `check_invariants`: O(n)

use std::collections::HashSet;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<T> Node<T> {
    fn unlinked(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}

/// Intrusive list that stores nodes in a `SlotArena` and links them via `SlotId`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the id of the front node, `None` when the list is empty.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the id of the back node, the next one a policy evicts.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the neighbor of `id` toward the front.
    pub fn prev_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.prev)
    }

    /// Returns the neighbor of `id` toward the back.
    pub fn next_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            entries: self.iter_entries(),
        }
    }

    /// Returns an iterator of `(SlotId, &T)` from front to back.
    pub fn iter_entries(&self) -> IntrusiveListEntryIter<'_, T> {
        IntrusiveListEntryIter {
            arena: &self.arena,
            current: self.head,
        }
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::unlinked(value));
        self.splice(id, None, self.head);
        id
    }

    /// Inserts a new node at the back and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::unlinked(value));
        self.splice(id, self.tail, None);
        id
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.and_then(|id| self.remove(id))
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.and_then(|id| self.remove(id))
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head != Some(id) {
            self.detach(id);
            self.splice(id, None, self.head);
        }
        true
    }

    /// Moves `id` so that it sits directly in front of `anchor`.
    ///
    /// Returns `false` if either node is missing. Moving a node before itself
    /// is a no-op.
    pub fn move_before(&mut self, id: SlotId, anchor: SlotId) -> bool {
        if !self.arena.contains(id) || !self.arena.contains(anchor) {
            return false;
        }
        if id != anchor && self.prev_id(anchor) != Some(id) {
            self.detach(id);
            self.splice(id, self.prev_id(anchor), Some(anchor));
        }
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Points the forward link leaving `at` (the head pointer when `at` is
    /// `None`) at `to`.
    fn set_next(&mut self, at: Option<SlotId>, to: Option<SlotId>) {
        match at {
            Some(id) => {
                if let Some(node) = self.arena.get_mut(id) {
                    node.next = to;
                }
            },
            None => self.head = to,
        }
    }

    /// Mirror of `set_next`: `None` addresses the tail pointer.
    fn set_prev(&mut self, at: Option<SlotId>, to: Option<SlotId>) {
        match at {
            Some(id) => {
                if let Some(node) = self.arena.get_mut(id) {
                    node.prev = to;
                }
            },
            None => self.tail = to,
        }
    }

    /// Links the unlinked node `id` between `prev` and `next`, which must be
    /// adjacent (or list endpoints).
    fn splice(&mut self, id: SlotId, prev: Option<SlotId>, next: Option<SlotId>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = next;
        }
        self.set_next(prev, Some(id));
        self.set_prev(next, Some(id));
    }

    /// Unlinks `id`, joining its neighbours. The node stays in the arena.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());
        self.set_next(prev, next);
        self.set_prev(next, prev);
        Some(())
    }

    /// Walks the list in both directions and verifies link consistency.
    ///
    /// The forward walk from the head must visit exactly `len()` distinct
    /// nodes, every `prev` link must mirror the `next` link that reached it,
    /// and the last node must be the tail. The backward walk from the tail
    /// must visit the same number of nodes.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new(format!(
                    "list endpoints disagree: head={:?} tail={:?}",
                    self.head, self.tail
                )));
            }
            if self.len() != 0 {
                return Err(InvariantError::new(format!(
                    "list has no endpoints but {} live nodes",
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(self.len());
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            if !seen.insert(id) {
                return Err(InvariantError::new(format!("cycle at {:?}", id)));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to {:?}", id)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} prev={:?}, expected {:?}",
                    id, node.prev, prev
                )));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new(format!(
                    "walk ended at {:?} but tail is {:?}",
                    id, self.tail
                )));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new(format!(
                    "forward walk exceeds len {}",
                    self.len()
                )));
            }
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "forward walk visited {} nodes, len is {}",
                count,
                self.len()
            )));
        }

        let mut back_count = 0usize;
        let mut current = self.tail;
        while let Some(id) = current {
            back_count += 1;
            if back_count > count {
                return Err(InvariantError::new("backward walk exceeds forward walk"));
            }
            current = self.prev_id(id);
        }
        if back_count != count {
            return Err(InvariantError::new(format!(
                "backward walk visited {} nodes, forward walk {}",
                back_count, count
            )));
        }

        Ok(())
    }
}

/// Iterator over values from front to back.
pub struct IntrusiveListIter<'a, T> {
    entries: IntrusiveListEntryIter<'a, T>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, value)| value)
    }
}

/// Iterator over `(SlotId, &T)` pairs from front to back.
pub struct IntrusiveListEntryIter<'a, T> {
    arena: &'a SlotArena<Node<T>>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current.take()?;
        let node = self.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
