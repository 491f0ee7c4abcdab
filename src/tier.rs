//! Recency-ordered list of the entries that share one access frequency.
//!
//! A `Tier` does not own its entries. It stores the handles of its front
//! (most recently used) and back (least recently used) members; the entries
//! themselves sit in the ledger's [`SlotArena`] and carry their own
//! `prev`/`next` handles. Every operation is a constant number of handle
//! rewires.
//!
//! Tiers also remember the nearest lower and higher frequencies that have a
//! tier of their own. The ledger uses these links to find the next minimum
//! frequency when a tier empties without scanning the map.

use crate::arena::{SlotArena, SlotId};
use crate::entry::CacheEntry;
use core::iter;

#[derive(Debug)]
pub(crate) struct Tier {
    /// Frequency shared by every member.
    frequency: u64,
    len: usize,
    /// Most recently used member.
    head: Option<SlotId>,
    /// Least recently used member.
    tail: Option<SlotId>,
    /// Nearest lower frequency with a tier.
    pub(crate) lower: Option<u64>,
    /// Nearest higher frequency with a tier.
    pub(crate) higher: Option<u64>,
}

impl Tier {
    pub(crate) fn new(frequency: u64, lower: Option<u64>, higher: Option<u64>) -> Self {
        Self {
            frequency,
            len: 0,
            head: None,
            tail: None,
            lower,
            higher,
        }
    }

    #[inline]
    pub(crate) fn frequency(&self) -> u64 {
        self.frequency
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Back member of the tier, or `None` for an empty tier.
    #[inline]
    pub(crate) fn least_recently_used(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links `id` in as the most recently used member.
    ///
    /// The entry must already carry this tier's frequency and must not be
    /// linked into any tier.
    pub(crate) fn push_front<K, V>(
        &mut self,
        entries: &mut SlotArena<CacheEntry<K, V>>,
        id: SlotId,
    ) {
        debug_assert_eq!(entries[id].frequency, self.frequency);

        let old_head = self.head;
        {
            let entry = &mut entries[id];
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old_head) => entries[old_head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Unlinks `id` from the tier.
    ///
    /// # Panics
    ///
    /// Panics if the entry does not belong to this tier.
    pub(crate) fn remove<K, V>(&mut self, entries: &mut SlotArena<CacheEntry<K, V>>, id: SlotId) {
        let (prev, next) = {
            let entry = &entries[id];
            assert_eq!(
                entry.frequency, self.frequency,
                "entry removed from a tier it does not belong to"
            );
            (entry.prev, entry.next)
        };
        assert!(self.len > 0, "entry removed from an empty tier");

        match prev {
            Some(prev) => entries[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => entries[next].prev = prev,
            None => self.tail = prev,
        }

        let entry = &mut entries[id];
        entry.prev = None;
        entry.next = None;
        self.len -= 1;
    }

    /// Moves a member to the front without changing its frequency.
    pub(crate) fn move_to_front<K, V>(
        &mut self,
        entries: &mut SlotArena<CacheEntry<K, V>>,
        id: SlotId,
    ) {
        if self.head == Some(id) {
            return;
        }
        self.remove(entries, id);
        self.push_front(entries, id);
    }

    /// Member handles from most to least recently used.
    pub(crate) fn ids<'a, K, V>(
        &self,
        entries: &'a SlotArena<CacheEntry<K, V>>,
    ) -> impl Iterator<Item = SlotId> + 'a {
        iter::successors(self.head, move |&id| {
            entries.get(id).and_then(|entry| entry.next)
        })
    }
}
