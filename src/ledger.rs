//! Frequency Ledger
//!
//! Maps every access frequency that currently has live entries to the
//! [`Tier`] holding them, and tracks the minimum such frequency so the
//! eviction candidate can be found in constant time.
//!
//! ```text
//!   min_frequency = 1
//!        │
//!        ▼
//!   ┌─────────┐   higher   ┌─────────┐   higher   ┌─────────┐
//!   │ tier 1  │ ─────────▶ │ tier 2  │ ─────────▶ │ tier 5  │
//!   │ c  b  a │ ◀───────── │ d       │ ◀───────── │ e  f    │
//!   └─────────┘   lower    └─────────┘   lower    └─────────┘
//!    MRU ─▶ LRU
//!          ▲
//!          └── eviction candidate: back of the minimum tier
//! ```
//!
//! The ledger owns the slot arena, so every entry is owned exactly once.
//! Callers hold [`SlotId`] handles.

use crate::arena::{SlotArena, SlotId};
use crate::entry::{CacheEntry, INITIAL_FREQUENCY};
use crate::error::InvariantError;
use crate::tier::Tier;
use alloc::format;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

pub(crate) struct FrequencyLedger<K, V> {
    entries: SlotArena<CacheEntry<K, V>>,
    tiers: HashMap<u64, Tier>,
    /// Smallest frequency with a tier. Only meaningful while non-empty.
    min_frequency: u64,
}

impl<K, V> FrequencyLedger<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            tiers: HashMap::new(),
            min_frequency: INITIAL_FREQUENCY,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest frequency among live entries, `None` when empty.
    #[inline]
    pub(crate) fn min_frequency(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.min_frequency)
    }

    #[inline]
    pub(crate) fn entry(&self, id: SlotId) -> &CacheEntry<K, V> {
        &self.entries[id]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: SlotId) -> &mut CacheEntry<K, V> {
        &mut self.entries[id]
    }

    /// Returns the tier for `frequency`, creating and linking it between
    /// `lower` and `higher` if it does not exist yet.
    ///
    /// Takes the tier map alone so the caller can keep rewiring entries in
    /// the arena while holding the returned tier.
    fn tier_for(
        tiers: &mut HashMap<u64, Tier>,
        frequency: u64,
        lower: Option<u64>,
        higher: Option<u64>,
    ) -> &mut Tier {
        if !tiers.contains_key(&frequency) {
            if let Some(lower) = lower {
                if let Some(tier) = tiers.get_mut(&lower) {
                    tier.higher = Some(frequency);
                }
            }
            if let Some(higher) = higher {
                if let Some(tier) = tiers.get_mut(&higher) {
                    tier.lower = Some(frequency);
                }
            }
        }
        tiers
            .entry(frequency)
            .or_insert_with(|| Tier::new(frequency, lower, higher))
    }

    /// Drops an empty tier and joins its neighbours.
    fn drop_tier(&mut self, frequency: u64) {
        let Some(tier) = self.tiers.remove(&frequency) else {
            return;
        };
        debug_assert!(tier.is_empty());
        if let Some(lower) = tier.lower {
            if let Some(lower_tier) = self.tiers.get_mut(&lower) {
                lower_tier.higher = tier.higher;
            }
        }
        if let Some(higher) = tier.higher {
            if let Some(higher_tier) = self.tiers.get_mut(&higher) {
                higher_tier.lower = tier.lower;
            }
        }
    }

    /// Stores a new entry at the initial frequency as the most recently used
    /// member of that tier.
    pub(crate) fn insert(&mut self, key: K, value: V) -> SlotId {
        let higher = if self.is_empty() {
            None
        } else {
            Some(self.min_frequency)
        };
        let id = self.entries.insert(CacheEntry::new(key, value));
        let tier = Self::tier_for(&mut self.tiers, INITIAL_FREQUENCY, None, higher);
        tier.push_front(&mut self.entries, id);
        self.min_frequency = INITIAL_FREQUENCY;
        id
    }

    /// Moves an entry from tier `f` to the front of tier `f + 1`.
    ///
    /// If tier `f` empties and was the minimum, the minimum becomes `f + 1`,
    /// which this very call makes non-empty. Returns the new frequency.
    pub(crate) fn promote(&mut self, id: SlotId) -> u64 {
        let frequency = self.entries[id].frequency;
        let tier = self
            .tiers
            .get_mut(&frequency)
            .expect("live entry has no tier for its frequency");

        if frequency == u64::MAX {
            tier.move_to_front(&mut self.entries, id);
            return frequency;
        }

        tier.remove(&mut self.entries, id);
        let (lower, higher, emptied) = (tier.lower, tier.higher, tier.is_empty());
        if emptied {
            self.drop_tier(frequency);
            if frequency == self.min_frequency {
                self.min_frequency = frequency + 1;
            }
        }

        let promoted = self.entries[id].increment();
        let lower = if emptied { lower } else { Some(frequency) };
        let tier = Self::tier_for(&mut self.tiers, promoted, lower, higher);
        tier.push_front(&mut self.entries, id);
        promoted
    }

    /// Back member of the minimum-frequency tier: the least frequently used
    /// entry, ties broken by least recent use.
    pub(crate) fn eviction_candidate(&self) -> Option<SlotId> {
        if self.is_empty() {
            return None;
        }
        let tier = self
            .tiers
            .get(&self.min_frequency)
            .expect("minimum frequency has no tier");
        Some(
            tier.least_recently_used()
                .expect("minimum frequency tier is empty"),
        )
    }

    /// Unlinks an entry from its tier and removes it from the arena.
    pub(crate) fn detach(&mut self, id: SlotId) -> CacheEntry<K, V> {
        let frequency = self.entries[id].frequency;
        let tier = self
            .tiers
            .get_mut(&frequency)
            .expect("live entry has no tier for its frequency");
        tier.remove(&mut self.entries, id);

        if tier.is_empty() {
            let higher = tier.higher;
            self.drop_tier(frequency);
            if frequency == self.min_frequency {
                self.min_frequency = higher.unwrap_or(INITIAL_FREQUENCY);
            }
        }

        self.entries
            .remove(id)
            .expect("detached entry missing from arena")
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.tiers.clear();
        self.min_frequency = INITIAL_FREQUENCY;
    }

    /// Number of distinct frequencies with live entries.
    #[cfg(test)]
    pub(crate) fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Audits every structural invariant of the ledger.
    ///
    /// Checks tier membership and ordering links, per-tier lengths against
    /// the arena, the neighbour chain between tiers, and the minimum
    /// frequency.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.is_empty() {
            if !self.tiers.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty ledger still holds {} tiers",
                    self.tiers.len()
                )));
            }
            return Ok(());
        }

        let mut linked = 0usize;
        let mut lowest: Option<u64> = None;
        for (&frequency, tier) in &self.tiers {
            if tier.frequency() != frequency {
                return Err(InvariantError::new(format!(
                    "tier stored under {frequency} reports frequency {}",
                    tier.frequency()
                )));
            }
            if tier.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty tier left at frequency {frequency}"
                )));
            }

            let mut count = 0usize;
            let mut prev = None;
            for id in tier.ids(&self.entries) {
                let entry = self.entries.get(id).ok_or_else(|| {
                    InvariantError::new(format!("tier {frequency} links a vacated slot"))
                })?;
                if entry.frequency != frequency {
                    return Err(InvariantError::new(format!(
                        "entry with frequency {} sits in tier {frequency}",
                        entry.frequency
                    )));
                }
                if entry.prev != prev {
                    return Err(InvariantError::new(format!(
                        "broken back link inside tier {frequency}"
                    )));
                }
                prev = Some(id);
                count += 1;
            }
            if count != tier.len() {
                return Err(InvariantError::new(format!(
                    "tier {frequency} records length {} but links {count} entries",
                    tier.len()
                )));
            }
            if prev != tier.least_recently_used() {
                return Err(InvariantError::new(format!(
                    "tier {frequency} tail does not match its last member"
                )));
            }
            linked += count;

            if let Some(lower) = tier.lower {
                match self.tiers.get(&lower) {
                    Some(lower_tier) if lower < frequency && lower_tier.higher == Some(frequency) => {}
                    _ => {
                        return Err(InvariantError::new(format!(
                            "tier {frequency} has a broken lower neighbour {lower}"
                        )))
                    }
                }
            } else if lowest.replace(frequency).is_some() {
                return Err(InvariantError::new("more than one tier without a lower neighbour"));
            }
            if let Some(higher) = tier.higher {
                match self.tiers.get(&higher) {
                    Some(higher_tier) if higher > frequency && higher_tier.lower == Some(frequency) => {}
                    _ => {
                        return Err(InvariantError::new(format!(
                            "tier {frequency} has a broken higher neighbour {higher}"
                        )))
                    }
                }
            }
        }

        if linked != self.entries.len() {
            return Err(InvariantError::new(format!(
                "tiers link {linked} entries but the arena holds {}",
                self.entries.len()
            )));
        }
        let true_min = self.tiers.keys().copied().min();
        if true_min != Some(self.min_frequency) || lowest != true_min {
            return Err(InvariantError::new(format!(
                "min_frequency is {} but the lowest tier is {true_min:?}",
                self.min_frequency
            )));
        }
        Ok(())
    }

    /// Iterates over live entries in arena order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (SlotId, &CacheEntry<K, V>)> {
        self.entries.iter()
    }
}

impl<K, V> core::fmt::Debug for FrequencyLedger<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrequencyLedger")
            .field("len", &self.entries.len())
            .field("tiers", &self.tiers.len())
            .field("min_frequency", &self.min_frequency())
            .finish()
    }
}
