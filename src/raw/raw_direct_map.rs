use core::marker::PhantomData;
use core::mem::MaybeUninit;

use super::bit_index::BitIndex;
use crate::error::Error;
use crate::key::DirectKey;
use crate::storage::Store;

/// The core direct-addressed map backing `DirectMap`.
///
/// Slot `o` of `store` holds a live value if and only if bit `o` of `presence` is set. Every
/// method that writes or drops a slot flips the bit in the same step: writes happen before the
/// bit is set, and the bit is cleared before the value is moved out or dropped, so a panicking
/// constructor or destructor never leaves a set bit over a dead slot.
pub(crate) struct RawDirectMap<K: DirectKey, V, S: Store<V>> {
    /// Which ordinals hold a live value.
    presence: BitIndex<K::Words>,
    /// The value cells, indexed by ordinal.
    store: S,
    _marker: PhantomData<(fn() -> K, V)>,
}

impl<K: DirectKey, V, S: Store<V>> RawDirectMap<K, V, S> {
    /// Creates an empty map over `store`.
    pub(crate) fn new(store: S) -> Self {
        Self {
            presence: BitIndex::new(K::EMPTY_WORDS),
            store,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.presence.count()
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) const fn presence(&self) -> &BitIndex<K::Words> {
        &self.presence
    }

    #[inline]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }

    /// Splits the map into its presence index and its slot cells.
    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&BitIndex<K::Words>, &mut [MaybeUninit<V>]) {
        (&self.presence, self.store.slots_mut())
    }

    #[inline]
    pub(crate) fn contains(&self, ordinal: usize) -> bool {
        self.presence.test(ordinal)
    }

    #[inline]
    pub(crate) fn get(&self, ordinal: usize) -> Option<&V> {
        if !self.presence.test(ordinal) {
            return None;
        }

        // SAFETY: A set presence bit means the slot holds a live value.
        Some(unsafe { self.store.slots()[ordinal].assume_init_ref() })
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, ordinal: usize) -> Option<&mut V> {
        if !self.presence.test(ordinal) {
            return None;
        }

        // SAFETY: A set presence bit means the slot holds a live value.
        Some(unsafe { self.store.slots_mut()[ordinal].assume_init_mut() })
    }

    /// Returns the value at `ordinal`, constructing it with `f` first if the slot is vacant.
    pub(crate) fn get_or_insert_with<F>(&mut self, ordinal: usize, f: F) -> Result<&mut V, Error>
    where
        F: FnOnce() -> V,
    {
        if !self.presence.test(ordinal) {
            self.store.acquire()?;
            // The bit is set only once the value is written, so a panicking `f` leaves the map
            // unchanged.
            self.store.slots_mut()[ordinal].write(f());
            self.presence.set(ordinal);
        }

        // SAFETY: The bit is set, either already or just above after writing the slot.
        Ok(unsafe { self.store.slots_mut()[ordinal].assume_init_mut() })
    }

    /// Stores `value` at `ordinal`, returning the previous value if the slot was occupied.
    pub(crate) fn insert(&mut self, ordinal: usize, value: V) -> Result<Option<V>, Error> {
        if let Some(slot) = self.get_mut(ordinal) {
            return Ok(Some(core::mem::replace(slot, value)));
        }

        self.store.acquire()?;
        self.store.slots_mut()[ordinal].write(value);
        self.presence.set(ordinal);
        Ok(None)
    }

    /// Moves the value out of `ordinal`, leaving the slot vacant.
    pub(crate) fn remove(&mut self, ordinal: usize) -> Option<V> {
        if !self.presence.clear(ordinal) {
            return None;
        }

        // SAFETY: The bit was set, so the slot held a live value; clearing the bit hands
        // ownership of it to us.
        Some(unsafe { self.store.slots()[ordinal].assume_init_read() })
    }

    /// Drops every live value.
    pub(crate) fn clear(&mut self) {
        if !core::mem::needs_drop::<V>() {
            self.presence.clear_all();
            return;
        }

        let mut cursor = self.presence.first_set();
        while let Some(ordinal) = cursor {
            cursor = self.presence.next_set(ordinal + 1);
            self.presence.clear(ordinal);
            // SAFETY: The bit was set; clearing it hands ownership of the value to us.
            unsafe { self.store.slots_mut()[ordinal].assume_init_drop() };
        }
    }

    /// Keeps only the values for which `f` returns `true`, visiting them in ascending order.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut V) -> bool,
    {
        let mut cursor = self.presence.first_set();
        while let Some(ordinal) = cursor {
            cursor = self.presence.next_set(ordinal + 1);
            let keep = {
                // SAFETY: `ordinal` came from the presence index.
                let value = unsafe { self.store.slots_mut()[ordinal].assume_init_mut() };
                f(ordinal, value)
            };
            if !keep {
                drop(self.remove(ordinal));
            }
        }
    }

    /// Exchanges the complete contents of two maps.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<K: DirectKey, V: Clone, S: Store<V>> RawDirectMap<K, V, S> {
    /// Clones every live value of `self` into `store`.
    ///
    /// Values are cloned in ascending order; if a clone panics, the values already cloned are
    /// dropped with the partially built map.
    pub(crate) fn clone_into_store(&self, store: S) -> Result<Self, Error> {
        let mut clone = Self::new(store);
        let mut cursor = self.presence.first_set();
        while let Some(ordinal) = cursor {
            if let Some(value) = self.get(ordinal) {
                clone.insert(ordinal, value.clone())?;
            }
            cursor = self.presence.next_set(ordinal + 1);
        }
        Ok(clone)
    }
}

impl<K: DirectKey, V, S: Store<V>> Drop for RawDirectMap<K, V, S> {
    fn drop(&mut self) {
        self.clear();
    }
}
