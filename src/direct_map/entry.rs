use core::fmt;
use core::mem;

use crate::error::{Error, or_alloc_failure};
use crate::key::DirectKey;
use crate::raw::RawDirectMap;
use crate::storage::{InlineSlots, Store};

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`crate::DirectMap`].
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
/// use direct_map::direct_map::Entry;
///
/// let mut map = DirectMap::new();
///
/// match map.entry(b'z') {
///     Entry::Vacant(v) => {
///         v.insert(1);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 1;
///     }
/// }
/// assert_eq!(map[b'z'], 1);
/// ```
///
/// [`entry`]: crate::DirectMap::entry
pub enum Entry<'a, K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug, S: Store<V>> fmt::Debug for Entry<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in a `DirectMap`.
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
/// use direct_map::direct_map::Entry;
///
/// let mut map = DirectMap::new();
///
/// if let Entry::Vacant(v) = map.entry(b'z') {
///     v.insert(5);
/// }
/// assert_eq!(map[b'z'], 5);
/// ```
pub struct VacantEntry<'a, K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    pub(crate) key: K,
    pub(crate) map: &'a mut RawDirectMap<K, V, S>,
}

impl<K: DirectKey + fmt::Debug, V, S: Store<V>> fmt::Debug for VacantEntry<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", &self.key).finish()
    }
}

/// A view into an occupied entry in a `DirectMap`.
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
/// use direct_map::direct_map::Entry;
///
/// let mut map = DirectMap::new();
/// map.insert(b'z', 1);
///
/// if let Entry::Occupied(mut o) = map.entry(b'z') {
///     *o.get_mut() += 1;
/// }
/// assert_eq!(map[b'z'], 2);
/// ```
pub struct OccupiedEntry<'a, K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    pub(crate) key: K,
    pub(crate) map: &'a mut RawDirectMap<K, V, S>,
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug, S: Store<V>> fmt::Debug for OccupiedEntry<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", &self.key).field("value", self.get()).finish()
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> Entry<'a, K, V, S> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// map.entry(b'p').or_insert(12);
    ///
    /// assert_eq!(map[b'p'], 12);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, String> = DirectMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry(b'p').or_insert_with(|| s);
    ///
    /// assert_eq!(map[b'p'], "hoho".to_string());
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of the default
    /// function, which is passed the entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, u32> = DirectMap::new();
    ///
    /// map.entry(b'p').or_insert_with_key(|key| u32::from(key) * 2);
    ///
    /// assert_eq!(map[b'p'], 224);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(v.key);
                v.insert(value)
            }
        }
    }

    /// Returns this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// assert_eq!(map.entry(b'p').key(), b'p');
    /// ```
    #[must_use]
    pub fn key(&self) -> K {
        match self {
            Entry::Occupied(o) => o.key,
            Entry::Vacant(v) => v.key,
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    ///
    /// map.entry(b'p').and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map[b'p'], 42);
    ///
    /// map.entry(b'p').and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map[b'p'], 43);
    /// ```
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut o) => {
                f(o.get_mut());
                Entry::Occupied(o)
            }
            Entry::Vacant(v) => Entry::Vacant(v),
        }
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, String> = DirectMap::new();
    /// let entry = map.entry(b'p').insert_entry("hoho".to_string());
    ///
    /// assert_eq!(entry.key(), b'p');
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, S> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K: DirectKey, V: Default, S: Store<V>> Entry<'a, K, V, S> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, Option<usize>> = DirectMap::new();
    /// map.entry(b'p').or_default();
    ///
    /// assert_eq!(map[b'p'], None);
    /// ```
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> VacantEntry<'a, K, V, S> {
    /// Gets the key that would be used when inserting a value through the `VacantEntry`.
    #[must_use]
    pub const fn key(&self) -> K {
        self.key
    }

    /// Take ownership of the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns a mutable reference to it.
    ///
    /// # Panics
    ///
    /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if provisioned
    /// storage has to be acquired and the provider fails. See
    /// [`try_insert`](VacantEntry::try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    /// use direct_map::direct_map::Entry;
    ///
    /// let mut map: DirectMap<u8, u32> = DirectMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry(b'p') {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map[b'p'], 37);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        or_alloc_failure(self.try_insert(value))
    }

    /// Fallible form of [`insert`](VacantEntry::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if provisioned storage had to be acquired and the
    /// provider failed.
    pub fn try_insert(self, value: V) -> Result<&'a mut V, Error> {
        self.map.get_or_insert_with(self.key.to_ordinal(), || value)
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns an `OccupiedEntry`.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, S> {
        or_alloc_failure(self.map.insert(self.key.to_ordinal(), value));
        OccupiedEntry {
            key: self.key,
            map: self.map,
        }
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> OccupiedEntry<'a, K, V, S> {
    /// Gets the key in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// map.entry(b'p').or_insert(12);
    /// assert_eq!(map.entry(b'p').key(), b'p');
    /// ```
    #[must_use]
    pub const fn key(&self) -> K {
        self.key
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    /// use direct_map::direct_map::Entry;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// map.entry(b'p').or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry(b'p') {
    ///     o.remove_entry();
    /// }
    ///
    /// assert!(!map.contains_key(b'p'));
    /// ```
    pub fn remove_entry(self) -> (K, V) {
        let value = self
            .map
            .remove(self.key.to_ordinal())
            .expect("`OccupiedEntry::remove_entry()` - entry is vacant!");
        (self.key, value)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.map.get(self.key.to_ordinal()).expect("`OccupiedEntry::get()` - entry is vacant!")
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    /// use direct_map::direct_map::Entry;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// map.entry(b'p').or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry(b'p') {
    ///     *o.get_mut() += 10;
    ///     assert_eq!(*o.get(), 22);
    ///
    ///     // We can use the same Entry multiple times.
    ///     *o.get_mut() += 2;
    /// }
    /// assert_eq!(map[b'p'], 24);
    /// ```
    pub fn get_mut(&mut self) -> &mut V {
        self.map
            .get_mut(self.key.to_ordinal())
            .expect("`OccupiedEntry::get_mut()` - entry is vacant!")
    }

    /// Converts the entry into a mutable reference to its value.
    ///
    /// If you need multiple references to the `OccupiedEntry`, see [`get_mut`].
    ///
    /// [`get_mut`]: OccupiedEntry::get_mut
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.map
            .get_mut(self.key.to_ordinal())
            .expect("`OccupiedEntry::into_mut()` - entry is vacant!")
    }

    /// Sets the value of the entry with the `OccupiedEntry`'s key,
    /// and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    /// use direct_map::direct_map::Entry;
    ///
    /// let mut map: DirectMap<u8, usize> = DirectMap::new();
    /// map.entry(b'p').or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry(b'p') {
    ///     assert_eq!(o.insert(15), 12);
    /// }
    /// assert_eq!(map[b'p'], 15);
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}
