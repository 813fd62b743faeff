use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops::{Bound, Index, RangeBounds};

use crate::error::{Error, or_alloc_failure};
use crate::key::DirectKey;
use crate::provider::Global;
use crate::raw::{BitIndex, Ordinals, RawDirectMap};
use crate::storage::{InlineSlots, ProvisionedSlots, Store};

mod cursor;
mod entry;
mod provisioned;

pub use cursor::{Cursor, CursorMut};
pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// A [`DirectMap`] whose slots are obtained from a [`MemoryProvider`](crate::MemoryProvider).
///
/// These maps are move-only: duplicating provisioned storage is not supported, so the type does
/// not implement [`Clone`]. Build a new map and insert entries explicitly to copy one.
pub type ProvisionedDirectMap<K, V, P = Global> = DirectMap<K, V, ProvisionedSlots<K, V, P>>;

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
fn validate_range_bounds<K, R>(range: &R)
where
    K: Ord,
    R: RangeBounds<K>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                start < end
            } else {
                start <= end
            };
        assert!(valid, "range start is greater than range end in DirectMap");
    }
}

/// Converts key bounds into the half-open ordinal span `start..end`.
fn ordinal_span<K: DirectKey, R: RangeBounds<K>>(range: &R) -> (usize, usize) {
    validate_range_bounds(range);

    let start = match range.start_bound() {
        Bound::Included(key) => key.to_ordinal(),
        Bound::Excluded(key) => key.to_ordinal() + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(key) => key.to_ordinal() + 1,
        Bound::Excluded(key) => key.to_ordinal(),
        Bound::Unbounded => K::DOMAIN,
    };
    (start, end)
}

/// An ordered map over a small, enumerable key domain, based on direct addressing.
///
/// Every key of type `K` maps to an *ordinal* in `[0, K::DOMAIN)` through its [`DirectKey`]
/// implementation, and the value for a key lives in the slot with that ordinal. A presence bitmap
/// records which slots hold values. Lookups never compare keys; ordered traversal scans the
/// bitmap for the next set bit, a 64-bit word at a time.
///
/// Iterators obtained from functions such as [`DirectMap::iter`], [`DirectMap::into_iter`],
/// [`DirectMap::values`], or [`DirectMap::keys`] produce their items in key order. Because keys
/// are not stored, iterators yield keys by value.
///
/// The third type parameter selects where the slots live. The default, [`InlineSlots`], embeds
/// them in the map; [`ProvisionedDirectMap`] obtains them from a memory provider.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let mut letters: DirectMap<u8, usize> = DirectMap::new();
///
/// for byte in b"hello world" {
///     *letters.get_or_default(*byte) += 1;
/// }
///
/// assert_eq!(letters[b'l'], 3);
/// assert!(!letters.contains_key(b'z'));
///
/// // Entries come out in key order.
/// let keys: Vec<u8> = letters.keys().collect();
/// assert_eq!(keys, b" dehlorw");
///
/// // Bounds queries walk the presence bitmap.
/// assert_eq!(letters.lower_bound(b'i').key(), Some(b'l'));
/// assert_eq!(letters.upper_bound(b'w').key(), None);
/// ```
///
/// A `DirectMap` with a known list of items can be initialized from an array:
///
/// ```
/// use direct_map::DirectMap;
///
/// let grades: DirectMap<u8, &str> = DirectMap::from([(b'A', "excellent"), (b'C', "fair"), (b'B', "good")]);
/// assert_eq!(grades.first_key_value(), Some((b'A', &"excellent")));
/// ```
///
/// # Complexity
///
/// - `get`, `insert`, `remove`, `contains_key`, `entry`: O(1).
/// - `lower_bound`, `upper_bound`, `first_key_value`, `last_key_value` and every iterator or
///   cursor step: O(D / 64) in the worst case.
/// - Memory: O(D) for the slots plus D bits for the presence bitmap, whatever the length.
pub struct DirectMap<K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    raw: RawDirectMap<K, V, S>,
}

/// An iterator over the entries of a `DirectMap`.
///
/// This `struct` is created by the [`iter`] method on [`DirectMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let map: DirectMap<u8, &str> = DirectMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((1, &"a")));
/// assert_eq!(iter.next_back(), Some((2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: DirectMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: DirectKey, V> {
    inner: Range<'a, K, V>,
}

/// A mutable iterator over the entries of a `DirectMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`DirectMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let mut map: DirectMap<u8, i32> = DirectMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: DirectMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K: DirectKey, V> {
    inner: RangeMut<'a, K, V>,
}

/// An owning iterator over the entries of a `DirectMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`DirectMap`]
/// (provided by the [`IntoIterator`] trait). Entries not consumed are dropped with the iterator,
/// and any provisioned storage is released then.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    raw: RawDirectMap<K, V, S>,
    walk: Ordinals,
}

/// An iterator over the keys of a `DirectMap`.
///
/// This `struct` is created by the [`keys`] method on [`DirectMap`].
///
/// [`keys`]: DirectMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K: DirectKey, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `DirectMap`.
///
/// This `struct` is created by the [`values`] method on [`DirectMap`].
///
/// [`values`]: DirectMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K: DirectKey, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `DirectMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`DirectMap`].
///
/// [`values_mut`]: DirectMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K: DirectKey, V> {
    inner: IterMut<'a, K, V>,
}

/// An owning iterator over the keys of a `DirectMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`DirectMap`].
///
/// [`into_keys`]: DirectMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    inner: IntoIter<K, V, S>,
}

/// An owning iterator over the values of a `DirectMap`.
///
/// This `struct` is created by the [`into_values`] method on [`DirectMap`].
///
/// [`into_values`]: DirectMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    inner: IntoIter<K, V, S>,
}

/// An iterator over a sub-range of entries in a `DirectMap`.
///
/// This `struct` is created by the [`range`] method on [`DirectMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let map: DirectMap<u8, &str> = DirectMap::from([(1, "a"), (5, "b"), (9, "c")]);
/// let inside: Vec<_> = map.range(2..=9).collect();
/// assert_eq!(inside, [(5, &"b"), (9, &"c")]);
/// ```
///
/// [`range`]: DirectMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K: DirectKey, V> {
    presence: &'a BitIndex<K::Words>,
    slots: &'a [MaybeUninit<V>],
    ordinals: Ordinals,
    _marker: PhantomData<fn() -> K>,
}

/// A mutable iterator over a sub-range of entries in a `DirectMap`.
///
/// This `struct` is created by the [`range_mut`] method on [`DirectMap`].
///
/// [`range_mut`]: DirectMap::range_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RangeMut<'a, K: DirectKey, V> {
    presence: &'a BitIndex<K::Words>,
    // Spans exactly the ordinals `ordinals.front..ordinals.back`.
    slots: core::slice::IterMut<'a, MaybeUninit<V>>,
    ordinals: Ordinals,
    _marker: PhantomData<fn() -> K>,
}

impl<'a, K: DirectKey, V> Range<'a, K, V> {
    fn new<S: Store<V>>(raw: &'a RawDirectMap<K, V, S>, start: usize, end: usize) -> Self {
        Range {
            presence: raw.presence(),
            slots: raw.store().slots(),
            ordinals: Ordinals::new(raw.presence(), start, end),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn entry(&self, ordinal: usize) -> (K, &'a V) {
        // SAFETY: `ordinal` came from the presence index, which the shared borrow keeps frozen.
        (K::from_ordinal(ordinal), unsafe { self.slots[ordinal].assume_init_ref() })
    }
}

impl<'a, K: DirectKey, V> RangeMut<'a, K, V> {
    fn new<S: Store<V>>(raw: &'a mut RawDirectMap<K, V, S>, start: usize, end: usize) -> Self {
        let (presence, slots) = raw.parts_mut();
        let ordinals = Ordinals::new(presence, start, end);
        let slots = if ordinals.remaining == 0 {
            <&mut [MaybeUninit<V>]>::default()
        } else {
            &mut slots[start..end]
        };
        RangeMut {
            presence,
            slots: slots.iter_mut(),
            ordinals,
            _marker: PhantomData,
        }
    }
}

impl<K: DirectKey, V> DirectMap<K, V> {
    /// Makes a new, empty `DirectMap` with inline storage.
    ///
    /// Does not allocate anything.
    ///
    /// # Complexity
    ///
    /// O(D / 64) to zero the presence bitmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1u8, "a");
    /// ```
    ///
    /// Inline slots are capped at [`InlineSlots::MAX_BYTES`], so a 16-bit key domain with
    /// sized values does not build. Use [`ProvisionedDirectMap`] for those.
    ///
    /// ```compile_fail
    /// use direct_map::DirectMap;
    ///
    /// let map: DirectMap<u16, u64> = DirectMap::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        DirectMap {
            raw: RawDirectMap::new(InlineSlots::new()),
        }
    }
}

impl<K: DirectKey, V, S: Store<V>> DirectMap<K, V, S> {
    /// Makes a new, empty `DirectMap` over the given slot storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::{DirectMap, Global, ProvisionedSlots};
    ///
    /// let slots: ProvisionedSlots<u8, u64> = ProvisionedSlots::try_new_in(Global)?;
    /// let mut map: DirectMap<u8, u64, _> = DirectMap::with_store(slots);
    /// map.insert(7, 49);
    /// # Ok::<(), direct_map::Error>(())
    /// ```
    #[must_use]
    pub fn with_store(store: S) -> Self {
        DirectMap {
            raw: RawDirectMap::new(store),
        }
    }

    /// Returns the slot storage.
    #[must_use]
    pub const fn store(&self) -> &S {
        self.raw.store()
    }

    /// Clears the map, removing all elements.
    ///
    /// Provisioned storage is kept for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// a.insert(1u8, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// assert_eq!(map.get(1), Some(&"a"));
    /// assert_eq!(map.get(2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn get(&self, key: K) -> Option<&V> {
        self.raw.get(key.to_ordinal())
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// assert_eq!(map.get_key_value(1), Some((1, &"a")));
    /// assert_eq!(map.get_key_value(2), None);
    /// ```
    #[must_use]
    pub fn get_key_value(&self, key: K) -> Option<(K, &V)> {
        self.get(key).map(|value| (key, value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// if let Some(x) = map.get_mut(1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[1], "b");
    /// ```
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.raw.get_mut(key.to_ordinal())
    }

    /// Returns a reference to the value corresponding to the key, or an error if the key has no
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::{DirectMap, Error};
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(b'a', "42");
    /// assert_eq!(map.at(b'a'), Ok(&"42"));
    /// assert_eq!(map.at(b'b'), Err(Error::KeyNotFound { ordinal: 98 }));
    /// ```
    pub fn at(&self, key: K) -> Result<&V, Error> {
        let ordinal = key.to_ordinal();
        self.raw.get(ordinal).ok_or(Error::KeyNotFound { ordinal })
    }

    /// Returns a mutable reference to the value corresponding to the key, or an error if the key
    /// has no entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn at_mut(&mut self, key: K) -> Result<&mut V, Error> {
        let ordinal = key.to_ordinal();
        self.raw.get_mut(ordinal).ok_or(Error::KeyNotFound { ordinal })
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()` first if the
    /// key has no entry.
    ///
    /// # Panics
    ///
    /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if provisioned
    /// storage has to be acquired and the provider fails. See
    /// [`try_get_or_default`](DirectMap::try_get_or_default).
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, String> = DirectMap::new();
    /// map.get_or_default(b'a').push_str("42");
    /// assert_eq!(map.len(), 1);
    ///
    /// // A present key keeps its value.
    /// map.get_or_default(b'a').push('!');
    /// assert_eq!(map[b'a'], "42!");
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        or_alloc_failure(self.raw.get_or_insert_with(key.to_ordinal(), V::default))
    }

    /// Fallible form of [`get_or_default`](DirectMap::get_or_default).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if provisioned storage had to be acquired and the
    /// provider failed. The map is unchanged in that case.
    pub fn try_get_or_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        self.raw.get_or_insert_with(key.to_ordinal(), V::default)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1u8, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(K, &V)> {
        let ordinal = self.raw.presence().first_set()?;
        self.raw.get(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(K, &V)> {
        let ordinal = self.raw.presence().last_set()?;
        self.raw.get(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }

    /// Removes and returns the first element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _)| k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let ordinal = self.raw.presence().first_set()?;
        self.raw.remove(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }

    /// Removes and returns the last element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.pop_last(), Some((2, "b")));
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let ordinal = self.raw.presence().last_set()?;
        self.raw.remove(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// assert!(map.contains_key(1));
    /// assert!(!map.contains_key(2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.raw.contains(key.to_ordinal())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned.
    ///
    /// # Panics
    ///
    /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if provisioned
    /// storage has to be acquired and the provider fails. See
    /// [`try_insert`](DirectMap::try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// assert_eq!(map.insert(37u8, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        or_alloc_failure(self.raw.insert(key.to_ordinal(), value))
    }

    /// Fallible form of [`insert`](DirectMap::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if provisioned storage had to be acquired and the
    /// provider failed. The map is unchanged and `value` is dropped in that case.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        self.raw.insert(key.to_ordinal(), value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(1u8, "a");
    /// assert_eq!(map.remove(1), Some("a"));
    /// assert_eq!(map.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.raw.remove(key.to_ordinal())
    }

    /// Removes a key from the map, returning the key and the value if the key
    /// was previously in the map.
    pub fn remove_entry(&mut self, key: K) -> Option<(K, V)> {
        self.remove(key).map(|value| (key, value))
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, u8> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        self.raw.retain(|ordinal, value| f(K::from_ordinal(ordinal), value));
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    ///
    /// If a key from `other` is already present in `self`, the respective
    /// value from `self` will be overwritten with the respective value from `other`.
    /// `other` may use a different storage strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// a.insert(1u8, "a");
    /// a.insert(2, "b");
    ///
    /// let mut b = DirectMap::new();
    /// b.insert(2u8, "c");
    /// b.insert(3, "d");
    ///
    /// a.append(&mut b);
    ///
    /// assert!(b.is_empty());
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a[2], "c");
    /// ```
    pub fn append<T: Store<V>>(&mut self, other: &mut DirectMap<K, V, T>) {
        let mut walk = Ordinals::new(other.raw.presence(), 0, K::DOMAIN);
        while let Some(ordinal) = walk.next(other.raw.presence()) {
            if let Some(value) = other.raw.remove(ordinal) {
                self.insert(K::from_ordinal(ordinal), value);
            }
        }
    }

    /// Exchanges the contents of two maps without cloning any value.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::from([(1u8, "a")]);
    /// let mut b = DirectMap::new();
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b[1], "a");
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the map.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::Included;
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(3u8, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (key, &value) in map.range((Included(4), Included(8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((5, &"b")), map.range(4..).next());
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V> {
        let (start, end) = ordinal_span(&range);
        Range::new(&self.raw, start, end)
    }

    /// Constructs a mutable double-ended iterator over a sub-range of elements in the map.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<u8, i32> = [(b'A', 0), (b'B', 0), (b'C', 0)].into();
    /// for (_, balance) in map.range_mut(b'B'..b'D') {
    ///     *balance += 100;
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [0, 100, 100]);
    /// ```
    pub fn range_mut<R: RangeBounds<K>>(&mut self, range: R) -> RangeMut<'_, K, V> {
        let (start, end) = ordinal_span(&range);
        RangeMut::new(&mut self.raw, start, end)
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut count: DirectMap<u8, usize> = DirectMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in *b"abracadabra" {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count[b'a'], 5);
    /// assert_eq!(count[b'b'], 2);
    /// assert_eq!(count[b'c'], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        if self.contains_key(key) {
            Entry::Occupied(OccupiedEntry { key, map: &mut self.raw })
        } else {
            Entry::Vacant(VacantEntry { key, map: &mut self.raw })
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(2u8, "b"), (1, "a")]);
    /// let keys: Vec<u8> = map.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V, S> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(1u8, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V, S> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::new();
    /// map.insert(3u8, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: Range::new(&self.raw, 0, K::DOMAIN),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::from([(b'a', 1), (b'b', 2), (b'c', 3)]);
    ///
    /// // add 10 to the value if the key isn't 'a'
    /// for (key, value) in map.iter_mut() {
    ///     if key != b'a' {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map[b'c'], 13);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: RangeMut::new(&mut self.raw, 0, K::DOMAIN),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// a.insert(2u8, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// a.insert(1u8, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().copied().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// a.insert(1u8, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1u8, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut a = DirectMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1u8, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of keys in the domain, which is also the number of slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map: DirectMap<u8, ()> = DirectMap::new();
    /// assert_eq!(map.capacity(), 256);
    /// ```
    #[must_use]
    pub const fn capacity(&self) -> usize {
        K::DOMAIN
    }

    /// Returns the smallest key of the domain.
    ///
    /// This is a property of the key type, not of the map's contents: the key need not be
    /// present, and the result never changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map: DirectMap<i8, &str> = DirectMap::new();
    /// map.insert(0, "zero");
    /// assert_eq!(map.min_key(), -128);
    /// assert!(!map.contains_key(map.min_key()));
    /// ```
    #[must_use]
    pub const fn min_key(&self) -> K {
        K::MIN
    }

    /// Returns the largest key of the domain.
    ///
    /// Like [`min_key`](DirectMap::min_key), this does not depend on the map's contents.
    #[must_use]
    pub const fn max_key(&self) -> K {
        K::MAX
    }
}

impl<K: DirectKey, V: Clone> Clone for DirectMap<K, V, InlineSlots<K, V>> {
    fn clone(&self) -> Self {
        DirectMap {
            raw: or_alloc_failure(self.raw.clone_into_store(InlineSlots::new())),
        }
    }
}

impl<K: DirectKey + Hash, V: Hash, S: Store<V>> Hash for DirectMap<K, V, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K, V, S, T> PartialEq<DirectMap<K, V, T>> for DirectMap<K, V, S>
where
    K: DirectKey,
    V: PartialEq,
    S: Store<V>,
    T: Store<V>,
{
    fn eq(&self, other: &DirectMap<K, V, T>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: DirectKey, V: Eq, S: Store<V>> Eq for DirectMap<K, V, S> {}

impl<K: DirectKey, V: PartialOrd, S: Store<V>> PartialOrd for DirectMap<K, V, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: DirectKey, V: Ord, S: Store<V>> Ord for DirectMap<K, V, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug, S: Store<V>> fmt::Debug for DirectMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: DirectKey, V, S: Store<V> + Default> Default for DirectMap<K, V, S> {
    /// Creates an empty map.
    ///
    /// For provisioned storage, the slot block is acquired on first insertion.
    fn default() -> Self {
        DirectMap::with_store(S::default())
    }
}

impl<K: DirectKey, V, S: Store<V> + Default> FromIterator<(K, V)> for DirectMap<K, V, S> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = DirectMap::default();
        map.extend(iter);
        map
    }
}

impl<K: DirectKey, V, S: Store<V>> Extend<(K, V)> for DirectMap<K, V, S> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: DirectKey, V: Copy, S: Store<V>> Extend<(K, &'a V)> for DirectMap<K, V, S> {
    fn extend<T: IntoIterator<Item = (K, &'a V)>>(&mut self, iter: T) {
        for (k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> IntoIterator for &'a DirectMap<K, V, S> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> IntoIterator for &'a mut DirectMap<K, V, S> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K: DirectKey, V, S: Store<V>> IntoIterator for DirectMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, S>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(2u8, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(self) -> IntoIter<K, V, S> {
        let walk = Ordinals::new(self.raw.presence(), 0, K::DOMAIN);
        IntoIter { raw: self.raw, walk }
    }
}

impl<K: DirectKey, V, S: Store<V>> Index<K> for DirectMap<K, V, S> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: DirectKey, V, const N: usize> From<[(K, V); N]> for DirectMap<K, V> {
    /// Converts a `[(K, V); N]` into a `DirectMap<K, V>` with inline storage.
    ///
    /// If any entries in the array have equal keys, all but one of the corresponding values will
    /// be dropped.
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map1 = DirectMap::from([(1u8, 2), (3, 4)]);
    /// let map2: DirectMap<_, _> = [(1u8, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: DirectKey, V> Iterator for Range<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let ordinal = self.ordinals.next(self.presence)?;
        Some(self.entry(ordinal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ordinals.remaining, Some(self.ordinals.remaining))
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ordinal = self.ordinals.next_back(self.presence)?;
        Some(self.entry(ordinal))
    }
}

impl<K: DirectKey, V> ExactSizeIterator for Range<'_, K, V> {
    fn len(&self) -> usize {
        self.ordinals.remaining
    }
}

impl<K: DirectKey, V> FusedIterator for Range<'_, K, V> {}

impl<K: DirectKey, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            presence: self.presence,
            slots: self.slots,
            ordinals: self.ordinals,
            _marker: PhantomData,
        }
    }
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: DirectKey, V> Iterator for RangeMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let front = self.ordinals.front;
        let ordinal = self.ordinals.next(self.presence)?;
        let slot = self.slots.nth(ordinal - front)?;
        // SAFETY: `ordinal` came from the presence index, which the iterator borrows for its
        // whole lifetime; each slot is yielded at most once.
        Some((K::from_ordinal(ordinal), unsafe { slot.assume_init_mut() }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ordinals.remaining, Some(self.ordinals.remaining))
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for RangeMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let back = self.ordinals.back;
        let ordinal = self.ordinals.next_back(self.presence)?;
        let slot = self.slots.nth_back(back - 1 - ordinal)?;
        // SAFETY: As in `next`.
        Some((K::from_ordinal(ordinal), unsafe { slot.assume_init_mut() }))
    }
}

impl<K: DirectKey, V> ExactSizeIterator for RangeMut<'_, K, V> {
    fn len(&self) -> usize {
        self.ordinals.remaining
    }
}

impl<K: DirectKey, V> FusedIterator for RangeMut<'_, K, V> {}

impl<K: DirectKey, V> fmt::Debug for RangeMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeMut").field("remaining", &self.ordinals.remaining).finish()
    }
}

impl<'a, K: DirectKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K: DirectKey, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V> FusedIterator for Iter<'_, K, V> {}

impl<K: DirectKey, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: DirectKey, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K: DirectKey, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: DirectKey, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.len()).finish()
    }
}

impl<K: DirectKey, V, S: Store<V>> Iterator for IntoIter<K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let ordinal = self.walk.next(self.raw.presence())?;
        self.raw.remove(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<K: DirectKey, V, S: Store<V>> DoubleEndedIterator for IntoIter<K, V, S> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let ordinal = self.walk.next_back(self.raw.presence())?;
        self.raw.remove(ordinal).map(|value| (K::from_ordinal(ordinal), value))
    }
}

impl<K: DirectKey, V, S: Store<V>> ExactSizeIterator for IntoIter<K, V, S> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<K: DirectKey, V, S: Store<V>> FusedIterator for IntoIter<K, V, S> {}

impl<K: DirectKey, V, S: Store<V>> fmt::Debug for IntoIter<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.raw.len()).finish()
    }
}

impl<K: DirectKey, V> Iterator for Keys<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K: DirectKey, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V> FusedIterator for Keys<'_, K, V> {}

impl<K: DirectKey, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: DirectKey + fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: DirectKey, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: DirectKey, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V> FusedIterator for Values<'_, K, V> {}

impl<K: DirectKey, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K: DirectKey, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: DirectKey, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: DirectKey, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K: DirectKey, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.len()).finish()
    }
}

impl<K: DirectKey, V, S: Store<V>> Iterator for IntoKeys<K, V, S> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V, S: Store<V>> DoubleEndedIterator for IntoKeys<K, V, S> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K: DirectKey, V, S: Store<V>> ExactSizeIterator for IntoKeys<K, V, S> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V, S: Store<V>> FusedIterator for IntoKeys<K, V, S> {}

impl<K: DirectKey, V, S: Store<V>> fmt::Debug for IntoKeys<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoKeys").field("remaining", &self.len()).finish()
    }
}

impl<K: DirectKey, V, S: Store<V>> Iterator for IntoValues<K, V, S> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: DirectKey, V, S: Store<V>> DoubleEndedIterator for IntoValues<K, V, S> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: DirectKey, V, S: Store<V>> ExactSizeIterator for IntoValues<K, V, S> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: DirectKey, V, S: Store<V>> FusedIterator for IntoValues<K, V, S> {}

impl<K: DirectKey, V, S: Store<V>> fmt::Debug for IntoValues<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoValues").field("remaining", &self.len()).finish()
    }
}
