use core::fmt;
use core::ptr;

use super::DirectMap;
use crate::key::DirectKey;
use crate::storage::{InlineSlots, Store};

/// A bidirectional position over the entries of a [`DirectMap`].
///
/// A cursor rests either on an entry or at the end position, one past the largest key. Stepping
/// skips absent keys by scanning the presence bitmap. Cursors are cheap to copy, and two cursors
/// are equal when they come from the same map and rest on the same position.
///
/// This `struct` is created by [`DirectMap::cursor_first`], [`DirectMap::cursor_end`],
/// [`DirectMap::find`], [`DirectMap::lower_bound`] and [`DirectMap::upper_bound`].
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let map = DirectMap::from([(b'\0', "4567854"), (b'a', "42")]);
///
/// let mut cursor = map.cursor_first();
/// assert_eq!(cursor.key_value(), Some((b'\0', &"4567854")));
/// cursor.move_next();
/// assert_eq!(cursor, map.find(b'a'));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// assert_eq!(cursor, map.cursor_end());
/// ```
pub struct Cursor<'a, K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    map: &'a DirectMap<K, V, S>,
    ordinal: usize,
}

/// A bidirectional position over the entries of a [`DirectMap`] that can modify or remove the
/// entry it rests on.
///
/// This `struct` is created by [`DirectMap::cursor_first_mut`], [`DirectMap::find_mut`] and
/// [`DirectMap::lower_bound_mut`].
///
/// # Examples
///
/// ```
/// use direct_map::DirectMap;
///
/// let mut map: DirectMap<u8, u32> = (0..10).map(|k| (k, u32::from(k))).collect();
///
/// let mut cursor = map.lower_bound_mut(4);
/// while let Some(value) = cursor.value_mut() {
///     *value *= 100;
///     cursor.move_next();
/// }
/// assert_eq!(map[3], 3);
/// assert_eq!(map[9], 900);
/// ```
pub struct CursorMut<'a, K: DirectKey, V, S: Store<V> = InlineSlots<K, V>> {
    map: &'a mut DirectMap<K, V, S>,
    ordinal: usize,
}

/// Returns the ordinal of the first entry after `ordinal`, or the end position.
fn successor<K: DirectKey, V, S: Store<V>>(map: &DirectMap<K, V, S>, ordinal: usize) -> usize {
    assert!(ordinal < K::DOMAIN, "cannot advance a cursor past the end of a DirectMap");
    map.raw.presence().next_set(ordinal + 1).unwrap_or(K::DOMAIN)
}

/// Returns the ordinal of the last entry before `ordinal`.
fn predecessor<K: DirectKey, V, S: Store<V>>(map: &DirectMap<K, V, S>, ordinal: usize) -> usize {
    ordinal
        .checked_sub(1)
        .and_then(|from| map.raw.presence().prev_set(from))
        .expect("cannot retreat a cursor before the first entry of a DirectMap")
}

impl<'a, K: DirectKey, V, S: Store<V>> Cursor<'a, K, V, S> {
    pub(crate) const fn new(map: &'a DirectMap<K, V, S>, ordinal: usize) -> Self {
        Cursor { map, ordinal }
    }

    /// Returns `true` if the cursor rests on the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.ordinal == K::DOMAIN
    }

    /// Returns the ordinal of the position, `K::DOMAIN` for the end position.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the key at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<K> {
        (!self.is_end()).then(|| K::from_ordinal(self.ordinal))
    }

    /// Returns the value at the cursor, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.map.raw.get(self.ordinal)
    }

    /// Returns the entry at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key_value(&self) -> Option<(K, &'a V)> {
        self.value().map(|value| (K::from_ordinal(self.ordinal), value))
    }

    /// Moves to the next entry in key order, or to the end position after the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor already rests on the end position.
    ///
    /// # Complexity
    ///
    /// O(D / 64) in the worst case.
    pub fn move_next(&mut self) {
        self.ordinal = successor(self.map, self.ordinal);
    }

    /// Moves to the previous entry in key order. From the end position this is the last entry.
    ///
    /// # Panics
    ///
    /// Panics if there is no entry before the cursor, including when the map is empty.
    ///
    /// # Complexity
    ///
    /// O(D / 64) in the worst case.
    pub fn move_prev(&mut self) {
        self.ordinal = predecessor(self.map, self.ordinal);
    }
}

impl<K: DirectKey, V, S: Store<V>> Clone for Cursor<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: DirectKey, V, S: Store<V>> Copy for Cursor<'_, K, V, S> {}

impl<K: DirectKey, V, S: Store<V>> PartialEq for Cursor<'_, K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.ordinal == other.ordinal
    }
}

impl<K: DirectKey, V, S: Store<V>> Eq for Cursor<'_, K, V, S> {}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug, S: Store<V>> fmt::Debug for Cursor<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("ordinal", &self.ordinal).field("entry", &self.key_value()).finish()
    }
}

impl<'a, K: DirectKey, V, S: Store<V>> CursorMut<'a, K, V, S> {
    pub(crate) const fn new(map: &'a mut DirectMap<K, V, S>, ordinal: usize) -> Self {
        CursorMut { map, ordinal }
    }

    /// Returns `true` if the cursor rests on the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.ordinal == K::DOMAIN
    }

    /// Returns the ordinal of the position, `K::DOMAIN` for the end position.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the key at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<K> {
        (!self.is_end()).then(|| K::from_ordinal(self.ordinal))
    }

    /// Returns the value at the cursor, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.map.raw.get(self.ordinal)
    }

    /// Returns the value at the cursor mutably, or `None` at the end position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.map.raw.get_mut(self.ordinal)
    }

    /// Converts the cursor into a mutable reference to the value it rests on.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        self.map.raw.get_mut(self.ordinal)
    }

    /// Returns the entry at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key_value(&self) -> Option<(K, &V)> {
        self.value().map(|value| (K::from_ordinal(self.ordinal), value))
    }

    /// Moves to the next entry in key order, or to the end position after the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor already rests on the end position.
    pub fn move_next(&mut self) {
        self.ordinal = successor(self.map, self.ordinal);
    }

    /// Moves to the previous entry in key order. From the end position this is the last entry.
    ///
    /// # Panics
    ///
    /// Panics if there is no entry before the cursor, including when the map is empty.
    pub fn move_prev(&mut self) {
        self.ordinal = predecessor(self.map, self.ordinal);
    }

    /// Removes the entry at the cursor and moves to the entry after it.
    ///
    /// Returns `None` and stays put at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let mut map = DirectMap::from([(1u8, "a"), (2, "b"), (3, "c")]);
    ///
    /// let mut cursor = map.find_mut(2);
    /// assert_eq!(cursor.remove_current(), Some((2, "b")));
    /// assert_eq!(cursor.key(), Some(3));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let value = self.map.raw.remove(self.ordinal)?;
        let key = K::from_ordinal(self.ordinal);
        self.ordinal = successor(self.map, self.ordinal);
        Some((key, value))
    }

    /// Returns a read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self.map, self.ordinal)
    }
}

impl<K: DirectKey + fmt::Debug, V: fmt::Debug, S: Store<V>> fmt::Debug for CursorMut<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("ordinal", &self.ordinal).field("entry", &self.key_value()).finish()
    }
}

impl<K: DirectKey, V, S: Store<V>> DirectMap<K, V, S> {
    /// Returns a cursor on the first entry, or at the end position if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(D / 64) in the worst case.
    pub fn cursor_first(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.raw.presence().first_set().unwrap_or(K::DOMAIN))
    }

    /// Returns a cursor at the end position, one past the last entry.
    pub fn cursor_end(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, K::DOMAIN)
    }

    /// Returns a cursor on `key`, or at the end position if the key has no entry.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(b'a', 1)]);
    /// assert_eq!(map.find(b'a').value(), Some(&1));
    /// assert!(map.find(b'b').is_end());
    /// ```
    pub fn find(&self, key: K) -> Cursor<'_, K, V, S> {
        let ordinal = key.to_ordinal();
        Cursor::new(self, if self.raw.contains(ordinal) { ordinal } else { K::DOMAIN })
    }

    /// Returns a cursor on the first entry whose key is not less than `key`, or at the end
    /// position if there is none.
    ///
    /// # Complexity
    ///
    /// O(D / 64) in the worst case.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(10u8, "x"), (20, "y")]);
    /// assert_eq!(map.lower_bound(10).key(), Some(10));
    /// assert_eq!(map.lower_bound(11).key(), Some(20));
    /// assert!(map.lower_bound(21).is_end());
    /// ```
    pub fn lower_bound(&self, key: K) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.raw.presence().next_set(key.to_ordinal()).unwrap_or(K::DOMAIN))
    }

    /// Returns a cursor on the first entry whose key is greater than `key`, or at the end
    /// position if there is none.
    ///
    /// # Complexity
    ///
    /// O(D / 64) in the worst case.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::DirectMap;
    ///
    /// let map = DirectMap::from([(10u8, "x"), (20, "y")]);
    /// assert_eq!(map.upper_bound(10).key(), Some(20));
    /// assert!(map.upper_bound(20).is_end());
    /// assert!(map.upper_bound(u8::MAX).is_end());
    /// ```
    pub fn upper_bound(&self, key: K) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.raw.presence().next_set(key.to_ordinal() + 1).unwrap_or(K::DOMAIN))
    }

    /// Returns a mutable cursor on the first entry, or at the end position if the map is empty.
    pub fn cursor_first_mut(&mut self) -> CursorMut<'_, K, V, S> {
        let ordinal = self.raw.presence().first_set().unwrap_or(K::DOMAIN);
        CursorMut::new(self, ordinal)
    }

    /// Returns a mutable cursor on `key`, or at the end position if the key has no entry.
    pub fn find_mut(&mut self, key: K) -> CursorMut<'_, K, V, S> {
        let ordinal = key.to_ordinal();
        let ordinal = if self.raw.contains(ordinal) { ordinal } else { K::DOMAIN };
        CursorMut::new(self, ordinal)
    }

    /// Returns a mutable cursor on the first entry whose key is not less than `key`, or at the
    /// end position if there is none.
    pub fn lower_bound_mut(&mut self, key: K) -> CursorMut<'_, K, V, S> {
        let ordinal = self.raw.presence().next_set(key.to_ordinal()).unwrap_or(K::DOMAIN);
        CursorMut::new(self, ordinal)
    }
}
