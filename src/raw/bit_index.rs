const WORD_BITS: usize = u64::BITS as usize;

/// A packed presence bitmap with successor/predecessor scans.
///
/// `W` is any fixed buffer of `u64` words; bit `i` lives in word `i / 64` at position `i % 64`.
/// The population is tracked alongside the words so that [`count`](BitIndex::count) is O(1).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BitIndex<W> {
    words: W,
    count: usize,
}

impl<W: AsRef<[u64]> + AsMut<[u64]>> BitIndex<W> {
    /// Wraps a zeroed word buffer.
    pub(crate) fn new(words: W) -> Self {
        debug_assert!(words.as_ref().iter().all(|&word| word == 0), "`BitIndex::new()` - `words` is not zeroed!");
        Self { words, count: 0 }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.words.as_ref().len() * WORD_BITS
    }

    #[inline]
    pub(crate) const fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn test(&self, bit: usize) -> bool {
        self.words.as_ref().get(bit / WORD_BITS).is_some_and(|word| (word >> (bit % WORD_BITS)) & 1 != 0)
    }

    /// Sets `bit`, returning `true` if it was previously clear.
    #[inline]
    pub(crate) fn set(&mut self, bit: usize) -> bool {
        let word = &mut self.words.as_mut()[bit / WORD_BITS];
        let mask = 1 << (bit % WORD_BITS);
        let fresh = *word & mask == 0;
        *word |= mask;
        self.count += usize::from(fresh);
        fresh
    }

    /// Clears `bit`, returning `true` if it was previously set.
    #[inline]
    pub(crate) fn clear(&mut self, bit: usize) -> bool {
        let Some(word) = self.words.as_mut().get_mut(bit / WORD_BITS) else {
            return false;
        };
        let mask = 1 << (bit % WORD_BITS);
        let was_set = *word & mask != 0;
        *word &= !mask;
        self.count -= usize::from(was_set);
        was_set
    }

    pub(crate) fn clear_all(&mut self) {
        self.words.as_mut().fill(0);
        self.count = 0;
    }

    #[inline]
    pub(crate) fn first_set(&self) -> Option<usize> {
        self.next_set(0)
    }

    #[inline]
    pub(crate) fn last_set(&self) -> Option<usize> {
        self.prev_set(usize::MAX)
    }

    /// Returns the smallest set bit at or after `from`.
    pub(crate) fn next_set(&self, from: usize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let words = self.words.as_ref();
        let mut index = from / WORD_BITS;
        let mut word = *words.get(index)? & (u64::MAX << (from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(index * WORD_BITS + word.trailing_zeros() as usize);
            }
            index += 1;
            word = *words.get(index)?;
        }
    }

    /// Returns the largest set bit at or before `from`.
    ///
    /// `from` is clamped to the last bit of the buffer.
    pub(crate) fn prev_set(&self, from: usize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let words = self.words.as_ref();
        let from = from.min(words.len() * WORD_BITS - 1);
        let mut index = from / WORD_BITS;
        let mut word = words[index] & (u64::MAX >> (WORD_BITS - 1 - from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(index * WORD_BITS + (WORD_BITS - 1 - word.leading_zeros() as usize));
            }
            index = index.checked_sub(1)?;
            word = words[index];
        }
    }

    /// Returns the number of set bits in `start..end`.
    pub(crate) fn count_range(&self, start: usize, end: usize) -> usize {
        let end = end.min(self.capacity());
        if start >= end || self.count == 0 {
            return 0;
        }

        let (first, last) = (start / WORD_BITS, (end - 1) / WORD_BITS);
        let low = u64::MAX << (start % WORD_BITS);
        let high = u64::MAX >> (WORD_BITS - 1 - (end - 1) % WORD_BITS);

        self.words.as_ref()[first..=last]
            .iter()
            .enumerate()
            .map(|(offset, &word)| {
                let mut word = word;
                if offset == 0 {
                    word &= low;
                }
                if first + offset == last {
                    word &= high;
                }
                word.count_ones() as usize
            })
            .sum()
    }
}

/// A double-ended walk over the set bits of `front..back`.
///
/// The walk does not borrow the index: every step takes it as an argument, which lets mutable
/// iterators hold the index and the slots they yield from as separate borrows. `remaining` is
/// computed up front, so a walk over an index that is not mutated in between yields exactly
/// `remaining` ordinals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ordinals {
    pub(crate) front: usize,
    pub(crate) back: usize,
    pub(crate) remaining: usize,
}

impl Ordinals {
    pub(crate) fn new<W: AsRef<[u64]> + AsMut<[u64]>>(index: &BitIndex<W>, front: usize, back: usize) -> Self {
        Self {
            front,
            back,
            remaining: index.count_range(front, back),
        }
    }

    #[inline]
    pub(crate) fn next<W: AsRef<[u64]> + AsMut<[u64]>>(&mut self, index: &BitIndex<W>) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let ordinal = index.next_set(self.front).expect("`Ordinals::next()` - walk overran its span!");
        debug_assert!(ordinal < self.back, "`Ordinals::next()` - walk overran its span!");
        self.front = ordinal + 1;
        self.remaining -= 1;
        Some(ordinal)
    }

    #[inline]
    pub(crate) fn next_back<W: AsRef<[u64]> + AsMut<[u64]>>(&mut self, index: &BitIndex<W>) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let ordinal = index.prev_set(self.back - 1).expect("`Ordinals::next_back()` - walk overran its span!");
        debug_assert!(ordinal >= self.front, "`Ordinals::next_back()` - walk overran its span!");
        self.back = ordinal;
        self.remaining -= 1;
        Some(ordinal)
    }
}
