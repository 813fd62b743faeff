//! Slot storage strategies for [`DirectMap`](crate::DirectMap).
//!
//! A map keeps one slot per key in its domain. The slots are [`MaybeUninit`] cells: the map's
//! presence bitmap records which of them hold a live value, and the map alone writes, reads and
//! drops slot values. A storage strategy only decides *where* the cells live.
//!
//! - [`InlineSlots`] embeds the cells in the map.
//! - [`ProvisionedSlots`] obtains them from a [`MemoryProvider`].

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

use crate::error::Error;
use crate::key::DirectKey;
use crate::provider::{Global, MemoryProvider};

/// Storage for the value slots of a [`DirectMap`](crate::DirectMap).
///
/// # Safety
///
/// Once [`acquire`](Store::acquire) has returned `Ok`, [`slots`](Store::slots) and
/// [`slots_mut`](Store::slots_mut) must return the same cells, exactly `D` of them, until the
/// store is dropped or moved. Before acquisition both may return an empty slice. The store must
/// never read, write or drop the contents of a cell.
pub unsafe trait Store<V> {
    /// Returns the slot cells, or an empty slice if no storage has been acquired.
    fn slots(&self) -> &[MaybeUninit<V>];

    /// Returns the slot cells, or an empty slice if no storage has been acquired.
    fn slots_mut(&mut self) -> &mut [MaybeUninit<V>];

    /// Ensures the slot cells exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityOverflow`] if storage could not
    /// be obtained.
    fn acquire(&mut self) -> Result<(), Error>;
}

/// Slot cells embedded directly in the map.
///
/// Maps using this strategy never allocate, and are [`Clone`] whenever their values are.
///
/// The cells travel with the map, through every move and every stack frame that holds it, so
/// their combined size is capped at [`MAX_BYTES`](InlineSlots::MAX_BYTES). Naming a strategy
/// whose cells exceed the cap fails to build. In practice 16-bit key domains need
/// [`ProvisionedSlots`] unless their values are zero-sized.
///
/// ```compile_fail
/// use direct_map::InlineSlots;
///
/// // 65 536 cells of 8 bytes each.
/// let slots: InlineSlots<u16, u64> = InlineSlots::new();
/// ```
pub struct InlineSlots<K: DirectKey, V> {
    slots: K::Array<MaybeUninit<V>>,
}

impl<K: DirectKey, V> InlineSlots<K, V> {
    /// The largest cell block, in bytes, that may be embedded in a map.
    pub const MAX_BYTES: usize = 32 * 1024;

    /// Returns a block of uninitialized cells.
    ///
    /// Fails to build if the block for `K`'s domain exceeds [`MAX_BYTES`](InlineSlots::MAX_BYTES).
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(
                core::mem::size_of::<K::Array<MaybeUninit<V>>>() <= Self::MAX_BYTES,
                "inline slots for this key domain exceed `InlineSlots::MAX_BYTES`; use `ProvisionedDirectMap`",
            );
        }
        Self {
            slots: K::uninit_array(),
        }
    }
}

impl<K: DirectKey, V> Default for InlineSlots<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DirectKey, V> fmt::Debug for InlineSlots<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineSlots").field("slots", &K::DOMAIN).finish()
    }
}

// SAFETY: The cells are a field of `self` and always number `K::DOMAIN`.
unsafe impl<K: DirectKey, V> Store<V> for InlineSlots<K, V> {
    #[inline]
    fn slots(&self) -> &[MaybeUninit<V>] {
        self.slots.as_ref()
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [MaybeUninit<V>] {
        self.slots.as_mut()
    }

    #[inline]
    fn acquire(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Slot cells obtained from a [`MemoryProvider`].
///
/// The block is requested once, when storage is acquired, and returned to the provider when the
/// store is dropped. Maps using this strategy are move-only; they do not implement [`Clone`].
///
/// A default-constructed store holds no block yet and acquires one on first use.
pub struct ProvisionedSlots<K: DirectKey, V, P: MemoryProvider = Global> {
    ptr: Option<NonNull<MaybeUninit<V>>>,
    provider: P,
    _marker: PhantomData<(fn() -> K, MaybeUninit<V>)>,
}

// SAFETY: The store owns its block exclusively; sharing it is sharing `V`s and `P`.
unsafe impl<K: DirectKey, V: Send, P: MemoryProvider + Send> Send for ProvisionedSlots<K, V, P> {}
unsafe impl<K: DirectKey, V: Sync, P: MemoryProvider + Sync> Sync for ProvisionedSlots<K, V, P> {}

impl<K: DirectKey, V, P: MemoryProvider> ProvisionedSlots<K, V, P> {
    /// Returns a store that will obtain its block from `provider`, without acquiring it yet.
    pub const fn unacquired_in(provider: P) -> Self {
        Self {
            ptr: None,
            provider,
            _marker: PhantomData,
        }
    }

    /// Returns a store holding a block obtained from `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the provider cannot supply the block, or
    /// [`Error::CapacityOverflow`] if the block would exceed `isize::MAX` bytes.
    pub fn try_new_in(provider: P) -> Result<Self, Error> {
        let mut slots = Self::unacquired_in(provider);
        slots.acquire()?;
        Ok(slots)
    }

    /// Returns a reference to the memory provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns `true` if the block has been obtained.
    pub const fn is_acquired(&self) -> bool {
        self.ptr.is_some()
    }

    pub(crate) fn layout() -> Result<Layout, Error> {
        Layout::array::<V>(K::DOMAIN).map_err(|_| Error::CapacityOverflow)
    }
}

impl<K: DirectKey, V, P: MemoryProvider + Default> Default for ProvisionedSlots<K, V, P> {
    fn default() -> Self {
        Self::unacquired_in(P::default())
    }
}

impl<K: DirectKey, V, P: MemoryProvider + fmt::Debug> fmt::Debug for ProvisionedSlots<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedSlots")
            .field("slots", &if self.is_acquired() { K::DOMAIN } else { 0 })
            .field("provider", &self.provider)
            .finish()
    }
}

// SAFETY: `ptr` is set once by `acquire` to a block of `K::DOMAIN` cells and only released on
// drop.
unsafe impl<K: DirectKey, V, P: MemoryProvider> Store<V> for ProvisionedSlots<K, V, P> {
    #[inline]
    fn slots(&self) -> &[MaybeUninit<V>] {
        match self.ptr {
            // SAFETY: An acquired block holds `K::DOMAIN` cells; `MaybeUninit` needs no
            // initialization.
            Some(ptr) => unsafe { core::slice::from_raw_parts(ptr.as_ptr(), K::DOMAIN) },
            None => &[],
        }
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [MaybeUninit<V>] {
        match self.ptr {
            // SAFETY: As above, and `&mut self` guarantees exclusive access to the block.
            Some(ptr) => unsafe { core::slice::from_raw_parts_mut(ptr.as_ptr(), K::DOMAIN) },
            None => &mut [],
        }
    }

    fn acquire(&mut self) -> Result<(), Error> {
        if self.ptr.is_some() {
            return Ok(());
        }

        let layout = Self::layout()?;
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            self.provider
                .allocate(layout)
                .map_err(|_| {
                    log::debug!("memory provider refused a {} byte slot block", layout.size());
                    Error::AllocationFailure { layout }
                })?
                .cast()
        };

        log::trace!("acquired a {} byte slot block for {} keys", layout.size(), K::DOMAIN);
        self.ptr = Some(ptr);
        Ok(())
    }
}

impl<K: DirectKey, V, P: MemoryProvider> Drop for ProvisionedSlots<K, V, P> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr.take() else {
            return;
        };

        // A block was acquired, so its layout was computed successfully once already.
        let Ok(layout) = Self::layout() else {
            return;
        };
        if layout.size() != 0 {
            log::trace!("releasing a {} byte slot block", layout.size());
            // SAFETY: `ptr` came from `allocate` on this provider with this layout.
            unsafe { self.provider.deallocate(ptr.cast(), layout) }
        }
    }
}
