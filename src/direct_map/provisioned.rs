use super::DirectMap;
use crate::error::{Error, or_alloc_failure};
use crate::key::DirectKey;
use crate::provider::MemoryProvider;
use crate::raw::RawDirectMap;
use crate::storage::ProvisionedSlots;

impl<K: DirectKey, V, P: MemoryProvider> DirectMap<K, V, ProvisionedSlots<K, V, P>> {
    /// Creates an empty map whose slot block is obtained from `provider`.
    ///
    /// The block for all `D` slots is requested immediately.
    ///
    /// # Panics
    ///
    /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error) if the provider
    /// fails. See [`try_new_in`](DirectMap::try_new_in).
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::{Global, ProvisionedDirectMap};
    ///
    /// let mut map: ProvisionedDirectMap<u16, &str> = ProvisionedDirectMap::new_in(Global);
    /// map.insert(40_000, "a");
    /// assert_eq!(map.capacity(), 65_536);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(D / 64) to zero the presence bitmap, plus one provider request.
    #[must_use]
    pub fn new_in(provider: P) -> Self {
        or_alloc_failure(Self::try_new_in(provider))
    }

    /// Creates an empty map whose slot block is obtained from `provider`, reporting failure
    /// instead of diverging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the provider cannot supply the block, or
    /// [`Error::CapacityOverflow`] if the block would exceed `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use direct_map::{Global, ProvisionedDirectMap};
    ///
    /// let map: ProvisionedDirectMap<u8, String> = ProvisionedDirectMap::try_new_in(Global)?;
    /// assert!(map.is_empty());
    /// # Ok::<(), direct_map::Error>(())
    /// ```
    pub fn try_new_in(provider: P) -> Result<Self, Error> {
        Ok(DirectMap {
            raw: RawDirectMap::new(ProvisionedSlots::try_new_in(provider)?),
        })
    }

    /// Returns a reference to the map's memory provider.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    #[must_use]
    pub const fn provider(&self) -> &P {
        self.raw.store().provider()
    }
}
