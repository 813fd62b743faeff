use core::alloc::Layout;

use thiserror::Error;

/// Errors reported by [`DirectMap`](crate::DirectMap) operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The queried key has no entry in the map.
    #[error("no entry found for key with ordinal {ordinal}")]
    KeyNotFound {
        /// Ordinal of the missing key within its domain.
        ordinal: usize,
    },

    /// The memory provider could not supply the slot block.
    #[error("memory provider failed to allocate {layout:?}")]
    AllocationFailure {
        /// Layout of the block that was requested.
        layout: Layout,
    },

    /// A slot block for every key in the domain would exceed `isize::MAX` bytes.
    #[error("slot block for the key domain exceeds `isize::MAX` bytes")]
    CapacityOverflow,
}

/// The error returned by a [`MemoryProvider`](crate::MemoryProvider) that cannot satisfy a
/// request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Error)]
#[error("memory allocation failed")]
pub struct AllocError;

/// Unwraps the result of a slot write for the infallible map methods.
///
/// Allocation failures divert to [`handle_alloc_error`](alloc::alloc::handle_alloc_error), the
/// same way `Vec` and `BTreeMap` fail.
#[inline]
pub(crate) fn or_alloc_failure<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(Error::AllocationFailure { layout }) => alloc::alloc::handle_alloc_error(layout),
        Err(error) => panic!("{error}"),
    }
}
