//! Direct-addressed ordered maps for Rust.
//!
//! This crate provides [`DirectMap`], an ordered map for keys drawn from a small, densely
//! enumerable domain such as `u8`, `i8` or `bool`. Instead of comparing keys, every key is
//! mapped to its *ordinal* in `[0, D)` and its value lives in slot `ordinal` of a fixed-size
//! store. A presence bitmap records which slots are occupied, and ordered traversal scans that
//! bitmap word by word.
//!
//! - Lookup, insertion and removal are O(1).
//! - [`lower_bound`](DirectMap::lower_bound), [`upper_bound`](DirectMap::upper_bound) and
//!   iteration steps are O(D / 64) in the worst case.
//! - Memory is O(D) regardless of how many entries are present.
//!
//! # Example
//!
//! ```
//! use direct_map::DirectMap;
//!
//! let mut map: DirectMap<u8, &str> = DirectMap::new();
//! *map.get_or_default(b'a') = "42";
//! map.insert(b'\0', "4567854");
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.at(b'a'), Ok(&"42"));
//! assert_eq!(map.upper_bound(b'\t'), map.find(b'a'));
//!
//! // The domain's smallest key is a property of the key type, not of the contents.
//! *map.get_or_default(map.min_key()) = "2";
//! assert_eq!(map.len(), 2);
//! assert_eq!(map[b'\0'], "2");
//! ```
//!
//! # Storage strategies
//!
//! - [`InlineSlots`] (the default) embeds all `D` slots in the map itself. The map never
//!   allocates and is [`Clone`] whenever the value type is. The embedded slots are capped at
//!   [`InlineSlots::MAX_BYTES`], so 16-bit key domains with sized values use provisioned
//!   storage instead.
//! - [`ProvisionedSlots`] obtains the slot block from a [`MemoryProvider`] when the map is
//!   constructed. Such maps are move-only: they do not implement [`Clone`].
//!
//! ```compile_fail
//! use direct_map::{Global, ProvisionedDirectMap};
//!
//! let map: ProvisionedDirectMap<u8, String> = ProvisionedDirectMap::new_in(Global);
//! let copy = map.clone();
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Bit-scanning cursors** - [`Cursor`] and [`CursorMut`] skip absent slots a word at a time
//! - **Familiar API** - Mirrors `std::collections::BTreeMap` where the behaviours coincide

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: Slots are `MaybeUninit<V>` tagged by the presence bitmap, which needs unsafe code.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod error;
mod key;
mod provider;
mod raw;

pub mod direct_map;
pub mod storage;

pub use direct_map::{Cursor, CursorMut, DirectMap, ProvisionedDirectMap};
pub use error::{AllocError, Error};
pub use key::DirectKey;
pub use provider::{Global, MemoryProvider};
pub use storage::{InlineSlots, ProvisionedSlots, Store};
