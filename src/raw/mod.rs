mod bit_index;
mod raw_direct_map;

pub(crate) use bit_index::{BitIndex, Ordinals};
pub(crate) use raw_direct_map::RawDirectMap;
