use core::fmt;
use core::mem::MaybeUninit;

/// A key drawn from a small, densely enumerable, totally ordered domain.
///
/// Implementors provide an order-preserving bijection between the key type and the ordinals
/// `[0, DOMAIN)`: for any keys `a` and `b`, `a < b` if and only if
/// `a.to_ordinal() < b.to_ordinal()`, and `K::from_ordinal(k.to_ordinal()) == k`.
///
/// The trait is implemented for `bool`, `u8`, `i8`, `u16` and `i16`. Field-less enums are
/// natural candidates for user implementations:
///
/// ```
/// use core::mem::MaybeUninit;
/// use direct_map::{DirectKey, DirectMap};
///
/// #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
/// enum Suit {
///     Clubs,
///     Diamonds,
///     Hearts,
///     Spades,
/// }
///
/// impl DirectKey for Suit {
///     const DOMAIN: usize = 4;
///     const MIN: Self = Suit::Clubs;
///     const MAX: Self = Suit::Spades;
///     const EMPTY_WORDS: Self::Words = [0];
///
///     type Array<T> = [T; 4];
///     type Words = [u64; 1];
///
///     fn to_ordinal(self) -> usize {
///         self as usize
///     }
///
///     fn from_ordinal(ordinal: usize) -> Self {
///         [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades][ordinal]
///     }
///
///     fn uninit_array<T>() -> Self::Array<MaybeUninit<T>> {
///         [const { MaybeUninit::uninit() }; 4]
///     }
/// }
///
/// let mut tricks = DirectMap::new();
/// tricks.insert(Suit::Spades, 3);
/// tricks.insert(Suit::Clubs, 1);
/// assert_eq!(tricks.first_key_value(), Some((Suit::Clubs, &1)));
/// ```
pub trait DirectKey: Copy + Ord {
    /// The number of distinct keys, `D`.
    const DOMAIN: usize;

    /// The key with ordinal `0`.
    const MIN: Self;

    /// The key with ordinal `DOMAIN - 1`.
    const MAX: Self;

    /// An all-zero presence word buffer.
    const EMPTY_WORDS: Self::Words;

    /// An array of exactly `DOMAIN` elements.
    type Array<T>: AsRef<[T]> + AsMut<[T]>;

    /// A buffer of at least `DOMAIN` bits.
    type Words: AsRef<[u64]> + AsMut<[u64]> + Copy + Eq + fmt::Debug;

    /// Returns the ordinal of `self` within the domain.
    fn to_ordinal(self) -> usize;

    /// Returns the key with the given ordinal.
    ///
    /// Callers only pass ordinals below `DOMAIN`.
    fn from_ordinal(ordinal: usize) -> Self;

    /// Returns an array of `DOMAIN` uninitialized slots.
    fn uninit_array<T>() -> Self::Array<MaybeUninit<T>>;
}

impl DirectKey for bool {
    const DOMAIN: usize = 2;
    const MIN: Self = false;
    const MAX: Self = true;
    const EMPTY_WORDS: Self::Words = [0];

    type Array<T> = [T; 2];
    type Words = [u64; 1];

    #[inline]
    fn to_ordinal(self) -> usize {
        usize::from(self)
    }

    #[inline]
    fn from_ordinal(ordinal: usize) -> Self {
        debug_assert!(ordinal < Self::DOMAIN, "`bool::from_ordinal()` - `ordinal` out of domain!");
        ordinal != 0
    }

    fn uninit_array<T>() -> Self::Array<MaybeUninit<T>> {
        [const { MaybeUninit::uninit() }; 2]
    }
}

macro_rules! impl_direct_key {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {$(
        impl DirectKey for $ty {
            const DOMAIN: usize = 1 << <$ty>::BITS;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const EMPTY_WORDS: Self::Words = [0; (1 << <$ty>::BITS) / 64];

            type Array<T> = [T; 1 << <$ty>::BITS];
            type Words = [u64; (1 << <$ty>::BITS) / 64];

            // Flipping the sign bit maps `MIN..=MAX` onto `0..DOMAIN` in order.
            #[inline]
            #[allow(clippy::cast_sign_loss)]
            fn to_ordinal(self) -> usize {
                ((self as $unsigned) ^ (<$ty>::MIN as $unsigned)) as usize
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn from_ordinal(ordinal: usize) -> Self {
                debug_assert!(
                    ordinal < Self::DOMAIN,
                    concat!("`", stringify!($ty), "::from_ordinal()` - `ordinal` out of domain!")
                );
                ((ordinal as $unsigned) ^ (<$ty>::MIN as $unsigned)) as $ty
            }

            fn uninit_array<T>() -> Self::Array<MaybeUninit<T>> {
                [const { MaybeUninit::uninit() }; 1 << <$ty>::BITS]
            }
        }
    )*};
}

impl_direct_key! {
    u8 => u8,
    i8 => u8,
    u16 => u16,
    i16 => u16,
}
