// Licensed under the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License. You may obtain
// a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations
// under the License.

use std::hash::BuildHasher;

use ahash::RandomState;

/// A key of fixed byte width that can be stored in a
/// [`FixedKeyTable`](super::FixedKeyTable).
///
/// Equality is the compare strategy and [`fixed_hash`](FixedKey::fixed_hash)
/// the hash strategy. Keys of 4, 8, 12 and 16 bytes fold their machine words
/// directly; [`Bytes`] is the byte-wise fallback for any other width.
pub trait FixedKey: Eq {
    /// Width of the key in bytes.
    const WIDTH: usize;

    fn fixed_hash(&self) -> u64;
}

const MULTIPLIER: u64 = 0x517c_c1b7_2722_0a95;

/// Folds one machine word into a running hash.
#[inline]
pub(crate) fn fold_word(hash: u64, word: u64) -> u64 {
    (hash.rotate_left(5) ^ word).wrapping_mul(MULTIPLIER)
}

impl FixedKey for u32 {
    const WIDTH: usize = 4;

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(0, u64::from(*self))
    }
}

impl FixedKey for u64 {
    const WIDTH: usize = 8;

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(0, *self)
    }
}

impl FixedKey for usize {
    const WIDTH: usize = std::mem::size_of::<usize>();

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(0, *self as u64)
    }
}

impl FixedKey for [u32; 3] {
    const WIDTH: usize = 12;

    #[inline]
    fn fixed_hash(&self) -> u64 {
        let low = u64::from(self[0]) | (u64::from(self[1]) << 32);
        fold_word(fold_word(0, low), u64::from(self[2]))
    }
}

impl FixedKey for u128 {
    const WIDTH: usize = 16;

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(fold_word(0, *self as u64), (*self >> 64) as u64)
    }
}

impl FixedKey for [u64; 2] {
    const WIDTH: usize = 16;

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(fold_word(0, self[0]), self[1])
    }
}

/// Raw key of `N` bytes, hashed byte-wise.
///
/// Hashing uses fixed seeds so that the bucket order of a table is the same
/// on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedKey for Bytes<N> {
    const WIDTH: usize = N;

    fn fixed_hash(&self) -> u64 {
        RandomState::with_seeds(
            0x243f_6a88_85a3_08d3,
            0x1319_8a2e_0370_7344,
            0xa409_3822_299f_31d0,
            0x082e_fa98_ec4e_6c89,
        )
        .hash_one(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bytes, FixedKey};

    #[test]
    fn test_widths() {
        assert_eq!(<u32 as FixedKey>::WIDTH, 4);
        assert_eq!(<u64 as FixedKey>::WIDTH, 8);
        assert_eq!(<[u32; 3] as FixedKey>::WIDTH, 12);
        assert_eq!(<u128 as FixedKey>::WIDTH, 16);
        assert_eq!(<Bytes<5> as FixedKey>::WIDTH, 5);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let key = Bytes([1u8, 2, 3, 4, 5]);
        assert_eq!(key.fixed_hash(), Bytes([1u8, 2, 3, 4, 5]).fixed_hash());
        assert_eq!([7u64, 9].fixed_hash(), [7u64, 9].fixed_hash());
    }

    #[test]
    fn test_word_order_matters() {
        assert_ne!([1u64, 2].fixed_hash(), [2u64, 1].fixed_hash());
        assert_ne!([1u32, 2, 3].fixed_hash(), [3u32, 2, 1].fixed_hash());
    }
}
