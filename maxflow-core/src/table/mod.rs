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

//! A chained hash table over fixed-width keys whose bucket array is sized
//! once, at construction.
//!
//! The table never rehashes. Inserting more bindings than the estimate given
//! to [`FixedKeyTable::new`] keeps working, chains just get longer.

mod iter;
mod key;

use std::fmt;

use log::warn;

pub use iter::{IntoIter, Iter};
pub(crate) use key::fold_word;
pub use key::{Bytes, FixedKey};

/// Prime bucket counts, smallest first.
const BUCKET_LADDER: [usize; 23] = [
    509, 1021, 2053, 4093, 8191, 16381, 32771, 65521, 130003, 260003, 520019, 1040021, 2080003,
    4160003, 8320001, 16000057, 32000011, 64000031, 128000003, 256000001, 512000009, 1000000007,
    1999999973,
];

/// Returns the first prime of the ladder exceeding `estimated_len`, or the
/// last rung when the estimate is beyond the ladder.
pub fn bucket_count_for(estimated_len: usize) -> usize {
    BUCKET_LADDER
        .iter()
        .copied()
        .find(|&buckets| buckets > estimated_len)
        .unwrap_or(BUCKET_LADDER[BUCKET_LADDER.len() - 1])
}

/// Returned by [`FixedKeyTable::put`] when the key is already bound. Carries
/// the rejected binding back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> fmt::Display for DuplicateKey<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key is already bound in the table")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for DuplicateKey<K, V> {}

#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Occupied {
        key: K,
        value: V,
        next: Option<usize>,
    },
    Vacant {
        next_free: Option<usize>,
    },
}

/// Hash map from fixed-width keys to values with chained collision resolution.
///
/// Chains are linked through a slot arena; removed slots go onto a free list
/// and are reused by later insertions.
#[derive(Debug, Clone)]
pub struct FixedKeyTable<K, V> {
    heads: Box<[Option<usize>]>,
    slots: Vec<Slot<K, V>>,
    free: Option<usize>,
    len: usize,
}

impl<K: FixedKey, V> FixedKeyTable<K, V> {
    /// Creates an empty table whose bucket count is picked from
    /// `estimated_len`.
    pub fn new(estimated_len: usize) -> Self {
        let buckets = bucket_count_for(estimated_len);
        FixedKeyTable {
            heads: vec![None; buckets].into_boxed_slice(),
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// Width in bytes of every key of this table.
    pub fn key_width(&self) -> usize {
        K::WIDTH
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn bucket(&self, key: &K) -> usize {
        (key.fixed_hash() % self.heads.len() as u64) as usize
    }

    fn find(&self, key: &K) -> Option<usize> {
        let mut cursor = self.heads[self.bucket(key)];
        while let Some(index) = cursor {
            match &self.slots[index] {
                Slot::Occupied {
                    key: bound, next, ..
                } => {
                    if bound == key {
                        return Some(index);
                    }
                    cursor = *next;
                }
                // Chains only link occupied slots.
                Slot::Vacant { .. } => return None,
            }
        }
        None
    }

    /// Binds `key` to `value`.
    ///
    /// Fails if `key` is already bound; the table is left unchanged and the
    /// rejected key and value are handed back.
    pub fn put(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K, V>> {
        if self.find(&key).is_some() {
            return Err(DuplicateKey { key, value });
        }

        let bucket = self.bucket(&key);
        let slot = Slot::Occupied {
            key,
            value,
            next: self.heads[bucket],
        };
        let index = match self.free {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free = next_free;
                }
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.heads[bucket] = Some(index);
        self.len += 1;

        if self.len == self.heads.len() + 1 {
            warn!(
                "fixed-key table holds more bindings than its {} buckets, chains will grow",
                self.heads.len()
            );
        }
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.slots[self.find(key)?] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns the stored key equal to `key`.
    pub fn get_key(&self, key: &K) -> Option<&K> {
        match &self.slots[self.find(key)?] {
            Slot::Occupied { key, .. } => Some(key),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Unbinds `key` and hands the binding back.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let bucket = self.bucket(key);
        let mut previous = None;
        let mut cursor = self.heads[bucket];

        while let Some(index) = cursor {
            let (found, next) = match &self.slots[index] {
                Slot::Occupied {
                    key: bound, next, ..
                } => (bound == key, *next),
                Slot::Vacant { .. } => return None,
            };

            if found {
                match previous {
                    None => self.heads[bucket] = next,
                    Some(previous) => {
                        if let Slot::Occupied { next: link, .. } = &mut self.slots[previous] {
                            *link = next;
                        }
                    }
                }
                let vacated = std::mem::replace(
                    &mut self.slots[index],
                    Slot::Vacant {
                        next_free: self.free,
                    },
                );
                self.free = Some(index);
                self.len -= 1;

                return match vacated {
                    Slot::Occupied { key, value, .. } => Some((key, value)),
                    Slot::Vacant { .. } => None,
                };
            }

            previous = Some(index);
            cursor = next;
        }
        None
    }

    /// Iterates over all bindings in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.heads, &self.slots, self.len)
    }

    /// Visits every value mutably, in no particular order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        })
    }
}

impl<'a, K: FixedKey, V> IntoIterator for &'a FixedKeyTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: FixedKey, V> IntoIterator for FixedKeyTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Drains the table in bucket order, handing every binding back.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.heads, self.slots, self.len)
    }
}
