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

use std::iter::FusedIterator;

use super::Slot;

/// Borrowing iterator over the bindings of a
/// [`FixedKeyTable`](super::FixedKeyTable), bucket by bucket.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    heads: &'a [Option<usize>],
    slots: &'a [Slot<K, V>],
    bucket: usize,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(heads: &'a [Option<usize>], slots: &'a [Slot<K, V>], len: usize) -> Self {
        Iter {
            heads,
            slots,
            bucket: 0,
            cursor: None,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            match self.cursor {
                Some(index) => match &self.slots[index] {
                    Slot::Occupied { key, value, next } => {
                        self.cursor = *next;
                        self.remaining -= 1;
                        return Some((key, value));
                    }
                    Slot::Vacant { .. } => self.cursor = None,
                },
                None => {
                    self.cursor = *self.heads.get(self.bucket)?;
                    self.bucket += 1;
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Owning iterator that drains a [`FixedKeyTable`](super::FixedKeyTable)
/// bucket by bucket.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    heads: Box<[Option<usize>]>,
    slots: Vec<Slot<K, V>>,
    bucket: usize,
    cursor: Option<usize>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(heads: Box<[Option<usize>]>, slots: Vec<Slot<K, V>>, len: usize) -> Self {
        IntoIter {
            heads,
            slots,
            bucket: 0,
            cursor: None,
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            match self.cursor {
                Some(index) => {
                    let taken = std::mem::replace(
                        &mut self.slots[index],
                        Slot::Vacant { next_free: None },
                    );
                    match taken {
                        Slot::Occupied { key, value, next } => {
                            self.cursor = next;
                            self.remaining -= 1;
                            return Some((key, value));
                        }
                        Slot::Vacant { .. } => self.cursor = None,
                    }
                }
                None => {
                    self.cursor = *self.heads.get(self.bucket)?;
                    self.bucket += 1;
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
