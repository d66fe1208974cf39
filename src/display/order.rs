//! Drawing order: an indexed sequence of layers with one-pass or cyclic traversal.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MinimalError, MinimalResult};

/// How a traversal behaves at the end of an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Stop at the last item.
    #[default]
    Once,
    /// Wrap around to the first item forever.
    Cycle,
}

impl Traversal {
    /// Accepted names.
    pub const NAMES: [&'static str; 2] = ["once", "cycle"];
}

impl FromStr for Traversal {
    type Err = MinimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Traversal::Once),
            "cycle" => Ok(Traversal::Cycle),
            other => Err(MinimalError::invalid_argument(other, &Self::NAMES)),
        }
    }
}

/// Read position into an order; `0 <= index <= len` between pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    mode: Traversal,
}

impl Cursor {
    /// Cursor at the first item.
    pub fn new(mode: Traversal) -> Self {
        Self { index: 0, mode }
    }

    /// Index the next pull will return.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Traversal mode fixed at creation.
    pub fn mode(&self) -> Traversal {
        self.mode
    }

    /// Back to the first item.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Pull the next index for an order of `len` items.
    ///
    /// `Once` returns `None` at the end and rewinds, so a later pull starts over.
    /// `Cycle` wraps to 0; an empty order yields nothing in either mode.
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        if self.index >= len {
            self.index = 0;
            if self.mode == Traversal::Once || len == 0 {
                return None;
            }
        }
        let index = self.index;
        self.index += 1;
        Some(index)
    }
}

/// Ordered, index-addressable drawing list.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<T> {
    items: Vec<T>,
}

impl<T> Default for Order<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Order<T> {
    /// Empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert one item before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, item: T) -> MinimalResult<()> {
        if index > self.items.len() {
            return Err(MinimalError::validation(format!(
                "insert index {index} is past the end of an order of {}",
                self.items.len()
            )));
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Append many items in sequence.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Insert `items[k]` at `indices[k]`, one after another.
    ///
    /// Each insert sees the order as left by the previous one. Nothing is inserted when
    /// the lengths differ or an index would be out of range at its turn.
    pub fn extend_at(&mut self, items: Vec<T>, indices: &[usize]) -> MinimalResult<()> {
        if items.len() != indices.len() {
            return Err(MinimalError::validation(format!(
                "{} items but {} indices",
                items.len(),
                indices.len()
            )));
        }
        let mut len = self.items.len();
        for &index in indices {
            if index > len {
                return Err(MinimalError::validation(format!(
                    "insert index {index} is past the end of an order of {len}"
                )));
            }
            len += 1;
        }
        for (item, &index) in items.into_iter().zip(indices) {
            self.items.insert(index, item);
        }
        Ok(())
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when no items were added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in drawing order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable items in drawing order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Keep only the items matching `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Sequential pull over the items; `mode` is fixed for the whole traversal.
    pub fn traverse(&self, mode: Traversal) -> Traverse<'_, T> {
        Traverse {
            items: &self.items,
            cursor: Cursor::new(mode),
        }
    }
}

impl<T> FromIterator<T> for Order<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Order<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`Order::traverse`].
#[derive(Debug, Clone)]
pub struct Traverse<'a, T> {
    items: &'a [T],
    cursor: Cursor,
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.cursor.next_index(self.items.len())?;
        self.items.get(index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/order.rs"]
mod tests;
