//! A singly linked sequence of key-value entries with unique keys.
//!
//! Entries keep their insertion order. The sequence supports slicing ([`Sequence::trim`])
//! and merging (`&a + &b`, [`Sequence::combine`]), both producing new sequences.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Add;

use log::{debug, warn};

use crate::error::{Error, Result};

/// A singly linked sequence of key-value entries with unique keys.
///
/// ```
/// use avl_dictionary::Sequence;
/// let mut sequence = Sequence::new();
/// sequence.push_back(0, "Jerzy");
/// sequence.push_back(1, "Stefan");
/// sequence.push_back(2, "Weronika");
/// let trimmed = sequence.trim(1, 1);
/// assert_eq!(trimmed.to_string(), "{1: Stefan}");
/// ```
pub struct Sequence<K, V> {
    head: Link<K, V>,
    len: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

/// An iterator over the entries of a sequence, front to back.
pub struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
    len: usize,
}

impl<K, V> Sequence<K, V> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns true if the sequence contains no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of entries in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        // Unlink iteratively, dropping a long chain recursively would exhaust the stack
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Gets an iterator over the entries, front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
            len: self.len,
        }
    }

    /// Copies the entries at positions `index..index + length` into a new sequence.
    ///
    /// The range is clamped to the end of the sequence. A zero `length` or an `index`
    /// past the end yields an empty sequence.
    pub fn trim(&self, index: usize, length: usize) -> Self
    where
        K: Clone,
        V: Clone,
    {
        if length == 0 {
            warn!("trim: length must be positive, returning an empty sequence");
            return Self::new();
        }
        if index > self.len {
            warn!(
                "trim: index {} out of bounds for length {}, returning an empty sequence",
                index, self.len
            );
            return Self::new();
        }

        let mut trimmed = Self::new();
        trimmed.append_unchecked(
            self.iter()
                .skip(index)
                .take(length)
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        if trimmed.is_empty() {
            warn!("trim: trimmed sequence is empty");
        }
        trimmed
    }

    /// Like [`Sequence::trim`], but fails with [`Error::IndexOutOfBounds`] if `index`
    /// is past the end of the sequence.
    pub fn try_trim(&self, index: usize, length: usize) -> Result<Self>
    where
        K: Clone,
        V: Clone,
    {
        if index > self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(self.trim(index, length))
    }

    // Appends entries at the tail without checking key uniqueness.
    fn append_unchecked<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        for (key, value) in entries {
            let node = link.insert(Node::create(key, value));
            link = &mut node.next;
            self.len += 1;
        }
    }
}

impl<K: PartialEq, V> Sequence<K, V> {
    /// Appends an entry at the end of the sequence.
    ///
    /// If an entry with the same key exists the sequence is left unchanged.
    /// Returns whether the entry was appended.
    pub fn push_back(&mut self, key: K, value: V) -> bool {
        let mut link = &mut self.head;
        while let Some(node) = link {
            if node.key == key {
                debug!("push_back: key already present, entry not added");
                return false;
            }
            link = &mut node.next;
        }
        *link = Some(Node::create(key, value));
        self.len += 1;
        true
    }

    /// Appends an entry at the end of the sequence.
    /// Fails with [`Error::DuplicateKey`] if an entry with the same key exists.
    pub fn try_push_back(&mut self, key: K, value: V) -> Result<()> {
        if self.push_back(key, value) {
            Ok(())
        } else {
            Err(Error::DuplicateKey)
        }
    }

    /// Returns a reference to the value stored under the key.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.iter()
            .find(|(entry_key, _)| (*entry_key).borrow() == key)
            .map(|(_, value)| value)
    }

    /// Returns true if the sequence contains the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes the entry with the key and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let Some(index) = self
            .iter()
            .position(|(entry_key, _)| entry_key.borrow() == key)
        else {
            debug!("remove: key not present");
            return None;
        };

        let mut link = &mut self.head;
        for _ in 0..index {
            link = &mut link.as_mut()?.next;
        }
        let node = *link.take()?;
        *link = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Builds `first[index1..index1 + length1] + second[index2..index2 + length2]`
    /// and trims the result to at most `max_length` entries.
    pub fn combine(
        first: &Self,
        index1: usize,
        length1: usize,
        second: &Self,
        index2: usize,
        length2: usize,
        max_length: usize,
    ) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let combined = &first.trim(index1, length1) + &second.trim(index2, length2);
        combined.trim(0, max_length)
    }
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            next: None,
        })
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.len -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a Sequence<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Concatenates two sequences.
/// Entries of the right-hand side whose key is already present are skipped.
impl<K: PartialEq + Clone, V: Clone> Add for &Sequence<K, V> {
    type Output = Sequence<K, V>;

    fn add(self, other: Self) -> Sequence<K, V> {
        let mut combined = self.clone();
        for (key, value) in other {
            if combined.contains_key(key) {
                warn!("concatenation: skipping entry with duplicate key");
                continue;
            }
            combined.append_unchecked([(key.clone(), value.clone())]);
        }
        combined
    }
}

impl<K, V> Drop for Sequence<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Default for Sequence<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for Sequence<K, V> {
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        cloned.append_unchecked(self.iter().map(|(key, value)| (key.clone(), value.clone())));
        cloned
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Sequence<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Sequence<K, V> {}

impl<K: PartialEq, V> FromIterator<(K, V)> for Sequence<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl<K: PartialEq, V> Extend<(K, V)> for Sequence<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push_back(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Sequence<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Sequence<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::Sequence;
    use crate::Error;

    fn names() -> Sequence<i32, String> {
        ["Jerzy", "Stefan", "Weronika", "Ania"]
            .iter()
            .enumerate()
            .map(|(key, name)| (key as i32, name.to_string()))
            .collect()
    }

    fn keys(sequence: &Sequence<i32, String>) -> Vec<i32> {
        sequence.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_push_back() {
        let mut sequence = names();
        assert_eq!(sequence.len(), 4);
        assert_eq!(keys(&sequence), vec![0, 1, 2, 3]);

        assert!(!sequence.push_back(1, String::from("Krzysztof")));
        assert_eq!(sequence.find(&1).map(String::as_str), Some("Stefan"));
        assert_eq!(
            sequence.try_push_back(2, String::from("Krzysztof")),
            Err(Error::DuplicateKey)
        );
        assert_eq!(sequence.try_push_back(4, String::from("Jadwiga")), Ok(()));
        assert_eq!(sequence.len(), 5);
    }

    #[test]
    fn test_remove() {
        let mut sequence = names();
        assert_eq!(sequence.remove(&0).as_deref(), Some("Jerzy"));
        assert_eq!(sequence.remove(&2).as_deref(), Some("Weronika"));
        assert_eq!(sequence.remove(&3).as_deref(), Some("Ania"));
        assert!(sequence.remove(&3).is_none());
        assert_eq!(keys(&sequence), vec![1]);
        assert_eq!(sequence.len(), 1);

        assert!(sequence.push_back(3, String::from("Ania")));
        assert_eq!(keys(&sequence), vec![1, 3]);

        let mut empty = Sequence::<i32, String>::new();
        assert!(empty.remove(&0).is_none());
    }

    #[test]
    fn test_trim() {
        let sequence = names();

        let trimmed = sequence.trim(1, 1);
        assert_eq!(trimmed.to_string(), "{1: Stefan}");

        let trimmed = sequence.trim(0, 2);
        assert_eq!(keys(&trimmed), vec![0, 1]);

        assert!(sequence.trim(1, 0).is_empty());
        assert!(sequence.trim(4, 2).is_empty());
        assert!(sequence.trim(5, 2).is_empty());

        let trimmed = sequence.trim(2, 4);
        assert_eq!(trimmed.to_string(), "{2: Weronika, 3: Ania}");
        assert_eq!(trimmed.len(), 2);
    }

    #[test]
    fn test_try_trim() {
        let sequence = names();
        assert_eq!(
            sequence.try_trim(5, 1),
            Err(Error::IndexOutOfBounds { index: 5, len: 4 })
        );
        assert_eq!(sequence.try_trim(3, 1).map(|trimmed| trimmed.len()), Ok(1));
    }

    #[test]
    fn test_concatenation() {
        let first = names();
        let second: Sequence<i32, String> = vec![
            (4, String::from("Jadwiga")),
            (5, String::from("Krzysztof")),
        ]
        .into_iter()
        .collect();

        let combined = &first + &second;
        assert_eq!(keys(&combined), vec![0, 1, 2, 3, 4, 5]);

        // Duplicate keys are skipped
        let again = &first + &combined;
        assert_eq!(again, combined);
        let itself = &first + &first;
        assert_eq!(itself, first);
    }

    #[test]
    fn test_combine() {
        let first = names();
        let second: Sequence<i32, String> = vec![
            (4, String::from("Jadwiga")),
            (5, String::from("Krzysztof")),
        ]
        .into_iter()
        .collect();

        let combined = Sequence::combine(&first, 0, 1, &second, 0, 1, 2);
        assert_eq!(combined.to_string(), "{0: Jerzy, 4: Jadwiga}");

        let combined = Sequence::combine(&first, 0, 2, &second, 0, 2, 3);
        assert_eq!(combined.to_string(), "{0: Jerzy, 1: Stefan, 4: Jadwiga}");

        let combined = Sequence::combine(&first, 0, 2, &second, 0, 2, 0);
        assert!(combined.is_empty());
    }

    #[test]
    fn test_display_empty() {
        let sequence = Sequence::<i32, String>::new();
        assert_eq!(sequence.to_string(), "{}");
        assert_eq!(format!("{:?}", names().trim(0, 1)), "{0: \"Jerzy\"}");
    }

    #[test]
    fn test_drop_long() {
        let mut sequence = Sequence::new();
        sequence.append_unchecked((0..1_000_000).map(|key| (key, ())));
        assert_eq!(sequence.len(), 1_000_000);
        let cloned = sequence.clone();
        assert_eq!(cloned.len(), sequence.len());
        drop(sequence);
        drop(cloned);
    }
}
