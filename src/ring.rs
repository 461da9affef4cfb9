//! A circular doubly linked list with a sentinel node.
//!
//! The node after the sentinel is the front of the ring, the node before it is the back.
//! Cursors wrap around through the sentinel, which acts as a "ghost" position.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::debug;

/// A circular doubly linked list of key-value entries with a sentinel node.
///
/// Keys are not required to be unique.
///
/// ```
/// use avl_dictionary::Ring;
/// let mut ring = Ring::new();
/// ring.push_back(1, 10);
/// ring.push_back(2, 20);
/// ring.push_back(3, 30);
/// let forward: Vec<_> = ring.iter().map(|(k, _)| *k).collect();
/// let backward: Vec<_> = ring.iter().rev().map(|(k, _)| *k).collect();
/// assert_eq!(forward, vec![1, 2, 3]);
/// assert_eq!(backward, vec![3, 2, 1]);
/// ```
pub struct Ring<K, V> {
    sentinel: NodePtr<K, V>,
    len: usize,
    marker: PhantomData<Box<Node<K, V>>>,
}

struct Node<K, V> {
    // None only for the sentinel
    entry: Option<(K, V)>,
    next: NodePtr<K, V>,
    prev: NodePtr<K, V>,
}

type NodePtr<K, V> = NonNull<Node<K, V>>;

/// A double-ended iterator over the entries of a ring.
pub struct Iter<'a, K, V> {
    front: NodePtr<K, V>,
    back: NodePtr<K, V>,
    len: usize,
    marker: PhantomData<&'a Node<K, V>>,
}

/// A read-only cursor over a ring.
///
/// The cursor either points at an entry or at the sentinel ("ghost") position,
/// where [`Cursor::current`] returns `None`. Moving past either end wraps around.
pub struct Cursor<'a, K, V> {
    current: NodePtr<K, V>,
    ring: &'a Ring<K, V>,
}

/// A cursor over a ring that can insert and remove entries.
pub struct CursorMut<'a, K, V> {
    current: NodePtr<K, V>,
    ring: &'a mut Ring<K, V>,
}

impl<K, V> Ring<K, V> {
    /// Creates an empty ring, consisting of the sentinel node only.
    pub fn new() -> Self {
        Self {
            sentinel: Node::create(None),
            len: 0,
            marker: PhantomData,
        }
    }

    /// Returns true if the ring contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries in the ring.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all entries, keeping the sentinel.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Inserts an entry at the back of the ring (just before the sentinel).
    pub fn push_back(&mut self, key: K, value: V) {
        unsafe {
            let last_ptr = self.sentinel.as_ref().prev;
            self.link_after(last_ptr, key, value);
        }
    }

    /// Inserts an entry at the front of the ring (just after the sentinel).
    pub fn push_front(&mut self, key: K, value: V) {
        unsafe { self.link_after(self.sentinel, key, value) };
    }

    /// Removes the first entry and returns it.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        if self.is_empty() {
            debug!("pop_front: ring is empty");
            return None;
        }
        unsafe {
            let first_ptr = self.sentinel.as_ref().next;
            self.unlink(first_ptr)
        }
    }

    /// Removes the last entry and returns it.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        if self.is_empty() {
            debug!("pop_back: ring is empty");
            return None;
        }
        unsafe {
            let last_ptr = self.sentinel.as_ref().prev;
            self.unlink(last_ptr)
        }
    }

    /// Returns the first entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        unsafe { Self::entry(self.sentinel.as_ref().next) }
    }

    /// Returns the last entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        unsafe { Self::entry(self.sentinel.as_ref().prev) }
    }

    /// Gets a double-ended iterator over the entries, front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        unsafe {
            Iter {
                front: self.sentinel.as_ref().next,
                back: self.sentinel.as_ref().prev,
                len: self.len,
                marker: PhantomData,
            }
        }
    }

    /// Returns a cursor pointing at the first entry (or the ghost position if empty).
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor {
            current: unsafe { self.sentinel.as_ref().next },
            ring: self,
        }
    }

    /// Returns a cursor pointing at the last entry (or the ghost position if empty).
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor {
            current: unsafe { self.sentinel.as_ref().prev },
            ring: self,
        }
    }

    /// Returns a mutable cursor pointing at the first entry (or the ghost position if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut {
            current: unsafe { self.sentinel.as_ref().next },
            ring: self,
        }
    }

    unsafe fn entry<'a>(node_ptr: NodePtr<K, V>) -> Option<(&'a K, &'a V)> {
        (*node_ptr.as_ptr())
            .entry
            .as_ref()
            .map(|(key, value)| (key, value))
    }

    // Links a new node between `prev_ptr` and its successor.
    unsafe fn link_after(&mut self, mut prev_ptr: NodePtr<K, V>, key: K, value: V) {
        let mut node_ptr = Node::create(Some((key, value)));
        let mut next_ptr = prev_ptr.as_ref().next;
        node_ptr.as_mut().next = next_ptr;
        node_ptr.as_mut().prev = prev_ptr;
        next_ptr.as_mut().prev = node_ptr;
        prev_ptr.as_mut().next = node_ptr;
        self.len += 1;
    }

    // Unlinks and destroys a non-sentinel node.
    unsafe fn unlink(&mut self, node_ptr: NodePtr<K, V>) -> Option<(K, V)> {
        debug_assert!(node_ptr != self.sentinel);
        let mut prev_ptr = node_ptr.as_ref().prev;
        let mut next_ptr = node_ptr.as_ref().next;
        prev_ptr.as_mut().next = next_ptr;
        next_ptr.as_mut().prev = prev_ptr;
        self.len -= 1;
        Node::destroy(node_ptr)
    }
}

impl<K, V> Node<K, V> {
    // Creates a node linked to itself.
    fn create(entry: Option<(K, V)>) -> NodePtr<K, V> {
        let boxed = Box::new(Node {
            entry,
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        });
        let mut node_ptr = unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) };
        unsafe {
            node_ptr.as_mut().next = node_ptr;
            node_ptr.as_mut().prev = node_ptr;
        }
        node_ptr
    }

    unsafe fn destroy(node_ptr: NodePtr<K, V>) -> Option<(K, V)> {
        Box::from_raw(node_ptr.as_ptr()).entry
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let node_ptr = self.front;
            self.front = node_ptr.as_ref().next;
            Ring::entry(node_ptr)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        unsafe {
            let node_ptr = self.back;
            self.back = node_ptr.as_ref().prev;
            Ring::entry(node_ptr)
        }
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Returns the entry at the cursor, or `None` at the ghost position.
    pub fn current(&self) -> Option<(&'a K, &'a V)> {
        unsafe { Ring::entry(self.current) }
    }

    /// Moves the cursor to the next position, wrapping through the ghost position.
    pub fn move_next(&mut self) {
        self.current = unsafe { self.current.as_ref().next };
    }

    /// Moves the cursor to the previous position, wrapping through the ghost position.
    pub fn move_prev(&mut self) {
        self.current = unsafe { self.current.as_ref().prev };
    }

    /// Returns true if the cursor is at the ghost (sentinel) position.
    pub fn is_ghost(&self) -> bool {
        self.current == self.ring.sentinel
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            ring: self.ring,
        }
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    /// Returns the entry at the cursor, or `None` at the ghost position.
    pub fn current(&mut self) -> Option<(&K, &mut V)> {
        unsafe {
            (*self.current.as_ptr())
                .entry
                .as_mut()
                .map(|(key, value)| (&*key, value))
        }
    }

    /// Moves the cursor to the next position, wrapping through the ghost position.
    pub fn move_next(&mut self) {
        self.current = unsafe { self.current.as_ref().next };
    }

    /// Moves the cursor to the previous position, wrapping through the ghost position.
    pub fn move_prev(&mut self) {
        self.current = unsafe { self.current.as_ref().prev };
    }

    /// Returns true if the cursor is at the ghost (sentinel) position.
    pub fn is_ghost(&self) -> bool {
        self.current == self.ring.sentinel
    }

    /// Inserts an entry after the cursor position.
    /// At the ghost position this inserts at the front of the ring.
    /// The cursor does not move.
    pub fn insert_after(&mut self, key: K, value: V) {
        unsafe { self.ring.link_after(self.current, key, value) };
    }

    /// Removes the entry at the cursor and moves the cursor to the next position.
    /// Returns `None` and does nothing at the ghost position.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.is_ghost() {
            return None;
        }
        unsafe {
            let node_ptr = self.current;
            self.current = node_ptr.as_ref().next;
            self.ring.unlink(node_ptr)
        }
    }
}

impl<K, V> Drop for Ring<K, V> {
    fn drop(&mut self) {
        self.clear();
        unsafe { Node::destroy(self.sentinel) };
    }
}

impl<K, V> Default for Ring<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for Ring<K, V> {
    fn clone(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Ring<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ring = Self::new();
        ring.extend(iter);
        ring
    }
}

impl<K, V> Extend<(K, V)> for Ring<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push_back(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Ring<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Ring<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Ring<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Writes one `key: k, info: v` line per entry, front to back.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for Ring<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "key: {}, info: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Ring;

    fn tens() -> Ring<i32, i32> {
        (1..=10).map(|key| (key, key * 10)).collect()
    }

    #[test]
    fn test_new() {
        let ring = Ring::<i32, String>::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert!(ring.front().is_none());
        assert!(ring.back().is_none());
        assert!(ring.iter().next().is_none());
        assert!(ring.iter().next_back().is_none());
        assert_eq!(ring.to_string(), "");
        assert!(ring.cursor_front().is_ghost());
    }

    #[test]
    fn test_push_and_iterate() {
        let ring = tens();
        assert_eq!(ring.len(), 10);
        assert_eq!(ring.front(), Some((&1, &10)));
        assert_eq!(ring.back(), Some((&10, &100)));

        let forward: Vec<i32> = ring.iter().map(|(key, _)| *key).collect();
        assert_eq!(forward, (1..=10).collect::<Vec<_>>());
        let backward: Vec<i32> = ring.iter().rev().map(|(key, _)| *key).collect();
        assert_eq!(backward, (1..=10).rev().collect::<Vec<_>>());

        // Both ends meet in the middle without yielding an entry twice
        let mut iter = ring.iter();
        assert_eq!(iter.next(), Some((&1, &10)));
        assert_eq!(iter.next_back(), Some((&10, &100)));
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.count(), 8);
    }

    #[test]
    fn test_push_front_and_pop() {
        let mut ring = Ring::new();
        ring.push_front(2, "two");
        ring.push_front(1, "one");
        ring.push_back(3, "three");
        assert_eq!(ring.pop_front(), Some((1, "one")));
        assert_eq!(ring.pop_back(), Some((3, "three")));
        assert_eq!(ring.pop_back(), Some((2, "two")));
        assert_eq!(ring.pop_back(), None);
        assert_eq!(ring.pop_front(), None);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_duplicate_keys() {
        let mut ring = Ring::new();
        ring.push_back(777, "3xSeven");
        ring.push_back(777, "again");
        assert_eq!(ring.len(), 2);
        assert_eq!(
            ring.to_string(),
            "key: 777, info: 3xSeven\nkey: 777, info: again\n"
        );
    }

    #[test]
    fn test_cursor_wraps() {
        let ring: Ring<i32, &str> = vec![(777, "3xSeven"), (888, "3xEight"), (999, "3xNine")]
            .into_iter()
            .collect();

        let mut cursor = ring.cursor_front();
        assert_eq!(cursor.current(), Some((&777, &"3xSeven")));
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.current(), Some((&999, &"3xNine")));
        cursor.move_next();
        assert!(cursor.is_ghost());
        assert!(cursor.current().is_none());
        cursor.move_next();
        assert_eq!(cursor.current(), Some((&777, &"3xSeven")));

        let mut cursor = ring.cursor_back();
        assert_eq!(cursor.current(), Some((&999, &"3xNine")));
        cursor.move_prev();
        cursor.move_prev();
        cursor.move_prev();
        assert!(cursor.is_ghost());
        cursor.move_prev();
        assert_eq!(cursor.current(), Some((&999, &"3xNine")));
    }

    #[test]
    fn test_cursor_mut() {
        let mut ring = tens();
        {
            let mut cursor = ring.cursor_front_mut();
            cursor.move_next();
            cursor.insert_after(25, 250);
            if let Some((_, value)) = cursor.current() {
                *value += 1;
            }
            cursor.move_next();
            assert_eq!(cursor.remove_current(), Some((25, 250)));
            assert_eq!(cursor.current().map(|(key, _)| *key), Some(3));

            cursor.move_prev();
            cursor.move_prev();
            cursor.move_prev();
            assert!(cursor.is_ghost());
            assert!(cursor.remove_current().is_none());
            cursor.insert_after(0, 0);
        }
        let keys: Vec<i32> = ring.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(ring.iter().nth(2), Some((&2, &21)));
        assert_eq!(ring.len(), 11);
    }

    #[test]
    fn test_clone_and_clear() {
        let mut ring = tens();
        let cloned = ring.clone();
        assert_eq!(ring, cloned);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(cloned.len(), 10);
        ring.push_back(1, 1);
        assert_eq!(ring.len(), 1);
        assert_eq!(format!("{:?}", ring), "[(1, 1)]");
    }
}
