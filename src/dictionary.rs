//! An ordered key-value dictionary implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::{Error, Result};

/// An ordered key-value dictionary implemented with an AVL tree.
///
/// ```
/// use avl_dictionary::BalancedDictionary;
/// let mut dictionary = BalancedDictionary::new();
/// dictionary.insert(0, "zero");
/// dictionary.insert(1, "one");
/// dictionary.insert(2, "two");
/// assert_eq!(dictionary.find(&1), Some(&"one"));
/// dictionary.remove(&1);
/// assert!(dictionary.find(&1).is_none());
/// ```
///
/// Equality is structural: two dictionaries compare equal only if their trees
/// have the same shape in addition to the same entries.
#[derive(Clone, PartialEq, Eq)]
pub struct BalancedDictionary<K, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

#[derive(Clone, PartialEq, Eq)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

/// An iterator over the entries of a dictionary, in key order.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    len: usize,
}

impl<K: Ord, V> BalancedDictionary<K, V> {
    /// Creates an empty dictionary.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the dictionary contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the dictionary.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        Node::height_of(&self.root)
    }

    /// Clears the dictionary, deallocating all nodes.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the value stored under the key.
    ///
    /// The key may be any borrowed form of the dictionary's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| &node.value)
    }

    /// Returns references to the key-value pair stored under the key.
    pub fn find_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value stored under the key.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Returns true if the dictionary contains the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Inserts a key-value pair into the dictionary.
    ///
    /// If the key is already present the existing entry is kept untouched and the
    /// given value is dropped.
    /// Returns whether the pair was inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut inserted = false;
        self.root = Some(Self::insert_node(self.root.take(), key, value, &mut inserted));
        if inserted {
            self.num_nodes += 1;
        } else {
            debug!("insert: key already present, keeping existing entry");
        }
        inserted
    }

    /// Inserts a key-value pair into the dictionary.
    /// Fails with [`Error::DuplicateKey`] if the key is already present.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<()> {
        if self.insert(key, value) {
            Ok(())
        } else {
            Err(Error::DuplicateKey)
        }
    }

    /// Removes a key from the dictionary.
    /// Returns the value at the key if the key was previously in the dictionary.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = None;
        self.root = Self::remove_node(self.root.take(), key, &mut removed);
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        } else {
            debug!("remove: key not present");
        }
        debug_assert!(self.find(key).is_none());
        removed
    }

    /// Removes a key from the dictionary and returns its value.
    /// Fails with [`Error::KeyNotFound`] if the key is absent.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).ok_or(Error::KeyNotFound)
    }

    /// Returns all entries in in-order (ascending key) sequence.
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.num_nodes);
        self.inorder(|node| entries.push((&node.key, &node.value)));
        entries
    }

    /// Returns all entries in pre-order sequence (node, left subtree, right subtree).
    pub fn pre_order(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.num_nodes);
        self.preorder(|node| entries.push((&node.key, &node.value)));
        entries
    }

    /// Returns all entries in post-order sequence (left subtree, right subtree, node).
    pub fn post_order(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.num_nodes);
        self.postorder(|node| entries.push((&node.key, &node.value)));
        entries
    }

    /// Returns the keys grouped by tree level.
    /// The first group holds the root key, keys within a level are ordered left to right.
    pub fn display_levels(&self) -> Vec<Vec<&K>> {
        (1..=self.height())
            .map(|level| {
                let mut keys = Vec::new();
                Self::collect_level(&self.root, level, &mut keys);
                keys
            })
            .collect()
    }

    /// Visits all entries level by level, starting at the root.
    pub fn traverse_level_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            f(&node.key, &node.value);
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
    }

    /// Gets an iterator over the entries of the dictionary, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Walks the whole tree and panics if any AVL or search tree invariant is violated.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        self.preorder(|node| {
            let mut left_height = 0;
            let mut right_height = 0;

            if let Some(left) = node.left.as_deref() {
                assert!(left.key < node.key);
                left_height = left.height;
            }

            if let Some(right) = node.right.as_deref() {
                assert!(right.key > node.key);
                right_height = right.height;
            }

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            num_nodes += 1;
        });
        assert_eq!(num_nodes, self.num_nodes);

        // Local checks above do not rule out a key out of place deeper down
        let keys = self.in_order();
        assert!(keys.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    fn find_node<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        current
    }

    /// Inserts below the given subtree and returns its new (rebalanced) root.
    fn insert_node(link: Link<K, V>, key: K, value: V, inserted: &mut bool) -> Box<Node<K, V>> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Node::create(key, value);
            }
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Equal => return node,
            Ordering::Less => {
                node.left = Some(Self::insert_node(node.left.take(), key, value, inserted));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_node(node.right.take(), key, value, inserted));
            }
        }
        Node::rebalance(node)
    }

    /// Removes the key from the given subtree and returns its new (rebalanced) root.
    fn remove_node<Q>(link: Link<K, V>, key: &Q, removed: &mut Option<V>) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = link?;
        match key.cmp(node.key.borrow()) {
            Ordering::Less => node.left = Self::remove_node(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::remove_node(node.right.take(), key, removed),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (left, None) => {
                    *removed = Some(node.value);
                    return left;
                }
                (None, right) => {
                    *removed = Some(node.value);
                    return right;
                }
                (Some(left), Some(right)) => {
                    // Move the in-order successor's entry into this node,
                    // only the successor's node is deallocated
                    let (right, successor) = Node::unlink_min(right);
                    let successor = *successor;
                    node.left = Some(left);
                    node.right = right;
                    node.key = successor.key;
                    *removed = Some(mem::replace(&mut node.value, successor.value));
                }
            },
        }
        Some(Node::rebalance(node))
    }

    fn collect_level<'a>(link: &'a Link<K, V>, level: usize, keys: &mut Vec<&'a K>) {
        if let Some(node) = link.as_deref() {
            if level == 1 {
                keys.push(&node.key);
            } else {
                Self::collect_level(&node.left, level - 1, keys);
                Self::collect_level(&node.right, level - 1, keys);
            }
        }
    }

    fn preorder<'a, F: FnMut(&'a Node<K, V>)>(&'a self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn inorder<'a, F: FnMut(&'a Node<K, V>)>(&'a self, f: F) {
        self.traverse(|_| {}, f, |_| {});
    }

    fn postorder<'a, F: FnMut(&'a Node<K, V>)>(&'a self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<'a, Pre, In, Post>(&'a self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(&'a Node<K, V>),
        In: FnMut(&'a Node<K, V>),
        Post: FnMut(&'a Node<K, V>),
    {
        Self::traverse_link(&self.root, &mut preorder, &mut inorder, &mut postorder);
    }

    fn traverse_link<'a, Pre, In, Post>(
        link: &'a Link<K, V>,
        preorder: &mut Pre,
        inorder: &mut In,
        postorder: &mut Post,
    ) where
        Pre: FnMut(&'a Node<K, V>),
        In: FnMut(&'a Node<K, V>),
        Post: FnMut(&'a Node<K, V>),
    {
        if let Some(node) = link.as_deref() {
            preorder(node);
            Self::traverse_link(&node.left, preorder, inorder, postorder);
            inorder(node);
            Self::traverse_link(&node.right, preorder, inorder, postorder);
            postorder(node);
        }
    }
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn height_of(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |node| node.height)
    }

    fn left_height(&self) -> usize {
        Self::height_of(&self.left)
    }

    fn right_height(&self) -> usize {
        Self::height_of(&self.right)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(self.left_height(), self.right_height());
    }

    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut new_root) => {
                trace!("rotating left at subtree of height {}", node.height);
                node.right = new_root.left.take();
                node.adjust_height();
                new_root.left = Some(node);
                new_root.adjust_height();
                new_root
            }
        }
    }

    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut new_root) => {
                trace!("rotating right at subtree of height {}", node.height);
                node.left = new_root.right.take();
                node.adjust_height();
                new_root.right = Some(node);
                new_root.adjust_height();
                new_root
            }
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    ///
    /// The heavy child's own balance decides between single and double rotation:
    /// a child leaning away from the imbalance is rotated first.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        let left_height = node.left_height();
        let right_height = node.right_height();
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);
        if left_height > right_height + 1 {
            // Rebalance right
            if let Some(left) = node.left.take() {
                node.left = Some(if left.right_height() > left.left_height() {
                    Self::rotate_left(left)
                } else {
                    left
                });
            }
            Self::rotate_right(node)
        } else if right_height > left_height + 1 {
            // Rebalance left
            if let Some(right) = node.right.take() {
                node.right = Some(if right.left_height() > right.right_height() {
                    Self::rotate_right(right)
                } else {
                    right
                });
            }
            Self::rotate_left(node)
        } else {
            node.adjust_height();
            node
        }
    }

    /// Detaches the leftmost node (smallest key) of the subtree rooted at `node`.
    /// Returns the rebalanced rest of the subtree and the detached node.
    fn unlink_min(mut node: Box<Self>) -> (Link<K, V>, Box<Self>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Self::unlink_min(left);
                node.left = left;
                (Some(Self::rebalance(node)), min)
            }
        }
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.len -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Ord, V> IntoIterator for &'a BalancedDictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Default for BalancedDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BalancedDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(iter);
        dictionary
    }
}

impl<K: Ord, V> Extend<(K, V)> for BalancedDictionary<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BalancedDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
