use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use std::fmt;

/// An ordered set of integer keys implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Every node caches the height
/// of its subtree, so the balance factor is available without walking the subtree again.
///
/// # Examples
///
/// ```
/// use keyed_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(5);
/// tree.insert(3);
/// tree.insert(8);
///
/// assert!(tree.search(3));
/// assert!(!tree.search(4));
///
/// assert!(tree.delete(3));
/// assert!(!tree.delete(3));
/// assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![5, 8]);
/// ```
pub struct AvlTree {
    tree: tree::Tree,
    len: usize,
}

impl AvlTree {
    /// Constructs a new, empty `AvlTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlTree { tree: None, len: 0 }
    }

    /// Inserts a key into the tree. Duplicate keys are ignored and leave the tree untouched.
    /// Returns `true` if the key was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: i32) -> bool {
        let inserted = tree::insert(&mut self.tree, key);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Checks if a key exists in the tree. Searching never changes the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(tree.search(1));
    /// assert!(!tree.search(2));
    /// ```
    pub fn search(&self, key: i32) -> bool {
        tree::contains(&self.tree, key)
    }

    /// Removes a key from the tree. Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        let removed = tree::remove(&mut self.tree, key);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Inserts every key of a sequence and returns how many were added.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert_all(vec![1, 2, 2, 3]), 3);
    /// ```
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        keys.into_iter().filter(|key| self.insert(*key)).count()
    }

    /// Searches for every key of a sequence and returns how many were found.
    pub fn search_all<I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        keys.into_iter().filter(|key| self.search(*key)).count()
    }

    /// Removes every key of a sequence and returns how many were present.
    pub fn delete_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        keys.into_iter().filter(|key| self.delete(*key)).count()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the tree, removing all keys.
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the tree. An empty tree has height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert_all(1..=7);
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<i32> {
        tree::min(&self.tree)
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    pub fn max(&self) -> Option<i32> {
        tree::max(&self.tree)
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(1));
    /// assert_eq!(iterator.next(), Some(2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlTreeIter<'_> {
        AvlTreeIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type IntoIter = AvlTreeIter<'a>;
    type Item = i32;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `AvlTree`.
///
/// This iterator traverses the keys of the tree in-order.
pub struct AvlTreeIter<'a> {
    current: &'a tree::Tree,
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for AvlTreeIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            node.key
        })
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self {
            write!(f, " {}", key)?;
        }
        Ok(())
    }
}
