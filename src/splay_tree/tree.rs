use crate::arena::{Handle, TypedArena};
use crate::splay_tree::node::Node;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// An ordered set of integer keys implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that
/// recently accessed keys are quick to access again. Every insert, successful search and delete
/// "splays" the node it reached to the root through zig, zig-zig and zig-zag rotations, which
/// gives amortized logarithmic cost. A single operation can still take linear time on a
/// degenerate chain.
///
/// Nodes live in an arena owned by the tree and refer to each other through handles, which lets
/// every node keep a link to its parent without shared ownership.
///
/// # Examples
///
/// ```
/// use keyed_collections::splay_tree::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(5);
///
/// assert!(tree.search(3));
/// assert_eq!(tree.root(), Some(3));
///
/// assert!(tree.delete(3));
/// assert!(!tree.search(3));
/// assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![1, 5]);
/// ```
pub struct SplayTree {
    arena: TypedArena<Node>,
    root: Option<Handle>,
}

impl SplayTree {
    /// Constructs a new, empty `SplayTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::splay_tree::SplayTree;
    ///
    /// let tree = SplayTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        SplayTree {
            arena: TypedArena::new(),
            root: None,
        }
    }

    fn find(&self, key: i32) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match key.cmp(&node.key) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => curr = node.right,
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    fn rightmost(&self, handle: Handle) -> Handle {
        let mut curr = handle;
        while let Some(right) = self.arena[curr].right {
            curr = right;
        }
        curr
    }

    // Makes `new` take the place of `old` below `parent`, or at the root if there is no parent.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Handle) {
        self.arena[new].parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                if parent_node.left == Some(old) {
                    parent_node.left = Some(new);
                } else {
                    parent_node.right = Some(new);
                }
            },
        }
    }

    fn rotate_left(&mut self, handle: Handle) {
        let child = match self.arena[handle].right {
            Some(child) => child,
            None => unreachable!(),
        };
        let grandchild = self.arena[child].left;
        let parent = self.arena[handle].parent;

        self.arena[handle].right = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(handle);
        }
        self.replace_child(parent, handle, child);
        self.arena[child].left = Some(handle);
        self.arena[handle].parent = Some(child);
    }

    fn rotate_right(&mut self, handle: Handle) {
        let child = match self.arena[handle].left {
            Some(child) => child,
            None => unreachable!(),
        };
        let grandchild = self.arena[child].right;
        let parent = self.arena[handle].parent;

        self.arena[handle].left = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(handle);
        }
        self.replace_child(parent, handle, child);
        self.arena[child].right = Some(handle);
        self.arena[handle].parent = Some(child);
    }

    fn splay(&mut self, handle: Handle) {
        while let Some(parent) = self.arena[handle].parent {
            let is_left = self.arena[parent].left == Some(handle);
            match self.arena[parent].parent {
                // zig
                None => {
                    if is_left {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                },
                Some(grandparent) => {
                    let parent_is_left = self.arena[grandparent].left == Some(parent);
                    match (is_left, parent_is_left) {
                        // zig-zig
                        (true, true) => {
                            self.rotate_right(grandparent);
                            self.rotate_right(parent);
                        },
                        (false, false) => {
                            self.rotate_left(grandparent);
                            self.rotate_left(parent);
                        },
                        // zig-zag
                        (false, true) => {
                            self.rotate_left(parent);
                            self.rotate_right(grandparent);
                        },
                        (true, false) => {
                            self.rotate_right(parent);
                            self.rotate_left(grandparent);
                        },
                    }
                },
            }
        }
    }

    // Both subtrees must already be detached from their old parent.
    fn join(&mut self, left: Option<Handle>, right: Option<Handle>) -> Option<Handle> {
        let (left, right) = match (left, right) {
            (None, right) => return right,
            (left, None) => return left,
            (Some(left), Some(right)) => (left, right),
        };

        let max = self.rightmost(left);
        self.splay(max);
        self.arena[max].right = Some(right);
        self.arena[right].parent = Some(max);
        Some(max)
    }

    /// Inserts a key into the tree and splays it to the root. Duplicate keys are ignored and
    /// leave the tree untouched. Returns `true` if the key was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert_eq!(tree.root(), Some(2));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.root(), Some(2));
    /// ```
    pub fn insert(&mut self, key: i32) -> bool {
        let mut parent = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match key.cmp(&node.key) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => curr = node.right,
                Ordering::Equal => {
                    trace!(?key, "ignoring duplicate splay tree key");
                    return false;
                },
            }
            parent = Some(handle);
        }

        let new_handle = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(new_handle),
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                if key < parent_node.key {
                    parent_node.left = Some(new_handle);
                } else {
                    parent_node.right = Some(new_handle);
                }
            },
        }

        self.splay(new_handle);
        true
    }

    /// Checks if a key exists in the tree. A found key is splayed to the root; a missing key
    /// leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert!(tree.search(1));
    /// assert_eq!(tree.root(), Some(1));
    /// assert!(!tree.search(3));
    /// assert_eq!(tree.root(), Some(1));
    /// ```
    pub fn search(&mut self, key: i32) -> bool {
        match self.find(key) {
            Some(handle) => {
                self.splay(handle);
                true
            },
            None => false,
        }
    }

    /// Removes a key from the tree. Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        let handle = match self.find(key) {
            Some(handle) => handle,
            None => return false,
        };

        self.splay(handle);
        let Node { left, right, .. } = self.arena.free(handle);
        for child in left.iter().chain(right.iter()) {
            self.arena[*child].parent = None;
        }
        self.root = self.join(left, right);
        true
    }

    /// Inserts every key of a sequence and returns how many were added.
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        keys.into_iter().filter(|key| self.insert(*key)).count()
    }

    /// Searches for every key of a sequence and returns how many were found.
    pub fn search_all<I>(&mut self, keys: I) -> usize
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

    /// Returns the key at the root of the tree, which is the most recently accessed key.
    pub fn root(&self) -> Option<i32> {
        self.root.map(|handle| self.arena[handle].key)
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the tree, removing all keys.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal
    /// and does not splay.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(1));
    /// assert_eq!(iterator.next(), Some(2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayTreeIter<'_> {
        SplayTreeIter {
            arena: &self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a SplayTree {
    type IntoIter = SplayTreeIter<'a>;
    type Item = i32;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `SplayTree`.
///
/// This iterator traverses the keys of the tree in-order.
pub struct SplayTreeIter<'a> {
    arena: &'a TypedArena<Node>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a> Iterator for SplayTreeIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.current = self.arena[handle].left;
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let node = &self.arena[handle];
            self.current = node.right;
            node.key
        })
    }
}

impl Default for SplayTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SplayTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self {
            write!(f, " {}", key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SplayTree;
    use crate::arena::Handle;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    type Shape = Vec<(i32, Option<i32>, Option<i32>)>;

    // Pre-order list of (key, left key, right key) after checking ordering and parent links.
    fn shape(tree: &SplayTree) -> Shape {
        fn visit(tree: &SplayTree, handle: Handle, parent: Option<Handle>, ret: &mut Shape) {
            let node = &tree.arena[handle];
            assert_eq!(node.parent, parent);
            let left = node.left.map(|left| tree.arena[left].key);
            let right = node.right.map(|right| tree.arena[right].key);
            if let Some(left) = left {
                assert!(left < node.key);
            }
            if let Some(right) = right {
                assert!(right > node.key);
            }
            ret.push((node.key, left, right));
            if let Some(left) = node.left {
                visit(tree, left, Some(handle), ret);
            }
            if let Some(right) = node.right {
                visit(tree, right, Some(handle), ret);
            }
        }

        let mut ret = Vec::new();
        if let Some(root) = tree.root {
            visit(tree, root, None, &mut ret);
        }
        assert_eq!(ret.len(), tree.len());
        ret
    }

    #[test]
    fn test_len_empty() {
        let tree = SplayTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_empty_operations() {
        let mut tree = SplayTree::new();
        assert!(!tree.search(1));
        assert!(!tree.delete(1));
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_insert_splays_to_root() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![1, 2, 3]);
        assert_eq!(
            shape(&tree),
            vec![(3, Some(2), None), (2, Some(1), None), (1, None, None)],
        );
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![1, 2, 3]);
        let before = shape(&tree);
        assert!(!tree.insert(1));
        assert_eq!(shape(&tree), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_insert_duplicate_below_root() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        tree.insert(2);
        let before = shape(&tree);
        assert!(!tree.insert(1));
        assert_eq!(tree.root(), Some(2));
        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn test_search_zig_zig() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![1, 2, 3]);
        assert!(tree.search(1));
        assert_eq!(
            shape(&tree),
            vec![(1, None, Some(2)), (2, None, Some(3)), (3, None, None)],
        );
    }

    #[test]
    fn test_insert_zig_zag() {
        for keys in vec![vec![1, 3, 2], vec![3, 1, 2]] {
            let mut tree = SplayTree::new();
            tree.insert_all(keys);
            assert_eq!(
                shape(&tree),
                vec![(2, Some(1), Some(3)), (1, None, None), (3, None, None)],
            );
        }
    }

    #[test]
    fn test_search_miss_leaves_shape() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![5, 1, 9, 3, 7]);
        let before = shape(&tree);
        assert!(!tree.search(4));
        assert!(!tree.search(100));
        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn test_delete_joins_subtrees() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![1, 2, 3]);
        tree.search(1);
        assert!(tree.delete(2));
        assert_eq!(shape(&tree), vec![(1, None, Some(3)), (3, None, None)]);
    }

    #[test]
    fn test_delete_root_with_one_side() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![1, 2, 3]);
        assert!(tree.delete(3));
        assert_eq!(tree.root(), Some(2));
        assert!(tree.delete(1));
        assert_eq!(shape(&tree), vec![(2, None, None)]);
        assert!(tree.delete(2));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_batch_operations() {
        let mut tree = SplayTree::new();
        assert_eq!(tree.insert_all(vec![4, 2, 6, 2]), 3);
        assert_eq!(tree.search_all(vec![2, 4, 5]), 2);
        assert_eq!(tree.delete_all(vec![2, 5, 6]), 2);
        assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![4]);
    }

    #[test]
    fn test_delete_absent() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![2, 1, 3]);
        let before = shape(&tree);
        assert!(!tree.delete(4));
        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn test_reuses_freed_nodes() {
        let mut tree = SplayTree::new();
        tree.insert_all(0..10);
        tree.delete_all(0..10);
        tree.insert_all(10..20);
        assert_eq!(tree.arena.len(), 10);
        assert_eq!(tree.iter().collect::<Vec<i32>>(), (10..20).collect::<Vec<i32>>());
    }

    #[test]
    fn test_clear() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![3, 1, 5]);
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.search(3));
    }

    #[test]
    fn test_display() {
        let mut tree = SplayTree::new();
        tree.insert_all(vec![3, 1, 2]);
        assert_eq!(tree.to_string(), " 1 2 3");
    }

    proptest! {
        #[test]
        fn prop_accessed_key_is_root(
            keys in prop::collection::vec(-500i32..500, 1..200),
            queries in prop::collection::vec(-500i32..500, 0..200)
        ) {
            let mut tree = SplayTree::new();
            let mut expected = BTreeSet::new();
            for key in &keys {
                let added = expected.insert(*key);
                if added {
                    prop_assert!(tree.insert(*key));
                    prop_assert_eq!(tree.root(), Some(*key));
                } else {
                    let before = shape(&tree);
                    prop_assert!(!tree.insert(*key));
                    prop_assert_eq!(shape(&tree), before);
                }
            }
            for key in &queries {
                if expected.contains(key) {
                    prop_assert!(tree.search(*key));
                    prop_assert_eq!(tree.root(), Some(*key));
                } else {
                    let before = shape(&tree);
                    prop_assert!(!tree.search(*key));
                    prop_assert_eq!(shape(&tree), before);
                }
            }
        }

        #[test]
        fn prop_deletes_match_model(
            keys in prop::collection::vec(-200i32..200, 0..300),
            deletes in prop::collection::vec(-200i32..200, 0..300)
        ) {
            let mut tree = SplayTree::new();
            let mut expected = BTreeSet::new();
            for key in &keys {
                tree.insert(*key);
                expected.insert(*key);
            }
            for key in &deletes {
                prop_assert_eq!(tree.delete(*key), expected.remove(key));
                shape(&tree);
            }
            prop_assert_eq!(tree.iter().collect::<Vec<i32>>(), expected.iter().cloned().collect::<Vec<i32>>());
            for key in -200..200 {
                prop_assert_eq!(tree.search(key), expected.contains(&key));
            }
        }
    }
}
