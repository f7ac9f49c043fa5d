//! A height-balanced BST over unique keys.
//!
//! The tree is built balanced from an input collection and stays a plain BST
//! afterwards: [`Tree::insert`] and [`Tree::delete`] keep the ordering
//! invariant but not the shape. Balance is a property callers inspect with
//! [`Tree::is_balanced`] and restore with [`Tree::rebalance`], which rebuilds
//! the whole tree rather than rotating.
//!
//! Keys form a set: duplicates are collapsed during construction and inserting
//! a key that is already present is a silent no-op.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::tree::Tree;
//!
//! let mut tree = Tree::build(vec![5, 1, 9, 3, 7]);
//!
//! let mut keys = Vec::new();
//! tree.in_order(|key| keys.push(*key));
//! assert_eq!(keys, [1, 3, 5, 7, 9]);
//!
//! assert!(tree.is_balanced());
//!
//! // Plain inserts may stretch one side of the tree...
//! tree.insert(100);
//! tree.insert(101);
//! assert!(!tree.is_balanced());
//!
//! // ...until the caller asks for a rebuild.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

/// An owning link to a subtree. `None` marks an empty subtree.
type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }

    /// Consumes a node that is being deleted and returns the subtree that
    /// takes its place under the node's former parent.
    fn into_replacement(mut self: Box<Self>) -> Link<K> {
        match (self.left.take(), self.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(mut right)) => {
                if right.left.is_none() {
                    // The in-order successor is the immediate right child. Its
                    // own right subtree stays attached, so only the left side
                    // needs relinking.
                    right.left = Some(left);
                    Some(right)
                } else {
                    let mut successor = Node::detach_leftmost(&mut right);
                    successor.left = Some(left);
                    successor.right = Some(right);
                    Some(successor)
                }
            }
        }
    }

    /// Unlinks and returns the leftmost node of the subtree rooted at `node`.
    /// If the leftmost node has a right child, that child takes its slot.
    ///
    /// The caller must ensure `node.left` is non-empty.
    fn detach_leftmost(node: &mut Box<Node<K>>) -> Box<Node<K>> {
        let mut parent = node;
        while parent.left.as_ref().map_or(false, |left| left.left.is_some()) {
            parent = parent.left.as_mut().expect("checked non-empty above");
        }
        let mut leftmost = parent.left.take().expect("caller ensures a left child");
        parent.left = leftmost.right.take();
        leftmost
    }
}

/// Height of a subtree in edges: `-1` for an empty subtree, `0` for a leaf.
fn height<K>(link: Option<&Node<K>>) -> i32 {
    match link {
        None => -1,
        Some(node) => {
            1 + height(node.left.as_deref()).max(height(node.right.as_deref()))
        }
    }
}

/// A Binary Search Tree storing a set of unique keys. See the
/// [module docs](crate::tree) for the balancing model.
pub struct Tree<K> {
    root: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Dropped with an explicit worklist so that teardown of a degenerate
    // (spine-shaped) tree doesn't recurse to the tree's full depth.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a height-balanced tree from an arbitrary collection of keys.
    ///
    /// The input is deduplicated and sorted, then the tree is built by
    /// recursive midpoint selection, so for every node the heights of its
    /// subtrees differ by at most 1. An empty input yields an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// // Duplicates are collapsed: the tree stores a set of keys.
    /// let tree = Tree::build(vec![1, 1, 2, 2, 3]);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = values.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self {
            root: build_subtree(keys),
        }
    }

    /// Inserts a key as a new leaf, descending from the root. If the key is
    /// already present nothing happens.
    ///
    /// This is plain BST insertion: it preserves key ordering but not balance.
    /// After a run of inserts the shape may degrade; see [`Tree::rebalance`].
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 2, 3]);
    /// tree.insert(4);
    /// tree.insert(4);
    ///
    /// assert!(tree.contains(&4));
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Equal => return,
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
            }
        }
        *link = Some(Node::new(key));
    }

    /// Deletes the node holding `key` and returns whether it was present.
    /// Deleting from an empty tree or deleting an absent key returns `false`
    /// and leaves the tree untouched.
    ///
    /// A node with two children is replaced by its in-order successor (one
    /// step right, then leftmost), which is spliced out of its old position
    /// and takes over the deleted node's children.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 2, 3]);
    ///
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&2));
    /// assert!(!tree.contains(&2));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while link.as_ref().map_or(false, |node| node.key != *key) {
            let node = link.as_mut().expect("checked non-empty above");
            link = if *key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        match link.take() {
            None => false,
            Some(node) => {
                *link = node.into_replacement();
                true
            }
        }
    }

    /// Reports whether `key` is present in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// let tree = Tree::build(vec![1, 2, 3]);
    ///
    /// assert!(tree.contains(&2));
    /// assert!(!tree.contains(&42));
    /// assert!(!Tree::<i32>::new().contains(&2));
    /// ```
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        false
    }

    /// Visits every key breadth-first: each level left to right, starting at
    /// the root. Visiting an empty tree invokes the callback zero times.
    pub fn level_order(&self, mut visit: impl FnMut(&K)) {
        self.visit_level_order(|node| visit(&node.key));
    }

    /// Visits every key in-order (left subtree, node, right subtree), which
    /// yields keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// let tree = Tree::build(vec![5, 1, 9, 3, 7]);
    ///
    /// let mut keys = Vec::new();
    /// tree.in_order(|key| keys.push(*key));
    /// assert_eq!(keys, [1, 3, 5, 7, 9]);
    /// ```
    pub fn in_order(&self, mut visit: impl FnMut(&K)) {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !stack.is_empty() {
            // Walk down the left spine, then visit on the way back up and
            // hop into the right subtree.
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let node = match stack.pop() {
                Some(node) => node,
                None => break,
            };
            visit(&node.key);
            current = node.right.as_deref();
        }
    }

    /// Visits every key pre-order (node, left subtree, right subtree).
    pub fn pre_order(&self, mut visit: impl FnMut(&K)) {
        let mut stack = Vec::new();
        stack.extend(self.root.as_deref());
        while let Some(node) = stack.pop() {
            // Right first so that the left subtree is popped first.
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
            visit(&node.key);
        }
    }

    /// Visits every key post-order (left subtree, right subtree, node).
    pub fn post_order(&self, mut visit: impl FnMut(&K)) {
        // Collect a root-right-left pre-order onto an auxiliary stack, then
        // drain it in reverse to get left-right-root.
        let mut stack = Vec::new();
        let mut visits = Vec::new();
        stack.extend(self.root.as_deref());
        while let Some(node) = stack.pop() {
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
            visits.push(node);
        }
        while let Some(node) = visits.pop() {
            visit(&node.key);
        }
    }

    /// The height of the tree in edges: the longest path from the root to a
    /// leaf. An empty tree has height `-1` and a single node has height `0`.
    pub fn height(&self) -> i32 {
        height(self.root.as_deref())
    }

    /// The height of the subtree rooted at `key`, or `None` if the key is not
    /// present.
    pub fn height_of(&self, key: &K) -> Option<i32>
    where
        K: Ord,
    {
        self.node_of(key).map(|node| height(Some(node)))
    }

    /// The depth of `key` in edges from the root, or `None` if the key is not
    /// present (including lookups on an empty tree).
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::tree::Tree;
    ///
    /// let tree = Tree::build(vec![5, 1, 9, 3, 7]);
    ///
    /// assert_eq!(tree.depth(&5), Some(0));
    /// assert_eq!(tree.depth(&1), Some(1));
    /// assert_eq!(tree.depth(&42), None);
    /// ```
    pub fn depth(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut edges = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(edges),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
            edges += 1;
        }
        None
    }

    /// Reports whether every node's subtree heights differ by at most 1.
    /// Vacuously true for an empty tree.
    pub fn is_balanced(&self) -> bool {
        let mut balanced = true;
        self.visit_level_order(|node| {
            let left_height = height(node.left.as_deref());
            let right_height = height(node.right.as_deref());
            if (left_height - right_height).abs() > 1 {
                balanced = false;
            }
        });
        balanced
    }

    /// Rebuilds the tree into a height-balanced shape. If the tree is already
    /// balanced nothing happens; otherwise every key is collected and the
    /// tree is reconstructed from scratch as in [`Tree::build`].
    ///
    /// This is a full `O(n)` reconstruction, not a rotation-based fixup, so
    /// it is meant as an explicit maintenance step after a sequence of
    /// mutations rather than something to call on a hot path.
    pub fn rebalance(&mut self)
    where
        K: Ord,
    {
        if self.is_balanced() {
            return;
        }
        let mut keys = Vec::new();
        let mut queue = VecDeque::new();
        queue.extend(self.root.take());
        while let Some(mut node) = queue.pop_front() {
            queue.extend(node.left.take());
            queue.extend(node.right.take());
            keys.push(node.key);
        }
        *self = Self::build(keys);
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.visit_level_order(|_| count += 1);
        count
    }

    /// Reports whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Breadth-first node visitation backing [`Tree::level_order`],
    /// [`Tree::is_balanced`], and [`Tree::len`].
    fn visit_level_order(&self, mut visit: impl FnMut(&Node<K>)) {
        let mut queue = VecDeque::new();
        queue.extend(self.root.as_deref());
        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
    }

    fn node_of(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: clone_subtree(self.root.as_deref()),
        }
    }
}

fn clone_subtree<K: Clone>(link: Option<&Node<K>>) -> Link<K> {
    link.map(|node| {
        Box::new(Node {
            key: node.key.clone(),
            left: clone_subtree(node.left.as_deref()),
            right: clone_subtree(node.right.as_deref()),
        })
    })
}

/// Builds a balanced subtree from sorted unique keys by taking the midpoint
/// as the root: `mid = start + floor((end - start) / 2)`, left subtree from
/// the keys below it, right subtree from the keys above it.
fn build_subtree<K>(mut keys: Vec<K>) -> Link<K> {
    if keys.is_empty() {
        return None;
    }
    let mid = (keys.len() - 1) / 2;
    let upper = keys.split_off(mid + 1);
    let key = keys.pop().expect("keys still holds the midpoint");
    Some(Box::new(Node {
        key,
        left: build_subtree(keys),
        right: build_subtree(upper),
    }))
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.in_order(|key| {
            set.entry(key);
        });
        set.finish()
    }
}

/// Draws the tree structure with box characters, right subtree on top:
///
/// ```text
/// │   ┌── 9
/// └── 7
///     │   ┌── 5
///     └── 3
///         └── 1
/// ```
impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.as_deref() {
            None => writeln!(f, "(empty tree)"),
            Some(root) => fmt_subtree(f, root, "", true),
        }
    }
}

fn fmt_subtree<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    node: &Node<K>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    if let Some(right) = node.right.as_deref() {
        let deeper = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        fmt_subtree(f, right, &deeper, false)?;
    }
    writeln!(
        f,
        "{}{}{}",
        prefix,
        if is_left { "└── " } else { "┌── " },
        node.key
    )?;
    if let Some(left) = node.left.as_deref() {
        let deeper = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
        fmt_subtree(f, left, &deeper, true)?;
    }
    Ok(())
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts,
    /// deletes, and rebalances we have the same set of keys in both.
    fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    tree.insert(*k);
                    set.insert(*k);
                }
                Op::Remove(k) => {
                    assert_eq!(tree.delete(k), set.remove(k));
                }
                Op::Rebalance => {
                    tree.rebalance();
                    assert!(tree.is_balanced());
                }
            }
        }
    }

    fn in_order_keys(tree: &Tree<i8>) -> Vec<i8> {
        let mut keys = Vec::new();
        tree.in_order(|key| keys.push(*key));
        keys
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            in_order_keys(&tree) == set.iter().copied().collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn build_yields_sorted_unique_in_order(xs: Vec<i8>) -> bool {
            let tree = Tree::build(xs.clone());
            let expected: Vec<i8> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

            in_order_keys(&tree) == expected
        }
    }

    quickcheck::quickcheck! {
        fn build_is_balanced(xs: Vec<i8>) -> bool {
            Tree::build(xs).is_balanced()
        }
    }

    quickcheck::quickcheck! {
        fn contains_every_built_key(xs: Vec<i8>) -> bool {
            let tree = Tree::build(xs.clone());

            xs.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn traversals_visit_each_key_exactly_once(xs: Vec<i8>) -> bool {
            let tree = Tree::build(xs);
            let expected = in_order_keys(&tree);

            let mut level = Vec::new();
            tree.level_order(|key| level.push(*key));
            let mut pre = Vec::new();
            tree.pre_order(|key| pre.push(*key));
            let mut post = Vec::new();
            tree.post_order(|key| post.push(*key));

            let mut each_matches = true;
            for keys in [&mut level, &mut pre, &mut post] {
                keys.sort_unstable();
                each_matches &= *keys == expected;
            }
            each_matches
        }
    }

    quickcheck::quickcheck! {
        fn rebalance_preserves_keys(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut tree = Tree::build(xs.clone());
            let mut set: BTreeSet<i8> = xs.into_iter().collect();
            for key in &deletes {
                tree.delete(key);
                set.remove(key);
            }

            tree.rebalance();
            tree.is_balanced()
                && in_order_keys(&tree) == set.into_iter().collect::<Vec<_>>()
        }
    }
}
