use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::num::NonZero;

use super::{
    Color, DuplicateKey, InsertError, InterfaceInUse, InvalidLimit, Iter, KeyNotFound, LimitReached,
    Link, Node, NodeRef, RemoveError,
};
use crate::interface::{IncompleteInterface, Interface};
use crate::util::option::OptionExtension;

use Color::{Black, Red};
use std::cmp::Ordering::{Equal, Greater, Less};

/// A red-black tree of unique elements, ordered by the `compare` function of
/// a shared [`Interface`].
///
/// Rebalancing keeps the height within `2 * log2(n + 1)`, so every operation
/// below that walks the tree is worst-case logarithmic and none of them ever
/// leaves a half-applied change behind: a call either completes, invariants
/// included, or reports an error with the tree untouched.
///
/// # Time Complexity
/// With `n` elements in the tree:
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` / `discard` | `O(log n)` |
/// | `get` / `contains` | `O(log n)` |
/// | `min` / `max` | `O(log n)` |
/// | `pop_min` / `pop_max` | `O(log n)` |
/// | `try_clone` | `O(n)` |
/// | `erase` / `erase_shallow` | `O(n)` |
/// | full iteration | `O(n)` |
///
/// The element type is opaque to the tree: elements are only ever touched
/// through the interface, so mutating an element's ordering position while it
/// is stored (e.g. through interior mutability observed by `compare`) breaks
/// the search invariant and is the caller's responsibility to avoid.
pub struct RedBlackTree<'i, T> {
    pub(crate) root: Link<T>,
    pub(crate) size: usize,
    pub(crate) limit: Option<NonZero<usize>>,
    pub(crate) interface: &'i Interface<T>,
    pub(crate) _phantom: PhantomData<T>,
}

impl<'i, T> RedBlackTree<'i, T> {
    pub const fn new(interface: &'i Interface<T>) -> RedBlackTree<'i, T> {
        RedBlackTree {
            root: None,
            size: 0,
            limit: None,
            interface,
            _phantom: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The configured size cap, if any.
    pub const fn limit(&self) -> Option<NonZero<usize>> {
        self.limit
    }

    pub const fn is_full(&self) -> bool {
        match self.limit {
            Some(limit) => self.size >= limit.get(),
            None => false,
        }
    }

    pub const fn interface(&self) -> &'i Interface<T> {
        self.interface
    }

    /// Caps the number of elements; `None` lifts the cap. A limit below the
    /// current size is rejected.
    pub fn set_limit(&mut self, limit: Option<NonZero<usize>>) -> Result<(), InvalidLimit> {
        if let Some(limit) = limit {
            if limit.get() < self.size {
                return Err(InvalidLimit {
                    limit: limit.get(),
                    size: self.size,
                });
            }
        }
        self.limit = limit;
        Ok(())
    }

    /// Swaps the interface. Only allowed while the tree is empty, because
    /// stored elements are positioned by the old `compare`.
    pub fn set_interface(&mut self, interface: &'i Interface<T>) -> Result<(), InterfaceInUse> {
        if !self.is_empty() {
            return Err(InterfaceInUse);
        }
        self.interface = interface;
        Ok(())
    }

    pub fn get(&self, key: &T) -> Option<&T> {
        Some(self.find(key)?.key())
    }

    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// The smallest element under the interface's order.
    pub fn min(&self) -> Option<&T> {
        Some(self.root?.leftmost().key())
    }

    /// The largest element under the interface's order.
    pub fn max(&self) -> Option<&T> {
        Some(self.root?.rightmost().key())
    }

    /// Adds an element, taking ownership of it. An element comparing equal
    /// to a stored one, or an insert into a full tree, is rejected and the
    /// element is handed back inside the error.
    pub fn insert(&mut self, element: T) -> Result<(), InsertError<T>> {
        if self.is_full() {
            return Err(LimitReached(element).into());
        }

        let compare = self.interface.compare();

        match self.root {
            None => {
                self.root = Some(NodeRef::from_node(Node::new(element, Black)));
            }
            Some(root) => {
                let mut scan = root;
                let node = loop {
                    match compare(scan.key(), &element) {
                        Greater => match scan.left() {
                            Some(left) => scan = left,
                            None => {
                                let node = NodeRef::from_node(Node::new(element, Red));
                                node.set_parent(Some(scan));
                                scan.set_left(Some(node));
                                break node;
                            }
                        },
                        Less => match scan.right() {
                            Some(right) => scan = right,
                            None => {
                                let node = NodeRef::from_node(Node::new(element, Red));
                                node.set_parent(Some(scan));
                                scan.set_right(Some(node));
                                break node;
                            }
                        },
                        Equal => return Err(DuplicateKey(element).into()),
                    }
                };
                self.insert_fixup(node);
            }
        }

        self.size += 1;
        Ok(())
    }

    /// Removes the element matching `key` and returns it to the caller.
    pub fn remove(&mut self, key: &T) -> Result<T, KeyNotFound> {
        match self.find(key) {
            Some(node) => Ok(self.remove_node(node)),
            None => Err(KeyNotFound),
        }
    }

    /// Removes the element matching `key` and destroys it with the
    /// interface's `free`. The interface is checked before the tree is
    /// touched, so an incomplete one leaves the element in place.
    pub fn discard(&mut self, key: &T) -> Result<(), RemoveError> {
        let free = self.interface.try_free()?;
        let element = self.remove(key)?;
        free(element);
        Ok(())
    }

    /// Extracts the smallest element.
    pub fn pop_min(&mut self) -> Option<T> {
        let node = self.root?.leftmost();
        Some(self.remove_node(node))
    }

    /// Extracts the largest element.
    pub fn pop_max(&mut self) -> Option<T> {
        let node = self.root?.rightmost();
        Some(self.remove_node(node))
    }

    /// A structurally identical tree with every element duplicated through
    /// the interface's `copy`.
    pub fn try_clone(&self) -> Result<RedBlackTree<'i, T>, IncompleteInterface> {
        let copy = self.interface.try_copy()?;

        Ok(RedBlackTree {
            root: Self::clone_subtree(self.root, None, copy),
            size: self.size,
            limit: self.limit,
            interface: self.interface,
            _phantom: PhantomData,
        })
    }

    /// Destroys every element through the interface's `free` and releases all
    /// nodes, leaving an empty, usable tree.
    pub fn erase(&mut self) -> Result<(), IncompleteInterface> {
        let free = self.interface.try_free()?;
        self.teardown(free);
        Ok(())
    }

    /// Releases all nodes without destroying the elements, for elements whose
    /// storage is owned elsewhere. Elements that do own resources are leaked.
    pub fn erase_shallow(&mut self) {
        self.teardown(mem::forget);
    }

    /// Ascending traversal. Each call starts a fresh pass; the iterator
    /// borrows the tree, so the structure cannot change underneath it.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }
}

impl<T> RedBlackTree<'_, T> {
    pub(crate) fn find(&self, key: &T) -> Link<T> {
        let compare = self.interface.compare();

        let mut scan = self.root;
        while let Some(node) = scan {
            scan = match compare(node.key(), key) {
                Greater => node.left(),
                Less => node.right(),
                Equal => return Some(node),
            };
        }
        None
    }

    /// Unlinks one node, rebalances, and hands its element back.
    pub(crate) fn remove_node(&mut self, node: NodeRef<T>) -> T {
        // A node with two children trades elements with its in-order
        // successor, which has no left child; the node actually spliced out
        // always has at most one.
        let doomed = if node.left().is_none() || node.right().is_none() {
            node
        } else {
            // SAFETY: Both children are present on this branch.
            unsafe { node.right().unreachable() }.leftmost()
        };

        let child = doomed.left().or(doomed.right());
        let parent = doomed.parent();

        if let Some(child) = child {
            child.set_parent(parent);
        }
        match parent {
            None => self.root = child,
            Some(parent) if parent.left() == Some(doomed) => parent.set_left(child),
            Some(parent) => parent.set_right(child),
        }

        if doomed != node {
            // The successor's element takes the vacated slot.
            mem::swap(node.key_mut(), doomed.key_mut());
        }

        if doomed.color() == Black {
            // Splicing out a black node left one path a black short.
            self.remove_fixup(child, parent);
        }

        self.size -= 1;
        doomed.take_node().key
    }

    /// Re-establishes the color invariants after a red leaf joined the tree.
    /// Each pass either recolors and moves the violation two levels up, or
    /// resolves it with at most two rotations.
    fn insert_fixup(&mut self, mut node: NodeRef<T>) {
        while NodeRef::color_of(node.parent()) == Red {
            // SAFETY: A red parent is never the root, so a grandparent
            // exists.
            let parent = unsafe { node.parent().unreachable() };
            let grandparent = unsafe { parent.parent().unreachable() };

            if Some(parent) == grandparent.left() {
                let uncle = grandparent.right();

                if NodeRef::color_of(uncle) == Red {
                    parent.set_color(Black);
                    // SAFETY: Checked red just above, so the uncle exists.
                    unsafe { uncle.unreachable() }.set_color(Black);
                    grandparent.set_color(Red);
                    node = grandparent;
                } else {
                    if Some(node) == parent.right() {
                        // Zig-zag: straighten the inner child out first.
                        node = parent;
                        self.rotate_left(node);
                    }
                    // SAFETY: The cursor stayed below its old grandparent, so
                    // two ancestors still exist.
                    let parent = unsafe { node.parent().unreachable() };
                    let grandparent = unsafe { parent.parent().unreachable() };
                    parent.set_color(Black);
                    grandparent.set_color(Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = grandparent.left();

                if NodeRef::color_of(uncle) == Red {
                    parent.set_color(Black);
                    // SAFETY: Checked red just above, so the uncle exists.
                    unsafe { uncle.unreachable() }.set_color(Black);
                    grandparent.set_color(Red);
                    node = grandparent;
                } else {
                    if Some(node) == parent.left() {
                        // Zig-zag: straighten the inner child out first.
                        node = parent;
                        self.rotate_right(node);
                    }
                    // SAFETY: The cursor stayed below its old grandparent, so
                    // two ancestors still exist.
                    let parent = unsafe { node.parent().unreachable() };
                    let grandparent = unsafe { parent.parent().unreachable() };
                    parent.set_color(Black);
                    grandparent.set_color(Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        // SAFETY: Fix-up never empties the tree.
        unsafe { self.root.unreachable() }.set_color(Black);
    }

    /// Re-establishes the black-height after a black node was spliced out.
    /// `cursor` carries the deficit and may be absent (a leaf position);
    /// `parent` anchors it in the tree.
    fn remove_fixup(&mut self, mut cursor: Link<T>, mut parent: Link<T>) {
        while NodeRef::color_of(cursor) == Black {
            let Some(above) = parent else {
                // The deficit reached the root and is absorbed.
                break;
            };

            if cursor == above.left() {
                // SAFETY: The deficit side is one black short, so the other
                // side holds at least one real node.
                let mut sibling = unsafe { above.right().unreachable() };

                if sibling.color() == Red {
                    sibling.set_color(Black);
                    above.set_color(Red);
                    self.rotate_left(above);
                    // SAFETY: The red sibling had two black children; one of
                    // them is the sibling after the rotation.
                    sibling = unsafe { above.right().unreachable() };
                }

                if NodeRef::color_of(sibling.left()) == Black
                    && NodeRef::color_of(sibling.right()) == Black
                {
                    sibling.set_color(Red);
                    cursor = Some(above);
                    parent = above.parent();
                } else {
                    if NodeRef::color_of(sibling.right()) == Black {
                        if let Some(near) = sibling.left() {
                            near.set_color(Black);
                        }
                        sibling.set_color(Red);
                        self.rotate_right(sibling);
                        // SAFETY: The rotation lifted the red near child into
                        // the sibling position.
                        sibling = unsafe { above.right().unreachable() };
                    }
                    sibling.set_color(above.color());
                    above.set_color(Black);
                    if let Some(far) = sibling.right() {
                        far.set_color(Black);
                    }
                    self.rotate_left(above);
                    cursor = self.root;
                    break;
                }
            } else {
                // SAFETY: The deficit side is one black short, so the other
                // side holds at least one real node.
                let mut sibling = unsafe { above.left().unreachable() };

                if sibling.color() == Red {
                    sibling.set_color(Black);
                    above.set_color(Red);
                    self.rotate_right(above);
                    // SAFETY: The red sibling had two black children; one of
                    // them is the sibling after the rotation.
                    sibling = unsafe { above.left().unreachable() };
                }

                if NodeRef::color_of(sibling.left()) == Black
                    && NodeRef::color_of(sibling.right()) == Black
                {
                    sibling.set_color(Red);
                    cursor = Some(above);
                    parent = above.parent();
                } else {
                    if NodeRef::color_of(sibling.left()) == Black {
                        if let Some(near) = sibling.right() {
                            near.set_color(Black);
                        }
                        sibling.set_color(Red);
                        self.rotate_left(sibling);
                        // SAFETY: The rotation lifted the red near child into
                        // the sibling position.
                        sibling = unsafe { above.left().unreachable() };
                    }
                    sibling.set_color(above.color());
                    above.set_color(Black);
                    if let Some(far) = sibling.left() {
                        far.set_color(Black);
                    }
                    self.rotate_right(above);
                    cursor = self.root;
                    break;
                }
            }
        }

        if let Some(node) = cursor {
            node.set_color(Black);
        }
    }

    /// Promotes `node`'s right child into its place, preserving in-order
    /// sequence. No allocation, three parent links rewired.
    fn rotate_left(&mut self, node: NodeRef<T>) {
        // SAFETY: A left rotation is only requested with a right child.
        let pivot = unsafe { node.right().unreachable() };

        node.set_right(pivot.left());
        if let Some(inner) = pivot.left() {
            inner.set_parent(Some(node));
        }

        pivot.set_parent(node.parent());
        match node.parent() {
            None => self.root = Some(pivot),
            Some(parent) if parent.left() == Some(node) => parent.set_left(Some(pivot)),
            Some(parent) => parent.set_right(Some(pivot)),
        }

        pivot.set_left(Some(node));
        node.set_parent(Some(pivot));
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, node: NodeRef<T>) {
        // SAFETY: A right rotation is only requested with a left child.
        let pivot = unsafe { node.left().unreachable() };

        node.set_left(pivot.right());
        if let Some(inner) = pivot.right() {
            inner.set_parent(Some(node));
        }

        pivot.set_parent(node.parent());
        match node.parent() {
            None => self.root = Some(pivot),
            Some(parent) if parent.right() == Some(node) => parent.set_right(Some(pivot)),
            Some(parent) => parent.set_left(Some(pivot)),
        }

        pivot.set_right(Some(node));
        node.set_parent(Some(pivot));
    }

    fn clone_subtree(link: Link<T>, parent: Link<T>, copy: fn(&T) -> T) -> Link<T> {
        link.map(|node| {
            let new = NodeRef::from_node(Node {
                key: copy(node.key()),
                color: node.color(),
                parent,
                left: None,
                right: None,
            });
            new.set_left(Self::clone_subtree(node.left(), Some(new), copy));
            new.set_right(Self::clone_subtree(node.right(), Some(new), copy));
            new
        })
    }

    /// Releases every node with link inversion instead of recursion or an
    /// explicit stack, passing each element to `dispose`.
    fn teardown(&mut self, mut dispose: impl FnMut(T)) {
        let mut scan = self.root.take();
        let mut up: Link<T> = None;
        self.size = 0;

        while let Some(node) = scan {
            if let Some(left) = node.left() {
                // Descend left, pointing the vacated slot back up.
                node.set_left(up);
                up = Some(node);
                scan = Some(left);
            } else if let Some(right) = node.right() {
                node.set_left(up);
                node.set_right(None);
                up = Some(node);
                scan = Some(right);
            } else if up.is_none() {
                dispose(node.take_node().key);
                scan = None;
            } else {
                // Leaf: release it, then climb the inverted chain until a
                // pending right subtree shows up.
                let mut doomed = node;
                loop {
                    let Some(parent) = up else {
                        scan = Some(doomed);
                        break;
                    };
                    dispose(doomed.take_node().key);
                    if let Some(right) = parent.right() {
                        parent.set_right(None);
                        scan = Some(right);
                        break;
                    }
                    doomed = parent;
                    up = parent.left();
                }
            }
        }
    }
}

impl<T> Drop for RedBlackTree<'_, T> {
    fn drop(&mut self) {
        self.teardown(drop);
    }
}

impl<T: PartialEq> PartialEq for RedBlackTree<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RedBlackTree<'_, T> {}

impl<T: Debug> RedBlackTree<'_, T> {
    fn render(link: Link<T>) -> String {
        match link {
            Some(node) => {
                let color = match node.color() {
                    Red => 'R',
                    Black => 'B',
                };
                format!(
                    "{}\n({} {:?})\n{}",
                    Self::render(node.left())
                        .lines()
                        .map(|line| String::from("┌    ") + line)
                        .collect::<Vec<_>>()
                        .join("\n"),
                    color,
                    node.key(),
                    Self::render(node.right())
                        .lines()
                        .map(|line| String::from("└    ") + line)
                        .collect::<Vec<_>>()
                        .join("\n"),
                )
            }
            None => String::from("-"),
        }
    }
}

impl<T: Debug> Debug for RedBlackTree<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("nodes", &format_args!("\n{}\n", Self::render(self.root)))
            .field("size", &self.size)
            .finish()
    }
}

impl<T: Debug> Display for RedBlackTree<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<T> RedBlackTree<'_, T> {
    /// Walks the whole tree and panics on any violated structural property.
    pub(crate) fn check_invariants(&self) {
        match self.root {
            None => assert_eq!(self.size, 0, "An empty tree must have size 0."),
            Some(root) => {
                assert_eq!(root.color(), Black, "The root must be black.");
                assert!(root.parent().is_none(), "The root must have no parent.");

                let (count, _) = self.check_subtree(root);
                assert_eq!(
                    count, self.size,
                    "Size must match the number of reachable nodes."
                );
            }
        }
    }

    /// Returns the subtree's (node count, black-height).
    fn check_subtree(&self, node: NodeRef<T>) -> (usize, usize) {
        let compare = self.interface.compare();

        if node.color() == Red {
            assert_eq!(
                NodeRef::color_of(node.left()),
                Black,
                "A red node must not have a red left child."
            );
            assert_eq!(
                NodeRef::color_of(node.right()),
                Black,
                "A red node must not have a red right child."
            );
        }

        let (left_count, left_black) = match node.left() {
            Some(left) => {
                assert!(
                    left.parent() == Some(node),
                    "A left child's parent link must point back."
                );
                assert_eq!(
                    compare(left.key(), node.key()),
                    Less,
                    "A left child must compare less than its parent."
                );
                self.check_subtree(left)
            }
            None => (0, 0),
        };
        let (right_count, right_black) = match node.right() {
            Some(right) => {
                assert!(
                    right.parent() == Some(node),
                    "A right child's parent link must point back."
                );
                assert_eq!(
                    compare(right.key(), node.key()),
                    Greater,
                    "A right child must compare greater than its parent."
                );
                self.check_subtree(right)
            }
            None => (0, 0),
        };

        assert_eq!(
            left_black, right_black,
            "Black-heights must agree on both sides."
        );

        let own = match node.color() {
            Black => 1,
            Red => 0,
        };
        (left_count + right_count + 1, left_black + own)
    }

    pub(crate) fn height(&self) -> usize {
        Self::subtree_height(self.root)
    }

    fn subtree_height(link: Link<T>) -> usize {
        match link {
            Some(node) => {
                1 + Self::subtree_height(node.left()).max(Self::subtree_height(node.right()))
            }
            None => 0,
        }
    }
}
