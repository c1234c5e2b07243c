//! A self-balancing ordered collection over caller-defined element semantics.
//!
//! The centrepiece is [`RedBlackTree`](tree::RedBlackTree), a red-black tree
//! that stores opaque elements and never inspects them itself: every ordering
//! decision goes through an [`Interface`](interface::Interface), a bundle of
//! `compare`, `copy`, `display` and `free` functions bound once and shared by
//! reference for the lifetime of the tree. Only `compare` is mandatory. The
//! optional operations unlock duplication ([`try_clone`]) and destructive
//! removal/teardown ([`discard`], [`erase`]), and asking for one that was
//! never bound surfaces a typed error rather than a panic.
//!
//! # Guarantees
//! After every public call the tree satisfies the usual red-black properties:
//! binary-search order under `compare`, a black root, no red node with a red
//! child, and equal black counts on every root-to-leaf path. Together these
//! bound the height by `2 * log2(n + 1)`, so search, insertion and removal
//! are all worst-case logarithmic. Elements comparing equal to one already
//! stored are rejected, never overwritten.
//!
//! # Ownership
//! Inserting hands the element to the tree. It comes back out through
//! [`remove`], [`pop_min`]/[`pop_max`] or the consuming iterator, or is
//! destroyed in place by the interface's `free` through [`discard`] and
//! [`erase`]. Dropping the tree runs the elements' own destructors;
//! [`erase_shallow`] releases only the nodes, for handle-like elements whose
//! storage is owned elsewhere.
//!
//! ```
//! use rbset::interface::Interface;
//! use rbset::tree::RedBlackTree;
//!
//! let interface = Interface::ordered();
//! let mut tree = RedBlackTree::new(&interface);
//!
//! tree.insert(20).unwrap();
//! tree.insert(10).unwrap();
//! tree.insert(30).unwrap();
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
//! assert_eq!(tree.remove(&20).unwrap(), 20);
//! assert!(tree.remove(&20).is_err());
//! ```
//!
//! The tree is a single-threaded structure: all mutation goes through
//! `&mut self`, there is no internal locking, and callers wanting shared
//! access across threads must serialize externally.
//!
//! [`try_clone`]: tree::RedBlackTree::try_clone
//! [`remove`]: tree::RedBlackTree::remove
//! [`discard`]: tree::RedBlackTree::discard
//! [`erase`]: tree::RedBlackTree::erase
//! [`erase_shallow`]: tree::RedBlackTree::erase_shallow
//! [`pop_min`]: tree::RedBlackTree::pop_min
//! [`pop_max`]: tree::RedBlackTree::pop_max

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod interface;
pub mod tree;

pub(crate) mod util;
