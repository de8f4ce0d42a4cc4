//! # pst
//!
//! Persistent search trees for Rust.
//!
//! ## Overview
//!
//! Every container in this crate is immutable. Edits return a new value that
//! shares all untouched structure with the old one, so keeping old versions
//! around is cheap and safe. The crate provides:
//!
//! - **Tree substrate**: an immutable binary tree of shared nodes with a
//!   per-node annotation ([`persistent::tree::Tree`])
//! - **Search trees**: an unbalanced [`SearchTree`](persistent::tree::SearchTree)
//!   and a balanced [`RedBlackTree`](persistent::tree::RedBlackTree)
//! - **Ordered containers**: [`PersistentTreeSet`](persistent::PersistentTreeSet)
//!   and [`PersistentTreeMap`](persistent::PersistentTreeMap)
//! - **Cons lists**: [`PersistentList`](persistent::PersistentList)
//! - **Orderings**: zero-sized [`Comparator`](compare::Comparator) strategies
//!
//! ## Feature Flags
//!
//! - `sanity` (default): invariant checker for the search trees
//! - `arc`: share nodes through `Arc`, making every container `Send + Sync`
//! - `serde`: serialization of the set, map and list
//! - `rayon`: parallel iteration over the set, map and list (implies `arc`)
//! - `full`: all of the above
//!
//! ## Example
//!
//! ```rust
//! use pst::prelude::*;
//!
//! let set: PersistentTreeSet<i32> = [1, 3, 5, 7, 9].into_iter().collect();
//! let filled = set.insert_all([2, 4, 8]).insert(6);
//!
//! assert_eq!(filled.iter().copied().collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());
//! assert_eq!(set.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers and the comparators.
///
/// # Usage
///
/// ```rust
/// use pst::prelude::*;
///
/// let tree: RedBlackTree<i32, Reversed> = (1..=3).collect();
/// assert_eq!(tree.find_min(), Some(&3));
/// ```
pub mod prelude {
    pub use crate::compare::*;
    pub use crate::persistent::tree::{RedBlackTree, SearchTree};
    pub use crate::persistent::*;
}

pub mod compare;
pub mod persistent;
