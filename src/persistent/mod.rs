//! Persistent (immutable) data structures.
//!
//! This module provides immutable containers that use structural sharing to
//! avoid copying:
//!
//! - [`PersistentList`]: Persistent singly-linked list
//! - [`PersistentTreeSet`]: Persistent ordered set (red-black tree)
//! - [`PersistentTreeMap`]: Persistent ordered map (red-black tree)
//!
//! The trees both ordered containers are built on live in [`tree`], together
//! with the unbalanced [`SearchTree`](tree::SearchTree) baseline.
//!
//! # Structural Sharing
//!
//! Every edit returns a new value. The old value stays valid and shares all
//! untouched nodes with the new one, so an insert into a balanced tree
//! allocates O(log n) nodes and a `cons` allocates one.
//!
//! # Examples
//!
//! ## `PersistentList`
//!
//! ```rust
//! use pst::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```
//!
//! ## `PersistentTreeSet`
//!
//! ```rust
//! use pst::persistent::PersistentTreeSet;
//!
//! let set: PersistentTreeSet<i32> = [5, 1, 3].into_iter().collect();
//! let updated = set.insert(2);
//!
//! assert!(!set.member(&2));
//! assert!(updated.member(&2));
//! assert_eq!(format!("{updated}"), "{1, 2, 3, 5}");
//! ```
//!
//! ## `PersistentTreeMap`
//!
//! ```rust
//! use pst::persistent::PersistentTreeMap;
//!
//! let map = PersistentTreeMap::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! let updated = map.insert(1, "ONE");
//! assert_eq!(map.get(&1), Some(&"one"));
//! assert_eq!(updated.get(&1), Some(&"ONE"));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod list;
mod map;
mod set;
pub mod tree;

pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;
pub use map::PersistentTreeMap;
pub use map::PersistentTreeMapIntoIterator;
pub use map::PersistentTreeMapIterator;
pub use set::PersistentTreeSet;
pub use set::PersistentTreeSetIntoIterator;
pub use set::PersistentTreeSetIterator;

// =============================================================================
// Thread Safety
// =============================================================================

#[cfg(feature = "arc")]
mod thread_safety {
    use super::tree::{RedBlackTree, SearchTree};
    use super::{PersistentList, PersistentTreeMap, PersistentTreeSet};
    use static_assertions::assert_impl_all;

    assert_impl_all!(RedBlackTree<i32>: Send, Sync);
    assert_impl_all!(SearchTree<i32>: Send, Sync);
    assert_impl_all!(PersistentTreeSet<String>: Send, Sync);
    assert_impl_all!(PersistentTreeMap<String, i32>: Send, Sync);
    assert_impl_all!(PersistentList<i32>: Send, Sync);
}

#[cfg(not(feature = "arc"))]
mod thread_safety {
    use super::tree::RedBlackTree;
    use super::{PersistentList, PersistentTreeMap, PersistentTreeSet};
    use static_assertions::assert_not_impl_any;

    assert_not_impl_any!(RedBlackTree<i32>: Send, Sync);
    assert_not_impl_any!(PersistentTreeSet<i32>: Send, Sync);
    assert_not_impl_any!(PersistentTreeMap<i32, i32>: Send, Sync);
    assert_not_impl_any!(PersistentList<i32>: Send, Sync);
}

// =============================================================================
// Tests
// =============================================================================
