use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use super::{IncompleteInterface, Operation};

/// Total order between two elements.
pub type CompareFn<T> = fn(&T, &T) -> Ordering;

/// Deep duplicate of an element.
pub type CopyFn<T> = fn(&T) -> T;

/// Side-effecting presentation of an element, for callers' diagnostics.
pub type DisplayFn<T> = fn(&T);

/// Consumes an element, releasing whatever it holds.
pub type FreeFn<T> = fn(T);

/// The operations a [`RedBlackTree`](crate::tree::RedBlackTree) applies to
/// its elements.
///
/// A tree keeps a shared reference to its interface, so the bundle has to
/// outlive every tree built on it. `compare` is fixed at construction and
/// must stay consistent for as long as any tree holds elements ordered by it;
/// the remaining operations are optional and only checked by the calls that
/// need them.
pub struct Interface<T> {
    compare: CompareFn<T>,
    copy: Option<CopyFn<T>>,
    display: Option<DisplayFn<T>>,
    free: Option<FreeFn<T>>,
}

impl<T> Interface<T> {
    pub const fn new(compare: CompareFn<T>) -> Interface<T> {
        Interface {
            compare,
            copy: None,
            display: None,
            free: None,
        }
    }

    pub const fn with_copy(mut self, copy: CopyFn<T>) -> Interface<T> {
        self.copy = Some(copy);
        self
    }

    pub const fn with_display(mut self, display: DisplayFn<T>) -> Interface<T> {
        self.display = Some(display);
        self
    }

    pub const fn with_free(mut self, free: FreeFn<T>) -> Interface<T> {
        self.free = Some(free);
        self
    }

    pub const fn compare(&self) -> CompareFn<T> {
        self.compare
    }

    pub const fn copy(&self) -> Option<CopyFn<T>> {
        self.copy
    }

    pub const fn display(&self) -> Option<DisplayFn<T>> {
        self.display
    }

    pub const fn free(&self) -> Option<FreeFn<T>> {
        self.free
    }

    pub(crate) const fn try_copy(&self) -> Result<CopyFn<T>, IncompleteInterface> {
        match self.copy {
            Some(copy) => Ok(copy),
            None => Err(IncompleteInterface {
                missing: Operation::Copy,
            }),
        }
    }

    pub(crate) const fn try_free(&self) -> Result<FreeFn<T>, IncompleteInterface> {
        match self.free {
            Some(free) => Ok(free),
            None => Err(IncompleteInterface {
                missing: Operation::Free,
            }),
        }
    }
}

impl<T: Ord> Interface<T> {
    /// An interface whose `compare` is the element type's own [`Ord`], with
    /// the optional operations left unbound.
    pub const fn ordered() -> Interface<T> {
        Interface::new(T::cmp)
    }
}

impl<T> Clone for Interface<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Interface<T> {}

impl<T> Debug for Interface<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("copy", &self.copy.is_some())
            .field("display", &self.display.is_some())
            .field("free", &self.free.is_some())
            .finish()
    }
}
