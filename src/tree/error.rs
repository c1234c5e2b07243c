use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

use crate::interface::IncompleteInterface;

/// No element in the tree compared equal to the given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl Display for KeyNotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No element in the tree matches the given key!")
    }
}

impl Error for KeyNotFound {}

/// The inserted element compared equal to one already stored; the rejected
/// element rides along so the caller keeps ownership.
pub struct DuplicateKey<T>(pub T);

impl<T> DuplicateKey<T> {
    pub fn into_element(self) -> T {
        self.0
    }
}

impl<T> Debug for DuplicateKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DuplicateKey(..)")
    }
}

impl<T> Display for DuplicateKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "An equal element is already in the tree!")
    }
}

impl<T> Error for DuplicateKey<T> {}

/// The tree is at its configured size limit; the rejected element rides
/// along so the caller keeps ownership.
pub struct LimitReached<T>(pub T);

impl<T> LimitReached<T> {
    pub fn into_element(self) -> T {
        self.0
    }
}

impl<T> Debug for LimitReached<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LimitReached(..)")
    }
}

impl<T> Display for LimitReached<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "The tree has reached its size limit!")
    }
}

impl<T> Error for LimitReached<T> {}

#[derive(From, IsVariant)]
pub enum InsertError<T> {
    DuplicateKey(DuplicateKey<T>),
    LimitReached(LimitReached<T>),
}

impl<T> InsertError<T> {
    /// Hands the rejected element back.
    pub fn into_element(self) -> T {
        match self {
            InsertError::DuplicateKey(error) => error.into_element(),
            InsertError::LimitReached(error) => error.into_element(),
        }
    }
}

impl<T> Debug for InsertError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey(error) => Debug::fmt(error, f),
            InsertError::LimitReached(error) => Debug::fmt(error, f),
        }
    }
}

impl<T> Display for InsertError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey(error) => Display::fmt(error, f),
            InsertError::LimitReached(error) => Display::fmt(error, f),
        }
    }
}

impl<T> Error for InsertError<T> {}

#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum RemoveError {
    KeyNotFound(KeyNotFound),
    IncompleteInterface(IncompleteInterface),
}

/// A new limit would be smaller than what the tree already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLimit {
    pub limit: usize,
    pub size: usize,
}

impl Display for InvalidLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Limit of {} is below the {} elements the tree already holds!",
            self.limit, self.size
        )
    }
}

impl Error for InvalidLimit {}

/// The interface cannot be swapped while elements ordered by the old
/// `compare` are still stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceInUse;

impl Display for InterfaceInUse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot replace the interface of a non-empty tree!")
    }
}

impl Error for InterfaceInUse {}
