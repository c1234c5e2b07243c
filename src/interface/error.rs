use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The optional operations of an [`Interface`](super::Interface).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Copy,
    Display,
    Free,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Copy => "copy",
            Operation::Display => "display",
            Operation::Free => "free",
        })
    }
}

/// An operation needed an interface function that was never bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteInterface {
    pub missing: Operation,
}

impl Display for IncompleteInterface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Interface has no {} function bound!", self.missing)
    }
}

impl Error for IncompleteInterface {}
