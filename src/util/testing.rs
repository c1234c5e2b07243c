use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Shared tally of how many [`DropToken`]s have been destroyed.
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Rc<RefCell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    pub fn count(&self) -> usize {
        *self.0.borrow()
    }

    pub fn token(&self, value: i64) -> DropToken {
        DropToken {
            value,
            counter: Rc::clone(&self.0),
        }
    }
}

/// An ordered key that reports its own destruction, for checking which
/// teardown paths actually destroy elements.
#[derive(Debug, Clone)]
pub struct DropToken {
    pub value: i64,
    counter: Rc<RefCell<usize>>,
}

impl DropToken {
    pub fn compare(a: &DropToken, b: &DropToken) -> Ordering {
        a.value.cmp(&b.value)
    }

    pub fn duplicate(token: &DropToken) -> DropToken {
        token.clone()
    }
}

impl Drop for DropToken {
    fn drop(&mut self) {
        self.counter.replace_with(|count| *count + 1);
    }
}
