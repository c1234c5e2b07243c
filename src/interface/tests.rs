#![cfg(test)]

use std::cmp::Ordering;

use super::*;

fn reversed(a: &u32, b: &u32) -> Ordering {
    b.cmp(a)
}

fn duplicate(value: &u32) -> u32 {
    *value
}

#[test]
fn test_builder_slots() {
    let bare = Interface::<u32>::ordered();
    assert!(bare.copy().is_none(), "ordered() should leave copy unbound.");
    assert!(bare.free().is_none(), "ordered() should leave free unbound.");
    assert!(
        bare.display().is_none(),
        "ordered() should leave display unbound."
    );

    let full = Interface::new(reversed).with_copy(duplicate).with_free(drop);
    assert!(full.copy().is_some(), "with_copy should bind the slot.");
    assert!(full.free().is_some(), "with_free should bind the slot.");
    assert_eq!(
        (full.compare())(&1, &2),
        Ordering::Greater,
        "compare should go through the supplied function."
    );
}

#[test]
fn test_missing_operations() {
    let bare = Interface::<u32>::ordered();

    assert_eq!(
        bare.try_copy().map(|_| ()),
        Err(IncompleteInterface {
            missing: Operation::Copy
        }),
        "An unbound copy should be reported by name."
    );
    assert_eq!(
        bare.try_free().map(|_| ()),
        Err(IncompleteInterface {
            missing: Operation::Free
        }),
        "An unbound free should be reported by name."
    );

    let error = bare.try_free().map(|_| ()).unwrap_err();
    assert_eq!(error.to_string(), "Interface has no free function bound!");
}
