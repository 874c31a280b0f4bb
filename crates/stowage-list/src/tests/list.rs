// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use proptest::prelude::*;
use stowage_arena::{FreeListArena, SystemAlloc};
use stowage_test_utils::{CountingAlloc, FailingAlloc};
use stowage_vec::{BitwiseHooks, DeepHooks, Hooks, TryClone, Vector, VectorError};

use crate::LinkedList;

/// Hooks that log destroyed values and reject copies of one value.
#[derive(Clone, Default)]
struct Tracker {
    destroyed: Rc<RefCell<Vec<i32>>>,
    reject: Option<i32>,
}

impl Hooks<i32> for Tracker {
    fn copy(&self, src: &i32) -> Result<i32, VectorError> {
        if self.reject == Some(*src) {
            return Err(VectorError::OutOfMemory);
        }
        Ok(*src)
    }

    fn destroy(&self, value: i32) {
        self.destroyed.borrow_mut().push(value);
    }
}

fn collect<H: Hooks<i32>, A: stowage_arena::RawAlloc>(list: &LinkedList<i32, H, A>) -> Vec<i32> {
    list.iter().copied().collect()
}

// =============================================================================
// append() / prepend()
// =============================================================================

#[test]
fn test_new_list_is_empty_and_unallocated() {
    let alloc = CountingAlloc::new();
    let list = LinkedList::<u8, _, _>::new_in(BitwiseHooks, &alloc);

    assert!(list.is_empty());
    assert_eq!(list.first(), Err(VectorError::EmptyContainer));
    assert_eq!(list.last(), Err(VectorError::EmptyContainer));
    assert_eq!(alloc.allocations(), 0);
}

#[test]
fn test_append_and_prepend_order() {
    let mut list = LinkedList::new();

    list.append(&2).expect("Failed to append(..)");
    list.append(&3).expect("Failed to append(..)");
    list.prepend(&1).expect("Failed to prepend(..)");

    assert_eq!(collect(&list), vec![1, 2, 3]);
    assert_eq!(list.len(), 3);
    assert_eq!(list.first(), Ok(&1));
    assert_eq!(list.last(), Ok(&3));
}

#[test]
fn test_prepend_into_empty_sets_last() {
    let mut list = LinkedList::new();

    list.prepend(&7).expect("Failed to prepend(..)");

    assert_eq!(list.last(), Ok(&7));
    list.append(&8).expect("Failed to append(..)");
    assert_eq!(collect(&list), vec![7, 8]);
}

#[test]
fn test_append_returns_stored_element() {
    let mut list = LinkedList::new();

    *list.append(&1).expect("Failed to append(..)") = 10;
    *list.last_mut().expect("Failed to last_mut()") += 1;
    *list.first_mut().expect("Failed to first_mut()") += 1;

    assert_eq!(collect(&list), vec![12]);
}

#[test]
fn test_append_zeroed() {
    let mut list = LinkedList::<[u16; 4]>::new();

    let slot = list.append_zeroed().expect("Failed to append_zeroed()");
    assert_eq!(*slot, [0; 4]);
    slot[2] = 9;

    assert_eq!(list.first(), Ok(&[0, 0, 9, 0]));
}

#[test]
fn test_append_failure_leaves_list_unchanged() {
    let alloc = FailingAlloc::new();
    let mut list = LinkedList::<i32, _, _>::new_in(BitwiseHooks, &alloc);
    list.append(&1).expect("Failed to append(..)");

    alloc.fail_always();

    assert_eq!(list.append(&2).map(|v| *v), Err(VectorError::OutOfMemory));
    assert_eq!(list.prepend(&0).map(|v| *v), Err(VectorError::OutOfMemory));
    assert_eq!(collect(&list), vec![1]);
}

#[test]
fn test_rejected_copy_releases_node() {
    let alloc = CountingAlloc::new();
    let hooks = Tracker {
        reject: Some(5),
        ..Tracker::default()
    };
    let mut list = LinkedList::new_in(hooks, &alloc);

    assert_eq!(list.append(&5).map(|v| *v), Err(VectorError::OutOfMemory));
    assert!(list.is_empty());
    assert_eq!(alloc.allocations(), 1);
    assert_eq!(alloc.live(), 0);
}

// =============================================================================
// remove_first() / remove_last() / clear()
// =============================================================================

#[test]
fn test_remove_first_and_last() {
    let hooks = Tracker::default();
    let mut list = LinkedList::new_in(hooks.clone(), SystemAlloc);
    for value in 1..=4 {
        list.append(&value).expect("Failed to append(..)");
    }

    list.remove_first().expect("Failed to remove_first()");
    list.remove_last().expect("Failed to remove_last()");

    assert_eq!(collect(&list), vec![2, 3]);
    assert_eq!(list.last(), Ok(&3));
    assert_eq!(*hooks.destroyed.borrow(), vec![1, 4]);
}

#[test]
fn test_remove_until_empty() {
    let mut list = LinkedList::new();
    list.append(&1).expect("Failed to append(..)");
    list.append(&2).expect("Failed to append(..)");

    list.remove_last().expect("Failed to remove_last()");
    list.remove_last().expect("Failed to remove_last()");

    assert!(list.is_empty());
    assert_eq!(list.remove_last(), Err(VectorError::EmptyContainer));
    assert_eq!(list.remove_first(), Err(VectorError::EmptyContainer));

    list.append(&3).expect("Failed to append(..)");
    assert_eq!(list.first(), Ok(&3));
    assert_eq!(list.last(), Ok(&3));
}

#[test]
fn test_pop_front_skips_destroy() {
    let hooks = Tracker::default();
    let mut list = LinkedList::new_in(hooks.clone(), SystemAlloc);
    list.push_back(4).expect("Failed to push_back(..)");
    list.push_front(3).expect("Failed to push_front(..)");

    assert_eq!(list.pop_front(), Ok(3));
    assert_eq!(list.pop_front(), Ok(4));
    assert_eq!(list.pop_front(), Err(VectorError::EmptyContainer));
    assert!(hooks.destroyed.borrow().is_empty());
}

#[test]
fn test_clear_and_drop_destroy_in_order_and_release_nodes() {
    let alloc = CountingAlloc::new();
    let hooks = Tracker::default();

    {
        let mut list = LinkedList::new_in(hooks.clone(), &alloc);
        for value in [5, 6, 7] {
            list.append(&value).expect("Failed to append(..)");
        }

        list.clear();
        assert!(list.is_empty());
        assert_eq!(alloc.live(), 0);

        list.append(&8).expect("Failed to append(..)");
    }

    assert_eq!(*hooks.destroyed.borrow(), vec![5, 6, 7, 8]);
    assert_eq!(alloc.allocations(), 4);
    assert_eq!(alloc.live(), 0);
}

// =============================================================================
// find() / iter()
// =============================================================================

#[test]
fn test_find_first_match() {
    let mut list = LinkedList::new();
    for value in [4, 9, 16, 25] {
        list.append(&value).expect("Failed to append(..)");
    }

    assert_eq!(list.find(|v| v % 2 == 1), Some(&9));
    assert_eq!(list.find(|v| *v > 100), None);

    if let Some(found) = list.find_mut(|v| *v == 16) {
        *found = 0;
    }
    assert_eq!(collect(&list), vec![4, 9, 0, 25]);
}

#[test]
fn test_iter_is_exact_size() {
    let mut list = LinkedList::new();
    for value in 0..5 {
        list.append(&value).expect("Failed to append(..)");
    }

    let mut iter = list.iter();
    iter.next();

    assert_eq!(iter.len(), 4);

    for value in &mut list {
        *value *= 2;
    }
    assert_eq!(collect(&list), vec![0, 2, 4, 6, 8]);
    assert_eq!(format!("{list:?}"), "[0, 2, 4, 6, 8]");
}

// =============================================================================
// try_clone()
// =============================================================================

#[test]
fn test_try_clone_copies_through_hooks() {
    let mut original = LinkedList::new();
    original.append(&1).expect("Failed to append(..)");
    original.append(&2).expect("Failed to append(..)");

    let mut copy = original.try_clone().expect("Failed to try_clone()");
    copy.remove_first().expect("Failed to remove_first()");

    assert_eq!(collect(&original), vec![1, 2]);
    assert_eq!(collect(&copy), vec![2]);
}

#[test]
fn test_list_of_vectors_in_arena() {
    let arena = FreeListArena::<2048>::new();

    {
        let row = Vector::try_from_slice_in(&[1u8, 2, 3], 0, BitwiseHooks, &arena)
            .expect("Failed to try_from_slice_in(..)");
        let mut rows = LinkedList::new_in(DeepHooks, &arena);

        rows.append(&row).expect("Failed to append(..)");
        rows.append(&row).expect("Failed to append(..)");
        rows.last_mut()
            .expect("Failed to last_mut()")
            .add(&4)
            .expect("Failed to add(..)");

        let copy = rows.try_clone().expect("Failed to try_clone()");

        assert_eq!(rows, copy);
        assert_eq!(copy.last().expect("Failed to last()").as_slice(), &[1, 2, 3, 4]);
        assert_eq!(row.as_slice(), &[1, 2, 3]);
    }

    assert_eq!(arena.block_count(), 0);
}

proptest! {
    #[test]
    fn list_tracks_deque_model(ops in prop::collection::vec((0u8..5, any::<i32>()), 0..64)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();

        for (op, value) in ops {
            match op {
                0 => {
                    list.append(&value).expect("Failed to append(..)");
                    model.push_back(value);
                }
                1 => {
                    list.prepend(&value).expect("Failed to prepend(..)");
                    model.push_front(value);
                }
                2 => {
                    let expected = model.pop_front().map(|_| ()).ok_or(VectorError::EmptyContainer);
                    prop_assert_eq!(list.remove_first(), expected);
                }
                3 => {
                    let expected = model.pop_back().map(|_| ()).ok_or(VectorError::EmptyContainer);
                    prop_assert_eq!(list.remove_last(), expected);
                }
                _ => {
                    list.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert!(list.iter().eq(model.iter()));
            prop_assert_eq!(list.first().ok(), model.front());
            prop_assert_eq!(list.last().ok(), model.back());
        }
    }
}
