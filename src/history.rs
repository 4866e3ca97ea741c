//! Ordered history list operations
//!
//! The history list is a plain `Vec<String>`; entries carry no ids or
//! timestamps, so the value itself is both the list key and the identity
//! used by reorder and delete. Order is owned by the backend; the panel only
//! permutes its mirror of it.

/// Move the entry at `old_index` so it lands at `new_index` (remove, then
/// insert). Returns the permuted list, or the input unchanged when either
/// index is out of bounds or both are equal.
pub fn move_entry(mut entries: Vec<String>, old_index: usize, new_index: usize) -> Vec<String> {
    if old_index == new_index || old_index >= entries.len() || new_index >= entries.len() {
        return entries;
    }

    let entry = entries.remove(old_index);
    entries.insert(new_index, entry);
    entries
}

/// Remove every entry equal to `value`. Duplicates collapse: this is a
/// filter, not an indexed removal.
pub fn remove_matching(entries: Vec<String>, value: &str) -> Vec<String> {
    entries.into_iter().filter(|e| e != value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_entry_to_end() {
        // Drag "a" onto "c": ["a","b","c"] -> ["b","c","a"]
        let moved = move_entry(list(&["a", "b", "c"]), 0, 2);
        assert_eq!(moved, list(&["b", "c", "a"]));
    }

    #[test]
    fn test_move_entry_to_front() {
        let moved = move_entry(list(&["a", "b", "c"]), 2, 0);
        assert_eq!(moved, list(&["c", "a", "b"]));
    }

    #[test]
    fn test_move_entry_same_index_is_noop() {
        let moved = move_entry(list(&["a", "b"]), 1, 1);
        assert_eq!(moved, list(&["a", "b"]));
    }

    #[test]
    fn test_move_entry_out_of_bounds_is_noop() {
        let moved = move_entry(list(&["a", "b"]), 0, 5);
        assert_eq!(moved, list(&["a", "b"]));
        let moved = move_entry(list(&["a", "b"]), 5, 0);
        assert_eq!(moved, list(&["a", "b"]));
    }

    #[test]
    fn test_remove_matching() {
        let filtered = remove_matching(list(&["x", "y"]), "x");
        assert_eq!(filtered, list(&["y"]));
    }

    #[test]
    fn test_remove_matching_collapses_duplicates() {
        let filtered = remove_matching(list(&["a", "b", "a", "c", "a"]), "a");
        assert_eq!(filtered, list(&["b", "c"]));
    }

    #[test]
    fn test_remove_matching_is_idempotent() {
        let once = remove_matching(list(&["x", "y"]), "x");
        let twice = remove_matching(once.clone(), "x");
        assert_eq!(once, twice);
    }

    fn multiset(entries: &[String]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for e in entries {
            *counts.entry(e.as_str()).or_insert(0) += 1;
        }
        counts
    }

    proptest! {
        #[test]
        fn move_entry_preserves_multiset_and_places_moved(
            entries in proptest::collection::vec("[a-z]{0,8}", 1..32),
            old in 0usize..32,
            new in 0usize..32,
        ) {
            prop_assume!(old < entries.len() && new < entries.len() && old != new);

            let moved_value = entries[old].clone();
            let permuted = move_entry(entries.clone(), old, new);

            prop_assert_eq!(permuted.len(), entries.len());
            prop_assert_eq!(multiset(&permuted), multiset(&entries));
            prop_assert_eq!(&permuted[new], &moved_value);
        }
    }
}
