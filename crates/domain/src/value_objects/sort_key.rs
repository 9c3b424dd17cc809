//! Fractional sort-key insertion for manual list ordering.
//!
//! Sort keys only need to define a total order: gaps and fractional
//! values are expected and never compacted. Moving one entry computes a
//! key strictly between its new neighbors (or extends past the edge),
//! so a single move never renumbers the rest of the list.

/// Spacing used when appending or inserting past the first/last key.
pub const SORT_GAP: f64 = 100_000.0;

/// A single `{id, new sort key}` pair produced by a reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct SortUpdate {
    pub id: String,
    pub sort: f64,
}

/// Compute the new sort key for `source_id` when dropped on an entry
/// with key `target_sort`.
///
/// `sibling_sorts` is a snapshot of every other entry's key (source and
/// target both excluded); it does not need to be sorted. An entry moving
/// toward the front of the list (its current key is greater than the
/// target's) lands immediately before the target, otherwise immediately
/// after - matching how a drop on a list row reads visually.
pub fn midpoint_insert(
    source_id: &str,
    source_sort: f64,
    target_sort: f64,
    sibling_sorts: &[f64],
) -> Vec<SortUpdate> {
    let sort = if source_sort > target_sort {
        // Moving earlier: land between the target and its predecessor.
        let lower = sibling_sorts
            .iter()
            .copied()
            .filter(|s| *s < target_sort)
            .max_by(f64::total_cmp);
        match lower {
            Some(lower) => (lower + target_sort) / 2.0,
            None => target_sort - SORT_GAP,
        }
    } else {
        // Moving later: land between the target and its successor.
        let upper = sibling_sorts
            .iter()
            .copied()
            .filter(|s| *s > target_sort)
            .min_by(f64::total_cmp);
        match upper {
            Some(upper) => (target_sort + upper) / 2.0,
            None => target_sort + SORT_GAP,
        }
    };
    vec![SortUpdate {
        id: source_id.to_string(),
        sort,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_earlier_lands_between_predecessor_and_target() {
        let updates = midpoint_insert("c", 300_000.0, 200_000.0, &[100_000.0]);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, "c");
        assert!(updates[0].sort > 100_000.0);
        assert!(updates[0].sort < 200_000.0);
    }

    #[test]
    fn moving_later_lands_between_target_and_successor() {
        let updates = midpoint_insert("a", 1.0, 2.0, &[3.0]);
        assert!(updates[0].sort > 2.0);
        assert!(updates[0].sort < 3.0);
    }

    #[test]
    fn moving_before_the_first_entry_extends_past_it() {
        let updates = midpoint_insert("b", 2.0, 1.0, &[]);
        assert!(updates[0].sort < 1.0);
    }

    #[test]
    fn moving_after_the_last_entry_extends_past_it() {
        let updates = midpoint_insert("a", 1.0, 5.0, &[]);
        assert!(updates[0].sort > 5.0);
    }

    #[test]
    fn neighbors_are_never_touched() {
        let updates = midpoint_insert("c", 9.0, 4.0, &[2.0, 6.0]);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, "c");
    }
}
