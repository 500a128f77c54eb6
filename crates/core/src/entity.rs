//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Client-side mirrors of server records (products, cart lines) are entities:
/// two snapshots with the same id describe the same record, even when their
/// fields differ because one of them is stale.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether `other` refers to the same server record.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Replace the entry with the same id as `entity`, or append it if absent.
///
/// Keeps at most one entry per id, which is what optimistic list patches rely on.
pub fn upsert_by_id<E: Entity>(items: &mut Vec<E>, entity: E) {
    match items.iter_mut().find(|existing| existing.same_entity(&entity)) {
        Some(slot) => *slot = entity,
        None => items.push(entity),
    }
}

/// Remove every entry with the given id. Returns whether anything was removed.
pub fn remove_by_id<E: Entity>(items: &mut Vec<E>, id: E::Id) -> bool {
    let before = items.len();
    items.retain(|e| e.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn upsert_replaces_existing_entry_in_place() {
        let mut rows = vec![Row { id: 1, label: "a" }, Row { id: 2, label: "b" }];
        upsert_by_id(&mut rows, Row { id: 1, label: "a2" });

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Row { id: 1, label: "a2" });
    }

    #[test]
    fn upsert_appends_unknown_entry() {
        let mut rows = vec![Row { id: 1, label: "a" }];
        upsert_by_id(&mut rows, Row { id: 7, label: "z" });

        assert_eq!(rows.iter().filter(|r| r.id == 7).count(), 1);
        assert_eq!(rows.last().map(|r| r.label), Some("z"));
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let mut rows = vec![Row { id: 1, label: "a" }];
        assert!(!remove_by_id(&mut rows, 9));
        assert!(remove_by_id(&mut rows, 1));
        assert!(rows.is_empty());
    }

    #[test]
    fn same_entity_ignores_fields() {
        let a = Row { id: 3, label: "old" };
        let b = Row { id: 3, label: "new" };
        assert!(a.same_entity(&b));
    }
}
