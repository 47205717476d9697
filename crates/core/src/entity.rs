//! Records with a stable identity.

use crate::id::RecordId;

/// A record listed on one of the dashboard screens.
///
/// Edits replace every field of a record except its id.
pub trait Entity {
    fn id(&self) -> RecordId;
}

/// Index of the record with `id`, if present.
pub fn locate<E: Entity>(records: &[E], id: RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// The record with `id`, if present.
pub fn lookup<E: Entity>(records: &[E], id: RecordId) -> Option<&E> {
    records.iter().find(|record| record.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(RecordId);

    impl Entity for Row {
        fn id(&self) -> RecordId {
            self.0
        }
    }

    #[test]
    fn locate_and_lookup_by_id() {
        let rows = vec![Row(RecordId::new()), Row(RecordId::new())];
        let second = rows[1].id();

        assert_eq!(locate(&rows, second), Some(1));
        assert_eq!(lookup(&rows, second).map(Entity::id), Some(second));
        assert_eq!(locate(&rows, RecordId::new()), None);
    }
}
