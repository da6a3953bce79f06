//! In-memory entity collections.
//!
//! Storage is a plain insertion-ordered vector per collection, which matches
//! the observable behaviour callers depend on: `list` returns records in the
//! order they were created, and deleting in the middle shifts nothing else.
//! Lookup is a linear scan; collection sizes here are dashboard-scale, not
//! database-scale.

use hms_domain::{Appointment, Bill, Doctor, MedicalRecord, Patient};
use hms_uuid::RecordId;

/// A record stored in a collection, addressable by its immutable id.
pub(crate) trait Keyed {
    fn id(&self) -> &RecordId;
}

impl Keyed for Patient {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for Doctor {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for Appointment {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for MedicalRecord {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for Bill {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// One insertion-ordered entity collection.
#[derive(Clone, Debug)]
pub(crate) struct Collection<E> {
    items: Vec<E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Keyed + Clone> Collection<E> {
    /// Snapshot of all records, in insertion order.
    pub(crate) fn list(&self) -> Vec<E> {
        self.items.clone()
    }

    pub(crate) fn get(&self, id: &RecordId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Appends a record. Key uniqueness is the caller's invariant: ids are
    /// freshly generated per insert and never reused.
    pub(crate) fn insert(&mut self, item: E) {
        self.items.push(item);
    }

    /// Mutates the record with the given id in place, returning the updated
    /// record, or `None` if the id is absent.
    pub(crate) fn update_with(
        &mut self,
        id: &RecordId,
        mutate: impl FnOnce(&mut E),
    ) -> Option<E> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        mutate(item);
        Some(item.clone())
    }

    /// Removes the record with the given id. Returns `false` (not an error)
    /// when the id is absent.
    pub(crate) fn remove(&mut self, id: &RecordId) -> bool {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.iter()
    }
}

/// The five collections the data service is sole authority over.
#[derive(Clone, Debug, Default)]
pub(crate) struct Collections {
    pub(crate) patients: Collection<Patient>,
    pub(crate) doctors: Collection<Doctor>,
    pub(crate) appointments: Collection<Appointment>,
    pub(crate) medical_records: Collection<MedicalRecord>,
    pub(crate) bills: Collection<Bill>,
}
