//! Derived-field change tracking
//!
//! Host modules watch values derived from child rows, such as a document's
//! latest revision date. Loading the record fills those values in for the
//! first time; that hydration must not be audited as an edit.

use crate::board::lock;
use crate::types::RecordId;
use std::collections::HashMap;
use std::sync::Mutex;

/// A real change of a watched field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub before: String,
    pub after: String,
}

#[derive(Debug)]
struct Observed {
    last: Option<String>,
    /// Still waiting for the first non-empty value
    initializing: bool,
}

/// Last observed value per `(record, field)`.
///
/// Entries are only dropped through `forget` and `forget_all`; the owner
/// clears a record when it is deselected or deleted.
#[derive(Debug, Default)]
pub struct DerivedFieldTracker {
    fields: Mutex<HashMap<(RecordId, String), Observed>>,
}

impl DerivedFieldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation and report it if it is a real change.
    ///
    /// Empty strings count as unset. The first observation of a field, and
    /// the first value arriving after an unset start, are hydration.
    pub fn observe(&self, record_id: &RecordId, field: &str, value: Option<&str>) -> Option<FieldChange> {
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);
        let mut fields = lock(&self.fields);

        let key = (record_id.clone(), field.to_string());
        let Some(observed) = fields.get_mut(&key) else {
            let initializing = value.is_none();
            fields.insert(
                key,
                Observed {
                    last: value,
                    initializing,
                },
            );
            return None;
        };

        if observed.initializing {
            if value.is_some() {
                observed.last = value;
                observed.initializing = false;
            }
            return None;
        }

        if observed.last == value {
            return None;
        }

        let before = std::mem::replace(&mut observed.last, value.clone());
        Some(FieldChange {
            before: before.unwrap_or_default(),
            after: value.unwrap_or_default(),
        })
    }

    /// Drop every field of a record so its next load counts as hydration again
    pub fn forget(&self, record_id: &RecordId) {
        lock(&self.fields).retain(|(id, _), _| id != record_id);
    }

    pub fn forget_all(&self) {
        lock(&self.fields).clear();
    }

    /// Number of tracked `(record, field)` pairs
    pub fn len(&self) -> usize {
        lock(&self.fields).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
