//! Transition classification
//!
//! Every status may move to every other status directly; the only thing to
//! decide is whether a drop changes anything.

use crate::error::Result;
use crate::types::Status;

/// Classification of a proposed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status; ignore silently
    NoOp,
    /// Different status; commit it
    Effective { from: Status, to: Status },
}

impl Transition {
    pub fn is_effective(&self) -> bool {
        matches!(self, Self::Effective { .. })
    }
}

/// Classify a transition between two known statuses
pub fn classify(old: Status, new: Status) -> Transition {
    if old == new {
        Transition::NoOp
    } else {
        Transition::Effective { from: old, to: new }
    }
}

/// Classify a drop onto the column identified by `target_key`
///
/// Keys outside the fixed column set are `InvalidStatus` errors.
pub fn classify_target(old: Status, target_key: &str) -> Result<Transition> {
    let new = target_key.parse::<Status>()?;
    Ok(classify(old, new))
}
