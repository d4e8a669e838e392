//! Supervisor to student assignments.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::roles::Role;
use crate::types::EntityId;

/// A student supervised by a supervisor. A student has at most one supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub supervisor_id: EntityId,
    pub student_id: EntityId,
}

impl Assignment {
    pub fn new(supervisor_id: impl Into<EntityId>, student_id: impl Into<EntityId>) -> Self {
        Self {
            supervisor_id: supervisor_id.into(),
            student_id: student_id.into(),
        }
    }
}

/// Students assigned to `supervisor_id`, in the order they appear in `identities`.
pub fn assigned_students<'a>(
    supervisor_id: &str,
    assignments: &[Assignment],
    identities: &'a [Identity],
) -> Vec<&'a Identity> {
    identities
        .iter()
        .filter(|identity| identity.role == Role::Student)
        .filter(|student| {
            assignments
                .iter()
                .any(|a| a.supervisor_id == supervisor_id && a.student_id == student.id)
        })
        .collect()
}

/// The supervisor of a student, if assigned.
pub fn supervisor_of<'a>(student_id: &str, assignments: &'a [Assignment]) -> Option<&'a str> {
    assignments
        .iter()
        .find(|a| a.student_id == student_id)
        .map(|a| a.supervisor_id.as_str())
}
