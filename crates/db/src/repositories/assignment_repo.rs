//! Repository for supervisor to student assignments.

use siwes_core::assignment::{assigned_students, Assignment};
use siwes_core::error::CoreError;
use siwes_core::identity::Identity;
use siwes_core::roles::Role;

use crate::DataStore;

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Students supervised by `supervisor_id`.
    pub async fn students_of(store: &DataStore, supervisor_id: &str) -> Vec<Identity> {
        let data = store.read().await;
        assigned_students(supervisor_id, &data.assignments, &data.identities)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn is_assigned(store: &DataStore, supervisor_id: &str, student_id: &str) -> bool {
        let data = store.read().await;
        data.assignments
            .iter()
            .any(|a| a.supervisor_id == supervisor_id && a.student_id == student_id)
    }

    /// Assign a student to a supervisor, replacing any previous supervisor.
    pub async fn assign(
        store: &DataStore,
        supervisor_id: &str,
        student_id: &str,
    ) -> Result<Assignment, CoreError> {
        let mut data = store.write().await;

        let role_of = |id: &str| {
            data.identities
                .iter()
                .find(|i| i.id == id)
                .map(|i| i.role)
        };
        match role_of(supervisor_id) {
            Some(Role::Supervisor) => {}
            Some(_) => {
                return Err(CoreError::Validation(format!(
                    "{supervisor_id} is not a supervisor"
                )))
            }
            None => return Err(CoreError::not_found("Supervisor", supervisor_id)),
        }
        match role_of(student_id) {
            Some(Role::Student) => {}
            Some(_) => {
                return Err(CoreError::Validation(format!("{student_id} is not a student")))
            }
            None => return Err(CoreError::not_found("Student", student_id)),
        }

        data.assignments.retain(|a| a.student_id != student_id);
        let assignment = Assignment::new(supervisor_id, student_id);
        data.assignments.push(assignment.clone());
        tracing::info!(supervisor_id, student_id, "Student assigned to supervisor");
        Ok(assignment)
    }
}
