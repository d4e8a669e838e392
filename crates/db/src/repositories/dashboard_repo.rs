//! Dashboard summaries computed over one consistent snapshot of the store.

use siwes_core::assignment::assigned_students;
use siwes_core::dashboard::{
    coordinator_summary, student_summary, supervisor_summary, CoordinatorSummary, StudentSummary,
    SupervisorSummary,
};
use siwes_core::identity::Identity;

use crate::DataStore;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn student(store: &DataStore, student: &Identity) -> StudentSummary {
        let data = store.read().await;
        student_summary(student, &data.reports, &data.organizations)
    }

    pub async fn supervisor(store: &DataStore, supervisor_id: &str) -> SupervisorSummary {
        let data = store.read().await;
        let assigned = assigned_students(supervisor_id, &data.assignments, &data.identities);
        supervisor_summary(&assigned, &data.reports, &data.organizations)
    }

    pub async fn coordinator(store: &DataStore) -> CoordinatorSummary {
        let data = store.read().await;
        coordinator_summary(&data.identities, &data.reports, &data.organizations)
    }
}
