//! Repository for weekly reports.

use siwes_core::error::CoreError;
use siwes_core::report::Report;

use crate::DataStore;

pub struct ReportRepo;

impl ReportRepo {
    /// Reports of one student, ordered by week.
    pub async fn list_for_student(store: &DataStore, student_id: &str) -> Vec<Report> {
        let data = store.read().await;
        let mut reports: Vec<Report> = data
            .reports
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        reports.sort_by_key(|r| r.week);
        reports
    }

    pub async fn find_by_id(store: &DataStore, id: &str) -> Option<Report> {
        let data = store.read().await;
        data.reports.iter().find(|r| r.id == id).cloned()
    }

    pub async fn create(store: &DataStore, report: Report) -> Report {
        let mut data = store.write().await;
        data.reports.push(report.clone());
        tracing::debug!(report_id = %report.id, student_id = %report.student_id, "Report stored");
        report
    }

    /// Apply a review to a stored report.
    pub async fn review(store: &DataStore, id: &str, feedback: &str) -> Result<Report, CoreError> {
        let mut data = store.write().await;
        let report = data
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("Report", id))?;
        report.review(feedback)?;
        Ok(report.clone())
    }
}
