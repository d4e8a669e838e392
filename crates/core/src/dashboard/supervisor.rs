//! Supervisor dashboard summary.

use serde::Serialize;

use super::grouping::{resolve_groups, OrganizationGroup};
use super::{percentage, ratio};
use crate::identity::Identity;
use crate::organization::Organization;
use crate::report::{Report, ReportStatus};

/// A pending report together with its author's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingReport {
    pub report: Report,
    pub student_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupervisorSummary {
    pub assigned_students: usize,
    pub organization_count: usize,
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    /// `reviewed / total`, `0.0` when there are no reports.
    pub review_rate: f64,
    pub review_rate_pct: u8,
    pub organization_groups: Vec<OrganizationGroup>,
    pub pending_reports: Vec<PendingReport>,
}

/// Summarize the reports of the students assigned to a supervisor.
pub fn supervisor_summary(
    assigned: &[&Identity],
    reports: &[Report],
    organizations: &[Organization],
) -> SupervisorSummary {
    let relevant: Vec<&Report> = reports
        .iter()
        .filter(|report| assigned.iter().any(|s| s.id == report.student_id))
        .collect();

    let pending_reports: Vec<PendingReport> = relevant
        .iter()
        .filter(|r| r.status == ReportStatus::Pending)
        .map(|report| PendingReport {
            report: (*report).clone(),
            student_name: assigned
                .iter()
                .find(|s| s.id == report.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
        })
        .collect();

    let total = relevant.len();
    let pending = pending_reports.len();
    let reviewed = total - pending;
    let review_rate = ratio(reviewed, total);

    let organization_groups = resolve_groups(assigned.iter().copied(), &[], organizations);

    SupervisorSummary {
        assigned_students: assigned.len(),
        organization_count: organization_groups.len(),
        total,
        pending,
        reviewed,
        review_rate,
        review_rate_pct: percentage(review_rate),
        organization_groups,
        pending_reports,
    }
}
