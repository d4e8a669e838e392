//! Student dashboard summary.

use serde::Serialize;

use crate::identity::{Identity, PaymentStatus};
use crate::organization::{find_organization, Organization};
use crate::report::{Report, TARGET_REPORT_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    /// Percentage of the programme's expected reports submitted, capped at 100.
    pub progress: u8,
    pub organization: Option<Organization>,
    pub payment_status: PaymentStatus,
    /// The student's reports, most recent week first.
    pub reports: Vec<Report>,
}

/// Progress towards [`TARGET_REPORT_COUNT`] reports, as a whole percentage.
pub fn report_progress(submitted: usize) -> u8 {
    let pct = (submitted as f64 / TARGET_REPORT_COUNT as f64 * 100.0).round();
    pct.min(100.0) as u8
}

pub fn student_summary(
    student: &Identity,
    reports: &[Report],
    organizations: &[Organization],
) -> StudentSummary {
    let mut own: Vec<Report> = reports
        .iter()
        .filter(|report| report.student_id == student.id)
        .cloned()
        .collect();
    own.sort_by(|a, b| b.week.cmp(&a.week));

    let pending = own
        .iter()
        .filter(|r| r.is_pending())
        .count();
    let reviewed = own.len() - pending;

    StudentSummary {
        total: own.len(),
        pending,
        reviewed,
        progress: report_progress(own.len()),
        organization: find_organization(organizations, student.organization()).cloned(),
        payment_status: student.payment_status.unwrap_or(PaymentStatus::Pending),
        reports: own,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::report::ReportStatus;
    use crate::roles::Role;

    fn report(id: &str, student: &str, week: u32, status: ReportStatus) -> Report {
        Report {
            id: id.into(),
            student_id: student.into(),
            title: format!("Week {week}"),
            description: String::new(),
            week,
            date: NaiveDate::from_ymd_opt(2023, 6, 5).unwrap(),
            file_url: None,
            status,
            feedback: (status == ReportStatus::Reviewed).then(|| "ok".to_string()),
        }
    }

    fn org(id: &str) -> Organization {
        Organization {
            id: id.into(),
            name: format!("Org {id}"),
            address: String::new(),
            state: "Lagos".into(),
            lga: "Ikeja".into(),
            contact_person: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
        }
    }

    #[test]
    fn fresh_student_has_zero_summary_and_pending_badge() {
        let u1 = Identity::new("u1", "U One", "u1@x", Role::Student)
            .with_payment_status(PaymentStatus::Pending);
        let summary = student_summary(&u1, &[], &[]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.reviewed, 0);
        assert_eq!(summary.progress, 0);
        assert_eq!(summary.payment_status, PaymentStatus::Pending);
        assert!(summary.organization.is_none());
    }

    #[test]
    fn counts_only_own_reports_and_resolves_organization() {
        let student = Identity::new("s1", "S", "s@x", Role::Student).with_organization("org1");
        let reports = vec![
            report("r1", "s1", 1, ReportStatus::Reviewed),
            report("r2", "s1", 2, ReportStatus::Pending),
            report("r3", "s2", 1, ReportStatus::Reviewed),
        ];
        let summary = student_summary(&student, &reports, &[org("org1"), org("org2")]);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.reviewed, 1);
        assert_eq!(summary.progress, 8);
        assert_eq!(summary.organization.unwrap().id, "org1");
        assert_eq!(summary.reports[0].week, 2);
    }

    #[test]
    fn progress_is_capped_at_one_hundred() {
        assert_eq!(report_progress(0), 0);
        assert_eq!(report_progress(12), 50);
        assert_eq!(report_progress(24), 100);
        assert_eq!(report_progress(40), 100);
    }

    #[test]
    fn missing_organization_resolves_to_none() {
        let student = Identity::new("s1", "S", "s@x", Role::Student).with_organization("gone");
        let summary = student_summary(&student, &[], &[org("org1")]);
        assert!(summary.organization.is_none());
    }
}
