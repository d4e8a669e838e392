//! Weekly reports and the review workflow.
//!
//! A report is created `pending` by its student and moves to `reviewed`
//! exactly once, when a supervisor attaches feedback. There is no way back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, EntityId};

/// Number of weekly reports expected over the programme.
pub const TARGET_REPORT_COUNT: usize = 24;

/// Maximum length of a report title.
pub const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: EntityId,
    pub student_id: EntityId,
    pub title: String,
    pub description: String,
    pub week: u32,
    pub date: Date,
    #[serde(default)]
    pub file_url: Option<String>,
    pub status: ReportStatus,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Input for a new weekly report.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub week: u32,
    pub file_url: Option<String>,
}

impl Report {
    /// Create a pending report for `student_id`.
    pub fn submit(student_id: &str, input: NewReport, date: Date) -> Result<Self, CoreError> {
        validate_new_report(&input)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            title: input.title.trim().to_string(),
            description: input.description,
            week: input.week,
            date,
            file_url: input.file_url.filter(|url| !url.trim().is_empty()),
            status: ReportStatus::Pending,
            feedback: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }

    /// Mark the report reviewed with the supervisor's feedback.
    pub fn review(&mut self, feedback: &str) -> Result<(), CoreError> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(CoreError::Validation(
                "Review feedback must not be empty".into(),
            ));
        }
        if self.status == ReportStatus::Reviewed {
            return Err(CoreError::Conflict(format!(
                "Report {} has already been reviewed",
                self.id
            )));
        }
        self.status = ReportStatus::Reviewed;
        self.feedback = Some(feedback.to_string());
        Ok(())
    }
}

/// Validate the user-supplied fields of a new report.
pub fn validate_new_report(input: &NewReport) -> Result<(), CoreError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Report title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Report title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    if input.week == 0 {
        return Err(CoreError::Validation("Report week must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_report(week: u32) -> NewReport {
        NewReport {
            title: "Learning the Tech Stack".into(),
            description: "React, Node.js and MongoDB".into(),
            week,
            file_url: None,
        }
    }

    fn date() -> Date {
        Date::from_ymd_opt(2023, 6, 12).unwrap()
    }

    #[test]
    fn submit_creates_pending_report_without_feedback() {
        let report = Report::submit("student1", new_report(2), date()).unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.feedback.is_none());
        assert_eq!(report.student_id, "student1");
        assert_eq!(report.week, 2);
        assert!(!report.id.is_empty());
    }

    #[test]
    fn week_zero_is_rejected() {
        assert_matches!(
            Report::submit("student1", new_report(0), date()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut input = new_report(1);
        input.title = "   ".into();
        assert_matches!(validate_new_report(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn review_attaches_feedback_once() {
        let mut report = Report::submit("student1", new_report(1), date()).unwrap();
        report.review("ok").unwrap();
        assert_eq!(report.status, ReportStatus::Reviewed);
        assert_eq!(report.feedback.as_deref(), Some("ok"));

        assert_matches!(report.review("again"), Err(CoreError::Conflict(_)));
        assert_eq!(report.status, ReportStatus::Reviewed);
        assert_eq!(report.feedback.as_deref(), Some("ok"));
    }

    #[test]
    fn empty_feedback_leaves_report_pending() {
        let mut report = Report::submit("student1", new_report(1), date()).unwrap();
        assert_matches!(report.review("  "), Err(CoreError::Validation(_)));
        assert!(report.is_pending());
        assert!(report.feedback.is_none());
    }
}
