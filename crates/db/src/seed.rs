//! Demo seed data and JSON seed loading.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use siwes_core::assignment::Assignment;
use siwes_core::dashboard::UNASSIGNED_GROUP;
use siwes_core::identity::{Identity, PaymentStatus};
use siwes_core::message::Message;
use siwes_core::organization::Organization;
use siwes_core::report::{Report, ReportStatus};
use siwes_core::roles::Role;
use siwes_core::types::{Date, Timestamp};

use crate::dataset::Dataset;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid seed data: {0}")]
    Invalid(String),
}

/// Load and validate a JSON seed file laid out like [`Dataset`].
pub fn load_seed_file(path: &Path) -> Result<Dataset, SeedError> {
    let path_str = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path_str.clone(),
        source,
    })?;
    let mut dataset: Dataset = serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path_str.clone(),
        source,
    })?;

    dataset.identities = dataset
        .identities
        .into_iter()
        .map(Identity::normalized)
        .collect();
    validate_dataset(&dataset)?;

    tracing::info!(
        path = %path_str,
        identities = dataset.identities.len(),
        reports = dataset.reports.len(),
        "Loaded seed file"
    );
    Ok(dataset)
}

/// Check ids are unique and every reference points at a known record.
pub fn validate_dataset(dataset: &Dataset) -> Result<(), SeedError> {
    let mut identity_ids = HashSet::new();
    for identity in &dataset.identities {
        if !identity_ids.insert(identity.id.as_str()) {
            return Err(SeedError::Invalid(format!(
                "duplicate identity id '{}'",
                identity.id
            )));
        }
    }

    let mut organization_ids = HashSet::new();
    for organization in &dataset.organizations {
        if organization.id == UNASSIGNED_GROUP {
            return Err(SeedError::Invalid(format!(
                "organization id '{UNASSIGNED_GROUP}' is reserved for unplaced students"
            )));
        }
        if !organization_ids.insert(organization.id.as_str()) {
            return Err(SeedError::Invalid(format!(
                "duplicate organization id '{}'",
                organization.id
            )));
        }
    }

    let role_of = |id: &str| {
        dataset
            .identities
            .iter()
            .find(|identity| identity.id == id)
            .map(|identity| identity.role)
    };

    for report in &dataset.reports {
        if role_of(&report.student_id) != Some(Role::Student) {
            return Err(SeedError::Invalid(format!(
                "report '{}' references unknown student '{}'",
                report.id, report.student_id
            )));
        }
        if report.week == 0 {
            return Err(SeedError::Invalid(format!(
                "report '{}' has week 0",
                report.id
            )));
        }
        if report.feedback.is_some() && report.status != ReportStatus::Reviewed {
            return Err(SeedError::Invalid(format!(
                "report '{}' has feedback but is not reviewed",
                report.id
            )));
        }
    }

    for assignment in &dataset.assignments {
        if role_of(&assignment.supervisor_id) != Some(Role::Supervisor)
            || role_of(&assignment.student_id) != Some(Role::Student)
        {
            return Err(SeedError::Invalid(format!(
                "assignment {} -> {} does not link a supervisor to a student",
                assignment.supervisor_id, assignment.student_id
            )));
        }
    }

    for message in &dataset.messages {
        if role_of(&message.sender_id).is_none() || role_of(&message.receiver_id).is_none() {
            return Err(SeedError::Invalid(format!(
                "message '{}' references an unknown user",
                message.id
            )));
        }
    }

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> Date {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn at(day: Date, hour: u32, minute: u32) -> Timestamp {
    day.and_hms_opt(hour, minute, 0)
        .expect("seed times are valid")
        .and_utc()
}

/// The built-in demo data used when no seed file is configured.
pub fn demo_dataset() -> Dataset {
    let identities = vec![
        Identity::new("student1", "John Doe", "student@aapoly.edu.ng", Role::Student)
            .with_organization("org1")
            .with_payment_status(PaymentStatus::Verified)
            .with_student_id("AAP/CS/19/0001"),
        Identity::new("student2", "Jane Smith", "student2@aapoly.edu.ng", Role::Student)
            .with_organization("org2")
            .with_payment_status(PaymentStatus::Pending)
            .with_student_id("AAP/CS/19/0002"),
        Identity::new(
            "supervisor1",
            "Dr. Ahmed Mohammed",
            "supervisor@aapoly.edu.ng",
            Role::Supervisor,
        ),
        Identity::new(
            "coordinator1",
            "Prof. Elizabeth Adeyemi",
            "coordinator@aapoly.edu.ng",
            Role::Coordinator,
        ),
    ];

    let organizations = vec![
        Organization {
            id: "org1".into(),
            name: "Tech Solutions Ltd".into(),
            address: "123 Tech Lane, Lekki".into(),
            state: "Lagos".into(),
            lga: "Lekki".into(),
            contact_person: "Ade Johnson".into(),
            contact_phone: "08012345678".into(),
            contact_email: "ade@techsolutions.com".into(),
        },
        Organization {
            id: "org2".into(),
            name: "Global Systems Inc".into(),
            address: "456 Global Road, Ikeja".into(),
            state: "Lagos".into(),
            lga: "Ikeja".into(),
            contact_person: "Bisi Williams".into(),
            contact_phone: "08098765432".into(),
            contact_email: "bisi@globalsys.com".into(),
        },
    ];

    let reports = vec![
        Report {
            id: "report1".into(),
            student_id: "student1".into(),
            title: "Introduction to the Company".into(),
            description: "This week I was introduced to the company structure and their \
                          main services."
                .into(),
            week: 1,
            date: date(2023, 6, 5),
            file_url: None,
            status: ReportStatus::Reviewed,
            feedback: Some("Good first report. Keep it up!".into()),
        },
        Report {
            id: "report2".into(),
            student_id: "student1".into(),
            title: "Learning the Tech Stack".into(),
            description: "Started familiarizing myself with the company technology stack \
                          which includes React, Node.js and MongoDB."
                .into(),
            week: 2,
            date: date(2023, 6, 12),
            file_url: None,
            status: ReportStatus::Pending,
            feedback: None,
        },
        Report {
            id: "report3".into(),
            student_id: "student2".into(),
            title: "First Week at Global Systems".into(),
            description: "Orientation and introduction to company values and policies.".into(),
            week: 1,
            date: date(2023, 6, 5),
            file_url: None,
            status: ReportStatus::Reviewed,
            feedback: Some(
                "More detail needed. Explain what specific activities you participated in."
                    .into(),
            ),
        },
    ];

    let day = date(2023, 6, 15);
    let messages = vec![
        Message {
            id: "message1".into(),
            sender_id: "student1".into(),
            receiver_id: "supervisor1".into(),
            content: "Hello Dr. Mohammed, I have a question about my week 2 report.".into(),
            timestamp: at(day, 10, 30),
            read: true,
        },
        Message {
            id: "message2".into(),
            sender_id: "supervisor1".into(),
            receiver_id: "student1".into(),
            content: "Hi John, what is your question?".into(),
            timestamp: at(day, 11, 45),
            read: true,
        },
        Message {
            id: "message3".into(),
            sender_id: "student1".into(),
            receiver_id: "supervisor1".into(),
            content: "Should I include the technical details of the projects I worked on?"
                .into(),
            timestamp: at(day, 12, 15),
            read: false,
        },
    ];

    let assignments = vec![
        Assignment::new("supervisor1", "student1"),
        Assignment::new("supervisor1", "student2"),
    ];

    Dataset {
        identities,
        organizations,
        reports,
        messages,
        assignments,
    }
}
