//! SIWES letter payment rules.
//!
//! Students either pay online (verified immediately) or upload evidence of
//! an offline payment, which stays pending until a coordinator verifies or
//! rejects it. The letter is released only for verified payments.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::{Identity, PaymentStatus};
use crate::organization::Organization;

/// SIWES letter fee in Naira.
pub const SIWES_FEE_NAIRA: u32 = 7_000;

/// How a student settles the fee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Online,
    /// Evidence of an offline payment (uploaded file reference).
    Evidence { reference: String },
}

/// A coordinator's decision on pending evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDecision {
    Verify,
    Reject,
}

/// Status a student ends up with after paying by `method`.
pub fn status_after_payment(
    current: Option<PaymentStatus>,
    method: &PaymentMethod,
) -> Result<PaymentStatus, CoreError> {
    if current == Some(PaymentStatus::Verified) {
        return Err(CoreError::Conflict("Payment has already been verified".into()));
    }
    match method {
        PaymentMethod::Online => Ok(PaymentStatus::Verified),
        PaymentMethod::Evidence { reference } if reference.trim().is_empty() => Err(
            CoreError::Validation("Please select a file to upload".into()),
        ),
        PaymentMethod::Evidence { .. } => Ok(PaymentStatus::Pending),
    }
}

/// Status after a coordinator decides on a student's payment.
///
/// Only pending payments can be decided.
pub fn apply_decision(
    current: Option<PaymentStatus>,
    decision: PaymentDecision,
) -> Result<PaymentStatus, CoreError> {
    match current {
        Some(PaymentStatus::Pending) | None => Ok(match decision {
            PaymentDecision::Verify => PaymentStatus::Verified,
            PaymentDecision::Reject => PaymentStatus::Rejected,
        }),
        Some(other) => Err(CoreError::Conflict(format!(
            "Payment is already {}",
            other.as_str()
        ))),
    }
}

/// The SIWES placement letter released to students with verified payments.
#[derive(Debug, Clone, Serialize)]
pub struct SiwesLetter {
    pub student_name: String,
    pub student_id: Option<String>,
    pub organization: Option<String>,
    pub fee_naira: u32,
}

/// Build the letter for `student`, or refuse if the fee is not verified.
pub fn issue_letter(
    student: &Identity,
    organization: Option<&Organization>,
) -> Result<SiwesLetter, CoreError> {
    if student.payment_badge() != Some(PaymentStatus::Verified) {
        return Err(CoreError::Forbidden(
            "The SIWES letter is available after payment is verified".into(),
        ));
    }
    Ok(SiwesLetter {
        student_name: student.name.clone(),
        student_id: student.student_id.clone(),
        organization: organization.map(|org| org.name.clone()),
        fee_naira: SIWES_FEE_NAIRA,
    })
}
