//! Reminder email templates.
//!
//! Templates are data with named placeholders; rendering is a plain
//! substitution so the wording lives in one place.

use crate::domain::foundation::{LocalDate, MembershipId};

/// Subject line for the expiry reminder.
pub const EXPIRY_REMINDER_SUBJECT: &str = "Your Gym Membership is Expiring Soon";

const EXPIRY_REMINDER_BODY: &str = "\
Dear {member_name},

Your gym membership (ID: {membership_id}) is set to expire on {expiry_date}.
Please renew your membership to continue enjoying our facilities.

Best regards,
Your Gym Team
";

/// Rendered email content: subject plus plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Renders the expiry reminder for one membership.
pub fn expiry_reminder(
    member_name: &str,
    membership_id: &MembershipId,
    expiry_date: &LocalDate,
) -> EmailContent {
    EmailContent {
        subject: EXPIRY_REMINDER_SUBJECT.to_string(),
        body: EXPIRY_REMINDER_BODY
            .replace("{member_name}", member_name)
            .replace("{membership_id}", &membership_id.to_string())
            .replace("{expiry_date}", &expiry_date.to_string()),
    }
}
