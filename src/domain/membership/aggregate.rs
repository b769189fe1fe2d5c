//! Membership aggregate entity.
//!
//! The Membership aggregate represents one member's subscription to a
//! plan. The end date is derived from the plan duration, never user
//! supplied; the invoice link is recorded at most once.
//!
//! # Design Decisions
//!
//! - **Explicit lifecycle calls**: `validate()`, `submit()`, `cancel()` are
//!   invoked deliberately by handlers, never by framework reflection
//! - **Derived expiry**: every validation pass recomputes `end_date`, so no
//!   user override survives a re-save
//! - **Set-once invoice**: the aggregate guards the invoice link, and the
//!   repository enforces the same rule atomically for concurrent submits

use crate::domain::foundation::{
    InvoiceId, LocalDate, MemberId, MembershipId, MembershipTypeId, StateMachine, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::{DocState, MembershipError, MembershipStatus};
use crate::domain::membership_type::MembershipType;

/// Membership aggregate - one member's subscription instance.
///
/// # Invariants
///
/// - `start_date <= end_date` whenever `end_date` is set
/// - `end_date = start_date + plan.duration_months` after every
///   successful validation
/// - `invoice` is populated at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// Member who owns this subscription.
    pub member: MemberId,

    /// Plan this subscription is an instance of.
    pub membership_type: MembershipTypeId,

    /// First day of the subscription period.
    pub start_date: LocalDate,

    /// Last day of the subscription period. Derived, never user supplied.
    pub end_date: Option<LocalDate>,

    /// Member-facing subscription status.
    pub status: MembershipStatus,

    /// Record submission state.
    pub doc_state: DocState,

    /// Generated invoice reference, set at most once.
    pub invoice: Option<InvoiceId>,

    /// When the membership was created.
    pub created_at: Timestamp,

    /// When the membership was last updated.
    pub updated_at: Timestamp,
}

impl Membership {
    /// Create a new draft membership.
    pub fn new(
        id: MembershipId,
        member: MemberId,
        membership_type: MembershipTypeId,
        start_date: LocalDate,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            member,
            membership_type,
            start_date,
            end_date: None,
            status: MembershipStatus::Draft,
            doc_state: DocState::Draft,
            invoice: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the record against its plan.
    ///
    /// Date validation runs strictly before expiry computation, so an
    /// invalid range is rejected before `end_date` is recomputed.
    ///
    /// # Errors
    ///
    /// Returns `DateRange` if an existing `end_date` precedes `start_date`.
    pub fn validate(&mut self, plan: &MembershipType) -> Result<(), MembershipError> {
        self.validate_dates()?;
        self.compute_expiry(plan);
        Ok(())
    }

    /// Reject a pre-existing end date that precedes the start date.
    fn validate_dates(&self) -> Result<(), MembershipError> {
        if let Some(end) = self.end_date {
            if end.is_before(&self.start_date) {
                return Err(MembershipError::date_range(self.start_date, end));
            }
        }
        Ok(())
    }

    /// Derive the expiry date from the plan duration, overwriting any
    /// prior value.
    fn compute_expiry(&mut self, plan: &MembershipType) {
        self.end_date = Some(plan.expiry_from(self.start_date));
        self.updated_at = Timestamp::now();
    }

    /// Confirm the record: Draft -> Submitted, and the subscription goes
    /// Active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the record is not a draft.
    pub fn submit(&mut self) -> Result<(), MembershipError> {
        self.doc_state = self
            .doc_state
            .transition_to(DocState::Submitted)
            .map_err(|_| {
                MembershipError::invalid_state(format!("{:?}", self.doc_state), "submit")
            })?;
        self.status = self
            .status
            .transition_to(MembershipStatus::Active)
            .map_err(|_| {
                MembershipError::invalid_state(format!("{:?}", self.status), "activate")
            })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Revoke a submitted record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the record was never submitted.
    pub fn cancel(&mut self) -> Result<(), MembershipError> {
        self.doc_state = self
            .doc_state
            .transition_to(DocState::Cancelled)
            .map_err(|_| {
                MembershipError::invalid_state(format!("{:?}", self.doc_state), "cancel")
            })?;
        self.status = self
            .status
            .transition_to(MembershipStatus::Cancelled)
            .map_err(|_| {
                MembershipError::invalid_state(format!("{:?}", self.status), "cancel")
            })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the subscription period as over.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the subscription is not active.
    pub fn expire(&mut self) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(MembershipStatus::Expired)
            .map_err(|_| {
                MembershipError::invalid_state(format!("{:?}", self.status), "expire")
            })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True if invoice generation should fire: the record is submitted and
    /// no invoice has been recorded yet.
    pub fn needs_invoice(&self) -> bool {
        self.doc_state == DocState::Submitted && self.invoice.is_none()
    }

    /// Record the generated invoice reference.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceAlreadyRecorded` if an invoice is already linked.
    /// This guard is backed by the repository's atomic set-once write for
    /// concurrent submissions.
    pub fn record_invoice(&mut self, invoice: InvoiceId) -> Result<(), MembershipError> {
        if self.invoice.is_some() {
            return Err(MembershipError::invoice_already_recorded(self.id));
        }
        self.invoice = Some(invoice);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True if the membership expires within the inclusive window
    /// `[today, today + window_days]`.
    pub fn expires_within(&self, today: LocalDate, window_days: i64) -> bool {
        match self.end_date {
            Some(end) => {
                let days = end.days_since(&today);
                (0..=window_days).contains(&days)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;

    fn date(y: i32, m: u32, d: u32) -> LocalDate {
        LocalDate::from_ymd(y, m, d).unwrap()
    }

    fn monthly_plan() -> MembershipType {
        MembershipType::new(
            MembershipTypeId::new(),
            "Monthly",
            1,
            Money::from_cents(5000).unwrap(),
        )
        .unwrap()
    }

    fn draft_membership(start: LocalDate) -> Membership {
        Membership::new(
            MembershipId::new(),
            MemberId::new("CUST-1").unwrap(),
            MembershipTypeId::new(),
            start,
        )
    }

    // Validation tests

    #[test]
    fn validate_derives_end_date_from_plan() {
        let plan = monthly_plan();
        let mut membership = draft_membership(date(2024, 1, 15));

        membership.validate(&plan).unwrap();
        assert_eq!(membership.end_date, Some(date(2024, 2, 15)));
    }

    #[test]
    fn validate_clamps_month_end_start() {
        let plan = monthly_plan();
        let mut membership = draft_membership(date(2024, 1, 31));

        membership.validate(&plan).unwrap();
        // 2024 is a leap year, so January 31 clamps to February 29
        assert_eq!(membership.end_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let plan = monthly_plan();
        let mut membership = draft_membership(date(2024, 2, 1));
        membership.end_date = Some(date(2024, 1, 1));

        let result = membership.validate(&plan);
        assert!(matches!(result, Err(MembershipError::DateRange { .. })));
        // Rejected before recomputation: the stale end date is untouched
        assert_eq!(membership.end_date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn validate_overwrites_user_supplied_end_date() {
        let plan = monthly_plan();
        let mut membership = draft_membership(date(2024, 1, 15));
        membership.end_date = Some(date(2025, 12, 31));

        membership.validate(&plan).unwrap();
        assert_eq!(membership.end_date, Some(date(2024, 2, 15)));
    }

    #[test]
    fn revalidation_is_deterministic() {
        let plan = monthly_plan();
        let mut membership = draft_membership(date(2024, 1, 15));

        membership.validate(&plan).unwrap();
        let first = membership.end_date;
        membership.validate(&plan).unwrap();
        assert_eq!(membership.end_date, first);
    }

    // Lifecycle tests

    #[test]
    fn new_membership_is_draft() {
        let membership = draft_membership(date(2024, 1, 1));
        assert_eq!(membership.status, MembershipStatus::Draft);
        assert_eq!(membership.doc_state, DocState::Draft);
        assert!(membership.invoice.is_none());
    }

    #[test]
    fn submit_activates_and_marks_submitted() {
        let mut membership = draft_membership(date(2024, 1, 1));
        membership.submit().unwrap();

        assert_eq!(membership.doc_state, DocState::Submitted);
        assert_eq!(membership.status, MembershipStatus::Active);
    }

    #[test]
    fn submit_twice_fails() {
        let mut membership = draft_membership(date(2024, 1, 1));
        membership.submit().unwrap();
        assert!(matches!(
            membership.submit(),
            Err(MembershipError::InvalidState { .. })
        ));
    }

    #[test]
    fn cancel_requires_submission() {
        let mut membership = draft_membership(date(2024, 1, 1));
        assert!(membership.cancel().is_err());

        membership.submit().unwrap();
        membership.cancel().unwrap();
        assert_eq!(membership.doc_state, DocState::Cancelled);
        assert_eq!(membership.status, MembershipStatus::Cancelled);
    }

    #[test]
    fn expire_requires_active_status() {
        let mut membership = draft_membership(date(2024, 1, 1));
        assert!(membership.expire().is_err());

        membership.submit().unwrap();
        membership.expire().unwrap();
        assert_eq!(membership.status, MembershipStatus::Expired);
        // The record itself stays submitted
        assert_eq!(membership.doc_state, DocState::Submitted);
    }

    // Invoice guard tests

    #[test]
    fn needs_invoice_only_when_submitted_without_invoice() {
        let mut membership = draft_membership(date(2024, 1, 1));
        assert!(!membership.needs_invoice());

        membership.submit().unwrap();
        assert!(membership.needs_invoice());

        membership
            .record_invoice(InvoiceId::new("SINV-0001").unwrap())
            .unwrap();
        assert!(!membership.needs_invoice());
    }

    #[test]
    fn record_invoice_is_set_once() {
        let mut membership = draft_membership(date(2024, 1, 1));
        membership.submit().unwrap();
        membership
            .record_invoice(InvoiceId::new("SINV-0001").unwrap())
            .unwrap();

        let second = membership.record_invoice(InvoiceId::new("SINV-0002").unwrap());
        assert!(matches!(
            second,
            Err(MembershipError::InvoiceAlreadyRecorded(_))
        ));
        assert_eq!(membership.invoice.unwrap().as_str(), "SINV-0001");
    }

    // Expiry window tests

    #[test]
    fn expires_within_window_boundaries() {
        let today = date(2024, 3, 1);
        let mut membership = draft_membership(date(2024, 2, 1));

        membership.end_date = Some(today); // day 0
        assert!(membership.expires_within(today, 7));

        membership.end_date = Some(today.add_days(7)); // day 7 inclusive
        assert!(membership.expires_within(today, 7));

        membership.end_date = Some(today.add_days(8)); // day 8 excluded
        assert!(!membership.expires_within(today, 7));

        membership.end_date = Some(today.add_days(-1)); // already past
        assert!(!membership.expires_within(today, 7));
    }

    #[test]
    fn expires_within_is_false_without_end_date() {
        let membership = draft_membership(date(2024, 1, 1));
        assert!(!membership.expires_within(date(2024, 1, 1), 7));
    }
}
