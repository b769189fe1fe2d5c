//! Membership-specific error types.
//!
//! Errors related to membership validation, invoice generation, and the
//! downstream collaborators a save or sweep touches.

use crate::domain::foundation::{
    DomainError, ErrorCode, LocalDate, MembershipId, MembershipTypeId,
};
use std::fmt;

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// Referenced plan was not found.
    TypeNotFound(MembershipTypeId),

    /// End date precedes start date. Fatal: the save is aborted.
    DateRange { start: LocalDate, end: LocalDate },

    /// A reference required by a dependent computation is absent.
    MissingReference { field: String },

    /// Invalid lifecycle transition for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Invoice reference is already recorded for this membership.
    InvoiceAlreadyRecorded(MembershipId),

    /// Billing subsystem failure.
    BillingFailed { reason: String },

    /// Catalog subsystem failure.
    CatalogFailed { reason: String },

    /// Member directory failure.
    DirectoryFailed { reason: String },

    /// Mailer failure.
    MailFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error (record store and friends).
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn type_not_found(id: MembershipTypeId) -> Self {
        MembershipError::TypeNotFound(id)
    }

    pub fn date_range(start: LocalDate, end: LocalDate) -> Self {
        MembershipError::DateRange { start, end }
    }

    pub fn missing_reference(field: impl Into<String>) -> Self {
        MembershipError::MissingReference { field: field.into() }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn invoice_already_recorded(id: MembershipId) -> Self {
        MembershipError::InvoiceAlreadyRecorded(id)
    }

    pub fn billing_failed(reason: impl Into<String>) -> Self {
        MembershipError::BillingFailed { reason: reason.into() }
    }

    pub fn catalog_failed(reason: impl Into<String>) -> Self {
        MembershipError::CatalogFailed { reason: reason.into() }
    }

    pub fn directory_failed(reason: impl Into<String>) -> Self {
        MembershipError::DirectoryFailed { reason: reason.into() }
    }

    pub fn mail_failed(reason: impl Into<String>) -> Self {
        MembershipError::MailFailed { reason: reason.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::TypeNotFound(_) => ErrorCode::MembershipTypeNotFound,
            MembershipError::DateRange { .. } => ErrorCode::DateRangeInvalid,
            MembershipError::MissingReference { .. } => ErrorCode::MissingReference,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::InvoiceAlreadyRecorded(_) => ErrorCode::InvoiceAlreadyRecorded,
            MembershipError::BillingFailed { .. } => ErrorCode::BillingError,
            MembershipError::CatalogFailed { .. } => ErrorCode::CatalogError,
            MembershipError::DirectoryFailed { .. } => ErrorCode::DirectoryError,
            MembershipError::MailFailed { .. } => ErrorCode::MailerError,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::NotFound(id) => write!(f, "Membership {} not found", id),
            MembershipError::TypeNotFound(id) => {
                write!(f, "Membership type {} not found", id)
            }
            MembershipError::DateRange { start, end } => {
                write!(f, "End Date {} cannot be before Start Date {}", end, start)
            }
            MembershipError::MissingReference { field } => {
                write!(f, "Required reference '{}' is not set", field)
            }
            MembershipError::InvalidState { current, attempted } => {
                write!(f, "Cannot {} a membership in state {}", attempted, current)
            }
            MembershipError::InvoiceAlreadyRecorded(id) => {
                write!(f, "Membership {} already has an invoice recorded", id)
            }
            MembershipError::BillingFailed { reason } => write!(f, "Billing failed: {}", reason),
            MembershipError::CatalogFailed { reason } => write!(f, "Catalog failed: {}", reason),
            MembershipError::DirectoryFailed { reason } => {
                write!(f, "Member directory failed: {}", reason)
            }
            MembershipError::MailFailed { reason } => write!(f, "Mail dispatch failed: {}", reason),
            MembershipError::ValidationFailed { field, message } => {
                write!(f, "Validation failed on '{}': {}", field, message)
            }
            MembershipError::Infrastructure(message) => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for MembershipError {}

impl From<crate::domain::foundation::ValidationError> for MembershipError {
    fn from(err: crate::domain::foundation::ValidationError) -> Self {
        use crate::domain::foundation::ValidationError as V;
        let field = match &err {
            V::EmptyField { field } => field.clone(),
            V::OutOfRange { field, .. } => field.clone(),
            V::InvalidFormat { field, .. } => field.clone(),
        };
        MembershipError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvoiceAlreadyRecorded => {
                // Id is carried in the message; the variant matters more
                // than the payload for callers matching on the race.
                MembershipError::Infrastructure(err.message)
            }
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.message),
        }
    }
}
