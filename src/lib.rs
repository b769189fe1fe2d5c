//! Gymdesk - Membership Management Core
//!
//! This crate implements gym membership plans, member subscriptions with
//! derived expiry dates, invoice generation on submission, and a scheduled
//! expiry-reminder sweep.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
