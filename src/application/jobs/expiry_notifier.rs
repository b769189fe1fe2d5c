//! ExpiryNotifier - Background sweep for expiring memberships.
//!
//! Each sweep queries Active memberships whose end date falls inside the
//! reminder window (today through today plus `window_days`, both
//! inclusive) and emails each member a renewal reminder.
//!
//! Failure isolation: one member with a missing contact or a bouncing
//! address must not block the rest of the batch, so per-record errors
//! are logged and counted, never propagated.
//!
//! ## Graceful Shutdown
//!
//! `run` listens on a watch channel and finishes the current sweep
//! before stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::{DomainError, LocalDate};
use crate::domain::membership::Membership;
use crate::domain::notification::expiry_reminder;
use crate::ports::{EmailMessage, Mailer, MemberDirectory, MembershipRepository};

/// Configuration for the expiry sweep.
#[derive(Debug, Clone)]
pub struct ExpiryNotifierConfig {
    /// Reminder window in days ahead of today, inclusive on both ends.
    pub window_days: u32,

    /// How often to run the sweep.
    pub sweep_interval: Duration,
}

impl Default for ExpiryNotifierConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            sweep_interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl ExpiryNotifierConfig {
    /// Create config with a custom window.
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// Create config with a custom sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Memberships found inside the window.
    pub matched: usize,

    /// Reminders successfully handed to the mailer.
    pub notified: usize,

    /// Records skipped because contact lookup or sending failed.
    pub failed: usize,
}

/// Background service that sends expiry reminders.
pub struct ExpiryNotifier {
    memberships: Arc<dyn MembershipRepository>,
    directory: Arc<dyn MemberDirectory>,
    mailer: Arc<dyn Mailer>,
    config: ExpiryNotifierConfig,
}

impl ExpiryNotifier {
    /// Create a notifier with default configuration.
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        directory: Arc<dyn MemberDirectory>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            memberships,
            directory,
            mailer,
            config: ExpiryNotifierConfig::default(),
        }
    }

    /// Create a notifier with custom configuration.
    pub fn with_config(
        memberships: Arc<dyn MembershipRepository>,
        directory: Arc<dyn MemberDirectory>,
        mailer: Arc<dyn Mailer>,
        config: ExpiryNotifierConfig,
    ) -> Self {
        Self {
            memberships,
            directory,
            mailer,
            config,
        }
    }

    /// Run the sweep loop until the shutdown signal flips.
    ///
    /// Errors from the repository query are fatal for the loop; per-record
    /// delivery failures are not.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    let report = self.sweep_once(LocalDate::today()).await?;
                    tracing::info!(
                        matched = report.matched,
                        notified = report.notified,
                        failed = report.failed,
                        "expiry sweep complete"
                    );
                }
            }
        }
    }

    /// Run one sweep as of `today`.
    ///
    /// Taking the date as a parameter keeps the window arithmetic
    /// deterministic under test.
    pub async fn sweep_once(&self, today: LocalDate) -> Result<SweepReport, DomainError> {
        let window_end = today.add_days(i64::from(self.config.window_days));
        let expiring = self
            .memberships
            .find_active_expiring_between(today, window_end)
            .await?;

        let mut report = SweepReport {
            matched: expiring.len(),
            ..SweepReport::default()
        };

        for membership in &expiring {
            match self.notify_one(membership).await {
                Ok(()) => report.notified += 1,
                Err(reason) => {
                    report.failed += 1;
                    tracing::warn!(
                        membership_id = %membership.id,
                        member = %membership.member,
                        %reason,
                        "expiry reminder failed, continuing sweep"
                    );
                }
            }
        }

        Ok(report)
    }

    async fn notify_one(&self, membership: &Membership) -> Result<(), String> {
        // The query guarantees an end date; guard anyway rather than panic.
        let end_date = membership
            .end_date
            .ok_or_else(|| "membership has no end date".to_string())?;

        let contact = self
            .directory
            .resolve_contact(&membership.member)
            .await
            .map_err(|e| e.message)?;

        let content = expiry_reminder(&contact.display_name, &membership.id, &end_date);
        self.mailer
            .send(EmailMessage {
                to: contact.email,
                subject: content.subject,
                body: content.body,
            })
            .await
            .map_err(|e| e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryMemberDirectory, InMemoryMembershipRepository, RecordingMailer,
    };
    use crate::domain::foundation::{MemberId, MembershipId, MembershipTypeId};
    use crate::domain::membership::Membership;

    struct Fixture {
        memberships: Arc<InMemoryMembershipRepository>,
        directory: Arc<InMemoryMemberDirectory>,
        mailer: Arc<RecordingMailer>,
        notifier: ExpiryNotifier,
    }

    fn fixture() -> Fixture {
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let mailer = Arc::new(RecordingMailer::new());
        let notifier = ExpiryNotifier::new(
            memberships.clone(),
            directory.clone(),
            mailer.clone(),
        );
        Fixture {
            memberships,
            directory,
            mailer,
            notifier,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> LocalDate {
        LocalDate::from_ymd(y, m, d).unwrap()
    }

    /// Active membership for `member` ending on `end`, stored in the repo.
    async fn active_membership(fx: &Fixture, member: &str, end: LocalDate) -> MembershipId {
        let member_id = MemberId::new(member).unwrap();
        fx.directory.register(
            member_id.clone(),
            format!("{}@example.com", member.to_lowercase()),
            member,
        );

        let mut membership = Membership::new(
            MembershipId::new(),
            member_id,
            MembershipTypeId::new(),
            end.add_days(-30),
        );
        membership.end_date = Some(end);
        membership.submit().unwrap();
        fx.memberships.save(&membership).await.unwrap();
        membership.id
    }

    const TODAY: (i32, u32, u32) = (2024, 3, 1);

    fn today() -> LocalDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    // Window boundaries

    #[tokio::test]
    async fn notifies_expiry_on_day_zero_and_day_seven() {
        let fx = fixture();
        active_membership(&fx, "Ana", today()).await;
        active_membership(&fx, "Ben", today().add_days(7)).await;

        let report = fx.notifier.sweep_once(today()).await.unwrap();

        assert_eq!(report, SweepReport { matched: 2, notified: 2, failed: 0 });
        assert_eq!(fx.mailer.sent_messages().len(), 2);
    }

    #[tokio::test]
    async fn skips_expiry_on_day_eight_and_yesterday() {
        let fx = fixture();
        active_membership(&fx, "Cal", today().add_days(8)).await;
        active_membership(&fx, "Dee", today().add_days(-1)).await;

        let report = fx.notifier.sweep_once(today()).await.unwrap();

        assert_eq!(report.matched, 0);
        assert!(fx.mailer.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn custom_window_widens_the_sweep() {
        let fx = fixture();
        let notifier = ExpiryNotifier::with_config(
            fx.memberships.clone(),
            fx.directory.clone(),
            fx.mailer.clone(),
            ExpiryNotifierConfig::default().with_window_days(30),
        );
        active_membership(&fx, "Eve", today().add_days(21)).await;

        let report = notifier.sweep_once(today()).await.unwrap();
        assert_eq!(report.notified, 1);
    }

    // Status filtering

    #[tokio::test]
    async fn ignores_non_active_memberships() {
        let fx = fixture();
        let id = active_membership(&fx, "Fay", today().add_days(3)).await;
        let mut stored = fx.memberships.find_by_id(&id).await.unwrap().unwrap();
        stored.cancel().unwrap();
        fx.memberships.update(&stored).await.unwrap();

        let report = fx.notifier.sweep_once(today()).await.unwrap();
        assert_eq!(report.matched, 0);
    }

    // Message content

    #[tokio::test]
    async fn reminder_names_the_member_and_the_expiry_date() {
        let fx = fixture();
        let id = active_membership(&fx, "Gil", today().add_days(5)).await;

        fx.notifier.sweep_once(today()).await.unwrap();

        let sent = fx.mailer.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "gil@example.com");
        assert_eq!(sent[0].subject, "Your Gym Membership is Expiring Soon");
        assert!(sent[0].body.contains("Dear Gil,"));
        assert!(sent[0].body.contains(&id.to_string()));
        assert!(sent[0].body.contains("2024-03-06"));
    }

    // Failure isolation

    #[tokio::test]
    async fn bounced_address_does_not_stop_the_sweep() {
        let fx = fixture();
        active_membership(&fx, "Hal", today().add_days(1)).await;
        active_membership(&fx, "Ida", today().add_days(2)).await;
        active_membership(&fx, "Jo", today().add_days(3)).await;
        fx.mailer.bounce_address("ida@example.com");

        let report = fx.notifier.sweep_once(today()).await.unwrap();

        assert_eq!(report, SweepReport { matched: 3, notified: 2, failed: 1 });
        let mut recipients: Vec<_> = fx
            .mailer
            .sent_messages()
            .into_iter()
            .map(|m| m.to)
            .collect();
        recipients.sort();
        assert_eq!(recipients, vec!["hal@example.com", "jo@example.com"]);
    }

    #[tokio::test]
    async fn missing_contact_counts_as_failed() {
        let fx = fixture();
        // Stored membership whose member was never registered in the
        // directory.
        let orphan = MemberId::new("GHOST").unwrap();
        let mut membership = Membership::new(
            MembershipId::new(),
            orphan,
            MembershipTypeId::new(),
            today().add_days(-30),
        );
        membership.end_date = Some(today().add_days(2));
        membership.submit().unwrap();
        fx.memberships.save(&membership).await.unwrap();

        let report = fx.notifier.sweep_once(today()).await.unwrap();
        assert_eq!(report, SweepReport { matched: 1, notified: 0, failed: 1 });
    }

    #[tokio::test]
    async fn empty_window_reports_all_zeroes() {
        let fx = fixture();
        let report = fx.notifier.sweep_once(today()).await.unwrap();
        assert_eq!(report, SweepReport::default());
    }

    // Loop control

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let fx = fixture();
        // The loop sweeps with the wall-clock date, so anchor there.
        active_membership(&fx, "Kim", LocalDate::today().add_days(1)).await;

        let notifier = ExpiryNotifier::with_config(
            fx.memberships.clone(),
            fx.directory.clone(),
            fx.mailer.clone(),
            ExpiryNotifierConfig::default().with_sweep_interval(Duration::from_millis(10)),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { notifier.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert!(!fx.mailer.sent_messages().is_empty());
    }
}
