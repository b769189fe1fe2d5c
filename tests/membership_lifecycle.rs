//! End-to-end membership lifecycle test.
//!
//! Exercises the full flow through the public API: plan creation with
//! catalog materialization, membership save and submit, invoice
//! generation, and the expiry reminder sweep.

use std::sync::Arc;

use gymdesk::adapters::memory::{
    InMemoryBilling, InMemoryCatalog, InMemoryMemberDirectory, InMemoryMembershipRepository,
    InMemoryMembershipTypeRepository, RecordingMailer,
};
use gymdesk::application::{
    ExpiryNotifier, ExpiryNotifierConfig, SaveMembershipCommand, SaveMembershipHandler,
    SaveMembershipTypeCommand, SaveMembershipTypeHandler, SubmitMembershipCommand,
    SubmitMembershipHandler, GYM_MEMBER_CLASSIFICATION,
};
use gymdesk::domain::foundation::{LocalDate, MemberId, Money};
use gymdesk::ports::{MembershipRepository, MembershipTypeRepository};
use gymdesk::domain::membership::{DocState, MembershipStatus};

struct App {
    memberships: Arc<InMemoryMembershipRepository>,
    plans: Arc<InMemoryMembershipTypeRepository>,
    billing: Arc<InMemoryBilling>,
    catalog: Arc<InMemoryCatalog>,
    directory: Arc<InMemoryMemberDirectory>,
    mailer: Arc<RecordingMailer>,
    save_plan: SaveMembershipTypeHandler,
    save_membership: SaveMembershipHandler,
    submit_membership: SubmitMembershipHandler,
    notifier: ExpiryNotifier,
}

fn app() -> App {
    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let plans = Arc::new(InMemoryMembershipTypeRepository::new());
    let billing = Arc::new(InMemoryBilling::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let directory = Arc::new(InMemoryMemberDirectory::new());
    let mailer = Arc::new(RecordingMailer::new());

    let save_plan = SaveMembershipTypeHandler::new(plans.clone(), catalog.clone());
    let save_membership = SaveMembershipHandler::new(
        memberships.clone(),
        plans.clone(),
        billing.clone(),
        directory.clone(),
    );
    let submit_membership = SubmitMembershipHandler::new(
        memberships.clone(),
        plans.clone(),
        billing.clone(),
        directory.clone(),
    );
    let notifier = ExpiryNotifier::with_config(
        memberships.clone(),
        directory.clone(),
        mailer.clone(),
        ExpiryNotifierConfig::default(),
    );

    App {
        memberships,
        plans,
        billing,
        catalog,
        directory,
        mailer,
        save_plan,
        save_membership,
        submit_membership,
        notifier,
    }
}

fn date(y: i32, m: u32, d: u32) -> LocalDate {
    LocalDate::from_ymd(y, m, d).unwrap()
}

#[tokio::test]
async fn full_lifecycle_from_plan_to_expiry_reminder() {
    let app = app();

    // A new plan materializes its catalog item on first save.
    let plan = app
        .save_plan
        .handle(SaveMembershipTypeCommand {
            id: None,
            name: "Monthly".to_string(),
            duration_months: 1,
            price: Money::from_cents(5000).unwrap(),
        })
        .await
        .unwrap()
        .membership_type;
    assert_eq!(plan.item.as_ref().unwrap().as_str(), "GYM-Monthly");
    assert_eq!(app.catalog.created_items().len(), 1);

    // A member signs up for February starting mid-January.
    let member = MemberId::new("CUST-0042").unwrap();
    app.directory
        .register(member.clone(), "sam@example.com", "Sam Park");

    let saved = app
        .save_membership
        .handle(SaveMembershipCommand {
            id: None,
            member: member.clone(),
            membership_type: plan.id,
            start_date: date(2024, 1, 15),
        })
        .await
        .unwrap()
        .membership;

    assert_eq!(saved.status, MembershipStatus::Draft);
    assert_eq!(saved.end_date, Some(date(2024, 2, 15)));
    assert_eq!(
        app.directory.classification_of(&member),
        Some(GYM_MEMBER_CLASSIFICATION.to_string())
    );
    // Drafts are never billed.
    assert!(app.billing.created_requests().is_empty());

    // Submission activates the record and bills exactly once.
    let submitted = app
        .submit_membership
        .handle(SubmitMembershipCommand { id: saved.id })
        .await
        .unwrap();

    assert_eq!(submitted.membership.status, MembershipStatus::Active);
    assert_eq!(submitted.membership.doc_state, DocState::Submitted);
    let invoice = submitted.invoice.unwrap();
    assert_eq!(invoice.as_str(), "SINV-0001");
    assert_eq!(app.billing.submitted_invoices(), vec![invoice.clone()]);

    let request = &app.billing.created_requests()[0];
    assert_eq!(request.customer, member);
    assert_eq!(request.item.as_str(), "GYM-Monthly");
    assert_eq!(request.qty, 1);
    assert_eq!(request.rate, Money::from_cents(5000).unwrap());
    assert_eq!(request.posting_date, date(2024, 1, 15));

    // Re-saving the submitted record must not bill again.
    app.save_membership
        .handle(SaveMembershipCommand {
            id: Some(saved.id),
            member: member.clone(),
            membership_type: plan.id,
            start_date: date(2024, 1, 15),
        })
        .await
        .unwrap();
    assert_eq!(app.billing.created_requests().len(), 1);

    let stored = app
        .memberships
        .find_by_id(&saved.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.invoice, Some(invoice));

    // Seven days before expiry the sweep picks it up; eight days out it
    // does not.
    let outside = app.notifier.sweep_once(date(2024, 2, 7)).await.unwrap();
    assert_eq!(outside.matched, 0);

    let inside = app.notifier.sweep_once(date(2024, 2, 8)).await.unwrap();
    assert_eq!(inside.matched, 1);
    assert_eq!(inside.notified, 1);

    let sent = app.mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "sam@example.com");
    assert_eq!(sent[0].subject, "Your Gym Membership is Expiring Soon");
    assert!(sent[0].body.contains("Dear Sam Park,"));
    assert!(sent[0].body.contains("2024-02-15"));
}

#[tokio::test]
async fn plan_item_is_materialized_once_across_saves() {
    let app = app();

    let plan = app
        .save_plan
        .handle(SaveMembershipTypeCommand {
            id: None,
            name: "Annual".to_string(),
            duration_months: 12,
            price: Money::from_cents(48000).unwrap(),
        })
        .await
        .unwrap()
        .membership_type;

    // Price change on re-save; the catalog is untouched.
    app.save_plan
        .handle(SaveMembershipTypeCommand {
            id: Some(plan.id),
            name: "Annual".to_string(),
            duration_months: 12,
            price: Money::from_cents(52000).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(app.catalog.created_items().len(), 1);
    let stored = app.plans.find_by_name("Annual").await.unwrap().unwrap();
    assert_eq!(stored.price, Money::from_cents(52000).unwrap());
    assert_eq!(stored.item.unwrap().as_str(), "GYM-Annual");
}

#[tokio::test]
async fn month_end_start_clamps_expiry_to_short_month() {
    let app = app();

    let plan = app
        .save_plan
        .handle(SaveMembershipTypeCommand {
            id: None,
            name: "Monthly".to_string(),
            duration_months: 1,
            price: Money::from_cents(5000).unwrap(),
        })
        .await
        .unwrap()
        .membership_type;

    let member = MemberId::new("CUST-31").unwrap();
    app.directory
        .register(member.clone(), "jan@example.com", "Jan");

    let saved = app
        .save_membership
        .handle(SaveMembershipCommand {
            id: None,
            member,
            membership_type: plan.id,
            start_date: date(2024, 1, 31),
        })
        .await
        .unwrap()
        .membership;

    // 2024 is a leap year
    assert_eq!(saved.end_date, Some(date(2024, 2, 29)));
}
