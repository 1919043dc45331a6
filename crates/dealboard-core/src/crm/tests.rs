//! Tests for the crm module.

use super::*;
use crate::{
    models::{ActivitySubject, Stage},
    params::{AddActivity, CreateContact, CreateDeal, Delete, Id, MoveDeal, SearchContacts, UpdateDeal},
    store::DealStore,
};
use tempfile::TempDir;

/// Helper function to create a test crm
async fn create_test_crm() -> (TempDir, Crm) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let crm = CrmBuilder::new()
        .with_database_path(Some(&db_path))
        .with_user(Some("anna@example.com"))
        .build()
        .await
        .expect("Failed to create crm");
    (temp_dir, crm)
}

async fn create_contact(crm: &Crm, name: &str, company: &str) -> u64 {
    crm.create_contact(&CreateContact {
        name: name.to_string(),
        company: company.to_string(),
        ..Default::default()
    })
    .await
    .expect("Failed to create contact")
    .id
}

async fn create_deal(crm: &Crm, contact_id: u64, title: &str, value: f64) -> crate::models::Deal {
    crm.create_deal(&CreateDeal {
        title: title.to_string(),
        contact_id,
        value,
        ..Default::default()
    })
    .await
    .expect("Failed to create deal")
}

#[tokio::test]
async fn test_create_contact_stamps_user() {
    let (_temp_dir, crm) = create_test_crm().await;

    let contact = crm
        .create_contact(&CreateContact {
            name: "Erik Svensson".to_string(),
            company: "Svensson Bygg".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create contact");

    assert_eq!(contact.created_by.as_deref(), Some("anna@example.com"));

    let fetched = crm
        .get_contact(&Id { id: contact.id })
        .await
        .expect("Failed to get contact")
        .expect("Contact should exist");
    assert_eq!(fetched.name, "Erik Svensson");
}

#[tokio::test]
async fn test_search_contacts_matches_name_or_company() {
    let (_temp_dir, crm) = create_test_crm().await;
    create_contact(&crm, "Erik Svensson", "Svensson Bygg").await;
    create_contact(&crm, "Lina Berg", "Nordic Paper").await;

    let by_company = crm
        .search_contacts(&SearchContacts {
            query: Some("paper".to_string()),
            follow_up: false,
        })
        .await
        .expect("Failed to search contacts");
    assert_eq!(by_company.len(), 1);
    assert_eq!(by_company[0].name, "Lina Berg");

    let blank = crm
        .search_contacts(&SearchContacts {
            query: Some("   ".to_string()),
            follow_up: false,
        })
        .await
        .expect("Failed to search contacts");
    assert_eq!(blank.len(), 2);
}

#[tokio::test]
async fn test_create_deal_defaults() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;

    let deal = create_deal(&crm, contact_id, "Roof renovation", 12500.0).await;

    assert_eq!(deal.stage, Stage::Potential);
    assert_eq!(deal.currency, "SEK");
    assert_eq!(deal.created_by.as_deref(), Some("anna@example.com"));
}

#[tokio::test]
async fn test_create_deal_for_missing_contact_fails() {
    let (_temp_dir, crm) = create_test_crm().await;

    let result = crm
        .create_deal(&CreateDeal {
            title: "Orphan".to_string(),
            contact_id: 999,
            value: 1.0,
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(CrmError::ContactNotFound { id: 999 })));
}

#[tokio::test]
async fn test_update_deal_fields_keeps_others() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;

    let updated = crm
        .update_deal_fields(&UpdateDeal {
            id: deal.id,
            value: Some(250.0),
            ..Default::default()
        })
        .await
        .expect("Failed to update deal");

    assert_eq!(updated.value, 250.0);
    assert_eq!(updated.title, "Roof");
    assert_eq!(updated.stage, Stage::Potential);
}

#[tokio::test]
async fn test_move_deal_any_direction() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;

    let won = crm
        .move_deal(&MoveDeal {
            id: deal.id,
            stage: Stage::Won,
        })
        .await
        .expect("Failed to move deal");
    assert_eq!(won.stage, Stage::Won);

    let back = crm
        .move_deal(&MoveDeal {
            id: deal.id,
            stage: Stage::Potential,
        })
        .await
        .expect("Failed to move deal back");
    assert_eq!(back.stage, Stage::Potential);
}

#[tokio::test]
async fn test_move_missing_deal() {
    let (_temp_dir, crm) = create_test_crm().await;

    let result = crm
        .move_deal(&MoveDeal {
            id: 42,
            stage: Stage::Won,
        })
        .await;

    assert!(matches!(result, Err(CrmError::DealNotFound { id: 42 })));
}

#[tokio::test]
async fn test_deal_store_update_replaces_record() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;

    let stored = DealStore::update_deal(&crm, &deal.with_stage(Stage::Lost))
        .await
        .expect("Failed to update deal");
    assert_eq!(stored.stage, Stage::Lost);
    assert_eq!(stored.title, deal.title);
    assert_eq!(stored.value, deal.value);

    let all = DealStore::list_deals(&crm).await.expect("Failed to list deals");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].stage, Stage::Lost);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;

    let result = crm
        .delete_deal(&Delete {
            id: deal.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(result, Err(CrmError::InvalidInput { .. })));

    crm.delete_deal(&Delete {
        id: deal.id,
        confirmed: true,
    })
    .await
    .expect("Failed to delete deal");
    assert!(crm.get_deal(&Id { id: deal.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_contact_cascades_to_deals() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;

    crm.delete_contact(&Delete {
        id: contact_id,
        confirmed: true,
    })
    .await
    .expect("Failed to delete contact");

    assert!(crm.get_deal(&Id { id: deal.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_activities_newest_first() {
    let (_temp_dir, crm) = create_test_crm().await;
    let contact_id = create_contact(&crm, "Erik", "").await;
    let subject = ActivitySubject::Contact(contact_id);

    for note in ["Called", "Sent offer"] {
        crm.add_activity(&AddActivity {
            subject,
            note: note.to_string(),
        })
        .await
        .expect("Failed to add activity");
    }

    let entries = crm
        .list_activities(subject)
        .await
        .expect("Failed to list activities");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].note, "Sent offer");
    assert_eq!(entries[1].note, "Called");

    crm.delete_activity(subject, entries[0].id)
        .await
        .expect("Failed to delete activity");
    let entries = crm.list_activities(subject).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_mutations_publish_change_events() {
    let (_temp_dir, crm) = create_test_crm().await;
    let mut changes = crm.subscribe();

    let contact_id = create_contact(&crm, "Erik", "").await;
    assert_eq!(changes.recv().await.unwrap(), ChangeEvent::Contacts);

    let deal = create_deal(&crm, contact_id, "Roof", 100.0).await;
    assert_eq!(changes.recv().await.unwrap(), ChangeEvent::Deals);

    crm.add_activity(&AddActivity {
        subject: ActivitySubject::Deal(deal.id),
        note: "Kickoff".to_string(),
    })
    .await
    .unwrap();
    assert_eq!(changes.recv().await.unwrap(), ChangeEvent::Activities);
}

#[tokio::test]
async fn test_team_rejects_outsider() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let result = CrmBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_team(["anna@example.com", "jonas@example.com"])
        .with_user(Some("mallory@example.com"))
        .build()
        .await;
    assert!(matches!(result, Err(CrmError::Unauthorized { .. })));

    let result = CrmBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_team(["anna@example.com"])
        .with_user(None::<String>)
        .build()
        .await;
    assert!(matches!(result, Err(CrmError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_team_normalizes_user() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let crm = CrmBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_team(["anna@example.com"])
        .with_user(Some("  Anna@Example.COM "))
        .build()
        .await
        .expect("Failed to create crm");

    assert_eq!(crm.user(), Some("anna@example.com"));
}
